//! End-to-end behavior through the public facade: the ordering invariants,
//! the documented move semantics, and the search projection rules.

use coursebuilder::{CourseApi, CourseError, MatchSegment};

fn outline_with_pool_link() -> (CourseApi, uuid::Uuid, uuid::Uuid, uuid::Uuid) {
    let mut api = CourseApi::new();
    let intro = api.create_module("Intro").unwrap().affected_modules[0].id;
    let week1 = api.create_module("Week 1").unwrap().affected_modules[0].id;
    let syllabus = api
        .add_link(None, "Syllabus", "http://x")
        .unwrap()
        .affected_resources[0]
        .id;
    (api, intro, week1, syllabus)
}

#[test]
fn move_from_pool_into_module_empties_pool() {
    let (mut api, _intro, week1, syllabus) = outline_with_pool_link();

    api.move_resource(syllabus, None, Some(week1)).unwrap();

    let state = api.state();
    let moved = state.resource(syllabus).unwrap();
    assert_eq!(moved.module_id, Some(week1));
    assert_eq!(moved.order, 0);
    assert!(state.scope_resources(None).is_empty());
    assert_eq!(state.scope_resources(Some(week1)).len(), 1);
    state.verify().unwrap();
}

#[test]
fn search_week_selects_only_the_matching_module() {
    let (api, intro, week1, _syllabus) = outline_with_pool_link();

    let view = api.project("week");

    assert_eq!(view.modules.len(), 1);
    let hit = &view.modules[0];
    assert_eq!(hit.module.id, week1);
    assert!(hit.force_expanded);
    assert!(hit.heading_highlighted);
    assert!(hit
        .heading
        .iter()
        .any(|s| matches!(s, MatchSegment::Match(m) if m == "Week")));
    assert!(view.modules.iter().all(|m| m.module.id != intro));
    // "Syllabus" / "http://x" do not match, and pool non-matches are dropped.
    assert!(view.unassigned.is_empty());
}

#[test]
fn reorder_within_pool_swaps_orders() {
    let mut api = CourseApi::new();
    let first = api
        .add_link(None, "First", "http://1")
        .unwrap()
        .affected_resources[0]
        .id;
    let second = api
        .add_link(None, "Second", "http://2")
        .unwrap()
        .affected_resources[0]
        .id;

    api.move_resource(second, Some(first), None).unwrap();

    let state = api.state();
    assert_eq!(state.resource(second).unwrap().order, 0);
    assert_eq!(state.resource(first).unwrap().order, 1);
    state.verify().unwrap();
}

#[test]
fn module_reorder_round_trip_restores_sequence() {
    let mut api = CourseApi::new();
    for name in ["A", "B", "C", "D"] {
        api.create_module(name).unwrap();
    }
    let original: Vec<_> = api.state().modules_in_order().iter().map(|m| m.id).collect();

    api.move_module(1, 3).unwrap();
    api.move_module(3, 1).unwrap();

    let restored: Vec<_> = api.state().modules_in_order().iter().map(|m| m.id).collect();
    assert_eq!(original, restored);
    api.state().verify().unwrap();
}

#[test]
fn delete_module_cascades_to_its_resources() {
    let (mut api, intro, week1, syllabus) = outline_with_pool_link();
    let notes = api
        .add_link(Some(intro), "Notes", "http://n")
        .unwrap()
        .affected_resources[0]
        .id;

    let result = api.delete_module(intro).unwrap();

    assert_eq!(result.affected_resources.len(), 1);
    let state = api.state();
    assert!(state.module(intro).is_none());
    assert!(state.resource(notes).is_none());
    assert!(state.resource(syllabus).is_some());
    // The surviving module renumbers down to order 0.
    assert_eq!(state.module(week1).unwrap().order, 0);
    state.verify().unwrap();
}

#[test]
fn append_into_empty_module_gets_order_zero() {
    let mut api = CourseApi::new();
    let module = api.create_module("S").unwrap().affected_modules[0].id;

    api.add_link(Some(module), "T", "U").unwrap();

    let scope = api.state().scope_resources(Some(module));
    assert_eq!(scope.len(), 1);
    assert_eq!(scope[0].title, "T");
    assert_eq!(scope[0].order, 0);
}

#[test]
fn stale_before_anchor_falls_back_to_append() {
    let (mut api, intro, week1, syllabus) = outline_with_pool_link();
    let notes = api
        .add_link(Some(intro), "Notes", "http://n")
        .unwrap()
        .affected_resources[0]
        .id;

    // The anchor lives in Intro, not Week 1: the engine appends instead of
    // failing.
    api.move_resource(syllabus, Some(notes), Some(week1)).unwrap();

    let state = api.state();
    assert_eq!(state.resource(syllabus).unwrap().module_id, Some(week1));
    assert_eq!(state.resource(syllabus).unwrap().order, 0);
    state.verify().unwrap();
}

#[test]
fn rejected_mutations_leave_the_snapshot_untouched() {
    let (mut api, _intro, week1, syllabus) = outline_with_pool_link();
    let before = api.state().clone();

    assert!(matches!(
        api.create_module("   "),
        Err(CourseError::Validation { field: "name" })
    ));
    assert!(api.add_link(Some(week1), "", "http://x").is_err());
    assert!(api.update_link(syllabus, "New", "").is_err());
    assert!(api
        .move_resource(syllabus, None, Some(uuid::Uuid::new_v4()))
        .is_err());

    assert_eq!(api.state(), &before);
}

#[test]
fn invariants_hold_through_arbitrary_churn() {
    let mut api = CourseApi::new();
    let mut module_ids = Vec::new();
    for name in ["A", "B", "C"] {
        module_ids.push(api.create_module(name).unwrap().affected_modules[0].id);
    }
    let mut resource_ids = Vec::new();
    for i in 0..9 {
        let scope = match i % 3 {
            0 => None,
            n => Some(module_ids[n]),
        };
        let id = api
            .add_link(scope, format!("R{}", i), format!("http://r{}", i))
            .unwrap()
            .affected_resources[0]
            .id;
        resource_ids.push(id);
    }

    api.move_resource(resource_ids[0], Some(resource_ids[4]), Some(module_ids[1]))
        .unwrap();
    api.move_resource(resource_ids[7], None, None).unwrap();
    api.move_module(2, 0).unwrap();
    api.delete_resource(resource_ids[1]).unwrap();
    api.delete_module(module_ids[2]).unwrap();
    api.move_resource(resource_ids[3], Some(resource_ids[0]), Some(module_ids[1]))
        .unwrap();

    api.state().verify().unwrap();
}
