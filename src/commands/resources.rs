use chrono::Utc;
use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CourseError, Result};
use crate::model::{Resource, ResourcePayload};
use crate::ordering::{self, CourseState};

/// Adds a resource to the end of its target scope. `module_id = None` lands
/// it in the unassigned pool; otherwise the module must exist.
pub fn add(
    state: &mut CourseState,
    module_id: Option<Uuid>,
    title: impl Into<String>,
    payload: ResourcePayload,
) -> Result<CmdResult> {
    if let Some(id) = module_id {
        if state.module(id).is_none() {
            return Err(CourseError::ModuleNotFound(id));
        }
    }
    let resource = Resource::new(title, payload, module_id)?;
    ordering::append_resource(state, resource.clone());
    let stored = state.resource(resource.id).cloned().unwrap_or(resource);

    let mut result = CmdResult::default().with_resource(stored.clone());
    result.add_message(CmdMessage::success(format!(
        "{} added: {}",
        capitalized_kind(&stored),
        stored.title
    )));
    Ok(result)
}

/// Edits a resource in place. Scope, order, and kind are never touched by
/// an edit; only the drag surface moves resources, and a link stays a link.
pub fn update(
    state: &mut CourseState,
    resource_id: Uuid,
    title: impl Into<String>,
    payload: ResourcePayload,
) -> Result<CmdResult> {
    let title = title.into();
    // Validate everything before touching the stored record.
    let validated = Resource::new(title, payload, None)?;
    let resource = state
        .resources
        .iter_mut()
        .find(|r| r.id == resource_id)
        .ok_or(CourseError::ResourceNotFound(resource_id))?;
    if resource.payload.kind() != validated.payload.kind() {
        // A stale edit dialog must not transmute the entry.
        return Err(CourseError::KindMismatch {
            actual: resource.payload.kind(),
            requested: validated.payload.kind(),
        });
    }
    resource.title = validated.title;
    resource.payload = validated.payload;
    resource.updated_at = Utc::now();

    let updated = resource.clone();
    let mut result = CmdResult::default().with_resource(updated.clone());
    result.add_message(CmdMessage::success(format!(
        "{} updated: {}",
        capitalized_kind(&updated),
        updated.title
    )));
    Ok(result)
}

/// Deletes a resource. The scope it leaves is renumbered so orders stay
/// dense.
pub fn delete(state: &mut CourseState, resource_id: Uuid) -> Result<CmdResult> {
    let resource = state
        .resource(resource_id)
        .ok_or(CourseError::ResourceNotFound(resource_id))?
        .clone();
    ordering::remove_resource(state, resource_id);

    let mut result = CmdResult::default().with_resource(resource.clone());
    result.add_message(CmdMessage::success(format!(
        "{} deleted: {}",
        capitalized_kind(&resource),
        resource.title
    )));
    Ok(result)
}

fn capitalized_kind(resource: &Resource) -> &'static str {
    match resource.payload {
        ResourcePayload::Link { .. } => "Link",
        ResourcePayload::File { .. } => "File",
    }
}
