//! # API Facade
//!
//! [`CourseApi`] is the single entry point for every mutation and projection.
//! It owns the canonical [`CourseState`] and serves the four external
//! collaborators:
//!
//! - dialog/editor collaborators call the create/update/delete methods and
//!   get back `Result<CmdResult>`;
//! - the drag-gesture collaborator feeds `(drag_id, before_id, target)`
//!   triples and `(drag_index, hover_index)` pairs into the move methods;
//! - the search collaborator passes a raw query to [`CourseApi::project`];
//! - the download collaborator asks for a [`DownloadTarget`].
//!
//! The facade holds no business logic: it validates nothing itself and
//! delegates to the command layer, which in turn drives the ordering engine.
//! Everything is synchronous and single-threaded; a host embedding this in a
//! concurrent setting must serialize calls (there is no internal locking).

use serde::Serialize;
use uuid::Uuid;

use crate::commands::{modules, reorder, resources, CmdResult};
use crate::error::{CourseError, Result};
use crate::model::ResourcePayload;
use crate::ordering::CourseState;
use crate::search::{self, CourseView};

/// What the download/export collaborator receives for a resource. The core
/// performs no transfer itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DownloadTarget {
    Url(String),
    File { file_name: String },
}

/// The mutation API over a course outline snapshot.
#[derive(Debug, Clone, Default)]
pub struct CourseApi {
    state: CourseState,
}

impl CourseApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes from an existing snapshot (e.g. one a host deserialized).
    pub fn with_state(state: CourseState) -> Self {
        Self { state }
    }

    /// Read access for rendering collaborators. The returned state is
    /// canonical; derive views from it, never mutate around the API.
    pub fn state(&self) -> &CourseState {
        &self.state
    }

    pub fn into_state(self) -> CourseState {
        self.state
    }

    // --- modules ---

    pub fn create_module(&mut self, name: impl Into<String>) -> Result<CmdResult> {
        modules::create(&mut self.state, name)
    }

    pub fn rename_module(&mut self, module_id: Uuid, name: impl Into<String>) -> Result<CmdResult> {
        modules::rename(&mut self.state, module_id, name)
    }

    pub fn delete_module(&mut self, module_id: Uuid) -> Result<CmdResult> {
        modules::delete(&mut self.state, module_id)
    }

    // --- resources ---

    pub fn add_link(
        &mut self,
        module_id: Option<Uuid>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<CmdResult> {
        resources::add(
            &mut self.state,
            module_id,
            title,
            ResourcePayload::Link { url: url.into() },
        )
    }

    pub fn add_file(
        &mut self,
        module_id: Option<Uuid>,
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
    ) -> Result<CmdResult> {
        resources::add(
            &mut self.state,
            module_id,
            title,
            ResourcePayload::File {
                file_name: file_name.into(),
                file_size,
                file_type: file_type.into(),
            },
        )
    }

    pub fn update_link(
        &mut self,
        resource_id: Uuid,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<CmdResult> {
        resources::update(
            &mut self.state,
            resource_id,
            title,
            ResourcePayload::Link { url: url.into() },
        )
    }

    pub fn update_file(
        &mut self,
        resource_id: Uuid,
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
    ) -> Result<CmdResult> {
        resources::update(
            &mut self.state,
            resource_id,
            title,
            ResourcePayload::File {
                file_name: file_name.into(),
                file_size,
                file_type: file_type.into(),
            },
        )
    }

    pub fn delete_resource(&mut self, resource_id: Uuid) -> Result<CmdResult> {
        resources::delete(&mut self.state, resource_id)
    }

    // --- drag surface ---

    pub fn move_module(&mut self, drag_index: usize, hover_index: usize) -> Result<CmdResult> {
        reorder::move_module(&mut self.state, drag_index, hover_index)
    }

    pub fn move_resource(
        &mut self,
        drag_id: Uuid,
        before_id: Option<Uuid>,
        target: Option<Uuid>,
    ) -> Result<CmdResult> {
        reorder::move_resource(&mut self.state, drag_id, before_id, target)
    }

    // --- projections ---

    /// Derives the filtered, highlight-annotated view for the given query.
    pub fn project(&self, query: &str) -> CourseView {
        search::project(&self.state, query)
    }

    /// What to hand the download collaborator for this resource.
    pub fn download_target(&self, resource_id: Uuid) -> Result<DownloadTarget> {
        let resource = self
            .state
            .resource(resource_id)
            .ok_or(CourseError::ResourceNotFound(resource_id))?;
        Ok(match &resource.payload {
            ResourcePayload::Link { url } => DownloadTarget::Url(url.clone()),
            ResourcePayload::File { file_name, .. } => DownloadTarget::File {
                file_name: file_name.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_facade_round_trip() {
        let mut api = CourseApi::new();
        let module_id = api.create_module("Week 1").unwrap().affected_modules[0].id;
        let link_id = api
            .add_link(None, "Syllabus", "http://x")
            .unwrap()
            .affected_resources[0]
            .id;

        api.move_resource(link_id, None, Some(module_id)).unwrap();

        let state = api.state();
        assert_eq!(state.resource(link_id).unwrap().module_id, Some(module_id));
        state.verify().unwrap();
    }

    #[test]
    fn test_snapshot_resume() {
        let mut api = CourseApi::new();
        api.create_module("Intro").unwrap();
        let snapshot = api.into_state();

        let json = serde_json::to_string(&snapshot).unwrap();
        let restored: CourseState = serde_json::from_str(&json).unwrap();
        let api = CourseApi::with_state(restored);
        assert_eq!(api.state().modules.len(), 1);
    }

    #[test]
    fn test_fixture_builder_addresses_by_name() {
        let fixture = crate::test_utils::CourseFixture::new()
            .with_module("Intro")
            .with_module("Week 1")
            .with_link(Some("Intro"), "Notes", "http://n")
            .with_link(None, "Syllabus", "http://s")
            .with_file(None, "Slides", "week1.pdf");

        let intro = fixture.module_id("Intro");
        let notes = fixture.resource_id("Notes");
        let state = fixture.api.state();
        assert_eq!(state.resource(notes).unwrap().module_id, Some(intro));
        assert_eq!(state.scope_resources(None).len(), 2);
        state.verify().unwrap();
    }

    #[test]
    fn test_download_target_per_kind() {
        let mut api = CourseApi::new();
        let link_id = api
            .add_link(None, "Syllabus", "http://x")
            .unwrap()
            .affected_resources[0]
            .id;
        let file_id = api
            .add_file(None, "Slides", "week1.pdf", 2048, "application/pdf")
            .unwrap()
            .affected_resources[0]
            .id;

        assert_eq!(
            api.download_target(link_id).unwrap(),
            DownloadTarget::Url("http://x".to_string())
        );
        assert_eq!(
            api.download_target(file_id).unwrap(),
            DownloadTarget::File {
                file_name: "week1.pdf".to_string()
            }
        );
        assert!(matches!(
            api.download_target(Uuid::new_v4()),
            Err(CourseError::ResourceNotFound(_))
        ));
    }
}
