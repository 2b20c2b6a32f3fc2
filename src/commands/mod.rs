//! # Command Layer
//!
//! The business logic invoked by the [`crate::api`] facade. Each command is a
//! function over the canonical [`crate::ordering::CourseState`]: validate
//! first, mutate second, so a returned error always means the snapshot is
//! exactly as it was before the call.
//!
//! Commands are UI-agnostic. They return a structured [`CmdResult`] carrying
//! the affected entities and leveled [`CmdMessage`]s; the presentation layer
//! (dialogs, cards, toasts) decides how to render those.
//!
//! ## Command Modules
//!
//! - [`modules`]: create / rename / delete (cascading) modules
//! - [`resources`]: add, edit, and delete link/file resources
//! - [`reorder`]: drag-and-drop moves for modules and resources

use serde::Serialize;

use crate::model::{Module, Resource};

pub mod modules;
pub mod reorder;
pub mod resources;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Structured outcome of a command: which entities changed, plus messages
/// for the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct CmdResult {
    pub affected_modules: Vec<Module>,
    pub affected_resources: Vec<Resource>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_module(mut self, module: Module) -> Self {
        self.affected_modules.push(module);
        self
    }

    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.affected_resources.push(resource);
        self
    }
}
