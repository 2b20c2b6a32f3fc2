//! Drag-and-drop commands. These wrap the ordering engine with the target
//! checks the engine itself does not make: a move may never leave a resource
//! pointing at a module that is not present.

use uuid::Uuid;

use crate::commands::CmdResult;
use crate::error::{CourseError, Result};
use crate::ordering::{self, CourseState};

/// Reorders the module sequence. Out-of-range indices and `drag == hover`
/// are absorbed by the engine as no-ops.
pub fn move_module(state: &mut CourseState, drag_index: usize, hover_index: usize) -> Result<CmdResult> {
    ordering::move_module(state, drag_index, hover_index);

    let mut result = CmdResult::default();
    if let Some(moved) = state.modules_in_order().get(hover_index) {
        result.affected_modules.push((*moved).clone());
    }
    Ok(result)
}

/// Moves a resource within or across scopes. A named target scope must
/// exist; a stale `before_id` or unknown `drag_id` is absorbed by the engine
/// per its local-recovery policy.
pub fn move_resource(
    state: &mut CourseState,
    drag_id: Uuid,
    before_id: Option<Uuid>,
    target: Option<Uuid>,
) -> Result<CmdResult> {
    if let Some(module_id) = target {
        if state.module(module_id).is_none() {
            return Err(CourseError::ModuleNotFound(module_id));
        }
    }
    ordering::move_resource(state, drag_id, before_id, target);

    let mut result = CmdResult::default();
    if let Some(moved) = state.resource(drag_id) {
        result.affected_resources.push(moved.clone());
    }
    Ok(result)
}
