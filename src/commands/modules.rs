use chrono::Utc;
use uuid::Uuid;

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CourseError, Result};
use crate::model::Module;
use crate::ordering::{self, CourseState};

/// Creates a module and appends it to the end of the module sequence.
pub fn create(state: &mut CourseState, name: impl Into<String>) -> Result<CmdResult> {
    let module = Module::new(name)?;
    ordering::append_module(state, module.clone());

    // append_module assigned the final order; report the stored record.
    let stored = state.module(module.id).cloned().unwrap_or(module);
    let mut result = CmdResult::default().with_module(stored.clone());
    result.add_message(CmdMessage::success(format!("Module created: {}", stored.name)));
    Ok(result)
}

/// Renames a module in place. Order and membership are untouched.
pub fn rename(state: &mut CourseState, module_id: Uuid, name: impl Into<String>) -> Result<CmdResult> {
    let name = name.into();
    if name.trim().is_empty() {
        return Err(CourseError::Validation { field: "name" });
    }
    let module = state
        .modules
        .iter_mut()
        .find(|m| m.id == module_id)
        .ok_or(CourseError::ModuleNotFound(module_id))?;
    module.name = name;
    module.updated_at = Utc::now();

    let renamed = module.clone();
    let mut result = CmdResult::default().with_module(renamed.clone());
    result.add_message(CmdMessage::success(format!("Module renamed: {}", renamed.name)));
    Ok(result)
}

/// Deletes a module and cascades to every resource it owns.
pub fn delete(state: &mut CourseState, module_id: Uuid) -> Result<CmdResult> {
    let module = state
        .module(module_id)
        .ok_or(CourseError::ModuleNotFound(module_id))?
        .clone();
    let cascaded: Vec<_> = state
        .resources
        .iter()
        .filter(|r| r.module_id == Some(module_id))
        .cloned()
        .collect();

    ordering::remove_module_cascade(state, module_id);

    let mut result = CmdResult::default().with_module(module.clone());
    result.affected_resources = cascaded;
    result.add_message(CmdMessage::success(format!("Module deleted: {}", module.name)));
    if !result.affected_resources.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "{} resource(s) removed with it",
            result.affected_resources.len()
        )));
    }
    Ok(result)
}
