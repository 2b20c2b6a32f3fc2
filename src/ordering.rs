//! # Ordering Engine: Placement Under a Shared Order Space
//!
//! This module owns [`CourseState`] (the canonical snapshot) and the
//! transformations that move entities around without ever breaking the order
//! invariants:
//!
//! 1. Module orders are a contiguous permutation of `0..N`.
//! 2. Within every scope (the unassigned pool, and each module), resource
//!    orders are a contiguous permutation of `0..M`.
//! 3. No resource references a module that is not present (module deletion
//!    cascades).
//!
//! ## One flat list, many orderings
//!
//! All resources live in a single `Vec`, and `order` is scoped implicitly by
//! `module_id`. The engine exploits this: before a move it stably sorts the
//! flat list by `order`, which lines up every scope's members in sequence
//! while interleaving scopes freely. Splicing the dragged resource into that
//! list and renumbering with one per-scope counter then yields dense orders
//! for every scope in a single pass. Renumbering universally is deliberate;
//! it also heals the scope the resource left, whose member count shrank.
//!
//! ## Placement rules for [`move_resource`]
//!
//! - `before_id` resolving **inside** the target scope: insert immediately
//!   before it.
//! - `before_id` absent or stale (moved away, deleted, or in another scope):
//!   append after the target scope's last element. Falling back instead of
//!   failing keeps the engine robust to drag events raced against stale
//!   renders.
//! - `drag_id == before_id`: no-op, so a self-drop can never lose the
//!   resource.
//! - Unknown `drag_id`: no-op, state returned unchanged.
//!
//! Every transformation is atomic: callers never observe a partially
//! renumbered state, and a rejected call leaves the snapshot untouched.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Module, Resource};

/// The canonical in-memory snapshot of a course outline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseState {
    pub modules: Vec<Module>,
    pub resources: Vec<Resource>,
}

impl CourseState {
    pub fn module(&self, id: Uuid) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn resource(&self, id: Uuid) -> Option<&Resource> {
        self.resources.iter().find(|r| r.id == id)
    }

    /// Modules in display sequence.
    pub fn modules_in_order(&self) -> Vec<&Module> {
        let mut modules: Vec<&Module> = self.modules.iter().collect();
        modules.sort_by_key(|m| m.order);
        modules
    }

    /// Members of one scope in display sequence. Membership is derived by
    /// scanning; modules hold no back-collection.
    pub fn scope_resources(&self, scope: Option<Uuid>) -> Vec<&Resource> {
        let mut resources: Vec<&Resource> = self
            .resources
            .iter()
            .filter(|r| r.module_id == scope)
            .collect();
        resources.sort_by_key(|r| r.order);
        resources
    }

    /// The order an appended resource receives: one past the scope's current
    /// maximum, or 0 for an empty scope.
    pub fn next_order_in_scope(&self, scope: Option<Uuid>) -> usize {
        self.resources
            .iter()
            .filter(|r| r.module_id == scope)
            .map(|r| r.order)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Checks the order and reference invariants, returning a description of
    /// the first violation. The engine is expected to make violations
    /// unreachable; tests assert this over operation sequences.
    pub fn verify(&self) -> std::result::Result<(), String> {
        let mut module_orders: Vec<usize> = self.modules.iter().map(|m| m.order).collect();
        module_orders.sort_unstable();
        for (expected, order) in module_orders.iter().enumerate() {
            if *order != expected {
                return Err(format!(
                    "module orders are not dense: expected {}, found {}",
                    expected, order
                ));
            }
        }

        let module_ids: HashSet<Uuid> = self.modules.iter().map(|m| m.id).collect();
        let mut scope_orders: HashMap<Option<Uuid>, Vec<usize>> = HashMap::new();
        for resource in &self.resources {
            if let Some(module_id) = resource.module_id {
                if !module_ids.contains(&module_id) {
                    return Err(format!(
                        "resource {} references missing module {}",
                        resource.id, module_id
                    ));
                }
            }
            scope_orders
                .entry(resource.module_id)
                .or_default()
                .push(resource.order);
        }
        for (scope, mut orders) in scope_orders {
            orders.sort_unstable();
            for (expected, order) in orders.iter().enumerate() {
                if *order != expected {
                    return Err(format!(
                        "scope {:?} orders are not dense: expected {}, found {}",
                        scope, expected, order
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Reorders the module sequence: removes the module at `drag_index`,
/// reinserts it at `hover_index`, and renumbers densely. Out-of-range
/// indices and `drag_index == hover_index` are no-ops.
pub fn move_module(state: &mut CourseState, drag_index: usize, hover_index: usize) {
    let len = state.modules.len();
    if drag_index == hover_index || drag_index >= len || hover_index >= len {
        return;
    }
    state.modules.sort_by_key(|m| m.order);
    let dragged = state.modules.remove(drag_index);
    state.modules.insert(hover_index, dragged);
    for (position, module) in state.modules.iter_mut().enumerate() {
        module.order = position;
    }
}

/// Moves a resource to `target` scope, landing immediately before
/// `before_id` when it resolves within that scope, else appended at the end.
/// See the module docs for the full placement rules.
pub fn move_resource(
    state: &mut CourseState,
    drag_id: Uuid,
    before_id: Option<Uuid>,
    target: Option<Uuid>,
) {
    if before_id == Some(drag_id) || !state.resources.iter().any(|r| r.id == drag_id) {
        return;
    }
    // Line every scope up in display sequence before splicing.
    state.resources.sort_by_key(|r| r.order);

    let Some(position) = state.resources.iter().position(|r| r.id == drag_id) else {
        return;
    };
    let mut dragged = state.resources.remove(position);
    let reparented = dragged.module_id != target;
    dragged.module_id = target;
    if reparented {
        dragged.updated_at = Utc::now();
    }

    let insert_at = before_id
        .and_then(|bid| {
            state
                .resources
                .iter()
                .position(|r| r.id == bid && r.module_id == target)
        })
        .unwrap_or_else(|| {
            // Stale or absent anchor: append after the scope's last element.
            state
                .resources
                .iter()
                .rposition(|r| r.module_id == target)
                .map_or(state.resources.len(), |last| last + 1)
        });
    state.resources.insert(insert_at, dragged);

    renumber_scopes(state);
}

/// Removes a module and every resource it owns, then renumbers the module
/// sequence. Scopes of surviving modules and the unassigned pool are
/// untouched; the deleted scope simply disappears.
pub fn remove_module_cascade(state: &mut CourseState, module_id: Uuid) {
    state.modules.retain(|m| m.id != module_id);
    state.resources.retain(|r| r.module_id != Some(module_id));
    state.modules.sort_by_key(|m| m.order);
    for (position, module) in state.modules.iter_mut().enumerate() {
        module.order = position;
    }
}

/// Removes a single resource and renumbers so its scope stays dense.
/// Returns whether the resource existed.
pub fn remove_resource(state: &mut CourseState, resource_id: Uuid) -> bool {
    let len_before = state.resources.len();
    state.resources.retain(|r| r.id != resource_id);
    if state.resources.len() == len_before {
        return false;
    }
    state.resources.sort_by_key(|r| r.order);
    renumber_scopes(state);
    true
}

/// Appends a freshly constructed module to the end of the module sequence.
pub fn append_module(state: &mut CourseState, mut module: Module) {
    module.order = state.modules.len();
    state.modules.push(module);
}

/// Appends a freshly constructed resource to the end of its scope.
pub fn append_resource(state: &mut CourseState, mut resource: Resource) {
    resource.order = state.next_order_in_scope(resource.module_id);
    state.resources.push(resource);
}

/// Reassigns dense per-scope orders from the flat list's relative sequence.
/// Requires the flat list to be in per-scope display sequence.
fn renumber_scopes(state: &mut CourseState) {
    let mut counters: HashMap<Option<Uuid>, usize> = HashMap::new();
    for resource in &mut state.resources {
        let counter = counters.entry(resource.module_id).or_insert(0);
        resource.order = *counter;
        *counter += 1;
    }
}
