//! # coursebuilder
//!
//! The ordering and placement engine behind an interactive content-outline
//! editor: modules (ordered, named containers) and resources (links or
//! files) arranged into a hierarchy, moved around by drag-and-drop, and
//! searched with live highlighting.
//!
//! The crate is the non-visual core only. Rendering, dialogs, drag gesture
//! detection, and file transfer are external collaborators that talk to
//! [`api::CourseApi`]:
//!
//! ```text
//! UI events -> CourseApi (mutation) -> commands -> ordering engine
//!                                                      |
//!                              canonical CourseState <-+
//!                                                      |
//!                query -> search::project -> CourseView (render model)
//! ```
//!
//! Two invariants drive the design: module orders are always a dense
//! `0..N` permutation, and within every scope (a module's resources, or the
//! unassigned pool) resource orders are a dense `0..M` permutation. The
//! [`ordering`] engine re-establishes both after every mutation; the
//! [`search`] projector derives views without ever touching canonical state.

pub mod api;
pub mod commands;
pub mod error;
pub mod model;
pub mod ordering;
pub mod search;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use api::{CourseApi, DownloadTarget};
pub use error::{CourseError, Result};
pub use model::{Module, Resource, ResourcePayload};
pub use ordering::CourseState;
pub use search::{CourseView, MatchSegment, ModuleView, ResourceView};
