//! # Domain Model: Modules, Resources, and Scoped Ordering
//!
//! A course outline is two flat collections: [`Module`]s (named, ordered
//! containers) and [`Resource`]s (links or files). A module never owns a list
//! of its resources; membership is a weak foreign key (`Resource::module_id`)
//! and grouping is recomputed by scanning, which keeps the ownership graph
//! acyclic and makes every mutation a local edit on one of the two vectors.
//!
//! ## Ordering is scoped
//!
//! `Resource::order` is only meaningful among resources sharing the same
//! `module_id` value (the resource's *scope*; `None` is the unassigned pool).
//! Comparing orders across scopes is a bug. Within each scope, and across the
//! module list, orders are kept as a dense `0..len` permutation by the
//! [`crate::ordering`] engine after every mutation.
//!
//! ## Validation
//!
//! Constructors validate required fields (non-blank after trimming) and
//! assign a fresh v4 UUID. Ids are never reused within a session; `order` is
//! a placeholder until the engine places the entity in its scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CourseError, Result};

/// An ordered, named container for resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    pub id: Uuid,
    pub name: String,
    /// Position among all modules; dense 0-based after every mutation.
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Module {
    /// Creates a module with a fresh id. The name must be non-blank.
    /// `order` starts at 0; the caller appends it via the ordering engine.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CourseError::Validation { field: "name" });
        }
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            name,
            order: 0,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Type-specific payload of a resource. Closed set: every resource is either
/// an external link or an uploaded file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ResourcePayload {
    Link {
        url: String,
    },
    File {
        file_name: String,
        /// Size in bytes.
        file_size: u64,
        /// MIME-like type string, e.g. `application/pdf`.
        file_type: String,
    },
}

impl ResourcePayload {
    pub fn kind(&self) -> &'static str {
        match self {
            ResourcePayload::Link { .. } => "link",
            ResourcePayload::File { .. } => "file",
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            ResourcePayload::Link { url } => {
                if url.trim().is_empty() {
                    return Err(CourseError::Validation { field: "url" });
                }
            }
            ResourcePayload::File { file_name, .. } => {
                if file_name.trim().is_empty() {
                    return Err(CourseError::Validation { field: "file name" });
                }
            }
        }
        Ok(())
    }
}

/// A link or file entry. Belongs to at most one module, or to the unassigned
/// pool (`module_id == None`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: Uuid,
    pub title: String,
    #[serde(flatten)]
    pub payload: ResourcePayload,
    /// Weak reference to the owning module; `None` = unassigned pool.
    pub module_id: Option<Uuid>,
    /// Position within the resource's scope; dense 0-based per scope.
    pub order: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Resource {
    /// Creates a resource with a fresh id. Title and the payload's required
    /// field must be non-blank. `order` is assigned when the resource is
    /// appended to its scope.
    pub fn new(
        title: impl Into<String>,
        payload: ResourcePayload,
        module_id: Option<Uuid>,
    ) -> Result<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CourseError::Validation { field: "title" });
        }
        payload.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            title,
            payload,
            module_id,
            order: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn new_link(
        title: impl Into<String>,
        url: impl Into<String>,
        module_id: Option<Uuid>,
    ) -> Result<Self> {
        Self::new(title, ResourcePayload::Link { url: url.into() }, module_id)
    }

    pub fn new_file(
        title: impl Into<String>,
        file_name: impl Into<String>,
        file_size: u64,
        file_type: impl Into<String>,
        module_id: Option<Uuid>,
    ) -> Result<Self> {
        Self::new(
            title,
            ResourcePayload::File {
                file_name: file_name.into(),
                file_size,
                file_type: file_type.into(),
            },
            module_id,
        )
    }

    /// The rendered second line of a resource card: a link shows its url,
    /// a file shows its name with the size rounded to the nearest KB.
    pub fn subtitle(&self) -> String {
        match &self.payload {
            ResourcePayload::Link { url } => url.clone(),
            ResourcePayload::File {
                file_name,
                file_size,
                ..
            } => {
                let kb = (*file_size as f64 / 1024.0).round() as u64;
                format!("{} ({} KB)", file_name, kb)
            }
        }
    }

    /// The searchable text besides the title: url for links, file name for
    /// files. File type and size are not searched.
    pub fn search_text(&self) -> &str {
        match &self.payload {
            ResourcePayload::Link { url } => url,
            ResourcePayload::File { file_name, .. } => file_name,
        }
    }

    /// Case-insensitive substring match against title, url, or file name.
    /// `term_lower` must already be lowercased.
    pub fn matches(&self, term_lower: &str) -> bool {
        self.title.to_lowercase().contains(term_lower)
            || self.search_text().to_lowercase().contains(term_lower)
    }
}
