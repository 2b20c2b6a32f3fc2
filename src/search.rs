//! # Search/Filter Projector
//!
//! Derives a read-only, annotated view of the outline from the canonical
//! state and a raw query string. The projection never mutates state and is
//! recomputed per keystroke by the search collaborator.
//!
//! Matching is a case-insensitive substring test (no diacritic folding).
//! Substring offsets come from [`str::match_indices`] over lowercased text,
//! so metacharacters in the query are inert; there is no pattern language.
//!
//! The filter rules are asymmetric on purpose, mirroring the product
//! behavior they were lifted from:
//!
//! - A module whose **name** matches is force-expanded with a highlighted
//!   heading, and none of its resources carry a highlight (the name match
//!   takes precedence).
//! - A module where only **resources** match is force-expanded, keeps all of
//!   its resources for context, and highlights only the matches.
//! - A module with no match anywhere is excluded from the view entirely.
//! - The unassigned pool keeps only matching resources; non-matches are
//!   dropped, not retained.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Module, Resource};
use crate::ordering::CourseState;

/// A run of text in a projected string, either plain or part of a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchSegment {
    Plain(String),
    Match(String),
}

/// A resource annotated for rendering under an active query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    pub resource: Resource,
    pub highlighted: bool,
    /// Title split into plain/match runs.
    pub title: Vec<MatchSegment>,
    /// Second card line (url or file name + size) split into runs.
    pub subtitle: Vec<MatchSegment>,
}

/// A visible module with its annotated resources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleView {
    pub module: Module,
    /// The active query forces the card open regardless of its collapsed
    /// state in the rendering layer.
    pub force_expanded: bool,
    pub heading_highlighted: bool,
    pub heading: Vec<MatchSegment>,
    pub resources: Vec<ResourceView>,
}

/// The derived view consumed by rendering collaborators. Modules excluded by
/// the query are absent, not flagged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseView {
    pub modules: Vec<ModuleView>,
    pub unassigned: Vec<ResourceView>,
}

/// Projects the canonical state through a query. A blank query yields the
/// whole outline, unexpanded and unhighlighted.
pub fn project(state: &CourseState, query: &str) -> CourseView {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return CourseView {
            modules: state
                .modules_in_order()
                .into_iter()
                .map(|module| ModuleView {
                    module: module.clone(),
                    force_expanded: false,
                    heading_highlighted: false,
                    heading: plain(&module.name),
                    resources: state
                        .scope_resources(Some(module.id))
                        .into_iter()
                        .map(unhighlighted)
                        .collect(),
                })
                .collect(),
            unassigned: state
                .scope_resources(None)
                .into_iter()
                .map(unhighlighted)
                .collect(),
        };
    }

    let mut modules = Vec::new();
    for module in state.modules_in_order() {
        let members = state.scope_resources(Some(module.id));
        let name_match = module.name.to_lowercase().contains(&term);
        let matching: HashSet<Uuid> = members
            .iter()
            .filter(|r| r.matches(&term))
            .map(|r| r.id)
            .collect();

        if name_match {
            // Name match wins: heading highlighted, resources deliberately not.
            modules.push(ModuleView {
                module: module.clone(),
                force_expanded: true,
                heading_highlighted: true,
                heading: highlight(&module.name, &term),
                resources: members.into_iter().map(unhighlighted).collect(),
            });
        } else if !matching.is_empty() {
            // Keep every member for context; only matches carry the flag.
            modules.push(ModuleView {
                module: module.clone(),
                force_expanded: true,
                heading_highlighted: false,
                heading: plain(&module.name),
                resources: members
                    .into_iter()
                    .map(|r| {
                        if matching.contains(&r.id) {
                            highlighted_title_only(r, &term)
                        } else {
                            unhighlighted(r)
                        }
                    })
                    .collect(),
            });
        }
    }

    let unassigned = state
        .scope_resources(None)
        .into_iter()
        .filter(|r| r.matches(&term))
        .map(|r| ResourceView {
            resource: r.clone(),
            highlighted: true,
            title: highlight(&r.title, &term),
            subtitle: highlight(&r.subtitle(), &term),
        })
        .collect();

    CourseView {
        modules,
        unassigned,
    }
}

fn plain(text: &str) -> Vec<MatchSegment> {
    if text.is_empty() {
        Vec::new()
    } else {
        vec![MatchSegment::Plain(text.to_string())]
    }
}

fn unhighlighted(resource: &Resource) -> ResourceView {
    ResourceView {
        resource: resource.clone(),
        highlighted: false,
        title: plain(&resource.title),
        subtitle: plain(&resource.subtitle()),
    }
}

/// Resources inside a module card only highlight their title; the subtitle
/// stays plain even when the url or file name produced the match.
fn highlighted_title_only(resource: &Resource, term_lower: &str) -> ResourceView {
    ResourceView {
        resource: resource.clone(),
        highlighted: true,
        title: highlight(&resource.title, term_lower),
        subtitle: plain(&resource.subtitle()),
    }
}

/// Splits `text` into plain/match runs around every case-insensitive
/// occurrence of `term_lower` (which must already be lowercased).
///
/// Lowercasing can change a character's byte length (Kelvin sign, dotted
/// capital I), so offsets found in the lowered string cannot be used to
/// slice the original directly. Each lowered byte is mapped back to the
/// original character it came from, and match runs are widened to whole
/// characters of the original.
pub fn highlight(text: &str, term_lower: &str) -> Vec<MatchSegment> {
    if term_lower.is_empty() {
        return plain(text);
    }

    // origin[i] = byte offset in `text` of the character that produced
    // lowered byte i.
    let mut lowered = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (text_idx, ch) in text.char_indices() {
        for low_ch in ch.to_lowercase() {
            lowered.push(low_ch);
        }
        while origin.len() < lowered.len() {
            origin.push(text_idx);
        }
    }

    let mut segments = Vec::new();
    let mut last_end = 0;
    for (start, _) in lowered.match_indices(term_lower) {
        let match_start = origin[start];
        // Cover the whole character owning the match's final lowered byte.
        let last_owner = origin[start + term_lower.len() - 1];
        let match_end = last_owner
            + text[last_owner..]
                .chars()
                .next()
                .map_or(0, |ch| ch.len_utf8());
        if match_start < last_end {
            // Widening to character boundaries can make adjacent runs
            // overlap; the earlier run already covers this one.
            continue;
        }
        if match_start > last_end {
            segments.push(MatchSegment::Plain(text[last_end..match_start].to_string()));
        }
        segments.push(MatchSegment::Match(text[match_start..match_end].to_string()));
        last_end = match_end;
    }
    if last_end < text.len() {
        segments.push(MatchSegment::Plain(text[last_end..].to_string()));
    }
    segments
}
