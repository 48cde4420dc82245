//! Document model for the five project sub-models.
//!
//! # Responsibility
//! - Define the in-memory shapes edited by the shell and consumed by codecs.
//! - Own structural edit operations and their invariants.
//!
//! # Invariants
//! - Every addressable node carries a stable `NodeId` that is never reused.
//! - Child order is author-chosen and part of document identity.
//! - Models are plain values; the host owns the document.

pub mod book;
pub mod chapter;
pub mod character;
pub mod outline;
pub mod template;
pub mod world;

use uuid::Uuid;

/// Stable identifier for chapters, segments, outline nodes, locations and
/// characters.
pub type NodeId = Uuid;

/// Generates a fresh node identifier.
pub fn new_node_id() -> NodeId {
    Uuid::new_v4()
}

/// Moves the element at `from` to position `to` within `items`.
///
/// Returns `false` without touching the slice when either index is out of
/// bounds.
pub(crate) fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let moving = items.remove(from);
    items.insert(to, moving);
    true
}

/// Returns `fallback` when `name` is blank after trim, the trimmed name
/// otherwise.
pub(crate) fn name_or(name: &str, fallback: impl FnOnce() -> String) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        fallback()
    } else {
        trimmed.to_string()
    }
}
