//! Reusable location templates.
//!
//! # Invariants
//! - A template's name is its world type; renaming changes both.
//! - Key order is preserved and applied to locations as attribute order.

use crate::model::world::{CustomAttribute, Location};

/// Name of the built-in preset that is always present and cannot be removed.
pub const BLANK_TEMPLATE_NAME: &str = "Blank";

/// Location type plus the attribute keys new locations of that type get.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldTemplate {
    pub world_type: String,
    pub keys: Vec<String>,
}

impl WorldTemplate {
    pub fn new(world_type: impl Into<String>, keys: Vec<String>) -> Self {
        Self {
            world_type: world_type.into(),
            keys,
        }
    }

    /// The built-in blank preset.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Display name; the blank preset has no world type of its own.
    pub fn name(&self) -> &str {
        if self.world_type.is_empty() {
            BLANK_TEMPLATE_NAME
        } else {
            &self.world_type
        }
    }

    pub fn is_blank(&self) -> bool {
        self.world_type.is_empty()
    }

    /// Captures a location's type and attribute keys.
    ///
    /// Returns `None` when the location has no type.
    pub fn capture(location: &Location) -> Option<Self> {
        let world_type = location.kind.trim();
        if world_type.is_empty() {
            return None;
        }
        Some(Self {
            world_type: world_type.to_string(),
            keys: location.attributes.iter().map(|a| a.key.clone()).collect(),
        })
    }

    /// Stamps this template onto a location.
    ///
    /// Type and name become the world type; attributes are replaced by the
    /// template keys with empty values.
    pub fn apply(&self, location: &mut Location) {
        location.kind = self.world_type.clone();
        if !self.world_type.is_empty() {
            location.name = self.world_type.clone();
        }
        location.attributes = self
            .keys
            .iter()
            .map(|key| CustomAttribute::new(key.clone(), String::new()))
            .collect();
    }
}
