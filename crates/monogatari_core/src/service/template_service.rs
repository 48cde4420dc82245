//! World template library use cases.
//!
//! # Responsibility
//! - Keep the ordered preset list with the built-in blank preset first.
//! - Load and persist the library file through a [`ProjectStore`].
//!
//! # Invariants
//! - The blank preset is always present at index 0 and cannot be removed or
//!   renamed.
//! - Template names are unique; upsert replaces in place.

use crate::codec::template::{decode_library, encode_library};
use crate::model::template::{WorldTemplate, BLANK_TEMPLATE_NAME};
use crate::model::world::{WorldTree, WorldTreeError};
use crate::model::NodeId;
use crate::store::{ProjectStore, StoreError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Default library file name inside the data directory.
pub const TEMPLATE_FILE_NAME: &str = "WorldTemplate.xml";

#[derive(Debug)]
pub enum TemplateError {
    /// Name or world type is blank after trim.
    InvalidName,
    /// The blank preset cannot be changed.
    BuiltIn,
    NotFound(String),
    /// Rename target is already taken.
    NameTaken(String),
    /// Location has no type to capture.
    UntypedLocation(NodeId),
    World(WorldTreeError),
    Store(StoreError),
}

impl Display for TemplateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName => write!(f, "template name must not be blank"),
            Self::BuiltIn => write!(f, "the blank template cannot be changed"),
            Self::NotFound(name) => write!(f, "template not found: {name}"),
            Self::NameTaken(name) => write!(f, "template name already in use: {name}"),
            Self::UntypedLocation(id) => write!(f, "location has no type: {id}"),
            Self::World(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TemplateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::World(err) => Some(err),
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<WorldTreeError> for TemplateError {
    fn from(value: WorldTreeError) -> Self {
        Self::World(value)
    }
}

impl From<StoreError> for TemplateError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Ordered preset list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLibrary {
    templates: Vec<WorldTemplate>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self {
            templates: vec![WorldTemplate::blank()],
        }
    }
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Library from parsed templates; blank entries and later duplicates are
    /// dropped and the blank preset is put first.
    pub fn from_templates(templates: impl IntoIterator<Item = WorldTemplate>) -> Self {
        let mut library = Self::default();
        for template in templates {
            if template.is_blank() || library.get(&template.world_type).is_some() {
                continue;
            }
            library.templates.push(template);
        }
        library
    }

    pub fn templates(&self) -> &[WorldTemplate] {
        &self.templates
    }

    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&WorldTemplate> {
        self.templates.iter().find(|t| t.name() == name)
    }

    /// Inserts or replaces a template by name. Returns `true` when replaced.
    pub fn upsert(&mut self, template: WorldTemplate) -> Result<bool, TemplateError> {
        let world_type = template.world_type.trim();
        if world_type.is_empty() {
            return Err(TemplateError::InvalidName);
        }
        if world_type == BLANK_TEMPLATE_NAME {
            return Err(TemplateError::BuiltIn);
        }
        let template = WorldTemplate::new(world_type, template.keys);
        match self.position(&template.world_type) {
            Some(index) => {
                self.templates[index] = template;
                Ok(true)
            }
            None => {
                self.templates.push(template);
                Ok(false)
            }
        }
    }

    /// Renames a template; its world type follows the name.
    pub fn rename(&mut self, name: &str, new_name: &str) -> Result<(), TemplateError> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(TemplateError::InvalidName);
        }
        if name == BLANK_TEMPLATE_NAME {
            return Err(TemplateError::BuiltIn);
        }
        let index = self
            .position(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        if new_name != name && self.get(new_name).is_some() {
            return Err(TemplateError::NameTaken(new_name.to_string()));
        }
        self.templates[index].world_type = new_name.to_string();
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<WorldTemplate, TemplateError> {
        if name == BLANK_TEMPLATE_NAME {
            return Err(TemplateError::BuiltIn);
        }
        let index = self
            .position(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        Ok(self.templates.remove(index))
    }

    /// Applies the named template to a location.
    pub fn apply_to(
        &self,
        name: &str,
        world: &mut WorldTree,
        location: NodeId,
    ) -> Result<(), TemplateError> {
        let template = self
            .get(name)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))?;
        world.apply_template(location, template)?;
        Ok(())
    }

    /// Captures a location's type and keys as a template (upsert).
    ///
    /// Returns the captured template name.
    pub fn capture_from(
        &mut self,
        world: &WorldTree,
        location: NodeId,
    ) -> Result<String, TemplateError> {
        let node = world
            .get(location)
            .ok_or(WorldTreeError::NodeNotFound(location))?;
        let template =
            WorldTemplate::capture(node).ok_or(TemplateError::UntypedLocation(location))?;
        let name = template.world_type.clone();
        self.upsert(template)?;
        Ok(name)
    }

    /// Loads the library file. A missing file yields the default library.
    pub fn load<St: ProjectStore + ?Sized>(store: &St, path: &Path) -> Result<Self, TemplateError> {
        let text = match store.read_text(path) {
            Ok(text) => text,
            Err(StoreError::NotFound(_)) => return Ok(Self::default()),
            Err(err) => return Err(err.into()),
        };
        let library = Self::from_templates(decode_library(&text));
        info!(
            "event=template_load module=service status=ok count={}",
            library.templates.len()
        );
        Ok(library)
    }

    pub fn save<St: ProjectStore + ?Sized>(
        &self,
        store: &St,
        path: &Path,
    ) -> Result<(), TemplateError> {
        store.write_text(path, &encode_library(&self.templates))?;
        info!(
            "event=template_save module=service status=ok count={}",
            self.templates.len()
        );
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.templates.iter().position(|t| t.name() == name)
    }
}
