//! Story outline model: storyline → event → scene.
//!
//! # Invariants
//! - Cast and item lists on a storyline or event are defaults copied by value
//!   into children at creation time. Later edits to the parent never reach
//!   children that already exist.
//! - Node ids survive moves between parents.

use crate::model::{name_or, new_node_id, NodeId};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Smallest outline unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene {
    pub id: NodeId,
    pub name: String,
    pub time: String,
    pub location: String,
    pub cast: Vec<String>,
    pub items: Vec<String>,
    pub actions: Vec<String>,
    pub memo: String,
}

impl Scene {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_node_id(), name)
    }

    pub fn with_id(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            time: String::new(),
            location: String::new(),
            cast: Vec::new(),
            items: Vec::new(),
            actions: Vec::new(),
            memo: String::new(),
        }
    }
}

/// Ordered sequence of scenes under one storyline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: NodeId,
    pub name: String,
    pub memo: String,
    pub cast: Vec<String>,
    pub items: Vec<String>,
    pub scenes: Vec<Scene>,
}

impl Event {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_node_id(), name)
    }

    pub fn with_id(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            memo: String::new(),
            cast: Vec::new(),
            items: Vec::new(),
            scenes: Vec::new(),
        }
    }
}

/// Top-level plot thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Storyline {
    pub id: NodeId,
    pub name: String,
    /// Free-text type or beat label, e.g. "Opening".
    pub beat: String,
    pub memo: String,
    pub cast: Vec<String>,
    pub items: Vec<String>,
    pub events: Vec<Event>,
}

impl Storyline {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(new_node_id(), name)
    }

    pub fn with_id(id: NodeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            beat: String::new(),
            memo: String::new(),
            cast: Vec::new(),
            items: Vec::new(),
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutlineError {
    StorylineNotFound(NodeId),
    EventNotFound(NodeId),
    SceneNotFound(NodeId),
}

impl Display for OutlineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorylineNotFound(id) => write!(f, "storyline not found: {id}"),
            Self::EventNotFound(id) => write!(f, "event not found: {id}"),
            Self::SceneNotFound(id) => write!(f, "scene not found: {id}"),
        }
    }
}

impl Error for OutlineError {}

/// Ordered storylines of the project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineTree {
    pub storylines: Vec<Storyline>,
}

impl OutlineTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.storylines.is_empty()
    }

    pub fn storyline(&self, id: NodeId) -> Option<&Storyline> {
        self.storylines.iter().find(|line| line.id == id)
    }

    pub fn storyline_mut(&mut self, id: NodeId) -> Option<&mut Storyline> {
        self.storylines.iter_mut().find(|line| line.id == id)
    }

    pub fn event(&self, id: NodeId) -> Option<&Event> {
        self.storylines
            .iter()
            .flat_map(|line| line.events.iter())
            .find(|event| event.id == id)
    }

    pub fn event_mut(&mut self, id: NodeId) -> Option<&mut Event> {
        self.storylines
            .iter_mut()
            .flat_map(|line| line.events.iter_mut())
            .find(|event| event.id == id)
    }

    pub fn scene(&self, id: NodeId) -> Option<&Scene> {
        self.storylines
            .iter()
            .flat_map(|line| line.events.iter())
            .flat_map(|event| event.scenes.iter())
            .find(|scene| scene.id == id)
    }

    /// Appends a storyline. Blank names become `Storyline N`.
    pub fn add_storyline(&mut self, name: &str) -> NodeId {
        let next = self.storylines.len() + 1;
        let line = Storyline::new(name_or(name, || format!("Storyline {next}")));
        let id = line.id;
        self.storylines.push(line);
        id
    }

    /// Appends an event that starts with a copy of the storyline's cast and
    /// items. Blank names become `Event N`.
    pub fn add_event(&mut self, storyline_id: NodeId, name: &str) -> Result<NodeId, OutlineError> {
        let line = self
            .storyline_mut(storyline_id)
            .ok_or(OutlineError::StorylineNotFound(storyline_id))?;
        let next = line.events.len() + 1;
        let mut event = Event::new(name_or(name, || format!("Event {next}")));
        event.cast = line.cast.clone();
        event.items = line.items.clone();
        let id = event.id;
        line.events.push(event);
        Ok(id)
    }

    /// Appends a scene that starts with a copy of the event's cast and items.
    /// Blank names become `Scene N`.
    pub fn add_scene(&mut self, event_id: NodeId, name: &str) -> Result<NodeId, OutlineError> {
        let event = self
            .event_mut(event_id)
            .ok_or(OutlineError::EventNotFound(event_id))?;
        let next = event.scenes.len() + 1;
        let mut scene = Scene::new(name_or(name, || format!("Scene {next}")));
        scene.cast = event.cast.clone();
        scene.items = event.items.clone();
        let id = scene.id;
        event.scenes.push(scene);
        Ok(id)
    }

    pub fn remove_storyline(&mut self, id: NodeId) -> Result<Storyline, OutlineError> {
        let index = self
            .storylines
            .iter()
            .position(|line| line.id == id)
            .ok_or(OutlineError::StorylineNotFound(id))?;
        Ok(self.storylines.remove(index))
    }

    pub fn remove_event(&mut self, id: NodeId) -> Result<Event, OutlineError> {
        let (si, ei) = self
            .locate_event(id)
            .ok_or(OutlineError::EventNotFound(id))?;
        Ok(self.storylines[si].events.remove(ei))
    }

    pub fn remove_scene(&mut self, id: NodeId) -> Result<Scene, OutlineError> {
        let (si, ei, ci) = self
            .locate_scene(id)
            .ok_or(OutlineError::SceneNotFound(id))?;
        Ok(self.storylines[si].events[ei].scenes.remove(ci))
    }

    /// Moves an event to the end of another storyline. A move onto its own
    /// storyline is a no-op.
    pub fn move_event(
        &mut self,
        event_id: NodeId,
        to_storyline: NodeId,
    ) -> Result<(), OutlineError> {
        let (from_si, ei) = self
            .locate_event(event_id)
            .ok_or(OutlineError::EventNotFound(event_id))?;
        let to_si = self
            .storylines
            .iter()
            .position(|line| line.id == to_storyline)
            .ok_or(OutlineError::StorylineNotFound(to_storyline))?;
        if from_si == to_si {
            return Ok(());
        }
        let moving = self.storylines[from_si].events.remove(ei);
        self.storylines[to_si].events.push(moving);
        Ok(())
    }

    /// Moves a scene to the end of another event. A move onto its own event
    /// is a no-op.
    pub fn move_scene(&mut self, scene_id: NodeId, to_event: NodeId) -> Result<(), OutlineError> {
        let (from_si, from_ei, ci) = self
            .locate_scene(scene_id)
            .ok_or(OutlineError::SceneNotFound(scene_id))?;
        let (to_si, to_ei) = self
            .locate_event(to_event)
            .ok_or(OutlineError::EventNotFound(to_event))?;
        if (from_si, from_ei) == (to_si, to_ei) {
            return Ok(());
        }
        let moving = self.storylines[from_si].events[from_ei].scenes.remove(ci);
        self.storylines[to_si].events[to_ei].scenes.push(moving);
        Ok(())
    }

    fn locate_event(&self, id: NodeId) -> Option<(usize, usize)> {
        self.storylines.iter().enumerate().find_map(|(si, line)| {
            line.events
                .iter()
                .position(|event| event.id == id)
                .map(|ei| (si, ei))
        })
    }

    fn locate_scene(&self, id: NodeId) -> Option<(usize, usize, usize)> {
        for (si, line) in self.storylines.iter().enumerate() {
            for (ei, event) in line.events.iter().enumerate() {
                if let Some(ci) = event.scenes.iter().position(|scene| scene.id == id) {
                    return Some((si, ei, ci));
                }
            }
        }
        None
    }
}
