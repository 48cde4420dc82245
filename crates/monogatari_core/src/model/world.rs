//! World-setting tree stored as an arena.
//!
//! # Responsibility
//! - Hold locations with ordered custom attributes and nested children.
//! - Provide id-addressed insert, rename, move and delete without recursive
//!   ownership.
//!
//! # Invariants
//! - Exactly one synthetic root named [`SYNTHETIC_ROOT_NAME`] exists. It is a
//!   UI anchor only: it cannot be renamed away, moved or removed, and codecs
//!   never serialize it.
//! - Every live slot is reachable from the root; freed slots are recycled but
//!   node ids never are.
//! - Moves never create cycles.

use crate::model::template::WorldTemplate;
use crate::model::{new_node_id, NodeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Name of the in-memory anchor node.
pub const SYNTHETIC_ROOT_NAME: &str = "ALL";

/// One ordered key/value pair on a location.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomAttribute {
    pub key: String,
    pub value: String,
}

impl CustomAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Location node. Structural links are owned by the tree.
#[derive(Debug, Clone)]
pub struct Location {
    id: NodeId,
    pub name: String,
    /// Free-text type label, e.g. "City".
    pub kind: String,
    pub attributes: Vec<CustomAttribute>,
    pub memo: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Location {
    fn detached(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            kind: String::new(),
            attributes: Vec::new(),
            memo: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    fn same_content(&self, other: &Location) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.attributes == other.attributes
            && self.memo == other.memo
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldTreeError {
    NodeNotFound(NodeId),
    ParentNotFound(NodeId),
    /// The synthetic root cannot be renamed, moved, templated or removed.
    RootImmutable,
    DuplicateId(NodeId),
    InvalidName,
    CycleDetected { node: NodeId, parent: NodeId },
}

impl Display for WorldTreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodeNotFound(id) => write!(f, "location not found: {id}"),
            Self::ParentNotFound(id) => write!(f, "parent location not found: {id}"),
            Self::RootImmutable => write!(f, "the synthetic root cannot be edited"),
            Self::DuplicateId(id) => write!(f, "location id already in use: {id}"),
            Self::InvalidName => write!(f, "location name must not be blank"),
            Self::CycleDetected { node, parent } => {
                write!(f, "move would create cycle: node {node} under parent {parent}")
            }
        }
    }
}

impl Error for WorldTreeError {}

/// Arena-backed location tree with a synthetic root.
#[derive(Debug, Clone)]
pub struct WorldTree {
    slots: Vec<Option<Location>>,
    free: Vec<usize>,
    index: HashMap<NodeId, usize>,
    root: usize,
}

impl Default for WorldTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldTree {
    /// Creates a tree holding only a fresh synthetic root.
    pub fn new() -> Self {
        let root_id = new_node_id();
        let mut index = HashMap::new();
        index.insert(root_id, 0);
        Self {
            slots: vec![Some(Location::detached(
                root_id,
                SYNTHETIC_ROOT_NAME.to_string(),
            ))],
            free: Vec::new(),
            index,
            root: 0,
        }
    }

    pub fn root_id(&self) -> NodeId {
        self.slot(self.root).id
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.index.get(&id) == Some(&self.root)
    }

    /// Number of locations excluding the synthetic root.
    pub fn len(&self) -> usize {
        self.index.len() - 1
    }

    /// Whether only the synthetic root remains.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Location> {
        self.index.get(&id).map(|&slot| self.slot(slot))
    }

    /// Mutable access to node content. Structure stays owned by the tree.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Location> {
        let slot = *self.index.get(&id)?;
        self.slots[slot].as_mut()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let node = self.get(id)?;
        node.parent.map(|slot| self.slot(slot).id)
    }

    /// Child ids in author order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.get(id)
            .map(|node| node.children.iter().map(|&slot| self.slot(slot).id).collect())
            .unwrap_or_default()
    }

    /// Direct children of the synthetic root; the serialized top level.
    pub fn top_level(&self) -> Vec<NodeId> {
        self.children(self.root_id())
    }

    /// Pre-order walk of every location below the synthetic root.
    pub fn preorder(&self) -> Vec<(usize, NodeId)> {
        self.descendants(self.root_id())
    }

    /// Pre-order walk below `id` (excluded), paired with depth relative to it.
    pub fn descendants(&self, id: NodeId) -> Vec<(usize, NodeId)> {
        let mut out = Vec::new();
        let Some(&start) = self.index.get(&id) else {
            return out;
        };
        let mut stack: Vec<(usize, usize)> = self
            .slot(start)
            .children
            .iter()
            .rev()
            .map(|&slot| (1, slot))
            .collect();
        while let Some((depth, slot)) = stack.pop() {
            let node = self.slot(slot);
            out.push((depth, node.id));
            stack.extend(node.children.iter().rev().map(|&child| (depth + 1, child)));
        }
        out
    }

    /// Appends a new location under `parent`.
    pub fn add_location(&mut self, parent: NodeId, name: &str) -> Result<NodeId, WorldTreeError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WorldTreeError::InvalidName);
        }
        self.insert_with_id(parent, new_node_id(), trimmed.to_string())
    }

    /// Appends a location with a caller-provided id, used by decode paths.
    ///
    /// The name is stored verbatim.
    pub fn insert_with_id(
        &mut self,
        parent: NodeId,
        id: NodeId,
        name: String,
    ) -> Result<NodeId, WorldTreeError> {
        let parent_slot = *self
            .index
            .get(&parent)
            .ok_or(WorldTreeError::ParentNotFound(parent))?;
        if self.index.contains_key(&id) {
            return Err(WorldTreeError::DuplicateId(id));
        }

        let mut node = Location::detached(id, name);
        node.parent = Some(parent_slot);
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                slot
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.index.insert(id, slot);
        self.slot_mut(parent_slot).children.push(slot);
        Ok(id)
    }

    pub fn rename(&mut self, id: NodeId, name: &str) -> Result<(), WorldTreeError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WorldTreeError::InvalidName);
        }
        if self.is_root(id) {
            return Err(WorldTreeError::RootImmutable);
        }
        let node = self.get_mut(id).ok_or(WorldTreeError::NodeNotFound(id))?;
        node.name = trimmed.to_string();
        Ok(())
    }

    /// Stamps `template` onto a location. The root is refused.
    pub fn apply_template(
        &mut self,
        id: NodeId,
        template: &WorldTemplate,
    ) -> Result<(), WorldTreeError> {
        if self.is_root(id) {
            return Err(WorldTreeError::RootImmutable);
        }
        let node = self.get_mut(id).ok_or(WorldTreeError::NodeNotFound(id))?;
        template.apply(node);
        Ok(())
    }

    /// Removes a location and its whole subtree.
    ///
    /// Returns the number of removed locations.
    pub fn remove(&mut self, id: NodeId) -> Result<usize, WorldTreeError> {
        let slot = *self.index.get(&id).ok_or(WorldTreeError::NodeNotFound(id))?;
        if slot == self.root {
            return Err(WorldTreeError::RootImmutable);
        }
        self.detach(slot);

        let mut removed = 0;
        let mut pending = vec![slot];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.slots[current].take() {
                self.index.remove(&node.id);
                pending.extend(node.children);
                self.free.push(current);
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Moves a location under `new_parent` at sibling position `index`
    /// (clamped to the child count).
    pub fn move_location(
        &mut self,
        id: NodeId,
        new_parent: NodeId,
        index: usize,
    ) -> Result<(), WorldTreeError> {
        let slot = *self.index.get(&id).ok_or(WorldTreeError::NodeNotFound(id))?;
        if slot == self.root {
            return Err(WorldTreeError::RootImmutable);
        }
        let parent_slot = *self
            .index
            .get(&new_parent)
            .ok_or(WorldTreeError::ParentNotFound(new_parent))?;
        if self.is_ancestor_or_self(slot, parent_slot) {
            return Err(WorldTreeError::CycleDetected {
                node: id,
                parent: new_parent,
            });
        }

        self.detach(slot);
        let siblings = &mut self.slot_mut(parent_slot).children;
        let position = index.min(siblings.len());
        siblings.insert(position, slot);
        self.slot_mut(slot).parent = Some(parent_slot);
        Ok(())
    }

    fn is_ancestor_or_self(&self, ancestor: usize, mut cursor: usize) -> bool {
        loop {
            if cursor == ancestor {
                return true;
            }
            match self.slot(cursor).parent {
                Some(parent) => cursor = parent,
                None => return false,
            }
        }
    }

    fn detach(&mut self, slot: usize) {
        if let Some(parent) = self.slot(slot).parent {
            self.slot_mut(parent).children.retain(|&child| child != slot);
        }
        self.slot_mut(slot).parent = None;
    }

    // Live slots are always `Some`; the index and child lists only ever point
    // at live slots.
    fn slot(&self, slot: usize) -> &Location {
        match self.slots[slot].as_ref() {
            Some(node) => node,
            None => unreachable!("world tree slot {slot} referenced after free"),
        }
    }

    fn slot_mut(&mut self, slot: usize) -> &mut Location {
        match self.slots[slot].as_mut() {
            Some(node) => node,
            None => unreachable!("world tree slot {slot} referenced after free"),
        }
    }

    fn subtree_eq(&self, slot: usize, other: &WorldTree, other_slot: usize) -> bool {
        let left = self.slot(slot);
        let right = other.slot(other_slot);
        left.children.len() == right.children.len()
            && left
                .children
                .iter()
                .zip(right.children.iter())
                .all(|(&a, &b)| {
                    let (na, nb) = (self.slot(a), other.slot(b));
                    na.id == nb.id && na.same_content(nb) && self.subtree_eq(a, other, b)
                })
    }
}

/// Structural equality below the synthetic root.
///
/// The root's own id is regenerated on every load and is not compared.
impl PartialEq for WorldTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.subtree_eq(self.root, other, other.root)
    }
}

impl Eq for WorldTree {}
