//! Bidirectional one-to-many index between parent keys and child keys.
//!
//! The event store keeps two of these: calendar -> events and file -> events.
//! Each child has at most one parent. The forward map (`child -> parent`) and the
//! reverse map (`parent -> children`) mirror each other under `add`/`delete`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::error::{Corruption, IndexError, IndexResult};

#[derive(Debug, Clone)]
pub struct RelationIndex<P, C> {
    child_to_parent: BTreeMap<C, P>,
    parent_to_children: BTreeMap<P, BTreeSet<C>>,
}

impl<P, C> Default for RelationIndex<P, C> {
    fn default() -> Self {
        RelationIndex {
            child_to_parent: BTreeMap::new(),
            parent_to_children: BTreeMap::new(),
        }
    }
}

impl<P, C> RelationIndex<P, C>
where
    P: Ord + Clone + fmt::Display,
    C: Ord + Clone + fmt::Display,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.child_to_parent.clear();
        self.parent_to_children.clear();
    }

    /// Register `child` under `parent`.
    ///
    /// A previous parent of `child` is not detached. Re-parenting must go
    /// through [`RelationIndex::delete`] first, otherwise the old parent's
    /// child set keeps a stale entry.
    pub fn add(&mut self, parent: P, child: C) {
        self.parent_to_children
            .entry(parent.clone())
            .or_default()
            .insert(child.clone());
        self.child_to_parent.insert(child, parent);
    }

    /// Detach `child` from both maps. Returns the parent it was under.
    pub fn delete(&mut self, child: &C) -> Option<P> {
        let parent = self.child_to_parent.remove(child)?;

        let Some(children) = self.parent_to_children.get_mut(&parent) else {
            Corruption::MissingChildSet {
                parent: parent.to_string(),
                child: child.to_string(),
            }
            .raise()
        };

        children.remove(child);
        if children.is_empty() {
            self.parent_to_children.remove(&parent);
        }

        Some(parent)
    }

    /// Snapshot of the children under `parent` (empty if unknown).
    pub fn get_children(&self, parent: &P) -> BTreeSet<C> {
        self.parent_to_children
            .get(parent)
            .cloned()
            .unwrap_or_default()
    }

    pub fn get_parent(&self, child: &C) -> Option<&P> {
        self.child_to_parent.get(child)
    }

    pub fn contains_child(&self, child: &C) -> bool {
        self.child_to_parent.contains_key(child)
    }

    /// Move every child of `old` under `new` in the reverse map.
    ///
    /// The forward map is left as-is: callers that need `get_parent` to report
    /// `new` update those entries themselves.
    pub fn rename_parent_key(&mut self, old: &P, new: P) -> IndexResult<()> {
        let Some(children) = self.parent_to_children.remove(old) else {
            return Err(IndexError::UnknownParentKey(old.to_string()));
        };

        self.parent_to_children.entry(new).or_default().extend(children);
        Ok(())
    }

    /// Point an existing child's forward entry at `parent`.
    pub(crate) fn repoint(&mut self, child: &C, parent: P) {
        if let Some(current) = self.child_to_parent.get_mut(child) {
            *current = parent;
        }
    }

    /// Number of children.
    pub fn count(&self) -> usize {
        self.child_to_parent.len()
    }

    /// Number of parents with at least one child.
    pub fn parent_count(&self) -> usize {
        self.parent_to_children
            .values()
            .filter(|children| !children.is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.child_to_parent.is_empty()
    }

    /// Parents with at least one child, in key order.
    pub fn parents(&self) -> impl Iterator<Item = &P> {
        self.parent_to_children
            .iter()
            .filter(|(_, children)| !children.is_empty())
            .map(|(parent, _)| parent)
    }

    pub fn grouped_by_parent(&self) -> BTreeMap<P, Vec<C>> {
        self.parent_to_children
            .iter()
            .filter(|(_, children)| !children.is_empty())
            .map(|(parent, children)| (parent.clone(), children.iter().cloned().collect()))
            .collect()
    }
}
