//! Node Tree - arena of scene nodes.
//!
//! Manages the structure of the scene:
//! - id ↔ index mapping
//! - ordered child lists (insertion order = layout order)
//! - parent back-references for upward dirty propagation
//! - structural checks (duplicate ids, cycles)
//!
//! Nodes are indices into one `Vec<Node>`. Indices are stable for the life
//! of the tree; nodes are never removed.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::error::{Result, SceneError};
use crate::primitives::Element;
use crate::types::{DirtyFlags, NodeKind};

use super::node::{Content, Node};

/// The scene tree.
#[derive(Debug, Default)]
pub struct NodeTree {
    nodes: Vec<Node>,
    ids: HashMap<String, usize>,
    root: Option<usize>,
    id_counter: usize,
}

impl NodeTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from a parsed element hierarchy.
    pub fn build(root: Element) -> Result<Self> {
        let mut tree = Self::new();
        let root_index = tree.insert_subtree(None, root)?;
        tree.root = Some(root_index);
        Ok(tree)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append a subtree under `parent`. Returns the index of the subtree root.
    ///
    /// The parent and all its ancestors are marked layout-dirty.
    pub fn append(&mut self, parent: usize, element: Element) -> Result<usize> {
        if parent >= self.nodes.len() {
            return Err(SceneError::UnknownNode(format!("#{parent}")));
        }
        let index = self.insert_subtree(Some(parent), element)?;
        self.mark_dirty(parent, DirtyFlags::LAYOUT | DirtyFlags::PAINT);
        Ok(index)
    }

    /// Move an existing node (and its subtree) under a new parent, as the
    /// last child.
    ///
    /// Fails with [`SceneError::CyclicTree`] if `new_parent` is the node
    /// itself or one of its descendants.
    pub fn move_node(&mut self, index: usize, new_parent: usize) -> Result<()> {
        if index >= self.nodes.len() {
            return Err(SceneError::UnknownNode(format!("#{index}")));
        }
        if new_parent >= self.nodes.len() {
            return Err(SceneError::UnknownNode(format!("#{new_parent}")));
        }
        if index == new_parent || self.ancestors(new_parent).contains(&index) {
            return Err(SceneError::CyclicTree {
                node_id: self.nodes[index].id.clone(),
            });
        }
        if self.root == Some(index) {
            return Err(SceneError::CyclicTree {
                node_id: self.nodes[index].id.clone(),
            });
        }

        if let Some(old_parent) = self.nodes[index].parent {
            self.nodes[old_parent].children.retain(|&child| child != index);
            self.mark_dirty(old_parent, DirtyFlags::LAYOUT | DirtyFlags::PAINT);
        }
        self.nodes[new_parent].children.push(index);
        self.nodes[index].parent = Some(new_parent);
        self.mark_dirty(index, DirtyFlags::LAYOUT | DirtyFlags::PAINT);
        Ok(())
    }

    fn insert_subtree(&mut self, parent: Option<usize>, element: Element) -> Result<usize> {
        // Validate explicit ids up front so a failed insert leaves the tree untouched.
        let mut explicit = HashSet::new();
        let mut pending = vec![&element];
        while let Some(el) = pending.pop() {
            if let Some(id) = &el.id {
                if self.ids.contains_key(id) || !explicit.insert(id.clone()) {
                    return Err(SceneError::DuplicateNodeId(id.clone()));
                }
            }
            pending.extend(el.children.iter());
        }

        let mut first = None;
        let mut stack: Vec<(Option<usize>, Element)> = vec![(parent, element)];

        while let Some((parent, mut el)) = stack.pop() {
            let id = match el.id.take() {
                Some(id) => id,
                None => self.generate_id(&explicit),
            };

            let mut node = Node::new(id.clone(), std::mem::take(&mut el.tag));
            node.props = std::mem::take(&mut el.props);
            node.content = el.content.take();
            node.on_click = el.on_click.take();
            node.on_change = el.on_change.take();
            node.parent = parent;
            if node.content.is_none() && node.kind == NodeKind::Input {
                node.content = Some(Content::Text(String::new()));
            }

            let index = self.nodes.len();
            self.nodes.push(node);
            self.ids.insert(id, index);
            if let Some(p) = parent {
                self.nodes[p].children.push(index);
            }
            first.get_or_insert(index);

            // Reverse so the first child pops (and is attached) first.
            for child in el.children.into_iter().rev() {
                stack.push((Some(index), child));
            }
        }

        trace!(count = self.nodes.len(), "inserted subtree");
        first.ok_or(SceneError::EmptyTree)
    }

    fn generate_id(&mut self, reserved: &HashSet<String>) -> String {
        loop {
            let id = format!("c{}", self.id_counter);
            self.id_counter += 1;
            if !self.ids.contains_key(&id) && !reserved.contains(&id) {
                return id;
            }
        }
    }

    /// Check that every parent chain terminates.
    pub fn validate(&self) -> Result<()> {
        if self.root.is_none() {
            return Err(SceneError::EmptyTree);
        }
        for (index, node) in self.nodes.iter().enumerate() {
            let mut steps = 0;
            let mut current = node.parent;
            while let Some(p) = current {
                steps += 1;
                if steps > self.nodes.len() || p == index {
                    return Err(SceneError::CyclicTree {
                        node_id: node.id.clone(),
                    });
                }
                current = self.nodes[p].parent;
            }
        }
        Ok(())
    }

    // =========================================================================
    // Lookups
    // =========================================================================

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index for a node id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.ids.get(id).copied()
    }

    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Node by id.
    pub fn by_id(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|index| self.nodes.get(index))
    }

    /// Iterate all nodes with their indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// Ancestor indices, nearest first.
    pub fn ancestors(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut current = self.nodes.get(index).and_then(|n| n.parent);
        while let Some(p) = current {
            assert!(out.len() <= self.nodes.len(), "cyclic scene tree at #{index}");
            out.push(p);
            current = self.nodes[p].parent;
        }
        out
    }

    /// Indices of the subtree at `from` in pre-order (parents before children).
    ///
    /// # Panics
    ///
    /// Panics if the walk visits more nodes than the tree holds, which can
    /// only happen if the structure was corrupted into a cycle.
    pub fn preorder(&self, from: usize) -> Vec<usize> {
        let mut out = Vec::new();
        if from >= self.nodes.len() {
            return out;
        }
        let mut stack = vec![from];
        while let Some(index) = stack.pop() {
            assert!(out.len() < self.nodes.len(), "cyclic scene tree below #{from}");
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        out
    }

    // =========================================================================
    // Dirty tracking
    // =========================================================================

    /// Mark a node dirty.
    ///
    /// `LAYOUT` also marks every ancestor layout-dirty: a descendant's size
    /// change can change theirs. Propagation stops at the first ancestor that
    /// is already layout-dirty, since its own ancestors are then dirty too.
    pub fn mark_dirty(&mut self, index: usize, flags: DirtyFlags) {
        let Some(node) = self.nodes.get_mut(index) else {
            return;
        };
        node.dirty |= flags;

        if !flags.contains(DirtyFlags::LAYOUT) {
            return;
        }

        let mut steps = 0;
        let mut current = self.nodes[index].parent;
        while let Some(p) = current {
            steps += 1;
            assert!(steps <= self.nodes.len(), "cyclic scene tree at #{index}");
            let parent = &mut self.nodes[p];
            if parent.dirty.contains(DirtyFlags::LAYOUT) {
                break;
            }
            parent.dirty |= DirtyFlags::LAYOUT;
            current = parent.parent;
        }
    }

    /// Mark every node dirty (viewport class change, remount).
    pub fn mark_all_dirty(&mut self, flags: DirtyFlags) {
        for node in &mut self.nodes {
            node.dirty |= flags;
        }
    }

    pub fn has_dirty(&self) -> bool {
        self.nodes.iter().any(Node::is_dirty)
    }

    /// Dirty nodes with no dirty ancestor, most ancestral first.
    ///
    /// Overlapping dirty subtrees collapse into their top-most dirty node,
    /// so a single pass per returned root covers every dirty node.
    pub fn dirty_roots(&self) -> Vec<usize> {
        let mut roots: Vec<(usize, usize)> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_dirty())
            .filter_map(|(index, _)| {
                let ancestors = self.ancestors(index);
                let covered = ancestors.iter().any(|&a| self.nodes[a].is_dirty());
                (!covered).then_some((ancestors.len(), index))
            })
            .collect();
        roots.sort_unstable();
        roots.into_iter().map(|(_, index)| index).collect()
    }

    /// Clear dirty flags on every node.
    pub fn clear_dirty(&mut self) {
        for node in &mut self.nodes {
            node.dirty = DirtyFlags::NONE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{column, row, text};

    fn sample() -> NodeTree {
        NodeTree::build(
            column()
                .id("app")
                .child(text("a").id("a"))
                .child(row().id("r").child(text("b").id("b")).child(text("c").id("c")))
                .child(text("d").id("d")),
        )
        .unwrap()
    }

    #[test]
    fn test_build_preserves_child_order() {
        let tree = sample();
        let root = tree.root().unwrap();
        let ids: Vec<&str> = tree
            .preorder(root)
            .into_iter()
            .map(|i| tree.get(i).unwrap().id())
            .collect();
        assert_eq!(ids, vec!["app", "a", "r", "b", "c", "d"]);

        let r = tree.by_id("r").unwrap();
        let kids: Vec<&str> = r.children().iter().map(|&i| tree.get(i).unwrap().id()).collect();
        assert_eq!(kids, vec!["b", "c"]);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = NodeTree::build(column().id("app").child(text("x").id("dup")).child(text("y").id("dup")));
        assert_eq!(result.unwrap_err(), SceneError::DuplicateNodeId("dup".into()));
    }

    #[test]
    fn test_generated_ids_avoid_explicit_ones() {
        let tree = NodeTree::build(column().id("app").child(text("x").id("c0")).child(text("y"))).unwrap();
        assert!(tree.by_id("c0").is_some());
        assert!(tree.by_id("c1").is_some());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_mark_dirty_propagates_to_ancestors() {
        let mut tree = sample();
        tree.clear_dirty();

        let b = tree.index_of("b").unwrap();
        tree.mark_dirty(b, DirtyFlags::LAYOUT);

        assert!(tree.by_id("b").unwrap().is_dirty());
        assert!(tree.by_id("r").unwrap().dirty().contains(DirtyFlags::LAYOUT));
        assert!(tree.by_id("app").unwrap().dirty().contains(DirtyFlags::LAYOUT));
        assert!(!tree.by_id("a").unwrap().is_dirty());
        assert!(!tree.by_id("c").unwrap().is_dirty());
    }

    #[test]
    fn test_position_flag_does_not_propagate() {
        let mut tree = sample();
        tree.clear_dirty();

        let r = tree.index_of("r").unwrap();
        tree.mark_dirty(r, DirtyFlags::POSITION);

        assert!(tree.by_id("r").unwrap().is_dirty());
        assert!(!tree.by_id("app").unwrap().is_dirty());
        assert_eq!(tree.dirty_roots(), vec![r]);
    }

    #[test]
    fn test_dirty_roots_merge_overlapping_subtrees() {
        let mut tree = sample();
        tree.clear_dirty();

        let b = tree.index_of("b").unwrap();
        let c = tree.index_of("c").unwrap();
        tree.mark_dirty(b, DirtyFlags::LAYOUT);
        tree.mark_dirty(c, DirtyFlags::LAYOUT);

        assert_eq!(tree.dirty_roots(), vec![tree.root().unwrap()]);

        tree.clear_dirty();
        assert!(!tree.has_dirty());
        assert!(tree.dirty_roots().is_empty());
    }

    #[test]
    fn test_append_marks_parent_dirty() {
        let mut tree = sample();
        tree.clear_dirty();

        let r = tree.index_of("r").unwrap();
        let added = tree.append(r, text("e").id("e")).unwrap();

        assert_eq!(tree.get(added).unwrap().parent(), Some(r));
        assert_eq!(tree.get(r).unwrap().children().last(), Some(&added));
        assert!(tree.by_id("app").unwrap().is_dirty());
        assert!(tree.append(r, text("again").id("e")).is_err());
    }

    #[test]
    fn test_move_node_rejects_cycles() {
        let mut tree = sample();
        let r = tree.index_of("r").unwrap();
        let b = tree.index_of("b").unwrap();

        let err = tree.move_node(r, b).unwrap_err();
        assert_eq!(err, SceneError::CyclicTree { node_id: "r".into() });
        assert!(tree.move_node(r, r).is_err());

        let a = tree.index_of("a").unwrap();
        tree.move_node(b, a).unwrap();
        assert_eq!(tree.get(b).unwrap().parent(), Some(a));
        assert!(!tree.get(r).unwrap().children().contains(&b));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_input_gets_empty_content() {
        let tree = NodeTree::build(column().id("app").child(crate::primitives::input().id("in"))).unwrap();
        assert_eq!(tree.by_id("in").unwrap().text(), Some(""));
    }
}
