use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use crate::{
    api::{Comment, CommentId},
    ThreadDump,
};

/// Below this depth the UI stops offering a reply affordance. Presentation
/// policy only; the data model allows arbitrary nesting.
pub const MAX_REPLY_DEPTH: usize = 3;

pub fn replies_open(depth: usize) -> bool {
    depth < MAX_REPLY_DEPTH
}

impl ThreadDump {
    /// Direct children of `parent`, in list order. `None` yields the roots,
    /// which also pick up comments whose parent id is not in the list:
    /// dangling references render at the root instead of erroring.
    pub fn children_of(&self, parent: Option<&CommentId>) -> Vec<Arc<Comment>> {
        match parent {
            Some(p) => self
                .iter()
                .filter(|c| c.parent.as_ref() == Some(p))
                .cloned()
                .collect(),
            None => self
                .iter()
                .filter(|c| match &c.parent {
                    None => true,
                    Some(p) => !self.contains(p),
                })
                .cloned()
                .collect(),
        }
    }

    /// Every descendant of `id`, not including `id` itself. Built over a
    /// parent-to-children index of plain ids, no pointer chasing; O(n) per
    /// call, fine at comment-thread sizes.
    pub fn descendants_of(&self, id: &CommentId) -> HashSet<CommentId> {
        let mut children: HashMap<CommentId, Vec<CommentId>> = HashMap::new();
        for c in self.iter() {
            if let Some(p) = c.parent {
                children.entry(p).or_insert_with(Vec::new).push(c.id);
            }
        }
        let mut found = HashSet::new();
        let mut stack = vec![*id];
        while let Some(next) = stack.pop() {
            if let Some(kids) = children.get(&next) {
                for kid in kids {
                    if found.insert(*kid) {
                        stack.push(*kid);
                    }
                }
            }
        }
        found
    }

    /// Distance from the root, where roots (including orphans) sit at 0.
    /// Returns None if `id` is not in the list. A parent cycle, which a
    /// well-behaved store never produces, terminates as if at a root.
    pub fn depth_of(&self, id: &CommentId) -> Option<usize> {
        let mut current = self.get(id)?;
        let mut seen = HashSet::new();
        seen.insert(current.id);
        let mut depth = 0;
        while let Some(parent) = current.parent.and_then(|p| self.get(&p)) {
            if !seen.insert(parent.id) {
                break;
            }
            depth += 1;
            current = parent;
        }
        Some(depth)
    }
}
