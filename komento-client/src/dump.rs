use std::{collections::HashSet, sync::Arc};

use crate::api::{Comment, CommentId, Page, ThreadId, UserId};

/// The flat comment list for one thread, as last seen by this client.
///
/// This is the single source of truth for rendering; the tree shape is
/// derived from it on demand and never stored. Records are kept in display
/// order: freshly posted comments go to the front, records merged from the
/// realtime feed or a page fetch go to the back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ThreadDump {
    pub viewer: UserId,
    pub thread: ThreadId,
    comments: Vec<Arc<Comment>>,
}

/// Pre-image of the flat list, captured before an optimistic mutation and
/// restored verbatim if the remote write fails. Clones `Arc`s only.
#[derive(Clone, Debug)]
pub struct Snapshot {
    comments: Vec<Arc<Comment>>,
}

impl ThreadDump {
    pub fn new(viewer: UserId, thread: ThreadId) -> ThreadDump {
        ThreadDump {
            viewer,
            thread,
            comments: Vec::new(),
        }
    }

    pub fn stub() -> ThreadDump {
        ThreadDump::new(UserId::stub(), ThreadId::stub())
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn contains(&self, id: &CommentId) -> bool {
        self.comments.iter().any(|c| c.id == *id)
    }

    pub fn get(&self, id: &CommentId) -> Option<&Arc<Comment>> {
        self.comments.iter().find(|c| c.id == *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Comment>> {
        self.comments.iter()
    }

    /// Wholesale replacement from a full-thread fetch.
    pub fn reset(&mut self, comments: Vec<Comment>) {
        self.comments = comments.into_iter().map(Arc::new).collect();
    }

    /// Appends a fetched page, skipping records already present.
    pub fn merge_page(&mut self, page: Page) {
        for c in page.comments {
            self.merge_created(c);
        }
    }

    /// Prepends a freshly posted comment.
    pub fn insert_front(&mut self, c: Comment) {
        if !self.contains(&c.id) {
            self.comments.insert(0, Arc::new(c));
        }
    }

    /// Append-if-absent by id. This is what makes merging the actor's own
    /// create-event echo idempotent.
    pub fn merge_created(&mut self, c: Comment) -> bool {
        if self.contains(&c.id) {
            return false;
        }
        self.comments.push(Arc::new(c));
        true
    }

    /// Swaps in a new version of the record with the same id.
    pub fn replace(&mut self, c: Comment) -> bool {
        match self.comments.iter_mut().find(|old| old.id == c.id) {
            Some(slot) => {
                *slot = Arc::new(c);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &CommentId) -> bool {
        let before = self.comments.len();
        self.comments.retain(|c| c.id != *id);
        self.comments.len() != before
    }

    /// Removes every listed id in one pass, returning how many went away.
    pub fn remove_all(&mut self, ids: &HashSet<CommentId>) -> usize {
        let before = self.comments.len();
        self.comments.retain(|c| !ids.contains(&c.id));
        before - self.comments.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            comments: self.comments.clone(),
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.comments = snapshot.comments;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ThreadId, Time, Uuid};

    fn comment(content: &str) -> Comment {
        Comment {
            id: CommentId(Uuid::new_v4()),
            thread: ThreadId::stub(),
            parent: None,
            author: UserId::stub(),
            author_name: "tester".to_string(),
            content: content.to_string(),
            created_at: Time::default(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        }
    }

    #[test]
    fn merge_is_idempotent_by_id() {
        let mut dump = ThreadDump::stub();
        let c = comment("hello");
        assert!(dump.merge_created(c.clone()));
        assert!(!dump.merge_created(c.clone()));
        dump.insert_front(c);
        assert_eq!(dump.len(), 1);
    }

    #[test]
    fn merge_page_skips_known_records() {
        let mut dump = ThreadDump::stub();
        let a = comment("a");
        let b = comment("b");
        dump.merge_created(a.clone());
        dump.merge_page(Page {
            comments: vec![a, b],
            total: 2,
        });
        assert_eq!(dump.len(), 2);
    }

    #[test]
    fn snapshot_restores_the_exact_preimage() {
        let mut dump = ThreadDump::stub();
        dump.merge_created(comment("keep me"));
        let snapshot = dump.snapshot();
        let before = dump.clone();

        dump.merge_created(comment("transient"));
        let mut edited = comment("edited");
        edited.id = before.iter().next().unwrap().id;
        dump.replace(edited);
        dump.restore(snapshot);

        assert_eq!(dump, before);
    }
}
