use std::{
    collections::{BTreeMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use chrono::Utc;
use futures::channel::mpsc;
use komento_api::{
    ChannelEvent, Comment, CommentId, CommentPatch, Error, EventFeed, NewComment, Notifier, Order,
    Page, Query, Store, ThreadId, UserId,
};
use uuid::Uuid;

/// In-memory document store with event fan-out, standing in for the hosted
/// backend in tests. Threads come into existence the first time something
/// touches them.
pub struct MockStore {
    threads: BTreeMap<ThreadId, ThreadData>,
    fail_writes: bool,
    fail_reads: bool,
}

#[derive(Default)]
struct ThreadData {
    comments: Vec<Comment>,
    feeds: Vec<mpsc::UnboundedSender<ChannelEvent>>,
}

impl ThreadData {
    fn relay(&mut self, ev: ChannelEvent) {
        // drop subscribers that went away
        self.feeds.retain(|f| f.unbounded_send(ev.clone()).is_ok());
    }
}

impl MockStore {
    pub fn new() -> MockStore {
        MockStore {
            threads: BTreeMap::new(),
            fail_writes: false,
            fail_reads: false,
        }
    }

    /// Makes every subsequent write fail, for rollback tests.
    pub fn test_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Makes every subsequent list fail, for degraded-read tests.
    pub fn test_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub fn test_comment_count(&self, thread: &ThreadId) -> usize {
        self.threads.get(thread).map_or(0, |t| t.comments.len())
    }

    pub fn test_contains(&self, id: &CommentId) -> bool {
        self.threads
            .values()
            .any(|t| t.comments.iter().any(|c| c.id == *id))
    }

    fn check_writable(&self) -> Result<(), Error> {
        match self.fail_writes {
            true => Err(Error::Unknown("injected write failure".to_string())),
            false => Ok(()),
        }
    }

    fn thread_of(&self, id: &CommentId) -> Option<ThreadId> {
        self.threads
            .iter()
            .find(|(_, t)| t.comments.iter().any(|c| c.id == *id))
            .map(|(tid, _)| *tid)
    }
}

impl Default for MockStore {
    fn default() -> MockStore {
        MockStore::new()
    }
}

#[async_trait]
impl Store for MockStore {
    async fn create_comment(&mut self, new: NewComment) -> Result<Comment, Error> {
        self.check_writable()?;
        new.validate()?;
        let comment = Comment {
            id: CommentId(Uuid::new_v4()),
            thread: new.thread,
            parent: new.parent,
            author: new.author,
            author_name: new.author_name,
            content: new.content,
            created_at: Utc::now(),
            likes: Vec::new(),
            dislikes: Vec::new(),
        };
        let data = self.threads.entry(comment.thread).or_default();
        data.comments.push(comment.clone());
        data.relay(ChannelEvent::Created(comment.clone()));
        Ok(comment)
    }

    async fn list_comments(&mut self, q: &Query) -> Result<Page, Error> {
        if self.fail_reads {
            return Err(Error::Unknown("injected read failure".to_string()));
        }
        let data = match self.threads.get(&q.thread) {
            Some(data) => data,
            None => {
                return Ok(Page {
                    comments: Vec::new(),
                    total: 0,
                })
            }
        };
        let mut comments = data.comments.clone();
        comments.sort_by_key(|c| c.created_at);
        if let Order::CreatedDesc = q.order {
            comments.reverse();
        }
        let total = comments.len();
        let comments = comments
            .into_iter()
            .skip(q.offset)
            .take(q.limit.unwrap_or(usize::MAX))
            .collect();
        Ok(Page { comments, total })
    }

    async fn update_comment(
        &mut self,
        id: CommentId,
        patch: CommentPatch,
    ) -> Result<Comment, Error> {
        self.check_writable()?;
        patch.validate()?;
        for data in self.threads.values_mut() {
            if let Some(c) = data.comments.iter_mut().find(|c| c.id == id) {
                patch.apply_to(c);
                let updated = c.clone();
                data.relay(ChannelEvent::Updated(updated.clone()));
                return Ok(updated);
            }
        }
        Err(Error::NotFound(id.0))
    }

    async fn delete_comment(&mut self, id: CommentId) -> Result<(), Error> {
        self.check_writable()?;
        let thread = self.thread_of(&id).ok_or(Error::NotFound(id.0))?;
        let data = self
            .threads
            .get_mut(&thread)
            .expect("thread disappeared between lookup and delete");

        // cascade: grow the id set until no comment's parent is in it
        let mut doomed: HashSet<CommentId> = HashSet::new();
        doomed.insert(id);
        loop {
            let before = doomed.len();
            for c in &data.comments {
                if let Some(p) = c.parent {
                    if doomed.contains(&p) {
                        doomed.insert(c.id);
                    }
                }
            }
            if doomed.len() == before {
                break;
            }
        }

        let mut removed = Vec::new();
        data.comments.retain(|c| {
            if doomed.contains(&c.id) {
                removed.push(c.clone());
                false
            } else {
                true
            }
        });
        for c in removed {
            data.relay(ChannelEvent::Deleted(c));
        }
        Ok(())
    }

    async fn subscribe(&mut self, thread: ThreadId) -> Result<EventFeed, Error> {
        let (sender, receiver) = mpsc::unbounded();
        self.threads.entry(thread).or_default().feeds.push(sender);
        Ok(receiver)
    }
}

/// Recording notifier with an injectable failure, for testing the
/// best-effort notification path.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<(UserId, CommentId)>>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> MockNotifier {
        MockNotifier::default()
    }

    pub fn failing() -> MockNotifier {
        MockNotifier {
            sent: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// Shared handle onto the delivery log; stays valid after the notifier
    /// is boxed into a client.
    pub fn sent(&self) -> Arc<Mutex<Vec<(UserId, CommentId)>>> {
        self.sent.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn reply_posted(&mut self, to: UserId, comment: &Comment) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("injected notification failure");
        }
        self.sent
            .lock()
            .expect("notification log poisoned")
            .push((to, comment.id));
        Ok(())
    }
}
