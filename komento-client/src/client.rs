use futures::{channel::oneshot, select, FutureExt, StreamExt};

use crate::{
    api::{
        ChannelEvent, Comment, CommentId, CommentPatch, Error, NewComment, Notifier, Query,
        ReactionKind, Store, Thread, ThreadKind, User,
    },
    reaction, SyncListener, ThreadDump,
};

/// Mutation coordinator for one thread.
///
/// Owns the flat local state and the store handle; every mutating operation
/// below is a read-modify-write of that state, which is safe because nothing
/// else touches it between awaits. Optimistic operations capture a snapshot
/// first and restore it verbatim when the remote write fails.
pub struct ThreadClient<S> {
    store: S,
    thread: Thread,
    viewer: User,
    state: ThreadDump,
    notifier: Option<Box<dyn Notifier + Send>>,
}

impl<S: Store> ThreadClient<S> {
    pub fn new(store: S, thread: Thread, viewer: User) -> ThreadClient<S> {
        let state = ThreadDump::new(viewer.id, thread.id);
        ThreadClient {
            store,
            thread,
            viewer,
            state,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Box<dyn Notifier + Send>) -> ThreadClient<S> {
        self.notifier = Some(notifier);
        self
    }

    pub fn state(&self) -> &ThreadDump {
        &self.state
    }

    pub fn thread(&self) -> &Thread {
        &self.thread
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Full-thread fetch. A read failure degrades to an empty thread rather
    /// than an error state.
    pub async fn refresh(&mut self) {
        match self.store.list_comments(&Query::thread(self.thread.id)).await {
            Ok(page) => self.state.reset(page.comments),
            Err(err) => {
                tracing::warn!(?err, thread = %self.thread.id, "thread fetch failed, rendering empty");
                self.state.reset(Vec::new());
            }
        }
    }

    pub async fn subscribe(&mut self) -> Result<SyncListener, Error> {
        let feed = self.store.subscribe(self.thread.id).await?;
        Ok(SyncListener::new(self.thread.id, feed))
    }

    /// Posts a comment (or a reply when `parent` is set). Content is
    /// validated before any network call; the server-returned record is
    /// prepended to local state. The owner notification is best-effort and
    /// never undoes the comment.
    pub async fn add_comment(
        &mut self,
        content: &str,
        parent: Option<CommentId>,
    ) -> Result<CommentId, Error> {
        // collab rooms are access-controlled; article threads are public
        if let ThreadKind::Collab = self.thread.id.kind {
            if !self.thread.is_participant(&self.viewer.id) {
                return Err(Error::PermissionDenied);
            }
        }
        let new = NewComment {
            thread: self.thread.id,
            parent,
            author: self.viewer.id,
            author_name: self.viewer.name.clone(),
            content: content.to_string(),
        };
        new.validate()?;
        let created = self.store.create_comment(new).await?;
        let id = created.id;
        self.state.insert_front(created.clone());
        if self.viewer.id != self.thread.owner {
            if let Some(notifier) = &mut self.notifier {
                if let Err(err) = notifier.reply_posted(self.thread.owner, &created).await {
                    tracing::warn!(?err, comment = ?id, "failed notifying thread owner");
                }
            }
        }
        Ok(id)
    }

    /// Replaces a comment's content. Author-only; not optimistic — local
    /// state changes only once the store confirms. Last write wins.
    pub async fn edit_comment(&mut self, id: CommentId, content: &str) -> Result<(), Error> {
        let patch = CommentPatch::content(content.to_string());
        patch.validate()?;
        let current = self.state.get(&id).ok_or(Error::NotFound(id.0))?;
        if current.author != self.viewer.id {
            return Err(Error::PermissionDenied);
        }
        let updated = self.store.update_comment(id, patch).await?;
        self.state.replace(updated);
        Ok(())
    }

    /// Toggles the viewer's like/dislike on a comment, optimistically.
    ///
    /// The full new membership lists are written back as-is; there is no
    /// compare-and-swap against the store, so two users toggling the same
    /// comment concurrently can lose one of the updates. Accepted limitation.
    pub async fn toggle_reaction(&mut self, id: CommentId, kind: ReactionKind) -> Result<(), Error> {
        let current = self.state.get(&id).cloned().ok_or(Error::NotFound(id.0))?;
        let (likes, dislikes) = reaction::toggled(&current, self.viewer.id, kind);

        let snapshot = self.state.snapshot();
        let mut optimistic = Comment::clone(&current);
        optimistic.likes = likes.clone();
        optimistic.dislikes = dislikes.clone();
        self.state.replace(optimistic);

        match self
            .store
            .update_comment(id, CommentPatch::reactions(likes, dislikes))
            .await
        {
            Ok(updated) => {
                self.state.replace(updated);
                Ok(())
            }
            Err(err) => {
                self.state.restore(snapshot);
                Err(err)
            }
        }
    }

    /// Deletes a comment together with its whole descendant subtree.
    ///
    /// The closure is computed from the local flat list and removed
    /// optimistically; only the target id is deleted remotely, the store is
    /// expected to cascade. NotFound counts as success so a repeated delete
    /// is idempotent. Returns how many records were removed locally.
    pub async fn delete_comment(&mut self, id: CommentId) -> Result<usize, Error> {
        let target = self.state.get(&id).cloned().ok_or(Error::NotFound(id.0))?;
        if target.author != self.viewer.id {
            return Err(Error::PermissionDenied);
        }

        let mut closure = self.state.descendants_of(&id);
        closure.insert(id);
        let snapshot = self.state.snapshot();
        let removed = self.state.remove_all(&closure);

        match self.store.delete_comment(id).await {
            Ok(()) | Err(Error::NotFound(_)) => Ok(removed),
            Err(err) => {
                self.state.restore(snapshot);
                Err(err)
            }
        }
    }

    /// Merges one realtime event into local state, idempotently. Returns
    /// whether anything changed.
    pub fn apply(&mut self, event: ChannelEvent) -> bool {
        if event.thread() != self.thread.id {
            tracing::warn!(thread = %event.thread(), "dropping event scoped to another thread");
            return false;
        }
        match event {
            ChannelEvent::Created(c) => self.state.merge_created(c),
            ChannelEvent::Updated(c) => self.state.replace(c),
            ChannelEvent::Deleted(c) => self.state.remove(&c.id),
        }
    }

    /// Applies everything the feed has already delivered, without blocking.
    pub fn pump(&mut self, listener: &mut SyncListener) -> usize {
        listener
            .try_drain()
            .into_iter()
            .map(|ev| self.apply(ev))
            .filter(|changed| *changed)
            .count()
    }

    /// Drives the feed until the store closes it or `cancel`'s paired
    /// receiver is dropped. Mirrors a mount/unmount lifecycle.
    pub async fn run_feed(&mut self, mut listener: SyncListener, mut cancel: oneshot::Sender<()>) {
        let mut cancellation = cancel.cancellation().fuse();
        loop {
            select! {
                _ = cancellation => {
                    tracing::info!(thread = %self.thread.id, "event feed cancelled");
                    return;
                }
                ev = listener.feed.next() => match ev {
                    None => {
                        tracing::info!(thread = %self.thread.id, "event feed closed by store");
                        return;
                    }
                    Some(ev) => {
                        self.apply(ev);
                    }
                },
            }
        }
    }
}
