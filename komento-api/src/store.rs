use async_trait::async_trait;

use crate::{ChannelEvent, Comment, CommentId, CommentPatch, Error, NewComment, Page, Query,
            ThreadId, UserId};

/// Live feed of change events for one thread. Dropping the receiver is the
/// unsubscribe.
pub type EventFeed = futures::channel::mpsc::UnboundedReceiver<ChannelEvent>;

/// The narrow seam to the hosted document database: four document operations
/// plus a change subscription. Everything behind it (transport, auth,
/// storage) is opaque to the engine.
#[async_trait]
pub trait Store {
    async fn create_comment(&mut self, c: NewComment) -> Result<Comment, Error>;

    async fn list_comments(&mut self, q: &Query) -> Result<Page, Error>;

    async fn update_comment(&mut self, id: CommentId, patch: CommentPatch)
        -> Result<Comment, Error>;

    async fn delete_comment(&mut self, id: CommentId) -> Result<(), Error>;

    async fn subscribe(&mut self, thread: ThreadId) -> Result<EventFeed, Error>;
}

/// Push-notification seam. Delivery is somebody else's problem; a failure
/// here must never undo the comment that triggered it.
#[async_trait]
pub trait Notifier {
    async fn reply_posted(&mut self, to: UserId, comment: &Comment) -> anyhow::Result<()>;
}
