use crate::{Comment, CommentId, ThreadId};

/// One change notification from the realtime channel.
///
/// The payload is always the full record as the store last saw it; a
/// `Deleted` payload is the record as it was just before removal.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ChannelEvent {
    Created(Comment),
    Updated(Comment),
    Deleted(Comment),
}

impl ChannelEvent {
    pub fn comment(&self) -> &Comment {
        match self {
            ChannelEvent::Created(c) => c,
            ChannelEvent::Updated(c) => c,
            ChannelEvent::Deleted(c) => c,
        }
    }

    pub fn comment_id(&self) -> CommentId {
        self.comment().id
    }

    pub fn thread(&self) -> ThreadId {
        self.comment().thread
    }
}
