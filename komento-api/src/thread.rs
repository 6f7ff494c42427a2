use std::fmt;

use uuid::Uuid;

use crate::{UserId, STUB_UUID};

/// Discriminates which domain entity a thread hangs off of.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub enum ThreadKind {
    /// Public comment thread below a published article
    Article,
    /// Chat room attached to a collaborative draft, participants only
    Collab,
}

/// Composite thread key: the source entity's uuid plus a kind tag.
///
/// Threads are never created explicitly; the store materializes one the first
/// time a comment lands in it.
#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct ThreadId {
    pub kind: ThreadKind,
    pub source: Uuid,
}

impl ThreadId {
    pub fn article(source: Uuid) -> ThreadId {
        ThreadId {
            kind: ThreadKind::Article,
            source,
        }
    }

    pub fn collab(source: Uuid) -> ThreadId {
        ThreadId {
            kind: ThreadKind::Collab,
            source,
        }
    }

    pub fn stub() -> ThreadId {
        ThreadId::article(STUB_UUID)
    }
}

impl fmt::Display for ThreadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ThreadKind::Article => "article",
            ThreadKind::Collab => "collab",
        };
        write!(f, "{}:{}", kind, self.source)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Thread {
    pub id: ThreadId,

    /// Owner of the underlying article or draft, notified on replies
    pub owner: UserId,

    /// Only meaningful for access-controlled rooms; empty means public
    pub participants: Vec<UserId>,
}

impl Thread {
    pub fn is_participant(&self, user: &UserId) -> bool {
        self.owner == *user || self.participants.contains(user)
    }
}
