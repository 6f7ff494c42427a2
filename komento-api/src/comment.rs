use uuid::Uuid;

use crate::{Error, ThreadId, Time, UserId, STUB_UUID};

#[derive(
    Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Deserialize, serde::Serialize,
)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum ReactionKind {
    Like,
    Dislike,
}

impl ReactionKind {
    pub fn opposite(self) -> ReactionKind {
        match self {
            ReactionKind::Like => ReactionKind::Dislike,
            ReactionKind::Dislike => ReactionKind::Like,
        }
    }
}

/// One comment or chat message; the two are structurally identical.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Comment {
    /// Assigned by the store on creation
    pub id: CommentId,

    pub thread: ThreadId,

    /// None for a root-level comment. A dangling reference is tolerated and
    /// renders at the root rather than erroring.
    pub parent: Option<CommentId>,

    pub author: UserId,

    /// Author identity denormalized at posting time
    pub author_name: String,

    pub content: String,

    /// Assigned by the store on creation
    pub created_at: Time,

    /// Membership lists; order carries no meaning. A user is in at most one
    /// of the two at any time.
    pub likes: Vec<UserId>,
    pub dislikes: Vec<UserId>,
}

impl Comment {
    pub fn reaction_of(&self, user: &UserId) -> Option<ReactionKind> {
        if self.likes.contains(user) {
            Some(ReactionKind::Like)
        } else if self.dislikes.contains(user) {
            Some(ReactionKind::Dislike)
        } else {
            None
        }
    }
}

/// Client-supplied fields of a comment; the store fills in id and timestamp.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub thread: ThreadId,
    pub parent: Option<CommentId>,
    pub author: UserId,
    pub author_name: String,
    pub content: String,
}

impl NewComment {
    // See comments on other `validate` functions throughout komento-api
    pub fn validate(&self) -> Result<(), Error> {
        crate::validate_content(&self.content)?;
        crate::validate_string(&self.author_name)
    }
}

/// Partial update; `None` fields are left untouched by the store.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct CommentPatch {
    pub content: Option<String>,
    pub likes: Option<Vec<UserId>>,
    pub dislikes: Option<Vec<UserId>>,
}

impl CommentPatch {
    pub fn content(content: String) -> CommentPatch {
        CommentPatch {
            content: Some(content),
            ..CommentPatch::default()
        }
    }

    pub fn reactions(likes: Vec<UserId>, dislikes: Vec<UserId>) -> CommentPatch {
        CommentPatch {
            likes: Some(likes),
            dislikes: Some(dislikes),
            ..CommentPatch::default()
        }
    }

    pub fn apply_to(&self, c: &mut Comment) {
        if let Some(content) = &self.content {
            c.content = content.clone();
        }
        if let Some(likes) = &self.likes {
            c.likes = likes.clone();
        }
        if let Some(dislikes) = &self.dislikes {
            c.dislikes = dislikes.clone();
        }
    }

    // See comments on other `validate` functions throughout komento-api
    pub fn validate(&self) -> Result<(), Error> {
        if let Some(content) = &self.content {
            crate::validate_content(content)?;
        }
        Ok(())
    }
}
