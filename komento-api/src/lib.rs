pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<chrono::Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod comment;
pub use comment::{Comment, CommentId, CommentPatch, NewComment, ReactionKind};

mod error;
pub use error::Error;

mod event;
pub use event::ChannelEvent;

mod query;
pub use query::{Order, Page, Query};

mod store;
pub use store::{EventFeed, Notifier, Store};

mod thread;
pub use thread::{Thread, ThreadId, ThreadKind};

mod user;
pub use user::{User, UserId};

/// Checks a user-supplied text body before it goes anywhere near the store.
// See comments on other `validate` functions throughout komento-api
pub fn validate_content(s: &str) -> Result<(), Error> {
    if s.trim().is_empty() {
        return Err(Error::EmptyContent);
    }
    validate_string(s)
}

pub fn validate_string(s: &str) -> Result<(), Error> {
    match s.contains('\0') {
        true => Err(Error::NullByteInString(s.to_string())),
        false => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_validation_rejects_blank_and_nul() {
        assert_eq!(validate_content(""), Err(Error::EmptyContent));
        assert_eq!(validate_content("  \n\t "), Err(Error::EmptyContent));
        assert_eq!(
            validate_content("evil\0byte"),
            Err(Error::NullByteInString("evil\0byte".to_string()))
        );
        assert_eq!(validate_content("fine"), Ok(()));
    }
}
