mod client;
pub use client::ThreadClient;

mod dump;
pub use dump::{Snapshot, ThreadDump};

mod reaction;
pub use reaction::toggled;

mod sync;
pub use sync::SyncListener;

mod tree;
pub use tree::{replies_open, MAX_REPLY_DEPTH};

pub mod api {
    pub use komento_api::*;
}
