use futures::StreamExt;

use crate::api::{ChannelEvent, EventFeed, ThreadId};

/// Wraps the realtime feed for one thread.
///
/// Events missed while disconnected are gone; the initial full-thread fetch
/// is the only catch-up mechanism. Dropping the listener unsubscribes.
pub struct SyncListener {
    thread: ThreadId,
    pub(crate) feed: EventFeed,
}

impl SyncListener {
    pub fn new(thread: ThreadId, feed: EventFeed) -> SyncListener {
        SyncListener { thread, feed }
    }

    pub fn thread(&self) -> ThreadId {
        self.thread
    }

    /// Collects every event already delivered, without blocking.
    pub fn try_drain(&mut self) -> Vec<ChannelEvent> {
        let mut events = Vec::new();
        while let Ok(Some(ev)) = self.feed.try_next() {
            events.push(ev);
        }
        events
    }

    /// Waits for the next event; None once the store closes the feed.
    pub async fn next(&mut self) -> Option<ChannelEvent> {
        self.feed.next().await
    }
}
