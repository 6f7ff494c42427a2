use crate::{Comment, ThreadId};

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Order {
    CreatedAsc,
    CreatedDesc,
}

/// The only query shape the engine ever issues: equality on the
/// thread-scoping field, ordered by creation time, paginated.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Query {
    pub thread: ThreadId,
    pub order: Order,
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Query {
    pub fn thread(thread: ThreadId) -> Query {
        Query {
            thread,
            order: Order::CreatedAsc,
            limit: None,
            offset: 0,
        }
    }

    pub fn order(mut self, order: Order) -> Query {
        self.order = order;
        self
    }

    pub fn page(mut self, limit: usize, offset: usize) -> Query {
        self.limit = Some(limit);
        self.offset = offset;
        self
    }

    pub fn matches(&self, c: &Comment) -> bool {
        c.thread == self.thread
    }
}

/// One page of results plus the total count across all pages.
#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Page {
    pub comments: Vec<Comment>,
    pub total: usize,
}
