//! Operations on a queue that may not exist.
//!
//! A missing queue is `None`; every operation reports failure through its
//! return value and never panics.

use crate::deque::LinkedQueue;
use crate::error::QueueError;

use tracing::{trace, warn};

fn present<Q>(queue: Option<Q>, op: &'static str) -> Result<Q, QueueError> {
    queue.ok_or_else(|| {
        warn!(op, "queue doesn't exist");
        QueueError::Absent
    })
}

/// Creates an empty queue, or `None` if its storage can't be allocated.
pub fn create() -> Option<Box<LinkedQueue>> {
    LinkedQueue::try_new_boxed().ok()
}

/// Releases the queue, every node and every string it holds.
pub fn destroy(queue: Option<Box<LinkedQueue>>) {
    if let Some(queue) = queue {
        let len = queue.len();
        drop(queue);
        trace!(len, "queue destroyed");
    }
}

pub fn insert_head(queue: Option<&mut LinkedQueue>, s: &str) -> bool {
    present(queue, "insert_head")
        .and_then(|queue| queue.try_push_front(s))
        .is_ok()
}

pub fn insert_tail(queue: Option<&mut LinkedQueue>, s: &str) -> bool {
    present(queue, "insert_tail")
        .and_then(|queue| queue.try_push_back(s))
        .is_ok()
}

/// Removes the head. If `buf` is given, the removed string is copied into it
/// as a zero-terminated byte string of at most `buf.len() - 1` bytes.
pub fn remove_head(queue: Option<&mut LinkedQueue>, buf: Option<&mut [u8]>) -> bool {
    let queue = match present(queue, "remove_head") {
        Ok(queue) => queue,
        Err(_) => return false,
    };
    match buf {
        Some(buf) => queue.try_pop_front_into(buf).is_ok(),
        None => queue.try_pop_front().is_ok(),
    }
}

pub fn size(queue: Option<&LinkedQueue>) -> usize {
    queue.map_or(0, LinkedQueue::len)
}

pub fn reverse(queue: Option<&mut LinkedQueue>) {
    if let Some(queue) = queue {
        queue.reverse();
    }
}
