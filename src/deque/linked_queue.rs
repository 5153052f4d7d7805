use crate::buffer::copy_terminated;
use crate::error::{AllocError, QueueError, Resource};
use crate::linear_list::{self, IterOwned, LinkedList};
use crate::raw::{try_box, try_copy_str};

use std::fmt;
use std::iter::FusedIterator;

use tracing::{debug, trace, warn};

/// A FIFO/LIFO queue of owned strings.
///
/// Every inserted string is copied into storage owned by the queue. Insertion
/// at either end, removal at the head, and `len` are O(1); `reverse` relinks
/// the nodes in place.
pub struct LinkedQueue(LinkedList<String>);

fn alloc_failed(err: AllocError) -> QueueError {
    warn!(resource = %err.resource, size = err.size, "{}", err);
    QueueError::Alloc(err)
}

impl LinkedQueue {
    pub fn new() -> Self {
        Self(LinkedList::new())
    }

    /// Creates an empty queue on the heap, reporting allocator failure.
    pub fn try_new_boxed() -> Result<Box<Self>, QueueError> {
        try_box(Self::new(), Resource::Queue).map_err(alloc_failed)
    }

    /// Builds a queue from `iter`, inserting each item at the tail.
    pub fn try_from_iter<I, S>(iter: I) -> Result<Self, QueueError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut queue = Self::new();
        for s in iter {
            queue.try_push_back(s.as_ref())?;
        }
        Ok(queue)
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn front(&self) -> Option<&str> {
        self.0.front().map(String::as_str)
    }

    pub fn back(&self) -> Option<&str> {
        self.0.back().map(String::as_str)
    }

    /// Inserts a copy of `s` at the head.
    ///
    /// On failure the queue is unchanged and no storage is retained.
    pub fn try_push_front(&mut self, s: &str) -> Result<(), QueueError> {
        let copy = try_copy_str(s).map_err(alloc_failed)?;
        self.0.try_push_front(copy).map_err(alloc_failed)?;
        trace!(len = self.len(), "inserted at head");
        Ok(())
    }

    /// Inserts a copy of `s` at the tail.
    ///
    /// On failure the queue is unchanged and no storage is retained.
    pub fn try_push_back(&mut self, s: &str) -> Result<(), QueueError> {
        let copy = try_copy_str(s).map_err(alloc_failed)?;
        self.0.try_push_back(copy).map_err(alloc_failed)?;
        trace!(len = self.len(), "inserted at tail");
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<String> {
        self.0.pop_front()
    }

    /// Removes the head, failing with `QueueError::Empty` on an empty queue.
    pub fn try_pop_front(&mut self) -> Result<String, QueueError> {
        match self.0.pop_front() {
            Some(s) => {
                trace!(len = self.len(), "removed head");
                Ok(s)
            }
            None => {
                debug!("remove from empty queue");
                Err(QueueError::Empty)
            }
        }
    }

    /// Removes the head and copies it into `buf` as a zero-terminated byte
    /// string, truncating to `buf.len() - 1` bytes.
    ///
    /// Returns the number of bytes copied before the terminator.
    pub fn try_pop_front_into(&mut self, buf: &mut [u8]) -> Result<usize, QueueError> {
        let s = self.try_pop_front()?;
        Ok(copy_terminated(&s, buf))
    }

    pub fn reverse(&mut self) {
        self.0.reverse();
        trace!(len = self.len(), "reversed");
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.0.iter())
    }

    pub fn into_linked_list(self) -> LinkedList<String> {
        self.0
    }
}

impl Default for LinkedQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LinkedQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for LinkedQueue {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for LinkedQueue {}

#[derive(Clone)]
pub struct Iter<'a>(linear_list::Iter<'a, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<&'a str> {
        self.0.next().map(String::as_str)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {
    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a> IntoIterator for &'a LinkedQueue {
    type Item = &'a str;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for LinkedQueue {
    type Item = String;
    type IntoIter = IterOwned<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
