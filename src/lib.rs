//! A queue of owned strings backed by a singly-linked list.
//!
//! [`LinkedQueue`] is the typed interface. [`handle`] exposes the same
//! operations over a queue that may be absent, reporting failure through
//! `bool`/`Option` results. Allocation failure is always reported to the
//! caller and never aborts.

pub mod buffer;
pub mod deque;
pub mod driver;
pub mod error;
pub mod handle;
pub mod linear_list;
pub mod raw;

pub use crate::deque::LinkedQueue;
pub use crate::error::{AllocError, QueueError, Resource};
