use std::fmt;

use thiserror::Error;

/// The kind of storage an allocation was requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Queue,
    Node,
    String,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::Queue => "queue",
            Resource::Node => "node",
            Resource::String => "string",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("couldn't allocate {size} bytes for the {resource}")]
pub struct AllocError {
    pub resource: Resource,
    pub size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue doesn't exist")]
    Absent,

    #[error(transparent)]
    Alloc(#[from] AllocError),

    #[error("queue is empty")]
    Empty,
}
