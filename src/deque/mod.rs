mod linked_queue;

pub use self::linked_queue::{Iter, LinkedQueue};
