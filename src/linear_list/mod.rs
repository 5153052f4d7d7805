mod linked_list;

pub use self::linked_list::{Iter, IterMut, IterOwned, LinkedList};
