use crate::error::{AllocError, Resource};
use crate::raw::try_box;

use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

struct Node<T> {
    elem: T,
    next: Option<NonNull<Node<T>>>,
}

impl<T> Node<T> {
    fn alloc(elem: T) -> Result<NonNull<Self>, AllocError> {
        let node = try_box(Self { elem, next: None }, Resource::Node)?;
        Ok(NonNull::from(Box::leak(node)))
    }

    // cond: ptr came from `Node::alloc` and is no longer linked
    unsafe fn consume(ptr: NonNull<Self>) -> T {
        let Node { elem, .. } = *Box::from_raw(ptr.as_ptr());
        elem
    }
}

// Singly-linked list owning its nodes front to back.
// Nodes are only reachable through raw links, so `tail` may alias the last
// node. `head` and `tail` are `None` iff `len == 0`.
pub struct LinkedList<T> {
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn front(&self) -> Option<&T> {
        self.head.map(|ptr| unsafe { &(*ptr.as_ptr()).elem })
    }

    pub fn back(&self) -> Option<&T> {
        self.tail.map(|ptr| unsafe { &(*ptr.as_ptr()).elem })
    }

    /// Links `elem` in front of the current head.
    ///
    /// The list is left untouched and `elem` is dropped if the node cannot be
    /// allocated.
    pub fn try_push_front(&mut self, elem: T) -> Result<(), AllocError> {
        let node_ptr = Node::alloc(elem)?;
        unsafe { (*node_ptr.as_ptr()).next = self.head };
        if self.tail.is_none() {
            self.tail = Some(node_ptr);
        }
        self.head = Some(node_ptr);
        self.len += 1;
        Ok(())
    }

    /// Links `elem` after the current tail without walking the chain.
    ///
    /// The list is left untouched and `elem` is dropped if the node cannot be
    /// allocated.
    pub fn try_push_back(&mut self, elem: T) -> Result<(), AllocError> {
        let node_ptr = Node::alloc(elem)?;
        match self.tail {
            None => self.head = Some(node_ptr),
            Some(tail_ptr) => unsafe { (*tail_ptr.as_ptr()).next = Some(node_ptr) },
        }
        self.tail = Some(node_ptr);
        self.len += 1;
        Ok(())
    }

    pub fn pop_front(&mut self) -> Option<T> {
        let head_ptr = self.head?;
        unsafe {
            self.head = (*head_ptr.as_ptr()).next;
            if self.head.is_none() {
                self.tail = None;
            }
            self.len -= 1;
            Some(Node::consume(head_ptr))
        }
    }

    /// Flips every link in place. No node is allocated or released.
    pub fn reverse(&mut self) {
        let mut ptr = self.head;
        let mut reversed = None;
        while let Some(node_ptr) = ptr {
            unsafe {
                ptr = (*node_ptr.as_ptr()).next;
                (*node_ptr.as_ptr()).next = reversed;
            }
            reversed = Some(node_ptr);
        }
        self.tail = self.head;
        self.head = reversed;
    }

    pub fn clear(&mut self) {
        let mut ptr = self.head.take();
        self.tail = None;
        self.len = 0;
        while let Some(node_ptr) = ptr {
            unsafe {
                ptr = (*node_ptr.as_ptr()).next;
                drop(Node::consume(node_ptr));
            }
        }
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear()
    }
}

// --------------------------------
// begin: IterOwned

pub struct IterOwned<T>(LinkedList<T>);

impl<T> Iterator for IterOwned<T> {
    type Item = T;
    fn next(&mut self) -> Option<T> {
        self.0.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len, Some(self.0.len))
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IterOwned<T>;
    fn into_iter(self) -> IterOwned<T> {
        IterOwned(self)
    }
}

impl<T> ExactSizeIterator for IterOwned<T> {
    fn len(&self) -> usize {
        self.0.len
    }
}

impl<T> FusedIterator for IterOwned<T> {}

// end: IterOwned
// ------------------------------------------

// ------------------------------------------
// begin: IterMut

pub struct IterMut<'a, T> {
    next: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a mut LinkedList<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;
    fn next(&mut self) -> Option<&'a mut T> {
        self.next.map(|ptr| unsafe {
            let node = &mut *ptr.as_ptr();
            self.next = node.next;
            self.len -= 1;
            &mut node.elem
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

// end: IterMut
// ------------------------------------------

// ------------------------------------------
// begin: Iter

pub struct Iter<'a, T> {
    next: Option<NonNull<Node<T>>>,
    len: usize,
    _marker: PhantomData<&'a LinkedList<T>>,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;
    fn next(&mut self) -> Option<&'a T> {
        self.next.map(|ptr| unsafe {
            let node = &*ptr.as_ptr();
            self.next = node.next;
            self.len -= 1;
            &node.elem
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {
    fn len(&self) -> usize {
        self.len
    }
}

impl<'a, T> FusedIterator for Iter<'a, T> {}

// end: Iter
// ------------------------------------------

#[cfg(test)]
mod test {
    use super::LinkedList;

    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_linked_list() {
        #[derive(Debug, PartialEq, Eq)]
        struct Foo(i32);

        impl Drop for Foo {
            fn drop(&mut self) {
                dbg!(format!("drop {:?}", self));
            }
        }
        let mut list = <LinkedList<Foo>>::new();
        assert!(list.is_empty());
        assert!(list.back().is_none());

        list.try_push_back(Foo(2)).unwrap();
        list.try_push_front(Foo(1)).unwrap();
        list.try_push_back(Foo(3)).unwrap();
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&Foo(1)));
        assert_eq!(list.back(), Some(&Foo(3)));

        list.iter().for_each(|e| {
            dbg!(e);
        });

        assert_eq!(list.pop_front().unwrap().0, 1);
        assert_eq!(list.pop_front().unwrap().0, 2);
        assert_eq!(list.front(), list.back());

        for e in list {
            dbg!(e);
        }

        let mut list = <LinkedList<Foo>>::new();

        for i in 3..=5 {
            list.try_push_front(Foo(i)).unwrap();
        }

        list.clear();
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert!(list.back().is_none());

        for i in 6..=9 {
            list.try_push_back(Foo(i)).unwrap();
        }
        drop(list);
    }

    #[test]
    fn test_tail_after_drain() {
        let mut list = LinkedList::new();
        list.try_push_back(1).unwrap();
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), None);
        assert!(list.back().is_none());

        // tail must not dangle into the released node
        list.try_push_back(2).unwrap();
        list.try_push_back(3).unwrap();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 3]);
        assert_eq!(list.back(), Some(&3));
    }

    #[test]
    fn test_reverse() {
        let mut list = LinkedList::new();
        list.reverse();
        assert!(list.is_empty());

        list.try_push_back(1).unwrap();
        list.reverse();
        assert_eq!(list.front(), Some(&1));
        assert_eq!(list.back(), Some(&1));

        for i in 2..=5 {
            list.try_push_back(i).unwrap();
        }
        list.reverse();
        assert_eq!(list.len(), 5);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [5, 4, 3, 2, 1]);
        assert_eq!(list.front(), Some(&5));
        assert_eq!(list.back(), Some(&1));

        list.try_push_back(0).unwrap();
        list.try_push_front(6).unwrap();
        assert_eq!(
            list.into_iter().collect::<Vec<_>>(),
            [6, 5, 4, 3, 2, 1, 0]
        );
    }

    #[test]
    fn test_iter_mut() {
        let mut list = LinkedList::new();
        for i in 0..4 {
            list.try_push_back(i).unwrap();
        }
        assert_eq!(list.iter_mut().len(), 4);
        for e in &mut list {
            *e *= 10;
        }
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 10, 20, 30]);
    }

    #[test]
    fn test_drop_releases_every_elem() {
        struct Counted(Rc<Cell<usize>>);

        impl Drop for Counted {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Rc::new(Cell::new(0));
        let mut list = LinkedList::new();
        for _ in 0..10 {
            list.try_push_back(Counted(drops.clone())).unwrap();
        }
        list.reverse();
        assert_eq!(drops.get(), 0);

        drop(list.pop_front());
        assert_eq!(drops.get(), 1);

        drop(list);
        assert_eq!(drops.get(), 10);
    }

    #[test]
    fn test_tail_alias_survives_linking() {
        let mut list = LinkedList::new();
        list.try_push_front(1).unwrap();
        assert_eq!(list.back(), Some(&1));
        list.try_push_front(0).unwrap();
        assert_eq!(list.back(), Some(&1));

        let mut list = LinkedList::new();
        list.try_push_back(1).unwrap();
        list.try_push_back(2).unwrap();
        list.reverse();
        list.try_push_back(3).unwrap();
        assert_eq!(list.back(), Some(&3));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [2, 1, 3]);

        *list.iter_mut().last().unwrap() = 4;
        assert_eq!(list.back(), Some(&4));
        assert_eq!(list.pop_front(), Some(2));
        list.reverse();
        list.try_push_front(5).unwrap();
        assert_eq!(list.into_iter().collect::<Vec<_>>(), [5, 4, 1]);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_long_chain_drop() {
        let mut list = LinkedList::new();
        for i in 0..200_000 {
            list.try_push_back(i).unwrap();
        }
        list.reverse();
        assert_eq!(list.front(), Some(&199_999));
        drop(list);
    }
}
