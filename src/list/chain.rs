use crate::error::{Error, Result};
use slab::Slab;
use std::mem;
use tracing::trace;

/// A node of the chain, stored in a slot of the arena.
///
/// `prev`/`next` are slot keys. In a circular chain the tail's `next` is the
/// head and the head's `prev` is the tail; otherwise both are `None`.
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

/// The storage behind a [`List`](crate::List): a slot arena of nodes plus the
/// `head`/`tail` keys and the structural version stamp.
///
/// Every structural primitive ([`attach_before`](Chain::attach_before),
/// [`detach`](Chain::detach) and [`clear`](Chain::clear)) re-closes the loop
/// of a circular chain and bumps the version as its last step.
pub(crate) struct Chain<T> {
    nodes: Slab<Node<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    version: u64,
    circular: bool,
}

// private methods
impl<T> Chain<T> {
    fn bump(&mut self) {
        self.version += 1;
    }

    /// Link `prev` and `next` together. A missing `prev` makes `next` the
    /// head, a missing `next` makes `prev` the tail.
    fn connect(&mut self, prev: Option<usize>, next: Option<usize>) {
        match prev {
            Some(prev) => self.nodes[prev].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.nodes[next].prev = prev,
            None => self.tail = prev,
        }
    }

    /// Re-link tail to head if the chain is circular.
    fn close_loop(&mut self) {
        if !self.circular {
            return;
        }
        if let (Some(head), Some(tail)) = (self.head, self.tail) {
            self.nodes[tail].next = Some(head);
            self.nodes[head].prev = Some(tail);
        }
    }
}

impl<T> Chain<T> {
    pub(crate) fn new(circular: bool, capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            head: None,
            tail: None,
            version: 0,
            circular,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub(crate) fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub(crate) fn is_circular(&self) -> bool {
        self.circular
    }

    #[inline]
    pub(crate) fn head(&self) -> Option<usize> {
        self.head
    }

    #[inline]
    pub(crate) fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub(crate) fn element(&self, key: usize) -> &T {
        &self.nodes[key].element
    }

    pub(crate) fn front(&self) -> Option<&T> {
        self.head.map(|key| self.element(key))
    }

    pub(crate) fn back(&self) -> Option<&T> {
        self.tail.map(|key| self.element(key))
    }

    /// The node after `key` in traversal order; the tail has none, even in
    /// a circular chain.
    pub(crate) fn successor(&self, key: usize) -> Option<usize> {
        if self.tail == Some(key) {
            return None;
        }
        self.nodes[key].next
    }

    /// The node before `key` in traversal order; the head has none, even in
    /// a circular chain.
    pub(crate) fn predecessor(&self, key: usize) -> Option<usize> {
        if self.head == Some(key) {
            return None;
        }
        self.nodes[key].prev
    }

    /// The raw `next` link of `key`, which wraps to the head in a circular
    /// chain.
    pub(crate) fn next_link(&self, key: usize) -> Option<usize> {
        self.nodes[key].next
    }

    /// Keys of the `len` nodes starting at `front`, following `next`.
    pub(crate) fn walk(
        &self,
        front: Option<usize>,
        len: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(front, move |&key| self.nodes[key].next).take(len)
    }

    /// Keys of the `len` nodes ending at `back`, following `prev`.
    pub(crate) fn walk_back(
        &self,
        back: Option<usize>,
        len: usize,
    ) -> impl Iterator<Item = usize> + '_ {
        std::iter::successors(back, move |&key| self.nodes[key].prev).take(len)
    }

    pub(crate) fn elements(&self) -> impl Iterator<Item = &T> + '_ {
        self.walk(self.head, self.len())
            .map(move |key| self.element(key))
    }

    pub(crate) fn elements_rev(&self) -> impl Iterator<Item = &T> + '_ {
        self.walk_back(self.tail, self.len())
            .map(move |key| self.element(key))
    }

    /// Locate the node at `index` of the run of `len` nodes `front..=back`.
    ///
    /// Both ends resolve directly; anything else walks from the nearer end.
    pub(crate) fn nth(&self, front: usize, back: usize, len: usize, index: usize) -> Option<usize> {
        match index {
            index if index >= len => None,
            0 => Some(front),
            index if index == len - 1 => Some(back),
            index if index <= len / 2 => self.walk(Some(front), len).nth(index),
            index => self.walk_back(Some(back), len).nth(len - 1 - index),
        }
    }

    /// Locate the node at `index` of the whole chain.
    pub(crate) fn search(&self, index: usize) -> Option<usize> {
        self.nth(self.head?, self.tail?, self.len(), index)
    }

    pub(crate) fn key_at(&self, index: usize) -> Result<usize> {
        self.search(index).ok_or(Error::OutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Find the first element equal to `x` among the `len` nodes starting at
    /// `front`, returning its index within the run and its key.
    pub(crate) fn position(&self, front: Option<usize>, len: usize, x: &T) -> Option<(usize, usize)>
    where
        T: PartialEq,
    {
        self.walk(front, len)
            .enumerate()
            .find(|&(_, key)| self.element(key) == x)
    }

    /// Replace the element of `key`. This is a content change: the version
    /// stays put.
    pub(crate) fn replace(&mut self, key: usize, element: T) -> T {
        mem::replace(&mut self.nodes[key].element, element)
    }

    /// Link a new node before `next`, or after the tail if `next` is `None`.
    /// Returns the key of the new node.
    pub(crate) fn attach_before(&mut self, next: Option<usize>, element: T) -> usize {
        let prev = match next {
            Some(next) => self.predecessor(next),
            None => self.tail,
        };
        let key = self.nodes.insert(Node {
            element,
            prev,
            next,
        });
        self.connect(prev, Some(key));
        self.connect(Some(key), next);
        self.close_loop();
        self.bump();
        trace!(key, len = self.len(), version = self.version, "attach");
        key
    }

    /// Unlink the node of `key`, release its slot and return its element.
    pub(crate) fn detach(&mut self, key: usize) -> T {
        let prev = self.predecessor(key);
        let next = self.successor(key);
        let Node { element, .. } = self.nodes.remove(key);
        self.connect(prev, next);
        self.close_loop();
        self.bump();
        trace!(key, len = self.len(), version = self.version, "detach");
        element
    }

    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let head = self.head?;
        Some(self.detach(head))
    }

    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let tail = self.tail?;
        Some(self.detach(tail))
    }

    /// Drop every node. The version moves once, however many nodes went.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.bump();
        trace!(version = self.version, "clear");
    }

    /// Walk the links both ways and check every structural invariant.
    #[cfg(test)]
    pub(crate) fn assert_well_formed(&self) {
        let len = self.len();
        assert_eq!(len == 0, self.head.is_none());
        assert_eq!(len == 0, self.tail.is_none());
        let (Some(head), Some(tail)) = (self.head, self.tail) else {
            return;
        };
        let forward: Vec<usize> = self.walk(Some(head), len).collect();
        let mut backward: Vec<usize> = self.walk_back(Some(tail), len).collect();
        backward.reverse();
        assert_eq!(forward.len(), len);
        assert_eq!(forward, backward);
        assert_eq!(forward.last(), Some(&tail));
        if self.circular {
            assert_eq!(self.nodes[tail].next, Some(head));
            assert_eq!(self.nodes[head].prev, Some(tail));
        } else {
            assert_eq!(self.nodes[tail].next, None);
            assert_eq!(self.nodes[head].prev, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Chain;

    fn chain_of(circular: bool, items: &[i32]) -> Chain<i32> {
        let mut chain = Chain::new(circular, 0);
        for &item in items {
            chain.attach_before(None, item);
        }
        chain.assert_well_formed();
        chain
    }

    fn contents(chain: &Chain<i32>) -> Vec<i32> {
        chain.elements().copied().collect()
    }

    #[test]
    fn chain_attach_and_detach() {
        for circular in [false, true] {
            let mut chain = chain_of(circular, &[1, 2, 3]);
            assert_eq!(contents(&chain), vec![1, 2, 3]);

            let head = chain.head().unwrap();
            chain.attach_before(Some(head), 0);
            chain.assert_well_formed();
            let middle = chain.search(2).unwrap();
            chain.attach_before(Some(middle), 9);
            chain.assert_well_formed();
            assert_eq!(contents(&chain), vec![0, 1, 9, 2, 3]);

            let tail = chain.tail().unwrap();
            assert_eq!(chain.detach(tail), 3);
            chain.assert_well_formed();
            let head = chain.head().unwrap();
            assert_eq!(chain.detach(head), 0);
            chain.assert_well_formed();
            let middle = chain.search(1).unwrap();
            assert_eq!(chain.detach(middle), 9);
            chain.assert_well_formed();
            assert_eq!(contents(&chain), vec![1, 2]);

            assert_eq!(chain.pop_back(), Some(2));
            assert_eq!(chain.pop_front(), Some(1));
            assert_eq!(chain.pop_front(), None);
            chain.assert_well_formed();
        }
    }

    #[test]
    fn chain_version() {
        let mut chain = chain_of(false, &[1, 2, 3]);
        assert_eq!(chain.version(), 3);

        let key = chain.search(1).unwrap();
        assert_eq!(chain.replace(key, 5), 2);
        assert_eq!(chain.version(), 3);

        chain.detach(key);
        assert_eq!(chain.version(), 4);

        chain.clear();
        assert_eq!(chain.version(), 5);
        assert_eq!(chain.len(), 0);
        chain.assert_well_formed();
    }

    #[test]
    fn chain_search() {
        let chain = chain_of(true, &[0, 1, 2, 3, 4, 5, 6]);
        for index in 0..7 {
            let key = chain.search(index).unwrap();
            assert_eq!(*chain.element(key), index as i32);
        }
        assert_eq!(chain.search(7), None);
        assert_eq!(chain.search(usize::MAX), None);
        assert_eq!(chain.position(chain.head(), 7, &4).map(|(i, _)| i), Some(4));
        assert_eq!(chain.position(chain.head(), 7, &7), None);
    }

    #[test]
    fn chain_circular_links() {
        let mut chain = chain_of(true, &[1]);
        let only = chain.head().unwrap();
        assert_eq!(chain.next_link(only), Some(only));
        assert_eq!(chain.successor(only), None);
        assert_eq!(chain.predecessor(only), None);

        chain.attach_before(None, 2);
        let tail = chain.tail().unwrap();
        assert_eq!(chain.next_link(tail), Some(only));
        chain.assert_well_formed();
    }

    #[test]
    fn chain_reuses_slots() {
        let mut chain = chain_of(false, &[1, 2, 3]);
        let key = chain.search(1).unwrap();
        chain.detach(key);
        let reused = chain.attach_before(None, 4);
        assert_eq!(reused, key);
        assert_eq!(contents(&chain), vec![1, 3, 4]);
        chain.assert_well_formed();
    }
}
