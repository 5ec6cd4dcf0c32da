use std::fmt::{Debug, Formatter};
use std::ops::Range;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Error, Result};
use crate::list::chain::Chain;
use crate::list::cursor::{Cursor, Scope};
use crate::list::iterator::{Cycle, Iter};
use crate::list::sublist::{SubList, Window};

mod chain;
pub mod cursor;
pub mod iterator;
pub mod sublist;

mod algorithms;

/// The `List` is an ordered doubly-linked sequence. Its nodes live in a slot
/// arena and link to each other by slot key, so inserting or removing at a
/// known position takes constant time. In compromise, accessing or mutating
/// elements by index takes *O*(*n*) time (walking from the nearer end).
///
/// The `List` contains a single lock around:
/// - the arena of nodes, with the `head` and `tail` keys;
/// - a `circular` flag: when set, the tail links back to the head;
/// - a version stamp that moves on every structural change (insert, remove,
///   clear) and nowhere else.
///
/// All operations take `&self`. Structural changes take the write lock, so
/// the relinking and the version bump are published together; reads share
/// the lock. [`SubList`] views, [`Cursor`]s and iterators borrow the list and
/// compare the version stamp on every use, failing fast with
/// [`Error::ConcurrentModification`] once someone else changed the structure.
///
/// # Naming Conventions
///
/// - `front..=back`: a closed run of list nodes, both inclusive;
/// - `start..end`: a half-open range of indices, left inclusive and right
///   exclusive.
pub struct List<T> {
    chain: RwLock<Chain<T>>,
}

/// Construction options of a [`List`].
///
/// # Examples
///
/// ```
/// use linked_seq::{List, Options};
///
/// let list: List<u8> = List::with_options(Options {
///     circular: true,
///     ..Options::default()
/// });
/// assert!(list.is_circular());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Link the tail back to the head.
    pub circular: bool,
    /// Number of nodes to preallocate.
    pub capacity: usize,
}

// private methods
impl<T> List<T> {
    pub(crate) fn read(&self) -> RwLockReadGuard<'_, Chain<T>> {
        self.chain.read()
    }

    pub(crate) fn write(&self) -> RwLockWriteGuard<'_, Chain<T>> {
        self.chain.write()
    }

    /// The chain itself, without locking: `&mut self` proves exclusivity.
    pub(crate) fn get_mut(&mut self) -> &mut Chain<T> {
        self.chain.get_mut()
    }

    pub(crate) fn into_chain(self) -> Chain<T> {
        self.chain.into_inner()
    }
}

impl<T> List<T> {
    /// Create an empty, linear `List`.
    ///
    /// # Examples
    /// ```
    /// use linked_seq::List;
    /// let list: List<u32> = List::new();
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    /// Create an empty `List`, circular or not.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::with_circular(true);
    /// list.push_back(1);
    /// list.push_back(2);
    /// let wrapped: Vec<i32> = list.cycle().take(5).map(Result::unwrap).collect();
    /// assert_eq!(wrapped, vec![1, 2, 1, 2, 1]);
    /// ```
    #[inline]
    pub fn with_circular(circular: bool) -> Self {
        Self::with_options(Options {
            circular,
            ..Options::default()
        })
    }

    /// Create an empty, linear `List` with room for `capacity` nodes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_options(Options {
            capacity,
            ..Options::default()
        })
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            chain: RwLock::new(Chain::new(options.circular, options.capacity)),
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert!(list.is_empty());
    ///
    /// list.push_front("foo");
    /// assert!(!list.is_empty());
    /// ```
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the length of the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.len(), 1);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    ///
    /// list.push_back(3);
    /// assert_eq!(list.len(), 3);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[inline]
    pub fn is_circular(&self) -> bool {
        self.read().is_circular()
    }

    /// Returns the structural version of the `List`.
    ///
    /// The version moves on every insertion and removal, and once per
    /// [`clear`](List::clear). Reads and [`set`](List::set) leave it alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2]);
    /// let version = list.version();
    /// list.set(0, 5).unwrap();
    /// assert_eq!(list.version(), version);
    /// list.remove(0).unwrap();
    /// assert!(list.version() > version);
    /// ```
    #[inline]
    pub fn version(&self) -> u64 {
        self.read().version()
    }

    /// Removes all elements from the `List`.
    ///
    /// # Complexity
    ///
    /// This operation should compute in *O*(*n*) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    ///
    /// list.push_front(2);
    /// list.push_front(1);
    /// assert_eq!(list.len(), 2);
    /// assert_eq!(list.front(), Some(1));
    ///
    /// list.clear();
    /// assert_eq!(list.len(), 0);
    /// assert_eq!(list.front(), None);
    /// ```
    #[inline]
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Returns a copy of the front element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert_eq!(list.front(), None);
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(1));
    /// ```
    pub fn front(&self) -> Option<T>
    where
        T: Clone,
    {
        self.read().front().cloned()
    }

    /// Returns a copy of the back element, or `None` if the list is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert_eq!(list.back(), None);
    ///
    /// list.push_back(1);
    /// assert_eq!(list.back(), Some(1));
    /// ```
    pub fn back(&self) -> Option<T>
    where
        T: Clone,
    {
        self.read().back().cloned()
    }

    /// Adds an element first in the list.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    ///
    /// list.push_front(2);
    /// assert_eq!(list.front(), Some(2));
    ///
    /// list.push_front(1);
    /// assert_eq!(list.front(), Some(1));
    /// ```
    pub fn push_front(&self, elt: T) {
        let mut chain = self.write();
        let head = chain.head();
        chain.attach_before(head, elt);
    }

    /// Removes the first element and returns it, or `None` if the list is
    /// empty.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert_eq!(list.pop_front(), None);
    ///
    /// list.push_front(1);
    /// list.push_front(3);
    /// assert_eq!(list.pop_front(), Some(3));
    /// assert_eq!(list.pop_front(), Some(1));
    /// assert_eq!(list.pop_front(), None);
    /// ```
    pub fn pop_front(&self) -> Option<T> {
        self.write().pop_front()
    }

    /// Appends an element to the back of a list and returns its index.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert_eq!(list.push_back(1), 0);
    /// assert_eq!(list.push_back(3), 1);
    /// assert_eq!(list.back(), Some(3));
    /// ```
    pub fn push_back(&self, elt: T) -> usize {
        let mut chain = self.write();
        chain.attach_before(None, elt);
        chain.len() - 1
    }

    /// Removes the last element from a list and returns it, or `None` if
    /// it is empty.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    /// assert_eq!(list.pop_back(), None);
    /// list.push_back(1);
    /// list.push_back(3);
    /// assert_eq!(list.pop_back(), Some(3));
    /// ```
    pub fn pop_back(&self) -> Option<T> {
        self.write().pop_back()
    }

    /// Applies `f` to the element at `index`.
    ///
    /// Index `0` and `len - 1` resolve in *O*(1) time; anything else walks
    /// from the nearer end.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([String::from("a"), String::from("bc")]);
    /// assert_eq!(list.get_with(1, String::len), Ok(2));
    /// ```
    pub fn get_with<R, F>(&self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let chain = self.read();
        let key = chain.key_at(index)?;
        Ok(f(chain.element(key)))
    }

    /// Returns a copy of the element at `index`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.get(2), Ok(3));
    /// assert_eq!(list.get(3), Err(Error::OutOfRange { index: 3, len: 3 }));
    /// ```
    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.get_with(index, T::clone)
    }

    /// Returns a copy of the element at `index`, or `default` if there is
    /// none.
    ///
    /// A stored `None` is an element like any other; see
    /// [`get_some_or`](List::get_some_or) for lists of options.
    pub fn get_or(&self, index: usize, default: T) -> T
    where
        T: Clone,
    {
        self.get(index).unwrap_or(default)
    }

    /// Replaces the element at `index`, returning the old one.
    ///
    /// This is a content change: the version stays put and outstanding
    /// views, cursors and iterators remain valid.
    pub fn set(&self, index: usize, elt: T) -> Result<T> {
        let mut chain = self.write();
        let key = chain.key_at(index)?;
        Ok(chain.replace(key, elt))
    }

    /// Inserts an element at position `index` (`index <= len`).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 3]);
    /// list.insert(1, 2).unwrap();
    /// list.insert(3, 4).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// assert_eq!(list.insert(5, 6), Err(Error::OutOfRange { index: 5, len: 4 }));
    /// ```
    pub fn insert(&self, index: usize, elt: T) -> Result<()> {
        let mut chain = self.write();
        let len = chain.len();
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        let anchor = chain.search(index);
        chain.attach_before(anchor, elt);
        Ok(())
    }

    /// Removes the element at `index` and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.remove(1), Ok(2));
    /// assert_eq!(list.to_vec(), vec![1, 3]);
    /// assert!(list.remove(2).is_err());
    /// ```
    pub fn remove(&self, index: usize) -> Result<T> {
        let mut chain = self.write();
        let key = chain.key_at(index)?;
        Ok(chain.detach(key))
    }

    /// Removes the first element equal to `x`. Returns whether one was found.
    pub fn remove_item(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        let mut chain = self.write();
        let head = chain.head();
        let len = chain.len();
        match chain.position(head, len, x) {
            Some((_, key)) => {
                chain.detach(key);
                true
            }
            None => false,
        }
    }

    /// Returns a snapshot of the elements in traversal order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.read().elements().cloned().collect()
    }

    /// Copies the leading elements into `dst`, as many as fit. Returns the
    /// number of elements copied.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut dst = [0; 2];
    /// assert_eq!(list.copy_to(&mut dst), 2);
    /// assert_eq!(dst, [1, 2]);
    /// ```
    pub fn copy_to(&self, dst: &mut [T]) -> usize
    where
        T: Clone,
    {
        let chain = self.read();
        let mut copied = 0;
        for (slot, elt) in dst.iter_mut().zip(chain.elements()) {
            slot.clone_from(elt);
            copied += 1;
        }
        copied
    }

    /// Calls `f` on each element, front to back, under one read lock.
    ///
    /// `f` must not modify the list.
    pub fn for_each<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.read().elements().for_each(f);
    }

    /// Like [`for_each`](List::for_each), back to front.
    pub fn for_each_rev<F>(&self, f: F)
    where
        F: FnMut(&T),
    {
        self.read().elements_rev().for_each(f);
    }

    /// Provides a fail-fast forward iterator, which is also double-ended.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    ///
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(Ok(0)));
    /// assert_eq!(iter.next(), Some(Ok(1)));
    /// assert_eq!(iter.next(), Some(Ok(2)));
    /// assert_eq!(iter.next(), None);
    ///
    /// let backward: Result<Vec<_>, _> = list.iter().rev().collect();
    /// assert_eq!(backward, Ok(vec![2, 1, 0]));
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self, Window::whole(&self.read()))
    }

    /// Provides an iterator following the raw links: endless on a circular
    /// list, and ending after the tail otherwise. See [`Cycle`].
    pub fn cycle(&self) -> Cycle<'_, T> {
        Cycle::new(self, Window::whole(&self.read()))
    }

    /// Provides a live view of the elements in `range`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2, 3, 4]);
    /// let view = list.sub_list(1..3).unwrap();
    /// assert_eq!(view.to_vec(), Ok(vec![2, 3]));
    ///
    /// assert_eq!(
    ///     list.sub_list(3..5).err(),
    ///     Some(Error::InvalidRange { start: 3, end: 5, len: 4 })
    /// );
    /// ```
    pub fn sub_list(&self, range: Range<usize>) -> Result<SubList<'_, T>> {
        let window = Window::range(&self.read(), range.start, range.end)?;
        Ok(SubList::new(self, window))
    }

    /// Provides a cursor at position `at` (`at <= len`).
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor(1).unwrap();
    /// assert_eq!(cursor.next(), Ok(2));
    /// assert!(list.cursor(4).is_err());
    /// ```
    pub fn cursor(&self, at: usize) -> Result<Cursor<'_, T>> {
        let chain = self.read();
        Cursor::at(self, Scope::Whole(Window::whole(&chain)), &chain, at)
    }

    /// Provides a cursor before the first element.
    pub fn cursor_start(&self) -> Cursor<'_, T> {
        let window = Window::whole(&self.read());
        Cursor::new(self, Scope::Whole(window), 0, window.front)
    }

    /// Provides a cursor after the last element.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_end();
    /// assert!(!cursor.has_next());
    /// assert_eq!(cursor.previous(), Ok(3));
    /// ```
    pub fn cursor_end(&self) -> Cursor<'_, T> {
        let window = Window::whole(&self.read());
        Cursor::new(self, Scope::Whole(window), window.len, None)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.read().elements()).finish()
    }
}

impl<T: Clone> List<Option<T>> {
    /// Returns a copy of the value at `index`, or `default` if the index is
    /// out of range or the element there is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([Some(1), None]);
    /// assert_eq!(list.get_some_or(0, 7), 1);
    /// assert_eq!(list.get_some_or(1, 7), 7);
    /// assert_eq!(list.get_some_or(2, 7), 7);
    /// ```
    pub fn get_some_or(&self, index: usize, default: T) -> T {
        self.get_with(index, Option::clone)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod proptests {
    use crate::List;
    use proptest::prelude::*;

    #[derive(Clone, Debug)]
    enum Op {
        PushBack(u8),
        PushFront(u8),
        PopBack,
        PopFront,
        Insert(usize, u8),
        Remove(usize),
        Set(usize, u8),
        RemoveItem(u8),
        Retain(u8),
        Clear,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => any::<u8>().prop_map(Op::PushBack),
            2 => any::<u8>().prop_map(Op::PushFront),
            1 => Just(Op::PopBack),
            1 => Just(Op::PopFront),
            3 => (0..40_usize, any::<u8>()).prop_map(|(i, x)| Op::Insert(i, x)),
            3 => (0..40_usize).prop_map(Op::Remove),
            1 => (0..40_usize, any::<u8>()).prop_map(|(i, x)| Op::Set(i, x)),
            1 => any::<u8>().prop_map(Op::RemoveItem),
            1 => (2..5_u8).prop_map(Op::Retain),
            1 => Just(Op::Clear),
        ]
    }

    /// Apply `op` to both the list and a `Vec` model.
    fn apply(list: &List<u8>, model: &mut Vec<u8>, op: &Op) {
        match *op {
            Op::PushBack(x) => {
                assert_eq!(list.push_back(x), model.len());
                model.push(x);
            }
            Op::PushFront(x) => {
                list.push_front(x);
                model.insert(0, x);
            }
            Op::PopBack => assert_eq!(list.pop_back(), model.pop()),
            Op::PopFront => {
                let expected = (!model.is_empty()).then(|| model.remove(0));
                assert_eq!(list.pop_front(), expected);
            }
            Op::Insert(i, x) => {
                let result = list.insert(i, x);
                assert_eq!(result.is_ok(), i <= model.len());
                if result.is_ok() {
                    model.insert(i, x);
                }
            }
            Op::Remove(i) => {
                let expected = (i < model.len()).then(|| model.remove(i));
                assert_eq!(list.remove(i).ok(), expected);
            }
            Op::Set(i, x) => {
                let version = list.version();
                let expected = model.get_mut(i).map(|slot| std::mem::replace(slot, x));
                assert_eq!(list.set(i, x).ok(), expected);
                assert_eq!(list.version(), version);
            }
            Op::RemoveItem(x) => {
                let found = model.iter().position(|&y| y == x);
                if let Some(i) = found {
                    model.remove(i);
                }
                assert_eq!(list.remove_item(&x), found.is_some());
            }
            Op::Retain(m) => {
                list.retain(|x| x % m != 0);
                model.retain(|x| x % m != 0);
            }
            Op::Clear => {
                list.clear();
                model.clear();
            }
        }
    }

    proptest! {
        #[test]
        fn list_matches_vec(
            circular in any::<bool>(),
            ops in proptest::collection::vec(op(), 0..120),
        ) {
            let list = List::with_circular(circular);
            let mut model = Vec::new();
            for op in &ops {
                let version = list.version();
                let len = list.len();
                apply(&list, &mut model, op);
                list.read().assert_well_formed();
                prop_assert_eq!(list.to_vec(), model.clone());
                prop_assert_eq!(list.len(), model.len());
                prop_assert!(list.version() >= version);
                if list.len() != len {
                    prop_assert!(list.version() > version);
                }
            }
            let backward: Vec<u8> = list.iter().rev().map(Result::unwrap).collect();
            prop_assert_eq!(backward, model.iter().rev().copied().collect::<Vec<_>>());
        }

        #[test]
        fn sub_list_matches_vec(
            items in proptest::collection::vec(any::<u8>(), 0..30),
            start in 0..30_usize,
            len in 0..30_usize,
            edits in proptest::collection::vec((any::<bool>(), 0..30_usize, any::<u8>()), 0..30),
            circular in any::<bool>(),
        ) {
            let list = List::with_circular(circular);
            list.add_all(items.clone());
            let start = start.min(items.len());
            let end = (start + len).min(items.len());
            let mut view = list.sub_list(start..end).unwrap();
            let mut model = items;
            let mut view_len = end - start;
            for (insert, i, x) in edits {
                if insert {
                    let result = view.insert(i, x);
                    prop_assert_eq!(result.is_ok(), i <= view_len);
                    if result.is_ok() {
                        model.insert(start + i, x);
                        view_len += 1;
                    }
                } else {
                    let result = view.remove(i);
                    prop_assert_eq!(result.is_ok(), i < view_len);
                    if let Ok(x) = result {
                        prop_assert_eq!(model.remove(start + i), x);
                        view_len -= 1;
                    }
                }
                list.read().assert_well_formed();
                prop_assert_eq!(list.to_vec(), model.clone());
                prop_assert_eq!(view.to_vec().unwrap(), model[start..start + view_len].to_vec());
            }
            prop_assert_eq!(list.is_circular(), circular);
        }

        #[test]
        fn cursor_matches_vec(
            items in proptest::collection::vec(any::<u8>(), 0..20),
            steps in proptest::collection::vec(0..5_u8, 0..60),
            circular in any::<bool>(),
        ) {
            let list = List::with_circular(circular);
            list.add_all(items.clone());
            let mut model = items;
            let mut index = 0;
            let mut last: Option<usize> = None;
            let mut cursor = list.cursor_start();
            for step in steps {
                match step {
                    0 => {
                        let result = cursor.next();
                        prop_assert_eq!(result.is_ok(), index < model.len());
                        if let Ok(x) = result {
                            prop_assert_eq!(x, model[index]);
                            last = Some(index);
                            index += 1;
                        }
                    }
                    1 => {
                        let result = cursor.previous();
                        prop_assert_eq!(result.is_ok(), index > 0);
                        if let Ok(x) = result {
                            index -= 1;
                            prop_assert_eq!(x, model[index]);
                            last = Some(index);
                        }
                    }
                    2 => {
                        cursor.insert(index as u8).unwrap();
                        model.insert(index, index as u8);
                        index += 1;
                        last = None;
                    }
                    3 => {
                        let result = cursor.remove();
                        prop_assert_eq!(result.is_ok(), last.is_some());
                        if let Some(at) = last.take() {
                            prop_assert_eq!(result.unwrap(), model.remove(at));
                            if at < index {
                                index -= 1;
                            }
                        }
                    }
                    _ => {
                        let result = cursor.set(7);
                        prop_assert_eq!(result.is_ok(), last.is_some());
                        if let Some(at) = last {
                            model[at] = 7;
                        }
                    }
                }
                prop_assert_eq!(cursor.next_index(), index);
                prop_assert_eq!(cursor.len(), model.len());
            }
            drop(cursor);
            list.read().assert_well_formed();
            prop_assert_eq!(list.to_vec(), model);
        }
    }
}
