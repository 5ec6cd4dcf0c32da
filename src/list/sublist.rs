use crate::error::{Error, Result};
use crate::list::chain::Chain;
use crate::list::cursor::{Cursor, Scope};
use crate::list::iterator::Iter;
use crate::list::List;
use std::fmt;
use tracing::debug;

/// A contiguous run of a chain, with the version it was captured at.
///
/// `start` is the absolute index of the first node, `front..=back` are the
/// keys of the first and last nodes (both `None` for an empty run). The run
/// is only meaningful while `version` matches the chain's version; every
/// structural edit made through the window refreshes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Window {
    pub(crate) start: usize,
    pub(crate) len: usize,
    pub(crate) front: Option<usize>,
    pub(crate) back: Option<usize>,
    pub(crate) version: u64,
}

impl Window {
    /// A window over the whole chain.
    pub(crate) fn whole<T>(chain: &Chain<T>) -> Self {
        Self {
            start: 0,
            len: chain.len(),
            front: chain.head(),
            back: chain.tail(),
            version: chain.version(),
        }
    }

    /// A window over `start..end` of the chain.
    pub(crate) fn range<T>(chain: &Chain<T>, start: usize, end: usize) -> Result<Self> {
        let len = chain.len();
        if start > end || end > len {
            return Err(Error::InvalidRange { start, end, len });
        }
        let (front, back) = match start == end {
            true => (None, None),
            false => (chain.search(start), chain.search(end - 1)),
        };
        Ok(Self {
            start,
            len: end - start,
            front,
            back,
            version: chain.version(),
        })
    }

    pub(crate) fn check<T>(&self, chain: &Chain<T>) -> Result<()> {
        let found = chain.version();
        if self.version == found {
            return Ok(());
        }
        debug!(expected = self.version, found, "stale view or cursor");
        Err(Error::ConcurrentModification {
            expected: self.version,
            found,
        })
    }

    pub(crate) fn key_at<T>(&self, chain: &Chain<T>, index: usize) -> Result<usize> {
        let out_of_range = Error::OutOfRange {
            index,
            len: self.len,
        };
        let (front, back) = self.front.zip(self.back).ok_or(out_of_range)?;
        chain
            .nth(front, back, self.len, index)
            .ok_or(out_of_range)
    }

    /// The node a new element at `index` (`index <= len`) is linked before,
    /// or `None` if it goes after the tail of the chain.
    pub(crate) fn anchor<T>(&self, chain: &Chain<T>, index: usize) -> Result<Option<usize>> {
        if index < self.len {
            return self.key_at(chain, index).map(Some);
        }
        Ok(match self.back {
            Some(back) => chain.successor(back),
            // An empty window is anchored by its absolute position.
            None => chain.search(self.start),
        })
    }

    /// Link `element` before `anchor`, which must be the node at `index` of
    /// the window (or the node right after it when `index == len`).
    pub(crate) fn link_before<T>(
        &mut self,
        chain: &mut Chain<T>,
        anchor: Option<usize>,
        index: usize,
        element: T,
    ) -> usize {
        let key = chain.attach_before(anchor, element);
        if index == 0 {
            self.front = Some(key);
        }
        if index == self.len {
            self.back = Some(key);
        }
        self.len += 1;
        self.version = chain.version();
        key
    }

    /// Detach `key`, the node at `index` of the window. Returns its element
    /// and the node that takes over `index`.
    pub(crate) fn unlink<T>(
        &mut self,
        chain: &mut Chain<T>,
        key: usize,
        index: usize,
    ) -> (T, Option<usize>) {
        let is_front = index == 0;
        let is_back = index + 1 == self.len;
        let before = if is_front { None } else { chain.predecessor(key) };
        let after = if is_back { None } else { chain.successor(key) };
        let element = chain.detach(key);
        if is_front {
            self.front = after;
        }
        if is_back {
            self.back = before;
        }
        self.len -= 1;
        self.version = chain.version();
        (element, after)
    }

    pub(crate) fn insert<T>(
        &mut self,
        chain: &mut Chain<T>,
        index: usize,
        element: T,
    ) -> Result<usize> {
        self.check(chain)?;
        if index > self.len {
            return Err(Error::OutOfRange {
                index,
                len: self.len,
            });
        }
        let anchor = self.anchor(chain, index)?;
        Ok(self.link_before(chain, anchor, index, element))
    }

    pub(crate) fn remove<T>(&mut self, chain: &mut Chain<T>, index: usize) -> Result<T> {
        self.check(chain)?;
        let key = self.key_at(chain, index)?;
        Ok(self.unlink(chain, key, index).0)
    }

    /// Unlink every node whose element fails `keep`, front to back.
    pub(crate) fn retain<T, F>(&mut self, chain: &mut Chain<T>, mut keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut index = 0;
        let mut current = self.front;
        while let Some(key) = current {
            if keep(chain.element(key)) {
                current = match index + 1 == self.len {
                    true => None,
                    false => chain.successor(key),
                };
                index += 1;
            } else {
                current = self.unlink(chain, key, index).1;
            }
        }
    }

    pub(crate) fn keys<'c, T>(&self, chain: &'c Chain<T>) -> impl Iterator<Item = usize> + 'c {
        chain.walk(self.front, self.len)
    }

    pub(crate) fn position<T: PartialEq>(&self, chain: &Chain<T>, x: &T) -> Option<(usize, usize)> {
        chain.position(self.front, self.len, x)
    }
}

/// A live view of the range `from..to` of a [`List`].
///
/// The view does not copy anything: it reads and writes the parent's own
/// nodes. Writes through the view change the parent exactly as the same
/// edit made on the parent would, and the view keeps its bounds in step.
///
/// Any structural change made to the parent by other means (directly, by a
/// cursor, or by another view) makes the view stale, and every further
/// operation on it fails with [`Error::ConcurrentModification`].
///
/// # Examples
///
/// ```
/// use linked_seq::{Error, List};
///
/// let list = List::from_iter(['A', 'B', 'C', 'D', 'E']);
/// let mut view = list.sub_list(1..4).unwrap();
/// assert_eq!(view.to_vec(), Ok(vec!['B', 'C', 'D']));
///
/// // Removing through the view removes from the parent.
/// assert_eq!(view.remove(0), Ok('B'));
/// assert_eq!(list.to_vec(), vec!['A', 'C', 'D', 'E']);
/// assert_eq!(view.to_vec(), Ok(vec!['C', 'D']));
///
/// // A direct edit of the parent invalidates the view.
/// list.push_back('F');
/// assert!(matches!(view.get(0), Err(Error::ConcurrentModification { .. })));
/// ```
pub struct SubList<'a, T> {
    list: &'a List<T>,
    window: Window,
}

impl<'a, T> SubList<'a, T> {
    pub(crate) fn new(list: &'a List<T>, window: Window) -> Self {
        Self { list, window }
    }

    /// The list this view aliases.
    pub fn parent(&self) -> &'a List<T> {
        self.list
    }

    /// Returns `Ok(())` if the view is still in step with its parent.
    pub fn check(&self) -> Result<()> {
        self.window.check(&self.list.read())
    }

    pub fn len(&self) -> Result<usize> {
        self.check()?;
        Ok(self.window.len)
    }

    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Apply `f` to the element at `index` of the view.
    pub fn get_with<R, F>(&self, index: usize, f: F) -> Result<R>
    where
        F: FnOnce(&T) -> R,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        let key = self.window.key_at(&chain, index)?;
        Ok(f(chain.element(key)))
    }

    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.get_with(index, T::clone)
    }

    pub fn front(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self.window.front.map(|key| chain.element(key).clone()))
    }

    pub fn back(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self.window.back.map(|key| chain.element(key).clone()))
    }

    /// Replace the element at `index` of the view and return the old one.
    ///
    /// Like [`List::set`], this does not count as a structural change.
    pub fn set(&self, index: usize, item: T) -> Result<T> {
        let mut chain = self.list.write();
        self.window.check(&chain)?;
        let key = self.window.key_at(&chain, index)?;
        Ok(chain.replace(key, item))
    }

    /// Insert `item` at `index` of the view (`index <= len`).
    pub fn insert(&mut self, index: usize, item: T) -> Result<()> {
        let list = self.list;
        let mut chain = list.write();
        self.window.insert(&mut chain, index, item).map(|_| ())
    }

    /// Insert `item` right after the last element of the view and return
    /// its index within the view.
    pub fn push_back(&mut self, item: T) -> Result<usize> {
        let list = self.list;
        let mut chain = list.write();
        let index = self.window.len;
        self.window.insert(&mut chain, index, item)?;
        Ok(index)
    }

    pub fn remove(&mut self, index: usize) -> Result<T> {
        let list = self.list;
        let mut chain = list.write();
        self.window.remove(&mut chain, index)
    }

    /// Remove the first element of the view equal to `x`.
    pub fn remove_item(&mut self, x: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        let list = self.list;
        let mut chain = list.write();
        self.window.check(&chain)?;
        Ok(match self.window.position(&chain, x) {
            Some((index, key)) => {
                self.window.unlink(&mut chain, key, index);
                true
            }
            None => false,
        })
    }

    /// Remove every element of the view from the parent.
    pub fn clear(&mut self) -> Result<()> {
        let list = self.list;
        let mut chain = list.write();
        self.window.check(&chain)?;
        self.window.retain(&mut chain, |_| false);
        Ok(())
    }

    pub fn index_of(&self, x: &T) -> Result<Option<usize>>
    where
        T: PartialEq,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self.window.position(&chain, x).map(|(index, _)| index))
    }

    pub fn contains(&self, x: &T) -> Result<bool>
    where
        T: PartialEq,
    {
        self.index_of(x).map(|index| index.is_some())
    }

    pub fn to_vec(&self) -> Result<Vec<T>>
    where
        T: Clone,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self
            .window
            .keys(&chain)
            .map(|key| chain.element(key).clone())
            .collect())
    }

    /// A fail-fast iterator over the view.
    pub fn iter(&self) -> Iter<'a, T> {
        Iter::new(self.list, self.window)
    }

    /// A cursor at `at` of the view (`at <= len`).
    ///
    /// The cursor borrows the view mutably, so edits made through it keep
    /// the view valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter(0..6);
    /// let mut view = list.sub_list(2..5).unwrap();
    /// let mut cursor = view.cursor(3).unwrap();
    /// cursor.insert(9).unwrap();
    /// drop(cursor);
    ///
    /// assert_eq!(view.to_vec(), Ok(vec![2, 3, 4, 9]));
    /// assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4, 9, 5]);
    /// ```
    pub fn cursor(&mut self, at: usize) -> Result<Cursor<'_, T>> {
        let list = self.list;
        let chain = list.read();
        Cursor::at(list, Scope::View(&mut self.window), &chain, at)
    }

    /// A cursor at the first element of the view.
    pub fn cursor_start(&mut self) -> Result<Cursor<'_, T>> {
        self.cursor(0)
    }
}

impl<T: fmt::Debug> fmt::Debug for SubList<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chain = self.list.read();
        let mut f = f.debug_struct("SubList");
        f.field("start", &self.window.start)
            .field("len", &self.window.len)
            .field("version", &self.window.version);
        if self.window.check(&chain).is_ok() {
            let elements: Vec<&T> = self
                .window
                .keys(&chain)
                .map(|key| chain.element(key))
                .collect();
            f.field("elements", &elements);
        }
        f.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, List};

    fn letters() -> List<char> {
        List::from_iter(['A', 'B', 'C', 'D', 'E'])
    }

    #[test]
    fn sub_list_aliases_parent() {
        let list = letters();
        let mut view = list.sub_list(1..4).unwrap();
        assert_eq!(view.len(), Ok(3));
        assert_eq!(view.get(0), Ok('B'));
        assert_eq!(view.get(2), Ok('D'));
        assert_eq!(view.front(), Ok(Some('B')));
        assert_eq!(view.back(), Ok(Some('D')));

        assert_eq!(view.remove(0), Ok('B'));
        assert_eq!(list.to_vec(), vec!['A', 'C', 'D', 'E']);
        assert_eq!(view.to_vec(), Ok(vec!['C', 'D']));
        list.read().assert_well_formed();
    }

    #[test]
    fn sub_list_writes() {
        let list = letters();
        let mut view = list.sub_list(1..3).unwrap();

        assert_eq!(view.set(1, 'c'), Ok('C'));
        assert_eq!(list.get(2), Ok('c'));

        view.insert(0, 'x').unwrap();
        assert_eq!(view.push_back('y'), Ok(3));
        assert_eq!(view.to_vec(), Ok(vec!['x', 'B', 'c', 'y']));
        assert_eq!(list.to_vec(), vec!['A', 'x', 'B', 'c', 'y', 'D', 'E']);

        assert_eq!(view.remove(3), Ok('y'));
        assert_eq!(view.back(), Ok(Some('c')));
        assert_eq!(view.remove_item(&'B'), Ok(true));
        assert_eq!(view.remove_item(&'E'), Ok(false));
        assert_eq!(view.index_of(&'c'), Ok(Some(1)));
        assert!(!view.contains(&'A').unwrap());
        assert_eq!(list.to_vec(), vec!['A', 'x', 'c', 'D', 'E']);
        list.read().assert_well_formed();
    }

    #[test]
    fn sub_list_bounds() {
        let list = letters();
        assert_eq!(
            list.sub_list(3..2).err(),
            Some(Error::InvalidRange {
                start: 3,
                end: 2,
                len: 5
            })
        );
        assert!(list.sub_list(0..6).is_err());

        let mut view = list.sub_list(1..3).unwrap();
        assert_eq!(view.get(2), Err(Error::OutOfRange { index: 2, len: 2 }));
        assert_eq!(view.insert(3, 'z'), Err(Error::OutOfRange { index: 3, len: 2 }));
        assert_eq!(view.remove(usize::MAX).err(), Some(Error::OutOfRange {
            index: usize::MAX,
            len: 2
        }));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn sub_list_empty_and_refill() {
        let list = letters();
        let mut view = list.sub_list(1..3).unwrap();
        view.clear().unwrap();
        assert_eq!(view.is_empty(), Ok(true));
        assert_eq!(view.front(), Ok(None));
        assert_eq!(list.to_vec(), vec!['A', 'D', 'E']);

        view.push_back('z').unwrap();
        view.insert(0, 'y').unwrap();
        assert_eq!(view.to_vec(), Ok(vec!['y', 'z']));
        assert_eq!(list.to_vec(), vec!['A', 'y', 'z', 'D', 'E']);

        let mut tail_view = list.sub_list(5..5).unwrap();
        tail_view.push_back('F').unwrap();
        assert_eq!(list.back(), Some('F'));
        list.read().assert_well_formed();
    }

    #[test]
    fn sub_list_goes_stale() {
        let list = letters();
        let view = list.sub_list(0..2).unwrap();
        let mut other = list.sub_list(2..4).unwrap();

        // Content changes keep views valid.
        list.set(0, 'a').unwrap();
        assert_eq!(view.get(0), Ok('a'));

        other.remove(0).unwrap();
        for result in [view.len().err(), view.get(0).err(), view.check().err()] {
            assert!(matches!(
                result,
                Some(Error::ConcurrentModification { .. })
            ));
        }
        assert!(other.check().is_ok());

        let mut stale = list.sub_list(0..1).unwrap();
        list.clear();
        assert!(stale.push_back('q').is_err());
        assert!(stale.cursor_start().is_err());
        assert!(list.is_empty());
    }

    #[test]
    fn sub_list_iter() {
        let list = List::with_circular(true);
        list.add_all(0..8);
        let view = list.sub_list(5..8).unwrap();
        let forward: Result<Vec<_>, _> = view.iter().collect();
        assert_eq!(forward, Ok(vec![5, 6, 7]));
        let backward: Result<Vec<_>, _> = view.iter().rev().collect();
        assert_eq!(backward, Ok(vec![7, 6, 5]));
    }

    #[test]
    fn sub_list_circular_edges() {
        let list = List::with_circular(true);
        list.add_all(0..4);
        let mut view = list.sub_list(2..4).unwrap();
        view.push_back(4).unwrap();
        assert_eq!(view.remove(0), Ok(2));
        assert_eq!(list.to_vec(), vec![0, 1, 3, 4]);
        list.read().assert_well_formed();

        let mut head_view = list.sub_list(0..1).unwrap();
        assert_eq!(head_view.remove(0), Ok(0));
        head_view.insert(0, 7).unwrap();
        assert_eq!(list.to_vec(), vec![7, 1, 3, 4]);
        list.read().assert_well_formed();
    }
}
