use crate::error::{Error, Result};
use crate::list::chain::Chain;
use crate::list::sublist::Window;
use crate::list::List;
use std::fmt;
use std::ops::{Deref, DerefMut};

/// The run a cursor moves over: the whole list, or a view whose bounds must
/// follow the cursor's own edits.
pub(crate) enum Scope<'a> {
    Whole(Window),
    View(&'a mut Window),
}

impl Deref for Scope<'_> {
    type Target = Window;

    fn deref(&self) -> &Window {
        match self {
            Scope::Whole(window) => window,
            Scope::View(window) => window,
        }
    }
}

impl DerefMut for Scope<'_> {
    fn deref_mut(&mut self) -> &mut Window {
        match self {
            Scope::Whole(window) => window,
            Scope::View(window) => window,
        }
    }
}

/// A bidirectional cursor over a [`List`] or a [`SubList`](crate::SubList)
/// that can edit the list as it goes.
///
/// In a run of length *n*, there are *n* + 1 valid positions for the cursor,
/// indexed by 0, 1, ..., *n*. The cursor sits between two elements: `next`
/// yields the one after it and `previous` the one before it.
///
/// The cursor captures the list's version when it is created. Edits made
/// through the cursor keep it valid; any other structural change to the list
/// makes every further step or edit fail with
/// [`Error::ConcurrentModification`].
///
/// # Examples
///
/// The position of the cursor is denoted by `|`.
/// ```
/// use linked_seq::{Error, List};
///
/// // [|A B C D]
/// let list = List::from_iter(['A', 'B', 'C', 'D']);
/// let mut cursor = list.cursor_start();
/// assert_eq!(cursor.peek_next(), Ok(Some('A')));
///
/// // [A B|C D]
/// assert_eq!(cursor.next(), Ok('A'));
/// assert_eq!(cursor.next(), Ok('B'));
/// assert_eq!(cursor.next_index(), 2);
///
/// // [A B x|C D]
/// cursor.insert('x').unwrap();
/// assert_eq!(cursor.previous(), Ok('x'));
///
/// // [A B|C D]
/// assert_eq!(cursor.remove(), Ok('x'));
/// assert_eq!(list.to_vec(), vec!['A', 'B', 'C', 'D']);
///
/// // [A B C D|]
/// cursor.move_to_end().unwrap();
/// assert_eq!(cursor.next(), Err(Error::NoSuchElement));
/// ```
pub struct Cursor<'a, T> {
    list: &'a List<T>,
    window: Scope<'a>,
    index: usize,
    /// Key of the element at `index`, `None` at the end of the run.
    next: Option<usize>,
    /// Key and index of the element last returned by a step.
    last: Option<(usize, usize)>,
}

// Private methods
impl<'a, T> Cursor<'a, T> {
    /// `next` must be the key of the element at `index` of `window`.
    pub(crate) fn new(
        list: &'a List<T>,
        window: Scope<'a>,
        index: usize,
        next: Option<usize>,
    ) -> Self {
        Self {
            list,
            window,
            index,
            next,
            last: None,
        }
    }

    pub(crate) fn at(
        list: &'a List<T>,
        window: Scope<'a>,
        chain: &Chain<T>,
        at: usize,
    ) -> Result<Self> {
        window.check(chain)?;
        if at > window.len {
            return Err(Error::OutOfRange {
                index: at,
                len: window.len,
            });
        }
        let next = match at < window.len {
            true => Some(window.key_at(chain, at)?),
            false => None,
        };
        Ok(Self::new(list, window, at, next))
    }

    fn previous_key(&self, chain: &Chain<T>) -> Option<usize> {
        if self.index == 0 {
            return None;
        }
        match self.next {
            Some(next) => chain.predecessor(next),
            None => self.window.back,
        }
    }

    fn successor_key(&self, chain: &Chain<T>, key: usize, index: usize) -> Option<usize> {
        match index + 1 < self.window.len {
            true => chain.successor(key),
            false => None,
        }
    }
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the position of the cursor, which is also the index of the
    /// element `next` would return.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Returns the index of the element `previous` would return, or `None`
    /// at the start.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Returns the length of the run the cursor moves over, as of its last
    /// check against the list.
    #[inline]
    pub fn len(&self) -> usize {
        self.window.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.window.len == 0
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.index < self.window.len
    }

    #[inline]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Returns `Ok(())` if no one else changed the list's structure since
    /// the cursor was created or last edited it.
    pub fn check(&self) -> Result<()> {
        self.window.check(&self.list.read())
    }

    /// Return the next element and move the cursor past it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor_start();
    /// assert_eq!(cursor.next(), Ok(1));
    /// assert_eq!(cursor.next(), Ok(2));
    /// assert_eq!(cursor.next(), Err(Error::NoSuchElement));
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<T>
    where
        T: Clone,
    {
        let list = self.list;
        let chain = list.read();
        self.window.check(&chain)?;
        let key = self.next.ok_or(Error::NoSuchElement)?;
        let element = chain.element(key).clone();
        self.last = Some((key, self.index));
        self.next = self.successor_key(&chain, key, self.index);
        self.index += 1;
        Ok(element)
    }

    /// Return the previous element and move the cursor before it.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2]);
    /// let mut cursor = list.cursor_end();
    /// assert_eq!(cursor.previous(), Ok(2));
    /// assert_eq!(cursor.previous(), Ok(1));
    /// assert_eq!(cursor.previous(), Err(Error::NoSuchElement));
    /// ```
    pub fn previous(&mut self) -> Result<T>
    where
        T: Clone,
    {
        let list = self.list;
        let chain = list.read();
        self.window.check(&chain)?;
        let key = self.previous_key(&chain).ok_or(Error::NoSuchElement)?;
        self.index -= 1;
        self.next = Some(key);
        self.last = Some((key, self.index));
        Ok(chain.element(key).clone())
    }

    /// Return the element `next` would return, without moving.
    pub fn peek_next(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self.next.map(|key| chain.element(key).clone()))
    }

    /// Return the element `previous` would return, without moving.
    pub fn peek_previous(&self) -> Result<Option<T>>
    where
        T: Clone,
    {
        let chain = self.list.read();
        self.window.check(&chain)?;
        Ok(self.previous_key(&chain).map(|key| chain.element(key).clone()))
    }

    /// Move the cursor to position `target` (`target <= len`).
    ///
    /// Seeking forgets the last returned element. If an error occurs, the
    /// cursor stays put.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2, 3]);
    /// let mut cursor = list.cursor_start();
    ///
    /// assert!(cursor.seek_to(2).is_ok());
    /// assert_eq!(cursor.peek_next(), Ok(Some(3)));
    ///
    /// assert_eq!(cursor.seek_to(4), Err(Error::OutOfRange { index: 4, len: 3 }));
    /// assert_eq!(cursor.next_index(), 2);
    /// ```
    pub fn seek_to(&mut self, target: usize) -> Result<()> {
        let list = self.list;
        let chain = list.read();
        self.window.check(&chain)?;
        if target > self.window.len {
            return Err(Error::OutOfRange {
                index: target,
                len: self.window.len,
            });
        }
        self.next = match target < self.window.len {
            true => Some(self.window.key_at(&chain, target)?),
            false => None,
        };
        self.index = target;
        self.last = None;
        Ok(())
    }

    /// Move the cursor forward by `steps`, stopping with an error instead of
    /// passing the end.
    pub fn seek_forward(&mut self, steps: usize) -> Result<()> {
        let target = self
            .index
            .checked_add(steps)
            .ok_or(Error::OutOfRange {
                index: usize::MAX,
                len: self.window.len,
            })?;
        self.seek_to(target)
    }

    /// Move the cursor backward by `steps`, stopping with an error instead of
    /// passing the start.
    pub fn seek_backward(&mut self, steps: usize) -> Result<()> {
        let target = self.index.checked_sub(steps).ok_or(Error::NoSuchElement)?;
        self.seek_to(target)
    }

    pub fn move_to_start(&mut self) -> Result<()> {
        self.seek_to(0)
    }

    pub fn move_to_end(&mut self) -> Result<()> {
        let len = self.window.len;
        self.seek_to(len)
    }

    /// Insert `item` right before the element `next` would return, or at the
    /// end of the run if there is none.
    ///
    /// The cursor ends up after the new element: `next` is unaffected and
    /// `previous` returns `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 3]);
    /// let mut cursor = list.cursor(1).unwrap();
    /// cursor.insert(2).unwrap();
    /// assert_eq!(cursor.next(), Ok(3));
    /// cursor.insert(4).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4]);
    /// ```
    pub fn insert(&mut self, item: T) -> Result<()> {
        let list = self.list;
        let mut chain = list.write();
        self.window.check(&chain)?;
        let anchor = match self.next {
            Some(key) => Some(key),
            None => self.window.anchor(&chain, self.index)?,
        };
        self.window.link_before(&mut chain, anchor, self.index, item);
        self.index += 1;
        self.last = None;
        Ok(())
    }

    /// Replace the element last returned by `next` or `previous`, returning
    /// the old one.
    ///
    /// Replacing is not a structural change, so other cursors and views stay
    /// valid.
    pub fn set(&mut self, item: T) -> Result<T> {
        let mut chain = self.list.write();
        self.window.check(&chain)?;
        let (key, _) = self.last.ok_or(Error::NoCurrentElement)?;
        Ok(chain.replace(key, item))
    }

    /// Remove the element last returned by `next` or `previous`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::{Error, List};
    ///
    /// let list = List::from_iter([1, 2, 3, 4]);
    /// let mut cursor = list.cursor_start();
    /// while let Ok(x) = cursor.next() {
    ///     if x % 2 == 0 {
    ///         cursor.remove().unwrap();
    ///     }
    /// }
    /// assert_eq!(cursor.remove(), Err(Error::NoCurrentElement));
    /// assert_eq!(list.to_vec(), vec![1, 3]);
    /// ```
    pub fn remove(&mut self) -> Result<T> {
        let list = self.list;
        let mut chain = list.write();
        self.window.check(&chain)?;
        let (key, at) = self.last.take().ok_or(Error::NoCurrentElement)?;
        let (element, after) = self.window.unlink(&mut chain, key, at);
        if self.next == Some(key) {
            self.next = after;
        }
        if at < self.index {
            self.index -= 1;
        }
        Ok(element)
    }
}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("len", &self.window.len)
            .field("version", &self.window.version)
            .finish_non_exhaustive()
    }
}
