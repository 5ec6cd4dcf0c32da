use crate::error::{Error, Result};
use crate::list::sublist::Window;
use crate::list::{List, Options};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::ptr;

/// Both lists are read-locked, lower address first.
impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let (this, other) = if (self as *const Self) < (other as *const Self) {
            let this = self.read();
            (this, other.read())
        } else {
            let other = other.read();
            (self.read(), other)
        };
        this.len() == other.len() && this.elements().eq(other.elements())
    }
}

impl<T: Eq> Eq for List<T> {}

/// Cloning keeps the circular flag. The clone starts with a fresh version.
impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        let chain = self.read();
        let mut list = List::with_options(Options {
            circular: chain.is_circular(),
            capacity: chain.len(),
        });
        list.extend(chain.elements().cloned());
        list
    }
}

impl<T: Hash> Hash for List<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let chain = self.read();
        chain.elements().for_each(|elt| elt.hash(state));
        chain.len().hash(state);
    }
}

impl<T> List<T> {
    /// Returns `true` if the `List` contains an element equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::new();
    ///
    /// list.push_back(0);
    /// list.push_back(1);
    /// list.push_back(2);
    ///
    /// assert_eq!(list.contains(&0), true);
    /// assert_eq!(list.contains(&10), false);
    /// ```
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(x).is_some()
    }

    /// Returns `true` if every item of `items` is in the list.
    pub fn contains_all(&self, items: &[T]) -> bool
    where
        T: PartialEq,
    {
        let chain = self.read();
        items.iter().all(|x| chain.elements().any(|e| e == x))
    }

    /// Returns the index of the first element equal to `x`, searching from
    /// the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([Some(1), None, Some(3), None]);
    /// assert_eq!(list.index_of(&None), Some(1));
    /// assert_eq!(list.last_index_of(&None), Some(3));
    /// assert_eq!(list.index_of(&Some(2)), None);
    /// ```
    pub fn index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let chain = self.read();
        chain
            .position(chain.head(), chain.len(), x)
            .map(|(index, _)| index)
    }

    /// Returns the index of the last element equal to `x`, searching from
    /// the back.
    pub fn last_index_of(&self, x: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        let chain = self.read();
        let len = chain.len();
        let found = chain
            .elements_rev()
            .position(|e| e == x)
            .map(|from_back| len - 1 - from_back);
        found
    }

    /// Append every item of `iter`, in order. Returns `true` if the list
    /// changed.
    ///
    /// The items are collected before the list is locked, so `iter` may
    /// read the list itself.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 2]);
    /// assert!(list.add_all(list.to_vec()));
    /// assert!(!list.add_all([]));
    /// assert_eq!(list.to_vec(), vec![1, 2, 1, 2]);
    /// ```
    pub fn add_all<I>(&self, iter: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = iter.into_iter().collect();
        let changed = !items.is_empty();
        let mut chain = self.write();
        for item in items {
            chain.attach_before(None, item);
        }
        changed
    }

    /// Insert every item of `iter` at `index` (`index <= len`), keeping
    /// their order. Nothing is inserted if `index` is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([1, 5]);
    /// list.insert_all(1, 2..5).unwrap();
    /// assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);
    /// assert!(list.insert_all(6, [0]).is_err());
    /// ```
    pub fn insert_all<I>(&self, index: usize, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = iter.into_iter().collect();
        let mut chain = self.write();
        let len = chain.len();
        if index > len {
            return Err(Error::OutOfRange { index, len });
        }
        let anchor = chain.search(index);
        for item in items {
            chain.attach_before(anchor, item);
        }
        Ok(())
    }

    /// Keep only the elements for which `keep` returns `true`, visiting them
    /// front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter(1..=6);
    /// list.retain(|x| x % 3 != 0);
    /// assert_eq!(list.to_vec(), vec![1, 2, 4, 5]);
    /// ```
    pub fn retain<F>(&self, keep: F)
    where
        F: FnMut(&T) -> bool,
    {
        let mut chain = self.write();
        Window::whole(&chain).retain(&mut chain, keep);
    }

    /// Remove every element that appears in `items`. Returns `true` if the
    /// list is non-empty afterwards.
    pub fn remove_all(&self, items: &[T]) -> bool
    where
        T: PartialEq,
    {
        let mut chain = self.write();
        Window::whole(&chain).retain(&mut chain, |e| !items.contains(e));
        chain.len() != 0
    }

    /// Remove every element that does not appear in `items`. Returns `true`
    /// if the list is non-empty afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter(['a', 'b', 'c', 'b']);
    /// assert!(list.retain_all(&['b', 'z']));
    /// assert_eq!(list.to_vec(), vec!['b', 'b']);
    /// assert!(!list.remove_all(&['b']));
    /// assert!(list.is_empty());
    /// ```
    pub fn retain_all(&self, items: &[T]) -> bool
    where
        T: PartialEq,
    {
        let mut chain = self.write();
        Window::whole(&chain).retain(&mut chain, |e| items.contains(e));
        chain.len() != 0
    }

    /// An order-sensitive hash of the elements: `h = 31 * h + hash(e)` over
    /// the whole list, seeded with 1 and wrapping on overflow.
    ///
    /// Each element is hashed with the standard library's `DefaultHasher`.
    /// Equal lists have equal hash codes.
    pub fn hash_code(&self) -> u64
    where
        T: Hash,
    {
        self.hash_code_by(|elt| {
            let mut hasher = DefaultHasher::new();
            elt.hash(&mut hasher);
            hasher.finish()
        })
    }

    /// Like [`hash_code`](List::hash_code), with a caller-supplied hash for
    /// each element.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_seq::List;
    ///
    /// let list = List::from_iter([Some(1), None, Some(3)]);
    /// let h = list.hash_code_by(|e| e.map_or(0, |x| x as u64));
    /// assert_eq!(h, 31 * (31 * (31 + 1)) + 3);
    /// ```
    pub fn hash_code_by<F>(&self, mut f: F) -> u64
    where
        F: FnMut(&T) -> u64,
    {
        self.read()
            .elements()
            .fold(1_u64, |h, elt| h.wrapping_mul(31).wrapping_add(f(elt)))
    }
}
