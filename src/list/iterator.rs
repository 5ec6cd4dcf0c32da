use crate::error::Result;
use crate::list::chain::Chain;
use crate::list::sublist::Window;
use crate::list::List;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

/// A fail-fast iterator over the elements of a [`List`] or a
/// [`SubList`](crate::SubList).
///
/// It uses the run `front..=back` of `len` nodes, shrinking it from either
/// end. Each step clones one element under a short read lock, so the list
/// stays free to be edited between steps. If the list is structurally
/// modified meanwhile, the iterator yields a single
/// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification)
/// and then ends.
///
/// # Examples
///
/// ```
/// use linked_seq::List;
///
/// let list = List::from_iter([1, 2, 3]);
/// let mut iter = list.iter();
/// assert_eq!(iter.next(), Some(Ok(1)));
/// assert_eq!(iter.next_back(), Some(Ok(3)));
///
/// list.push_back(4);
/// assert!(iter.next().unwrap().is_err());
/// assert_eq!(iter.next(), None);
/// ```
#[derive(Clone)]
pub struct Iter<'a, T> {
    list: &'a List<T>,
    window: Window,
    stale: bool,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>, window: Window) -> Self {
        Self {
            list,
            window,
            stale: false,
        }
    }

    /// Check the list version and take one element off the run, from the
    /// front or the back.
    fn step(&mut self, from_back: bool) -> Option<Result<T>>
    where
        T: Clone,
    {
        if self.stale || self.window.len == 0 {
            return None;
        }
        let list = self.list;
        let chain = list.read();
        if let Err(err) = self.window.check(&chain) {
            self.stale = true;
            return Some(Err(err));
        }
        let key = match from_back {
            false => self.window.front?,
            true => self.window.back?,
        };
        self.window.len -= 1;
        if self.window.len == 0 {
            self.window.front = None;
            self.window.back = None;
        } else if from_back {
            self.window.back = chain.predecessor(key);
        } else {
            self.window.front = chain.successor(key);
            self.window.start += 1;
        }
        Some(Ok(chain.element(key).clone()))
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("len", &self.window.len)
            .field("version", &self.window.version)
            .field("stale", &self.stale)
            .finish()
    }
}

impl<'a, T: Clone> Iterator for Iter<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step(false)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.stale {
            true => (0, Some(0)),
            false => (self.window.len.min(1), Some(self.window.len)),
        }
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<'a, T: Clone> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.step(true)
    }
}

impl<'a, T: Clone> FusedIterator for Iter<'a, T> {}

/// An endless iterator for circular lists, following the raw `next` links.
///
/// On a circular list it wraps from the tail back to the head and never
/// ends (unless the list is empty). On a linear list it stops after the
/// tail. Like [`Iter`], it is fail-fast.
///
/// # Examples
///
/// ```
/// use linked_seq::List;
///
/// let list = List::with_circular(true);
/// list.add_all(['a', 'b', 'c']);
/// let seen: Vec<char> = list.cycle().take(7).map(Result::unwrap).collect();
/// assert_eq!(seen, vec!['a', 'b', 'c', 'a', 'b', 'c', 'a']);
/// ```
#[derive(Clone)]
pub struct Cycle<'a, T> {
    list: &'a List<T>,
    window: Window,
    current: Option<usize>,
    stale: bool,
}

impl<'a, T> Cycle<'a, T> {
    pub(crate) fn new(list: &'a List<T>, window: Window) -> Self {
        let current = window.front;
        Self {
            list,
            window,
            current,
            stale: false,
        }
    }
}

impl<T> fmt::Debug for Cycle<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cycle")
            .field("version", &self.window.version)
            .field("stale", &self.stale)
            .finish_non_exhaustive()
    }
}

impl<'a, T: Clone> Iterator for Cycle<'a, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.stale {
            return None;
        }
        let key = self.current?;
        let list = self.list;
        let chain = list.read();
        if let Err(err) = self.window.check(&chain) {
            self.stale = true;
            return Some(Err(err));
        }
        self.current = chain.next_link(key);
        Some(Ok(chain.element(key).clone()))
    }
}

impl<'a, T: Clone> FusedIterator for Cycle<'a, T> {}

/// An owning iterator over the elements of a [`List`].
///
/// This `struct` is created by the [`into_iter`] method on [`List`]
/// (provided by the `IntoIterator` trait). See its documentation for more.
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    chain: Chain<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter")
            .field(&self.chain.elements().collect::<Vec<_>>())
            .finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.chain.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.chain.len();
        (len, Some(len))
    }

    fn last(mut self) -> Option<Self::Item>
    where
        Self: Sized,
    {
        self.next_back()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.chain.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            chain: self.into_chain(),
        }
    }
}

impl<'a, T: Clone> IntoIterator for &'a List<T> {
    type Item = Result<T>;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

/// Extending through `&mut List` needs no locking.
impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let chain = self.get_mut();
        iter.into_iter().for_each(|item| {
            chain.attach_before(None, item);
        });
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, List};
    use std::fmt::Debug;
    use std::iter::FromIterator;

    #[test]
    fn test_iter() {
        fn test_iter<T, I>(input: I, mid: usize, circular: bool)
        where
            T: Eq + Debug + Clone,
            I: IntoIterator<Item = T>,
        {
            let vec = Vec::from_iter(input);
            let list = List::with_circular(circular);
            list.add_all(vec.clone());
            let len = vec.len();

            let mut iter = list.iter();
            for (i, item) in vec.iter().enumerate() {
                assert_eq!(iter.size_hint().1, Some(len - i));
                assert_eq!(iter.next(), Some(Ok(item.clone())));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = list.iter();
            for item in vec.iter().take(mid) {
                assert_eq!(iter.next(), Some(Ok(item.clone())));
            }
            let mut iter = iter.rev();
            for item in vec.iter().skip(mid).rev() {
                assert_eq!(iter.next(), Some(Ok(item.clone())));
            }
            assert_eq!(iter.next(), None);
            assert_eq!(iter.next_back(), None);

            let mut iter = list.iter().rev();
            for item in vec.iter().rev().take(mid) {
                assert_eq!(iter.next(), Some(Ok(item.clone())));
            }
            let rest: Vec<T> = iter.rev().map(Result::unwrap).collect();
            assert_eq!(rest[..], vec[..len - mid.min(len)]);
        }

        for circular in [false, true] {
            for (len, mid) in [(10, 10), (10, 8), (10, 5), (10, 0), (2, 1), (1, 1), (0, 0)] {
                test_iter(0..len, mid, circular);
            }
        }
    }

    #[test]
    fn iter_is_fail_fast() {
        let list = List::from_iter([1, 2, 3]);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(Ok(1)));

        list.set(1, 5).unwrap();
        assert_eq!(iter.next(), Some(Ok(5)));

        list.pop_front();
        assert!(matches!(
            iter.next(),
            Some(Err(Error::ConcurrentModification { .. }))
        ));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.size_hint(), (0, Some(0)));

        let results: Vec<_> = (&list).into_iter().collect();
        assert_eq!(results, vec![Ok(5), Ok(3)]);
    }

    #[test]
    fn cycle_wraps() {
        let list = List::with_circular(true);
        list.add_all(0..4);
        let len = list.len();
        for k in 0..len {
            let direct = list.cycle().nth(k);
            let wrapped = list.cycle().nth(len + k);
            assert_eq!(direct, wrapped);
            assert_eq!(direct, Some(Ok(k as i32)));
        }

        let linear = List::from_iter(0..4);
        assert_eq!(linear.cycle().count(), 4);

        let empty: List<i32> = List::with_circular(true);
        assert_eq!(empty.cycle().next(), None);

        let mut cycle = list.cycle();
        cycle.next();
        list.clear();
        assert!(cycle.next().unwrap().is_err());
        assert_eq!(cycle.next(), None);
    }

    #[test]
    fn into_iter_and_extend() {
        let mut list = List::with_circular(true);
        list.extend([1, 2]);
        list.extend(&[3, 4]);
        list.read().assert_well_formed();

        let mut iter = list.clone().into_iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3]);

        assert_eq!(list.into_iter().rev().collect::<Vec<_>>(), vec![4, 3, 2, 1]);
    }
}
