//! This crate provides an ordered doubly-linked sequence whose nodes live in a
//! slot arena, with an optional circular mode, live sub-range views and
//! fail-fast cursors.
//!
//! The [`List`] allows inserting, removing elements at any known position in
//! constant time. In compromise, accessing or mutating elements by index takes
//! *O*(*n*) time, walking from whichever end is nearer.
//!
//! Here is a quick example showing how the list works.
//!
//! ```
//! use linked_seq::List;
//!
//! let list = List::from_iter([1, 2, 3, 4]);
//!
//! let mut cursor = list.cursor_start();
//!
//! cursor.insert(0).unwrap(); // insert 0 at the beginning of the list
//! assert_eq!(cursor.peek_next(), Ok(Some(1)));
//! assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
//!
//! cursor.seek_to(3).unwrap(); // move the cursor to position 3, and remove it.
//! assert_eq!(cursor.next(), Ok(3));
//! assert_eq!(cursor.remove(), Ok(3));
//! assert_eq!(list.to_vec(), vec![0, 1, 2, 4]);
//! ```
//!
//! # Memory Layout
//!
//! The nodes are stored in a [`slab`] arena and refer to each other by slot
//! key, never by pointer:
//! ```text
//!        head                                               tail
//!    ╔═══════════╗        ╔═══════════╗                ╔═══════════╗
//!    ║ next: 4   ║ ─────→ ║ next: 0   ║ ─────→ ┄┄ ───→ ║ next: -   ║ ┄┐
//!    ╟───────────╢        ╟───────────╢                ╟───────────╢  ┊
//!  ┌┄║ prev: -   ║ ←───── ║ prev: 2   ║ ←───── ┄┄ ←─── ║ prev: 7   ║  ┊
//!  ┊ ╟───────────╢        ╟───────────╢                ╟───────────╢  ┊
//!  ┊ ║ payload T ║        ║ payload T ║                ║ payload T ║  ┊
//!  ┊ ╚═══════════╝        ╚═══════════╝                ╚═══════════╝  ┊
//!  ┊    slot 2               slot 4                       slot 5      ┊
//!  └┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄ circular mode only ┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┄┘
//! ```
//! A removed node gives its slot back to the arena, and the next insertion
//! reuses it. In circular mode the tail's `next` is the head and the head's
//! `prev` is the tail; every insertion and removal closes the loop again.
//!
//! The arena, its `head`/`tail` keys and a version stamp sit behind one
//! [`parking_lot::RwLock`], so a `List` can be shared between threads by
//! reference. Every structural change (insert, remove, clear) moves the
//! version; replacing an element with [`List::set`] does not.
//!
//! # Iteration
//!
//! [`Iter`] is a double-ended iterator yielding copies of the elements. It is
//! fail-fast: once the list is structurally modified behind its back, it
//! yields one [`Error::ConcurrentModification`] and ends. [`Cycle`] follows the
//! links instead of the length, so it wraps around a circular list forever.
//!
//! ## Examples
//!
//! ```
//! use linked_seq::List;
//!
//! let list = List::with_circular(true);
//! list.add_all([1, 2, 3]);
//!
//! let mut iter = list.iter();
//! assert_eq!(iter.next(), Some(Ok(1)));
//! assert_eq!(iter.next_back(), Some(Ok(3)));
//! assert_eq!(iter.next(), Some(Ok(2)));
//! assert_eq!(iter.next(), None); // Fused, even on a circular list
//!
//! let wrapped: Vec<i32> = list.cycle().skip(2).take(3).map(Result::unwrap).collect();
//! assert_eq!(wrapped, vec![3, 1, 2]);
//! ```
//!
//! # Views and Cursors
//!
//! [`List::sub_list`] makes a [`SubList`], a live view of a range of the list:
//! reads and writes go straight to the parent's nodes. A [`Cursor`] walks the
//! list or a view in both directions and edits it at its position.
//!
//! Views and cursors remember the version they last saw. Their own edits keep
//! them valid; any other structural change makes them fail with
//! [`Error::ConcurrentModification`] rather than walk links that moved.
//!
//! ## Examples
//!
//! ```
//! use linked_seq::{Error, List};
//!
//! let list = List::from_iter(['A', 'B', 'C', 'D', 'E']);
//! let mut view = list.sub_list(1..4).unwrap();
//!
//! let mut cursor = view.cursor_start().unwrap();
//! assert_eq!(cursor.next(), Ok('B'));
//! cursor.remove().unwrap();
//! drop(cursor);
//!
//! assert_eq!(view.to_vec(), Ok(vec!['C', 'D']));
//! assert_eq!(list.to_vec(), vec!['A', 'C', 'D', 'E']);
//!
//! let mut cursor = list.cursor_end();
//! list.pop_back();
//! assert!(matches!(cursor.previous(), Err(Error::ConcurrentModification { .. })));
//! assert!(view.get(0).is_err());
//! ```
//!
//! # Logging
//!
//! Structural changes emit `trace` events and stale views or cursors emit a
//! `debug` event through [`tracing`]. The crate installs no subscriber.

#[doc(inline)]
pub use error::{Error, Result};
#[doc(inline)]
pub use list::cursor::Cursor;
#[doc(inline)]
pub use list::iterator::{Cycle, IntoIter, Iter};
#[doc(inline)]
pub use list::sublist::SubList;
#[doc(inline)]
pub use list::{List, Options};

pub mod error;
pub mod list;
