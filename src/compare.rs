//! Character comparison strategies.
//!
//! Every match a [`RadixTree`](crate::RadixTree) performs goes through a
//! [`CharCompare`] value chosen at construction time. Swapping the strategy
//! changes how keys collide without touching the tree algorithms.

use core::cmp::Ordering;

/// Equality and ordering over a key's character type.
///
/// Implementations must be consistent: `equals(a, b)` must hold exactly when
/// neither `less(a, b)` nor `less(b, a)` does. The tree keeps each node's
/// children sorted with [`less`](CharCompare::less) and matches key segments
/// with [`equals`](CharCompare::equals), so an inconsistent pair can produce
/// a tree that fails [`RadixTree::validate`](crate::RadixTree::validate).
pub trait CharCompare<C> {
    /// Returns true if `lhs` and `rhs` are the same character under this strategy.
    fn equals(&self, lhs: C, rhs: C) -> bool;

    /// Returns true if `lhs` sorts strictly before `rhs` under this strategy.
    fn less(&self, lhs: C, rhs: C) -> bool;

    /// Three-way comparison derived from [`less`](CharCompare::less).
    fn compare(&self, lhs: C, rhs: C) -> Ordering
    where
        C: Copy,
    {
        if self.less(lhs, rhs) {
            Ordering::Less
        } else if self.less(rhs, lhs) {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

/// Character types that can be folded to a single case.
pub trait FoldCase: Copy + Ord {
    /// Returns the upper-case image of `self`, or `self` when no
    /// single-character mapping exists.
    #[must_use]
    fn fold_case(self) -> Self;
}

impl FoldCase for u8 {
    #[inline]
    fn fold_case(self) -> Self {
        self.to_ascii_uppercase()
    }
}

impl FoldCase for u16 {
    #[inline]
    fn fold_case(self) -> Self {
        match u8::try_from(self) {
            Ok(byte) => u16::from(byte.to_ascii_uppercase()),
            Err(_) => self,
        }
    }
}

impl FoldCase for char {
    #[inline]
    fn fold_case(self) -> Self {
        if self.is_ascii() {
            return self.to_ascii_uppercase();
        }
        // 'ß' upper-cases to "SS"; such characters only match themselves.
        let mut upper = self.to_uppercase();
        match (upper.next(), upper.next()) {
            (Some(single), None) => single,
            _ => self,
        }
    }
}

/// Case-insensitive comparison, the default strategy.
///
/// Characters are compared by their [`FoldCase`] images: ASCII upper-casing for
/// `u8` and `u16`, the simple Unicode upper-case mapping for `char`.
///
/// # Examples
///
/// ```
/// use radix_index::{CaseInsensitive, CharCompare};
///
/// assert!(CaseInsensitive.equals(b'a', b'A'));
/// assert!(CaseInsensitive.less('a', 'B'));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct CaseInsensitive;

impl<C: FoldCase> CharCompare<C> for CaseInsensitive {
    #[inline]
    fn equals(&self, lhs: C, rhs: C) -> bool {
        lhs.fold_case() == rhs.fold_case()
    }

    #[inline]
    fn less(&self, lhs: C, rhs: C) -> bool {
        lhs.fold_case() < rhs.fold_case()
    }
}

/// Exact comparison using the character type's own [`Ord`].
///
/// # Examples
///
/// ```
/// use radix_index::{CharCompare, Exact};
///
/// assert!(!Exact.equals(b'a', b'A'));
/// assert!(Exact.less(b'A', b'a'));
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Exact;

impl<C: Ord> CharCompare<C> for Exact {
    #[inline]
    fn equals(&self, lhs: C, rhs: C) -> bool {
        lhs == rhs
    }

    #[inline]
    fn less(&self, lhs: C, rhs: C) -> bool {
        lhs < rhs
    }
}

/// A strategy built from an arbitrary `(equals, less)` function pair.
///
/// # Examples
///
/// ```
/// use radix_index::{CharCompare, FnCompare};
///
/// // Digits compare equal to each other and sort before everything else.
/// let digits = FnCompare::new(
///     |a: u8, b: u8| (a.is_ascii_digit() && b.is_ascii_digit()) || a == b,
///     |a: u8, b: u8| {
///         let rank = |c: u8| if c.is_ascii_digit() { 0 } else { u16::from(c) + 1 };
///         rank(a) < rank(b)
///     },
/// );
/// assert!(digits.equals(b'1', b'7'));
/// assert!(digits.less(b'9', b'a'));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnCompare<E, L> {
    equals: E,
    less: L,
}

impl<E, L> FnCompare<E, L> {
    /// Wraps an equality function and a strict ordering function.
    pub const fn new(equals: E, less: L) -> Self {
        Self { equals, less }
    }
}

impl<C, E, L> CharCompare<C> for FnCompare<E, L>
where
    E: Fn(C, C) -> bool,
    L: Fn(C, C) -> bool,
{
    #[inline]
    fn equals(&self, lhs: C, rhs: C) -> bool {
        (self.equals)(lhs, rhs)
    }

    #[inline]
    fn less(&self, lhs: C, rhs: C) -> bool {
        (self.less)(lhs, rhs)
    }
}

/// Length of the longest common prefix of `lhs` and `rhs` under `compare`.
#[inline]
pub(crate) fn common_prefix_len<C, S>(lhs: &[C], rhs: &[C], compare: &S) -> usize
where
    C: Copy,
    S: CharCompare<C>,
{
    lhs.iter().zip(rhs).take_while(|&(&l, &r)| compare.equals(l, r)).count()
}

/// Returns true if `prefix` is a prefix of `haystack` under `compare`.
#[inline]
pub(crate) fn starts_with<C, S>(haystack: &[C], prefix: &[C], compare: &S) -> bool
where
    C: Copy,
    S: CharCompare<C>,
{
    prefix.len() <= haystack.len() && common_prefix_len(haystack, prefix, compare) == prefix.len()
}
