use std::cmp::Ordering;
use std::fmt;

mod private {
    pub trait Sealed {}
}

/// A scalar type with a strict total order that can be stored in a `Treap<T>`.
///
/// Implemented for the signed integers and for `f32` and `f64`. Floating-point keys are ordered by
/// IEEE 754 `totalOrder` (`total_cmp`), so `-0.0` sorts before `0.0` and every NaN has a fixed
/// position at either end of the order. Unsigned integers and non-scalar types are not supported.
///
/// This trait is sealed and cannot be implemented outside of this crate.
pub trait Key: private::Sealed + Copy + fmt::Debug + fmt::Display {
    /// Returns the ordering between `self` and `other`.
    fn compare(&self, other: &Self) -> Ordering;
}

macro_rules! impl_key_for_signed(
    ($($ty:ty),*) => (
        $(
            impl private::Sealed for $ty {}

            impl Key for $ty {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }
            }
        )*
    )
);

macro_rules! impl_key_for_float(
    ($($ty:ty),*) => (
        $(
            impl private::Sealed for $ty {}

            impl Key for $ty {
                #[inline]
                fn compare(&self, other: &Self) -> Ordering {
                    self.total_cmp(other)
                }
            }
        )*
    )
);

impl_key_for_signed!(i8, i16, i32, i64, i128, isize);
impl_key_for_float!(f32, f64);

#[cfg(test)]
mod tests {
    use super::Key;
    use std::cmp::Ordering;

    #[test]
    fn test_compare_signed() {
        assert_eq!((-3i32).compare(&2), Ordering::Less);
        assert_eq!(7i64.compare(&7), Ordering::Equal);
        assert_eq!(i8::max_value().compare(&i8::min_value()), Ordering::Greater);
    }

    #[test]
    fn test_compare_float() {
        assert_eq!(1.5f64.compare(&2.5), Ordering::Less);
        assert_eq!((-0.0f64).compare(&0.0), Ordering::Less);
        assert_eq!(std::f64::NAN.compare(&std::f64::INFINITY), Ordering::Greater);
        assert_eq!(std::f32::NAN.compare(&std::f32::NAN), Ordering::Equal);
    }
}
