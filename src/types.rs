use std::fmt::Debug;

/// Index of a location in a graph, always in `0..vertex_count`.
pub type Vertex = usize;

/// Travel time in seconds.
pub type Seconds = u64;

/// Edge cost usable by the tour search.
///
/// Implementors must be totally ordered over their admissible values so that
/// candidate sorting and bound comparisons are meaningful.
pub trait Weight: Copy + PartialOrd + Debug + Send + Sync + 'static {
    const ZERO: Self;

    /// Returns `true` if the value may be stored as an edge weight
    /// (non-negative, and finite for floating point types).
    fn is_admissible(self) -> bool;

    /// Adds two weights, returning `None` if the sum is not representable.
    fn checked_sum(self, other: Self) -> Option<Self>;

    /// Lossy conversion for reporting.
    fn as_f64(self) -> f64;
}

macro_rules! unsigned_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;

            #[inline(always)]
            fn is_admissible(self) -> bool {
                true
            }

            #[inline(always)]
            fn checked_sum(self, other: Self) -> Option<Self> {
                self.checked_add(other)
            }

            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! signed_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;

            #[inline(always)]
            fn is_admissible(self) -> bool {
                self >= 0
            }

            #[inline(always)]
            fn checked_sum(self, other: Self) -> Option<Self> {
                self.checked_add(other)
            }

            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

macro_rules! float_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0.0;

            #[inline(always)]
            fn is_admissible(self) -> bool {
                self.is_finite() && self >= 0.0
            }

            #[inline(always)]
            fn checked_sum(self, other: Self) -> Option<Self> {
                let sum = self + other;
                sum.is_finite().then_some(sum)
            }

            #[inline(always)]
            fn as_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

unsigned_weight!(u8, u16, u32, u64, usize);
signed_weight!(i8, i16, i32, i64, isize);
float_weight!(f32, f64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admissibility() {
        assert!(0u32.is_admissible());
        assert!(5i32.is_admissible());
        assert!(!(-1i64).is_admissible());
        assert!(2.5f64.is_admissible());
        assert!(!(-0.5f32).is_admissible());
        assert!(!f64::NAN.is_admissible());
        assert!(!f64::INFINITY.is_admissible());
    }

    #[test]
    fn checked_sum_detects_overflow() {
        assert_eq!(200u8.checked_sum(55), Some(255));
        assert_eq!(200u8.checked_sum(56), None);
        assert_eq!(f32::MAX.checked_sum(f32::MAX), None);
        assert_eq!(1.5f64.checked_sum(2.0), Some(3.5));
    }
}
