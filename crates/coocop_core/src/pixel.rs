//! Element types an [`Image`](crate::Image) can hold.

use std::fmt::Debug;

/// A scalar image element.
///
/// Besides being cheap to copy, an element only needs to know how to average
/// itself with another element, which is what SamplePairing blends with.
pub trait Pixel: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Arithmetic mean of two elements.
    ///
    /// Integer types widen before adding and round toward negative infinity.
    fn mean(a: Self, b: Self) -> Self;
}

macro_rules! impl_float_pixel {
    ($($t:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn mean(a: Self, b: Self) -> Self {
                    a / 2.0 + b / 2.0
                }
            }
        )*
    };
}

macro_rules! impl_int_pixel {
    ($($t:ty => $wide:ty),*) => {
        $(
            impl Pixel for $t {
                #[inline]
                fn mean(a: Self, b: Self) -> Self {
                    // the mean of two values always fits back into the narrow type
                    (<$wide>::from(a) + <$wide>::from(b)).div_euclid(2) as $t
                }
            }
        )*
    };
}

impl_float_pixel!(f32, f64);
impl_int_pixel!(u8 => u16, u16 => u32, u32 => u64, i8 => i16, i16 => i32, i32 => i64, i64 => i128);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_mean() {
        assert_eq!(f32::mean(2.0, 4.0), 3.0);
        assert_eq!(f64::mean(-1.0, 2.0), 0.5);
    }

    #[test]
    fn test_float_mean_does_not_overflow() {
        assert_eq!(f32::mean(f32::MAX, f32::MAX), f32::MAX);
        assert_eq!(f64::mean(f64::MIN, f64::MIN), f64::MIN);
    }

    #[test]
    fn test_int_mean_does_not_overflow() {
        assert_eq!(u8::mean(255, 255), 255);
        assert_eq!(u8::mean(2, 4), 3);
        assert_eq!(i32::mean(i32::MAX, i32::MAX), i32::MAX);
    }

    #[test]
    fn test_int_mean_rounds_down() {
        assert_eq!(u8::mean(1, 2), 1);
        assert_eq!(i16::mean(-1, -2), -2);
    }
}
