//! Element trait for mapping Rust types to DType

use super::DType;
use bytemuck::{Pod, Zeroable};

/// Trait for types that can be elements of a tensor
///
/// This trait connects Rust's type system to axred's runtime dtype system.
/// It's implemented for all primitive numeric types plus the complex types.
///
/// # Ordering keys
///
/// Min/max reductions never compare elements directly; they compare the
/// [`ordering_key`](Element::ordering_key) projection. For real-valued
/// domains the key is the value itself (`Key = Self`), so integers compare
/// with their exact native ordering and floats compare under IEEE rules.
/// Complex numbers have no total order, so their key is the magnitude
/// (`Key = f64`), matching the convention used by numpy and libtorch.
///
/// Any key comparison with a NaN operand evaluates false; the reduction
/// kernels rely on this to propagate NaN (see `kernels::minmax`).
pub trait Element:
    Copy + Send + Sync + Pod + Zeroable + PartialEq + 'static
{
    /// The corresponding DType for this Rust type
    const DTYPE: DType;

    /// Real-valued projection used for min/max comparison
    type Key: Copy + PartialOrd;

    /// Compute the ordering key of this element
    fn ordering_key(self) -> Self::Key;

    /// True if this element is NaN (any NaN component for complex types;
    /// always false for integer types)
    fn is_nan(self) -> bool;

    /// Zero value
    fn zero() -> Self;
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;
    type Key = f64;

    #[inline]
    fn ordering_key(self) -> f64 {
        self
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;
    type Key = f32;

    #[inline]
    fn ordering_key(self) -> f32 {
        self
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }
}

// Integer elements share identical bodies; the key is the value itself and
// NaN does not exist in these domains.
macro_rules! impl_int_element {
    ($($t:ty => $dtype:ident),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = DType::$dtype;
                type Key = $t;

                #[inline]
                fn ordering_key(self) -> $t {
                    self
                }

                #[inline]
                fn is_nan(self) -> bool {
                    false
                }

                #[inline]
                fn zero() -> Self {
                    0
                }
            }
        )*
    };
}

impl_int_element!(
    i64 => I64,
    i32 => I32,
    i16 => I16,
    i8 => I8,
    u64 => U64,
    u32 => U32,
    u16 => U16,
    u8 => U8,
);

// Note: bool doesn't implement Pod, so we can't implement Element for it
// directly. Boolean tensors use u8 internally with values restricted to 0/1.

// ============================================================================
// Half-precision floating point types (requires "f16" feature)
// ============================================================================

#[cfg(feature = "f16")]
impl Element for half::f16 {
    const DTYPE: DType = DType::F16;
    type Key = half::f16;

    #[inline]
    fn ordering_key(self) -> half::f16 {
        self
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        half::f16::ZERO
    }
}

#[cfg(feature = "f16")]
impl Element for half::bf16 {
    const DTYPE: DType = DType::BF16;
    type Key = half::bf16;

    #[inline]
    fn ordering_key(self) -> half::bf16 {
        self
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        half::bf16::ZERO
    }
}

// ============================================================================
// Complex types
//
// Complex numbers have no total order; the ordering key is the magnitude
// (|z| = sqrt(re² + im²)) as f64. A complex element counts as NaN when
// either component is NaN, in which case its magnitude is NaN as well and
// every key comparison against it evaluates false.
// ============================================================================

impl Element for super::complex::Complex64 {
    const DTYPE: DType = DType::Complex64;
    type Key = f64;

    #[inline]
    fn ordering_key(self) -> f64 {
        self.magnitude() as f64
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }
}

impl Element for super::complex::Complex128 {
    const DTYPE: DType = DType::Complex128;
    type Key = f64;

    #[inline]
    fn ordering_key(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    fn is_nan(self) -> bool {
        self.is_nan()
    }

    #[inline]
    fn zero() -> Self {
        Self::ZERO
    }
}

// ============================================================================
// Floating point elements
// ============================================================================

/// Floating point element types with IEEE special values
///
/// Implemented for the dtypes the infinity predicates operate on;
/// integer and complex types are deliberately excluded.
pub trait FloatElement: Element {
    /// Positive infinity
    const INFINITY: Self;
    /// Negative infinity
    const NEG_INFINITY: Self;
}

impl FloatElement for f64 {
    const INFINITY: Self = f64::INFINITY;
    const NEG_INFINITY: Self = f64::NEG_INFINITY;
}

impl FloatElement for f32 {
    const INFINITY: Self = f32::INFINITY;
    const NEG_INFINITY: Self = f32::NEG_INFINITY;
}

#[cfg(feature = "f16")]
impl FloatElement for half::f16 {
    const INFINITY: Self = half::f16::INFINITY;
    const NEG_INFINITY: Self = half::f16::NEG_INFINITY;
}

#[cfg(feature = "f16")]
impl FloatElement for half::bf16 {
    const INFINITY: Self = half::bf16::INFINITY;
    const NEG_INFINITY: Self = half::bf16::NEG_INFINITY;
}

#[cfg(test)]
mod tests {
    use super::super::complex::{Complex64, Complex128};
    use super::*;

    #[test]
    fn test_element_dtype() {
        assert_eq!(f64::DTYPE, DType::F64);
        assert_eq!(f32::DTYPE, DType::F32);
        assert_eq!(i32::DTYPE, DType::I32);
        assert_eq!(u8::DTYPE, DType::U8);
        assert_eq!(Complex64::DTYPE, DType::Complex64);
    }

    #[test]
    fn test_real_ordering_keys_are_identity() {
        assert_eq!(3.5f64.ordering_key(), 3.5);
        assert_eq!((-7i32).ordering_key(), -7);
        // Integer keys keep full precision: values beyond 2^53 stay exact.
        let big = (1i64 << 62) + 1;
        assert_eq!(big.ordering_key(), big);
    }

    #[test]
    fn test_complex_ordering_key_is_magnitude() {
        let z = Complex64::new(3.0, 4.0);
        assert_eq!(z.ordering_key(), 5.0);
        let w = Complex128::new(0.0, -2.0);
        assert_eq!(w.ordering_key(), 2.0);
    }

    #[test]
    fn test_is_nan() {
        assert!(f32::NAN.is_nan());
        assert!(!1.0f32.is_nan());
        assert!(!Element::is_nan(42i64));
        assert!(Element::is_nan(Complex64::new(f32::NAN, 0.0)));
        assert!(Element::is_nan(Complex128::new(0.0, f64::NAN)));
        assert!(!Element::is_nan(Complex64::new(1.0, 2.0)));
    }

    #[test]
    fn test_nan_key_comparisons_are_false() {
        let nan = f64::NAN;
        assert!(!(nan >= 1.0));
        assert!(!(1.0 >= nan));
        assert!(!(nan >= nan));
    }

    #[test]
    fn test_infinity_consts() {
        assert!(f32::INFINITY > f32::MAX);
        assert_eq!(<f64 as FloatElement>::NEG_INFINITY, f64::NEG_INFINITY);
    }
}
