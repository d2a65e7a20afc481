//! Ternary select (where) kernels
//!
//! `out[i] = cond[i] ? x[i] : y[i]`, with the condition in one of two
//! boolean physical encodings:
//! - byte (`DType::U8`): any nonzero value is truthy
//! - native boolean (`DType::Bool`): one byte holding exactly 0 or 1,
//!   read as `bool`
//!
//! The encodings are logically equivalent and produce identical output;
//! the `ops` layer branches once per call on which one is in use.

use crate::dtype::Element;

/// Conditional select with byte condition: out[i] = cond[i] ? x[i] : y[i]
///
/// # Safety
/// - `cond` must be valid for reads of `len` u8 elements
/// - `x`, `y`, and `out` must be valid for `len` elements of type T
/// - `out` must not overlap the inputs
#[inline]
pub unsafe fn where_kernel<T: Element>(
    cond: *const u8,
    x: *const T,
    y: *const T,
    out: *mut T,
    len: usize,
) {
    let cond_slice = std::slice::from_raw_parts(cond, len);
    let x_slice = std::slice::from_raw_parts(x, len);
    let y_slice = std::slice::from_raw_parts(y, len);
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for i in 0..len {
        out_slice[i] = if cond_slice[i] != 0 {
            x_slice[i]
        } else {
            y_slice[i]
        };
    }
}

/// Conditional select with native boolean condition
///
/// # Safety
/// - `cond` must be valid for reads of `len` bool elements (every byte
///   must hold 0 or 1)
/// - `x`, `y`, and `out` must be valid for `len` elements of type T
/// - `out` must not overlap the inputs
#[inline]
pub unsafe fn where_kernel_bool<T: Element>(
    cond: *const bool,
    x: *const T,
    y: *const T,
    out: *mut T,
    len: usize,
) {
    let cond_slice = std::slice::from_raw_parts(cond, len);
    let x_slice = std::slice::from_raw_parts(x, len);
    let y_slice = std::slice::from_raw_parts(y, len);
    let out_slice = std::slice::from_raw_parts_mut(out, len);

    for i in 0..len {
        out_slice[i] = if cond_slice[i] { x_slice[i] } else { y_slice[i] };
    }
}

/// Shared strided iteration logic for where operations.
///
/// Iterates over output positions using multi-dimensional indexing with
/// incremental offset updates for efficient strided access. Strides are in
/// elements; a stride of 0 marks a broadcast dimension.
///
/// # Safety
/// - All pointers must be valid for the specified shape and strides
#[inline]
#[allow(clippy::too_many_arguments)]
unsafe fn where_strided_impl<C, T: Element, F>(
    cond: *const C,
    x: *const T,
    y: *const T,
    out: *mut T,
    out_shape: &[usize],
    cond_strides: &[isize],
    x_strides: &[isize],
    y_strides: &[isize],
    is_true: F,
) where
    F: Fn(*const C, isize) -> bool,
{
    let ndim = out_shape.len();
    let total = out_shape.iter().product::<usize>();

    if total == 0 {
        return;
    }

    let mut indices = vec![0usize; ndim];
    let mut cond_idx = 0isize;
    let mut x_idx = 0isize;
    let mut y_idx = 0isize;

    for out_idx in 0..total {
        let result = if is_true(cond, cond_idx) {
            *x.offset(x_idx)
        } else {
            *y.offset(y_idx)
        };

        *out.add(out_idx) = result;

        // Increment multi-dimensional index with incremental offset updates
        for dim in (0..ndim).rev() {
            indices[dim] += 1;
            cond_idx += cond_strides[dim];
            x_idx += x_strides[dim];
            y_idx += y_strides[dim];

            if indices[dim] < out_shape[dim] {
                break;
            }

            // Reset this dimension and adjust offsets
            indices[dim] = 0;
            cond_idx -= (out_shape[dim] as isize) * cond_strides[dim];
            x_idx -= (out_shape[dim] as isize) * x_strides[dim];
            y_idx -= (out_shape[dim] as isize) * y_strides[dim];
        }
    }
}

/// Conditional select with byte condition and broadcasting support
///
/// Uses strides to handle arbitrary broadcasting patterns. Stride of 0
/// means the dimension is broadcast (all indices access the same element).
///
/// # Safety
/// - All pointers must be valid for the specified shape and strides
/// - `out` must not overlap with input tensors
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn where_strided_kernel<T: Element>(
    cond: *const u8,
    x: *const T,
    y: *const T,
    out: *mut T,
    out_shape: &[usize],
    cond_strides: &[isize],
    x_strides: &[isize],
    y_strides: &[isize],
) {
    where_strided_impl(
        cond,
        x,
        y,
        out,
        out_shape,
        cond_strides,
        x_strides,
        y_strides,
        |cond_ptr, idx| *cond_ptr.offset(idx) != 0,
    );
}

/// Conditional select with native boolean condition and broadcasting support
///
/// # Safety
/// - All pointers must be valid for the specified shape and strides
///   (every condition byte must hold 0 or 1)
/// - `out` must not overlap with input tensors
#[inline]
#[allow(clippy::too_many_arguments)]
pub unsafe fn where_strided_kernel_bool<T: Element>(
    cond: *const bool,
    x: *const T,
    y: *const T,
    out: *mut T,
    out_shape: &[usize],
    cond_strides: &[isize],
    x_strides: &[isize],
    y_strides: &[isize],
) {
    where_strided_impl(
        cond,
        x,
        y,
        out,
        out_shape,
        cond_strides,
        x_strides,
        y_strides,
        |cond_ptr, idx| *cond_ptr.offset(idx),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_kernel_byte_truthiness() {
        let cond = [1u8, 0, 2, 0];
        let x = [10i32, 11, 12, 13];
        let y = [20i32, 21, 22, 23];
        let mut out = [0i32; 4];

        unsafe { where_kernel(cond.as_ptr(), x.as_ptr(), y.as_ptr(), out.as_mut_ptr(), 4) };
        assert_eq!(out, [10, 21, 12, 23]);
    }

    #[test]
    fn test_where_kernel_bool_matches_byte() {
        let cond_bytes = [1u8, 0, 1, 0];
        let cond_bools = [true, false, true, false];
        let x = [1.0f64, 2.0, 3.0, 4.0];
        let y = [5.0f64, 6.0, 7.0, 8.0];
        let mut out_byte = [0.0f64; 4];
        let mut out_bool = [0.0f64; 4];

        unsafe {
            where_kernel(
                cond_bytes.as_ptr(),
                x.as_ptr(),
                y.as_ptr(),
                out_byte.as_mut_ptr(),
                4,
            );
            where_kernel_bool(
                cond_bools.as_ptr(),
                x.as_ptr(),
                y.as_ptr(),
                out_bool.as_mut_ptr(),
                4,
            );
        }
        assert_eq!(out_byte, out_bool);
    }

    #[test]
    fn test_where_strided_broadcast_condition() {
        // cond [2, 1] broadcast over [2, 2]: row 0 picks x, row 1 picks y
        let cond = [1u8, 0];
        let x = [1i64, 2, 3, 4];
        let y = [9i64, 9, 9, 9];
        let mut out = [0i64; 4];

        unsafe {
            where_strided_kernel(
                cond.as_ptr(),
                x.as_ptr(),
                y.as_ptr(),
                out.as_mut_ptr(),
                &[2, 2],
                &[1, 0],
                &[2, 1],
                &[2, 1],
            );
        }
        assert_eq!(out, [1, 2, 9, 9]);
    }
}
