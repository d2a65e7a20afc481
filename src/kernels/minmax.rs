//! Min/max-with-index scan kernels
//!
//! Each scan walks one lane: `dim_size` elements spaced `dim_stride`
//! elements apart. Elements are compared through their ordering keys
//! (`Element::ordering_key`): native value for real domains, magnitude for
//! complex. The update condition is phrased as a negated IEEE comparison so
//! that a NaN on either side always forces an update; the first NaN stored
//! as the running best ends the scan immediately and poisons the result.
//!
//! Ties between equal keys keep the earlier element: a later element only
//! wins under strict inequality. Downstream consumers rely on this
//! first-occurrence rule; do not relax it to last-occurrence.

use crate::dtype::Element;

/// Minimum-with-index scan over one lane
///
/// Writes the selected element to `value_out` and its 0-based axis
/// position to `index_out`.
///
/// # Safety
/// - `input` must be valid for reads at offsets `i * dim_stride` elements
///   for all `i < dim_size`
/// - `value_out` and `index_out` must be valid for a single write
/// - `dim_size` must be at least 1
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)] // the negation is load-bearing for NaN
pub unsafe fn min_scan<T: Element>(
    value_out: *mut T,
    index_out: *mut i64,
    input: *const T,
    dim_stride: isize,
    dim_size: usize,
) {
    let mut best = *input;
    let mut best_index: i64 = 0;
    for i in 0..dim_size {
        let value = *input.offset(i as isize * dim_stride);
        if !(value.ordering_key() >= best.ordering_key()) {
            best = value;
            best_index = i as i64;
            if value.is_nan() {
                break;
            }
        }
    }
    *value_out = best;
    *index_out = best_index;
}

/// Maximum-with-index scan over one lane
///
/// Writes the selected element to `value_out` and its 0-based axis
/// position to `index_out`.
///
/// # Safety
/// - `input` must be valid for reads at offsets `i * dim_stride` elements
///   for all `i < dim_size`
/// - `value_out` and `index_out` must be valid for a single write
/// - `dim_size` must be at least 1
#[inline]
#[allow(clippy::neg_cmp_op_on_partial_ord)] // the negation is load-bearing for NaN
pub unsafe fn max_scan<T: Element>(
    value_out: *mut T,
    index_out: *mut i64,
    input: *const T,
    dim_stride: isize,
    dim_size: usize,
) {
    let mut best = *input;
    let mut best_index: i64 = 0;
    for i in 0..dim_size {
        let value = *input.offset(i as isize * dim_stride);
        if !(value.ordering_key() <= best.ordering_key()) {
            best = value;
            best_index = i as i64;
            if value.is_nan() {
                break;
            }
        }
    }
    *value_out = best;
    *index_out = best_index;
}
