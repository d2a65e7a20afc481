//! Min/max-with-index reductions along one axis
//!
//! The reduction engine here owns shape bookkeeping and lane dispatch; the
//! per-lane comparison logic lives in `kernels::minmax`. For every lane
//! (one fixed combination of the non-axis coordinates) the scan selects
//! the extremal element by ordering key and records its axis position.
//!
//! NaN semantics: when any NaN occurs along the axis, the result for that
//! lane is the first NaN stored by the update rule and its index; the scan
//! stops there. Complex elements order by magnitude, with ties broken by
//! first occurrence.

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use crate::iter::IterConfig;
use crate::kernels;
use crate::ops::dispatch::dispatch_dtype;
use crate::tensor::Tensor;

/// Minimum along `dim` with the index of the selected element
///
/// Returns `(values, indices)` with the input's shape, the reduced axis
/// kept as size 1 if `keepdim` or removed otherwise. `indices` has dtype
/// `I64`.
pub fn min_dim(input: &Tensor, dim: usize, keepdim: bool) -> Result<(Tensor, Tensor)> {
    let mut values = Tensor::try_empty(&[0], input.dtype())?;
    let mut indices = Tensor::try_empty(&[0], DType::I64)?;
    min_dim_out(&mut values, &mut indices, input, dim, keepdim)?;
    Ok((values, indices))
}

/// Maximum along `dim` with the index of the selected element
///
/// Returns `(values, indices)`; see [`min_dim`] for shape and dtype rules.
pub fn max_dim(input: &Tensor, dim: usize, keepdim: bool) -> Result<(Tensor, Tensor)> {
    let mut values = Tensor::try_empty(&[0], input.dtype())?;
    let mut indices = Tensor::try_empty(&[0], DType::I64)?;
    max_dim_out(&mut values, &mut indices, input, dim, keepdim)?;
    Ok((values, indices))
}

/// Minimum along `dim`, writing into caller-supplied output buffers
///
/// `values` must have the input's dtype and `indices` dtype `I64`; both
/// are resized in place to the result shape (their previous shapes do not
/// matter, so buffers can be reused across calls). `dim` must be a valid,
/// non-empty dimension of `input`, already normalized to a non-negative
/// index.
pub fn min_dim_out(
    values: &mut Tensor,
    indices: &mut Tensor,
    input: &Tensor,
    dim: usize,
    keepdim: bool,
) -> Result<()> {
    validate_compare_args(values, indices, input, dim)?;
    let dim_size = input.shape()[dim];

    dispatch_dtype!(input.dtype(), T => {
        compare_base::<T, _>(values, indices, input, dim, keepdim, |value, index, lane, stride| unsafe {
            kernels::min_scan::<T>(value, index, lane, stride, dim_size);
        })
    }, "min_dim")
}

/// Maximum along `dim`, writing into caller-supplied output buffers
///
/// See [`min_dim_out`] for the buffer contract.
pub fn max_dim_out(
    values: &mut Tensor,
    indices: &mut Tensor,
    input: &Tensor,
    dim: usize,
    keepdim: bool,
) -> Result<()> {
    validate_compare_args(values, indices, input, dim)?;
    let dim_size = input.shape()[dim];

    dispatch_dtype!(input.dtype(), T => {
        compare_base::<T, _>(values, indices, input, dim, keepdim, |value, index, lane, stride| unsafe {
            kernels::max_scan::<T>(value, index, lane, stride, dim_size);
        })
    }, "max_dim")
}

/// Precondition checks shared by min/max; all failures surface before any
/// output mutation.
fn validate_compare_args(
    values: &Tensor,
    indices: &Tensor,
    input: &Tensor,
    dim: usize,
) -> Result<()> {
    let ndim = input.ndim();
    if dim >= ndim {
        return Err(Error::InvalidDimension { dim, ndim });
    }
    if input.shape()[dim] == 0 {
        return Err(Error::EmptyDimension { dim });
    }
    if values.dtype() != input.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: values.dtype(),
            rhs: input.dtype(),
        });
    }
    if indices.dtype() != DType::I64 {
        return Err(Error::DTypeMismatch {
            lhs: indices.dtype(),
            rhs: DType::I64,
        });
    }
    Ok(())
}

/// Shared reduction orchestration: shape bookkeeping, iteration plan,
/// per-lane dispatch of `scan`.
///
/// `scan(value_ptr, index_ptr, lane_ptr, dim_stride)` receives the lane's
/// base pointers and the input's element stride along the reduced axis,
/// and must write the lane's result through the two output pointers.
fn compare_base<T, F>(
    values: &mut Tensor,
    indices: &mut Tensor,
    input: &Tensor,
    dim: usize,
    keepdim: bool,
    scan: F,
) -> Result<()>
where
    T: Element,
    F: Fn(*mut T, *mut i64, *const T, isize) + Sync,
{
    let mut target_shape = input.shape().to_vec();
    target_shape[dim] = 1;

    // resize_ accepts buffers of any prior rank, so reused outputs need no
    // rank fixup before this point.
    values.resize_(&target_shape)?;
    indices.resize_(&target_shape)?;

    let dim_stride = input.strides()[dim];

    let plan = IterConfig::new(input.shape())
        .squash_dim(dim)
        .add_output(values)
        .add_output(indices)
        .add_input(input)
        .build()?;

    plan.for_each(
        |bases, strides, n| {
            let mut value_addr = bases[0] as usize;
            let mut index_addr = bases[1] as usize;
            let mut lane_addr = bases[2] as usize;
            for _ in 0..n {
                scan(
                    value_addr as *mut T,
                    index_addr as *mut i64,
                    lane_addr as *const T,
                    dim_stride,
                );
                value_addr = value_addr.wrapping_add_signed(strides[0]);
                index_addr = index_addr.wrapping_add_signed(strides[1]);
                lane_addr = lane_addr.wrapping_add_signed(strides[2]);
            }
        },
        /* grain_size */ 1,
    );

    if !keepdim {
        values.squeeze_(dim);
        indices.squeeze_(dim);
    }

    Ok(())
}
