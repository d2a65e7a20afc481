//! Infinity predicates

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::kernels;
use crate::ops::dispatch::dispatch_float_dtype;
use crate::ops::ensure_contiguous;
use crate::tensor::Tensor;

/// Element-wise test for positive infinity
///
/// Returns a `Bool` tensor with `out[i] = (a[i] == +inf)`. NaN, finite
/// values, and negative infinity all map to false. Defined for floating
/// point dtypes only.
pub fn isposinf(a: &Tensor) -> Result<Tensor> {
    let dtype = a.dtype();
    let a_contig = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), DType::Bool)?;

    let len = a.numel();
    let a_ptr = a_contig.storage().ptr();
    let out_ptr = out.storage().ptr();

    dispatch_float_dtype!(dtype, T => {
        unsafe {
            kernels::isposinf_kernel::<T>(a_ptr as *const T, out_ptr as *mut u8, len);
        }
    }, "isposinf");

    Ok(out)
}

/// Element-wise test for negative infinity
///
/// Returns a `Bool` tensor with `out[i] = (a[i] == -inf)`; symmetric to
/// [`isposinf`].
pub fn isneginf(a: &Tensor) -> Result<Tensor> {
    let dtype = a.dtype();
    let a_contig = ensure_contiguous(a);
    let out = Tensor::try_empty(a.shape(), DType::Bool)?;

    let len = a.numel();
    let a_ptr = a_contig.storage().ptr();
    let out_ptr = out.storage().ptr();

    dispatch_float_dtype!(dtype, T => {
        unsafe {
            kernels::isneginf_kernel::<T>(a_ptr as *const T, out_ptr as *mut u8, len);
        }
    }, "isneginf");

    Ok(out)
}
