//! Ternary select (element-wise conditional)

use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::kernels;
use crate::ops::dispatch::dispatch_dtype;
use crate::ops::ensure_contiguous;
use crate::tensor::{broadcast_shapes, Tensor};

/// Element-wise conditional select: `out[i] = cond[i] ? x[i] : y[i]`
///
/// The condition must use one of the two boolean encodings: `U8` (any
/// nonzero byte is truthy) or `Bool` (native boolean, bytes 0/1). The
/// encodings are logically equivalent; the choice never changes the
/// output. `x` and `y` must share a dtype, and all three tensors broadcast
/// together to the output shape.
pub fn where_cond(cond: &Tensor, x: &Tensor, y: &Tensor) -> Result<Tensor> {
    if x.dtype() != y.dtype() {
        return Err(Error::DTypeMismatch {
            lhs: x.dtype(),
            rhs: y.dtype(),
        });
    }
    let dtype = x.dtype();
    let cond_dtype = cond.dtype();
    if !cond_dtype.is_condition() {
        return Err(Error::UnsupportedDType {
            dtype: cond_dtype,
            op: "where_cond",
        });
    }

    // Compute broadcast shape (cond, x, y) -> out
    let xy_shape =
        broadcast_shapes(x.shape(), y.shape()).ok_or_else(|| Error::broadcast(x.shape(), y.shape()))?;
    let out_shape = broadcast_shapes(cond.shape(), &xy_shape)
        .ok_or_else(|| Error::broadcast(cond.shape(), &xy_shape))?;

    let out = Tensor::try_empty(&out_shape, dtype)?;
    let out_ptr = out.storage().ptr();

    // Fast path: all same shape, flat kernel over contiguous buffers
    if cond.shape() == x.shape() && x.shape() == y.shape() {
        let cond_contig = ensure_contiguous(cond);
        let x_contig = ensure_contiguous(x);
        let y_contig = ensure_contiguous(y);

        let cond_ptr = cond_contig.storage().ptr();
        let x_ptr = x_contig.storage().ptr();
        let y_ptr = y_contig.storage().ptr();
        let numel = out.numel();

        // Branch once per call on the condition encoding
        if cond_dtype == DType::U8 {
            dispatch_dtype!(dtype, T => {
                unsafe {
                    kernels::where_kernel::<T>(
                        cond_ptr as *const u8,
                        x_ptr as *const T,
                        y_ptr as *const T,
                        out_ptr as *mut T,
                        numel,
                    );
                }
            }, "where_cond");
        } else {
            dispatch_dtype!(dtype, T => {
                unsafe {
                    kernels::where_kernel_bool::<T>(
                        cond_ptr as *const bool,
                        x_ptr as *const T,
                        y_ptr as *const T,
                        out_ptr as *mut T,
                        numel,
                    );
                }
            }, "where_cond");
        }

        return Ok(out);
    }

    // Broadcasting path: strided kernel over zero-copy broadcast views
    // (stride 0 marks a broadcast dimension)
    let cond_broadcast = cond.broadcast_to(&out_shape)?;
    let x_broadcast = x.broadcast_to(&out_shape)?;
    let y_broadcast = y.broadcast_to(&out_shape)?;

    let cond_ptr = operand_base(&cond_broadcast);
    let x_ptr = operand_base(&x_broadcast);
    let y_ptr = operand_base(&y_broadcast);

    let cond_strides = cond_broadcast.strides().to_vec();
    let x_strides = x_broadcast.strides().to_vec();
    let y_strides = y_broadcast.strides().to_vec();

    if cond_dtype == DType::U8 {
        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::where_strided_kernel::<T>(
                    cond_ptr as *const u8,
                    x_ptr as *const T,
                    y_ptr as *const T,
                    out_ptr as *mut T,
                    &out_shape,
                    &cond_strides,
                    &x_strides,
                    &y_strides,
                );
            }
        }, "where_cond");
    } else {
        dispatch_dtype!(dtype, T => {
            unsafe {
                kernels::where_strided_kernel_bool::<T>(
                    cond_ptr as *const bool,
                    x_ptr as *const T,
                    y_ptr as *const T,
                    out_ptr as *mut T,
                    &out_shape,
                    &cond_strides,
                    &x_strides,
                    &y_strides,
                );
            }
        }, "where_cond");
    }

    Ok(out)
}

/// Byte address of a view's first element (storage base plus layout offset)
fn operand_base(tensor: &Tensor) -> u64 {
    let elem_size = tensor.dtype().size_in_bytes();
    tensor
        .storage()
        .ptr()
        .wrapping_add((tensor.layout().offset() * elem_size) as u64)
}
