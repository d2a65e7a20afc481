//! Operation surface
//!
//! This module defines the public operations and their orchestration:
//!
//! - [`min_dim`] / [`max_dim`] (and `_out` variants writing into
//!   caller-supplied buffers): axis reduction to the extremal value and
//!   its index
//! - [`where_cond`]: element-wise ternary select
//! - [`isposinf`] / [`isneginf`]: element-wise infinity predicates
//!
//! Operations validate their preconditions, match on the runtime dtype
//! once per call (`dispatch` module), and hand the actual loops to
//! monomorphized kernels. The reductions drive the strided iteration
//! engine (`iter`); the element-wise siblings use the kernel paths
//! directly.

mod dispatch;
mod minmax;
mod special;
mod where_select;

pub use minmax::{max_dim, max_dim_out, min_dim, min_dim_out};
pub use special::{isneginf, isposinf};
pub use where_select::where_cond;

use crate::tensor::Tensor;

/// Ensure a tensor is contiguous, cloning if already contiguous or copying
/// if not.
///
/// Common pattern before kernel dispatch when a kernel expects a flat
/// row-major buffer.
#[inline]
pub(crate) fn ensure_contiguous(tensor: &Tensor) -> Tensor {
    if tensor.is_contiguous() {
        tensor.clone()
    } else {
        tensor.contiguous()
    }
}

/// Output shape of reducing `dim`: the input shape with that axis kept as
/// size 1 (`keepdim`) or removed.
pub fn reduce_dim_output_shape(shape: &[usize], dim: usize, keepdim: bool) -> Vec<usize> {
    let mut out: Vec<usize> = shape.to_vec();
    if keepdim {
        out[dim] = 1;
    } else {
        out.remove(dim);
    }
    out
}
