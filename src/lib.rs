//! # axred
//!
//! **Axis min/max-with-index reductions and compare kernels for strided
//! CPU tensors.**
//!
//! axred computes, for an n-dimensional array, the minimum or maximum
//! element along a chosen axis together with the axis position of that
//! element, across every numeric element domain — signed and unsigned
//! integers, floats, and complex numbers — under a single ordering rule.
//! It ships two element-wise siblings built on the same substrate: a
//! ternary select and exact infinity predicates.
//!
//! ## Semantics
//!
//! - **Ordering keys**: real domains compare natively; complex values
//!   compare by magnitude. Ties keep the first occurrence.
//! - **NaN propagation**: the first NaN selected along the axis poisons
//!   the lane's result (value and index) and ends its scan early,
//!   consistent with IEEE comparison rules.
//! - **Shapes**: the reduced axis is kept as size 1 (`keepdim`) or
//!   removed; value and index outputs always share a shape.
//!
//! ## Quick Start
//!
//! ```
//! use axred::ops::{max_dim, min_dim};
//! use axred::tensor::Tensor;
//!
//! let input = Tensor::from_slice(&[1.0f32, 5.0, 2.0, 9.0, 0.0, 3.0], &[2, 3]);
//!
//! let (values, indices) = min_dim(&input, 1, false).unwrap();
//! assert_eq!(values.to_vec::<f32>(), vec![1.0, 0.0]);
//! assert_eq!(indices.to_vec::<i64>(), vec![0, 1]);
//!
//! let (values, indices) = max_dim(&input, 1, false).unwrap();
//! assert_eq!(values.to_vec::<f32>(), vec![5.0, 9.0]);
//! assert_eq!(indices.to_vec::<i64>(), vec![1, 0]);
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel lane dispatch on the global rayon pool
//! - `f16`: half-precision floats (F16, BF16)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod dtype;
pub mod error;
pub mod iter;
pub mod kernels;
pub mod ops;
pub mod tensor;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::dtype::{Complex64, Complex128, DType, Element};
    pub use crate::error::{Error, Result};
    pub use crate::ops::{
        isneginf, isposinf, max_dim, max_dim_out, min_dim, min_dim_out, where_cond,
    };
    pub use crate::tensor::Tensor;
}
