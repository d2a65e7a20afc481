//! CPU kernel implementations
//!
//! This module provides low-level compute loops for the operation surface.
//! Kernels are generic over `T: Element` (or `T: FloatElement`) and take
//! raw pointers; all validation, shape bookkeeping, and dtype dispatch
//! happen in the `ops` layer before a kernel runs.

#![allow(unsafe_op_in_unsafe_fn)] // Kernels are already marked unsafe, inner unsafe is redundant

pub mod minmax;
pub mod special;
pub mod where_select;

// Re-export all kernel functions for convenient access
pub use minmax::{max_scan, min_scan};
pub use special::{isneginf_kernel, isposinf_kernel};
pub use where_select::{
    where_kernel, where_kernel_bool, where_strided_kernel, where_strided_kernel_bool,
};
