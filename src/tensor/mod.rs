//! Strided tensor substrate
//!
//! This module provides the `Tensor` type and its supporting pieces:
//!
//! - [`Layout`]: shape, strides, and offset describing a view
//! - [`Storage`]: reference-counted aligned host memory
//! - [`Tensor`]: layout + storage, with zero-copy views and the in-place
//!   output-buffer operations (`resize_`, `squeeze_`, `unsqueeze_`) used by
//!   the reduction engine

mod core;
mod layout;
mod storage;

pub use self::core::Tensor;
pub use layout::{broadcast_shapes, Layout, Shape, Strides};
pub use storage::Storage;
