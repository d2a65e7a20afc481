//! Core Tensor type

use super::{Layout, Storage};
use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::fmt;

/// N-dimensional strided array
///
/// `Tensor` is the fundamental data structure in axred. It consists of:
/// - **Storage**: reference-counted aligned host memory
/// - **Layout**: shape, strides, and offset defining the view into storage
/// - **DType**: element type (determined at runtime, carried on storage)
///
/// # Zero-Copy Views
///
/// Operations like `transpose`, `squeeze`, and `broadcast_to` create new
/// tensors that share the same underlying storage through Arc-wrapped
/// storage and a modified layout.
///
/// # Output Buffers
///
/// Reduction operations write into caller-owned tensors through the
/// in-place methods `resize_`, `squeeze_`, and `unsqueeze_`. During such a
/// call the caller must not read or alias the output buffers; the engine
/// assumes exclusive ownership.
pub struct Tensor {
    /// Buffer memory
    storage: Storage,
    /// Shape, strides, offset
    layout: Layout,
}

impl Tensor {
    /// Create a tensor from a slice of data
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape`
    /// dimensions. For a fallible alternative, use [`Self::try_from_slice`].
    pub fn from_slice<T: Element>(data: &[T], shape: &[usize]) -> Self {
        Self::try_from_slice(data, shape).expect("Tensor::from_slice failed")
    }

    /// Create a tensor from a slice of data (fallible version)
    ///
    /// Returns an error if `data.len()` does not equal the product of the
    /// `shape` dimensions, or if memory allocation fails.
    pub fn try_from_slice<T: Element>(data: &[T], shape: &[usize]) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let storage = Storage::from_slice(data)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create a boolean tensor from a slice of bools
    ///
    /// `bool` is not a bytemuck Pod type, so boolean tensors are stored as
    /// one byte per element with values restricted to 0/1 and dtype
    /// `DType::Bool`.
    pub fn try_from_bool_slice(data: &[bool], shape: &[usize]) -> Result<Self> {
        let expected_len: usize = shape.iter().product();
        if data.len() != expected_len {
            return Err(Error::ShapeMismatch {
                expected: shape.to_vec(),
                got: vec![data.len()],
            });
        }

        let bytes: Vec<u8> = data.iter().map(|&b| b as u8).collect();
        let storage = Storage::from_bytes(&bytes, DType::Bool)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create a boolean tensor from a slice of bools
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` does not equal the product of the `shape`
    /// dimensions.
    pub fn from_bool_slice(data: &[bool], shape: &[usize]) -> Self {
        Self::try_from_bool_slice(data, shape).expect("Tensor::from_bool_slice failed")
    }

    /// Create a tensor with unspecified contents
    pub fn try_empty(shape: &[usize], dtype: DType) -> Result<Self> {
        let len: usize = shape.iter().product();
        let storage = Storage::try_new(len, dtype)?;
        let layout = Layout::contiguous(shape);

        Ok(Self { storage, layout })
    }

    /// Create a tensor with unspecified contents
    ///
    /// # Panics
    ///
    /// Panics if allocation fails. For a fallible alternative, use
    /// [`Self::try_empty`].
    pub fn empty(shape: &[usize], dtype: DType) -> Self {
        Self::try_empty(shape, dtype).expect("Tensor::empty failed")
    }

    // ===== Accessors =====

    /// Get the storage
    #[inline]
    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    /// Get the layout
    #[inline]
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Get the shape
    #[inline]
    pub fn shape(&self) -> &[usize] {
        self.layout.shape()
    }

    /// Get the strides (in elements)
    #[inline]
    pub fn strides(&self) -> &[isize] {
        self.layout.strides()
    }

    /// Get the number of dimensions (rank)
    #[inline]
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Get the total number of elements
    #[inline]
    pub fn numel(&self) -> usize {
        self.layout.elem_count()
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.storage.dtype()
    }

    /// Check if the tensor is contiguous in memory
    #[inline]
    pub fn is_contiguous(&self) -> bool {
        self.layout.is_contiguous()
    }

    // ===== View Operations (Zero-Copy) =====

    /// Transpose two dimensions (zero-copy)
    pub fn transpose(&self, dim0: usize, dim1: usize) -> Result<Self> {
        let new_layout = self
            .layout
            .transpose(dim0, dim1)
            .ok_or(Error::InvalidDimension {
                dim: dim0.max(dim1),
                ndim: self.ndim(),
            })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Remove a dimension of size 1 (zero-copy view)
    pub fn squeeze(&self, dim: usize) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.squeeze(dim),
        }
    }

    /// Add a dimension of size 1 (zero-copy view)
    pub fn unsqueeze(&self, dim: usize) -> Result<Self> {
        let new_layout = self
            .layout
            .unsqueeze(dim)
            .ok_or(Error::InvalidDimension {
                dim,
                ndim: self.ndim(),
            })?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    /// Broadcast to a target shape (zero-copy)
    pub fn broadcast_to(&self, shape: &[usize]) -> Result<Self> {
        let new_layout = self
            .layout
            .broadcast_to(shape)
            .ok_or_else(|| Error::broadcast(self.shape(), shape))?;

        Ok(Self {
            storage: self.storage.clone(),
            layout: new_layout,
        })
    }

    // ===== In-Place Output Buffer Operations =====

    /// Resize this tensor in place to `shape`
    ///
    /// The layout becomes contiguous over `shape` regardless of the
    /// tensor's previous rank or strides. Backing storage is reallocated
    /// only when the element count changes; in every case the contents are
    /// unspecified afterwards until written.
    pub fn resize_(&mut self, shape: &[usize]) -> Result<()> {
        let numel: usize = shape.iter().product();
        if numel != self.storage.len() {
            self.storage = Storage::try_new(numel, self.dtype())?;
        }
        self.layout = Layout::contiguous(shape);
        Ok(())
    }

    /// Remove a size-1 dimension in place
    ///
    /// No-op if `dim` is out of range or does not have extent 1.
    pub fn squeeze_(&mut self, dim: usize) {
        self.layout = self.layout.squeeze(dim);
    }

    /// Insert a size-1 dimension in place
    pub fn unsqueeze_(&mut self, dim: usize) -> Result<()> {
        self.layout = self.layout.unsqueeze(dim).ok_or(Error::InvalidDimension {
            dim,
            ndim: self.ndim(),
        })?;
        Ok(())
    }

    // ===== Data Access =====

    /// Make tensor contiguous (copy if needed)
    ///
    /// If the tensor is already contiguous, returns a view (zero-copy).
    /// Otherwise, allocates new storage and copies the data element by
    /// element following the strides.
    pub fn contiguous(&self) -> Self {
        if self.is_contiguous() {
            return self.clone();
        }

        let storage = Storage::try_new(self.numel(), self.dtype())
            .expect("Tensor::contiguous allocation failed");
        let layout = Layout::contiguous(self.shape());

        let elem_size = self.dtype().size_in_bytes();
        let src_base = self
            .storage
            .ptr()
            .wrapping_add((self.layout.offset() * elem_size) as u64);
        let dst_base = storage.ptr();

        copy_strided(src_base, dst_base, self.shape(), self.strides(), elem_size);

        Self { storage, layout }
    }

    /// Copy tensor data to a Vec on the host
    ///
    /// The tensor must be contiguous; call [`Self::contiguous`] first for
    /// views.
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Vec<T> {
        assert!(
            self.is_contiguous(),
            "Tensor must be contiguous to copy to vec"
        );
        self.storage.to_vec()
    }
}

/// Copy `shape`/`strides`-addressed elements from `src` into a contiguous
/// row-major run at `dst`. Addresses are byte addresses; strides are in
/// elements.
fn copy_strided(src: u64, dst: u64, shape: &[usize], strides: &[isize], elem_size: usize) {
    let numel: usize = shape.iter().product();
    if numel == 0 {
        return;
    }

    let ndim = shape.len();
    let mut indices = vec![0usize; ndim];
    let mut src_offset = 0isize; // in elements, relative to src

    for i in 0..numel {
        unsafe {
            std::ptr::copy_nonoverlapping(
                (src as usize).wrapping_add_signed(src_offset * elem_size as isize) as *const u8,
                (dst as usize + i * elem_size) as *mut u8,
                elem_size,
            );
        }

        // Advance the multi-dimensional index with incremental offset updates
        for dim in (0..ndim).rev() {
            indices[dim] += 1;
            src_offset += strides[dim];
            if indices[dim] < shape[dim] {
                break;
            }
            indices[dim] = 0;
            src_offset -= shape[dim] as isize * strides[dim];
        }
    }
}

impl Clone for Tensor {
    /// Clone creates a new tensor sharing the same storage (zero-copy)
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            layout: self.layout.clone(),
        }
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape())
            .field("dtype", &self.dtype())
            .field("contiguous", &self.is_contiguous())
            .finish()
    }
}

impl fmt::Display for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tensor({:?}, dtype={})", self.shape(), self.dtype())
    }
}
