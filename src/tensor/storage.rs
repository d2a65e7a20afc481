//! Storage: aligned host memory with Arc-based sharing

use crate::dtype::{DType, Element};
use crate::error::{Error, Result};
use std::alloc::{alloc_zeroed, dealloc, Layout as AllocLayout};
use std::sync::Arc;

/// Allocation alignment in bytes. 64 keeps every supported element type
/// aligned and matches cache-line / AVX-512 boundaries.
const ALIGN: usize = 64;

/// Storage for tensor data
///
/// Storage wraps an aligned heap allocation with reference counting,
/// enabling zero-copy views (transpose, squeeze, broadcast) that share the
/// underlying buffer. The buffer address is carried as `u64` so kernels and
/// parallel workers can capture it without borrowing.
///
/// Memory is deallocated when the last reference is dropped.
pub struct Storage {
    inner: Arc<StorageInner>,
}

struct StorageInner {
    /// Buffer address (0 for empty storage)
    ptr: u64,
    /// Number of elements (not bytes)
    len: usize,
    /// Element type
    dtype: DType,
}

impl Storage {
    /// Allocate storage for `len` elements of type `dtype`
    ///
    /// The memory is zero-initialized. Fails with `OutOfMemory` if the
    /// allocator returns null.
    pub fn try_new(len: usize, dtype: DType) -> Result<Self> {
        let size_bytes = len * dtype.size_in_bytes();
        let ptr = if size_bytes == 0 {
            0
        } else {
            let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
                .map_err(|_| Error::OutOfMemory { size: size_bytes })?;
            let raw = unsafe { alloc_zeroed(layout) };
            if raw.is_null() {
                return Err(Error::OutOfMemory { size: size_bytes });
            }
            raw as u64
        };

        Ok(Self {
            inner: Arc::new(StorageInner { ptr, len, dtype }),
        })
    }

    /// Create storage from existing data with inferred dtype
    ///
    /// Copies `data` into a fresh allocation. The dtype is inferred from
    /// the Element type.
    pub fn from_slice<T: Element>(data: &[T]) -> Result<Self> {
        let storage = Self::try_new(data.len(), T::DTYPE)?;
        let bytes: &[u8] = bytemuck::cast_slice(data);
        if !bytes.is_empty() {
            unsafe {
                std::ptr::copy_nonoverlapping(bytes.as_ptr(), storage.ptr() as *mut u8, bytes.len());
            }
        }
        Ok(storage)
    }

    /// Create storage from raw bytes with explicit dtype
    pub fn from_bytes(data: &[u8], dtype: DType) -> Result<Self> {
        let len = data.len() / dtype.size_in_bytes();
        let storage = Self::try_new(len, dtype)?;
        if !data.is_empty() {
            unsafe {
                std::ptr::copy_nonoverlapping(data.as_ptr(), storage.ptr() as *mut u8, data.len());
            }
        }
        Ok(storage)
    }

    /// Get the raw buffer address
    #[inline]
    pub fn ptr(&self) -> u64 {
        self.inner.ptr
    }

    /// Get the number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len
    }

    /// Check if storage is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.len == 0
    }

    /// Get the element type
    #[inline]
    pub fn dtype(&self) -> DType {
        self.inner.dtype
    }

    /// Get size in bytes
    #[inline]
    pub fn size_in_bytes(&self) -> usize {
        self.inner.len * self.inner.dtype.size_in_bytes()
    }

    /// Copy the whole buffer to a Vec on the host
    pub fn to_vec<T: bytemuck::Pod>(&self) -> Vec<T> {
        // Allocate with correct alignment for T, then cast to bytes for the
        // copy. This avoids alignment violations that would occur if we
        // allocated a Vec<u8> and cast to stricter-aligned types.
        let mut result = vec![T::zeroed(); self.inner.len];
        let bytes: &mut [u8] = bytemuck::cast_slice_mut(&mut result);
        if !bytes.is_empty() {
            unsafe {
                std::ptr::copy_nonoverlapping(
                    self.inner.ptr as *const u8,
                    bytes.as_mut_ptr(),
                    bytes.len(),
                );
            }
        }
        result
    }
}

impl Clone for Storage {
    /// Clone increments the reference count (zero-copy)
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Drop for StorageInner {
    fn drop(&mut self) {
        let size_bytes = self.len * self.dtype.size_in_bytes();
        if self.ptr != 0 && size_bytes != 0 {
            let layout = AllocLayout::from_size_align(size_bytes, ALIGN)
                .expect("Invalid deallocation layout");
            unsafe {
                dealloc(self.ptr as *mut u8, layout);
            }
        }
    }
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage")
            .field("ptr", &format!("0x{:x}", self.inner.ptr))
            .field("len", &self.inner.len)
            .field("dtype", &self.inner.dtype)
            .field("refs", &Arc::strong_count(&self.inner))
            .finish()
    }
}
