//! Strided iteration engine
//!
//! Enumerates the lanes of a declared iteration shape and drives a
//! caller-supplied callback over them, serially or across rayon workers.
//! A *lane* is one coordinate of the iteration space; the engine hands the
//! callback groups of lanes that are contiguous along the innermost
//! iteration dimension, together with the byte strides needed to step from
//! lane to lane within the group.
//!
//! Reductions declare the input's shape with the reduction axis *squashed*
//! (treated as extent 1), so the engine enumerates exactly one unit of work
//! per lane orthogonal to that axis while the callback walks the axis
//! manually using its stride. Lanes touch disjoint slices of every
//! registered operand by construction, so the engine needs no
//! synchronization between workers.
//!
//! ```ignore
//! let plan = IterConfig::new(input.shape())
//!     .squash_dim(dim)
//!     .add_output(&values)
//!     .add_output(&indices)
//!     .add_input(&input)
//!     .build()?;
//!
//! plan.for_each(|bases, strides, n| { /* n lanes */ }, 1);
//! ```

use crate::error::{Error, Result};
use crate::tensor::{Shape, Tensor};
use smallvec::SmallVec;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

/// Stack capacity for registered operands; reduction plans carry three
/// (value out, index out, input).
const STACK_OPERANDS: usize = 4;

/// One registered buffer: base byte address and per-dimension byte strides
/// resolved against the iteration shape.
#[derive(Clone, Debug)]
struct Operand {
    base: u64,
    byte_strides: SmallVec<[isize; 4]>,
}

/// Raw operand info captured at registration time; resolved in `build`
/// once the squash dimension is known.
#[derive(Clone, Debug)]
struct PendingOperand {
    base: u64,
    shape: Shape,
    elem_strides: SmallVec<[isize; 4]>,
    elem_size: usize,
}

impl PendingOperand {
    fn capture(tensor: &Tensor) -> Self {
        let elem_size = tensor.dtype().size_in_bytes();
        Self {
            base: tensor
                .storage()
                .ptr()
                .wrapping_add((tensor.layout().offset() * elem_size) as u64),
            shape: tensor.shape().iter().copied().collect(),
            elem_strides: tensor.strides().iter().copied().collect(),
            elem_size,
        }
    }
}

/// Builder for an [`IterPlan`]
///
/// Declares a static iteration shape, optionally squashes one dimension,
/// and registers operands in a fixed order (outputs first, then inputs —
/// the callback receives base pointers in registration order).
pub struct IterConfig {
    shape: Shape,
    squash: Option<usize>,
    operands: SmallVec<[PendingOperand; STACK_OPERANDS]>,
}

impl IterConfig {
    /// Declare the static iteration shape
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.iter().copied().collect(),
            squash: None,
            operands: SmallVec::new(),
        }
    }

    /// Treat `dim` as extent 1 for enumeration purposes
    ///
    /// Operands keep their true layouts; the callback is responsible for
    /// walking the squashed dimension manually using its stride.
    pub fn squash_dim(mut self, dim: usize) -> Self {
        self.squash = Some(dim);
        self
    }

    /// Register an output buffer
    pub fn add_output(mut self, tensor: &Tensor) -> Self {
        self.operands.push(PendingOperand::capture(tensor));
        self
    }

    /// Register an input buffer
    pub fn add_input(mut self, tensor: &Tensor) -> Self {
        self.operands.push(PendingOperand::capture(tensor));
        self
    }

    /// Validate operands against the iteration shape and build the plan
    ///
    /// Each operand must have the iteration rank, and along every
    /// dimension its extent must equal the iteration extent, or be 1
    /// (broadcast, byte stride 0), or lie on the squashed dimension.
    pub fn build(self) -> Result<IterPlan> {
        if let Some(dim) = self.squash {
            if dim >= self.shape.len() {
                return Err(Error::InvalidDimension {
                    dim,
                    ndim: self.shape.len(),
                });
            }
        }

        let mut iter_shape = self.shape.clone();
        if let Some(dim) = self.squash {
            iter_shape[dim] = 1;
        }

        let ndim = iter_shape.len();
        let mut operands: SmallVec<[Operand; STACK_OPERANDS]> = SmallVec::new();

        for pending in &self.operands {
            if pending.shape.len() != ndim {
                return Err(Error::shape_mismatch(&iter_shape, &pending.shape));
            }

            let mut byte_strides: SmallVec<[isize; 4]> = SmallVec::with_capacity(ndim);
            for d in 0..ndim {
                let stride = if Some(d) == self.squash || pending.shape[d] == iter_shape[d] {
                    // Squashed dimensions are never stepped by the engine;
                    // the true stride is irrelevant to enumeration.
                    pending.elem_strides[d] * pending.elem_size as isize
                } else if pending.shape[d] == 1 {
                    0
                } else {
                    return Err(Error::shape_mismatch(&iter_shape, &pending.shape));
                };
                byte_strides.push(stride);
            }

            operands.push(Operand {
                base: pending.base,
                byte_strides,
            });
        }

        Ok(IterPlan {
            shape: iter_shape,
            operands,
        })
    }
}

/// An iteration plan over a static shape with registered operands
///
/// Built by [`IterConfig`]; consumed through [`IterPlan::for_each`].
pub struct IterPlan {
    shape: Shape,
    operands: SmallVec<[Operand; STACK_OPERANDS]>,
}

impl IterPlan {
    /// Total number of lanes enumerated by this plan
    pub fn lane_count(&self) -> usize {
        self.shape.iter().product()
    }

    /// Invoke `f` over every lane of the iteration space
    ///
    /// `f(bases, strides, n)` receives one *group* of `n >= 1` lanes
    /// contiguous along the innermost iteration dimension: `bases[k]` is
    /// operand `k`'s byte address for the first lane of the group and
    /// `strides[k]` the byte step between consecutive lanes within it.
    ///
    /// `grain_size` is the minimum number of lanes per parallel work unit.
    /// With the `rayon` feature enabled, groups are dispatched on the
    /// global rayon pool; a grain size of one lane permits the
    /// finest-grained partitioning. Lanes write disjoint slices of the
    /// outputs, so no ordering between groups is observable.
    pub fn for_each<F>(&self, f: F, grain_size: usize)
    where
        F: Fn(&[u64], &[isize], usize) + Sync,
    {
        if self.lane_count() == 0 {
            return;
        }

        let ndim = self.shape.len();
        if ndim == 0 {
            let bases: SmallVec<[u64; STACK_OPERANDS]> =
                self.operands.iter().map(|op| op.base).collect();
            let strides: SmallVec<[isize; STACK_OPERANDS]> =
                self.operands.iter().map(|_| 0).collect();
            f(&bases, &strides, 1);
            return;
        }

        let inner = self.shape[ndim - 1];
        let outer: usize = self.shape[..ndim - 1].iter().product();
        let inner_strides: SmallVec<[isize; STACK_OPERANDS]> = self
            .operands
            .iter()
            .map(|op| op.byte_strides[ndim - 1])
            .collect();

        #[cfg(feature = "rayon")]
        {
            if outer > 1 {
                // grain_size counts lanes; each outer step covers `inner` of them
                let min_len = grain_size.max(1).div_ceil(inner.max(1));
                (0..outer)
                    .into_par_iter()
                    .with_min_len(min_len)
                    .for_each(|outer_idx| {
                        self.invoke_group(outer_idx, &inner_strides, inner, &f);
                    });
                return;
            }
        }

        #[cfg(not(feature = "rayon"))]
        let _ = grain_size;

        for outer_idx in 0..outer {
            self.invoke_group(outer_idx, &inner_strides, inner, &f);
        }
    }

    /// Run the callback for one group: the `inner`-lane run starting at
    /// outer coordinate `outer_idx` (row-major over all but the innermost
    /// dimension).
    fn invoke_group<F>(&self, outer_idx: usize, inner_strides: &[isize], inner: usize, f: &F)
    where
        F: Fn(&[u64], &[isize], usize),
    {
        let ndim = self.shape.len();
        let mut bases: SmallVec<[u64; STACK_OPERANDS]> =
            self.operands.iter().map(|op| op.base).collect();

        let mut rem = outer_idx;
        for d in (0..ndim - 1).rev() {
            let idx = rem % self.shape[d];
            rem /= self.shape[d];
            for (base, op) in bases.iter_mut().zip(self.operands.iter()) {
                *base = base.wrapping_add((idx as isize * op.byte_strides[d]) as u64);
            }
        }

        f(&bases, inner_strides, inner);
    }
}
