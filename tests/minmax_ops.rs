//! Integration tests for min/max-with-index reductions
//!
//! Tests verify correctness across:
//! - Shapes, axes, and keepdim variations
//! - NaN propagation and early exit
//! - Complex magnitude ordering and tie-breaking
//! - Integer domains (signed, unsigned, beyond-f64 precision)
//! - Strided (non-contiguous) inputs and output buffer reuse

use axred::dtype::{Complex64, DType};
use axred::error::Error;
use axred::ops::{max_dim, max_dim_out, min_dim, min_dim_out};
use axred::tensor::Tensor;

// ============================================================================
// Shape behavior
// ============================================================================

#[test]
fn test_scenario_2d_axis1() {
    // [[1, 5, 2], [9, 0, 3]], axis=1, keepdim=false
    let input = Tensor::from_slice(&[1i32, 5, 2, 9, 0, 3], &[2, 3]);

    let (values, indices) = min_dim(&input, 1, false).unwrap();
    assert_eq!(values.shape(), &[2]);
    assert_eq!(values.to_vec::<i32>(), vec![1, 0]);
    assert_eq!(indices.to_vec::<i64>(), vec![0, 1]);

    let (values, indices) = max_dim(&input, 1, false).unwrap();
    assert_eq!(values.to_vec::<i32>(), vec![5, 9]);
    assert_eq!(indices.to_vec::<i64>(), vec![1, 0]);
}

#[test]
fn test_axis0() {
    // Columns: (1, 9), (5, 0), (2, 3)
    let input = Tensor::from_slice(&[1i32, 5, 2, 9, 0, 3], &[2, 3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.shape(), &[3]);
    assert_eq!(values.to_vec::<i32>(), vec![1, 0, 2]);
    assert_eq!(indices.to_vec::<i64>(), vec![0, 1, 0]);

    let (values, indices) = max_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<i32>(), vec![9, 5, 3]);
    assert_eq!(indices.to_vec::<i64>(), vec![1, 0, 1]);
}

#[test]
fn test_keepdim_shapes() {
    let input = Tensor::from_slice(&[1.0f32, 5.0, 2.0, 9.0, 0.0, 3.0], &[2, 3]);

    let (values, indices) = min_dim(&input, 1, true).unwrap();
    assert_eq!(values.shape(), &[2, 1]);
    assert_eq!(indices.shape(), &[2, 1]);
    assert_eq!(values.to_vec::<f32>(), vec![1.0, 0.0]);

    let (values, indices) = min_dim(&input, 0, true).unwrap();
    assert_eq!(values.shape(), &[1, 3]);
    assert_eq!(indices.shape(), &[1, 3]);
}

#[test]
fn test_1d_reduces_to_scalar() {
    let input = Tensor::from_slice(&[3.0f64, 1.0, 2.0], &[3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.shape(), &[] as &[usize]);
    assert_eq!(values.to_vec::<f64>(), vec![1.0]);
    assert_eq!(indices.to_vec::<i64>(), vec![1]);

    let (values, _) = min_dim(&input, 0, true).unwrap();
    assert_eq!(values.shape(), &[1]);
}

#[test]
fn test_3d_middle_axis() {
    // Shape [2, 2, 2]: lanes over (i, k) reduce the j axis
    let input = Tensor::from_slice(&[4.0f32, 1.0, 2.0, 8.0, 7.0, 3.0, 5.0, 6.0], &[2, 2, 2]);

    let (values, indices) = min_dim(&input, 1, false).unwrap();
    assert_eq!(values.shape(), &[2, 2]);
    // (0,·,0): min(4, 2)=2@1  (0,·,1): min(1, 8)=1@0
    // (1,·,0): min(7, 5)=5@1  (1,·,1): min(3, 6)=3@0
    assert_eq!(values.to_vec::<f32>(), vec![2.0, 1.0, 5.0, 3.0]);
    assert_eq!(indices.to_vec::<i64>(), vec![1, 0, 1, 0]);
}

#[test]
fn test_empty_lanes() {
    // Zero lanes (dim 0 has extent 0); reducing dim 1 is still well-formed
    let input = Tensor::from_slice(&[] as &[f32], &[0, 3]);

    let (values, indices) = min_dim(&input, 1, false).unwrap();
    assert_eq!(values.shape(), &[0]);
    assert_eq!(indices.shape(), &[0]);
    assert!(values.to_vec::<f32>().is_empty());
}

// ============================================================================
// Index bounds and agreement with a reference scan
// ============================================================================

#[test]
fn test_indices_in_bounds_and_match_reference() {
    // Deterministic pseudo-random values
    let data: Vec<i32> = (0..60).map(|i| (i * 37 + 11) % 17 - 8).collect();
    let input = Tensor::from_slice(&data, &[4, 5, 3]);

    let (values, indices) = min_dim(&input, 1, false).unwrap();
    let values = values.to_vec::<i32>();
    let indices = indices.to_vec::<i64>();

    for i in 0..4 {
        for k in 0..3 {
            let lane: Vec<i32> = (0..5).map(|j| data[i * 15 + j * 3 + k]).collect();
            let mut best = lane[0];
            let mut best_idx = 0i64;
            for (j, &v) in lane.iter().enumerate() {
                if v < best {
                    best = v;
                    best_idx = j as i64;
                }
            }
            let flat = i * 3 + k;
            assert_eq!(values[flat], best);
            assert_eq!(indices[flat], best_idx);
            assert!((0..5).contains(&indices[flat]));
        }
    }
}

#[test]
fn test_ties_select_first_occurrence() {
    let input = Tensor::from_slice(&[2.0f64, 1.0, 1.0, 2.0], &[4]);

    let (_, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(indices.to_vec::<i64>(), vec![1]);

    let (_, indices) = max_dim(&input, 0, false).unwrap();
    assert_eq!(indices.to_vec::<i64>(), vec![0]);
}

// ============================================================================
// NaN propagation
// ============================================================================

#[test]
fn test_nan_poisons_min() {
    // [3.0, NaN, 1.0] -> (NaN, 1), not (1.0, 2)
    let input = Tensor::from_slice(&[3.0f32, f32::NAN, 1.0], &[3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert!(values.to_vec::<f32>()[0].is_nan());
    assert_eq!(indices.to_vec::<i64>(), vec![1]);
}

#[test]
fn test_nan_poisons_max() {
    let input = Tensor::from_slice(&[3.0f64, f64::NAN, 9.0], &[3]);

    let (values, indices) = max_dim(&input, 0, false).unwrap();
    assert!(values.to_vec::<f64>()[0].is_nan());
    assert_eq!(indices.to_vec::<i64>(), vec![1]);
}

#[test]
fn test_nan_first_element() {
    let input = Tensor::from_slice(&[f32::NAN, 2.0, 1.0], &[3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert!(values.to_vec::<f32>()[0].is_nan());
    assert_eq!(indices.to_vec::<i64>(), vec![0]);
}

#[test]
fn test_nan_after_update_chain() {
    // Updates at 1 (2.0), then the NaN at 2 overwrites and halts
    let input = Tensor::from_slice(&[5.0f32, 2.0, f32::NAN, 1.0], &[4]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert!(values.to_vec::<f32>()[0].is_nan());
    assert_eq!(indices.to_vec::<i64>(), vec![2]);
}

#[test]
fn test_nan_only_poisons_its_own_lane() {
    let input = Tensor::from_slice(&[1.0f32, f32::NAN, 2.0, 0.5], &[2, 2]);

    let (values, indices) = min_dim(&input, 1, false).unwrap();
    let values = values.to_vec::<f32>();
    assert!(values[0].is_nan());
    assert_eq!(values[1], 0.5);
    assert_eq!(indices.to_vec::<i64>(), vec![1, 1]);
}

// ============================================================================
// Element domains
// ============================================================================

#[test]
fn test_unsigned_ints() {
    let input = Tensor::from_slice(&[5u32, 0, 7], &[3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<u32>(), vec![0]);
    assert_eq!(indices.to_vec::<i64>(), vec![1]);

    let (values, indices) = max_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<u32>(), vec![7]);
    assert_eq!(indices.to_vec::<i64>(), vec![2]);
}

#[test]
fn test_i64_beyond_f64_precision() {
    // Adjacent values above 2^53 collapse in f64; native keys keep them apart
    let big = 1i64 << 62;
    let input = Tensor::from_slice(&[big + 1, big], &[2]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<i64>(), vec![big]);
    assert_eq!(indices.to_vec::<i64>(), vec![1]);
}

#[test]
fn test_complex_orders_by_magnitude() {
    // |3+4i| = 5, |1+1i| = sqrt(2)
    let input = Tensor::from_slice(
        &[Complex64::new(3.0, 4.0), Complex64::new(1.0, 1.0)],
        &[2],
    );

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<Complex64>(), vec![Complex64::new(1.0, 1.0)]);
    assert_eq!(indices.to_vec::<i64>(), vec![1]);

    let (values, indices) = max_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<Complex64>(), vec![Complex64::new(3.0, 4.0)]);
    assert_eq!(indices.to_vec::<i64>(), vec![0]);
}

#[test]
fn test_complex_magnitude_ties_keep_first() {
    // |i| == |1| == 1: equal keys, the earlier element wins for both ops
    let input = Tensor::from_slice(
        &[Complex64::new(0.0, 1.0), Complex64::new(1.0, 0.0)],
        &[2],
    );

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<Complex64>(), vec![Complex64::new(0.0, 1.0)]);
    assert_eq!(indices.to_vec::<i64>(), vec![0]);

    let (_, indices) = max_dim(&input, 0, false).unwrap();
    assert_eq!(indices.to_vec::<i64>(), vec![0]);
}

#[test]
fn test_complex_nan_component_poisons() {
    let input = Tensor::from_slice(
        &[
            Complex64::new(1.0, 0.0),
            Complex64::new(f32::NAN, 0.0),
            Complex64::new(0.0, 0.0),
        ],
        &[3],
    );

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert!(values.to_vec::<Complex64>()[0].is_nan());
    assert_eq!(indices.to_vec::<i64>(), vec![1]);
}

#[cfg(feature = "f16")]
#[test]
fn test_f16_reduction() {
    use half::f16;

    let data: Vec<f16> = [2.0f32, 0.5, 1.0].iter().map(|&v| f16::from_f32(v)).collect();
    let input = Tensor::from_slice(&data, &[3]);

    let (values, indices) = min_dim(&input, 0, false).unwrap();
    assert_eq!(values.to_vec::<f16>(), vec![f16::from_f32(0.5)]);
    assert_eq!(indices.to_vec::<i64>(), vec![1]);
}

// ============================================================================
// Strided inputs and output buffer reuse
// ============================================================================

#[test]
fn test_transposed_input() {
    // Transpose of [[1, 5, 2], [9, 0, 3]] has shape [3, 2]; reducing its
    // dim 0 must match reducing dim 1 of the base tensor.
    let base = Tensor::from_slice(&[1i32, 5, 2, 9, 0, 3], &[2, 3]);
    let transposed = base.transpose(0, 1).unwrap();
    assert!(!transposed.is_contiguous());

    let (values, indices) = min_dim(&transposed, 0, false).unwrap();
    assert_eq!(values.to_vec::<i32>(), vec![1, 0]);
    assert_eq!(indices.to_vec::<i64>(), vec![0, 1]);

    let (values, indices) = max_dim(&transposed, 1, false).unwrap();
    assert_eq!(values.to_vec::<i32>(), vec![9, 5, 3]);
    assert_eq!(indices.to_vec::<i64>(), vec![1, 0, 1]);
}

#[test]
fn test_output_buffers_reused_across_calls() {
    let mut values = Tensor::empty(&[0], DType::F32);
    let mut indices = Tensor::empty(&[0], DType::I64);

    let a = Tensor::from_slice(&[1.0f32, 5.0, 2.0, 9.0, 0.0, 3.0], &[2, 3]);
    min_dim_out(&mut values, &mut indices, &a, 1, false).unwrap();
    assert_eq!(values.shape(), &[2]);
    assert_eq!(values.to_vec::<f32>(), vec![1.0, 0.0]);

    // Same buffers, different input shape, axis, and keepdim
    let b = Tensor::from_slice(&[4.0f32, 2.0, 6.0, 1.0, 8.0, 0.0, 3.0, 7.0], &[4, 2]);
    max_dim_out(&mut values, &mut indices, &b, 0, true).unwrap();
    assert_eq!(values.shape(), &[1, 2]);
    assert_eq!(indices.shape(), &[1, 2]);
    assert_eq!(values.to_vec::<f32>(), vec![8.0, 7.0]);
    assert_eq!(indices.to_vec::<i64>(), vec![2, 3]);

    // Stale higher-rank buffers from the keepdim call are also accepted
    let c = Tensor::from_slice(&[5.0f32, 4.0, 3.0], &[3]);
    min_dim_out(&mut values, &mut indices, &c, 0, false).unwrap();
    assert_eq!(values.shape(), &[] as &[usize]);
    assert_eq!(values.to_vec::<f32>(), vec![3.0]);
    assert_eq!(indices.to_vec::<i64>(), vec![2]);
}

// ============================================================================
// Error conditions
// ============================================================================

#[test]
fn test_invalid_dimension() {
    let input = Tensor::from_slice(&[1.0f32, 2.0], &[2]);
    let result = min_dim(&input, 1, false);
    assert!(matches!(result, Err(Error::InvalidDimension { dim: 1, ndim: 1 })));
}

#[test]
fn test_empty_dimension_rejected() {
    let input = Tensor::from_slice(&[] as &[f32], &[2, 0]);
    let result = min_dim(&input, 1, false);
    assert!(matches!(result, Err(Error::EmptyDimension { dim: 1 })));
}

#[test]
fn test_value_dtype_mismatch() {
    let input = Tensor::from_slice(&[1.0f32, 2.0], &[2]);
    let mut values = Tensor::empty(&[0], DType::F64);
    let mut indices = Tensor::empty(&[0], DType::I64);

    let result = min_dim_out(&mut values, &mut indices, &input, 0, false);
    assert!(matches!(result, Err(Error::DTypeMismatch { .. })));
}

#[test]
fn test_index_dtype_must_be_i64() {
    let input = Tensor::from_slice(&[1.0f32, 2.0], &[2]);
    let mut values = Tensor::empty(&[0], DType::F32);
    let mut indices = Tensor::empty(&[0], DType::I32);

    let result = max_dim_out(&mut values, &mut indices, &input, 0, false);
    assert!(matches!(result, Err(Error::DTypeMismatch { .. })));
}

#[test]
fn test_bool_input_unsupported() {
    let input = Tensor::from_bool_slice(&[true, false], &[2]);
    let result = min_dim(&input, 0, false);
    assert!(matches!(result, Err(Error::UnsupportedDType { .. })));
}
