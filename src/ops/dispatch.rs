//! DType dispatch macros
//!
//! These macros convert a runtime `DType` value into a concrete `Element`
//! type at the operation boundary, executing the body with `$T` bound to
//! the corresponding Rust type. They are the single place where the
//! runtime type system meets monomorphized kernels.
//!
//! Usage:
//! ```ignore
//! dispatch_dtype!(dtype, T => {
//!     // T is now a concrete type (f32, i64, Complex128, ...)
//!     unsafe { some_kernel::<T>(...) }
//! }, "op_name");
//! ```
//!
//! `Bool` is not a kernel element type and always reports
//! `UnsupportedDType`. F16/BF16 require the "f16" feature; without it they
//! report `UnsupportedDType` as well.

/// Dispatch over every numeric dtype (floats, ints, complex)
macro_rules! dispatch_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            DType::F64 => {
                type $T = f64;
                $body
            }
            DType::F32 => {
                type $T = f32;
                $body
            }
            DType::F16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::f16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            DType::BF16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::bf16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            DType::I64 => {
                type $T = i64;
                $body
            }
            DType::I32 => {
                type $T = i32;
                $body
            }
            DType::I16 => {
                type $T = i16;
                $body
            }
            DType::I8 => {
                type $T = i8;
                $body
            }
            DType::U64 => {
                type $T = u64;
                $body
            }
            DType::U32 => {
                type $T = u32;
                $body
            }
            DType::U16 => {
                type $T = u16;
                $body
            }
            DType::U8 => {
                type $T = u8;
                $body
            }
            DType::Complex64 => {
                type $T = crate::dtype::Complex64;
                $body
            }
            DType::Complex128 => {
                type $T = crate::dtype::Complex128;
                $body
            }
            DType::Bool => {
                return Err(Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                })
            }
        }
    };
}

/// Dispatch over the floating point dtypes only
///
/// Used by the infinity predicates, which are meaningless for integer,
/// boolean, and complex domains.
macro_rules! dispatch_float_dtype {
    ($dtype:expr, $T:ident => $body:block, $error_op:expr) => {
        match $dtype {
            DType::F64 => {
                type $T = f64;
                $body
            }
            DType::F32 => {
                type $T = f32;
                $body
            }
            DType::F16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::f16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            DType::BF16 => {
                #[cfg(feature = "f16")]
                {
                    type $T = half::bf16;
                    $body
                }
                #[cfg(not(feature = "f16"))]
                {
                    return Err(Error::UnsupportedDType {
                        dtype: $dtype,
                        op: $error_op,
                    });
                }
            }
            _ => {
                return Err(Error::UnsupportedDType {
                    dtype: $dtype,
                    op: $error_op,
                })
            }
        }
    };
}

pub(crate) use dispatch_dtype;
pub(crate) use dispatch_float_dtype;
