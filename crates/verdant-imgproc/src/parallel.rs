use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use verdant_image::Image;

/// Errors that can occur during parallel execution.
#[derive(Error, Debug, PartialEq)]
pub enum ParallelError {
    /// The thread pool failed to build.
    #[error("failed to build thread pool: {0}")]
    BuildError(String),

    /// The requested thread count is invalid.
    #[error("thread count must be > 0, got {0}")]
    InvalidThreadCount(usize),
}

/// Controls on which threads the pixel kernels run.
///
/// Every kernel in this crate is written against rayon; the strategy decides
/// which pool those kernels see. Results do not depend on the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// Run on a dedicated single-thread pool.
    #[default]
    Serial,

    /// Use the global Rayon thread pool.
    Parallel,

    /// Run on a local thread pool with `n` threads.
    ///
    /// # Warning
    /// Creates a new thread pool on every call.
    Fixed(usize),
}

impl ExecutionStrategy {
    /// Number of worker threads the strategy resolves to.
    pub fn num_threads(&self) -> usize {
        match self {
            ExecutionStrategy::Serial => 1,
            ExecutionStrategy::Parallel => rayon::current_num_threads(),
            ExecutionStrategy::Fixed(n) => *n,
        }
    }

    /// Run `op` with the pool selected by the strategy.
    ///
    /// # Errors
    ///
    /// Fails when `Fixed(0)` is requested or the pool cannot be built.
    pub fn install<R, F>(&self, op: F) -> Result<R, ParallelError>
    where
        R: Send,
        F: FnOnce() -> R + Send,
    {
        let num_threads = match self {
            ExecutionStrategy::Parallel => return Ok(op()),
            ExecutionStrategy::Serial => 1,
            ExecutionStrategy::Fixed(0) => return Err(ParallelError::InvalidThreadCount(0)),
            ExecutionStrategy::Fixed(n) => *n,
        };

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| ParallelError::BuildError(e.to_string()))?;

        Ok(pool.install(op))
    }
}

/// Apply a function to each pixel in the image in parallel.
pub fn par_iter_rows<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&[T1], &mut [T2]) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    if src.is_empty() {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .chunks_exact(C1)
                .zip(dst_chunk.chunks_exact_mut(C2))
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel in the image in parallel with a value.
pub fn par_iter_rows_val<T1, const C1: usize, T2, const C2: usize>(
    src: &Image<T1, C1>,
    dst: &mut Image<T2, C2>,
    f: impl Fn(&T1, &mut T2) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
{
    if src.is_empty() {
        return;
    }

    src.as_slice()
        .par_chunks_exact(C1 * src.cols())
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C2 * src.cols()))
        .for_each(|(src_chunk, dst_chunk)| {
            src_chunk
                .iter()
                .zip(dst_chunk.iter_mut())
                .for_each(|(src_pixel, dst_pixel)| {
                    f(src_pixel, dst_pixel);
                });
        });
}

/// Apply a function to each pixel in the image in parallel with two values.
pub fn par_iter_rows_val_two<T1, const C1: usize, T2, const C2: usize, T3, const C3: usize>(
    src1: &Image<T1, C1>,
    src2: &Image<T2, C2>,
    dst: &mut Image<T3, C3>,
    f: impl Fn(&T1, &T2, &mut T3) + Send + Sync,
) where
    T1: Send + Sync,
    T2: Send + Sync,
    T3: Send + Sync,
{
    if src1.is_empty() {
        return;
    }

    src1.as_slice()
        .par_chunks_exact(C1 * src1.cols())
        .zip(src2.as_slice().par_chunks_exact(C2 * src1.cols()))
        .zip(dst.as_slice_mut().par_chunks_exact_mut(C3 * src1.cols()))
        .for_each(|((src1_chunk, src2_chunk), dst_chunk)| {
            src1_chunk
                .iter()
                .zip(src2_chunk.iter())
                .zip(dst_chunk.iter_mut())
                .for_each(|((src1_pixel, src2_pixel), dst_pixel)| {
                    f(src1_pixel, src2_pixel, dst_pixel);
                });
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_image::{ImageError, ImageSize};

    #[test]
    fn test_install_serial() -> Result<(), ParallelError> {
        let threads = ExecutionStrategy::Serial.install(rayon::current_num_threads)?;
        assert_eq!(threads, 1);
        Ok(())
    }

    #[test]
    fn test_install_fixed() -> Result<(), ParallelError> {
        let threads = ExecutionStrategy::Fixed(3).install(rayon::current_num_threads)?;
        assert_eq!(threads, 3);
        assert_eq!(ExecutionStrategy::Fixed(3).num_threads(), 3);
        Ok(())
    }

    #[test]
    fn test_install_fixed_error() {
        let res = ExecutionStrategy::Fixed(0).install(|| ());
        assert!(matches!(res, Err(ParallelError::InvalidThreadCount(0))));
    }

    #[test]
    fn test_par_iter_rows_val_two() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let a = Image::<u8, 1>::new(size, vec![1, 2, 3, 4])?;
        let b = Image::<u8, 1>::new(size, vec![10, 20, 30, 40])?;
        let mut out = Image::<u8, 1>::from_size_val(size, 0)?;
        par_iter_rows_val_two(&a, &b, &mut out, |x, y, z| *z = x + y);
        assert_eq!(out.as_slice(), &[11, 22, 33, 44]);
        Ok(())
    }

    #[test]
    fn test_par_iter_rows_empty() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 0,
            height: 3,
        };
        let src = Image::<u8, 3>::new(size, vec![])?;
        let mut dst = Image::<u8, 1>::new(size, vec![])?;
        par_iter_rows(&src, &mut dst, |_, d| d[0] = 1);
        assert!(dst.as_slice().is_empty());
        Ok(())
    }
}
