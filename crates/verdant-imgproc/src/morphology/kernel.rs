/// Shapes of morphological `Kernels`.
///
/// All kernels are anchored at their geometric center.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KernelShape {
    /// A square structuring element of `size x size` taps, all active.
    Box {
        /// The side length of the square kernel.
        size: usize,
    },

    /// A rectangular structuring element, all taps active.
    Rect {
        /// The width of the kernel.
        width: usize,
        /// The height of the kernel.
        height: usize,
    },

    /// A plus shaped structuring element: only the center row and column are active.
    Cross {
        /// The side length of the square cross kernel.
        size: usize,
    },
}

/// A morphological structuring element.
///
/// Stores a binary mask where 1 marks the taps taking part in the operation.
///
/// # Example
///
/// ```rust
/// use verdant_imgproc::morphology::{Kernel, KernelShape};
///
/// let kernel = Kernel::new(KernelShape::Box { size: 5 });
/// assert_eq!(kernel.width(), 5);
/// assert_eq!(kernel.height(), 5);
/// assert_eq!(kernel.pad(), (2, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Kernel {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Create a morphological kernel from a shape.
    pub fn new(shape: KernelShape) -> Self {
        match shape {
            KernelShape::Box { size } => Self::filled(size, size),
            KernelShape::Rect { width, height } => Self::filled(width, height),
            KernelShape::Cross { size } => {
                let center = size / 2;
                let data = (0..size * size)
                    .map(|i| u8::from(i / size == center || i % size == center))
                    .collect();
                Self {
                    data,
                    width: size,
                    height: size,
                }
            }
        }
    }

    fn filled(width: usize, height: usize) -> Self {
        Self {
            data: vec![1; width * height],
            width,
            height,
        }
    }

    /// Get a reference to the kernel data.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the width of the kernel.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the kernel.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the padding for the kernel (offset from center) as `(rows, cols)`.
    pub fn pad(&self) -> (usize, usize) {
        (self.height / 2, self.width / 2)
    }

    /// Offsets `(dy, dx)` of the active taps relative to the anchor.
    pub(crate) fn offsets(&self) -> Vec<(isize, isize)> {
        let (pad_h, pad_w) = self.pad();
        self.data
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 1)
            .map(|(i, _)| {
                let ky = (i / self.width) as isize - pad_h as isize;
                let kx = (i % self.width) as isize - pad_w as isize;
                (ky, kx)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_kernel() {
        let kernel = Kernel::new(KernelShape::Box { size: 3 });
        assert_eq!(kernel.width(), 3);
        assert_eq!(kernel.height(), 3);
        assert!(kernel.data().iter().all(|&x| x == 1));
        assert_eq!(kernel.offsets().len(), 9);
    }

    #[test]
    fn test_cross_kernel() {
        let kernel = Kernel::new(KernelShape::Cross { size: 3 });
        assert_eq!(kernel.data(), &[0, 1, 0, 1, 1, 1, 0, 1, 0]);
        assert_eq!(kernel.offsets(), vec![(-1, 0), (0, -1), (0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn test_rect_kernel_padding() {
        let kernel = Kernel::new(KernelShape::Rect {
            width: 5,
            height: 3,
        });
        assert_eq!(kernel.pad(), (1, 2));
    }
}
