mod kernel;
mod ops;

pub use kernel::{Kernel, KernelShape};
pub use ops::{close, dilate, erode, open, BorderMode};
