#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image basic operations module.
pub mod core;

/// utilities to draw on images.
pub mod draw;

/// edge detection module.
pub mod edges;

/// binary morphology module.
pub mod morphology;

/// row-parallel helpers and execution strategies.
pub mod parallel;

/// operations to threshold images.
pub mod threshold;
