mod gray;
mod hsv;

pub use gray::{bgr_from_rgb, gray_from_bgr, rgb_from_bgr};
pub use hsv::hsv_from_bgr;
