//! Special-relativistic time dilation on arbitrary-precision decimals.

pub mod special;

pub use special::{VelocityPercent, dilated_time, gamma_factor, near_light_threshold};
