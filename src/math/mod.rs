//! Mathematical utilities for gesture matching.
//!
//! This module provides:
//! - [`angles`]: vertex angles between landmark rays (nalgebra vectors)
//! - [`dtw`]: exact and windowed dynamic time warping

pub mod angles;
pub mod dtw;

pub use angles::{angle_between, joint_angle};
pub use dtw::{dtw_distance, fast_dtw_distance, Alignment};
