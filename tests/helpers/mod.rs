//! Test helpers module
//!
//! This module provides utilities for integration tests: temporary
//! translation trees, cache directories and a translator test context.

#![allow(dead_code)]

pub mod test_context;
pub mod test_data;

pub use test_context::*;
pub use test_data::*;
