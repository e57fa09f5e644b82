//! # Kernel Initialization Module
//!
//! - `init`: bring-up sequence, one phase at a time
//! - `status`: per-component status table reported after bring-up

pub mod init;
pub mod status;

pub use init::init_kernel;
