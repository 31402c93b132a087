// er301-rs/er301/src/device/mod.rs

/// Device construction
pub mod builder;
/// Type-state device handle and its commands
pub mod handle;

pub use builder::DeviceBuilder;
pub use handle::{Device, Initialized, Uninitialized};
