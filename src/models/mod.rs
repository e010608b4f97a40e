// ABOUTME: Core data models for the computer use viewer: VM status and viewer state

pub mod viewer;

pub use viewer::{Control, ViewerBody, ViewerState, VmStatus};
