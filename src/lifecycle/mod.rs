// ABOUTME: Lifecycle API integration for querying, starting, and stopping the computer use VM

pub mod client;
pub mod error;

pub use client::{CommandReply, HttpLifecycleClient, LifecycleApi, StatusReport};
pub use error::LifecycleError;

#[cfg(test)]
pub use client::MockLifecycleApi;
