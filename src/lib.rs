// ABOUTME: Library crate for the computer use viewer exposing public API for testing and external use

pub mod app;
pub mod commands;
pub mod components;
pub mod config;
pub mod lifecycle;
pub mod models;
