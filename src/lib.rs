//! Library entry point for the feed-cache crate.
//! A local, time-boxed cache for an image feed fetched over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod feed;
pub mod fs;
pub mod log;
pub mod net;
pub mod refresh;
pub mod utils;

pub use utils::*;

/// Capacity of the channel in front of every actor.
pub const BUFFER_SIZE: usize = 128;
