//! # dm-media
//!
//! HTTP client for the external image hosting service.
//!
//! Implements the `ImageStore` trait from `dm-core`: message images arrive as
//! inline `data:` URIs, get exchanged for a hosted URL at send time, and are
//! deleted best-effort when a message is unsent.

mod client;

pub use client::HttpImageStore;
