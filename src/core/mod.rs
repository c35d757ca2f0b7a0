//! Core components of the `idemark-import` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The main [`ImportClient`] and its builder.
//! - The primary [`ImportError`] type.
//! - Shared data models like [`ImportRequest`] and [`ImportResult`].
//! - Internal networking and config-discovery logic.

/// The main client (`ImportClient`), builder, and the discovered-config cache.
pub mod client;
/// The primary error type (`ImportError`) for the crate.
pub mod error;
/// Data models shared by the strategies and the HTTP surface.
pub mod models;

pub(crate) mod net;

// convenient re-exports so most code can just `use crate::core::ImportClient`
pub use client::{ConfigCache, ImportClient, ImportClientBuilder};
pub use error::ImportError;
pub use models::{
    ImportRequest, ImportResponse, ImportResult, ImportStrategy, ParseStrategyError, PlatformConfig,
};
