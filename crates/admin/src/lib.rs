//! Theme Sections admin library.
//!
//! Embedded Shopify admin app that adds a ready-made Liquid section to the
//! store's active theme. Exposed as a library so the binary, the CLI and
//! the integration tests share one implementation.
//!
//! # Security
//!
//! This crate holds an offline Admin API token with `write_themes` scope
//! for the configured store.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod sections;
pub mod shopify;
pub mod state;
