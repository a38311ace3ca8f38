//! Theme Sections Core - Shared domain types.
//!
//! This crate provides the types shared by the theme sections components:
//! - `admin` - Embedded admin app (HTTP surface, Shopify client, workflow)
//! - `cli` - Command-line tools for migrations and manual runs
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no
//! database access, no HTTP clients. The theme selection rule and the
//! section key derivation live here so they can be tested in isolation.
//!
//! # Modules
//!
//! - [`types`] - Theme, shop, section file and workflow result types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
