//! # hoststats-client
//!
//! Client for the HostStats analytics server's TCP wire protocol:
//! - One-shot connections: open, send, read until EOF, close
//! - One-byte request codes with `;`-joined positional parameters
//! - In-band `ERROR:` channel layered over plain-text payloads
//! - Decoders for value maps, tables and delimiter-split lists
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         Caller                               │
//! │              (web layer, CLI, detectors, ...)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ typed operations
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Client                                │
//! │        connect → send → read-until-EOF → close               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Codec     │          │   Decoders  │
//!   │ (code+NUL)  │          │ Values/Table│
//!   └─────────────┘          └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{HostStatsError, Result};
pub use config::ClientConfig;
pub use client::{Client, PROFILE_ALL};
pub use protocol::{Row, ServerStatus, Table, ValueMap};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the client crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
