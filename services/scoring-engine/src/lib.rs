//! Scoring Engine
//!
//! Implements the CVSS v4.0 vector pipeline:
//! - Canonical vector encoding and fail-closed decoding
//! - Macro vector (EQ1..EQ6) derivation
//! - Table-driven scoring behind a pluggable oracle
//! - Independent scores for the five metric categories
//! - Session state with change notification
//!
//! # Architecture
//!
//! ```text
//!  vector string
//!        │
//!    ┌───▼───┐
//!    │ Codec │  ← validates fully, then commits
//!    └───┬───┘
//!        │
//!   ┌────▼─────┐
//!   │Selection │
//!   └────┬─────┘
//!        │
//!   ┌────▼──────────┐    ┌────────┐
//!   │ Category      │───►│ Oracle │
//!   │ overlays      │    └────────┘
//!   └────┬──────────┘
//!        │
//!   ┌────▼─────┐
//!   │ Severity │
//!   └──────────┘
//! ```

pub mod category;
pub mod codec;
pub mod config;
pub mod events;
pub mod macro_vector;
pub mod oracle;
pub mod session;

// Library version
pub const SERVICE_VERSION: &str = "0.1.0";
