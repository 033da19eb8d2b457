//! Types library for the CVSS v4.0 calculator
//!
//! Core type definitions shared by the scoring engine and the gateway.
//!
//! # Modules
//! - `metric`: Metric definitions and groups
//! - `catalog`: The CVSS v4.0 metric catalog in canonical vector order
//! - `selection`: Current metric choices
//! - `macro_vector`: EQ1..EQ6 macro vector key
//! - `numeric`: Fixed-point score type
//! - `severity`: Qualitative rating classifier
//! - `ids`: Session identifiers
//! - `errors`: Error taxonomy

// Public modules
pub mod metric;
pub mod catalog;
pub mod selection;
pub mod macro_vector;
pub mod numeric;
pub mod severity;
pub mod ids;
pub mod errors;

// Library version constant
pub const LIB_VERSION: &str = "1.0.0";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::metric::*;
    pub use crate::catalog::*;
    pub use crate::selection::*;
    pub use crate::macro_vector::*;
    pub use crate::numeric::*;
    pub use crate::severity::*;
    pub use crate::ids::*;
    pub use crate::errors::*;
}
