pub mod catalog;
pub mod metrics;
pub mod scores;
pub mod vector;
