//! Core error types for the apikit libraries
//!
//! This crate provides pure data types for error reporting, with no dependencies
//! on HTTP frameworks. It includes:
//! - Per-field error details carried in response envelopes (`ErrorDetail`)
//! - Error catalog support (`ErrDef`) and the shared catalog entries

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod catalog;
pub mod detail;

// Re-export commonly used types
pub use catalog::ErrDef;
pub use detail::ErrorDetail;
