//! # hh-core
//!
//! Core types and error definitions shared by the household solver crates.
//!
//! This crate provides the foundational building blocks used across the
//! workspace – the floating-point aliases and the error hierarchy together
//! with the `ensure!` / `ensure_post!` / `fail!` macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` / `ensure_post!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Floating-point type used throughout the library.
pub type Real = f64;

/// Alias used for array sizes / indices.
pub type Size = usize;

/// An interest rate expressed as a decimal (e.g. 0.04 = 4 %).
pub type Rate = Real;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
