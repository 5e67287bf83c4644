//! # lift-core
//!
//! Core types and input coercion for postlift.
//!
//! This crate provides the foundational types shared across all postlift crates:
//! - Source records read from the static blog export
//! - Remote resource references (`Link` objects) embedded in composite records
//! - The composite blog post assembled from a source record and resolved ids
//! - Migration phase enum with its ordering rules
//! - Lenient coercion helpers (numbers, dates, slugs, content keys)
//! - Cross-cutting error types

pub mod coerce;
pub mod entities;
pub mod enums;
pub mod errors;

pub use errors::CoreError;
