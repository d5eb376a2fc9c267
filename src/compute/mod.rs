//! Temporal indexing, filtering, column mapping, aggregation and bulk operations.
//!
//! Everything here is a synchronous computation over in-memory data.

pub mod aggregate;
pub mod columns;
pub mod filter;
pub mod operation;
pub mod temporal;
pub mod validation;
