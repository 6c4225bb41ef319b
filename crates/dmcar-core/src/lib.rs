//! DMCAR Core Types and Definitions
//!
//! This crate provides the record model shared by the DMCAR crates. It includes:
//!
//! - **Cells**: heterogeneous spreadsheet values and their coercion rules ([`cell`] module)
//! - **Records**: coerced, identity-bearing rows for domains, classes, attributes and relationships ([`record`] module)
//! - **Model**: resolved records with typed ids and tagged parent references ([`model`] module)

pub mod cell;
pub mod model;
pub mod record;
