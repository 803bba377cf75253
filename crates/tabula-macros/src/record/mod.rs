//! Implementation of the `#[derive(Record)]` macro.
//!
//! This module generates `Record` accessors, column definitions, and field
//! constants from struct annotations.

mod attrs;
mod derive;

pub use derive::record_derive_impl;
