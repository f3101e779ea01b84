//! Containers (plates, tubes) holding labelled wells, and planned liquid
//! transfers between those wells.
//!
//! Container codes and well labels are derived from plate geometry and
//! sequence numbers alone, zero padded to fixed widths so they sort correctly
//! as plain text. Every construction path checks coordinates and numbers
//! against the bounds of the container's format before writing, and the
//! schema in the `migration` crate repeats those checks as table constraints.

pub mod codec;
pub mod common;
pub mod config;
pub mod containers;
pub mod formats;
pub mod plans;
pub mod sentinels;
pub mod sequences;
pub mod validation;
pub mod wells;

#[cfg(test)]
mod test_helpers;

pub use codec::{
    Format, compose_key, decode_well_label, encode_container_code, encode_well_label, split_key,
};
pub use common::errors::{LabwareError, LabwareResult, ValidationError};
