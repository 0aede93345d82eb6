// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

//! Packed 64-bit representation of XSD `gYear`, `gYearMonth`, `date`, and
//! `dateTime` values.
//!
//! [`DateTime64`] is a value type: immutable after construction, trivially
//! copyable, and carrying no heap allocation. Equality, ordering, and
//! hashing are defined directly on its bit representation (see
//! [`DateTime64::to_bits`]) so that a caller embedding it as an index key
//! can compare and sort without decoding it.
//!
//! This crate has no knowledge of SPARQL, RDF, or any lexical syntax; see
//! `temporal-codec` for parsing and rendering XSD lexical forms into and out
//! of this representation.

pub use error::{Error, Result};
pub use packed::{DateTime64, NO_HOUR};
pub use timezone::TimeZone;

mod error;
mod packed;
mod timezone;
