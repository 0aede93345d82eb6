// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

//! Lexical codec between XSD `gYear`, `gYearMonth`, `date`, and `dateTime`
//! text and the packed [`temporal_value::DateTime64`] representation.
//!
//! [`parse`] accepts exactly the four XSD lexical productions and rejects
//! everything else with [`Error::ParseError`]; [`render`] renders a packed
//! value back to its canonical lexical form together with the
//! [`XsdTemporalType`] it represents. Round-tripping `render` -> `parse` is
//! the identity on every value this crate can produce.

pub use datatype::XsdTemporalType;
pub use error::{Error, Result};
pub use parse::parse;
pub use render::render;

mod datatype;
mod error;
mod parse;
mod render;
