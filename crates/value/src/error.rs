// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

/// Errors produced while constructing or mutating a [`crate::DateTime64`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
	/// A field was syntactically a number but outside its XSD domain,
	/// e.g. month 13, hour 24, year 10000.
	#[error("{field} {value} is out of range for a DateTime64")]
	OutOfRange { field: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn out_of_range(field: &'static str, value: impl std::fmt::Display) -> Error {
	Error::OutOfRange { field, value: value.to_string() }
}
