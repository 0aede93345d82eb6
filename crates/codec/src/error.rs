// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

/// Errors produced while parsing or rendering an XSD temporal lexical form.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
	/// A field was syntactically a number but outside its semantic domain
	/// (e.g. month 13, hour 24, year 10000). Delegates to the field
	/// validation already performed by `temporal-value`.
	#[error(transparent)]
	OutOfRange(#[from] temporal_value::Error),

	/// The input did not match any of the four accepted lexical
	/// productions (`gYear`, `gYearMonth`, `date`, `dateTime`).
	#[error("'{input}' is not a valid XSD gYear, gYearMonth, date, or dateTime literal")]
	ParseError { input: String },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn parse_error(input: impl Into<String>) -> Error {
	Error::ParseError { input: input.into() }
}
