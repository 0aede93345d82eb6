// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

use std::fmt;

/// Which of the four XSD temporal productions a lexical form parsed as, or a
/// packed value renders as.
///
/// Modeled as a fieldless enum rather than as ad hoc IRI string constants so
/// that comparisons are cheap and a `match` on it is exhaustively checked by
/// the compiler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XsdTemporalType {
	GYear,
	GYearMonth,
	Date,
	DateTime,
}

impl XsdTemporalType {
	/// The full `xsd:` datatype IRI for this production.
	pub const fn iri(self) -> &'static str {
		match self {
			XsdTemporalType::GYear => "http://www.w3.org/2001/XMLSchema#gYear",
			XsdTemporalType::GYearMonth => "http://www.w3.org/2001/XMLSchema#gYearMonth",
			XsdTemporalType::Date => "http://www.w3.org/2001/XMLSchema#date",
			XsdTemporalType::DateTime => "http://www.w3.org/2001/XMLSchema#dateTime",
		}
	}

	/// The local name, e.g. `"gYearMonth"`.
	pub const fn local_name(self) -> &'static str {
		match self {
			XsdTemporalType::GYear => "gYear",
			XsdTemporalType::GYearMonth => "gYearMonth",
			XsdTemporalType::Date => "date",
			XsdTemporalType::DateTime => "dateTime",
		}
	}

	/// Infer the production from a packed value's sentinel fields, as
	/// described in the codec's "datatype inference from output shape"
	/// rule: `month == 0` implies `gYear`, `day == 0` implies
	/// `gYearMonth`, no time component implies `date`, otherwise
	/// `dateTime`.
	pub(crate) fn from_value(value: &temporal_value::DateTime64) -> Self {
		if value.month() == 0 {
			XsdTemporalType::GYear
		} else if value.day() == 0 {
			XsdTemporalType::GYearMonth
		} else if !value.has_time() {
			XsdTemporalType::Date
		} else {
			XsdTemporalType::DateTime
		}
	}
}

impl fmt::Display for XsdTemporalType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.local_name())
	}
}
