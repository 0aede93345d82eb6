// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

use std::fmt::Write as _;

use temporal_value::{DateTime64, TimeZone};
use tracing::instrument;

use crate::datatype::XsdTemporalType;

/// Render a packed value to its canonical lexical form and the XSD datatype
/// it represents.
///
/// The datatype is inferred purely from the value's sentinel fields (see
/// [`XsdTemporalType::from_value`]): `month == 0` renders as `gYear`,
/// `day == 0` as `gYearMonth`, no time component as `date`, otherwise as
/// `dateTime`.
#[instrument(level = "trace", skip_all)]
pub fn render(value: DateTime64) -> (String, XsdTemporalType) {
	let ty = XsdTemporalType::from_value(&value);

	let mut out = String::with_capacity(32);
	write_year(&mut out, value.year());

	if ty == XsdTemporalType::GYear {
		write_time_zone(&mut out, value.time_zone());
		return (out, ty);
	}

	let _ = write!(out, "-{:02}", value.month());
	if ty == XsdTemporalType::GYearMonth {
		write_time_zone(&mut out, value.time_zone());
		return (out, ty);
	}

	let _ = write!(out, "-{:02}", value.day());
	if ty == XsdTemporalType::Date {
		write_time_zone(&mut out, value.time_zone());
		return (out, ty);
	}

	let _ = write!(out, "T{:02}:{:02}:{}", value.hour(), value.minute(), format_second(value.second()));
	write_time_zone(&mut out, value.time_zone());
	(out, ty)
}

/// Years are padded to at least 4 digits (with a leading `-` for negative
/// years), but the padding routine does not hard-code the width: a wider
/// representable range upstream would still render without truncation.
fn write_year(out: &mut String, year: i32) {
	let negative = year < 0;
	let magnitude = year.unsigned_abs();
	if negative {
		out.push('-');
	}
	let digits = magnitude.to_string();
	for _ in digits.len()..4 {
		out.push('0');
	}
	out.push_str(&digits);
}

/// Render the fractional-second fixed-point grid value with the minimum
/// number of digits necessary to represent it exactly: no trailing zeros,
/// and no decimal point at all when the fraction is zero.
fn format_second(second: f64) -> String {
	let numerator = (second * 1024.0).round() as u64;
	let whole = numerator / 1024;
	let frac_numerator = numerator % 1024;
	if frac_numerator == 0 {
		return format!("{whole:02}");
	}

	// frac_numerator / 1024 as a decimal fraction, trimmed of trailing zeros.
	// 1024 = 2^10, so the decimal expansion always terminates.
	let mut digits = String::new();
	let mut remainder = frac_numerator as u128;
	const DENOM: u128 = 1024;
	while remainder != 0 {
		remainder *= 10;
		let digit = remainder / DENOM;
		let _ = write!(digits, "{digit}");
		remainder %= DENOM;
	}
	while digits.ends_with('0') {
		digits.pop();
	}
	format!("{whole:02}.{digits}")
}

fn write_time_zone(out: &mut String, tz: TimeZone) {
	match tz {
		TimeZone::Absent => {}
		TimeZone::Utc => out.push('Z'),
		TimeZone::Offset(hours) => {
			let _ = write!(out, "{}{:02}:00", if hours < 0 { '-' } else { '+' }, hours.abs());
		}
	}
}
