// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

use temporal_value::{DateTime64, NO_HOUR, TimeZone};
use tracing::instrument;

use crate::error::{Error, Result, parse_error};

/// Parse one of the four accepted XSD lexical forms (`gYear`, `gYearMonth`,
/// `date`, `dateTime`) into a packed value.
///
/// Returns [`Error::ParseError`] if `input` does not match any of the four
/// productions, or [`Error::OutOfRange`] if it matches syntactically but a
/// field is outside its semantic domain.
#[instrument(level = "trace", skip_all, err)]
pub fn parse(input: &str) -> Result<DateTime64> {
	let bytes = input.as_bytes();
	let mut cursor = Cursor { bytes, pos: 0 };

	let (negative, year_digits) = cursor.take_year_digits().ok_or_else(|| parse_error(input))?;
	let year = parse_year_value(negative, year_digits, input)?;

	if cursor.at_end() {
		return build(year, 0, 0, NO_HOUR, 0, 0.0, TimeZone::Absent);
	}
	if cursor.peek_is_time_zone_start() {
		let tz = cursor.take_time_zone(input)?;
		if !cursor.at_end() {
			return Err(parse_error(input));
		}
		return build(year, 0, 0, NO_HOUR, 0, 0.0, tz);
	}

	if !cursor.consume_byte(b'-') {
		return Err(parse_error(input));
	}
	let month_digits = cursor.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
	let month = parse_two_digit(month_digits, 1, 12, "month")?;

	if cursor.at_end() {
		return build(year, month, 0, NO_HOUR, 0, 0.0, TimeZone::Absent);
	}
	if cursor.peek_is_time_zone_start() {
		let tz = cursor.take_time_zone(input)?;
		if !cursor.at_end() {
			return Err(parse_error(input));
		}
		return build(year, month, 0, NO_HOUR, 0, 0.0, tz);
	}

	if !cursor.consume_byte(b'-') {
		return Err(parse_error(input));
	}
	let day_digits = cursor.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
	let day = parse_two_digit(day_digits, 1, 31, "day")?;

	if cursor.at_end() {
		return build(year, month, day, NO_HOUR, 0, 0.0, TimeZone::Absent);
	}
	if cursor.peek_is_time_zone_start() {
		let tz = cursor.take_time_zone(input)?;
		if !cursor.at_end() {
			return Err(parse_error(input));
		}
		return build(year, month, day, NO_HOUR, 0, 0.0, tz);
	}

	if !cursor.consume_byte(b'T') {
		return Err(parse_error(input));
	}
	let hour_digits = cursor.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
	let hour = parse_two_digit(hour_digits, 0, 23, "hour")?;
	if !cursor.consume_byte(b':') {
		return Err(parse_error(input));
	}
	let minute_digits = cursor.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
	let minute = parse_two_digit(minute_digits, 0, 59, "minute")?;
	if !cursor.consume_byte(b':') {
		return Err(parse_error(input));
	}
	let second = cursor.take_second(input)?;

	let tz = if cursor.at_end() {
		TimeZone::Absent
	} else {
		let tz = cursor.take_time_zone(input)?;
		if !cursor.at_end() {
			return Err(parse_error(input));
		}
		tz
	};

	build(year, month, day, hour, minute, second, tz)
}

#[allow(clippy::too_many_arguments)]
fn build(
	year: i32,
	month: i32,
	day: i32,
	hour: i32,
	minute: i32,
	second: f64,
	tz: TimeZone,
) -> Result<DateTime64> {
	Ok(DateTime64::new(year, month, day, hour, minute, second, tz)?)
}

struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
}

impl<'a> Cursor<'a> {
	fn at_end(&self) -> bool {
		self.pos >= self.bytes.len()
	}

	fn peek(&self) -> Option<u8> {
		self.bytes.get(self.pos).copied()
	}

	fn consume_byte(&mut self, b: u8) -> bool {
		if self.peek() == Some(b) {
			self.pos += 1;
			true
		} else {
			false
		}
	}

	/// `YEAR ::= "-"? digit{4,}`, with no leading zero unless the digit run
	/// is exactly four digits long (covering years 0-999).
	fn take_year_digits(&mut self) -> Option<(bool, &'a [u8])> {
		let negative = self.consume_byte(b'-');
		let start = self.pos;
		while self.peek().is_some_and(|b| b.is_ascii_digit()) {
			self.pos += 1;
		}
		let digits = &self.bytes[start..self.pos];
		if digits.len() < 4 {
			return None;
		}
		if digits.len() > 4 && digits[0] == b'0' {
			return None;
		}
		Some((negative, digits))
	}

	fn take_exact_digits(&mut self, n: usize) -> Option<&'a [u8]> {
		let start = self.pos;
		if self.bytes.len() < start + n {
			return None;
		}
		let candidate = &self.bytes[start..start + n];
		if !candidate.iter().all(u8::is_ascii_digit) {
			return None;
		}
		self.pos += n;
		Some(candidate)
	}

	/// Disambiguates a following `-HH:MM` (a negative time-zone offset) from
	/// the next date/time component, which can also start with `-`: a
	/// two-digit run followed by `:` is a time zone, anything else belongs
	/// to the next component.
	fn peek_is_time_zone_start(&self) -> bool {
		match self.peek() {
			Some(b'Z') | Some(b'+') => true,
			Some(b'-') => {
				let rest = &self.bytes[self.pos + 1..];
				rest.len() >= 3 && rest[0].is_ascii_digit() && rest[1].is_ascii_digit() && rest[2] == b':'
			}
			_ => false,
		}
	}

	fn take_time_zone(&mut self, input: &str) -> Result<TimeZone> {
		if self.consume_byte(b'Z') {
			return Ok(TimeZone::Utc);
		}
		let sign = if self.consume_byte(b'+') {
			1
		} else if self.consume_byte(b'-') {
			-1
		} else {
			return Err(parse_error(input));
		};
		let hour_digits = self.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
		let hours = parse_two_digit(hour_digits, 0, 23, "timeZone")?;
		if !self.consume_byte(b':') {
			return Err(parse_error(input));
		}
		let minute_digits = self.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
		if minute_digits != b"00" {
			return Err(parse_error(input));
		}
		if hours == 0 {
			return Ok(TimeZone::Utc);
		}
		Ok(TimeZone::Offset((sign * hours) as i8))
	}

	/// `SECOND ::= digit{2} ("." digit+)?`, value in `[0, 60)`.
	fn take_second(&mut self, input: &str) -> Result<f64> {
		let int_digits = self.take_exact_digits(2).ok_or_else(|| parse_error(input))?;
		let int_part: u64 = std::str::from_utf8(int_digits).unwrap().parse().unwrap();

		let frac = if self.consume_byte(b'.') {
			let start = self.pos;
			while self.peek().is_some_and(|b| b.is_ascii_digit()) {
				self.pos += 1;
			}
			if self.pos == start {
				return Err(parse_error(input));
			}
			&self.bytes[start..self.pos]
		} else {
			b""
		};

		let numerator = fixed_point_numerator(int_part, frac);
		if numerator >= 60 * 1024 {
			return Err(Error::OutOfRange(temporal_value::Error::OutOfRange {
				field: "second",
				value: format!("{int_part}.{}", std::str::from_utf8(frac).unwrap_or("")),
			}));
		}
		Ok(numerator as f64 / 1024.0)
	}
}

/// Round `int_part` seconds plus the decimal fraction described by `frac`
/// onto the 1024-denominator grid, using half-to-even rounding, via exact
/// integer arithmetic (never `f64`, so no precision is lost before the
/// rounding decision is made).
fn fixed_point_numerator(int_part: u64, frac: &[u8]) -> u64 {
	let frac = if frac.len() > 30 { &frac[..30] } else { frac };
	if frac.is_empty() {
		return int_part * 1024;
	}
	let frac_value: u128 = std::str::from_utf8(frac).unwrap().parse().unwrap_or(0);
	let denom: u128 = 10u128.pow(frac.len() as u32);
	let numerator = frac_value * 1024;
	let quotient = numerator / denom;
	let remainder = numerator % denom;
	let rounded = match (remainder * 2).cmp(&denom) {
		std::cmp::Ordering::Less => quotient,
		std::cmp::Ordering::Greater => quotient + 1,
		std::cmp::Ordering::Equal => {
			if quotient % 2 == 0 {
				quotient
			} else {
				quotient + 1
			}
		}
	};
	int_part * 1024 + rounded as u64
}

fn parse_two_digit(digits: &[u8], min: i32, max: i32, field: &'static str) -> Result<i32> {
	let value: i32 = std::str::from_utf8(digits).unwrap().parse().unwrap();
	if value < min || value > max {
		return Err(Error::OutOfRange(temporal_value::Error::OutOfRange {
			field,
			value: value.to_string(),
		}));
	}
	Ok(value)
}

fn parse_year_value(negative: bool, digits: &[u8], input: &str) -> Result<i32> {
	let magnitude: i64 = std::str::from_utf8(digits).unwrap().parse().map_err(|_| parse_error(input))?;
	let year = if negative { -magnitude } else { magnitude };
	if !(-9999..=9999).contains(&year) {
		return Err(Error::OutOfRange(temporal_value::Error::OutOfRange {
			field: "year",
			value: year.to_string(),
		}));
	}
	Ok(year as i32)
}
