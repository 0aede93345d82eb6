// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{Result, out_of_range};
use crate::timezone::TimeZone;

/// A field's position inside the packed 64-bit representation, counted from
/// the least significant bit.
struct Field {
	offset: u32,
	width: u32,
}

impl Field {
	const fn mask(&self) -> u64 {
		((1u64 << self.width) - 1) << self.offset
	}

	fn get(&self, bits: u64) -> u64 {
		(bits & self.mask()) >> self.offset
	}

	fn set(&self, bits: u64, value: u64) -> u64 {
		debug_assert!(value < (1u64 << self.width), "value does not fit in field width");
		(bits & !self.mask()) | ((value << self.offset) & self.mask())
	}
}

const TIME_ZONE: Field = Field { offset: 0, width: 6 };
const SECOND: Field = Field { offset: 6, width: 16 };
const MINUTE: Field = Field { offset: 22, width: 6 };
const HOUR: Field = Field { offset: 28, width: 5 };
const DAY: Field = Field { offset: 33, width: 5 };
const MONTH: Field = Field { offset: 38, width: 4 };
const YEAR: Field = Field { offset: 42, width: 15 };
/// The seven most significant bits, always zero, free for an enclosing
/// tagged-union scheme to use.
const RESERVED_BITS: u32 = 7;

const MIN_YEAR: i32 = -9999;
const MAX_YEAR: i32 = 9999;
const MIN_MONTH: i32 = 0;
const MAX_MONTH: i32 = 12;
const MIN_DAY: i32 = 0;
const MAX_DAY: i32 = 31;
/// Sentinel meaning "no hour specified" (the value is a `date`, not a
/// `dateTime`).
pub const NO_HOUR: i32 = -1;
const MIN_HOUR: i32 = NO_HOUR;
const MAX_HOUR: i32 = 23;
const MIN_MINUTE: i32 = 0;
const MAX_MINUTE: i32 = 59;
const MIN_SECOND: f64 = 0.0;
const MAX_SECOND: f64 = 60.0;
const SECOND_MULTIPLIER: f64 = 1024.0;

/// A 64-bit packed representation of an XSD `gYear`, `gYearMonth`, `date`, or
/// `dateTime` value.
///
/// Equality, ordering, and hashing are all defined on the underlying `u64`
/// (see [`DateTime64::to_bits`]), never on the decoded fields: the engine
/// embedding this value is expected to sort and range-scan on it directly,
/// without decoding. The seven most significant bits are always zero and
/// reserved for an enclosing tagged-union representation.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateTime64(u64);

impl DateTime64 {
	/// Construct a value from its components. Granularities not present in
	/// the original lexical form should be passed their sentinel (`month` /
	/// `day` = `0`, `hour` = `-1`) and their default (`minute` = `0`,
	/// `second` = `0.0`, `time_zone` = [`TimeZone::Absent`]).
	#[instrument(level = "trace", skip_all, err)]
	pub fn new(
		year: i32,
		month: i32,
		day: i32,
		hour: i32,
		minute: i32,
		second: f64,
		time_zone: TimeZone,
	) -> Result<Self> {
		let mut value = DateTime64(0);
		value.set_year(year)?;
		value.set_month(month)?;
		value.set_day(day)?;
		value.set_hour(hour)?;
		value.set_minute(minute)?;
		value.set_second(second)?;
		value.set_time_zone(time_zone)?;
		Ok(value)
	}

	/// Return the 64-bit representation. The seven most significant bits are
	/// guaranteed to be zero.
	pub fn to_bits(&self) -> u64 {
		self.0
	}

	/// Reinterpret a `u64` as a [`DateTime64`].
	///
	/// This is a raw reinterpretation, not a validating parse: the caller
	/// must only ever pass a value previously produced by
	/// [`DateTime64::to_bits`] on a valid value. Fabricated bit patterns
	/// (in particular ones with non-zero reserved bits) make all further
	/// operations on the result undefined.
	pub fn from_bits(bits: u64) -> Self {
		DateTime64(bits)
	}

	pub fn year(&self) -> i32 {
		YEAR.get(self.0) as i32 + MIN_YEAR
	}

	pub fn set_year(&mut self, year: i32) -> Result<()> {
		if year < MIN_YEAR || year > MAX_YEAR {
			return Err(out_of_range("year", year));
		}
		self.0 = YEAR.set(self.0, (year - MIN_YEAR) as u64);
		Ok(())
	}

	pub fn month(&self) -> i32 {
		MONTH.get(self.0) as i32
	}

	pub fn set_month(&mut self, month: i32) -> Result<()> {
		if month < MIN_MONTH || month > MAX_MONTH {
			return Err(out_of_range("month", month));
		}
		self.0 = MONTH.set(self.0, month as u64);
		Ok(())
	}

	pub fn day(&self) -> i32 {
		DAY.get(self.0) as i32
	}

	/// Set the day of month. Note that day/month combination legality (e.g.
	/// February 30th) is **not** enforced: a permissive but parseable day is
	/// preserved exactly as-is, rather than rejected, because this class is
	/// used as an index key and the originating lexical form may itself be
	/// permissive.
	pub fn set_day(&mut self, day: i32) -> Result<()> {
		if day < MIN_DAY || day > MAX_DAY {
			return Err(out_of_range("day", day));
		}
		self.0 = DAY.set(self.0, day as u64);
		Ok(())
	}

	pub fn hour(&self) -> i32 {
		HOUR.get(self.0) as i32 + MIN_HOUR
	}

	pub fn set_hour(&mut self, hour: i32) -> Result<()> {
		if hour < MIN_HOUR || hour > MAX_HOUR {
			return Err(out_of_range("hour", hour));
		}
		self.0 = HOUR.set(self.0, (hour - MIN_HOUR) as u64);
		Ok(())
	}

	pub fn minute(&self) -> i32 {
		MINUTE.get(self.0) as i32
	}

	pub fn set_minute(&mut self, minute: i32) -> Result<()> {
		if minute < MIN_MINUTE || minute > MAX_MINUTE {
			return Err(out_of_range("minute", minute));
		}
		self.0 = MINUTE.set(self.0, minute as u64);
		Ok(())
	}

	/// The second, as stored: `fixed_point / 1024`.
	pub fn second(&self) -> f64 {
		SECOND.get(self.0) as f64 / SECOND_MULTIPLIER
	}

	/// Set the second. The value is rounded to the nearest representable
	/// point on the 1024-denominator fixed-point grid using half-to-even
	/// rounding, per the XSD codec's rounding rule.
	pub fn set_second(&mut self, second: f64) -> Result<()> {
		if !(second >= MIN_SECOND) || !(second < MAX_SECOND) {
			return Err(out_of_range("second", second));
		}
		let fixed = round_half_to_even(second * SECOND_MULTIPLIER);
		// A value just below 60.0 can round up onto the excluded boundary.
		if fixed >= (MAX_SECOND * SECOND_MULTIPLIER) as u64 {
			return Err(out_of_range("second", second));
		}
		self.0 = SECOND.set(self.0, fixed);
		Ok(())
	}

	pub fn time_zone(&self) -> TimeZone {
		TimeZone::decode(TIME_ZONE.get(self.0) as u32)
	}

	pub fn set_time_zone(&mut self, time_zone: TimeZone) -> Result<()> {
		self.0 = TIME_ZONE.set(self.0, time_zone.encode()? as u64);
		Ok(())
	}

	/// `true` iff the value has a time component (i.e. it is a `dateTime`
	/// rather than a `date`, `gYearMonth`, or `gYear`).
	pub fn has_time(&self) -> bool {
		self.hour() != NO_HOUR
	}
}

/// Round half to even ("banker's rounding") to the nearest integer.
fn round_half_to_even(x: f64) -> u64 {
	let floor = x.floor();
	let diff = x - floor;
	let floor = floor as u64;
	if diff < 0.5 {
		floor
	} else if diff > 0.5 {
		floor + 1
	} else if floor % 2 == 0 {
		floor
	} else {
		floor + 1
	}
}

impl PartialEq for DateTime64 {
	fn eq(&self, other: &Self) -> bool {
		self.to_bits() == other.to_bits()
	}
}

impl Eq for DateTime64 {}

impl PartialOrd for DateTime64 {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for DateTime64 {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.to_bits().cmp(&other.to_bits())
	}
}

impl Hash for DateTime64 {
	fn hash<H: Hasher>(&self, state: &mut H) {
		self.to_bits().hash(state);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn dt(year: i32, month: i32, day: i32, hour: i32, minute: i32, second: f64, tz: TimeZone) -> DateTime64 {
		DateTime64::new(year, month, day, hour, minute, second, tz).unwrap()
	}

	#[test]
	fn reserved_bits_are_always_zero() {
		let value = dt(9999, 12, 31, 23, 59, 59.999, TimeZone::Offset(23));
		assert_eq!(value.to_bits() >> (64 - RESERVED_BITS), 0);
	}

	#[test]
	fn bit_round_trip() {
		let value = dt(2020, 6, 15, 12, 30, 45.5, TimeZone::Utc);
		assert_eq!(DateTime64::from_bits(value.to_bits()), value);
	}

	#[test]
	fn getters_after_construction() {
		let value = dt(-44, 3, 15, 0, 0, 0.0, TimeZone::Utc);
		assert_eq!(value.year(), -44);
		assert_eq!(value.month(), 3);
		assert_eq!(value.day(), 15);
		assert_eq!(value.hour(), 0);
		assert_eq!(value.minute(), 0);
		assert_eq!(value.second(), 0.0);
		assert_eq!(value.time_zone(), TimeZone::Utc);
		assert!(value.has_time());
	}

	#[test]
	fn gyear_sentinels() {
		let value = dt(2020, 0, 0, NO_HOUR, 0, 0.0, TimeZone::Absent);
		assert_eq!(value.month(), 0);
		assert_eq!(value.day(), 0);
		assert!(!value.has_time());
	}

	#[test]
	fn setters_validate_bounds() {
		let mut value = dt(2020, 1, 1, NO_HOUR, 0, 0.0, TimeZone::Absent);
		assert!(value.set_month(13).is_err());
		assert!(value.set_month(0).is_ok());
		assert!(value.set_day(32).is_err());
		assert!(value.set_hour(24).is_err());
		assert!(value.set_hour(-2).is_err());
		assert!(value.set_minute(60).is_err());
		assert!(value.set_second(60.0).is_err());
		assert!(value.set_second(-0.001).is_err());
		assert!(value.set_year(10000).is_err());
		assert!(value.set_year(-10000).is_err());
	}

	#[test]
	fn accepts_day_31_for_every_month() {
		// Day/month legality is intentionally not cross-checked; see
		// the doc comment on `set_day`.
		for month in 1..=12 {
			assert!(DateTime64::new(2021, month, 31, NO_HOUR, 0, 0.0, TimeZone::Absent).is_ok());
		}
	}

	#[test]
	fn second_rounds_half_to_even() {
		// 0.5/1024 lands exactly halfway between two representable grid
		// points; both neighbors are even/odd in turn.
		assert_eq!(round_half_to_even(2.5), 2);
		assert_eq!(round_half_to_even(3.5), 4);
		assert_eq!(round_half_to_even(0.4), 0);
		assert_eq!(round_half_to_even(0.6), 1);
	}

	#[test]
	fn second_just_below_sixty_that_rounds_up_is_rejected() {
		let mut value = dt(2020, 1, 1, 0, 0, 0.0, TimeZone::Absent);
		assert!(value.set_second(59.9999999).is_err());
	}

	#[test]
	fn ordering_matches_bit_ordering_for_same_time_zone() {
		let earlier = dt(2020, 1, 1, 0, 0, 0.0, TimeZone::Utc);
		let later = dt(2020, 1, 1, 0, 0, 1.0, TimeZone::Utc);
		assert!(earlier < later);
		assert!(earlier.to_bits() < later.to_bits());
	}

	#[test]
	fn hash_matches_equality() {
		use std::collections::HashSet;

		let a = dt(2020, 6, 15, 12, 30, 45.0, TimeZone::Utc);
		let b = dt(2020, 6, 15, 12, 30, 45.0, TimeZone::Utc);

		let mut set = HashSet::new();
		set.insert(a);
		assert!(set.contains(&b));
	}

	#[test]
	fn time_zone_is_the_least_significant_ordering_key() {
		// 12:00 with time zone 0 sorts before 13:00 with time zone -6, even
		// though the second instant happens earlier in absolute time. This
		// is a documented simplification, not a bug.
		let noon_cet = dt(2020, 1, 1, 12, 0, 0.0, TimeZone::Offset(0));
		let one_pm_us_east = dt(2020, 1, 1, 13, 0, 0.0, TimeZone::Offset(-6));
		assert!(noon_cet < one_pm_us_east);
	}
}
