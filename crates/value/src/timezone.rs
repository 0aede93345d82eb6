// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

use crate::error::{Result, out_of_range};

/// Signed hour offsets below this are rejected before they ever reach the
/// shifted encoding.
const MIN_OFFSET: i8 = -23;
const MAX_OFFSET: i8 = 23;

/// The two reserved encodings that sit alongside the 47 possible signed hour
/// offsets (`-23..=23`) inside the 6-bit time-zone field.
const MIN_SLOT: i32 = -23;
const MAX_SLOT: i32 = 25;

/// A `dateTime`'s time zone: absent, `Z` (UTC), or a signed whole-hour offset.
///
/// Minutes in an offset are not representable; the lexical codec rejects any
/// `TZ` production whose minute part is non-zero (see
/// `temporal-codec::parse`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimeZone {
	Absent,
	Utc,
	Offset(i8),
}

impl Default for TimeZone {
	fn default() -> Self {
		TimeZone::Absent
	}
}

impl TimeZone {
	/// Encode into the shifted `0..=48` range stored in the 6-bit field.
	///
	/// `Absent` occupies slot `0`, `Utc` occupies slot `1`, and offsets are
	/// shifted by two slots whenever they are non-negative so they never
	/// collide with the two special values.
	pub(crate) fn encode(self) -> Result<u32> {
		let actual = match self {
			TimeZone::Absent => 0,
			TimeZone::Utc => 1,
			TimeZone::Offset(hours) => {
				if hours < MIN_OFFSET || hours > MAX_OFFSET {
					return Err(out_of_range("timeZone", hours));
				}
				let hours = hours as i32;
				if hours < 0 { hours } else { hours + 2 }
			}
		};
		Ok((actual - MIN_SLOT) as u32)
	}

	/// Decode from the shifted `0..=48` range back into a [`TimeZone`].
	pub(crate) fn decode(bits: u32) -> TimeZone {
		let actual = bits as i32 + MIN_SLOT;
		match actual {
			0 => TimeZone::Absent,
			1 => TimeZone::Utc,
			tz if tz > 0 => TimeZone::Offset((tz - 2) as i8),
			tz => TimeZone::Offset(tz as i8),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trips_absent_and_utc() {
		assert_eq!(TimeZone::decode(TimeZone::Absent.encode().unwrap()), TimeZone::Absent);
		assert_eq!(TimeZone::decode(TimeZone::Utc.encode().unwrap()), TimeZone::Utc);
	}

	#[test]
	fn round_trips_every_legal_offset() {
		for hours in MIN_OFFSET..=MAX_OFFSET {
			let tz = TimeZone::Offset(hours);
			let bits = tz.encode().unwrap();
			assert_eq!(TimeZone::decode(bits), tz, "offset {hours}");
		}
	}

	#[test]
	fn rejects_offsets_outside_plus_minus_23() {
		assert!(TimeZone::Offset(24).encode().is_err());
		assert!(TimeZone::Offset(-24).encode().is_err());
	}

	#[test]
	fn fits_in_six_bits() {
		for hours in MIN_OFFSET..=MAX_OFFSET {
			assert!(TimeZone::Offset(hours).encode().unwrap() < 64);
		}
		assert!(TimeZone::Absent.encode().unwrap() < 64);
		assert!(TimeZone::Utc.encode().unwrap() < 64);
	}

	#[test]
	fn max_slot_is_consistent() {
		// `MAX_SLOT` (25) must equal the actual value produced by the largest
		// legal offset (23 + 2).
		assert_eq!(TimeZone::Offset(MAX_OFFSET).encode().unwrap(), (MAX_SLOT - MIN_SLOT) as u32);
	}
}
