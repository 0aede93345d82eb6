// Copyright (c) 2025 the temporal-value Authors
// This file is licensed under the AGPL-3.0-or-later

//! Cross-crate lexical round-tripping and datatype inference, exercised
//! through the public API only.

use temporal_codec::{parse, render, XsdTemporalType};

#[test]
fn each_production_infers_its_own_datatype() {
	let cases = [
		("2020", XsdTemporalType::GYear),
		("2020-06", XsdTemporalType::GYearMonth),
		("2020-06-15", XsdTemporalType::Date),
		("2020-06-15T12:30:45Z", XsdTemporalType::DateTime),
	];
	for (input, expected) in cases {
		let value = parse(input).unwrap();
		let (text, ty) = render(value);
		assert_eq!(ty, expected, "{input} inferred as {ty}");
		assert_eq!(text, input);
	}
}

#[test]
fn parse_is_insensitive_to_the_zero_offset_spelling_but_render_is_canonical() {
	let plus = parse("2020-06-15T12:30:45+00:00").unwrap();
	let minus = parse("2020-06-15T12:30:45-00:00").unwrap();
	let zulu = parse("2020-06-15T12:30:45Z").unwrap();
	assert_eq!(plus, zulu);
	assert_eq!(minus, zulu);

	let (text, _) = render(plus);
	assert_eq!(text, "2020-06-15T12:30:45Z");
}

#[test]
fn out_of_range_fields_surface_the_value_crate_error_through_transparent_wrapping() {
	let err = parse("2020-13-01").unwrap_err();
	match err {
		temporal_codec::Error::OutOfRange(inner) => {
			let message = inner.to_string();
			assert!(message.contains("month"), "unexpected message: {message}");
		}
		other => panic!("expected OutOfRange, got {other:?}"),
	}
}

#[test]
fn malformed_input_is_rejected_without_panicking() {
	for input in ["", "not-a-date", "2020/06/15", "2020-06-15T12:30", "2020-06-15T12:30:45+25:00"] {
		assert!(parse(input).is_err(), "expected {input:?} to be rejected");
	}
}

#[test]
fn rendered_output_always_reparses_to_the_same_value() {
	let inputs = [
		"2020",
		"-9999",
		"9999-12",
		"2020-06-15",
		"2020-06-15T00:00:00",
		"2020-06-15T12:30:45.125+02:00",
		"-0044-03-15T00:00:00Z",
	];
	for input in inputs {
		let value = parse(input).unwrap();
		let (text, _) = render(value);
		let reparsed = parse(&text).unwrap();
		assert_eq!(value, reparsed, "{input} -> {text} did not round-trip");
	}
}
