use super::*;
use proptest::prelude::*;

fn final_tube() -> Format {
    Format::new("H", 12, "f").unwrap()
}

#[test]
fn test_format_key_and_widths() {
    let format = final_tube();
    assert_eq!(format.key(), "H12f");
    assert_eq!(format.sequence_width(), 11);
    assert_eq!(format.max_sequence(), 99_999_999_999);
    assert_eq!(format.to_string(), "f");

    let start = Format::new("A", 1, "start").unwrap();
    assert_eq!(start.key(), "A01start");
    assert_eq!(start.sequence_width(), 7);
}

#[test]
fn test_final_tube_identifiers() {
    let format = final_tube();
    let code = format.container_code(1).unwrap();
    assert_eq!(code, "H12f00000000001");
    assert_eq!(code.len(), CONTAINER_CODE_LENGTH);
    assert_eq!(short_code(&code), "f00000000001");

    let label = encode_well_label('A', 1).unwrap();
    assert_eq!(label, "A01");
    assert_eq!(compose_key(&code, &label), "H12f00000000001.A01");
}

#[test]
fn test_sentinel_codes() {
    let start = Format::new("A", 1, "start").unwrap();
    let end = Format::new("A", 1, "end").unwrap();
    assert_eq!(start.container_code(0).unwrap(), "A01start0000000");
    assert_eq!(end.container_code(999).unwrap(), "A01end000000999");
}

#[test]
fn test_encode_well_label_rejects_out_of_range() {
    assert!(matches!(encode_well_label('A', 0), Err(LabwareError::Range { .. })));
    assert!(matches!(encode_well_label('A', 100), Err(LabwareError::Range { .. })));
    assert!(matches!(encode_well_label('Q', 1), Err(LabwareError::Range { .. })));
    assert_eq!(encode_well_label('P', 24).unwrap(), "P24");
}

#[test]
fn test_decode_well_label_padding_optional() {
    let format = Format::new("P", 24, "wip").unwrap();
    assert_eq!(decode_well_label("A1", &format).unwrap(), ('A', 1));
    assert_eq!(decode_well_label("A01", &format).unwrap(), ('A', 1));
    assert_eq!(decode_well_label("H12", &format).unwrap(), ('H', 12));
    assert_eq!(decode_well_label("P24", &format).unwrap(), ('P', 24));
}

#[test]
fn test_decode_well_label_parse_errors() {
    let format = final_tube();
    for label in ["", "A", "1A", "a01", "AA1", "A-1", "A 1", "@01", "A01 ", "A001", "A300", "A0000001"] {
        assert!(
            matches!(decode_well_label(label, &format), Err(LabwareError::Parse { .. })),
            "{label} should not parse"
        );
    }
}

#[test]
fn test_decode_well_label_range_errors() {
    let format = final_tube();
    for label in ["Q01", "I01", "A00", "A13", "A25", "A99"] {
        assert!(
            matches!(decode_well_label(label, &format), Err(LabwareError::Range { .. })),
            "{label} should be out of range"
        );
    }
}

#[test]
fn test_encode_container_code_width() {
    assert_eq!(encode_container_code("H12f", 42, 3).unwrap(), "H12f042");
    assert_eq!(encode_container_code("H12f", 999, 3).unwrap(), "H12f999");
    assert!(matches!(
        encode_container_code("H12f", 1000, 3),
        Err(LabwareError::Range { .. })
    ));
    assert!(matches!(
        encode_container_code("H12f.", 1, 3),
        Err(LabwareError::Validation(_))
    ));
}

#[test]
fn test_decode_container_code() {
    assert_eq!(decode_container_code("H12f00000000042", "H12f").unwrap(), 42);
    assert!(decode_container_code("H12g00000000042", "H12f").is_err());
    assert!(decode_container_code("H12f", "H12f").is_err());
    assert!(decode_container_code("H12f0000000004x", "H12f").is_err());
}

#[test]
fn test_split_key() {
    assert_eq!(
        split_key("H12f00000000001.A01").unwrap(),
        ("H12f00000000001", "A01")
    );
    assert!(split_key("H12f00000000001A01").is_err());
    assert!(split_key("H12f00000000001.A01.B02").is_err());
    assert!(split_key(".A01").is_err());
    assert!(split_key("H12f00000000001.").is_err());
}

#[test]
fn test_codes_sort_as_numbers() {
    let format = final_tube();
    let mut codes: Vec<String> = [10, 2, 100, 1, 99]
        .into_iter()
        .map(|n| format.container_code(n).unwrap())
        .collect();
    codes.sort();
    let numbers: Vec<u64> = codes
        .iter()
        .map(|code| decode_container_code(code, &format.key()).unwrap())
        .collect();
    assert_eq!(numbers, [1, 2, 10, 99, 100]);
}

#[test]
fn test_labels_row_major() {
    let format = Format::new("B", 3, "six").unwrap();
    let labels: Vec<String> = format
        .labels()
        .map(|(row, column)| encode_well_label(row, column).unwrap())
        .collect();
    assert_eq!(labels, ["A01", "A02", "A03", "B01", "B02", "B03"]);
    assert_eq!(format.capacity(), 6);
    assert_eq!(Format::new("P", 24, "").unwrap().capacity(), 384);
}

fn format_strategy() -> impl Strategy<Value = Format> {
    (0u8..16, 1..=24i32, "[a-z0-9]{0,11}").prop_map(|(row_offset, column, prefix)| {
        let bottom_row = char::from(b'A' + row_offset);
        Format::new(&bottom_row.to_string(), column, &prefix).unwrap()
    })
}

proptest! {
    #[test]
    fn prop_well_label_round_trip(format in format_strategy(), row_seed in any::<u8>(), column_seed in any::<u8>()) {
        let rows = u8::try_from(format.rows().count()).unwrap();
        let row = char::from(b'A' + row_seed % rows);
        let column = 1 + column_seed % format.right_column();
        prop_assert!(format.contains(row, column));
        let label = encode_well_label(row, column).unwrap();
        prop_assert_eq!(label.len(), 3);
        prop_assert_eq!(decode_well_label(&label, &format).unwrap(), (row, column));
    }

    #[test]
    fn prop_out_of_bounds_wells_rejected(format in format_strategy(), row_offset in 0u8..26, column in 0i32..=99) {
        let row = char::from(b'A' + row_offset);
        let inside = u8::try_from(column).is_ok_and(|column| format.contains(row, column));
        prop_assume!(!inside);
        let is_range_error = matches!(
            crate::validation::validate_well_bounds(row, column, &format),
            Err(LabwareError::Range { .. })
        );
        prop_assert!(is_range_error);
    }

    #[test]
    fn prop_container_code_round_trip(format in format_strategy(), number in 0u64..1_000_000_000_000u64) {
        match format.container_code(number) {
            Ok(code) => {
                prop_assert_eq!(code.len(), CONTAINER_CODE_LENGTH);
                prop_assert_eq!(decode_container_code(&code, &format.key()).unwrap(), number);
            }
            Err(err) => {
                prop_assert!(number > format.max_sequence());
                let is_range_error = matches!(err, LabwareError::Range { .. });
                prop_assert!(is_range_error);
            }
        }
    }

    #[test]
    fn prop_dotted_prefix_rejected(head in "[a-z]{0,5}", tail in "[a-z]{0,5}") {
        let prefix = format!("{head}.{tail}");
        prop_assert!(Format::new("H", 12, &prefix).is_err());
    }
}
