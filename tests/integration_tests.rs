use cln::{
    from_str, layout_of, to_string, to_string_with_options, Buffer, ClnOptions, Delimiter, Error,
    FieldType, Status, Value,
};

fn assert_invariants(buffer: &Buffer) {
    assert!(buffer.len() <= buffer.capacity());
    assert_eq!(buffer.as_bytes_with_nul()[buffer.len()], 0);
}

#[test]
fn test_escaped_string_and_int() {
    let mut buffer = Buffer::new(0);
    buffer.append_str("a,b").unwrap();
    buffer.append_i32(42).unwrap();
    assert_eq!(buffer.as_str(), "a\\,b,42");

    buffer
        .set_layout(&[FieldType::String, FieldType::Int32])
        .unwrap();
    assert_eq!(buffer.decode_field(0).unwrap().value, Value::from("a\\,b"));
    assert_eq!(buffer.decode_field(1).unwrap().value, Value::I32(42));
    assert_invariants(&buffer);
}

#[test]
fn test_add_buffer() {
    let mut buffer = Buffer::new(0);
    buffer.append_str(",,wow,,").unwrap();
    buffer.append_int(737373).unwrap();

    let expected = "\\,\\,wow\\,\\,,737373";
    assert_eq!(buffer.as_str(), expected);

    buffer.trim();
    assert_eq!(buffer.as_str(), expected);
    assert_eq!(buffer.capacity(), expected.len());
    assert_invariants(&buffer);
}

#[test]
fn test_layout_with_empty_string() {
    let value = 412897124984.89247981249;
    let mut buffer = Buffer::new(12);
    buffer.append_u8(66).unwrap();
    assert_eq!(buffer.append_str("").unwrap(), Status::EmptyString);
    buffer.append_double(value, "%.17f").unwrap();

    buffer
        .set_layout(&[FieldType::Uint8, FieldType::String, FieldType::Double])
        .unwrap();

    let (mut read_uint, mut read_empty, mut read_double) = (None, None, None);
    let status = buffer
        .decode_all(&mut [
            Some(&mut read_uint),
            Some(&mut read_empty),
            Some(&mut read_double),
        ])
        .unwrap();

    assert_eq!(status, Status::EmptyString);
    assert_eq!(read_uint, Some(Value::U8(66)));
    assert_eq!(read_empty, Some(Value::from("")));
    assert_eq!(read_double, Some(Value::F64(value)));
}

#[test]
fn test_read_buffer() {
    let mut buffer = Buffer::read(Some("frivolous\\,\\,!!!!,82,73")).unwrap();
    buffer
        .set_layout(&[FieldType::String, FieldType::Int16, FieldType::String])
        .unwrap();

    let (mut first, mut number, mut last) = (None, None, None);
    buffer
        .decode_all(&mut [Some(&mut first), Some(&mut number), Some(&mut last)])
        .unwrap();

    assert_eq!(first, Some(Value::from("frivolous\\,\\,!!!!")));
    assert_eq!(number, Some(Value::I16(82)));
    assert_eq!(last, Some(Value::from("73")));
}

#[test]
fn test_read_none() {
    let err = Buffer::read(None).unwrap_err();
    assert!(matches!(err, Error::InvalidPointer(_)));
    assert_eq!(err.code(), -2);
}

#[test]
fn test_set_empty_layout() {
    let mut buffer = Buffer::from_text("1");
    assert_eq!(buffer.set_layout(&[]), Err(Error::EmptyLayout));
}

#[test]
fn test_decode_all_with_skipped_slot() {
    let mut buffer = Buffer::new(0);
    buffer.append_str("x").unwrap();
    buffer.append_int(7).unwrap();
    buffer.append_double(3.5, "%g").unwrap();
    buffer
        .set_layout(&[FieldType::String, FieldType::Int64, FieldType::Double])
        .unwrap();

    let mut name = None;
    let mut ratio = None;
    buffer
        .decode_all(&mut [Some(&mut name), None, Some(&mut ratio)])
        .unwrap();

    assert_eq!(buffer.tracked(), &[0, 2]);

    // Each value is owned on its own and outlives the buffer.
    buffer.release();
    assert_eq!(name, Some(Value::from("x")));
    drop(name);
    assert_eq!(ratio, Some(Value::F64(3.5)));
}

#[test]
fn test_decode_all_repeated_resets_tracking() {
    let mut buffer = Buffer::from_text("1,2");
    buffer.set_layout(&[FieldType::Int8, FieldType::Int8]).unwrap();

    let (mut a, mut b) = (None, None);
    buffer.decode_all(&mut [Some(&mut a), Some(&mut b)]).unwrap();
    assert_eq!(buffer.tracked(), &[0, 1]);

    buffer.decode_all(&mut [None, Some(&mut b)]).unwrap();
    assert_eq!(buffer.tracked(), &[1]);
}

#[test]
fn test_empty_field_decode() {
    let mut buffer = Buffer::new(4);
    buffer.append_str("").unwrap();
    buffer.append_str("tail").unwrap();
    assert_eq!(buffer.count(), 2);
    assert_eq!(buffer.as_str(), ",tail");

    buffer
        .set_layout(&[FieldType::String, FieldType::String])
        .unwrap();
    let decoded = buffer.decode_field(0).unwrap();
    assert_eq!(decoded.status, Status::EmptyString);
    assert_eq!(decoded.value, Value::from(""));
    assert_eq!(buffer.decode_as::<String>(1).unwrap(), "tail");
}

#[test]
fn test_index_checked_against_field_count() {
    let mut buffer = Buffer::new(4);
    buffer.append_int(1).unwrap();
    buffer
        .set_layout(&[FieldType::Int64, FieldType::Int64, FieldType::Int64])
        .unwrap();

    assert_eq!(buffer.decode_as::<i64>(0).unwrap(), 1);
    assert_eq!(buffer.decode_field(2), Err(Error::out_of_bounds(2, 1)));
}

#[test]
fn test_malformed_number_is_an_error() {
    let mut buffer = Buffer::from_text("12a");
    buffer.set_layout(&[FieldType::Int32]).unwrap();
    let err = buffer.decode_field(0).unwrap_err();
    assert_eq!(err, Error::parse(0, FieldType::Int32, "12a"));
    assert!(err.to_string().contains("12a"));
}

#[test]
fn test_tab_delimiter_record() {
    let values = vec![Value::from("a\tb"), Value::U64(u64::MAX), Value::F32(0.5)];
    let options = ClnOptions::new()
        .with_delimiter(Delimiter::Tab)
        .with_float_format("%.1f");
    let text = to_string_with_options(&values, options.clone()).unwrap();
    assert_eq!(text, "a\\\tb\t18446744073709551615\t0.5");

    let back = cln::from_str_with_options(
        &text,
        layout_of(&values).as_slice(),
        options.unescape_strings(true),
    )
    .unwrap();
    assert_eq!(back, values);
}

#[test]
fn test_every_width_roundtrips() {
    let values = vec![
        Value::I8(i8::MIN),
        Value::I16(i16::MIN),
        Value::I32(i32::MIN),
        Value::I64(i64::MIN),
        Value::U8(u8::MAX),
        Value::U16(u16::MAX),
        Value::U32(u32::MAX),
        Value::U64(u64::MAX),
        Value::F32(1.5),
        Value::F64(-2.25),
        Value::from("end"),
    ];
    let text = to_string(&values).unwrap();
    let back = from_str(&text, layout_of(&values).as_slice()).unwrap();
    assert_eq!(back, values);
}

#[test]
fn test_display_and_fields() {
    let mut buffer = Buffer::default();
    buffer.append_str("one").unwrap();
    buffer.append_str("t,wo").unwrap();
    assert_eq!(buffer.to_string(), "one,t\\,wo");
    assert_eq!(buffer.fields().collect::<Vec<_>>(), ["one", "t\\,wo"]);
}

#[test]
fn test_format_error_message() {
    let mut buffer = Buffer::new(4);
    let err = buffer.append_double(1.0, "%q").unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("invalid format specifier"));
    assert!(msg.contains("%q"));
}

#[test]
fn test_single_empty_string_record_roundtrips() {
    let values = vec![Value::from("")];
    let text = to_string(&values).unwrap();
    assert_eq!(text, "");

    assert_eq!(from_str("", &[FieldType::String]).unwrap(), values);

    let mut buffer = Buffer::from_text("");
    buffer.set_layout(&[FieldType::Int32]).unwrap();
    let decoded = buffer.decode_field(0).unwrap();
    assert_eq!(decoded.status, Status::EmptyString);
    assert_eq!(decoded.value, Value::from(""));
    assert!(buffer.decode_field(1).is_err());
}

#[test]
fn test_trailing_escape_keeps_record_intact() {
    let mut buffer = Buffer::new(0);
    buffer.append_str("path").unwrap();
    let err = buffer.append_str("dir\\").unwrap_err();
    assert_eq!(err.code(), -8);
    buffer.append_int(5).unwrap();
    assert_invariants(&buffer);

    buffer
        .set_layout(&[FieldType::String, FieldType::Int64])
        .unwrap();
    assert_eq!(buffer.decode_as::<String>(0).unwrap(), "path");
    assert_eq!(buffer.decode_as::<i64>(1).unwrap(), 5);

    assert!(to_string(&[Value::from("dir\\"), Value::I64(5)]).is_err());
}

#[test]
fn test_default_float_format_keeps_small_values() {
    let values = vec![Value::F32(1e-7), Value::F32(f32::MAX), Value::F32(0.1)];
    let text = to_string(&values).unwrap();
    let back = from_str(&text, layout_of(&values).as_slice()).unwrap();
    assert_eq!(back, values);
}
