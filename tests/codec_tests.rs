//! Codec Tests
//!
//! Tests for request encoding, response classification and payload decoding.

use std::io::Cursor;

use hoststats_client::protocol::{
    decode_list, decode_rows, decode_values, encode_request, read_response, write_request,
    Reply, Request, RequestCode, ServerStatus, Table,
};
use hoststats_client::HostStatsError;

// =============================================================================
// Request Encoding Tests
// =============================================================================

#[test]
fn test_encode_without_param() {
    let encoded = encode_request(&Request::new(RequestCode::GetStatus));
    assert_eq!(&encoded[..], &[10, 0]);
}

#[test]
fn test_encode_with_param() {
    let encoded = encode_request(&Request::with_param(
        RequestCode::GetHostCntHistory,
        "all;202401010000;202401011200",
    ));

    assert_eq!(encoded[0], 11);
    assert_eq!(&encoded[1..encoded.len() - 1], b"all;202401010000;202401011200");
    assert_eq!(encoded[encoded.len() - 1], 0);
}

#[test]
fn test_encode_length_is_param_plus_two() {
    let params = ["", "all", "all;202401010000;202401011200", "a;b;c;d;e;f"];
    for param in params {
        let encoded = encode_request(&Request::with_param(RequestCode::GetTimeslotData, param));
        assert_eq!(encoded.len(), 1 + param.len() + 1);
    }
}

#[test]
fn test_request_code_wire_values() {
    assert_eq!(RequestCode::NewData as u8, 1);
    assert_eq!(RequestCode::GetStatus as u8, 10);
    assert_eq!(RequestCode::GetHostCntHistory as u8, 11);
    assert_eq!(RequestCode::GetFlowCntHistory as u8, 12);
    assert_eq!(RequestCode::GetProfiles as u8, 20);
    assert_eq!(RequestCode::GetFieldList as u8, 30);
    assert_eq!(RequestCode::GetTimeslotData as u8, 31);
    assert_eq!(RequestCode::GetTimeslotIpMap as u8, 32);
    assert_eq!(RequestCode::GetHostHistory as u8, 35);
    assert_eq!(RequestCode::GetDetectionLogList as u8, 40);
    assert_eq!(RequestCode::GetDetectionLog as u8, 41);
}

#[test]
fn test_only_new_data_skips_response() {
    assert!(!RequestCode::NewData.expects_response());
    assert!(RequestCode::GetStatus.expects_response());
    assert!(RequestCode::GetDetectionLog.expects_response());
}

#[test]
fn test_stream_write_request() {
    let mut buffer = Vec::new();
    write_request(
        &mut buffer,
        &Request::with_param(RequestCode::GetFieldList, "all"),
    )
    .unwrap();

    assert_eq!(buffer, [&[30u8][..], &b"all"[..], &[0u8][..]].concat());
}

// =============================================================================
// Error-tag Classification Tests
// =============================================================================

#[test]
fn test_classify_payload_passthrough() {
    let reply = Reply::classify("a=1;b=2");
    assert_eq!(reply, Reply::Payload("a=1;b=2".to_string()));
}

#[test]
fn test_classify_error_with_code() {
    let reply = Reply::classify("ERROR: something went wrong (error code: -5)");
    assert_eq!(
        reply,
        Reply::Error {
            message: "something went wrong".to_string(),
            code: -5,
        }
    );
}

#[test]
fn test_classify_error_without_code_defaults_to_one() {
    let reply = Reply::classify("ERROR: bad thing");
    assert_eq!(
        reply,
        Reply::Error {
            message: "bad thing".to_string(),
            code: 1,
        }
    );
}

#[test]
fn test_classify_error_case_insensitive() {
    let reply = Reply::classify("error: lowercase tag (Error Code: +7)");
    assert_eq!(
        reply,
        Reply::Error {
            message: "lowercase tag".to_string(),
            code: 7,
        }
    );
}

#[test]
fn test_classify_error_code_without_message_keeps_whole_text() {
    // The code split needs a non-empty message before the parenthesis.
    let reply = Reply::classify("ERROR: (error code: 5)");
    assert_eq!(
        reply,
        Reply::Error {
            message: "(error code: 5)".to_string(),
            code: 1,
        }
    );
}

#[test]
fn test_classify_error_message_is_first_line_only() {
    let reply = Reply::classify("ERROR: first line\nsecond line");
    assert_eq!(
        reply,
        Reply::Error {
            message: "first line".to_string(),
            code: 1,
        }
    );
}

#[test]
fn test_classify_error_marker_must_lead() {
    let reply = Reply::classify("note: ERROR: not a failure");
    assert!(matches!(reply, Reply::Payload(_)));
}

#[test]
fn test_into_payload_maps_error_to_bad_command() {
    let err = Reply::classify("ERROR: nope (error code: 3)")
        .into_payload()
        .unwrap_err();

    match err {
        HostStatsError::BadCommand { message, code } => {
            assert_eq!(message, "nope");
            assert_eq!(code, 3);
        }
        other => panic!("expected BadCommand, got {other:?}"),
    }
}

// =============================================================================
// Response Reading Tests
// =============================================================================

#[test]
fn test_read_response_trims_trailing_whitespace() {
    let mut cursor = Cursor::new(b"a=1;b=2\n  \n".to_vec());
    let payload = read_response(&mut cursor).unwrap();
    assert_eq!(payload, "a=1;b=2");
}

#[test]
fn test_read_response_surfaces_server_error() {
    let mut cursor = Cursor::new(b"ERROR: no such profile".to_vec());
    let err = read_response(&mut cursor).unwrap_err();
    assert!(err.is_bad_command());
}

#[test]
fn test_read_response_rejects_invalid_utf8() {
    let mut cursor = Cursor::new(vec![0xFF, 0xFE, 0x61]);
    let err = read_response(&mut cursor).unwrap_err();
    assert!(matches!(err, HostStatsError::MalformedResponse(_)));
}

#[test]
fn test_read_response_empty_body_is_empty_payload() {
    let mut cursor = Cursor::new(Vec::new());
    let payload = read_response(&mut cursor).unwrap();
    assert!(payload.is_empty());
}

// =============================================================================
// Values Decoding Tests
// =============================================================================

#[test]
fn test_decode_values_preserves_order() {
    let values = decode_values("a=1;b=2;c=3").unwrap();

    let entries: Vec<_> = values.iter().collect();
    assert_eq!(entries, vec![("a", "1"), ("b", "2"), ("c", "3")]);
    assert_eq!(values.get("b"), Some("2"));
    assert_eq!(values.get("missing"), None);
}

#[test]
fn test_decode_values_splits_once_on_equals() {
    let values = decode_values("filter=a=b").unwrap();
    assert_eq!(values.get("filter"), Some("a=b"));
}

#[test]
fn test_decode_values_empty_value_is_valid() {
    let values = decode_values("key=").unwrap();
    assert_eq!(values.get("key"), Some(""));
}

#[test]
fn test_decode_values_segment_without_equals_is_malformed() {
    let err = decode_values("a=1;oops;c=3").unwrap_err();
    assert!(matches!(err, HostStatsError::MalformedResponse(_)));
}

#[test]
fn test_decode_values_empty_payload_is_malformed() {
    assert!(decode_values("").is_err());
}

// =============================================================================
// Table Decoding Tests
// =============================================================================

#[test]
fn test_decode_rows_splits_and_trims() {
    let rows = decode_rows("  10.0.0.1 ; 5 ;7\n10.0.0.2;0; 1 ");
    assert_eq!(
        rows,
        vec![
            vec!["10.0.0.1".to_string(), "5".to_string(), "7".to_string()],
            vec!["10.0.0.2".to_string(), "0".to_string(), "1".to_string()],
        ]
    );
}

#[test]
fn test_decode_rows_keeps_empty_cells() {
    let rows = decode_rows("a;;c");
    assert_eq!(rows, vec![vec!["a".to_string(), String::new(), "c".to_string()]]);
}

#[test]
fn test_table_first_row_becomes_header() {
    let table = Table::from_rows(decode_rows("h1;h2\nv1;v2\nv3;v4"));

    assert_eq!(table.header(), ["h1", "h2"]);
    assert_eq!(
        table.rows(),
        [
            vec!["v1".to_string(), "v2".to_string()],
            vec!["v3".to_string(), "v4".to_string()],
        ]
    );
    assert_eq!(table.column("h2"), Some(1));
}

#[test]
fn test_table_explicit_header_keeps_all_rows() {
    let header = vec!["h1".to_string(), "h2".to_string()];
    let table = Table::with_header(header, decode_rows("h1;h2\nv1;v2\nv3;v4"));

    assert_eq!(table.rows().len(), 3);
    assert_eq!(table.rows()[0], ["h1", "h2"]);
}

#[test]
fn test_table_from_no_rows_is_empty() {
    let table = Table::from_rows(Vec::new());
    assert!(table.is_empty());
    assert!(table.header().is_empty());
}

// =============================================================================
// List Decoding Tests
// =============================================================================

#[test]
fn test_decode_list_semicolon() {
    assert_eq!(decode_list("all;ssh;dns", ';'), ["all", "ssh", "dns"]);
}

#[test]
fn test_decode_list_newline() {
    assert_eq!(decode_list("20240101\n20240102", '\n'), ["20240101", "20240102"]);
}

#[test]
fn test_decode_list_empty_payload_is_empty() {
    assert!(decode_list("", ';').is_empty());
}

// =============================================================================
// Round-trip Tests
// =============================================================================

#[test]
fn test_round_trip_request_and_values() {
    let request = Request::with_param(RequestCode::GetHostCntHistory, "all;202401010000;202401011200");
    let encoded = encode_request(&request);

    assert_eq!(encoded.len(), 1 + 29 + 1);
    assert_eq!(encoded[0], 11);

    // Decoding an echoed-back payload recovers the mapping unchanged.
    let values = decode_values("all=42").unwrap();
    assert_eq!(values.get("all"), Some("42"));
    assert_eq!(values.len(), 1);
}

// =============================================================================
// Typed Status Tests
// =============================================================================

#[test]
fn test_server_status_from_values() {
    let values = decode_values("processing=1;timeslot=202401011200;flows=120;hosts=34").unwrap();
    let status = ServerStatus::from_values(&values).unwrap();

    assert!(status.processing);
    assert_eq!(status.timeslot.as_deref(), Some("202401011200"));
    assert_eq!(status.flows, 120);
    assert_eq!(status.hosts, 34);
}

#[test]
fn test_server_status_none_timeslot() {
    let values = decode_values("processing=0;timeslot=none;flows=0;hosts=0").unwrap();
    let status = ServerStatus::from_values(&values).unwrap();

    assert!(!status.processing);
    assert_eq!(status.timeslot, None);
}

#[test]
fn test_server_status_missing_field_is_malformed() {
    let values = decode_values("processing=1;flows=0;hosts=0").unwrap();
    let err = ServerStatus::from_values(&values).unwrap_err();
    assert!(matches!(err, HostStatsError::MalformedResponse(_)));
}

#[test]
fn test_server_status_non_numeric_field_is_malformed() {
    let values = decode_values("processing=1;timeslot=none;flows=lots;hosts=0").unwrap();
    assert!(ServerStatus::from_values(&values).is_err());
}
