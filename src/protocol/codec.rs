//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬─────────────────────────────┬──────────┐
//! │ Code (1) │   Parameter string (0..n)   │ NUL (1)  │
//! └──────────┴─────────────────────────────┴──────────┘
//! ```
//!
//! The parameter string joins positional fields with `;`. There is no
//! length prefix: the NUL byte terminates the request.
//!
//! ### Response Format
//!
//! Plain text, read until the server closes the connection. No length
//! prefix or terminator. Payloads are either `key=value;...` maps, tables
//! with `\n`-separated rows and `;`-separated columns, or delimiter-split
//! lists.

use std::io::{Read, Write};

use bytes::{BufMut, Bytes, BytesMut};

use super::{Request, Reply, Row, ValueMap};
use crate::error::{HostStatsError, Result};

// =============================================================================
// Request Encoding
// =============================================================================

/// Encode a request to wire bytes
///
/// Always exactly `1 + param.len() + 1` bytes: code first, NUL last.
pub fn encode_request(request: &Request) -> Bytes {
    let param = request.param.as_deref().unwrap_or("");

    let mut buf = BytesMut::with_capacity(1 + param.len() + 1);
    buf.put_u8(request.code as u8);
    buf.put_slice(param.as_bytes());
    buf.put_u8(0);

    buf.freeze()
}

/// Write a request to a stream and flush it
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    writer.write_all(&encode_request(request))?;
    writer.flush()?;
    Ok(())
}

// =============================================================================
// Response Reading
// =============================================================================

/// Read a complete response from a stream
///
/// Blocks until the peer closes the connection, then classifies the
/// assembled text: an `ERROR:`-tagged reply becomes `BadCommand`, anything
/// else is returned with trailing whitespace trimmed.
pub fn read_response<R: Read>(reader: &mut R) -> Result<String> {
    let mut raw = Vec::new();
    reader.read_to_end(&mut raw)?;

    let text = String::from_utf8(raw)
        .map_err(|_| HostStatsError::MalformedResponse("response is not valid UTF-8".into()))?;

    Reply::classify(text.trim_end()).into_payload()
}

// =============================================================================
// Payload Decoding
// =============================================================================

/// Decode a `key=value;key=value` payload into an ordered map
pub fn decode_values(payload: &str) -> Result<ValueMap> {
    ValueMap::parse(payload)
}

/// Decode a tabular payload into raw rows
///
/// Rows are split on `\n`, columns on `;`, and every cell is trimmed.
/// Header handling is the caller's responsibility (see `Table`).
pub fn decode_rows(payload: &str) -> Vec<Row> {
    payload
        .split('\n')
        .map(|line| line.split(';').map(|cell| cell.trim().to_string()).collect())
        .collect()
}

/// Decode a delimiter-split list payload
///
/// An empty payload yields an empty list rather than a single empty item.
pub fn decode_list(payload: &str, separator: char) -> Vec<String> {
    if payload.is_empty() {
        return Vec::new();
    }
    payload.split(separator).map(str::to_string).collect()
}
