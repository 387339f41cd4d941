//! Response definitions
//!
//! Classification of raw response text and the decoded payload shapes.

use crate::error::{HostStatsError, Result};

/// One decoded table row (trimmed column values)
pub type Row = Vec<String>;

// =============================================================================
// Error-tag Classification
// =============================================================================

/// Classified response text
///
/// The protocol carries errors in-band: a response starting with `ERROR:`
/// (case-insensitive) is a failure report, anything else is payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Regular payload, ready for decoding
    Payload(String),

    /// Server-reported error
    Error { message: String, code: i32 },
}

impl Reply {
    /// Classify trimmed response text
    ///
    /// The error message is the remainder of the first line after the
    /// `ERROR:` marker. A trailing `(error code: N)` suffix (optional sign,
    /// case-insensitive) is split off as the numeric code; without it the
    /// code defaults to 1.
    pub fn classify(text: &str) -> Reply {
        const MARKER: &str = "ERROR:";

        let tagged = text
            .as_bytes()
            .get(..MARKER.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(MARKER.as_bytes()));
        if !tagged {
            return Reply::Payload(text.to_string());
        }

        let rest = &text[MARKER.len()..];
        let first_line = rest.split('\n').next().unwrap_or("");
        let message = first_line.trim();

        match split_error_code(message) {
            Some((message, code)) => Reply::Error { message, code },
            None => Reply::Error {
                message: message.to_string(),
                code: 1,
            },
        }
    }

    /// Convert into a payload, turning a server error into `BadCommand`
    pub fn into_payload(self) -> Result<String> {
        match self {
            Reply::Payload(text) => Ok(text),
            Reply::Error { message, code } => Err(HostStatsError::BadCommand { message, code }),
        }
    }
}

/// Split a trailing `(error code: N)` suffix off an error message
///
/// Returns `None` when there is no parsable suffix or the message part would
/// be empty, in which case the caller falls back to code 1.
fn split_error_code(message: &str) -> Option<(String, i32)> {
    const TAG: &str = "(error code:";

    let lower = message.to_ascii_lowercase();
    let open = lower.rfind(TAG)?;

    let rest = &message[open + TAG.len()..];
    let close = rest.find(')')?;
    let code = rest[..close].trim().parse::<i32>().ok()?;

    let head = message[..open].trim();
    if head.is_empty() {
        return None;
    }

    Some((head.to_string(), code))
}

// =============================================================================
// Values Payload
// =============================================================================

/// Decoded `key=value;key=value` payload
///
/// Preserves server order. Keys and values are kept verbatim: the protocol
/// has no escaping for `;` or `=`, so values containing them misparse on the
/// wire, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueMap {
    entries: Vec<(String, String)>,
}

impl ValueMap {
    /// Parse a `key=value;...` payload
    ///
    /// A segment without `=` fails hard with `MalformedResponse` rather than
    /// being skipped, so protocol drift never degrades into missing keys.
    pub fn parse(payload: &str) -> Result<ValueMap> {
        let mut entries = Vec::new();

        for segment in payload.split(';') {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                HostStatsError::MalformedResponse(format!(
                    "values segment without '=': \"{segment}\""
                ))
            })?;
            entries.push((key.to_string(), value.to_string()));
        }

        Ok(ValueMap { entries })
    }

    /// Look up the first value for a key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over entries in server order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Table Payload
// =============================================================================

/// Decoded tabular payload: named columns over ordered rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table whose first row is the header
    ///
    /// Used for responses where the server prefixes the data with a
    /// field-name row. An empty row set yields an empty table.
    pub fn from_rows(mut rows: Vec<Row>) -> Table {
        if rows.is_empty() {
            return Table::default();
        }
        let header = rows.remove(0);
        Table { header, rows }
    }

    /// Build a table from data-only rows under a caller-supplied header
    pub fn with_header(header: Vec<String>, rows: Vec<Row>) -> Table {
        Table { header, rows }
    }

    /// Column names, in wire order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, in wire order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Position of a named column in each row
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// =============================================================================
// Typed Status View
// =============================================================================

/// Typed view of a `GET_STATUS` value map
///
/// The server reports `timeslot=none` before the first timeslot has been
/// processed; that sentinel maps to `None` here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerStatus {
    /// Whether the server is currently processing flow data
    pub processing: bool,

    /// Most recently finished timeslot (`yyyymmddhhii`), if any
    pub timeslot: Option<String>,

    /// Flows loaded in the current timeslot
    pub flows: u64,

    /// Hosts tracked in the current timeslot
    pub hosts: u64,
}

impl ServerStatus {
    /// Build a typed status from the decoded value map
    pub fn from_values(values: &ValueMap) -> Result<ServerStatus> {
        let field = |key: &str| {
            values.get(key).ok_or_else(|| {
                HostStatsError::MalformedResponse(format!("status field \"{key}\" missing"))
            })
        };
        let numeric = |key: &str| {
            field(key)?.parse::<u64>().map_err(|_| {
                HostStatsError::MalformedResponse(format!("status field \"{key}\" is not numeric"))
            })
        };

        let timeslot = field("timeslot")?;

        Ok(ServerStatus {
            processing: field("processing")? == "1",
            timeslot: (timeslot != "none").then(|| timeslot.to_string()),
            flows: numeric("flows")?,
            hosts: numeric("hosts")?,
        })
    }
}
