//! Protocol Module
//!
//! Defines the wire protocol spoken with the HostStats server.
//!
//! ## Protocol Format (one exchange per connection)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬─────────────────────────────┬──────────┐
//! │ Code (1) │   Parameter string (0..n)   │ NUL (1)  │
//! └──────────┴─────────────────────────────┴──────────┘
//! ```
//!
//! ### Request Codes
//! - 1:  NEW_DATA               - new flow data notification (no response)
//! - 10: GET_STATUS             - server status values
//! - 11: GET_HOST_CNT_HISTORY   - host counts per timeslot
//! - 12: GET_FLOW_CNT_HISTORY   - flow counts per timeslot
//! - 20: GET_PROFILES           - available profile names
//! - 30: GET_FIELD_LIST         - statistic field names
//! - 31: GET_TIMESLOT_DATA      - per-host table for one timeslot
//! - 32: GET_TIMESLOT_IPMAP     - prefix-aggregated table for one timeslot
//! - 35: GET_HOST_HISTORY       - per-timeslot table for one host
//! - 40: GET_DETECTION_LOG_LIST - days with recorded detections
//! - 41: GET_DETECTION_LOG      - detection entries for one day
//!
//! ### Response Format
//!
//! Raw text until the peer closes the connection. A response starting with
//! `ERROR:` (case-insensitive) is an in-band failure, optionally carrying a
//! numeric code as a trailing `(error code: N)` suffix. Successful payloads
//! are `key=value;...` maps, `\n`/`;`-delimited tables, or split lists.

mod request;
mod response;
mod codec;

pub use request::{Request, RequestCode};
pub use response::{Reply, Row, ServerStatus, Table, ValueMap};
pub use codec::{decode_list, decode_rows, decode_values, encode_request, read_response, write_request};
