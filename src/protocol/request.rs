//! Request definitions
//!
//! Represents requests sent to the HostStats server.

/// Request codes
///
/// A closed enum: the discriminants are the exact one-byte command codes the
/// server dispatches on. Do not renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestCode {
    /// Notify the server about new flow data files (deprecated)
    NewData = 1,
    GetStatus = 10,
    GetHostCntHistory = 11,
    GetFlowCntHistory = 12,
    GetProfiles = 20,
    GetFieldList = 30,
    GetTimeslotData = 31,
    GetTimeslotIpMap = 32,
    GetHostHistory = 35,
    GetDetectionLogList = 40,
    GetDetectionLog = 41,
}

impl RequestCode {
    /// Whether the server answers this request at all
    ///
    /// `NewData` is fire-and-forget: the socket is closed right after the
    /// request is flushed, without waiting for a reply.
    pub fn expects_response(self) -> bool {
        !matches!(self, RequestCode::NewData)
    }
}

/// A request to send to the server
///
/// Parameters are positional: the caller joins the command-specific fields
/// with `;` into a single string before constructing the request. The
/// protocol has no named fields.
#[derive(Debug, Clone)]
pub struct Request {
    /// Command code (first byte on the wire)
    pub code: RequestCode,

    /// Pre-joined parameter string, if the command takes one
    pub param: Option<String>,
}

impl Request {
    /// Create a request without parameters
    pub fn new(code: RequestCode) -> Self {
        Self { code, param: None }
    }

    /// Create a request with a pre-joined parameter string
    pub fn with_param(code: RequestCode, param: impl Into<String>) -> Self {
        Self {
            code,
            param: Some(param.into()),
        }
    }
}
