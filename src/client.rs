//! HostStats protocol client
//!
//! One connection per exchange: every operation opens a fresh socket,
//! writes a single request, reads the EOF-terminated response and closes.
//! The client itself holds only the endpoint and timeout configuration, so
//! a single instance can be shared across threads without locking.

use std::io;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{HostStatsError, Result};
use crate::protocol::{
    decode_list, decode_rows, decode_values, read_response, write_request, Request, RequestCode,
    Row, Table, ValueMap,
};

/// The well-known profile covering all traffic
pub const PROFILE_ALL: &str = "all";

/// Client for the HostStats analytics server
///
/// Callers pass already-formatted parameters: timeslot names as 12-digit
/// `yyyymmddhhii` strings, profile names as plain identifiers, IP addresses
/// pre-validated. The client only builds the wire format.
#[derive(Debug, Clone)]
pub struct Client {
    /// Server hostname or address
    host: String,

    /// Server TCP port
    port: u16,

    /// Timeouts applied to every socket
    config: ClientConfig,
}

impl Client {
    /// Create a client with default timeouts
    ///
    /// Does not connect: sockets are opened per operation.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::with_config(host, port, ClientConfig::default())
    }

    /// Create a client with explicit timeout configuration
    pub fn with_config(host: impl Into<String>, port: u16, config: ClientConfig) -> Self {
        Self {
            host: host.into(),
            port,
            config,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    // =========================================================================
    // Connection Lifecycle
    // =========================================================================

    /// Open a socket for one exchange
    ///
    /// Resolution and connect failures surface as `Connect` with the
    /// attempted endpoint; they never degrade into empty data.
    fn connect(&self) -> Result<TcpStream> {
        let connect_err = |source: io::Error| HostStatsError::Connect {
            host: self.host.clone(),
            port: self.port,
            source,
        };

        let addrs = (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(connect_err)?;

        let connect_timeout = self.config.connect_timeout_ms;
        let mut last_err = None;

        for addr in addrs {
            let attempt = if connect_timeout > 0 {
                TcpStream::connect_timeout(&addr, Duration::from_millis(connect_timeout))
            } else {
                TcpStream::connect(addr)
            };

            match attempt {
                Ok(stream) => {
                    self.configure(&stream)?;
                    tracing::debug!("connected to {}:{}", self.host, self.port);
                    return Ok(stream);
                }
                Err(e) => last_err = Some(e),
            }
        }

        Err(connect_err(last_err.unwrap_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, "no addresses resolved")
        })))
    }

    /// Apply socket options and timeouts
    fn configure(&self, stream: &TcpStream) -> Result<()> {
        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if self.config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(self.config.read_timeout_ms)))?;
        }
        if self.config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(self.config.write_timeout_ms)))?;
        }

        Ok(())
    }

    /// Perform one request/response exchange
    ///
    /// The socket is closed on every exit path when `stream` drops.
    fn request(&self, request: &Request) -> Result<String> {
        tracing::trace!(
            "request code {} param {:?}",
            request.code as u8,
            request.param.as_deref().unwrap_or("")
        );

        let mut stream = self.connect()?;
        write_request(&mut stream, request)?;
        let payload = read_response(&mut stream)?;

        tracing::trace!("response of {} bytes", payload.len());
        Ok(payload)
    }

    /// Send a request without waiting for a reply
    fn notify(&self, request: &Request) -> Result<()> {
        let mut stream = self.connect()?;
        write_request(&mut stream, request)
    }

    // =========================================================================
    // Query Operations
    // =========================================================================

    /// Get server status values
    ///
    /// See `ServerStatus::from_values` for the typed view.
    pub fn get_status(&self) -> Result<ValueMap> {
        let payload = self.request(&Request::new(RequestCode::GetStatus))?;
        decode_values(&payload)
    }

    /// Get the host count per timeslot over a time window
    ///
    /// Returns `None` when the server has no data for the window.
    pub fn get_host_cnt_history(
        &self,
        profile: &str,
        from: &str,
        to: &str,
    ) -> Result<Option<ValueMap>> {
        let param = format!("{profile};{from};{to}");
        let payload = self.request(&Request::with_param(RequestCode::GetHostCntHistory, param))?;
        if payload.is_empty() {
            return Ok(None);
        }
        decode_values(&payload).map(Some)
    }

    /// Get the flow count per timeslot over a time window
    ///
    /// Returns `None` when the server has no data for the window.
    pub fn get_flow_cnt_history(
        &self,
        profile: &str,
        from: &str,
        to: &str,
    ) -> Result<Option<ValueMap>> {
        let param = format!("{profile};{from};{to}");
        let payload = self.request(&Request::with_param(RequestCode::GetFlowCntHistory, param))?;
        if payload.is_empty() {
            return Ok(None);
        }
        decode_values(&payload).map(Some)
    }

    /// Get the available profile names
    pub fn get_profiles(&self) -> Result<Vec<String>> {
        let payload = self.request(&Request::new(RequestCode::GetProfiles))?;
        Ok(decode_list(&payload, ';'))
    }

    /// Get the statistic field names of a profile
    pub fn get_field_list(&self, profile: &str) -> Result<Vec<String>> {
        let payload =
            self.request(&Request::with_param(RequestCode::GetFieldList, profile))?;
        Ok(decode_list(&payload, ';'))
    }

    /// Get per-host statistics for one timeslot
    ///
    /// `filter` is a server-side filter expression, `sort` a field name to
    /// order by before `limit` is applied, `ascending` the sort direction.
    /// The server prefixes the data with a field-name row, consumed here as
    /// the table header.
    pub fn get_timeslot_data(
        &self,
        profile: &str,
        timeslot: &str,
        filter: Option<&str>,
        limit: u32,
        sort: Option<&str>,
        ascending: bool,
    ) -> Result<Table> {
        let param = format!(
            "{profile};{timeslot};{};{limit};{};{}",
            filter.unwrap_or(""),
            sort.unwrap_or(""),
            if ascending { "1" } else { "0" },
        );
        let payload = self.request(&Request::with_param(RequestCode::GetTimeslotData, param))?;
        Ok(Table::from_rows(decode_rows(&payload)))
    }

    /// Get statistics for one timeslot aggregated by address prefix
    pub fn get_timeslot_ip_map(
        &self,
        profile: &str,
        timeslot: &str,
        base_address: &str,
        base_prefix_len: u8,
    ) -> Result<Table> {
        let param = format!("{profile};{timeslot};{base_address};{base_prefix_len}");
        let payload = self.request(&Request::with_param(RequestCode::GetTimeslotIpMap, param))?;
        Ok(Table::from_rows(decode_rows(&payload)))
    }

    /// Get the per-timeslot history of one host
    pub fn get_host_history(
        &self,
        profile: &str,
        ip_address: &str,
        from: &str,
        to: &str,
    ) -> Result<Table> {
        let param = format!("{profile};{ip_address};{from};{to}");
        let payload = self.request(&Request::with_param(RequestCode::GetHostHistory, param))?;
        Ok(Table::from_rows(decode_rows(&payload)))
    }

    /// List the days (`yyyymmdd`) with recorded detections
    pub fn get_detection_log_list(&self) -> Result<Vec<String>> {
        let payload = self.request(&Request::new(RequestCode::GetDetectionLogList))?;
        Ok(decode_list(&payload, '\n'))
    }

    /// Get the detection entries recorded on one day (`yyyymmdd`)
    ///
    /// Returns `None` when no entries exist for that day. The log carries no
    /// header row; callers attach their own via `Table::with_header`.
    pub fn get_detection_log(&self, date: &str) -> Result<Option<Vec<Row>>> {
        let payload = self.request(&Request::with_param(RequestCode::GetDetectionLog, date))?;
        if payload.is_empty() {
            return Ok(None);
        }
        Ok(Some(decode_rows(&payload)))
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Notify the server about new flow data files
    ///
    /// Fire-and-forget: no response is read. Each path is terminated by a
    /// newline. The paths name files on the server's filesystem and are
    /// passed through unverified.
    #[deprecated(note = "not universal: the server expects fixed collector paths")]
    pub fn send_new_data<S: AsRef<str>>(&self, files: &[S]) -> Result<()> {
        let mut param = String::new();
        for file in files {
            param.push_str(file.as_ref());
            param.push('\n');
        }
        self.notify(&Request::with_param(RequestCode::NewData, param))
    }
}
