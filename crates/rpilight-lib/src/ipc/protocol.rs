//! Wire format — one JSON object per line in each direction.
//!
//! Request: `{"interface":"android.hardware.rpilight.IRpilight","method":"ledControl","state":1}`
//! Reply:   `{"ok":{"success":true}}` or `{"error":{"service_specific":{"code":-1,"message":"..."}}}`

use std::io::{self, BufRead, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::service::{DESCRIPTOR, Rpilight};
use crate::status::Status;

/// Method call, tagged by method name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "camelCase")]
pub enum Request {
    LedControl { state: i32 },
}

impl Request {
    /// Method names this interface implements.
    pub const METHODS: &'static [&'static str] = &["ledControl"];
}

/// A request addressed to an interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub interface: String,
    #[serde(flatten)]
    pub request: Request,
}

impl Transaction {
    pub fn new(request: Request) -> Self {
        Transaction {
            interface: DESCRIPTOR.to_string(),
            request,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reply {
    Ok { success: bool },
    Error(Status),
}

/// Header fields, decoded before the method arguments.
#[derive(Deserialize)]
struct Header {
    interface: String,
    method: String,
}

/// Decode one request line, call the service, and build the reply.
pub fn dispatch(service: &dyn Rpilight, line: &str) -> Reply {
    let value: serde_json::Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => return Reply::Error(Status::BadRequest(e.to_string())),
    };
    let header = match Header::deserialize(&value) {
        Ok(h) => h,
        Err(e) => return Reply::Error(Status::BadRequest(e.to_string())),
    };
    if header.interface != DESCRIPTOR {
        return Reply::Error(Status::UnknownTransaction(format!(
            "interface mismatch: {}",
            header.interface
        )));
    }
    if !Request::METHODS.contains(&header.method.as_str()) {
        return Reply::Error(Status::UnknownTransaction(format!(
            "no method {}",
            header.method
        )));
    }
    let request = match Request::deserialize(&value) {
        Ok(r) => r,
        Err(e) => return Reply::Error(Status::BadRequest(e.to_string())),
    };

    log::debug!("dispatch {request:?}");
    match request {
        Request::LedControl { state } => match service.led_control(state) {
            Ok(success) => Reply::Ok { success },
            Err(status) => Reply::Error(status),
        },
    }
}

/// Write `msg` as a single JSON line and flush.
pub fn write_message<W: Write, T: Serialize>(writer: &mut W, msg: &T) -> io::Result<()> {
    let mut buf = serde_json::to_vec(msg).map_err(io::Error::other)?;
    buf.push(b'\n');
    writer.write_all(&buf)?;
    writer.flush()
}

/// Read one JSON line. Returns `Ok(None)` on a clean end of stream.
pub fn read_message<R: BufRead, T: DeserializeOwned>(reader: &mut R) -> io::Result<Option<T>> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    serde_json::from_str(line.trim_end())
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}
