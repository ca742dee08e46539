//! Human-readable report of an acquisition, one line per attempt.

use core::fmt::{self, Write};

use crate::{error::DhtError, reading::Reading};

/// Writes `result` as a single CRLF-terminated line.
///
/// A reading renders as `Humidity: 45.2 % | Temperature: 23.7 C`; errors
/// render as a short `DHT ...` status line.
pub fn write_report<W, E>(out: &mut W, result: &Result<Reading, DhtError<E>>) -> fmt::Result
where
    W: Write,
{
    match result {
        Ok(reading) => write!(out, "{reading}\r\n"),
        Err(DhtError::NoResponse) => out.write_str("DHT No Response\r\n"),
        Err(DhtError::Timeout) => out.write_str("DHT Timeout\r\n"),
        Err(DhtError::ChecksumMismatch) => out.write_str("DHT Checksum Mismatch\r\n"),
        Err(DhtError::PinError(_)) => out.write_str("DHT Pin Error\r\n"),
    }
}
