// Scan result intake
// Models the result channel of the external scanning subsystem: each
// delivery carries a status code and, when decoding succeeded, the decoded
// barcode value. Detection itself happens entirely on the scanner side.

use std::fmt;

use serde::Deserialize;

/// Status codes reported by the scanning subsystem
///
/// The numeric values are the scanner's own result codes and are preserved
/// as-is on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStatus {
    Success,
    InternalError,
    Error,
    Interrupted,
    Timeout,
    Canceled,
    Other(i32),
}

impl ScanStatus {
    pub fn from_code(code: i32) -> ScanStatus {
        match code {
            0 => ScanStatus::Success,
            8 => ScanStatus::InternalError,
            13 => ScanStatus::Error,
            14 => ScanStatus::Interrupted,
            15 => ScanStatus::Timeout,
            16 => ScanStatus::Canceled,
            other => ScanStatus::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            ScanStatus::Success => 0,
            ScanStatus::InternalError => 8,
            ScanStatus::Error => 13,
            ScanStatus::Interrupted => 14,
            ScanStatus::Timeout => 15,
            ScanStatus::Canceled => 16,
            ScanStatus::Other(code) => *code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ScanStatus::Success)
    }
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanStatus::Success => write!(f, "SUCCESS"),
            ScanStatus::InternalError => write!(f, "INTERNAL_ERROR"),
            ScanStatus::Error => write!(f, "ERROR"),
            ScanStatus::Interrupted => write!(f, "INTERRUPTED"),
            ScanStatus::Timeout => write!(f, "TIMEOUT"),
            ScanStatus::Canceled => write!(f, "CANCELED"),
            ScanStatus::Other(code) => write!(f, "unknown status code: {}", code),
        }
    }
}

/// One result delivery from the scanner
///
/// Arrives as a JSON line, e.g. `{"status": 0, "barcode": "4601234567890"}`.
/// The barcode field is absent when the scanner had nothing to report.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanEvent {
    pub status: i32,
    #[serde(default)]
    pub barcode: Option<String>,
}

impl ScanEvent {
    pub fn parse(line: &str) -> Result<ScanEvent, serde_json::Error> {
        serde_json::from_str(line)
    }

    /// Classify this delivery for presentation
    ///
    /// A success status without a payload is its own case: the scanner
    /// finished normally but captured nothing.
    pub fn outcome(self) -> ScanOutcome {
        let status = ScanStatus::from_code(self.status);
        if !status.is_success() {
            return ScanOutcome::Failed(status);
        }
        match self.barcode {
            Some(value) if !value.is_empty() => ScanOutcome::Decoded(value),
            _ => ScanOutcome::NoBarcode,
        }
    }
}

/// A scan delivery, classified
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// Scanner returned a decoded barcode value
    Decoded(String),
    /// Scanner finished successfully but captured no barcode
    NoBarcode,
    /// Scanner reported a non-success status
    Failed(ScanStatus),
}
