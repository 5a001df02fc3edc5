// Presentation text for scan outcomes
// Produces the two lines the original reader UI showed per scan: a status
// message and, for decoded barcodes, the resolved country of origin.

use crate::reference::CountryTable;
use crate::scan::ScanOutcome;

pub const BARCODE_SUCCESS: &str = "Barcode read successfully";
pub const NO_BARCODE_CAPTURED: &str = "No barcode captured";

/// Status line for a scan delivery
pub fn status_line(outcome: &ScanOutcome) -> String {
    match outcome {
        ScanOutcome::Decoded(_) => BARCODE_SUCCESS.to_string(),
        ScanOutcome::NoBarcode => NO_BARCODE_CAPTURED.to_string(),
        ScanOutcome::Failed(status) => format!("Barcode read failed: {}", status),
    }
}

/// Country line for a scan delivery, if it decoded a barcode
pub fn country_line(outcome: &ScanOutcome, table: &CountryTable) -> Option<String> {
    match outcome {
        ScanOutcome::Decoded(value) => Some(table.display_country(value).to_string()),
        _ => None,
    }
}
