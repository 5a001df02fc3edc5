// Scanorigin Library
// Country-of-origin resolution for externally-decoded barcode values.
// Barcode detection itself (camera, image processing) lives in the external
// scanning subsystem; this crate only consumes its results.

pub mod display;
pub mod reference;
pub mod scan;
