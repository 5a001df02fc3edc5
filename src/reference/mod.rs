// Reference data module - GS1 country prefix table
// Source: GS1 company-prefix country allocations, bundled as
// assets/countries.csv and loaded once at startup.
//
// The table is write-once/read-many: no writer exists after construction,
// so it is shared freely without locking.

pub mod table;

pub use table::{CountryTable, TableError, UNKNOWN_CODE};
