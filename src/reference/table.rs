// Country prefix table parser and resolver
//
// Parses the bundled countries.csv asset.
// Format: semicolon-delimited (;) with the following columns:
// 0: prefix (2 or 3 characters, the lookup key)
// 1: GS1 range the prefix belongs to (informational, not used)
// 2: country name
//
// Columns beyond 2 are ignored. A record with fewer than 3 columns is
// malformed and rejected with an explicit error.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

/// Sentinel displayed when no prefix in the table matches a barcode
pub const UNKNOWN_CODE: &str = "Unknown code...";

const CSV_DELIMITER: char = ';';
const MIN_FIELDS: usize = 3;

/// Errors raised while parsing the country table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("malformed record on line {line}: expected at least 3 fields, got {fields}")]
    MalformedRecord { line: usize, fields: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Immutable mapping from GS1 prefix to country name
///
/// Built once at startup from the bundled asset and never mutated
/// afterwards. Duplicate prefixes resolve last-write-wins during load.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CountryTable {
    entries: HashMap<String, String>,
}

impl CountryTable {
    /// Parse a table from a line-oriented reader
    ///
    /// Blank lines are skipped. A line with fewer than 3 semicolon-separated
    /// fields yields `TableError::MalformedRecord` with its 1-based line
    /// number; nothing is silently dropped or misfiled.
    pub fn from_reader(reader: impl BufRead) -> Result<CountryTable, TableError> {
        let mut entries = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(CSV_DELIMITER).collect();
            if fields.len() < MIN_FIELDS {
                return Err(TableError::MalformedRecord {
                    line: idx + 1,
                    fields: fields.len(),
                });
            }

            // Last write wins on duplicate prefixes
            entries.insert(fields[0].to_string(), fields[2].to_string());
        }

        Ok(CountryTable { entries })
    }

    /// Load the table from a file at application startup
    ///
    /// A missing or unreadable asset is not fatal: the failure is logged and
    /// an empty table is returned, so every subsequent lookup falls through
    /// to [`UNKNOWN_CODE`]. The same applies to a malformed asset, after the
    /// parser has surfaced which line is broken.
    pub fn load(path: &Path) -> CountryTable {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                log::warn!("Failed to open country table {}: {}", path.display(), e);
                return CountryTable::default();
            }
        };

        match CountryTable::from_reader(BufReader::new(file)) {
            Ok(table) => {
                log::info!(
                    "Loaded {} country prefixes from {}",
                    table.len(),
                    path.display()
                );
                table
            }
            Err(e) => {
                log::error!("Failed to parse country table {}: {}", path.display(), e);
                CountryTable::default()
            }
        }
    }

    /// Resolve a barcode value to its country of origin
    ///
    /// Longest prefix wins: the leading 3 characters are tried before the
    /// leading 2, so an overlapping 3-character allocation always shadows
    /// its 2-character parent. Inputs shorter than a prefix length simply
    /// skip that length; a 1-character input can never match.
    pub fn resolve(&self, barcode: &str) -> Option<&str> {
        for len in [3, 2] {
            if let Some(prefix) = prefix_of(barcode, len) {
                if let Some(country) = self.entries.get(prefix) {
                    return Some(country.as_str());
                }
            }
        }
        None
    }

    /// Resolve with the [`UNKNOWN_CODE`] sentinel for misses
    pub fn display_country(&self, barcode: &str) -> &str {
        self.resolve(barcode).unwrap_or(UNKNOWN_CODE)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromStr for CountryTable {
    type Err = TableError;

    fn from_str(s: &str) -> Result<CountryTable, TableError> {
        CountryTable::from_reader(s.as_bytes())
    }
}

/// Leading `len` characters of `s`, or None if `s` is shorter
///
/// Slices on a char boundary so multi-byte input cannot panic.
fn prefix_of(s: &str, len: usize) -> Option<&str> {
    if s.chars().count() < len {
        return None;
    }
    let end = s
        .char_indices()
        .nth(len)
        .map_or(s.len(), |(i, _)| i);
    Some(&s[..end])
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn sample_table() -> CountryTable {
        "US;x;United States\nDE;x;Germany"
            .parse()
            .expect("sample table parses")
    }

    #[test]
    fn test_resolve_two_char_prefix() {
        let table = sample_table();
        assert_eq!(table.resolve("US0123456"), Some("United States"));
        assert_eq!(table.resolve("DEX"), Some("Germany"));
    }

    #[test]
    fn test_unknown_prefix_hits_sentinel() {
        let table = sample_table();
        assert_eq!(table.resolve("ZZ0000"), None);
        assert_eq!(table.display_country("ZZ0000"), UNKNOWN_CODE);
    }

    #[test]
    fn test_three_char_prefix() {
        let table: CountryTable = "460;460-469;Russia\n489;489;Hong Kong"
            .parse()
            .unwrap();
        assert_eq!(table.resolve("4601234567890"), Some("Russia"));
        assert_eq!(table.resolve("4891234567890"), Some("Hong Kong"));
    }

    #[test]
    fn test_longer_prefix_shadows_shorter() {
        let table: CountryTable = "40;40-44;Germany\n400;special;Testland"
            .parse()
            .unwrap();
        assert_eq!(table.resolve("4001234"), Some("Testland"));
        assert_eq!(table.resolve("4101234"), Some("Germany"));
    }

    #[test]
    fn test_short_inputs_do_not_panic() {
        let table = sample_table();
        assert_eq!(table.resolve("US"), Some("United States"));
        assert_eq!(table.resolve("U"), None);
        assert_eq!(table.resolve(""), None);
    }

    #[test]
    fn test_multibyte_input_does_not_panic() {
        let table = sample_table();
        assert_eq!(table.resolve("ÜÄÖ123"), None);
    }

    #[test]
    fn test_empty_source_yields_empty_table() {
        let table: CountryTable = "".parse().unwrap();
        assert!(table.is_empty());
        assert_eq!(table.display_country("US0123456"), UNKNOWN_CODE);
    }

    #[test]
    fn test_blank_lines_skipped() {
        let table: CountryTable = "US;x;United States\n\n  \nDE;x;Germany\n"
            .parse()
            .unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_duplicate_prefix_last_write_wins() {
        let table: CountryTable = "US;x;First\nUS;x;Second".parse().unwrap();
        assert_eq!(table.resolve("US0"), Some("Second"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_loading_is_idempotent() {
        let source = "US;x;United States\nDE;x;Germany\n460;460-469;Russia";
        let first: CountryTable = source.parse().unwrap();
        let second: CountryTable = source.parse().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_record_rejected() {
        let err = "US;x;United States\nbroken\nDE;x;Germany"
            .parse::<CountryTable>()
            .unwrap_err();
        match err {
            TableError::MalformedRecord { line, fields } => {
                assert_eq!(line, 2);
                assert_eq!(fields, 1);
            }
            other => panic!("expected MalformedRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let table: CountryTable = "US;x;United States;ignored;also ignored"
            .parse()
            .unwrap();
        assert_eq!(table.resolve("US1"), Some("United States"));
    }

    #[test]
    fn test_load_missing_file_yields_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = CountryTable::load(&dir.path().join("nope.csv"));
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "US;x;United States").unwrap();
        writeln!(file, "DE;x;Germany").unwrap();
        let table = CountryTable::load(file.path());
        assert_eq!(table.len(), 2);
        assert_eq!(table.display_country("DE123"), "Germany");
    }

    #[test]
    fn test_load_malformed_file_yields_empty_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "US;x;United States").unwrap();
        writeln!(file, "broken").unwrap();
        let table = CountryTable::load(file.path());
        assert!(table.is_empty());
    }
}
