//! Record/field splitting for delimited text.

/// Field separator used by the merger.
pub const TAB: u8 = b'\t';

/// Record separator.
pub const NEWLINE: u8 = b'\n';

/// A delimited payload split into its header row and data records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTable {
    /// Header names in the order the file declares them (duplicates kept as-is).
    pub headers: Vec<String>,
    /// Data records, one per non-blank line after the header. Lengths may differ from
    /// `headers.len()`.
    pub records: Vec<Vec<String>>,
}

/// Split `raw` into a header row and data records.
///
/// Rules:
///
/// - Records are separated by `\n`; lines that are empty after trimming are dropped entirely.
/// - Fields are separated by `separator` and trimmed. Quotes carry no meaning.
/// - Records may have any number of fields.
/// - The first remaining line is the header row.
///
/// Returns `None` when no non-blank line exists.
pub fn parse_delimited(raw: &str, separator: u8) -> Option<ParsedTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(separator)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .terminator(csv::Terminator::Any(NEWLINE))
        .from_reader(raw.as_bytes());

    let mut lines = Vec::new();
    for (line_idx0, result) in rdr.records().enumerate() {
        // Input is already `&str`, so the reader has no I/O or UTF-8 failure to report in practice.
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(record = line_idx0 + 1, error = %e, "skipping unreadable record");
                continue;
            }
        };
        // Whitespace-only lines trim down to fields that are all empty.
        if record.iter().all(str::is_empty) {
            continue;
        }
        lines.push(record.iter().map(str::to_owned).collect::<Vec<_>>());
    }

    let mut lines = lines.into_iter();
    let headers = lines.next()?;
    Some(ParsedTable {
        headers,
        records: lines.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::{TAB, parse_delimited};

    #[test]
    fn blank_lines_are_dropped_and_fields_trimmed() {
        let parsed = parse_delimited("\n  a \tb\n\n 1\t 2 \r\n   \n", TAB).unwrap();
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(parsed.records, vec![vec!["1".to_string(), "2".to_string()]]);
    }

    #[test]
    fn all_blank_input_yields_none() {
        assert_eq!(parse_delimited("", TAB), None);
        assert_eq!(parse_delimited("\n \n\t\n", TAB), None);
    }

    #[test]
    fn header_only_input_has_no_records() {
        let parsed = parse_delimited("x\ty", TAB).unwrap();
        assert_eq!(parsed.headers, vec!["x", "y"]);
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn ragged_records_are_kept_verbatim() {
        let parsed = parse_delimited("a\tb\tc\n1\n1\t2\t3\t4", TAB).unwrap();
        assert_eq!(parsed.records[0].len(), 1);
        assert_eq!(parsed.records[1].len(), 4);
    }

    #[test]
    fn quotes_are_plain_characters() {
        let parsed = parse_delimited("note\tsize\n\"a\tb\"\t6\" tall", TAB).unwrap();
        assert_eq!(parsed.headers, vec!["note", "size"]);
        assert_eq!(parsed.records[0], vec!["\"a", "b\"", "6\" tall"]);
    }

    #[test]
    fn empty_fields_inside_a_line_are_kept() {
        let parsed = parse_delimited("a\tb\tc\n\t2\t\n", TAB).unwrap();
        assert_eq!(parsed.records, vec![vec!["", "2", ""]]);
    }

    #[test]
    fn duplicate_header_names_are_kept_in_order() {
        let parsed = parse_delimited("a\tb\ta\n1\t2\t3", TAB).unwrap();
        assert_eq!(parsed.headers, vec!["a", "b", "a"]);
    }

    #[test]
    fn separator_is_configurable() {
        let parsed = parse_delimited("a,b\n1,2", b',').unwrap();
        assert_eq!(parsed.headers, vec!["a", "b"]);
        assert_eq!(parsed.records[0], vec!["1", "2"]);
    }
}
