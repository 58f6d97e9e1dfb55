use std::collections::HashMap;
use std::io::Cursor;

use csv::ReaderBuilder;

use super::imports_errors::{ImportError, Result};
use super::imports_model::ParsedRow;

/// Parses delimited text into a header list and a lazy, forward-only row
/// sequence. The delimiter is supplied by the caller; comma, semicolon and
/// tab all occur in the field sheets this service ingests.
///
/// The header row is mandatory but lenient: empty header names are preserved
/// as empty-string keys. Values come back as raw strings; type coercion is
/// the upsert engine's job.
pub fn parse(raw_text: &str, delimiter: u8) -> Result<(Vec<String>, ParsedRows)> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(raw_text.as_bytes().to_vec()));

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::InvalidCsv(e.to_string()))?
        .iter()
        .map(String::from)
        .collect();

    let rows = ParsedRows {
        headers: headers.clone(),
        records: reader.into_records(),
        next_index: 0,
    };

    Ok((headers, rows))
}

/// Materializes the headers and first `limit` rows for a preview. A caller
/// that also needs the full pass parses again; the main sequence is
/// single-pass and not restartable.
pub fn preview(raw_text: &str, delimiter: u8, limit: usize) -> Result<(Vec<String>, Vec<ParsedRow>)> {
    let (headers, rows) = parse(raw_text, delimiter)?;
    let mut first_rows = Vec::new();
    for row in rows.take(limit) {
        first_rows.push(row?);
    }
    Ok((headers, first_rows))
}

/// Lazy single-pass iterator over parsed CSV rows
pub struct ParsedRows {
    headers: Vec<String>,
    records: csv::StringRecordsIntoIter<Cursor<Vec<u8>>>,
    next_index: usize,
}

impl Iterator for ParsedRows {
    type Item = Result<ParsedRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        self.next_index += 1;

        Some(match record {
            Ok(record) => {
                let mut values = HashMap::with_capacity(self.headers.len());
                for (i, header) in self.headers.iter().enumerate() {
                    // Ragged rows read missing trailing cells as empty
                    let value = record.get(i).unwrap_or("");
                    values.insert(header.clone(), value.to_string());
                }
                Ok(ParsedRow {
                    index: self.next_index,
                    values,
                })
            }
            Err(e) => Err(ImportError::InvalidCsv(e.to_string())),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_semicolon_delimited() {
        let raw = "Asset Tag;IMEI;Matériel\nPHONE100;123456789012345;Galaxy S22";
        let (headers, rows) = parse(raw, b';').unwrap();
        assert_eq!(headers, vec!["Asset Tag", "IMEI", "Matériel"]);

        let rows: Vec<_> = rows.map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].get("Asset Tag"), Some("PHONE100"));
        assert_eq!(rows[0].get("Matériel"), Some("Galaxy S22"));
    }

    #[test]
    fn test_parse_tab_delimited() {
        let raw = "a\tb\n1\t2\n3\t4";
        let (headers, rows) = parse(raw, b'\t').unwrap();
        assert_eq!(headers, vec!["a", "b"]);
        assert_eq!(rows.count(), 2);
    }

    #[test]
    fn test_empty_header_names_are_preserved() {
        let raw = "a,,c\n1,2,3";
        let (headers, mut rows) = parse(raw, b',').unwrap();
        assert_eq!(headers, vec!["a", "", "c"]);

        let row = rows.next().unwrap().unwrap();
        assert_eq!(row.get(""), Some("2"));
    }

    #[test]
    fn test_ragged_row_reads_missing_cells_as_empty() {
        let raw = "a,b,c\n1,2";
        let (_, mut rows) = parse(raw, b',').unwrap();
        let row = rows.next().unwrap().unwrap();
        assert_eq!(row.get("c"), Some(""));
    }

    #[test]
    fn test_preview_takes_first_n_rows() {
        let raw = "a\n1\n2\n3\n4\n5\n6\n7";
        let (headers, rows) = preview(raw, b',', 5).unwrap();
        assert_eq!(headers, vec!["a"]);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[4].get("a"), Some("5"));
    }

    #[test]
    fn test_row_indexes_are_one_based() {
        let raw = "a\nx\ny";
        let (_, rows) = parse(raw, b',').unwrap();
        let indexes: Vec<_> = rows.map(|r| r.unwrap().index).collect();
        assert_eq!(indexes, vec![1, 2]);
    }
}
