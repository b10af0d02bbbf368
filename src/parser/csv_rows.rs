//! Row reader for `timestamp,category,weight` CSV files.
//!
//! Files carry no header row. Every record must have exactly three fields
//! and an integer weight; anything else is reported with its line number.
//! A blank line is a record with no fields, so it is rejected too.

use super::schema::Row;
use crate::utils::config::FIELDS_PER_ROW;
use crate::utils::error::ParseError;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Lazy iterator over the rows of a CSV source
///
/// The underlying reader is owned, so a `RowReader<File>` closes its file
/// when dropped, whether iteration finished or stopped at an error.
pub struct RowReader<R: Read> {
    records: csv::StringRecordsIntoIter<R>,
    /// Reader line right after the previous record
    line: u64,
    done: bool,
}

impl<R: Read> RowReader<R> {
    /// Wrap any reader
    pub fn from_reader(reader: R) -> Self {
        // `\n` only: a CRLF terminator would leave each `\n` to the next
        // read and break the line accounting below. A stray `\r` ends up at
        // the tail of the weight field, which is trimmed.
        let records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_reader(reader)
            .into_records();
        Self {
            records,
            line: 1,
            done: false,
        }
    }

    fn fail(&mut self, err: ParseError) -> Option<Result<Row, ParseError>> {
        self.done = true;
        Some(Err(err))
    }
}

impl<R: Read> Iterator for RowReader<R> {
    type Item = Result<Row, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // The csv reader skips blank lines silently; they show up as extra
        // newlines consumed between the previous record and this one.
        let next = self.records.next();
        let start = self.line;
        self.line = self.records.reader().position().line();
        let consumed = self.line - start;

        let record = match next {
            None => {
                self.done = true;
                return (consumed > 0).then(|| Err(blank_line(start)));
            }
            Some(Err(e)) => return self.fail(ParseError::Csv(e)),
            Some(Ok(record)) => record,
        };

        let embedded: u64 = record
            .iter()
            .map(|field| field.matches('\n').count() as u64)
            .sum();
        if consumed > embedded + 1 {
            return self.fail(blank_line(start));
        }

        match parse_record(&record, start) {
            Ok(row) => Some(Ok(row)),
            Err(e) => self.fail(e),
        }
    }
}

fn blank_line(line: u64) -> ParseError {
    ParseError::FieldCount { line, found: 0 }
}

/// Open a CSV file for lazy row iteration
///
/// **Public** - main entry point for reading input files
///
/// # Errors
/// * `ParseError::Io` - file missing or unreadable
pub fn open_rows(path: impl AsRef<Path>) -> Result<RowReader<File>, ParseError> {
    let path = path.as_ref();
    debug!("Opening input: {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(RowReader::from_reader(file))
}

/// Read every row of a CSV file, stopping at the first malformed one
pub fn read_rows(path: impl AsRef<Path>) -> Result<Vec<Row>, ParseError> {
    open_rows(path)?.collect()
}

/// Convert one CSV record into a [`Row`]
///
/// **Private** - internal helper for RowReader
fn parse_record(record: &csv::StringRecord, line: u64) -> Result<Row, ParseError> {
    if record.len() != FIELDS_PER_ROW {
        return Err(ParseError::FieldCount {
            line,
            found: record.len(),
        });
    }

    let raw_weight = &record[2];
    let weight = raw_weight
        .trim()
        .parse::<i64>()
        .map_err(|source| ParseError::InvalidWeight {
            line,
            value: raw_weight.to_string(),
            source,
        })?;

    Ok(Row::new(&record[0], &record[1], weight))
}
