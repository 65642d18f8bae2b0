use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use flate2::read::MultiGzDecoder;

use crate::errors::{InputError, InputResult};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> InputResult<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path)
        .map_err(|e| InputError::FileReadError(format!("{}: {}", path.display(), e)))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Label used to name a file's column in the output: the bare file name,
/// without any leading directories.
///
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

///
/// Parse a headerless, tab-separated table with a fixed number of columns.
///
/// Every record must have exactly `n_columns` fields, otherwise the whole
/// table is rejected with [InputError::MalformedInput]. Empty lines are
/// skipped and fields are trimmed. `parse_row` receives the record and its
/// 1-based line number.
///
/// # Arguments
/// - reader: source of the table
/// - label: name reported in errors
/// - n_columns: expected field count per row
/// - parse_row: converts one validated record into a row
pub fn parse_delimited<R, T, F>(
    reader: R,
    label: &str,
    n_columns: usize,
    mut parse_row: F,
) -> InputResult<Vec<T>>
where
    R: Read,
    F: FnMut(&StringRecord, u64) -> InputResult<T>,
{
    let mut rdr = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != n_columns {
            return Err(InputError::malformed(
                label,
                line,
                format!(
                    "expected {} columns, found {}",
                    n_columns,
                    record.len()
                ),
            ));
        }

        rows.push(parse_row(&record, line)?);
    }

    Ok(rows)
}

///
/// Parse one field of a record, reporting the column name on failure.
///
pub fn parse_field<T: std::str::FromStr>(
    record: &StringRecord,
    index: usize,
    column: &str,
    label: &str,
    line: u64,
) -> InputResult<T> {
    let raw = record.get(index).unwrap_or_default();
    raw.parse::<T>().map_err(|_| {
        InputError::malformed(label, line, format!("cannot parse {} from {:?}", column, raw))
    })
}
