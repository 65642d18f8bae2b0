use std::io::Read;
use std::path::{Path, PathBuf};

use crate::errors::{InputError, InputResult};
use crate::models::ReadBin;
use crate::utils::{file_label, get_dynamic_reader, parse_delimited, parse_field};

/// Number of columns in a read-density (`.sgr`) file.
pub const READ_TABLE_COLUMNS: usize = 3;

///
/// ReadDensityTable struct, the representation of one `.sgr` file: read
/// counts binned by genomic position, in file order.
///
#[derive(Clone, Debug)]
pub struct ReadDensityTable {
    /// Output column name for this file (the file name).
    pub label: String,
    pub bins: Vec<ReadBin>,
    pub path: Option<PathBuf>,
}

impl ReadDensityTable {
    pub fn new(label: &str, bins: Vec<ReadBin>) -> Self {
        ReadDensityTable {
            label: label.to_string(),
            bins,
            path: None,
        }
    }

    ///
    /// Parse a read-density table from any reader.
    ///
    /// # Arguments
    /// - label: column label, also used in error messages
    /// - reader: headerless three-column TSV
    pub fn from_reader<R: Read>(label: &str, reader: R) -> InputResult<Self> {
        let bins = parse_delimited(reader, label, READ_TABLE_COLUMNS, |record, line| {
            let reads: f64 = parse_field(record, 2, "reads", label, line)?;
            if !reads.is_finite() {
                return Err(InputError::malformed(
                    label,
                    line,
                    format!("reads must be finite, found {}", reads),
                ));
            }

            Ok(ReadBin {
                chr: record.get(0).unwrap_or_default().to_string(),
                position: parse_field(record, 1, "position", label, line)?,
                reads,
            })
        })?;

        Ok(ReadDensityTable::new(label, bins))
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReadBin> {
        self.bins.iter()
    }

    ///
    /// Chromosome names in order of first appearance.
    ///
    pub fn chromosomes(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for bin in &self.bins {
            // consecutive rows usually share a chromosome
            if seen.last() != Some(&bin.chr.as_str()) && !seen.contains(&bin.chr.as_str()) {
                seen.push(&bin.chr);
            }
        }
        seen
    }

    pub fn total_reads(&self) -> f64 {
        self.bins.iter().map(|b| b.reads).sum()
    }
}

impl TryFrom<&Path> for ReadDensityTable {
    type Error = InputError;

    ///
    /// Create a new [ReadDensityTable] from an `.sgr` file (optionally gzipped).
    ///
    fn try_from(value: &Path) -> InputResult<Self> {
        let label = file_label(value);
        let reader = get_dynamic_reader(value)?;
        let mut table = ReadDensityTable::from_reader(&label, reader)?;
        table.path = Some(value.to_owned());
        Ok(table)
    }
}

impl TryFrom<&str> for ReadDensityTable {
    type Error = InputError;

    fn try_from(value: &str) -> InputResult<Self> {
        ReadDensityTable::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for ReadDensityTable {
    type Error = InputError;

    fn try_from(value: PathBuf) -> InputResult<Self> {
        ReadDensityTable::try_from(value.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[fixture]
    fn sgr_file() -> NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".sgr").tempfile().unwrap();
        writeln!(f, "chr1\t0\t1").unwrap();
        writeln!(f, "chr1\t10\t2.5").unwrap();
        writeln!(f, "chr2\t0\t4").unwrap();
        writeln!(f, "chr1\t20\t0").unwrap();
        f.flush().unwrap();
        f
    }

    #[rstest]
    fn test_read_table_from_file(sgr_file: NamedTempFile) {
        let table = ReadDensityTable::try_from(sgr_file.path()).unwrap();

        assert_eq!(table.len(), 4);
        assert!(table.label.ends_with(".sgr"));
        assert_eq!(table.bins[1], ReadBin::new("chr1", 10, 2.5));
        assert_eq!(table.path.as_deref(), Some(sgr_file.path()));
    }

    #[rstest]
    fn test_chromosomes_in_first_seen_order(sgr_file: NamedTempFile) {
        let table = ReadDensityTable::try_from(sgr_file.path()).unwrap();
        assert_eq!(table.chromosomes(), vec!["chr1", "chr2"]);
        assert!((table.total_reads() - 7.5).abs() < 1e-9);
    }

    #[rstest]
    #[case("chr1\t10\n")]
    #[case("chr1\t10\t1\textra\n")]
    #[case("chr1\tten\t1\n")]
    #[case("chr1\t10\tmany\n")]
    fn test_malformed_rows_are_rejected(#[case] data: &str) {
        let result = ReadDensityTable::from_reader("bad.sgr", data.as_bytes());
        assert!(matches!(result, Err(InputError::MalformedInput { .. })));
    }

    #[rstest]
    #[case("nan")]
    #[case("NaN")]
    #[case("inf")]
    #[case("-inf")]
    #[case("infinity")]
    fn test_non_finite_reads_are_rejected(#[case] reads: &str) {
        let data = format!("chr1\t0\t1\nchr1\t10\t{}\n", reads);
        let result = ReadDensityTable::from_reader("bad.sgr", data.as_bytes());
        match result {
            Err(InputError::MalformedInput { line, reason, .. }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("finite"), "{}", reason);
            }
            other => panic!("expected MalformedInput, got {:?}", other),
        }
    }

    #[rstest]
    fn test_empty_input_parses_to_empty_table() {
        let table = ReadDensityTable::from_reader("empty.sgr", "".as_bytes()).unwrap();
        assert!(table.is_empty());
    }
}
