//! Writers for the combined table, per-site tables and the run summary.

use std::fs::{File, create_dir_all};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::aggregate::AlignedTable;
use crate::combine::CombinedOutput;
use crate::config::Delimiter;
use crate::consts::DISTANCE_COLUMN;
use crate::errors::ProfileResult;

fn writer_for<W: Write>(writer: W, delimiter: Delimiter) -> csv::Writer<W> {
    csv::WriterBuilder::new()
        .delimiter(delimiter.as_byte())
        .from_writer(writer)
}

///
/// Write the combined output: a `distance` column followed by one column per
/// input file, headed by the file label.
///
pub fn write_combined<W: Write>(
    output: &CombinedOutput,
    writer: W,
    delimiter: Delimiter,
) -> ProfileResult<()> {
    let mut wtr = writer_for(writer, delimiter);

    let mut header = vec![DISTANCE_COLUMN.to_string()];
    header.extend(output.columns.iter().map(|(label, _)| label.clone()));
    wtr.write_record(&header)?;

    for (row, distance) in output.distances.iter().enumerate() {
        let mut record = vec![distance.to_string()];
        record.extend(output.columns.iter().map(|(_, values)| values[row].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

///
/// Write one file's strand-aligned table: a `distance` column followed by one
/// column per site, forward sites first.
///
pub fn write_aligned<W: Write>(
    table: &AlignedTable,
    writer: W,
    delimiter: Delimiter,
) -> ProfileResult<()> {
    let mut wtr = writer_for(writer, delimiter);

    let mut header = vec![DISTANCE_COLUMN.to_string()];
    header.extend(table.columns.iter().map(|c| c.name.clone()));
    wtr.write_record(&header)?;

    for (row, distance) in table.distances.iter().enumerate() {
        let mut record = vec![distance.to_string()];
        record.extend(table.columns.iter().map(|c| c.values[row].to_string()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// Path of the per-site table written for `label` inside `dir`.
pub fn per_site_path(dir: &Path, label: &str) -> PathBuf {
    dir.join(label)
}

/// Write `table` to `dir/<label>`, creating `dir` if needed.
pub fn write_aligned_to_dir(
    table: &AlignedTable,
    dir: &Path,
    label: &str,
    delimiter: Delimiter,
) -> ProfileResult<PathBuf> {
    create_dir_all(dir)?;
    let path = per_site_path(dir, label);
    let file = File::create(&path)?;
    write_aligned(table, BufWriter::new(file), delimiter)?;
    Ok(path)
}

/// Pretty-printed JSON of anything serializable, usually the run summaries.
pub fn write_summary<W: Write, T: Serialize + ?Sized>(summary: &T, writer: W) -> ProfileResult<()> {
    let mut writer = writer;
    serde_json::to_writer_pretty(&mut writer, summary)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use tempfile::tempdir;

    use sitecfd_core::models::Strand;

    use crate::aggregate::{SiteColumn, distance_axis};
    use crate::consts::WINDOW_BINS;

    fn combined() -> CombinedOutput {
        CombinedOutput {
            distances: distance_axis(),
            columns: vec![
                ("a.sgr".to_string(), vec![1.0; WINDOW_BINS]),
                ("b.sgr".to_string(), vec![0.5; WINDOW_BINS]),
            ],
        }
    }

    #[rstest]
    #[case(Delimiter::Tab, "distance\ta.sgr\tb.sgr", "-1200\t1\t0.5")]
    #[case(Delimiter::Comma, "distance,a.sgr,b.sgr", "-1200,1,0.5")]
    fn test_write_combined(
        #[case] delimiter: Delimiter,
        #[case] header: &str,
        #[case] first_row: &str,
    ) {
        let mut buf = Vec::new();
        write_combined(&combined(), &mut buf, delimiter).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), WINDOW_BINS + 1);
        assert_eq!(lines[0], header);
        assert_eq!(lines[1], first_row);
        assert!(lines[WINDOW_BINS].starts_with("1200"));
    }

    #[rstest]
    fn test_write_aligned_to_dir() {
        let dir = tempdir().unwrap();
        let table = AlignedTable {
            distances: distance_axis(),
            columns: vec![
                SiteColumn {
                    name: "geneF".to_string(),
                    strand: Strand::Forward,
                    values: vec![2.0; WINDOW_BINS],
                },
                SiteColumn {
                    name: "geneR".to_string(),
                    strand: Strand::Reverse,
                    values: vec![3.0; WINDOW_BINS],
                },
            ],
        };

        let out_dir = dir.path().join("per_site");
        let path = write_aligned_to_dir(&table, &out_dir, "a.sgr", Delimiter::Tab).unwrap();
        assert_eq!(path, out_dir.join("a.sgr"));

        let text = std::fs::read_to_string(path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("distance\tgeneF\tgeneR"));
        assert_eq!(lines.next(), Some("-1200\t2\t3"));
    }

    #[rstest]
    fn test_write_summary() {
        #[derive(Serialize)]
        struct Row {
            file: &'static str,
            total_reads: f64,
        }

        let mut buf = Vec::new();
        write_summary(
            &[Row {
                file: "a.sgr",
                total_reads: 482.0,
            }],
            &mut buf,
        )
        .unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(parsed[0]["file"], "a.sgr");
        assert_eq!(parsed[0]["total_reads"], 482.0);
    }
}
