use std::io::Read;
use std::path::{Path, PathBuf};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::errors::{InputError, InputResult};
use crate::models::{ReferenceSite, Strand};
use crate::utils::{file_label, get_dynamic_reader, parse_delimited, parse_field};

/// Number of columns in a reference-site file.
pub const SITE_TABLE_COLUMNS: usize = 4;

/// Tally of strand symbols in a site table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StrandCounts {
    pub forward: usize,
    pub reverse: usize,
    pub unrecognized: usize,
}

///
/// SiteTable struct, the parsed reference-site file. Rows keep file order,
/// which is also the order of the per-site output columns.
///
#[derive(Clone, Debug)]
pub struct SiteTable {
    pub label: String,
    pub sites: Vec<ReferenceSite>,
    pub path: Option<PathBuf>,
}

impl SiteTable {
    pub fn new(label: &str, sites: Vec<ReferenceSite>) -> Self {
        SiteTable {
            label: label.to_string(),
            sites,
            path: None,
        }
    }

    pub fn from_reader<R: Read>(label: &str, reader: R) -> InputResult<Self> {
        let sites = parse_delimited(reader, label, SITE_TABLE_COLUMNS, |record, line| {
            Ok(ReferenceSite {
                chr: record.get(0).unwrap_or_default().to_string(),
                name: record.get(1).unwrap_or_default().to_string(),
                position: parse_field(record, 2, "position", label, line)?,
                strand_symbol: record.get(3).unwrap_or_default().to_string(),
            })
        })?;

        Ok(SiteTable::new(label, sites))
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceSite> {
        self.sites.iter()
    }

    pub fn strand_counts(&self) -> StrandCounts {
        let mut counts = StrandCounts::default();
        for site in &self.sites {
            match site.strand() {
                Some(Strand::Forward) => counts.forward += 1,
                Some(Strand::Reverse) => counts.reverse += 1,
                None => counts.unrecognized += 1,
            }
        }
        counts
    }
}

impl TryFrom<&Path> for SiteTable {
    type Error = InputError;

    fn try_from(value: &Path) -> InputResult<Self> {
        let label = file_label(value);
        let reader = get_dynamic_reader(value)?;
        let mut table = SiteTable::from_reader(&label, reader)?;
        table.path = Some(value.to_owned());
        Ok(table)
    }
}

impl TryFrom<&str> for SiteTable {
    type Error = InputError;

    fn try_from(value: &str) -> InputResult<Self> {
        SiteTable::try_from(Path::new(value))
    }
}

impl TryFrom<PathBuf> for SiteTable {
    type Error = InputError;

    fn try_from(value: PathBuf) -> InputResult<Self> {
        SiteTable::try_from(value.as_path())
    }
}
