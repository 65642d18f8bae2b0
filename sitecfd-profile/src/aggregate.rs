//! Strand-aware alignment of site windows onto a shared distance axis.
//!
//! Forward windows are read left to right, so window row 0 sits at distance
//! `-MAX_DISTANCE`. Reverse windows are mirrored: their row 0 sits at
//! `+MAX_DISTANCE`. After alignment a positive distance means downstream of
//! the site for both strands.

use log::warn;

use sitecfd_core::models::{ReferenceSite, Strand};

use crate::consts::{BIN_SIZE, HALF_WIDTH, STRAND_SKIP_THRESHOLD, WINDOW_BINS};
use crate::errors::{ProfileError, ProfileResult};
use crate::window::WindowSeries;

///
/// The shared distance axis, `-MAX_DISTANCE..=MAX_DISTANCE` in steps of
/// `BIN_SIZE`.
///
pub fn distance_axis() -> Vec<i64> {
    let half = HALF_WIDTH as i64;
    (-half..=half).map(|i| i * BIN_SIZE).collect()
}

/// One aligned site column.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteColumn {
    pub name: String,
    pub strand: Strand,
    /// One value per entry of [distance_axis], ascending distance.
    pub values: Vec<f64>,
}

///
/// Per-file table of aligned windows: rows are distances, columns are sites.
/// Forward sites come first, then reverse sites, each group in site order.
///
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedTable {
    pub distances: Vec<i64>,
    pub columns: Vec<SiteColumn>,
}

impl AlignedTable {
    pub fn n_rows(&self) -> usize {
        self.distances.len()
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn count(&self, strand: Strand) -> usize {
        self.columns.iter().filter(|c| c.strand == strand).count()
    }

    /// Sum across all site columns, per distance.
    pub fn row_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_rows()];
        for column in &self.columns {
            for (sum, value) in sums.iter_mut().zip(&column.values) {
                *sum += value;
            }
        }
        sums
    }
}

///
/// Running count of sites skipped for an unrecognized strand within one
/// read-density file's pass. Reaching the threshold escalates to
/// [ProfileError::UnrecognizedStrand].
///
#[derive(Debug, Clone)]
pub struct SkipLedger {
    file: String,
    threshold: usize,
    skipped: usize,
}

impl SkipLedger {
    pub fn new(file: &str, threshold: usize) -> Self {
        SkipLedger {
            file: file.to_string(),
            threshold,
            skipped: 0,
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn record(&mut self, site: &ReferenceSite) -> ProfileResult<()> {
        self.skipped += 1;
        warn!(
            "{}: strand {:?} of site {} is not F or R, skipping it",
            self.file, site.strand_symbol, site
        );

        if self.skipped >= self.threshold {
            return Err(ProfileError::UnrecognizedStrand {
                file: self.file.clone(),
                skipped: self.skipped,
                threshold: self.threshold,
                site: site.clone(),
            });
        }
        Ok(())
    }
}

///
/// Collects windows into forward and reverse groups, then lays both out on
/// the shared distance axis.
///
#[derive(Debug)]
pub struct StrandAggregator {
    forward: Vec<SiteColumn>,
    reverse: Vec<SiteColumn>,
    ledger: SkipLedger,
}

impl StrandAggregator {
    pub fn new(file: &str) -> Self {
        StrandAggregator {
            forward: Vec::new(),
            reverse: Vec::new(),
            ledger: SkipLedger::new(file, STRAND_SKIP_THRESHOLD),
        }
    }

    pub fn push(&mut self, window: WindowSeries, strand: Strand) -> ProfileResult<()> {
        if window.values.len() != WINDOW_BINS {
            return Err(ProfileError::WindowShape {
                name: window.name,
                found: window.values.len(),
                expected: WINDOW_BINS,
            });
        }

        let WindowSeries { name, mut values } = window;
        match strand {
            Strand::Forward => self.forward.push(SiteColumn {
                name,
                strand,
                values,
            }),
            Strand::Reverse => {
                values.reverse();
                self.reverse.push(SiteColumn {
                    name,
                    strand,
                    values,
                })
            }
        }
        Ok(())
    }

    /// Exclude a site whose strand is not recognized.
    pub fn skip(&mut self, site: &ReferenceSite) -> ProfileResult<()> {
        self.ledger.record(site)
    }

    pub fn skipped(&self) -> usize {
        self.ledger.skipped()
    }

    pub fn finish(self) -> AlignedTable {
        let mut columns = self.forward;
        columns.extend(self.reverse);
        AlignedTable {
            distances: distance_axis(),
            columns,
        }
    }
}

///
/// Align a batch of already-extracted windows. See [StrandAggregator].
///
pub fn aggregate<I>(file: &str, windows: I) -> ProfileResult<AlignedTable>
where
    I: IntoIterator<Item = (WindowSeries, Strand)>,
{
    let mut aggregator = StrandAggregator::new(file);
    for (window, strand) in windows {
        aggregator.push(window, strand)?;
    }
    Ok(aggregator.finish())
}
