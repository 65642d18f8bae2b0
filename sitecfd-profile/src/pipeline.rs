//! Per-file pipeline and multi-file orchestration.
//!
//! Each read-density file goes through partition → window extraction →
//! strand aggregation → normalization on its own, reading the shared site
//! table. Files are independent and run on a rayon pool; [combine] is the
//! only point that waits for all of them.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{info, warn};
use rayon::prelude::*;
use serde::Serialize;

use sitecfd_core::models::{ReadDensityTable, SiteTable, Strand};

use crate::aggregate::{AlignedTable, StrandAggregator};
use crate::combine::{CombinedOutput, combine};
use crate::config::ProfileConfig;
use crate::consts::{BIN_SIZE, HALF_WIDTH};
use crate::errors::{ProfileError, ProfileResult};
use crate::normalize::{NormalizedDistribution, normalize};
use crate::partition::partition;
use crate::window::extract;

///
/// Shared flag for stopping a run early. Checked between files and between
/// sites; a tripped token makes the pipeline return [ProfileError::Cancelled].
///
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn check(&self) -> ProfileResult<()> {
        if self.is_cancelled() {
            return Err(ProfileError::Cancelled);
        }
        Ok(())
    }
}

/// Figures reported for one processed read-density file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileSummary {
    pub file: String,
    pub bins: usize,
    pub chromosomes: usize,
    pub forward_sites: usize,
    pub reverse_sites: usize,
    pub skipped_sites: usize,
    pub total_reads: f64,
    pub normalization_factor: f64,
}

/// Everything computed for one read-density file.
#[derive(Debug, Clone)]
pub struct FileProfile {
    pub summary: FileSummary,
    pub aligned: AlignedTable,
    pub distribution: NormalizedDistribution,
}

///
/// Run the full per-file pipeline for one read-density table.
///
/// Any site that cannot be placed (unknown chromosome, no matching bin,
/// window crossing a chromosome end) fails the whole file: dropping it would
/// silently change the normalization total. Sites with an unrecognized strand
/// are skipped until the skip threshold is reached.
///
pub fn profile_file(
    sites: &SiteTable,
    reads: &ReadDensityTable,
    config: &ProfileConfig,
    token: &CancellationToken,
) -> ProfileResult<FileProfile> {
    let label = reads.label.as_str();
    info!("Currently working with {}", label);

    let partition = partition(reads)?;
    info!(
        "{}: contains {} bin values on {} chromosomes",
        label,
        partition.n_bins(),
        partition.n_chromosomes()
    );
    for (chr, repeated) in partition.duplicated_positions() {
        warn!(
            "{}: {} has {} bins repeating an earlier position, the first one is used",
            label, chr, repeated
        );
    }

    let mut aggregator = StrandAggregator::new(label);
    for site in &sites.sites {
        token.check()?;
        match site.strand() {
            Some(strand) => {
                let window = extract(&partition, site, BIN_SIZE, HALF_WIDTH)?;
                aggregator.push(window, strand)?;
            }
            None => aggregator.skip(site)?,
        }
    }

    let skipped_sites = aggregator.skipped();
    let aligned = aggregator.finish();
    let distribution = normalize(label, &aligned, config.empty_aggregate)?;

    info!(
        "{}: the total amount of reads is {}, the normalisation number is {}",
        label, distribution.total_reads, distribution.normalization_factor
    );

    Ok(FileProfile {
        summary: FileSummary {
            file: label.to_string(),
            bins: partition.n_bins(),
            chromosomes: partition.n_chromosomes(),
            forward_sites: aligned.count(Strand::Forward),
            reverse_sites: aligned.count(Strand::Reverse),
            skipped_sites,
            total_reads: distribution.total_reads,
            normalization_factor: distribution.normalization_factor,
        },
        aligned,
        distribution,
    })
}

///
/// Profile every table on a pool of `config.threads` workers.
///
/// Results come back in input order, one per table, with failures tagged by
/// file. `on_done` is called with each file's label as it finishes.
///
pub fn profile_files<F>(
    sites: &SiteTable,
    tables: &[ReadDensityTable],
    config: &ProfileConfig,
    token: &CancellationToken,
    on_done: F,
) -> ProfileResult<Vec<ProfileResult<FileProfile>>>
where
    F: Fn(&str) + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads.max(1))
        .build()?;

    let results = pool.install(|| {
        tables
            .par_iter()
            .map(|table| {
                token.check()?;
                let result = profile_file(sites, table, config, token)
                    .map_err(|e| e.in_file(&table.label));
                on_done(&table.label);
                result
            })
            .collect()
    });

    Ok(results)
}

/// Outcome of a multi-file run.
#[derive(Debug)]
pub struct ProfileRun {
    /// Successfully processed files, in input order.
    pub profiles: Vec<FileProfile>,
    /// Files that failed; only populated when `keep_going` is set.
    pub failures: Vec<ProfileError>,
    pub combined: CombinedOutput,
}

impl ProfileRun {
    pub fn summaries(&self) -> Vec<&FileSummary> {
        self.profiles.iter().map(|p| &p.summary).collect()
    }
}

///
/// Profile all read-density tables against one site table and combine the
/// normalized series into a single output table.
///
/// Without `keep_going` the first failing file (in input order) fails the
/// run. With it, failed files are collected in [ProfileRun::failures] and the
/// remaining files are combined; a run where every file fails is still an
/// error. Cancellation always fails the run.
///
pub fn run<F>(
    sites: &SiteTable,
    tables: &[ReadDensityTable],
    config: &ProfileConfig,
    token: &CancellationToken,
    on_done: F,
) -> ProfileResult<ProfileRun>
where
    F: Fn(&str) + Sync,
{
    if tables.is_empty() {
        return Err(ProfileError::NoReadTables);
    }

    let counts = sites.strand_counts();
    info!(
        "The site file {} is being used. Contains: {} forward strands and {} reverse strands",
        sites.label, counts.forward, counts.reverse
    );
    if counts.unrecognized > 0 {
        warn!(
            "{}: {} sites have a strand other than F or R",
            sites.label, counts.unrecognized
        );
    }

    let mut profiles = Vec::with_capacity(tables.len());
    let mut failures = Vec::new();
    for result in profile_files(sites, tables, config, token, on_done)? {
        match result {
            Ok(profile) => profiles.push(profile),
            Err(ProfileError::Cancelled) => return Err(ProfileError::Cancelled),
            Err(e) if config.keep_going => {
                warn!("{}", e);
                failures.push(e);
            }
            Err(e) => return Err(e),
        }
    }

    if profiles.is_empty() {
        return Err(failures
            .into_iter()
            .next()
            .unwrap_or(ProfileError::NoReadTables));
    }

    token.check()?;
    let combined = combine(profiles.iter().map(|p| p.distribution.clone()))?;
    info!(
        "Finished processing {} of {} files",
        profiles.len(),
        tables.len()
    );

    Ok(ProfileRun {
        profiles,
        failures,
        combined,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    use sitecfd_core::models::{ReadBin, ReferenceSite};

    use crate::consts::WINDOW_BINS;

    fn flat_reads(label: &str, reads: f64) -> ReadDensityTable {
        let bins = (0..=300)
            .map(|i| ReadBin::new("chr1", i * 10, reads))
            .collect();
        ReadDensityTable::new(label, bins)
    }

    #[fixture]
    fn sites() -> SiteTable {
        SiteTable::new(
            "sites.txt",
            vec![
                ReferenceSite::new("chr1", "geneF", 1500, "F"),
                ReferenceSite::new("chr1", "geneR", 1500, "R"),
            ],
        )
    }

    #[rstest]
    fn test_profile_file_summary(sites: SiteTable) {
        let reads = flat_reads("flat.sgr", 1.0);
        let profile = profile_file(
            &sites,
            &reads,
            &ProfileConfig::default(),
            &CancellationToken::new(),
        )
        .unwrap();

        assert_eq!(
            profile.summary,
            FileSummary {
                file: "flat.sgr".to_string(),
                bins: 301,
                chromosomes: 1,
                forward_sites: 1,
                reverse_sites: 1,
                skipped_sites: 0,
                total_reads: 482.0,
                normalization_factor: 2.0,
            }
        );
        assert_eq!(profile.aligned.n_columns(), 2);
        assert_eq!(profile.distribution.values, vec![1.0; WINDOW_BINS]);
    }

    #[rstest]
    fn test_cancelled_token_stops_the_run(sites: SiteTable) {
        let token = CancellationToken::new();
        token.cancel();
        let result = run(
            &sites,
            &[flat_reads("flat.sgr", 1.0)],
            &ProfileConfig::default(),
            &token,
            |_| {},
        );
        assert!(matches!(result, Err(ProfileError::Cancelled)));
    }

    #[rstest]
    fn test_cancelled_token_stops_the_site_loop(sites: SiteTable) {
        let token = CancellationToken::new();
        token.cancel();
        let result = profile_file(
            &sites,
            &flat_reads("flat.sgr", 1.0),
            &ProfileConfig::default(),
            &token,
        );
        assert!(matches!(result, Err(ProfileError::Cancelled)));
    }

    #[rstest]
    fn test_cancellation_is_not_tagged_with_a_file() {
        let err = ProfileError::Cancelled.in_file("flat.sgr");
        assert!(matches!(err, ProfileError::Cancelled));
    }

    #[rstest]
    fn test_run_without_tables(sites: SiteTable) {
        let result = run(
            &sites,
            &[],
            &ProfileConfig::default(),
            &CancellationToken::new(),
            |_| {},
        );
        assert!(matches!(result, Err(ProfileError::NoReadTables)));
    }
}
