use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::ArgMatches;
use fxhash::FxHashSet;
use indicatif::ProgressBar;
use log::{info, warn};

use sitecfd_core::models::{ReadDensityTable, SiteTable};
use sitecfd_profile::config::{Delimiter, EmptyAggregatePolicy, ProfileConfig};
use sitecfd_profile::output::{write_aligned_to_dir, write_combined, write_summary};
use sitecfd_profile::{CancellationToken, run};

///
/// Build the run configuration: defaults, then the `--config` file, then any
/// flags given on the command line.
///
pub fn resolve_config(matches: &ArgMatches) -> Result<ProfileConfig> {
    let mut config = match matches.get_one::<String>("config") {
        Some(path) => ProfileConfig::try_from(Path::new(path))
            .with_context(|| format!("Failed to load config file {}", path))?,
        None => ProfileConfig::default(),
    };

    if let Some(threads) = matches.get_one::<usize>("threads") {
        config.threads = *threads;
    }
    if let Some(delimiter) = matches.get_one::<String>("delimiter") {
        config.output.delimiter = delimiter
            .parse::<Delimiter>()
            .map_err(anyhow::Error::msg)?;
    }
    if let Some(dir) = matches.get_one::<String>("per-site-dir") {
        config.output.per_site_dir = Some(PathBuf::from(dir));
    }
    if let Some(summary) = matches.get_one::<String>("summary") {
        config.output.summary = Some(PathBuf::from(summary));
    }
    if matches.get_flag("keep-going") {
        config.keep_going = true;
    }
    if matches.get_flag("zero-on-empty") {
        config.empty_aggregate = EmptyAggregatePolicy::Zeros;
    }

    config.validate()?;
    Ok(config)
}

fn load_read_tables(paths: &[&String], keep_going: bool) -> Result<Vec<ReadDensityTable>> {
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        match ReadDensityTable::try_from(path.as_str()) {
            Ok(table) => tables.push(table),
            Err(e) if keep_going => warn!("Skipping {}: {}", path, e),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to load read-density file {}", path));
            }
        }
    }
    Ok(tables)
}

///
/// Output columns and per-site files are named after the file label, so two
/// inputs with the same file name would collide.
///
fn check_unique_labels(tables: &[ReadDensityTable]) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for table in tables {
        if !seen.insert(table.label.as_str()) {
            let paths: Vec<String> = tables
                .iter()
                .filter(|t| t.label == table.label)
                .map(|t| {
                    t.path
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| t.label.clone())
                })
                .collect();
            bail!(
                "Read-density files share the name {}: {}",
                table.label,
                paths.join(", ")
            );
        }
    }
    Ok(())
}

pub fn run_profile(matches: &ArgMatches) -> Result<()> {
    let sites_path = matches
        .get_one::<String>("sites")
        .expect("--sites is required");

    let read_paths: Vec<&String> = matches
        .get_many::<String>("reads")
        .expect("--reads is required")
        .collect();

    let output_path = matches.get_one::<String>("output");
    let config = resolve_config(matches)?;

    let sites = SiteTable::try_from(sites_path.as_str())
        .with_context(|| format!("Failed to load site file {}", sites_path))?;
    let tables = load_read_tables(&read_paths, config.keep_going)?;
    check_unique_labels(&tables)?;

    let bar = ProgressBar::new(tables.len() as u64);
    let result = run(&sites, &tables, &config, &CancellationToken::new(), |_| {
        bar.inc(1)
    });
    bar.finish_and_clear();
    let result = result?;

    for failure in &result.failures {
        warn!("Left out of the combined output: {}", failure);
    }

    let delimiter = config.output.delimiter;
    match output_path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path))?;
            write_combined(&result.combined, BufWriter::new(file), delimiter)?;
            eprintln!("Output written to {}", path);
        }
        None => {
            write_combined(&result.combined, io::stdout().lock(), delimiter)?;
        }
    }

    if let Some(dir) = &config.output.per_site_dir {
        for profile in &result.profiles {
            let path = write_aligned_to_dir(&profile.aligned, dir, &profile.summary.file, delimiter)?;
            info!("Per-site table written to {}", path.display());
        }
    }

    if let Some(path) = &config.output.summary {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        write_summary(&result.summaries(), BufWriter::new(file))?;
        info!("Summary written to {}", path.display());
    }

    Ok(())
}
