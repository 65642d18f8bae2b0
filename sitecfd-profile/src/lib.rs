//! Cumulative frequency distribution of read density around reference sites.
//!
//! For every read-density file this crate:
//!
//! - partitions the bins by chromosome
//! - cuts a fixed window of bins around each reference site
//! - aligns forward and reverse sites on one distance axis
//! - normalizes the summed profile so a flat profile is 1.0 everywhere
//!
//! and then combines the per-file curves into one table.
//!
//! # Example
//!
//! ```no_run
//! use sitecfd_core::models::{ReadDensityTable, SiteTable};
//! use sitecfd_profile::{CancellationToken, ProfileConfig, run};
//!
//! let sites = SiteTable::try_from("sites.txt").unwrap();
//! let tables = vec![ReadDensityTable::try_from("sample.sgr").unwrap()];
//!
//! let result = run(
//!     &sites,
//!     &tables,
//!     &ProfileConfig::default(),
//!     &CancellationToken::new(),
//!     |_| {},
//! )
//! .unwrap();
//!
//! println!("{:?}", result.combined.labels());
//! ```

pub mod aggregate;
pub mod combine;
pub mod config;
pub mod consts;
pub mod errors;
pub mod normalize;
pub mod output;
pub mod partition;
pub mod pipeline;
pub mod rounding;
pub mod window;

// re-exports
pub use combine::{CombinedOutput, combine};
pub use config::{Delimiter, EmptyAggregatePolicy, ProfileConfig};
pub use errors::{ProfileError, ProfileResult};
pub use normalize::NormalizedDistribution;
pub use pipeline::{CancellationToken, FileProfile, FileSummary, ProfileRun, profile_file, run};
