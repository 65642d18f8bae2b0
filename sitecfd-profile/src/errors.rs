use thiserror::Error;

use sitecfd_core::errors::InputError;
use sitecfd_core::models::ReferenceSite;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("Read-density table {0} contains no bins")]
    EmptyReadTable(String),

    #[error("No read-density tables were given")]
    NoReadTables,

    #[error("Site {site}: chromosome {} is not present in the read-density table", .site.chr)]
    UnknownChromosome { site: ReferenceSite },

    #[error("Site {site}: position cannot be rounded to a {bin_size}bp bin")]
    PositionOutOfRange { site: ReferenceSite, bin_size: i64 },

    #[error("Site {site}: no bin at rounded position {rounded}")]
    SiteNotFound { site: ReferenceSite, rounded: i64 },

    #[error(
        "Site {site}: a window of {half_width} bins either side of row {index} crosses the chromosome boundary ({n_bins} bins)"
    )]
    WindowOutOfBounds {
        site: ReferenceSite,
        index: usize,
        half_width: usize,
        n_bins: usize,
    },

    #[error(
        "{file}: {skipped} sites with an unrecognized strand, limit is {threshold} (last: {site}, strand {:?})", .site.strand_symbol
    )]
    UnrecognizedStrand {
        file: String,
        skipped: usize,
        threshold: usize,
        site: ReferenceSite,
    },

    #[error("{0}: total aggregated reads is zero, normalization is undefined")]
    EmptyAggregate(String),

    #[error("{file}: total aggregated reads is {total}, normalization is undefined")]
    NonFiniteAggregate { file: String, total: f64 },

    #[error("Window for site {name} has {found} values, expected {expected}")]
    WindowShape {
        name: String,
        found: usize,
        expected: usize,
    },

    #[error("Series {0} is not on the shared distance axis")]
    AxisMismatch(String),

    #[error("Processing cancelled")]
    Cancelled,

    #[error("While processing {file}: {source}")]
    InFile {
        file: String,
        source: Box<ProfileError>,
    },

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    ///
    /// Attach the read-density file a failure happened in. Cancellation and
    /// errors already tied to a file are returned unchanged.
    ///
    pub fn in_file(self, file: &str) -> Self {
        match self {
            ProfileError::Cancelled | ProfileError::InFile { .. } => self,
            other => ProfileError::InFile {
                file: file.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, looking through any file context.
    pub fn root(&self) -> &ProfileError {
        match self {
            ProfileError::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;
