//! Fixed-width window extraction around a reference site.

use log::debug;

use sitecfd_core::models::ReferenceSite;

use crate::errors::{ProfileError, ProfileResult};
use crate::partition::ChromosomePartition;
use crate::rounding::round_to_bin;

/// Read values of the `2 * half_width + 1` bins around one site, in
/// chromosome row order, labeled with the site name.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSeries {
    pub name: String,
    pub values: Vec<f64>,
}

///
/// Extract the window of bins centered on `site`.
///
/// The site position is rounded onto the bin grid and matched exactly against
/// the bin positions of its chromosome; the first matching row wins when a
/// position occurs twice. The window is never truncated: a site closer than
/// `half_width` rows to either end of its chromosome is an error.
///
/// # Arguments
/// - partition: per-chromosome bins of one read-density file
/// - site: the anchor
/// - bin_size: grid spacing of the read-density file
/// - half_width: rows taken on each side of the matched row
pub fn extract(
    partition: &ChromosomePartition,
    site: &ReferenceSite,
    bin_size: i64,
    half_width: usize,
) -> ProfileResult<WindowSeries> {
    let rounded = round_to_bin(site.position, bin_size).ok_or_else(|| {
        ProfileError::PositionOutOfRange {
            site: site.clone(),
            bin_size,
        }
    })?;

    let bins = partition
        .get(&site.chr)
        .ok_or_else(|| ProfileError::UnknownChromosome { site: site.clone() })?;

    let index = bins
        .iter()
        .position(|bin| bin.position == rounded)
        .ok_or_else(|| ProfileError::SiteNotFound {
            site: site.clone(),
            rounded,
        })?;

    if index < half_width || index + half_width >= bins.len() {
        return Err(ProfileError::WindowOutOfBounds {
            site: site.clone(),
            index,
            half_width,
            n_bins: bins.len(),
        });
    }

    debug!("{} matched row {} at position {}", site, index, rounded);

    let values = bins[index - half_width..=index + half_width]
        .iter()
        .map(|bin| bin.reads)
        .collect();

    Ok(WindowSeries {
        name: site.name.clone(),
        values,
    })
}
