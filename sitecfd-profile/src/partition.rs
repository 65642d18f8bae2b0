//! Per-chromosome lookup over a read-density table.

use fxhash::{FxHashMap, FxHashSet};

use sitecfd_core::models::{ReadBin, ReadDensityTable};

use crate::errors::{ProfileError, ProfileResult};

///
/// Read-only mapping from chromosome name to that chromosome's bins, in
/// table order. Built once per read-density file, before the per-site loop,
/// and borrowed from the table it was built from.
///
#[derive(Debug)]
pub struct ChromosomePartition<'a> {
    chromosomes: FxHashMap<&'a str, Vec<&'a ReadBin>>,
    /// Chromosome name and number of rows repeating an earlier position.
    duplicates: Vec<(&'a str, usize)>,
}

impl<'a> ChromosomePartition<'a> {
    pub fn get(&self, chr: &str) -> Option<&[&'a ReadBin]> {
        self.chromosomes.get(chr).map(|bins| bins.as_slice())
    }

    pub fn n_chromosomes(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn n_bins(&self) -> usize {
        self.chromosomes.values().map(|bins| bins.len()).sum()
    }

    ///
    /// Chromosomes holding more than one bin at the same position, with the
    /// number of repeated rows. Window lookup takes the first match on these.
    ///
    pub fn duplicated_positions(&self) -> &[(&'a str, usize)] {
        &self.duplicates
    }
}

///
/// Split a read-density table into per-chromosome row sequences.
///
/// Fails with [ProfileError::EmptyReadTable] when the table has no rows,
/// since every site lookup would fail anyway.
///
pub fn partition(table: &ReadDensityTable) -> ProfileResult<ChromosomePartition<'_>> {
    if table.is_empty() {
        return Err(ProfileError::EmptyReadTable(table.label.clone()));
    }

    let mut order: Vec<&str> = Vec::new();
    let mut chromosomes: FxHashMap<&str, Vec<&ReadBin>> = FxHashMap::default();
    for bin in &table.bins {
        chromosomes
            .entry(bin.chr.as_str())
            .or_insert_with(|| {
                order.push(bin.chr.as_str());
                Vec::new()
            })
            .push(bin);
    }

    let mut duplicates = Vec::new();
    for chr in order {
        let mut seen: FxHashSet<i64> = FxHashSet::default();
        let repeated = chromosomes[chr]
            .iter()
            .filter(|bin| !seen.insert(bin.position))
            .count();
        if repeated > 0 {
            duplicates.push((chr, repeated));
        }
    }

    Ok(ChromosomePartition {
        chromosomes,
        duplicates,
    })
}
