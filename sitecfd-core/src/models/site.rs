use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Orientation of a reference site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn symbol(&self) -> &'static str {
        match self {
            Strand::Forward => "F",
            Strand::Reverse => "R",
        }
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(Strand::Forward),
            "R" => Ok(Strand::Reverse),
            other => Err(format!("unrecognized strand symbol: {:?}", other)),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

///
/// ReferenceSite struct, one row of a site file: the anchor a window is
/// centered on.
///
/// The strand symbol is kept verbatim so that rows with an unrecognized
/// symbol survive parsing and can be counted (and reported) later.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferenceSite {
    pub chr: String,
    pub name: String,
    /// Raw genomic coordinate, before rounding to the bin grid.
    pub position: i64,
    pub strand_symbol: String,
}

impl ReferenceSite {
    pub fn new(chr: &str, name: &str, position: i64, strand_symbol: &str) -> Self {
        ReferenceSite {
            chr: chr.to_string(),
            name: name.to_string(),
            position,
            strand_symbol: strand_symbol.to_string(),
        }
    }

    /// `None` when the symbol is neither `F` nor `R`.
    pub fn strand(&self) -> Option<Strand> {
        self.strand_symbol.parse().ok()
    }
}

impl Display for ReferenceSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}:{})", self.name, self.chr, self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("F", Some(Strand::Forward))]
    #[case("R", Some(Strand::Reverse))]
    #[case("+", None)]
    #[case("f", None)]
    #[case("X", None)]
    fn test_strand_recognition(#[case] symbol: &str, #[case] expected: Option<Strand>) {
        let site = ReferenceSite::new("chr1", "geneA", 1500, symbol);
        assert_eq!(site.strand(), expected);
    }

    #[rstest]
    fn test_display_identifies_site() {
        let site = ReferenceSite::new("chr2", "geneB", 1234, "R");
        assert_eq!(format!("{}", site), "geneB (chr2:1234)");
    }
}
