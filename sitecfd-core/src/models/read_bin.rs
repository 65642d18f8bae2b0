use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// ReadBin struct, one binned genomic interval of a read-density table
///
#[derive(PartialEq, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadBin {
    pub chr: String,
    pub position: i64,
    pub reads: f64,
}

impl ReadBin {
    pub fn new(chr: &str, position: i64, reads: f64) -> Self {
        ReadBin {
            chr: chr.to_string(),
            position,
            reads,
        }
    }

    ///
    /// Get file string of the bin
    ///
    pub fn as_string(&self) -> String {
        format!("{}\t{}\t{}", self.chr, self.position, self.reads)
    }
}

impl Display for ReadBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}
