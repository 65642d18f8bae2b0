pub mod read_bin;
pub mod read_table;
pub mod site;
pub mod site_table;

// re-export for cleaner imports
pub use self::read_bin::ReadBin;
pub use self::read_table::ReadDensityTable;
pub use self::site::{ReferenceSite, Strand};
pub use self::site_table::{SiteTable, StrandCounts};
