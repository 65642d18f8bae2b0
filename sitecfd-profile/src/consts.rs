/// Width of one read-density bin, in bases.
pub const BIN_SIZE: i64 = 10;
/// Bins taken on each side of a site's matched bin.
pub const HALF_WIDTH: usize = 120;
/// Bins per window: `2 * HALF_WIDTH + 1`.
pub const WINDOW_BINS: usize = 2 * HALF_WIDTH + 1;
/// Largest distance from a site covered by a window, in bases.
pub const MAX_DISTANCE: i64 = HALF_WIDTH as i64 * BIN_SIZE;
/// Sites with an unrecognized strand tolerated per read-density file.
pub const STRAND_SKIP_THRESHOLD: usize = 10;
/// Name of the shared axis column in every output table.
pub const DISTANCE_COLUMN: &str = "distance";
