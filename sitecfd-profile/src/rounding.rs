///
/// Round a genomic coordinate to the nearest multiple of `bin_size`, ties
/// rounding up: `floor((position + bin_size / 2) / bin_size) * bin_size`,
/// computed without forming the intermediate sum.
///
/// Pure integer arithmetic, so the result is exact. Floor division keeps ties
/// rounding up for negative coordinates as well. Returns `None` when the
/// rounded coordinate does not fit in an `i64`.
///
pub fn round_to_bin(position: i64, bin_size: i64) -> Option<i64> {
    let offset = position.rem_euclid(bin_size);
    let down = position.checked_sub(offset)?;
    if offset >= bin_size - bin_size / 2 {
        down.checked_add(bin_size)
    } else {
        Some(down)
    }
}
