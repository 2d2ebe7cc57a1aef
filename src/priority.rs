//! Depth-band priority table.
//!
//! Draw ordering uses sixteen priority bands. Bands 0-3 are control bands
//! assigned directly by scene logic, never derived from a Y coordinate:
//! unconditional obstruction, conditional obstruction, trigger zone and
//! restricted surface. Band 15 is always-nearest foreground, also never
//! derived. Bands 4-14 are depth: rows above the horizon map to band 4
//! (furthest), rows at or below it are split into ten equal strata mapped to
//! bands 5-14.
//!
//! Entries sharing a band draw in submission order within the frame's draw
//! list (a stable sort); the actor is submitted after scene props, so it
//! overdraws equal-band props. That is the tie-break policy for this engine.

use log::debug;

/// Impassable regardless of state.
pub const UNCONDITIONAL_BLOCK: u8 = 0;
/// Impassable unless the scene lifts the block.
pub const CONDITIONAL_BLOCK: u8 = 1;
/// Fires a trigger when stepped on.
pub const TRIGGER: u8 = 2;
/// Only specially-flagged objects may enter.
pub const RESTRICTED_SURFACE: u8 = 3;
/// First depth band (furthest back).
pub const MIN_DEPTH: u8 = 4;
/// Last depth band (nearest).
pub const MAX_DEPTH: u8 = 14;
/// Always drawn on top, never derived from Y.
pub const FOREGROUND: u8 = 15;

/// Precomputed Y-to-band lookup. Built once per display height, queried in
/// O(1) with clamping.
#[derive(Debug, Clone)]
pub struct PriorityTable {
    table: Vec<u8>,
    horizon: u32,
}

impl PriorityTable {
    /// Build the table for a display `height` rows tall with the given
    /// `horizon` row. `horizon` must be less than `height`; the config layer
    /// validates this before construction.
    pub fn new(height: u32, horizon: u32) -> PriorityTable {
        debug_assert!(horizon < height);
        let span = height - horizon;
        let mut table = Vec::with_capacity(height as usize);
        for y in 0..height {
            let band = if y < horizon {
                MIN_DEPTH
            } else {
                let stratum = ((y - horizon) * 10 / span) as u8;
                (MIN_DEPTH + 1 + stratum).min(MAX_DEPTH)
            };
            table.push(band);
        }
        debug!(
            "priority table built: height={} horizon={} bands {}..{}",
            height,
            horizon,
            table.first().copied().unwrap_or(MIN_DEPTH),
            table.last().copied().unwrap_or(MAX_DEPTH)
        );
        PriorityTable { table, horizon }
    }

    /// Depth band for a vertical coordinate, clamped to the display height.
    pub fn band_for_y(&self, y: i32) -> u8 {
        let max = self.table.len() as i32 - 1;
        self.table[y.clamp(0, max) as usize]
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_above_horizon_are_furthest() {
        let t = PriorityTable::new(400, 96);
        for y in 0..96 {
            assert_eq!(t.band_for_y(y), MIN_DEPTH);
        }
    }

    #[test]
    fn bands_are_monotonic_below_horizon() {
        let t = PriorityTable::new(400, 96);
        let mut prev = t.band_for_y(96);
        assert_eq!(prev, MIN_DEPTH + 1);
        for y in 97..400 {
            let band = t.band_for_y(y);
            assert!(band >= prev, "band regressed at y={}", y);
            prev = band;
        }
        assert_eq!(t.band_for_y(399), MAX_DEPTH);
    }

    #[test]
    fn derived_bands_never_reach_control_or_foreground() {
        let t = PriorityTable::new(200, 48);
        for y in 0..200 {
            let band = t.band_for_y(y);
            assert!((MIN_DEPTH..=MAX_DEPTH).contains(&band));
        }
    }

    #[test]
    fn lookup_clamps_out_of_range_rows() {
        let t = PriorityTable::new(400, 96);
        assert_eq!(t.band_for_y(-50), t.band_for_y(0));
        assert_eq!(t.band_for_y(5000), t.band_for_y(399));
    }
}
