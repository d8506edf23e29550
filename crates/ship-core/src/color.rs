//! Lifetime-to-colour lookup for exhaust particles.

use crate::constants::EXHAUST_COLOR_MAP;
use crate::error::{Result, ShipError};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

pub type Rgb = [f32; 3];

/// A colour pinned to a lifetime limit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorMapEntry {
    pub limit: f32,
    pub color: Rgb,
}

/// Lifetime bounds `[end, start)` between two consecutive map entries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LifetimeRange {
    pub start: f32,
    pub end: f32,
}

/// Piecewise-linear colour map over the lifetime ratio.
///
/// Entries are kept sorted highest limit first. The range table is derived
/// once per map, in [`ColorRamp::new`] and [`ColorRamp::set_entries`], never
/// per lookup.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorRamp {
    entries: SmallVec<[ColorMapEntry; 4]>,
    ranges: SmallVec<[LifetimeRange; 4]>,
}

impl ColorRamp {
    pub fn new(entries: impl IntoIterator<Item = ColorMapEntry>) -> Result<Self> {
        let entries: SmallVec<[ColorMapEntry; 4]> = entries.into_iter().collect();
        validate(&entries)?;
        let ranges = precompute_ranges(&entries);
        Ok(Self { entries, ranges })
    }

    /// Blue → red → yellow ramp used by the exhaust jets.
    pub fn exhaust() -> Self {
        let entries: SmallVec<[ColorMapEntry; 4]> = EXHAUST_COLOR_MAP
            .iter()
            .map(|&(limit, color)| ColorMapEntry { limit, color })
            .collect();
        let ranges = precompute_ranges(&entries);
        Self { entries, ranges }
    }

    /// Replaces the map and rebuilds the range table.
    ///
    /// On error the current map is kept.
    pub fn set_entries(&mut self, entries: impl IntoIterator<Item = ColorMapEntry>) -> Result<()> {
        *self = Self::new(entries)?;
        Ok(())
    }

    pub fn entries(&self) -> &[ColorMapEntry] {
        &self.entries
    }

    pub fn ranges(&self) -> &[LifetimeRange] {
        &self.ranges
    }

    /// Colour for a lifetime ratio.
    ///
    /// Inside a range the two bounding colours are blended linearly; anything
    /// outside every range (below the lowest limit, at or above the highest)
    /// gets the last entry's colour.
    pub fn color_for(&self, ratio: f32) -> Rgb {
        for (i, range) in self.ranges.iter().enumerate() {
            if ratio >= range.end && ratio < range.start {
                let t = (ratio - range.end) / (range.start - range.end);
                return lerp_rgb(self.entries[i + 1].color, self.entries[i].color, t);
            }
        }
        self.last_color()
    }

    /// Colour of the highest-limit entry.
    #[inline]
    pub fn first_color(&self) -> Rgb {
        self.entries.first().map(|e| e.color).unwrap_or([0.0; 3])
    }

    #[inline]
    fn last_color(&self) -> Rgb {
        // validate() guarantees at least one entry
        self.entries.last().map(|e| e.color).unwrap_or([0.0; 3])
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::exhaust()
    }
}

/// Builds the `[end, start)` table for a descending map.
pub fn precompute_ranges(entries: &[ColorMapEntry]) -> SmallVec<[LifetimeRange; 4]> {
    entries
        .windows(2)
        .map(|pair| LifetimeRange {
            start: pair[0].limit,
            end: pair[1].limit,
        })
        .collect()
}

#[inline]
pub fn lerp_rgb(from: Rgb, to: Rgb, t: f32) -> Rgb {
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
    ]
}

fn validate(entries: &[ColorMapEntry]) -> Result<()> {
    if entries.is_empty() {
        return Err(ShipError::EmptyColorMap);
    }
    for (index, entry) in entries.iter().enumerate() {
        if !entry.limit.is_finite() {
            return Err(ShipError::InvalidParameter {
                field: "color_map.limit",
                value: entry.limit as f64,
                expected: "a finite lifetime limit",
            });
        }
        if index > 0 && entry.limit >= entries[index - 1].limit {
            return Err(ShipError::UnsortedColorMap {
                index,
                limit: entry.limit,
                previous: entries[index - 1].limit,
            });
        }
    }
    Ok(())
}
