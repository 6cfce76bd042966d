#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Wall placement system that scatters straight wall segments through randomized retries.

use cave_core::{
    CaveView, CellCoord, Dimensions, GenerationError, Orientation, WallSegment,
    MAX_SEGMENT_LENGTH, WALL_PLACEMENT_ATTEMPTS,
};
use rand::Rng;

/// Configuration parameters required to construct the wall placement system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    attempts: u32,
    max_length: u32,
}

impl Config {
    /// Creates a configuration granting `attempts` tries per segment, with segment lengths
    /// drawn from `1..=max_length`.
    #[must_use]
    pub const fn new(attempts: u32, max_length: u32) -> Self {
        Self {
            attempts,
            max_length,
        }
    }

    /// Tries granted to each segment before placement is abandoned.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Longest segment that may be drawn.
    #[must_use]
    pub const fn max_length(&self) -> u32 {
        self.max_length
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(WALL_PLACEMENT_ATTEMPTS, MAX_SEGMENT_LENGTH)
    }
}

/// Pure system that finds free spans for wall segments.
#[derive(Debug, Default)]
pub struct Walls {
    config: Config,
}

impl Walls {
    /// Creates a new wall placement system using the supplied configuration.
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// Configuration the system was built with.
    #[must_use]
    pub const fn config(&self) -> Config {
        self.config
    }

    /// Draws a single candidate segment without checking occupancy.
    ///
    /// Orientation and length are drawn first, then the anchor. Returns `None` when the
    /// drawn length is longer than the grid along the drawn orientation.
    pub fn attempt<R>(&self, dimensions: Dimensions, rng: &mut R) -> Option<WallSegment>
    where
        R: Rng + ?Sized,
    {
        let horizontal = rng.gen_bool(0.5);
        let length = rng.gen_range(1..=self.config.max_length.max(1));

        if horizontal {
            let row = rng.gen_range(0..dimensions.height());
            let last_column = dimensions.width().checked_sub(length)?;
            let column = rng.gen_range(0..=last_column);
            Some(WallSegment::new(
                CellCoord::new(column, row),
                Orientation::Horizontal,
                length,
            ))
        } else {
            let column = rng.gen_range(0..dimensions.width());
            let last_row = dimensions.height().checked_sub(length)?;
            let row = rng.gen_range(0..=last_row);
            Some(WallSegment::new(
                CellCoord::new(column, row),
                Orientation::Vertical,
                length,
            ))
        }
    }

    /// Searches for a free span for the segment at zero-based `index`.
    ///
    /// Candidates are drawn until one covers only empty cells or the attempt budget runs
    /// out, in which case the failure names the one-based segment number.
    pub fn place_segment<R>(
        &self,
        index: u32,
        view: CaveView<'_>,
        rng: &mut R,
    ) -> Result<WallSegment, GenerationError>
    where
        R: Rng + ?Sized,
    {
        let dimensions = view.dimensions();
        let segment_number = index.saturating_add(1);
        if dimensions.width() == 0 || dimensions.height() == 0 {
            return Err(GenerationError::WallPlacementExhausted {
                segment: segment_number,
                attempts: 0,
            });
        }

        for attempt in 0..self.config.attempts {
            match self.attempt(dimensions, rng) {
                Some(segment) if view.is_span_empty(&segment) => return Ok(segment),
                Some(segment) => {
                    log::trace!("wall #{segment_number} attempt {attempt}: {segment:?} overlaps");
                }
                None => {
                    log::trace!("wall #{segment_number} attempt {attempt}: length does not fit");
                }
            }
        }

        Err(GenerationError::WallPlacementExhausted {
            segment: segment_number,
            attempts: self.config.attempts,
        })
    }
}
