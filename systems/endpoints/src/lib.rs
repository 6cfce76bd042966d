#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Endpoint placement system that positions the start and finish markers.

use cave_core::{CellCoord, Command, Dimensions, Endpoint};
use rand::Rng;

/// Pure system that emits the start and finish placement commands.
#[derive(Debug, Default)]
pub struct Endpoints;

impl Endpoints {
    /// Creates a new endpoint placement system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Draws a row for the start marker on column zero, then an independent row for the
    /// finish marker on the last column.
    ///
    /// The rows may coincide. Only a single-column grid, where both markers would share a
    /// cell, forces the finish row away from the start row.
    pub fn handle<R>(&self, dimensions: Dimensions, rng: &mut R, out: &mut Vec<Command>)
    where
        R: Rng + ?Sized,
    {
        let height = dimensions.height();
        let width = dimensions.width();
        if height == 0 || width == 0 {
            return;
        }

        let start_row = rng.gen_range(0..height);
        let mut finish_row = rng.gen_range(0..height);
        if width == 1 && height > 1 {
            while finish_row == start_row {
                finish_row = rng.gen_range(0..height);
            }
        }

        out.push(Command::PlaceEndpoint {
            endpoint: Endpoint::Start,
            cell: CellCoord::new(0, start_row),
        });
        out.push(Command::PlaceEndpoint {
            endpoint: Endpoint::Finish,
            cell: CellCoord::new(width - 1, finish_row),
        });
    }
}
