#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Collapsing spot placement and hollowness propagation.

use cave_core::{CaveView, CellKind, Command, GenerationError, IntensityMap};
use rand::{seq::SliceRandom, Rng};

/// Pure system that selects collapsing spots and derives the intensity they radiate.
#[derive(Debug, Default)]
pub struct Collapse;

impl Collapse {
    /// Creates a new collapse system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Emits a [`Command::MarkCollapse`] for `count` distinct empty cells drawn uniformly
    /// without replacement.
    ///
    /// The empty cells are shuffled and the first `count` are taken. Fails without emitting
    /// anything when fewer than `count` empty cells remain.
    pub fn handle<R>(
        &self,
        count: u32,
        view: CaveView<'_>,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) -> Result<(), GenerationError>
    where
        R: Rng + ?Sized,
    {
        let requested = usize::try_from(count).unwrap_or(usize::MAX);
        let mut empties = view.empty_cells();
        if empties.len() < requested {
            return Err(GenerationError::InsufficientSpace {
                available: empties.len(),
                requested,
            });
        }

        empties.shuffle(rng);
        out.extend(
            empties
                .into_iter()
                .take(requested)
                .map(|cell| Command::MarkCollapse { cell }),
        );
        Ok(())
    }

    /// Computes the hollowness of every cell from the collapsing spots in `view`.
    ///
    /// Each collapsing spot adds one to every Moore neighbour that is neither a wall nor
    /// another collapsing spot. Values saturate at [`cave_core::MAX_INTENSITY`].
    #[must_use]
    pub fn propagate(&self, view: CaveView<'_>) -> IntensityMap {
        let dimensions = view.dimensions();
        let mut map = IntensityMap::zeroed(dimensions);

        for spot in view.cells_of(CellKind::Collapse) {
            for neighbour in spot.moore_neighbours(dimensions) {
                if view.kind(neighbour).is_some_and(CellKind::receives_intensity) {
                    map.increment(neighbour);
                }
            }
        }

        map
    }
}
