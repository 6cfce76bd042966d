#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative cave grid state.

use cave_core::{CellCoord, CellKind, Command, Dimensions, Event, WallSegment};

/// Represents the authoritative cave grid and its hollowness intensities.
#[derive(Debug)]
pub struct World {
    dimensions: Dimensions,
    cells: Vec<CellKind>,
    intensity: Vec<u8>,
}

impl World {
    /// Creates a world whose cells are all empty and whose intensities are all zero.
    #[must_use]
    pub fn new(dimensions: Dimensions) -> Self {
        let count = dimensions.cell_count();
        Self {
            dimensions,
            cells: vec![CellKind::Empty; count],
            intensity: vec![0; count],
        }
    }

    fn reset(&mut self) {
        self.cells.fill(CellKind::Empty);
        self.intensity.fill(0);
    }

    fn cell_mut(&mut self, cell: CellCoord) -> Option<&mut CellKind> {
        let index = self.dimensions.index(cell)?;
        self.cells.get_mut(index)
    }

    fn span_is_empty(&self, segment: &WallSegment) -> bool {
        query::cave_view(self).is_span_empty(segment)
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ResetGrid => {
            world.reset();
            out_events.push(Event::GridReset);
        }
        Command::PlaceEndpoint { endpoint, cell } => {
            if let Some(slot) = world.cell_mut(cell) {
                *slot = endpoint.kind();
                out_events.push(Event::EndpointPlaced { endpoint, cell });
            }
        }
        Command::PlaceWall { segment } => {
            if !world.span_is_empty(&segment) {
                out_events.push(Event::WallRejected { segment });
                return;
            }

            for cell in segment.cells() {
                if let Some(slot) = world.cell_mut(cell) {
                    *slot = CellKind::Wall;
                }
            }
            out_events.push(Event::WallPlaced { segment });
        }
        Command::MarkCollapse { cell } => match world.cell_mut(cell) {
            Some(slot) if slot.is_empty() => {
                *slot = CellKind::Collapse;
                out_events.push(Event::CollapseMarked { cell });
            }
            _ => out_events.push(Event::CollapseRejected { cell }),
        },
        Command::ApplyIntensity { map } => {
            world.intensity.fill(0);
            if map.dimensions() == world.dimensions {
                world.intensity.copy_from_slice(map.values());
            }
            out_events.push(Event::IntensityApplied { peak: map.peak() });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use cave_core::{CaveView, CellCoord, CellKind, Dimensions};

    /// Dimensions of the cave grid.
    #[must_use]
    pub fn dimensions(world: &World) -> Dimensions {
        world.dimensions
    }

    /// Contents of the provided cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn cell_kind(world: &World, cell: CellCoord) -> Option<CellKind> {
        cave_view(world).kind(cell)
    }

    /// Hollowness intensity of the provided cell.
    #[must_use]
    pub fn intensity(world: &World, cell: CellCoord) -> u8 {
        cave_view(world).intensity(cell)
    }

    /// Exposes a read-only view of the cell and intensity grids.
    #[must_use]
    pub fn cave_view(world: &World) -> CaveView<'_> {
        CaveView::new(&world.cells, &world.intensity, world.dimensions)
    }

    /// Enumerates the cells that are still empty, in row-major order.
    #[must_use]
    pub fn empty_cells(world: &World) -> Vec<CellCoord> {
        cave_view(world).empty_cells()
    }

    /// Counts the cells holding the provided kind.
    #[must_use]
    pub fn count_kind(world: &World, kind: CellKind) -> usize {
        cave_view(world).count(kind)
    }
}
