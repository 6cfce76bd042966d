#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the cave generator.
//!
//! This crate defines the message surface that connects the generation
//! systems, the authoritative grid owned by the world, and the adapters that
//! present the result. Systems inspect a read-only [`CaveView`] and respond
//! with [`Command`] values, the world executes those commands via its `apply`
//! entry point, and then reports what happened through [`Event`] values.

use thiserror::Error;

/// Smallest accepted width or height of a cave.
pub const MIN_DIMENSION: u32 = 3;

/// Longest straight wall segment the wall placer may produce.
pub const MAX_SEGMENT_LENGTH: u32 = 5;

/// Number of randomized attempts granted to each wall segment before generation fails.
pub const WALL_PLACEMENT_ATTEMPTS: u32 = 500;

/// Highest hollowness intensity a cell can carry.
pub const MAX_INTENSITY: u8 = 9;

/// Contents of a single cave cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Open floor that may carry a hollowness intensity.
    #[default]
    Empty,
    /// Cell occupied by part of a wall segment.
    Wall,
    /// Collapsing spot radiating hollowness into its neighbourhood.
    Collapse,
    /// Entry marker placed on the leftmost column.
    Start,
    /// Exit marker placed on the rightmost column.
    Finish,
}

impl CellKind {
    /// Reports whether the cell is still open floor.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Reports whether neighbouring collapsing spots raise this cell's intensity.
    #[must_use]
    pub const fn receives_intensity(self) -> bool {
        !matches!(self, Self::Wall | Self::Collapse)
    }
}

/// The two markers that bound a cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Entry marker on column zero.
    Start,
    /// Exit marker on the last column.
    Finish,
}

impl Endpoint {
    /// Cell kind written into the grid for this marker.
    #[must_use]
    pub const fn kind(self) -> CellKind {
        match self {
            Self::Start => CellKind::Start,
            Self::Finish => CellKind::Finish,
        }
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Cells horizontally, vertically or diagonally adjacent to this one that lie inside
    /// `dimensions`. The cell itself is never yielded.
    pub fn moore_neighbours(self, dimensions: Dimensions) -> impl Iterator<Item = CellCoord> {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];

        OFFSETS.into_iter().filter_map(move |(dc, dr)| {
            let column = u32::try_from(i64::from(self.column) + dc).ok()?;
            let row = u32::try_from(i64::from(self.row) + dr).ok()?;
            let neighbour = CellCoord::new(column, row);
            dimensions.contains(neighbour).then_some(neighbour)
        })
    }
}

/// Width and height of a cave measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Dimensions {
    width: u32,
    height: u32,
}

impl Dimensions {
    /// Creates a new dimensions descriptor without validating minimum sizes.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column < self.width && cell.row < self.height
    }

    /// Row-major index of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row).ok()?;
        let column = usize::try_from(cell.column).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let width = self.width;
        (0..self.height)
            .flat_map(move |row| (0..width).map(move |column| CellCoord::new(column, row)))
    }
}

/// Direction along which a wall segment extends from its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Segment runs toward increasing column indices.
    Horizontal,
    /// Segment runs toward increasing row indices.
    Vertical,
}

/// Straight, contiguous run of wall cells anchored at its top-left cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallSegment {
    origin: CellCoord,
    orientation: Orientation,
    length: u32,
}

impl WallSegment {
    /// Creates a new segment descriptor.
    #[must_use]
    pub const fn new(origin: CellCoord, orientation: Orientation, length: u32) -> Self {
        Self {
            origin,
            orientation,
            length,
        }
    }

    /// Anchor cell the segment extends from.
    #[must_use]
    pub const fn origin(&self) -> CellCoord {
        self.origin
    }

    /// Direction of the segment.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of cells covered by the segment.
    #[must_use]
    pub const fn length(&self) -> u32 {
        self.length
    }

    /// Cells covered by the segment, starting at the anchor.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let origin = self.origin;
        let orientation = self.orientation;
        (0..self.length).map(move |offset| match orientation {
            Orientation::Horizontal => {
                CellCoord::new(origin.column.saturating_add(offset), origin.row)
            }
            Orientation::Vertical => {
                CellCoord::new(origin.column, origin.row.saturating_add(offset))
            }
        })
    }

    /// Reports whether every cell of the segment lies inside `dimensions`.
    #[must_use]
    pub fn fits_within(&self, dimensions: Dimensions) -> bool {
        let (start, extent) = match self.orientation {
            Orientation::Horizontal => (self.origin.column, dimensions.width),
            Orientation::Vertical => (self.origin.row, dimensions.height),
        };
        dimensions.contains(self.origin)
            && self.length > 0
            && u64::from(start) + u64::from(self.length) <= u64::from(extent)
    }
}

/// Dense per-cell hollowness values, each in `0..=MAX_INTENSITY`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityMap {
    dimensions: Dimensions,
    values: Vec<u8>,
}

impl IntensityMap {
    /// Creates a map with every intensity set to zero.
    #[must_use]
    pub fn zeroed(dimensions: Dimensions) -> Self {
        Self {
            dimensions,
            values: vec![0; dimensions.cell_count()],
        }
    }

    /// Dimensions covered by the map.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Intensity stored for the cell; cells outside the map read as zero.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> u8 {
        self.dimensions
            .index(cell)
            .and_then(|index| self.values.get(index).copied())
            .unwrap_or(0)
    }

    /// Raises the cell's intensity by one, saturating at [`MAX_INTENSITY`].
    pub fn increment(&mut self, cell: CellCoord) {
        if let Some(value) = self
            .dimensions
            .index(cell)
            .and_then(|index| self.values.get_mut(index))
        {
            *value = value.saturating_add(1).min(MAX_INTENSITY);
        }
    }

    /// Row-major slice of every stored intensity.
    #[must_use]
    pub fn values(&self) -> &[u8] {
        &self.values
    }

    /// Highest intensity present in the map.
    #[must_use]
    pub fn peak(&self) -> u8 {
        self.values.iter().copied().max().unwrap_or(0)
    }
}

/// Validated parameters describing the cave to generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CaveConfig {
    dimensions: Dimensions,
    walls: u32,
    collapsing: u32,
}

impl CaveConfig {
    /// Validates the requested parameters.
    ///
    /// Both dimensions must be at least [`MIN_DIMENSION`]. Counts are unsigned, so
    /// negative requests are rejected by whoever parses user input.
    pub fn new(width: u32, height: u32, walls: u32, collapsing: u32) -> Result<Self, ConfigError> {
        if width < MIN_DIMENSION {
            return Err(ConfigError::WidthTooSmall {
                width,
                minimum: MIN_DIMENSION,
            });
        }
        if height < MIN_DIMENSION {
            return Err(ConfigError::HeightTooSmall {
                height,
                minimum: MIN_DIMENSION,
            });
        }

        Ok(Self {
            dimensions: Dimensions::new(width, height),
            walls,
            collapsing,
        })
    }

    /// Size of the cave grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Number of wall segments to place.
    #[must_use]
    pub const fn walls(&self) -> u32 {
        self.walls
    }

    /// Number of collapsing spots to place.
    #[must_use]
    pub const fn collapsing(&self) -> u32 {
        self.collapsing
    }
}

/// Reasons a configuration is refused before generation begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The requested width is below the supported minimum.
    #[error("width must be at least {minimum}, got {width}")]
    WidthTooSmall {
        /// Width that was requested.
        width: u32,
        /// Smallest accepted width.
        minimum: u32,
    },
    /// The requested height is below the supported minimum.
    #[error("height must be at least {minimum}, got {height}")]
    HeightTooSmall {
        /// Height that was requested.
        height: u32,
        /// Smallest accepted height.
        minimum: u32,
    },
}

/// Fatal failures that abort generation. No partial cave is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// A wall segment found no free span within the retry bound.
    #[error(
        "failed to place wall #{segment} after {attempts} attempts; \
         the grid may be too dense for the requested walls"
    )]
    WallPlacementExhausted {
        /// One-based index of the segment that could not be placed.
        segment: u32,
        /// Number of attempts spent on the segment.
        attempts: u32,
    },
    /// Fewer empty cells remain than collapsing spots were requested.
    #[error("not enough empty cells ({available}) to place {requested} collapsing spots")]
    InsufficientSpace {
        /// Empty cells left after endpoints and walls were placed.
        available: usize,
        /// Collapsing spots requested by the configuration.
        requested: usize,
    },
}

/// Commands that express all permissible grid mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Clears every cell back to empty and zeroes all intensities.
    ResetGrid,
    /// Writes an endpoint marker into the provided cell.
    PlaceEndpoint {
        /// Marker to place.
        endpoint: Endpoint,
        /// Cell receiving the marker.
        cell: CellCoord,
    },
    /// Writes a wall segment into the grid if its whole span is empty.
    PlaceWall {
        /// Segment to write.
        segment: WallSegment,
    },
    /// Turns an empty cell into a collapsing spot.
    MarkCollapse {
        /// Cell to mark.
        cell: CellCoord,
    },
    /// Replaces the intensity map with freshly propagated values.
    ApplyIntensity {
        /// Intensities computed from the final collapsing spots.
        map: IntensityMap,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Every cell was cleared.
    GridReset,
    /// An endpoint marker was written.
    EndpointPlaced {
        /// Marker that was placed.
        endpoint: Endpoint,
        /// Cell now holding the marker.
        cell: CellCoord,
    },
    /// A wall segment was written in full.
    WallPlaced {
        /// Segment that now occupies the grid.
        segment: WallSegment,
    },
    /// A wall segment was refused because it overlapped an occupied cell or left the grid.
    WallRejected {
        /// Segment that was refused.
        segment: WallSegment,
    },
    /// A collapsing spot was written.
    CollapseMarked {
        /// Cell now holding the collapsing spot.
        cell: CellCoord,
    },
    /// A collapsing spot was refused because its cell was not empty.
    CollapseRejected {
        /// Cell that was refused.
        cell: CellCoord,
    },
    /// The intensity map was replaced.
    IntensityApplied {
        /// Highest intensity in the new map.
        peak: u8,
    },
}

/// Read-only view into the cave grid and its intensity map.
#[derive(Clone, Copy, Debug)]
pub struct CaveView<'a> {
    cells: &'a [CellKind],
    intensity: &'a [u8],
    dimensions: Dimensions,
}

impl<'a> CaveView<'a> {
    /// Captures a new view backed by the provided row-major slices.
    #[must_use]
    pub const fn new(cells: &'a [CellKind], intensity: &'a [u8], dimensions: Dimensions) -> Self {
        Self {
            cells,
            intensity,
            dimensions,
        }
    }

    /// Dimensions of the viewed grid.
    #[must_use]
    pub const fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Contents of the cell, or `None` when it lies outside the grid.
    #[must_use]
    pub fn kind(&self, cell: CellCoord) -> Option<CellKind> {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
    }

    /// Hollowness intensity of the cell; cells outside the grid read as zero.
    #[must_use]
    pub fn intensity(&self, cell: CellCoord) -> u8 {
        self.dimensions
            .index(cell)
            .and_then(|index| self.intensity.get(index).copied())
            .unwrap_or(0)
    }

    /// Reports whether the cell exists and is still empty.
    #[must_use]
    pub fn is_empty(&self, cell: CellCoord) -> bool {
        self.kind(cell).is_some_and(CellKind::is_empty)
    }

    /// Reports whether the segment fits the grid and every cell it covers is empty.
    #[must_use]
    pub fn is_span_empty(&self, segment: &WallSegment) -> bool {
        segment.fits_within(self.dimensions) && segment.cells().all(|cell| self.is_empty(cell))
    }

    /// Empty cells in row-major order.
    #[must_use]
    pub fn empty_cells(&self) -> Vec<CellCoord> {
        self.dimensions
            .cells()
            .filter(|cell| self.is_empty(*cell))
            .collect()
    }

    /// Cells holding the provided kind, in row-major order.
    pub fn cells_of(&self, kind: CellKind) -> impl Iterator<Item = CellCoord> + 'a {
        let view = *self;
        self.dimensions
            .cells()
            .filter(move |cell| view.kind(*cell) == Some(kind))
    }

    /// Number of cells holding the provided kind.
    #[must_use]
    pub fn count(&self, kind: CellKind) -> usize {
        self.cells.iter().filter(|cell| **cell == kind).count()
    }
}
