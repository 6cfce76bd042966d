#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering for generated caves.

use std::fmt::{self, Write as _};

use cave_core::{CaveView, CellKind, Dimensions};

/// Characters used when presenting each kind of cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyphs {
    /// Glyph for an empty cell without hollowness.
    pub empty: char,
    /// Glyph for a wall cell.
    pub wall: char,
    /// Glyph for a collapsing spot.
    pub collapse: char,
    /// Glyph for the start marker.
    pub start: char,
    /// Glyph for the finish marker.
    pub finish: char,
    /// Separator written between adjacent cells on a row.
    pub delimiter: char,
}

impl Glyphs {
    /// Glyph for the cell, falling back to its intensity digit for open floor.
    #[must_use]
    pub fn cell(&self, kind: CellKind, intensity: u8) -> char {
        match kind {
            CellKind::Start => self.start,
            CellKind::Finish => self.finish,
            CellKind::Wall => self.wall,
            CellKind::Collapse => self.collapse,
            CellKind::Empty => match intensity {
                0 => self.empty,
                value => char::from_digit(u32::from(value.min(9)), 10).unwrap_or(self.empty),
            },
        }
    }
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            empty: '.',
            wall: 'W',
            collapse: 'C',
            start: '>',
            finish: '<',
            delimiter: ' ',
        }
    }
}

/// Writes the field into `out`, one line per row.
pub fn write_field<W>(out: &mut W, view: CaveView<'_>, glyphs: &Glyphs) -> fmt::Result
where
    W: fmt::Write,
{
    let dimensions = view.dimensions();
    for cell in dimensions.cells() {
        if cell.column() > 0 {
            out.write_char(glyphs.delimiter)?;
        }
        let kind = view.kind(cell).unwrap_or_default();
        out.write_char(glyphs.cell(kind, view.intensity(cell)))?;
        if cell.column() + 1 == dimensions.width() {
            out.write_char('\n')?;
        }
    }
    Ok(())
}

/// Renders the field into a new string using the default glyphs.
pub fn render_field(view: CaveView<'_>) -> Result<String, fmt::Error> {
    let mut out = String::with_capacity(view.dimensions().cell_count() * 2);
    write_field(&mut out, view, &Glyphs::default())?;
    Ok(out)
}

/// One-line description of a finished cave.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Size of the cave.
    pub dimensions: Dimensions,
    /// Wall segments requested by the configuration.
    pub walls: u32,
    /// Grid cells actually covered by walls.
    pub wall_cells: usize,
    /// Collapsing spots actually placed.
    pub collapsing: usize,
    /// Seed that reproduces the cave, as accepted on the command line.
    pub seed: i64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Generated field {}x{} with {} walls (total wall cells: {}) and {} collapsing spots \
             (seed {}).",
            self.dimensions.width(),
            self.dimensions.height(),
            self.walls,
            self.wall_cells,
            self.collapsing,
            self.seed
        )
    }
}
