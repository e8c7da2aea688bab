//! Region-to-thumbnail assignments computed before compositing

use crate::color::Color;
use crate::io::error::{Result, invalid_parameter};
use crate::matching::{ColorIndex, MatchSource};
use crate::spatial::{Region, TileGrid};
use ndarray::Array2;

/// Match chosen for one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// Cell being replaced
    pub region: Region,
    /// Average color of the cell
    pub color: Color,
    /// Position of the matched entry in the palette index
    pub entry: usize,
    /// Search tier that produced the match
    pub source: MatchSource,
}

/// One assignment per tiled cell, stored as a `rows × columns` grid
#[derive(Debug, Clone)]
pub struct MosaicPlan {
    grid: TileGrid,
    cells: Array2<Assignment>,
}

impl MosaicPlan {
    /// Arrange row-major assignments onto the grid
    ///
    /// # Errors
    ///
    /// Returns an invalid parameter error if the number of assignments
    /// differs from the grid's cell count
    pub fn new(grid: TileGrid, assignments: Vec<Assignment>) -> Result<Self> {
        let count = assignments.len();
        let shape = (grid.rows() as usize, grid.columns() as usize);
        let cells = Array2::from_shape_vec(shape, assignments).map_err(|_shape_error| {
            invalid_parameter(
                "assignments",
                &count,
                &format!("expected {} cells for the grid", grid.cell_count()),
            )
        })?;

        Ok(Self { grid, cells })
    }

    /// Grid the plan was computed for
    pub const fn grid(&self) -> &TileGrid {
        &self.grid
    }

    /// Assignment for the cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&Assignment> {
        self.cells.get([row, col])
    }

    /// All assignments in row-major order
    pub fn assignments(&self) -> impl Iterator<Item = &Assignment> {
        self.cells.iter()
    }

    /// Number of assigned cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the plan covers no cells
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Count of cells matched by the given search tier
    pub fn count_by_source(&self, source: MatchSource) -> usize {
        self.cells
            .iter()
            .filter(|assignment| assignment.source == source)
            .count()
    }

    /// Palette positions referenced by the plan, ascending and without repeats
    pub fn distinct_entries(&self) -> Vec<usize> {
        let mut entries: Vec<usize> = self.cells.iter().map(|a| a.entry).collect();
        entries.sort_unstable();
        entries.dedup();
        entries
    }

    /// Identifier of the thumbnail assigned to `(row, col)`
    pub fn identifier_at<'a>(
        &self,
        index: &'a ColorIndex,
        row: usize,
        col: usize,
    ) -> Option<&'a str> {
        let assignment = self.get(row, col)?;
        index
            .entry(assignment.entry)
            .map(|entry| entry.identifier.as_str())
    }
}
