//! Render-ready grid produced by a build.
//!
//! A `Grid` holds one [`Lane`] per field, in declaration order. In the
//! normal orientation each lane is displayed as a column (one body cell per
//! record); transposed, each lane is displayed as a row, with its header
//! and footer as the leading and trailing cells. Transposing only flips
//! the orientation flag: cells and styles never move between lanes.

use serde::Serialize;
use serde_json::Value;

use super::adapter::RenderAdapter;
use crate::build::options::TableOptions;
use crate::field::Justify;

/// One displayed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    /// Raw value before formatting (the literal text for literal aggregates)
    pub raw: Value,
    /// Display text
    pub text: String,
    /// Style token (empty for unstyled)
    pub style: String,
}

/// How lanes are laid out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Fields are columns, records are rows
    #[default]
    Columns,
    /// Fields are rows, records are columns
    Rows,
}

/// Everything displayed for one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    /// Field name
    pub name: String,
    pub header: Cell,
    pub footer: Cell,
    pub justify: Justify,
    /// Body cells in record order
    pub cells: Vec<Cell>,
}

/// A run of consecutive records sharing a section key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    /// Index of the first record in the run
    pub start: usize,
    /// Number of records in the run
    pub len: usize,
    /// The shared key value
    pub key: Value,
}

/// The finished table, ready for a [`RenderAdapter`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub orientation: Orientation,
    pub lanes: Vec<Lane>,
    pub record_count: usize,
    /// Empty unless the build was sectioned
    pub sections: Vec<Section>,
    /// Merged table-level options, passed through for the adapter
    pub options: TableOptions,
}

impl Grid {
    pub fn is_transposed(&self) -> bool {
        self.orientation == Orientation::Rows
    }

    /// Swap field/record placement. Applying it twice restores the grid.
    pub fn transpose(mut self) -> Self {
        self.orientation = match self.orientation {
            Orientation::Columns => Orientation::Rows,
            Orientation::Rows => Orientation::Columns,
        };
        self
    }

    /// Body size as displayed: `(rows, columns)`, excluding header/footer.
    pub fn dimensions(&self) -> (usize, usize) {
        match self.orientation {
            Orientation::Columns => (self.record_count, self.lanes.len()),
            Orientation::Rows => (self.lanes.len(), self.record_count),
        }
    }

    /// Body cell at a displayed position.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<&Cell> {
        let (lane, index) = match self.orientation {
            Orientation::Columns => (col, row),
            Orientation::Rows => (row, col),
        };
        self.lanes.get(lane)?.cells.get(index)
    }

    /// Body cells row by row, as displayed.
    pub fn body_rows(&self) -> Vec<Vec<&Cell>> {
        let (rows, cols) = self.dimensions();
        (0..rows)
            .map(|r| (0..cols).filter_map(|c| self.cell_at(r, c)).collect())
            .collect()
    }

    /// Display text of the body, row by row, as displayed.
    pub fn body_text(&self) -> Vec<Vec<String>> {
        self.body_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|c| c.text.clone()).collect())
            .collect()
    }

    /// Header cells in field order.
    pub fn headers(&self) -> Vec<&Cell> {
        self.lanes.iter().map(|l| &l.header).collect()
    }

    /// Footer cells in field order.
    pub fn footers(&self) -> Vec<&Cell> {
        self.lanes.iter().map(|l| &l.footer).collect()
    }

    /// Record indices where a new section begins (the first section excluded).
    pub fn boundaries(&self) -> Vec<usize> {
        self.sections.iter().skip(1).map(|s| s.start).collect()
    }

    /// Hand the grid to a render adapter.
    pub fn render_with<A: RenderAdapter>(&self, adapter: &A) -> Result<A::Output, A::Error> {
        adapter.render(self)
    }
}
