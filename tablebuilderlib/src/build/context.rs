//! Per-build state and the build stages.
//!
//! A build runs, in order:
//! 1. Extract: resolve, format and style every (record, field) cell
//! 2. Aggregate: compute header and footer cells over each field's raw values
//! 3. Section: partition records when a section key is set
//! 4. Emit: assemble the [`Grid`], flipping it when transposed
//!
//! Nothing here outlives the build; the value styler cache included.

use serde_json::Value;
use tracing::debug;

use super::options::{BuildOptions, TableOptions};
use super::section::{partition, SectionKey};
use crate::access::Lookup;
use crate::error::Slot;
use crate::field::{Field, FieldSet};
use crate::output::{Cell, Grid, Lane, Orientation, Section};
use crate::style::ValueStyler;
use crate::Result;

/// Working state of a single build.
pub(crate) struct BuildContext<'a, R> {
    fields: &'a FieldSet<R>,
    records: &'a [R],
    transposed: bool,
    section_by: Option<SectionKey<R>>,
    table: TableOptions,
    styler: ValueStyler,
}

impl<'a, R: Lookup> BuildContext<'a, R> {
    /// Prepare a build from already-merged options.
    pub(crate) fn new(fields: &'a FieldSet<R>, records: &'a [R], options: BuildOptions<R>) -> Self {
        Self {
            fields,
            records,
            transposed: options.transposed.unwrap_or(false),
            section_by: options.section_by,
            table: options.table.resolved(),
            styler: ValueStyler::new(options.palette.unwrap_or_default()),
        }
    }

    pub(crate) fn run(mut self) -> Result<Grid> {
        debug!(
            fields = self.fields.len(),
            records = self.records.len(),
            transposed = self.transposed,
            "building table"
        );

        let (raws, cells) = self.extract()?;

        let mut lanes = Vec::with_capacity(self.fields.len());
        for ((field, values), cells) in self.fields.iter().zip(&raws).zip(cells) {
            let header = self.aggregate_cell(field, Slot::Header, values)?;
            let footer = self.aggregate_cell(field, Slot::Footer, values)?;
            lanes.push(Lane {
                name: field.name().to_string(),
                header,
                footer,
                justify: field.justification(),
                cells,
            });
        }

        let sections = self.sections()?;

        let grid = Grid {
            orientation: Orientation::Columns,
            lanes,
            record_count: self.records.len(),
            sections,
            options: self.table,
        };
        let grid = if self.transposed { grid.transpose() } else { grid };

        debug!(
            sections = grid.sections.len(),
            styled_values = self.styler.len(),
            "table built"
        );
        Ok(grid)
    }

    /// Row-major pass over the records; results are collected per field.
    fn extract(&mut self) -> Result<(Vec<Vec<Value>>, Vec<Vec<Cell>>)> {
        let width = self.fields.len();
        let mut raws: Vec<Vec<Value>> = (0..width)
            .map(|_| Vec::with_capacity(self.records.len()))
            .collect();
        let mut cells: Vec<Vec<Cell>> = (0..width)
            .map(|_| Vec::with_capacity(self.records.len()))
            .collect();

        for (index, record) in self.records.iter().enumerate() {
            for (column, field) in self.fields.iter().enumerate() {
                let raw = field.extract(record, index)?;
                let text = field.format(&raw)?;
                let style = field.style_for(&raw, self.table.body_style(), &mut self.styler);
                cells[column].push(Cell {
                    raw: raw.clone(),
                    text,
                    style,
                });
                raws[column].push(raw);
            }
        }
        Ok((raws, cells))
    }

    fn aggregate_cell(&self, field: &Field<R>, slot: Slot, values: &[Value]) -> Result<Cell> {
        let (raw, text) = field.aggregate(slot, values)?;
        let (own, table) = match slot {
            Slot::Header => (&field.header_style, &self.table.header_style),
            Slot::Footer => (&field.footer_style, &self.table.footer_style),
        };
        let style = if own.is_empty() {
            table.clone().unwrap_or_default()
        } else {
            own.clone()
        };
        Ok(Cell { raw, text, style })
    }

    fn sections(&self) -> Result<Vec<Section>> {
        match &self.section_by {
            Some(key) => partition(self.records, key),
            None => Ok(Vec::new()),
        }
    }
}
