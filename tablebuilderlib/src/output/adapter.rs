//! The seam between grid building and drawing.

use super::grid::Grid;

/// Turns a finished [`Grid`] into something displayable.
///
/// The library never draws; implementations decide widths, glyphs and how
/// style tokens map to terminal attributes. Table-level options the adapter
/// doesn't understand arrive in `grid.options.extra` and may be rejected.
pub trait RenderAdapter {
    type Output;
    type Error;

    fn render(&self, grid: &Grid) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reducers, BuildOptions, Field, FieldSet, TableBuilder, TableOptions};
    use serde_json::json;

    /// Pipe-separated lines: header, body, footer; `--` between sections.
    struct PipeAdapter;

    impl RenderAdapter for PipeAdapter {
        type Output = Vec<String>;
        type Error = String;

        fn render(&self, grid: &Grid) -> Result<Self::Output, Self::Error> {
            if grid.options.extra.contains_key("unsupported") {
                return Err("unsupported option".to_string());
            }
            let join = |cells: Vec<&crate::Cell>| {
                cells
                    .iter()
                    .map(|c| c.text.as_str())
                    .collect::<Vec<_>>()
                    .join("|")
            };
            let boundaries = grid.boundaries();
            let mut lines = Vec::new();
            if grid.options.is_header_shown() {
                lines.push(join(grid.headers()));
            }
            for (i, row) in grid.body_rows().into_iter().enumerate() {
                if boundaries.contains(&i) {
                    lines.push("--".to_string());
                }
                lines.push(join(row));
            }
            if grid.options.is_footer_shown() {
                lines.push(join(grid.footers()));
            }
            Ok(lines)
        }
    }

    fn builder() -> TableBuilder {
        let fields = FieldSet::new()
            .field("kind", Field::new("Kind").key("kind"))
            .unwrap()
            .field("n", Field::new("N").key("n").footer_with(reducers::sum))
            .unwrap();
        TableBuilder::with_options(
            fields,
            BuildOptions::new().table(TableOptions::new().show_footer(true)),
        )
    }

    #[test]
    fn test_adapter_receives_sections_and_aggregates() {
        let records = vec![
            json!({"kind": "a", "n": 1}),
            json!({"kind": "a", "n": 2}),
            json!({"kind": "b", "n": 3}),
        ];
        let overrides = BuildOptions::new().section_by(crate::Path::root().attr("kind"));
        let grid = builder().build_with(&records, &overrides).unwrap();
        let lines = grid.render_with(&PipeAdapter).unwrap();
        assert_eq!(lines, vec!["Kind|N", "a|1", "a|2", "--", "b|3", "|6"]);
    }

    #[test]
    fn test_adapter_may_reject_passthrough_options() {
        let overrides =
            BuildOptions::new().table(TableOptions::new().extra("unsupported", json!(true)));
        let grid = builder().build_with(&[], &overrides).unwrap();
        assert_eq!(grid.render_with(&PipeAdapter).unwrap_err(), "unsupported option");
    }
}
