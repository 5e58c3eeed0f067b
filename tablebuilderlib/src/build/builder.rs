//! The table builder: declared fields plus declaration-time options.

use serde_json::Value;

use super::context::BuildContext;
use super::options::BuildOptions;
use crate::access::Lookup;
use crate::field::FieldSet;
use crate::output::Grid;
use crate::Result;

/// Builds grids from records against a fixed field declaration.
///
/// The builder is immutable; every build gets its own context, so one
/// builder can serve any number of builds, including concurrent ones.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use tablebuilderlib::{reducers, Field, FieldSet, TableBuilder};
///
/// let fields = FieldSet::new()
///     .field("name", Field::new("Name").key("name").footer("Total"))?
///     .field("qty", Field::new("Qty").key("qty").footer_with(reducers::sum))?;
/// let builder = TableBuilder::new(fields);
///
/// let grid = builder.build(&[json!({"name": "a", "qty": 2}), json!({"name": "b", "qty": 3})])?;
/// assert_eq!(grid.footers()[1].text, "5");
/// # Ok::<(), tablebuilderlib::TableError>(())
/// ```
pub struct TableBuilder<R = Value> {
    fields: FieldSet<R>,
    options: BuildOptions<R>,
}

impl<R> TableBuilder<R> {
    pub fn new(fields: FieldSet<R>) -> Self {
        Self::with_options(fields, BuildOptions::default())
    }

    /// Builder with declaration-time options; call-time options override them.
    pub fn with_options(fields: FieldSet<R>, options: BuildOptions<R>) -> Self {
        Self { fields, options }
    }

    pub fn fields(&self) -> &FieldSet<R> {
        &self.fields
    }

    pub fn options(&self) -> &BuildOptions<R> {
        &self.options
    }
}

impl<R: Lookup> TableBuilder<R> {
    /// Build with the declaration-time options only.
    pub fn build(&self, records: &[R]) -> Result<Grid> {
        BuildContext::new(&self.fields, records, self.options.clone()).run()
    }

    /// Build with call-time overrides merged over the declared options.
    pub fn build_with(&self, records: &[R], overrides: &BuildOptions<R>) -> Result<Grid> {
        BuildContext::new(&self.fields, records, self.options.merge(overrides)).run()
    }
}

impl<R> Clone for TableBuilder<R> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
            options: self.options.clone(),
        }
    }
}

impl<R> std::fmt::Debug for TableBuilder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableBuilder")
            .field("fields", &self.fields)
            .field("options", &self.options)
            .finish()
    }
}

/// One-shot build without keeping a builder around.
pub fn build_table<R: Lookup>(
    fields: &FieldSet<R>,
    records: &[R],
    options: &BuildOptions<R>,
) -> Result<Grid> {
    BuildContext::new(fields, records, options.clone()).run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::options::TableOptions;
    use crate::error::{Slot, TableError};
    use crate::field::{reducers, Field, Justify};
    use crate::style::Palette;
    use serde_json::json;

    fn cart_fields() -> FieldSet {
        FieldSet::new()
            .field("name", Field::new("Name").key("name").footer("Total"))
            .unwrap()
            .field(
                "quantity",
                Field::new("Quantity")
                    .key("quantity")
                    .footer_with(reducers::sum)
                    .justify(Justify::Right),
            )
            .unwrap()
            .field(
                "subtotal",
                Field::new("Subtotal")
                    .compute(|r: &Value, _| {
                        let quantity = r["quantity"].as_i64().ok_or("quantity missing")?;
                        let price = r["price"].as_i64().ok_or("price missing")?;
                        Ok(json!(quantity * price))
                    })
                    .footer_with(reducers::sum),
            )
            .unwrap()
    }

    fn cart_records() -> Vec<Value> {
        vec![
            json!({"name": "Item 1", "quantity": 1, "price": 10}),
            json!({"name": "Item 2", "quantity": 2, "price": 20}),
        ]
    }

    fn texts(cells: Vec<&crate::output::Cell>) -> Vec<String> {
        cells.into_iter().map(|c| c.text.clone()).collect()
    }

    #[test]
    fn test_cart_body_and_footer() {
        let grid = TableBuilder::new(cart_fields()).build(&cart_records()).unwrap();
        assert_eq!(
            grid.body_text(),
            vec![vec!["Item 1", "1", "10"], vec!["Item 2", "2", "40"]]
        );
        assert_eq!(texts(grid.footers()), vec!["Total", "3", "50"]);
        assert_eq!(grid.lanes[1].footer.raw, json!(3));
        assert_eq!(texts(grid.headers()), vec!["Name", "Quantity", "Subtotal"]);
    }

    #[test]
    fn test_field_order_preserved() {
        let fields = cart_fields().select(&["subtotal", "name"]).unwrap();
        let grid = TableBuilder::new(fields).build(&cart_records()).unwrap();
        let names: Vec<_> = grid.lanes.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["subtotal", "name"]);

        let grid = grid.transpose();
        assert_eq!(grid.body_text()[0], vec!["10", "40"]);
        assert_eq!(grid.body_text()[1], vec!["Item 1", "Item 2"]);
    }

    #[test]
    fn test_sparse_records_use_defaults() {
        let fields = FieldSet::new()
            .field("a", Field::new("A").key("a").with_default("-"))
            .unwrap()
            .field("b", Field::new("B").key("b"))
            .unwrap();
        let records = vec![json!({"a": 1}), json!({"b": 2}), json!({})];
        let grid = TableBuilder::new(fields).build(&records).unwrap();
        assert_eq!(
            grid.body_text(),
            vec![vec!["1", ""], vec!["-", "2"], vec!["-", ""]]
        );
        assert_eq!(grid.lanes[0].cells[1].raw, json!("-"));
        assert_eq!(grid.lanes[1].cells[0].raw, Value::Null);
    }

    #[test]
    fn test_literal_aggregates_with_no_records() {
        let grid = TableBuilder::new(cart_fields()).build(&[]).unwrap();
        assert_eq!(grid.dimensions(), (0, 3));
        assert_eq!(texts(grid.footers()), vec!["Total", "0", "0"]);
        assert_eq!(texts(grid.headers()), vec!["Name", "Quantity", "Subtotal"]);
    }

    #[test]
    fn test_reducer_fault_aborts_build() {
        let fields: FieldSet = FieldSet::new()
            .field("n", Field::new("N").key("n").footer_with(reducers::mean))
            .unwrap();
        let err = TableBuilder::new(fields).build(&[]).unwrap_err();
        assert!(matches!(
            &err,
            TableError::Reduce { field, slot: Slot::Footer, .. } if field == "n"
        ));
    }

    #[test]
    fn test_accessor_fault_names_record() {
        let mut records = cart_records();
        records.push(json!({"name": "Broken"}));
        let err = TableBuilder::new(cart_fields()).build(&records).unwrap_err();
        assert!(matches!(&err, TableError::Resolution { record: 2, .. }));
        assert_eq!(err.field(), Some("subtotal"));
    }

    #[test]
    fn test_transposed_option_is_involution() {
        let builder = TableBuilder::new(cart_fields());
        let plain = builder.build(&cart_records()).unwrap();
        let transposed = builder
            .build_with(&cart_records(), &BuildOptions::new().transposed(true))
            .unwrap();
        assert!(transposed.is_transposed());
        assert_eq!(transposed.dimensions(), (3, 2));
        assert_eq!(transposed.clone().transpose(), plain);
        assert_eq!(transposed.transpose().transpose().cell_at(1, 2), plain.cell_at(1, 2));
    }

    #[test]
    fn test_same_value_same_style() {
        let fields = FieldSet::new()
            .field("fruit", Field::new("Fruit").key("fruit").color_by_value())
            .unwrap();
        let records = vec![
            json!({"fruit": "apple"}),
            json!({"fruit": "banana"}),
            json!({"fruit": "apple"}),
        ];
        let grid = TableBuilder::new(fields).build(&records).unwrap();
        let styles: Vec<_> = grid.lanes[0].cells.iter().map(|c| c.style.as_str()).collect();
        assert_eq!(styles, vec!["214", "39", "214"]);
    }

    #[test]
    fn test_custom_palette() {
        let fields = FieldSet::new()
            .field("k", Field::new("K").key("k").color_by_value())
            .unwrap();
        let options = BuildOptions::new().palette(Palette::new(["magenta"]).unwrap());
        let grid = TableBuilder::with_options(fields, options)
            .build(&[json!({"k": 1}), json!({"k": 2})])
            .unwrap();
        assert!(grid.lanes[0].cells.iter().all(|c| c.style == "magenta"));
    }

    #[test]
    fn test_aggregate_styles() {
        let fields: FieldSet = FieldSet::new()
            .field("a", Field::new("A").footer("x"))
            .unwrap()
            .field("b", Field::new("B").header_style("underline").footer_style("dim"))
            .unwrap();
        let grid = TableBuilder::new(fields).build(&[]).unwrap();
        assert_eq!(grid.lanes[0].header.style, "bold");
        assert_eq!(grid.lanes[0].footer.style, "bold");
        assert_eq!(grid.lanes[1].header.style, "underline");
        assert_eq!(grid.lanes[1].footer.style, "dim");

        let overrides = BuildOptions::new().table(TableOptions::new().header_style("italic"));
        let fields: FieldSet = FieldSet::new().field("a", Field::new("A")).unwrap();
        let grid = TableBuilder::new(fields).build_with(&[], &overrides).unwrap();
        assert_eq!(grid.lanes[0].header.style, "italic");
    }

    #[test]
    fn test_body_style_fallback() {
        let fields = FieldSet::new()
            .field("a", Field::new("A").key("a"))
            .unwrap()
            .field("b", Field::new("B").key("b").style("green"))
            .unwrap();
        let options = BuildOptions::new().table(TableOptions::new().style("dim"));
        let grid = TableBuilder::with_options(fields, options)
            .build(&[json!({"a": 1, "b": 2})])
            .unwrap();
        assert_eq!(grid.lanes[0].cells[0].style, "dim");
        assert_eq!(grid.lanes[1].cells[0].style, "green");
    }

    #[test]
    fn test_sectioned_build() {
        let fields = FieldSet::new()
            .field("k", Field::new("K").key("k"))
            .unwrap();
        let records: Vec<Value> = ["A", "A", "B", "B", "B", "A"]
            .iter()
            .map(|k| json!({"k": k}))
            .collect();
        let grid = build_table(
            &fields,
            &records,
            &BuildOptions::new().section_by("k"),
        )
        .unwrap();
        let sizes: Vec<_> = grid.sections.iter().map(|s| s.len).collect();
        assert_eq!(sizes, vec![2, 3, 1]);
        assert_eq!(grid.boundaries(), vec![2, 5]);
        assert_eq!(grid.body_text().len(), 6);
    }

    #[test]
    fn test_call_time_options_override_declared() {
        let declared = BuildOptions::new().table(TableOptions::new().title("Declared").show_footer(true));
        let builder = TableBuilder::with_options(cart_fields(), declared);
        let overrides = BuildOptions::new().table(TableOptions::new().title("Call"));
        let grid = builder.build_with(&cart_records(), &overrides).unwrap();
        assert_eq!(grid.options.title.as_deref(), Some("Call"));
        assert!(grid.options.is_footer_shown());
        assert_eq!(builder.options().table.title.as_deref(), Some("Declared"));
    }

    #[test]
    fn test_builder_reusable() {
        let builder = TableBuilder::new(cart_fields());
        let first = builder.build(&cart_records()).unwrap();
        let second = builder.build(&cart_records()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_parallel_builds() {
        fn shareable<T: Send + Sync>(_: &T) {}

        let fields = cart_fields()
            .field("tag", Field::new("Tag").key("name").color_by_value())
            .unwrap();
        let builder = TableBuilder::new(fields);
        shareable(&builder);

        let records = cart_records();
        let (left, right) = std::thread::scope(|scope| {
            let left = scope.spawn(|| builder.build(&records));
            let right = scope.spawn(|| builder.build(&records));
            (left.join().unwrap(), right.join().unwrap())
        });
        let left = left.unwrap();
        assert_eq!(left, right.unwrap());
        assert_eq!(left, builder.build(&records).unwrap());
        assert_eq!(texts(left.footers()), vec!["Total", "3", "50", ""]);
    }
}
