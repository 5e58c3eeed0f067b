//! Build the shopping-cart table and print it as plain pipe-separated text.

use serde_json::json;
use tablebuilderlib::{reducers, BuildOptions, Field, FieldSet, TableBuilder, TableError, Value};

fn money(value: &Value) -> Result<String, tablebuilderlib::BoxError> {
    let amount = value.as_f64().ok_or("not a number")?;
    Ok(format!("${:.2}", amount))
}

fn main() -> Result<(), TableError> {
    let fields = FieldSet::new()
        .field(
            "name",
            Field::new("Name").key("name").footer("Total").color_by_value(),
        )?
        .field(
            "quantity",
            Field::new("Quantity")
                .key("quantity")
                .with_default(0)
                .footer_with(reducers::sum),
        )?
        .field("price", Field::new("Price").key("price").formatter(money))?
        .field(
            "subtotal",
            Field::new("Subtotal")
                .compute(|r: &Value, _| {
                    let quantity = r["quantity"].as_f64().unwrap_or_default();
                    let price = r["price"].as_f64().ok_or("price missing")?;
                    Ok(json!(quantity * price))
                })
                .formatter(money)
                .footer_with(reducers::sum),
        )?;

    let records = vec![
        json!({"name": "Apple", "quantity": 3, "price": 0.5}),
        json!({"name": "Bread", "quantity": 1, "price": 2.25}),
        json!({"name": "Apple", "price": 0.5}),
    ];

    let builder = TableBuilder::new(fields);
    for transposed in [false, true] {
        let grid = builder.build_with(&records, &BuildOptions::new().transposed(transposed))?;
        println!("transposed: {}", transposed);
        if grid.is_transposed() {
            for lane in &grid.lanes {
                let mut line = vec![lane.header.text.as_str()];
                line.extend(lane.cells.iter().map(|c| c.text.as_str()));
                line.push(lane.footer.text.as_str());
                println!("{}", line.join(" | "));
            }
        } else {
            let headers: Vec<_> = grid.headers().iter().map(|c| c.text.as_str()).collect();
            let footers: Vec<_> = grid.footers().iter().map(|c| c.text.as_str()).collect();
            println!("{}", headers.join(" | "));
            for row in grid.body_text() {
                println!("{}", row.join(" | "));
            }
            println!("{}", footers.join(" | "));
        }
        println!();
    }
    Ok(())
}
