use super::ui;
use crate::core::currency::Denomination;
use crate::core::filter::{ResultRow, ViewState};
use crate::core::store::CatalogStore;
use anyhow::Result;
use comfy_table::Cell;

/// Renders rows as a table with one column per denomination.
pub fn rows_as_table(rows: &[ResultRow]) -> String {
    let mut table = ui::new_styled_table();

    let mut header = vec![ui::header_cell("Item Name")];
    header.extend(Denomination::ALL.iter().map(|d| ui::header_cell(d.code())));
    table.set_header(header);

    for row in rows {
        let mut cells = vec![Cell::new(&row.name)];
        cells.extend(
            Denomination::ALL
                .iter()
                .map(|d| ui::number_cell(row.display_value(*d))),
        );
        table.add_row(cells);
    }

    table.to_string()
}

/// Builds the display for `view`; fails without output if the filter inputs are invalid.
pub fn render(store: &CatalogStore, view: &ViewState) -> Result<String> {
    let catalog = store.active_catalog(&view.selection);
    let rows = view.rows(&catalog)?;

    let mut output = format!(
        "Catalog: {}\n\n",
        ui::style_text(&view.selection.to_string(), ui::StyleType::Title)
    );

    if rows.is_empty() {
        output.push_str(&ui::style_text("No items match.", ui::StyleType::Subtle));
    } else {
        output.push_str(&rows_as_table(&rows));
    }

    output.push_str(&format!(
        "\n\n{}: {} of {}",
        ui::style_text("Items", ui::StyleType::TotalLabel),
        ui::style_text(&rows.len().to_string(), ui::StyleType::TotalValue),
        catalog.len()
    ));
    Ok(output)
}

pub fn run(store: &CatalogStore, view: &ViewState) -> Result<()> {
    println!("{}", render(store, view)?);
    Ok(())
}
