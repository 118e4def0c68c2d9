use super::ui;
use crate::core::FundCatalog;
use comfy_table::Cell;

pub fn render_funds(catalog: &FundCatalog) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("#"),
        ui::header_cell("Fund"),
        ui::header_cell("Ticker"),
    ]);

    for (i, fund) in catalog.list_funds().iter().enumerate() {
        table.add_row(vec![
            ui::number_cell((i + 1).to_string()),
            Cell::new(&fund.name),
            Cell::new(&fund.ticker),
        ]);
    }

    format!(
        "{}\n\n{}",
        ui::style_text("Supported Mutual Funds", ui::StyleType::Title),
        table
    )
}

pub fn run(catalog: &FundCatalog) {
    println!("{}", render_funds(catalog));
}
