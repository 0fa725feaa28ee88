use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::REQUIRED_COLUMNS;
use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;
const TABLE_HEIGHT: f32 = 360.0;

/// Every visible record, one row each, in input order.
pub fn records_table(ui: &mut Ui, state: &AppState) {
    let rows = &state.visible_indices;
    if rows.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .max_scroll_height(TABLE_HEIGHT)
        .columns(Column::auto().at_least(60.0), REQUIRED_COLUMNS.len())
        .header(20.0, |mut header| {
            for name in REQUIRED_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let Some(record) = rows
                    .get(row.index())
                    .and_then(|&i| state.dataset.records.get(i))
                else {
                    return;
                };
                for cell in record.cells() {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
