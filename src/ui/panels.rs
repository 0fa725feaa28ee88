use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{donut, metrics, plot, table};
use crate::data::model::{CategoryValue, FilterColumn};
use crate::state::{AppState, FilterChange};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let mut changes: Vec<FilterChange> = Vec::new();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for col in FilterColumn::ALL {
                let Some(all_values) = state.dataset.unique_values.get(&col) else {
                    continue;
                };
                let selected = state.filters.get(&col);
                let is_selected = |val: &CategoryValue| selected.is_some_and(|s| s.contains(val));

                // Show count of selected / total in the header
                let n_selected = selected.map_or(0, |s| s.len());
                let header_text = format!("{col}  ({n_selected}/{})", all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(col.column_name())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                changes.push(FilterChange::SelectAll(col));
                            }
                            if ui.small_button("None").clicked() {
                                changes.push(FilterChange::SelectNone(col));
                            }
                        });

                        for val in all_values {
                            let mut checked = is_selected(val);
                            if ui.checkbox(&mut checked, val.to_string()).changed() {
                                changes.push(FilterChange::Set {
                                    column: col,
                                    value: val.clone(),
                                    selected: checked,
                                });
                            }
                        }
                    })
                    .header_response
                    .on_hover_text(format!("Column '{}'", col.column_name()));
            }
        });

    // Recompute the view only when a checkbox or button changed something.
    state.apply_filter_changes(changes);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} records loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ))
        .on_hover_text(state.source.to_string());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – metrics, charts, records
// ---------------------------------------------------------------------------

pub fn main_panel(ui: &mut Ui, state: &AppState) {
    let report = &state.report;
    let focus_role = state.config.focus_role.as_str();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Salary Analysis Dashboard for the Data Field");
            ui.label(
                "Explore salary data for data-field roles over recent years. \
                 Use the filters on the left to refine the analysis.",
            );
            ui.add_space(8.0);

            metrics::metric_row(ui, &report.metrics);
            ui.separator();

            ui.heading("Charts");
            ui.columns(2, |cols: &mut [Ui]| {
                plot::top_roles_chart(&mut cols[0], report);
                plot::salary_histogram_chart(&mut cols[1], report);
            });
            ui.add_space(8.0);
            ui.columns(2, |cols: &mut [Ui]| {
                donut::remote_work_chart(&mut cols[0], report, &state.remote_colors);
                plot::country_map_chart(&mut cols[1], report, focus_role);
            });
            ui.add_space(8.0);
            plot::top_countries_chart(ui, report, focus_role);

            ui.separator();
            ui.heading("Detailed data");
            table::records_table(ui, state);
        });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_file(path);
    }
}
