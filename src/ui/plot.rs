use std::ops::RangeInclusive;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, MarkerShape, Plot, PlotPoint, Points, Text};

use crate::color::{diverging_color, normalize};
use crate::data::aggregate::{DashboardReport, GroupMean};
use crate::format::format_usd;
use crate::geo::country_centroid;

pub const CHART_HEIGHT: f32 = 300.0;

const BAR_COLOR: Color32 = Color32::from_rgb(0x63, 0x6e, 0xfa);

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Placeholder shown instead of a chart when the filtered view is empty.
pub fn no_data_notice(ui: &mut Ui, chart: &str) {
    let color = ui.visuals().warn_fg_color;
    ui.colored_label(color, format!("⚠ No data to display in the {chart} chart."));
}

/// Axis formatter that prints `labels[i]` at integer position `i`.
fn category_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let idx = mark.value.round();
        if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }
}

fn usd_axis(mark: GridMark, _range: &RangeInclusive<f64>) -> String {
    format_usd(mark.value)
}

fn group_bars(groups: &[&GroupMean]) -> Vec<Bar> {
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| {
            Bar::new(i as f64, g.mean)
                .name(format!("{} ({} records)", g.key, g.count))
                .width(0.7)
        })
        .collect()
}

fn group_chart(bars: Vec<Bar>) -> BarChart {
    BarChart::new(bars)
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}", bar.name, format_usd(bar.value))
        }))
}

// ---------------------------------------------------------------------------
// Top roles by mean salary (horizontal bars)
// ---------------------------------------------------------------------------

pub fn top_roles_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong(format!("Top {} roles by mean salary", report.top_roles.len().max(1)));
    if report.is_empty() {
        no_data_notice(ui, "roles");
        return;
    }

    // Ascending from the bottom, so the best-paid role is the top bar.
    let groups: Vec<&GroupMean> = report.top_roles.iter().rev().collect();
    let labels: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
    let chart = group_chart(group_bars(&groups)).horizontal();

    Plot::new("top_roles_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Mean annual salary (USD)")
        .x_axis_formatter(usd_axis)
        .y_axis_formatter(category_axis(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Salary distribution
// ---------------------------------------------------------------------------

pub fn salary_histogram_chart(ui: &mut Ui, report: &DashboardReport) {
    ui.strong("Annual salary distribution");
    let Some(histogram) = &report.salary_histogram else {
        no_data_notice(ui, "salary distribution");
        return;
    };

    let bars: Vec<Bar> = histogram
        .counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            Bar::new(histogram.bin_center(i), count as f64).width(histogram.bin_width)
        })
        .collect();
    let chart = BarChart::new(bars)
        .color(BAR_COLOR)
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("~{}\n{} records", format_usd(bar.argument), bar.value)
        }));

    Plot::new("salary_histogram_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Salary range (USD)")
        .y_axis_label("Records")
        .x_axis_formatter(usd_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));

    ui.small(format!(
        "{} salaries in {} bins",
        histogram.total(),
        histogram.counts.len()
    ));
}

// ---------------------------------------------------------------------------
// Country map for the focus role
// ---------------------------------------------------------------------------

/// Each country is a marker at its centroid, coloured red → green by mean salary.
pub fn country_map_chart(ui: &mut Ui, report: &DashboardReport, focus_role: &str) {
    ui.strong(format!("Mean {focus_role} salary by country"));
    if report.is_empty() {
        no_data_notice(ui, "countries");
        return;
    }
    if report.country_means.is_empty() {
        let color = ui.visuals().warn_fg_color;
        ui.colored_label(color, format!("⚠ No {focus_role} records in the current selection."));
        return;
    }

    let (min, max) = mean_range(&report.country_means);
    let label_color = ui.visuals().text_color();
    let mut unplaced: Vec<&str> = Vec::new();

    Plot::new("country_map_plot")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .include_x(-180.0)
        .include_x(180.0)
        .include_y(-60.0)
        .include_y(80.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for group in &report.country_means {
                let Some((lon, lat)) = country_centroid(&group.key) else {
                    unplaced.push(&group.key);
                    continue;
                };
                let color = diverging_color(normalize(group.mean, min, max));
                plot_ui.points(
                    Points::new(vec![[lon, lat]])
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(7.0)
                        .color(color)
                        .name(format!("{}: {}", group.key, format_usd(group.mean))),
                );
                plot_ui.text(
                    Text::new(PlotPoint::new(lon, lat + 5.0), group.key.as_str()).color(label_color),
                );
            }
        });

    ui.horizontal(|ui: &mut Ui| {
        ui.colored_label(diverging_color(0.0), "●");
        ui.small(format_usd(min));
        ui.colored_label(diverging_color(0.5), "●");
        ui.colored_label(diverging_color(1.0), "●");
        ui.small(format_usd(max));
    });
    if !unplaced.is_empty() {
        ui.small(format!("Not shown on the map: {}", unplaced.join(", ")));
    }
}

fn mean_range(groups: &[GroupMean]) -> (f64, f64) {
    groups.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), g| {
        (lo.min(g.mean), hi.max(g.mean))
    })
}

// ---------------------------------------------------------------------------
// Top countries for the focus role (vertical bars, descending)
// ---------------------------------------------------------------------------

pub fn top_countries_chart(ui: &mut Ui, report: &DashboardReport, focus_role: &str) {
    ui.strong(format!(
        "Top {} countries by mean {focus_role} salary",
        report.top_countries.len().max(1)
    ));
    if report.is_empty() {
        no_data_notice(ui, "countries");
        return;
    }
    if report.top_countries.is_empty() {
        let color = ui.visuals().warn_fg_color;
        ui.colored_label(color, format!("⚠ No {focus_role} records in the current selection."));
        return;
    }

    let groups: Vec<&GroupMean> = report.top_countries.iter().collect();
    let labels: Vec<String> = groups.iter().map(|g| g.key.clone()).collect();
    let chart = group_chart(group_bars(&groups));

    Plot::new("top_countries_plot")
        .height(CHART_HEIGHT)
        .x_axis_label("Country")
        .y_axis_label("Mean salary (USD)")
        .x_axis_formatter(category_axis(labels))
        .y_axis_formatter(usd_axis)
        .allow_scroll(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(key: &str, mean: f64) -> GroupMean {
        GroupMean {
            key: key.to_string(),
            mean,
            count: 1,
        }
    }

    #[test]
    fn test_mean_range() {
        let groups = vec![group("USA", 150.0), group("BRA", 40.0), group("PRT", 60.0)];
        assert_eq!(mean_range(&groups), (40.0, 150.0));
    }

    #[test]
    fn test_group_bars_positions_and_names() {
        let a = group("A", 10.0);
        let b = group("B", 20.0);
        let bars = group_bars(&[&a, &b]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].argument, 1.0);
        assert_eq!(bars[1].value, 20.0);
        assert_eq!(bars[1].name, "B (1 records)");
    }
}
