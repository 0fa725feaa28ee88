use std::f32::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Align2, Color32, FontId, Pos2, Sense, Shape, Stroke, Ui, Vec2};

use super::plot::{no_data_notice, CHART_HEIGHT};
use crate::color::ColorMap;
use crate::data::aggregate::DashboardReport;

/// Inner radius as a fraction of the outer one.
const HOLE: f32 = 0.5;
/// Largest angle covered by a single ring polygon.
const SEGMENT_STEP: f32 = 0.05;

// ---------------------------------------------------------------------------
// Remote-work proportion (donut)
// ---------------------------------------------------------------------------

pub fn remote_work_chart(ui: &mut Ui, report: &DashboardReport, colors: &ColorMap) {
    ui.strong("Proportion of remote-work types");
    if report.is_empty() {
        no_data_notice(ui, "remote-work");
        return;
    }

    let size = Vec2::new(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let rect = response.rect;
    let center = rect.center();
    let outer = 0.45 * rect.width().min(rect.height());
    let inner = outer * HOLE;

    // Clockwise from twelve o'clock.
    let mut start = -FRAC_PI_2;
    for share in &report.remote_shares {
        let sweep = share.fraction as f32 * TAU;
        let fill = colors.color_for(&share.label);
        for shape in ring_segment(center, inner, outer, start, start + sweep, fill) {
            painter.add(shape);
        }

        let mid = start + sweep / 2.0;
        let label_pos = center + Vec2::angled(mid) * (inner + outer) / 2.0;
        painter.text(
            label_pos,
            Align2::CENTER_CENTER,
            slice_label(&share.label, share.fraction),
            FontId::proportional(12.0),
            Color32::BLACK,
        );
        start += sweep;
    }

    let counts: Vec<String> = report
        .remote_shares
        .iter()
        .map(|s| format!("{}: {}", s.label, s.count))
        .collect();
    response.on_hover_text(counts.join("\n"));
}

/// "label\n42.0%" annotation for one slice.
fn slice_label(label: &str, fraction: f64) -> String {
    format!("{label}\n{:.1}%", fraction * 100.0)
}

/// Convex quads approximating the ring between angles `from` and `to`.
fn ring_segment(center: Pos2, inner: f32, outer: f32, from: f32, to: f32, fill: Color32) -> Vec<Shape> {
    let sweep = to - from;
    if sweep <= 0.0 {
        return Vec::new();
    }
    let steps = (sweep / SEGMENT_STEP).ceil().max(1.0) as usize;
    let angle = |i: usize| from + sweep * i as f32 / steps as f32;

    (0..steps)
        .map(|i| {
            let (a, b) = (Vec2::angled(angle(i)), Vec2::angled(angle(i + 1)));
            Shape::convex_polygon(
                vec![
                    center + a * outer,
                    center + b * outer,
                    center + b * inner,
                    center + a * inner,
                ],
                fill,
                Stroke::NONE,
            )
        })
        .collect()
}
