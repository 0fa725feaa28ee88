use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Srgb};

// ---------------------------------------------------------------------------
// Category palette
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    let rgb: Srgb<u8> = rgb.into_format();
    Color32::from_rgb(rgb.red, rgb.green, rgb.blue)
}

/// Maps category labels (e.g. remote-work types) to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    /// Assign palette colours to `labels` in the order given.
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a str>) -> Self {
        let labels: Vec<&str> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, color)| (label.to_string(), color))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Diverging scale for the country map
// ---------------------------------------------------------------------------

const SCALE_LOW: (u8, u8, u8) = (0xd7, 0x30, 0x27);
const SCALE_MID: (u8, u8, u8) = (0xff, 0xff, 0xbf);
const SCALE_HIGH: (u8, u8, u8) = (0x1a, 0x98, 0x50);

/// Red → yellow → green colour for `t` in `[0, 1]` (clamped; NaN maps to the midpoint).
pub fn diverging_color(t: f64) -> Color32 {
    let t = if t.is_nan() { 0.5 } else { t.clamp(0.0, 1.0) } as f32;
    let (from, to, local) = if t < 0.5 {
        (SCALE_LOW, SCALE_MID, t * 2.0)
    } else {
        (SCALE_MID, SCALE_HIGH, (t - 0.5) * 2.0)
    };
    to_color32(mix_linear(from, to, local))
}

/// Interpolate in linear RGB so the midpoint does not look muddy.
fn mix_linear(from: (u8, u8, u8), to: (u8, u8, u8), t: f32) -> Srgb {
    let linear = |(r, g, b): (u8, u8, u8)| -> LinSrgb {
        Srgb::new(r, g, b).into_format::<f32>().into_linear()
    };
    let (a, b) = (linear(from), linear(to));
    let mixed = LinSrgb::new(
        a.red + (b.red - a.red) * t,
        a.green + (b.green - a.green) * t,
        a.blue + (b.blue - a.blue) * t,
    );
    Srgb::from_linear(mixed)
}

/// Position of `value` within `[min, max]`; a degenerate range maps to the top.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = max - min;
    if range.abs() < f64::EPSILON {
        1.0
    } else {
        (value - min) / range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size_and_distinct() {
        assert!(generate_palette(0).is_empty());
        let palette = generate_palette(4);
        assert_eq!(palette.len(), 4);
        assert_ne!(palette[0], palette[1]);
    }

    #[test]
    fn test_color_map_unknown_label_is_gray() {
        let map = ColorMap::new(["Remoto", "Presencial", "Hibrido"]);
        assert_ne!(map.color_for("Remoto"), Color32::GRAY);
        assert_eq!(map.color_for("Desconhecido"), Color32::GRAY);
    }

    #[test]
    fn test_diverging_endpoints() {
        assert_eq!(diverging_color(0.0), Color32::from_rgb(0xd7, 0x30, 0x27));
        assert_eq!(diverging_color(1.0), Color32::from_rgb(0x1a, 0x98, 0x50));
        assert_eq!(diverging_color(-3.0), diverging_color(0.0));
        assert_eq!(diverging_color(7.0), diverging_color(1.0));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(5.0, 0.0, 10.0), 0.5);
        assert_eq!(normalize(3.0, 3.0, 3.0), 1.0);
    }
}
