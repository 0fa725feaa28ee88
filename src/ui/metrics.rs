use eframe::egui::{RichText, Ui};

use crate::data::aggregate::SummaryMetrics;
use crate::format::format_usd;

/// Title and display value of the four metric cards.
fn metric_cards(metrics: &SummaryMetrics) -> [(&'static str, String); 4] {
    [
        ("Mean salary", format_usd(metrics.mean_salary)),
        ("Maximum salary", format_usd(metrics.max_salary)),
        ("Total records", metrics.total_records.to_string()),
        ("Most frequent role", metrics.most_frequent_role.clone()),
    ]
}

pub fn metric_row(ui: &mut Ui, metrics: &SummaryMetrics) {
    ui.strong("Key metrics (annual salary in USD)");
    ui.add_space(4.0);
    ui.columns(4, |cols: &mut [Ui]| {
        for (col, (title, value)) in cols.iter_mut().zip(metric_cards(metrics)) {
            col.group(|ui: &mut Ui| {
                ui.label(RichText::new(title).weak());
                ui.label(RichText::new(value).heading());
            });
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cards_for_empty_view() {
        let cards = metric_cards(&SummaryMetrics::default());
        assert_eq!(cards[0].1, "$0");
        assert_eq!(cards[1].1, "$0");
        assert_eq!(cards[2].1, "0");
        assert_eq!(cards[3].1, "");
    }

    #[test]
    fn test_cards_format_values() {
        let metrics = SummaryMetrics {
            mean_salary: 123456.7,
            max_salary: 450000.0,
            total_records: 1234,
            most_frequent_role: "Data Scientist".to_string(),
        };
        let cards = metric_cards(&metrics);
        assert_eq!(cards[0], ("Mean salary", "$123,457".to_string()));
        assert_eq!(cards[1].1, "$450,000");
        assert_eq!(cards[2].1, "1234");
        assert_eq!(cards[3].1, "Data Scientist");
    }
}
