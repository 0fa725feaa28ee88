/// Remote CSV with the salary records.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/celsorma102/imersao-dados-alura/refs/heads/main/df_imersao_dados.csv";

/// Dashboard settings. There are no command-line flags or config files.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source_url: String,
    /// Fixed number of salary histogram bins.
    pub histogram_bins: usize,
    /// Groups kept by the top-N rankings.
    pub top_n: usize,
    /// Role whose salaries are broken down by country.
    pub focus_role: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_URL.to_string(),
            histogram_bins: 30,
            top_n: 10,
            focus_role: "Data Scientist".to_string(),
            window_size: [1400.0, 900.0],
            min_window_size: [800.0, 500.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.top_n, 10);
        assert_eq!(config.focus_role, "Data Scientist");
        assert!(config.source_url.ends_with(".csv"));
    }

    #[test]
    fn test_struct_update_keeps_other_defaults() {
        let config = DashboardConfig {
            top_n: 5,
            ..Default::default()
        };
        assert_eq!(config.top_n, 5);
        assert_eq!(config.histogram_bins, 30);
    }
}
