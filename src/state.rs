use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::aggregate::DashboardReport;
use crate::data::filter::{filtered_indices, init_filter_state, select, FilterState};
use crate::data::loader::DataSource;
use crate::data::model::{CategoryValue, FilterColumn, SalaryDataset, SalaryRecord};
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Filter edits coming from the side panel
// ---------------------------------------------------------------------------

/// One user edit to the sidebar selections.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    SelectAll(FilterColumn),
    SelectNone(FilterColumn),
    Set {
        column: FilterColumn,
        value: CategoryValue,
        selected: bool,
    },
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Where `dataset` was loaded from; "Reload" loads it again.
    pub source: DataSource,

    pub dataset: SalaryDataset,

    /// Per-column filter selections.
    pub filters: FilterState,

    /// Indices of records passing the current filters.
    pub visible_indices: Vec<usize>,

    /// Aggregations over the visible records.
    pub report: DashboardReport,

    /// Stable colours for the remote-work categories of the whole dataset.
    pub remote_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig, source: DataSource, dataset: SalaryDataset) -> Self {
        let mut state = Self {
            config,
            source: source.clone(),
            dataset: SalaryDataset::default(),
            filters: FilterState::default(),
            visible_indices: Vec::new(),
            report: DashboardReport::default(),
            remote_colors: ColorMap::new(Vec::<&str>::new()),
            status_message: None,
        };
        state.set_dataset(source, dataset);
        state
    }

    /// Ingest a newly loaded dataset, select every value and recompute.
    pub fn set_dataset(&mut self, source: DataSource, dataset: SalaryDataset) {
        let remote: BTreeSet<&str> = dataset.records.iter().map(|r| r.remote.as_str()).collect();
        self.remote_colors = ColorMap::new(remote);

        self.filters = init_filter_state(&dataset);
        self.dataset = dataset;
        self.source = source;
        self.status_message = None;
        self.refilter();
    }

    /// Re-run filter and aggregation over the current selections.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.filters);
        let report = DashboardReport::build(&self.visible_records(), &self.config);
        self.report = report;
        log::debug!(
            "{} of {} records visible",
            self.visible_indices.len(),
            self.dataset.len()
        );
    }

    pub fn visible_records(&self) -> Vec<&SalaryRecord> {
        select(&self.dataset, &self.visible_indices)
    }

    /// Apply a batch of side-panel edits, recomputing once if anything changed.
    pub fn apply_filter_changes(&mut self, changes: Vec<FilterChange>) {
        if changes.is_empty() {
            return;
        }
        for change in changes {
            match change {
                FilterChange::SelectAll(column) => {
                    let all = self
                        .dataset
                        .unique_values
                        .get(&column)
                        .cloned()
                        .unwrap_or_default();
                    self.filters.insert(column, all);
                }
                FilterChange::SelectNone(column) => {
                    self.filters.insert(column, BTreeSet::new());
                }
                FilterChange::Set {
                    column,
                    value,
                    selected,
                } => {
                    let values = self.filters.entry(column).or_default();
                    if selected {
                        values.insert(value);
                    } else {
                        values.remove(&value);
                    }
                }
            }
        }
        self.refilter();
    }

    /// Load the current source again.
    pub fn reload(&mut self) {
        let source = self.source.clone();
        let result = source.load();
        self.apply_load(source, result);
    }

    /// Replace the dataset with a local file.
    pub fn open_file(&mut self, path: PathBuf) {
        let source = DataSource::File(path);
        let result = source.load();
        self.apply_load(source, result);
    }

    /// A failed load keeps the previous dataset and reports the error.
    fn apply_load(&mut self, source: DataSource, result: Result<SalaryDataset, LoadError>) {
        match result {
            Ok(dataset) => {
                log::info!("Loaded {} salary records from {source}", dataset.len());
                self.set_dataset(source, dataset);
            }
            Err(e) => {
                log::error!("Failed to load {source}: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
