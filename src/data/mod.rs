/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  HTTP .csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse → SalaryDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SalaryDataset │  Vec<SalaryRecord>, distinct values per filter column
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  "value ∈ selected set" on all four columns → indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  metrics, top-N means, histogram, shares → DashboardReport
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
