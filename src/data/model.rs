use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Columns every input file must carry, in the order the table shows them.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "ano",
    "senioridade",
    "contrato",
    "porte_empresa",
    "cargo",
    "usd",
    "remoto",
    "residencia_iso3",
];

// ---------------------------------------------------------------------------
// FilterColumn – the four sidebar filters
// ---------------------------------------------------------------------------

/// A categorical column the sidebar can filter on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterColumn {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl FilterColumn {
    pub const ALL: [FilterColumn; 4] = [
        FilterColumn::Year,
        FilterColumn::Seniority,
        FilterColumn::Contract,
        FilterColumn::CompanySize,
    ];

    /// Human-readable label shown in the side panel.
    pub fn label(self) -> &'static str {
        match self {
            FilterColumn::Year => "Year",
            FilterColumn::Seniority => "Seniority",
            FilterColumn::Contract => "Contract type",
            FilterColumn::CompanySize => "Company size",
        }
    }

    /// Name of the source column in the input file.
    pub fn column_name(self) -> &'static str {
        match self {
            FilterColumn::Year => "ano",
            FilterColumn::Seniority => "senioridade",
            FilterColumn::Contract => "contrato",
            FilterColumn::CompanySize => "porte_empresa",
        }
    }
}

impl fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// CategoryValue – a single cell in a filter column
// ---------------------------------------------------------------------------

/// An ordered category value. Integers sort numerically, text lexically,
/// so a `BTreeSet<CategoryValue>` lists the sidebar options in order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CategoryValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for CategoryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryValue::Integer(i) => write!(f, "{i}"),
            CategoryValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryRecord – one row of the dataset
// ---------------------------------------------------------------------------

/// A single salary observation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalaryRecord {
    #[serde(rename = "ano", deserialize_with = "deserialize_year")]
    pub year: i64,
    #[serde(rename = "senioridade")]
    pub seniority: String,
    #[serde(rename = "contrato")]
    pub contract: String,
    #[serde(rename = "porte_empresa")]
    pub company_size: String,
    #[serde(rename = "cargo")]
    pub role: String,
    /// Annual salary in USD.
    #[serde(rename = "usd")]
    pub salary_usd: f64,
    #[serde(rename = "remoto")]
    pub remote: String,
    #[serde(rename = "residencia_iso3")]
    pub residence_iso3: String,
}

impl SalaryRecord {
    /// The record's value in one of the filter columns.
    pub fn category(&self, column: FilterColumn) -> CategoryValue {
        match column {
            FilterColumn::Year => CategoryValue::Integer(self.year),
            FilterColumn::Seniority => CategoryValue::Text(self.seniority.clone()),
            FilterColumn::Contract => CategoryValue::Text(self.contract.clone()),
            FilterColumn::CompanySize => CategoryValue::Text(self.company_size.clone()),
        }
    }

    /// Cell texts in [`REQUIRED_COLUMNS`] order, for the records table.
    pub fn cells(&self) -> [String; 8] {
        [
            self.year.to_string(),
            self.seniority.clone(),
            self.contract.clone(),
            self.company_size.clone(),
            self.role.clone(),
            format!("{:.0}", self.salary_usd),
            self.remote.clone(),
            self.residence_iso3.clone(),
        ]
    }
}

/// Accept `2023`, `2023.0` and `"2023"` alike; dataframe exports often
/// write integer columns as floats.
fn deserialize_year<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum YearRepr {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match YearRepr::deserialize(deserializer)? {
        YearRepr::Int(i) => Ok(i),
        YearRepr::Float(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
        YearRepr::Float(f) => Err(serde::de::Error::custom(format!(
            "year {f} is not a whole number"
        ))),
        YearRepr::Text(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                return Ok(i);
            }
            match trimmed.parse::<f64>() {
                Ok(f) if f.fract() == 0.0 && f.is_finite() => Ok(f as i64),
                _ => Err(serde::de::Error::custom(format!("invalid year '{s}'"))),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// SalaryDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed distinct values per filter column.
#[derive(Debug, Clone, Default)]
pub struct SalaryDataset {
    /// All records, in input order.
    pub records: Vec<SalaryRecord>,
    /// For each filter column the sorted set of distinct values.
    pub unique_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>>,
}

impl SalaryDataset {
    /// Build column indices from the loaded records.
    pub fn from_records(records: Vec<SalaryRecord>) -> Self {
        let mut unique_values: BTreeMap<FilterColumn, BTreeSet<CategoryValue>> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, BTreeSet::new()))
            .collect();

        for record in &records {
            for col in FilterColumn::ALL {
                unique_values
                    .entry(col)
                    .or_default()
                    .insert(record.category(col));
            }
        }

        SalaryDataset {
            records,
            unique_values,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
