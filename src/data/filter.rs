use std::collections::{BTreeMap, BTreeSet};

use super::model::{CategoryValue, FilterColumn, SalaryDataset, SalaryRecord};

// ---------------------------------------------------------------------------
// Filter predicate: which distinct values are selected per column
// ---------------------------------------------------------------------------

/// Per-column selection state: maps filter column → set of selected values.
/// A column absent from the map places no constraint; an empty set for a
/// present column matches nothing.
pub type FilterState = BTreeMap<FilterColumn, BTreeSet<CategoryValue>>;

/// Initialise a [`FilterState`] with all values selected (i.e., show everything).
pub fn init_filter_state(dataset: &SalaryDataset) -> FilterState {
    dataset
        .unique_values
        .iter()
        .map(|(col, vals)| (*col, vals.clone()))
        .collect()
}

/// Return indices, in input order, of records that pass all active filters.
///
/// A record passes a column filter when:
/// * The column is not present in `filters` → passes (no constraint)
/// * The filter set for that column is empty → nothing selected → fails
/// * The record's value for that column is in the selected set → passes
pub fn filtered_indices(dataset: &SalaryDataset, filters: &FilterState) -> Vec<usize> {
    if filters.values().any(|selected| selected.is_empty()) {
        return Vec::new();
    }

    // Columns where every distinct value is selected cannot reject anything.
    let active: Vec<(FilterColumn, &BTreeSet<CategoryValue>)> = filters
        .iter()
        .filter(|(col, selected)| {
            dataset
                .unique_values
                .get(*col)
                .map_or(true, |all_vals| !all_vals.is_subset(selected))
        })
        .map(|(col, selected)| (*col, selected))
        .collect();

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, record)| {
            active
                .iter()
                .all(|(col, selected)| selected.contains(&record.category(*col)))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Borrow the records at `indices`.
pub fn select<'a>(dataset: &'a SalaryDataset, indices: &[usize]) -> Vec<&'a SalaryRecord> {
    indices
        .iter()
        .filter_map(|&i| dataset.records.get(i))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::{make_record, sample_records};

    fn dataset() -> SalaryDataset {
        let mut records = sample_records();
        records.push(make_record(2022, "Senior", "PJ", "Media", "Data Engineer", 95000.0, "Hibrido", "PRT"));
        records.push(make_record(2024, "Pleno", "CLT", "Grande", "Data Scientist", 80000.0, "Remoto", "BRA"));
        SalaryDataset::from_records(records)
    }

    fn set(values: &[&str]) -> BTreeSet<CategoryValue> {
        values
            .iter()
            .map(|&v| CategoryValue::Text(v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_state_selects_everything() {
        let ds = dataset();
        let filters = init_filter_state(&ds);
        assert_eq!(filtered_indices(&ds, &filters), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_single_column_filter() {
        let ds = SalaryDataset::from_records(sample_records());
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Seniority, set(&["Senior"]));

        let indices = filtered_indices(&ds, &filters);
        assert_eq!(indices, vec![0]);
        assert_eq!(select(&ds, &indices)[0].role, "Data Scientist");
    }

    #[test]
    fn test_empty_selection_yields_empty_view() {
        let ds = dataset();
        for col in FilterColumn::ALL {
            let mut filters = init_filter_state(&ds);
            filters.insert(col, BTreeSet::new());
            assert!(filtered_indices(&ds, &filters).is_empty(), "column {col}");
        }
    }

    #[test]
    fn test_missing_column_places_no_constraint() {
        let ds = dataset();
        let mut filters = FilterState::new();
        filters.insert(FilterColumn::Contract, set(&["PJ"]));
        assert_eq!(filtered_indices(&ds, &filters), vec![2]);
    }

    #[test]
    fn test_columns_are_combined_with_and() {
        let ds = dataset();
        let mut filters = init_filter_state(&ds);
        filters.insert(FilterColumn::Contract, set(&["CLT"]));
        filters.insert(FilterColumn::CompanySize, set(&["Grande"]));
        filters.insert(
            FilterColumn::Year,
            [CategoryValue::Integer(2024)].into_iter().collect(),
        );
        assert_eq!(filtered_indices(&ds, &filters), vec![3]);
    }

    /// Every combination of subsets over the four columns matches a brute-force AND.
    #[test]
    fn test_matches_brute_force_for_all_combinations() {
        let ds = dataset();
        let columns: Vec<(FilterColumn, Vec<CategoryValue>)> = FilterColumn::ALL
            .iter()
            .map(|&col| (col, ds.unique_values[&col].iter().cloned().collect()))
            .collect();

        // Enumerate subsets of the first two values of each column (4 per column).
        let masks = 0..(1u32 << (2 * columns.len()));
        for mask in masks {
            let mut filters = FilterState::new();
            for (c, (col, values)) in columns.iter().enumerate() {
                let bits = (mask >> (2 * c)) & 0b11;
                let mut selected: BTreeSet<CategoryValue> = values
                    .iter()
                    .take(2)
                    .enumerate()
                    .filter(|(i, _)| bits & (1 << i) != 0)
                    .map(|(_, v)| v.clone())
                    .collect();
                // Keep any values past the first two selected.
                selected.extend(values.iter().skip(2).cloned());
                filters.insert(*col, selected);
            }

            let expected: Vec<usize> = ds
                .records
                .iter()
                .enumerate()
                .filter(|(_, r)| {
                    filters
                        .iter()
                        .all(|(col, sel)| sel.contains(&r.category(*col)))
                })
                .map(|(i, _)| i)
                .collect();
            assert_eq!(filtered_indices(&ds, &filters), expected, "mask {mask:#b}");
        }
    }

    #[test]
    fn test_select_skips_out_of_range_indices() {
        let ds = SalaryDataset::from_records(sample_records());
        assert_eq!(select(&ds, &[1, 7]).len(), 1);
    }
}
