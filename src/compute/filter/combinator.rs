use super::predicate::select_by;
use crate::compute::temporal::TemporalIndexer;
use crate::config::{RowFilter, TemporalDimension};
use smallvec::SmallVec;
use std::collections::BTreeMap;

/// Row filters sharing one temporal dimension.
pub type FilterGroup<'a> = SmallVec<[&'a RowFilter; 4]>;

/// Group row filters by their temporal dimension, in dimension order.
pub fn group_by_dimension(filters: &[RowFilter]) -> BTreeMap<TemporalDimension, FilterGroup<'_>> {
    let mut groups: BTreeMap<TemporalDimension, FilterGroup<'_>> = BTreeMap::new();
    for filter in filters {
        groups.entry(filter.indexing_type).or_default().push(filter);
    }
    groups
}

/// Rows in `0..total_rows` selected by a single row filter.
pub fn select_row_filter(
    filter: &RowFilter,
    total_rows: usize,
    indexer: &TemporalIndexer<'_>,
) -> Vec<usize> {
    select_by(total_rows, &filter.filter, |row| {
        indexer.derive_value(row, filter.indexing_type)
    })
}

/// Combine row filters into the sorted, de-duplicated set of matching rows.
///
/// No filters selects every row.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::filter::combine;
/// use chronogrid::compute::temporal::TemporalIndexer;
/// use chronogrid::{AxisFilter, RowFilter, TemporalDimension};
///
/// let indexer = TemporalIndexer::sequential();
/// let filters = vec![
///     RowFilter::new(TemporalDimension::DayOfYear, AxisFilter::list(vec![2])),
///     RowFilter::new(TemporalDimension::DayOfYear, AxisFilter::list(vec![5])),
/// ];
/// assert_eq!(combine(&filters, 10, &indexer), vec![1, 4]);
/// assert_eq!(combine(&[], 3, &indexer), vec![0, 1, 2]);
/// ```
pub fn combine(rows_filters: &[RowFilter], total_rows: usize, indexer: &TemporalIndexer<'_>) -> Vec<usize> {
    combine_with(rows_filters, total_rows, |filter| {
        select_row_filter(filter, total_rows, indexer)
    })
}

/// Combine row filters using `select` to resolve each filter's own rows.
///
/// `select` must return sorted indices within `0..total_rows`; callers use
/// this entry point to serve per-filter selections from a cache.
pub fn combine_with<F, S>(rows_filters: &[RowFilter], total_rows: usize, mut select: F) -> Vec<usize>
where
    F: FnMut(&RowFilter) -> S,
    S: AsRef<[usize]>,
{
    match rows_filters {
        [] => (0..total_rows).collect(),
        [single] => select(single).as_ref().to_vec(),
        _ => {
            let mut selected = vec![true; total_rows];

            for group in group_by_dimension(rows_filters).values() {
                let mut union = vec![false; total_rows];
                for &filter in group {
                    for &row in select(filter).as_ref() {
                        if let Some(slot) = union.get_mut(row) {
                            *slot = true;
                        }
                    }
                }
                for (keep, matched) in selected.iter_mut().zip(&union) {
                    *keep &= *matched;
                }
            }

            selected
                .iter()
                .enumerate()
                .filter_map(|(row, &keep)| keep.then_some(row))
                .collect()
        }
    }
}
