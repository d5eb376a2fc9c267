use crate::config::{AxisFilter, FilterOperator};

/// Axis filter reduced to a directly testable form.
///
/// List operators collapse to either a closed interval or a sorted,
/// de-duplicated value set; malformed or empty filters become `Nothing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    Nothing,
    Between { min: i64, max: i64 },
    OneOf(Vec<i64>),
}

impl Predicate {
    pub fn compile(filter: &AxisFilter) -> Self {
        match filter {
            AxisFilter::Range { range } => Self::between(range.min, range.max),
            AxisFilter::List { list, operator } => Self::compile_list(list, *operator),
            AxisFilter::Malformed => Predicate::Nothing,
        }
    }

    fn compile_list(list: &[i64], operator: FilterOperator) -> Self {
        let (Some(&lo), Some(&hi)) = (list.iter().min(), list.iter().max()) else {
            return Predicate::Nothing;
        };

        match operator {
            FilterOperator::Equals => Self::one_of(list),
            FilterOperator::Gt => Self::between(lo.saturating_add(1), i64::MAX),
            FilterOperator::Gte => Self::between(lo, i64::MAX),
            FilterOperator::Lt => Self::between(i64::MIN, hi.saturating_sub(1)),
            FilterOperator::Lte => Self::between(i64::MIN, hi),
            FilterOperator::Range if list.len() >= 2 => Self::between(lo, hi),
            FilterOperator::Range => Self::one_of(list),
            FilterOperator::Unknown => Predicate::Nothing,
        }
    }

    fn between(min: i64, max: i64) -> Self {
        if min > max {
            Predicate::Nothing
        } else {
            Predicate::Between { min, max }
        }
    }

    fn one_of(list: &[i64]) -> Self {
        let mut values = list.to_vec();
        values.sort_unstable();
        values.dedup();
        Predicate::OneOf(values)
    }

    pub fn test(&self, value: i64) -> bool {
        match self {
            Predicate::Nothing => false,
            Predicate::Between { min, max } => value >= *min && value <= *max,
            Predicate::OneOf(values) => values.binary_search(&value).is_ok(),
        }
    }
}

/// Whether `value` passes `filter`.
pub fn matches(value: i64, filter: &AxisFilter) -> bool {
    Predicate::compile(filter).test(value)
}

/// 0-based indices in `0..count` whose 1-based number passes `filter`.
///
/// Values that fall outside the axis are dropped.
///
/// # Examples
///
/// ```
/// use chronogrid::compute::filter::select;
/// use chronogrid::{AxisFilter, FilterOperator};
///
/// assert_eq!(select(10, &AxisFilter::range(3, 5)), vec![2, 3, 4]);
/// assert_eq!(select(10, &AxisFilter::list(vec![7, 1, 7, 42])), vec![0, 6]);
/// assert_eq!(select(5, &AxisFilter::list_with(vec![3], FilterOperator::Gt)), vec![3, 4]);
/// assert!(select(5, &AxisFilter::list(vec![])).is_empty());
/// ```
pub fn select(count: usize, filter: &AxisFilter) -> Vec<usize> {
    let upper = i64::try_from(count).unwrap_or(i64::MAX);

    match Predicate::compile(filter) {
        Predicate::Nothing => Vec::new(),
        Predicate::Between { min, max } => {
            let lo = min.max(1);
            let hi = max.min(upper);
            if lo > hi {
                return Vec::new();
            }
            ((lo - 1) as usize..hi as usize).collect()
        }
        Predicate::OneOf(values) => values
            .into_iter()
            .filter(|value| (1..=upper).contains(value))
            .map(|value| (value - 1) as usize)
            .collect(),
    }
}

/// 0-based indices in `0..count` whose derived value passes `filter`.
pub fn select_by<F>(count: usize, filter: &AxisFilter, value_of: F) -> Vec<usize>
where
    F: Fn(usize) -> i64,
{
    let predicate = Predicate::compile(filter);
    if predicate == Predicate::Nothing {
        return Vec::new();
    }
    (0..count)
        .filter(|&index| predicate.test(value_of(index)))
        .collect()
}
