/// Core sorting logic.
///
/// Multi-key ordering is built from repeated single-key stable sorts, applied
/// from the least significant parameter to the most significant one.
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::compare::compare_values;
use super::key::SortParam;
use super::value::Fields;

/// What to sort by.
///
/// Deserializes from `null`, a string, or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Criteria {
    /// No sorting.
    #[default]
    None,
    Single(String),
    /// Parameters in priority order, most significant first.
    Many(Vec<String>),
}

impl Criteria {
    /// Returns true if sorting with these criteria leaves any collection unchanged.
    pub fn is_empty(&self) -> bool {
        match self {
            Criteria::None => true,
            Criteria::Single(_) => false,
            Criteria::Many(params) => params.is_empty(),
        }
    }
}

impl From<&str> for Criteria {
    fn from(s: &str) -> Self {
        Criteria::Single(s.to_string())
    }
}

impl From<String> for Criteria {
    fn from(s: String) -> Self {
        Criteria::Single(s)
    }
}

impl From<&String> for Criteria {
    fn from(s: &String) -> Self {
        Criteria::Single(s.clone())
    }
}

impl From<Vec<String>> for Criteria {
    fn from(v: Vec<String>) -> Self {
        Criteria::Many(v)
    }
}

impl From<Vec<&str>> for Criteria {
    fn from(v: Vec<&str>) -> Self {
        Criteria::Many(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Criteria {
    fn from(v: &[&str]) -> Self {
        Criteria::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Criteria {
    fn from(v: [&str; N]) -> Self {
        Criteria::Many(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<&Criteria> for Criteria {
    fn from(c: &Criteria) -> Self {
        c.clone()
    }
}

impl<C: Into<Criteria>> From<Option<C>> for Criteria {
    fn from(c: Option<C>) -> Self {
        c.map_or(Criteria::None, Into::into)
    }
}

/// Sort `records` in place.
///
/// `None` or an empty list leaves the records untouched. A list is applied
/// so that its first parameter dominates the final order. The criteria
/// themselves are never modified.
pub fn sort<T: Fields>(records: &mut [T], criteria: impl Into<Criteria>) {
    match criteria.into() {
        Criteria::None => debug!("no sort criteria, leaving {} records as-is", records.len()),
        Criteria::Single(raw) => sort_by_param(records, &raw),
        Criteria::Many(raws) => sort_by_params(records, &raws),
    }
}

/// Apply a list of parameters, most significant first.
///
/// Passes run in reverse so the first parameter is sorted last; stability
/// keeps earlier passes as tie-breakers.
pub fn sort_by_params<T: Fields, S: AsRef<str>>(records: &mut [T], params: &[S]) {
    if params.is_empty() {
        debug!("empty sort parameter list, leaving {} records as-is", records.len());
        return;
    }
    for raw in params.iter().rev() {
        sort_by_param(records, raw.as_ref());
    }
}

/// Apply a single parameter with one stable sort pass.
pub fn sort_by_param<T: Fields>(records: &mut [T], raw: &str) {
    sort_with(records, &SortParam::parse(raw));
}

/// Stable sort by an already-parsed parameter.
///
/// Each record's key is looked up and coerced once per pass.
pub fn sort_with<T: Fields>(records: &mut [T], param: &SortParam) {
    trace!(
        field = %param.field,
        direction = ?param.direction,
        kind = param.kind.as_str(),
        records = records.len(),
        "sort pass"
    );
    let order: Vec<usize> = {
        let mut entries: Vec<_> = records
            .iter()
            .enumerate()
            .map(|(i, r)| (param.key(r), i))
            .collect();
        // slice::sort_by is stable.
        entries.sort_by(|a, b| compare_values(&a.0, &b.0, param.direction));
        entries.into_iter().map(|(_, i)| i).collect()
    };
    apply_order(records, order);
}

/// Rearrange `records` so that position `i` holds the record that was at `order[i]`.
pub(super) fn apply_order<T>(records: &mut [T], mut order: Vec<usize>) {
    for start in 0..order.len() {
        let mut cur = start;
        while order[cur] != cur {
            let next = order[cur];
            order[cur] = cur;
            if next == start {
                break;
            }
            records.swap(cur, next);
            cur = next;
        }
    }
}
