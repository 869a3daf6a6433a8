//! The list-view transformation pipeline: filter, sort, paginate.
//!
//! All functions here are pure over the fetched collection plus a
//! [`ListQuery`] value. The list view re-derives its rows through
//! [`derive_view`] on every draw, so there is never a second copy of the
//! collection to keep coherent.
//!
//! Search uses prefix matching (`starts_with`) on case-folded values.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum::Display;

use crate::vendor::Vendor;

/// Rows-per-page options, cycled in order.
pub const PAGE_SIZES: [usize; 3] = [5, 10, 25];

/// Sortable table columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Column {
    Id,
    Name,
    Contact,
    Email,
    Phone,
    Category,
}

impl Column {
    fn value(self, vendor: &Vendor) -> String {
        match self {
            Self::Id => vendor.id.to_string(),
            Self::Name => vendor.name.clone(),
            Self::Contact => vendor.contact.clone(),
            Self::Email => vendor.email.clone(),
            Self::Phone => vendor.phone.clone(),
            Self::Category => vendor.category.to_string(),
        }
    }
}

/// Scope of a search query: every searchable column, or one of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FilterField {
    #[default]
    All,
    Name,
    Contact,
    Email,
    Phone,
    Category,
}

impl FilterField {
    pub fn next(self) -> Self {
        match self {
            Self::All => Self::Name,
            Self::Name => Self::Contact,
            Self::Contact => Self::Email,
            Self::Email => Self::Phone,
            Self::Phone => Self::Category,
            Self::Category => Self::All,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The complete, serializable view state of the vendor list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: String,
    pub field: FilterField,
    pub sort_column: Column,
    pub sort_direction: SortDirection,
    pub page: usize,
    pub page_size: usize,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            field: FilterField::default(),
            sort_column: Column::Id,
            sort_direction: SortDirection::Asc,
            page: 0,
            page_size: PAGE_SIZES[0],
        }
    }
}

impl ListQuery {
    /// Selecting the active column flips its direction; selecting a new
    /// column starts ascending.
    pub fn toggle_sort(&mut self, column: Column) {
        if self.sort_column == column {
            self.sort_direction = self.sort_direction.toggle();
        } else {
            self.sort_column = column;
            self.sort_direction = SortDirection::Asc;
        }
    }

    /// Advances to the next rows-per-page option and resets to the first
    /// page, so the view never lands past the end of the shrunken range.
    pub fn cycle_page_size(&mut self) {
        let i = PAGE_SIZES
            .iter()
            .position(|&s| s == self.page_size)
            .unwrap_or(0);
        self.page_size = PAGE_SIZES[(i + 1) % PAGE_SIZES.len()];
        self.page = 0;
    }
}

/// Retains records whose case-folded value starts with the case-folded
/// query. An empty query retains everything.
pub fn filter<'a>(records: &'a [Vendor], query: &str, field: FilterField) -> Vec<&'a Vendor> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|v| {
            if query.is_empty() {
                return true;
            }
            let matches = |value: String| value.to_lowercase().starts_with(&query);
            match field {
                FilterField::All => [
                    Column::Name,
                    Column::Contact,
                    Column::Email,
                    Column::Phone,
                    Column::Category,
                ]
                .into_iter()
                .any(|c| matches(c.value(v))),
                FilterField::Name => matches(Column::Name.value(v)),
                FilterField::Contact => matches(Column::Contact.value(v)),
                FilterField::Email => matches(Column::Email.value(v)),
                FilterField::Phone => matches(Column::Phone.value(v)),
                FilterField::Category => matches(Column::Category.value(v)),
            }
        })
        .collect()
}

/// Stable sort by a column. `Id` compares numerically, text columns compare
/// case-folded; ties keep their prior relative order.
pub fn sort<'a>(
    mut rows: Vec<&'a Vendor>,
    column: Column,
    direction: SortDirection,
) -> Vec<&'a Vendor> {
    rows.sort_by(|a, b| {
        let ordering = match column {
            Column::Id => a.id.cmp(&b.id),
            _ => compare_text(&column.value(a), &column.value(b)),
        };
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
    rows
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// The contiguous slice `[page * size, page * size + size)`.
pub fn paginate<'a>(rows: &[&'a Vendor], page: usize, size: usize) -> Vec<&'a Vendor> {
    if size == 0 {
        return Vec::new();
    }
    rows.iter()
        .skip(page * size)
        .take(size)
        .copied()
        .collect()
}

/// A fully derived view of the collection for one draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<'a> {
    /// Filtered and sorted rows, in display order. This is what exports.
    pub rows: Vec<&'a Vendor>,
    /// The rows of the current page.
    pub page_rows: Vec<&'a Vendor>,
    /// Page actually shown, clamped to the last non-empty page.
    pub page: usize,
    pub page_count: usize,
}

/// Runs the whole pipeline. The page index is clamped rather than trusted,
/// since deletions and refilters can shrink the row set under the query.
pub fn derive_view<'a>(records: &'a [Vendor], query: &ListQuery) -> ListView<'a> {
    let rows = sort(
        filter(records, &query.search, query.field),
        query.sort_column,
        query.sort_direction,
    );
    let page_count = rows.len().div_ceil(query.page_size).max(1);
    let page = query.page.min(page_count - 1);
    let page_rows = paginate(&rows, page, query.page_size);
    ListView {
        rows,
        page_rows,
        page,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::vendor::Category;

    fn vendor(id: u64, name: &str, contact: &str, category: Category) -> Vendor {
        Vendor {
            id,
            name: name.to_string(),
            contact: contact.to_string(),
            email: format!("{}@{}.com", contact.to_lowercase(), name.to_lowercase()),
            phone: format!("55{id}"),
            address: format!("{id} Main St"),
            category,
        }
    }

    fn sample() -> Vec<Vendor> {
        vec![
            vendor(1, "Acme", "Jo", Category::Utensils),
            vendor(2, "Beta", "Al", Category::Packaging),
        ]
    }

    #[test]
    fn test_empty_query_retains_all() {
        let records = sample();
        assert_eq!(filter(&records, "", FilterField::All).len(), 2);
    }

    #[test]
    fn test_filter_all_fields_prefix() {
        let records = sample();
        let result = filter(&records, "acme", FilterField::All);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, 1);
    }

    #[test]
    fn test_filter_is_prefix_not_substring() {
        let records = sample();
        // "cme" is a substring of "Acme" but not a prefix of any field.
        assert!(filter(&records, "cme", FilterField::All).is_empty());
    }

    #[rstest]
    #[case(FilterField::Name, "be", 2)]
    #[case(FilterField::Contact, "jo", 1)]
    #[case(FilterField::Category, "pack", 2)]
    #[case(FilterField::Phone, "552", 2)]
    fn test_filter_single_field(
        #[case] field: FilterField,
        #[case] query: &str,
        #[case] expected_id: u64,
    ) {
        let records = sample();
        let result = filter(&records, query, field);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, expected_id);
    }

    #[test]
    fn test_filter_named_field_ignores_others() {
        let records = sample();
        // "jo" only appears in Acme's contact, not in any name.
        assert!(filter(&records, "jo", FilterField::Name).is_empty());
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = sample();
        let once: Vec<Vendor> = filter(&records, "a", FilterField::All)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter(&once, "a", FilterField::All);
        assert_eq!(once.iter().collect::<Vec<_>>(), twice);
    }

    #[test]
    fn test_sort_name_desc() {
        let records = sample();
        let rows = sort(records.iter().collect(), Column::Name, SortDirection::Desc);
        let names: Vec<&str> = rows.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Acme"]);
    }

    #[test]
    fn test_sort_is_idempotent_and_reversible() {
        let records = vec![
            vendor(3, "Gamma", "Cy", Category::Containers),
            vendor(1, "Acme", "Jo", Category::Utensils),
            vendor(2, "Beta", "Al", Category::Packaging),
        ];
        let asc = sort(records.iter().collect(), Column::Name, SortDirection::Asc);
        let asc_twice = sort(asc.clone(), Column::Name, SortDirection::Asc);
        assert_eq!(asc, asc_twice);

        let desc = sort(records.iter().collect(), Column::Name, SortDirection::Desc);
        let mut reversed = asc;
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sort_id_is_numeric() {
        let records = vec![
            vendor(10, "Ten", "Te", Category::Utensils),
            vendor(2, "Two", "Tw", Category::Utensils),
        ];
        let rows = sort(records.iter().collect(), Column::Id, SortDirection::Asc);
        let ids: Vec<u64> = rows.iter().map(|v| v.id).collect();
        // Lexicographic ordering would put "10" before "2".
        assert_eq!(ids, vec![2, 10]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let records = vec![
            vendor(1, "Same", "A", Category::Utensils),
            vendor(2, "Same", "B", Category::Utensils),
            vendor(3, "Same", "C", Category::Utensils),
        ];
        let rows = sort(records.iter().collect(), Column::Name, SortDirection::Asc);
        let ids: Vec<u64> = rows.iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[rstest]
    #[case(5, 13)]
    #[case(10, 13)]
    #[case(25, 13)]
    #[case(5, 5)]
    #[case(5, 0)]
    fn test_pages_partition_collection(#[case] size: usize, #[case] count: u64) {
        let records: Vec<Vendor> = (1..=count)
            .map(|i| vendor(i, &format!("V{i}"), "X", Category::Utensils))
            .collect();
        let rows: Vec<&Vendor> = records.iter().collect();

        let page_count = rows.len().div_ceil(size).max(1);
        let mut reassembled = Vec::new();
        for page in 0..page_count {
            reassembled.extend(paginate(&rows, page, size));
        }
        assert_eq!(reassembled, rows);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut query = ListQuery {
            page: 3,
            ..ListQuery::default()
        };
        query.cycle_page_size();
        assert_eq!(query.page_size, 10);
        assert_eq!(query.page, 0);
    }

    #[test]
    fn test_toggle_sort() {
        let mut query = ListQuery::default();
        query.toggle_sort(Column::Name);
        assert_eq!(query.sort_column, Column::Name);
        assert_eq!(query.sort_direction, SortDirection::Asc);
        query.toggle_sort(Column::Name);
        assert_eq!(query.sort_direction, SortDirection::Desc);
        query.toggle_sort(Column::Id);
        assert_eq!(query.sort_direction, SortDirection::Asc);
    }

    #[test]
    fn test_derive_view_clamps_page() {
        let records: Vec<Vendor> = (1..=6)
            .map(|i| vendor(i, &format!("V{i}"), "X", Category::Utensils))
            .collect();
        let query = ListQuery {
            page: 9,
            ..ListQuery::default()
        };
        let view = derive_view(&records, &query);
        assert_eq!(view.page_count, 2);
        assert_eq!(view.page, 1);
        assert_eq!(view.page_rows.len(), 1);
    }

    #[test]
    fn test_derive_view_empty_collection() {
        let view = derive_view(&[], &ListQuery::default());
        assert_eq!(view.page_count, 1);
        assert_eq!(view.page, 0);
        assert!(view.page_rows.is_empty());
    }
}
