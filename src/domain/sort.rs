// src/domain/sort.rs

use std::cmp::Ordering;

use crate::domain::listing::ListingRecord;
use crate::domain::score::score_label;

/// How a column's cell text is compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    /// Leading `$` stripped, then compared as a number.
    Currency,
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Sortable columns of the listing table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Address,
    Rent,
    Beds,
    Baths,
    Score,
    Source,
}

impl Column {
    pub const ALL: [Column; 6] = [
        Column::Address,
        Column::Rent,
        Column::Beds,
        Column::Baths,
        Column::Score,
        Column::Source,
    ];

    pub fn kind(self) -> ColumnKind {
        match self {
            Column::Address | Column::Source => ColumnKind::Text,
            Column::Rent => ColumnKind::Currency,
            Column::Beds | Column::Baths | Column::Score => ColumnKind::Numeric,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Column::Address => "address",
            Column::Rent => "rent",
            Column::Beds => "beds",
            Column::Baths => "baths",
            Column::Score => "score",
            Column::Source => "source",
        }
    }

    pub fn parse(slug: &str) -> Option<Self> {
        Column::ALL.into_iter().find(|c| c.slug() == slug)
    }

    pub fn title(self) -> &'static str {
        match self {
            Column::Address => "Address",
            Column::Rent => "Rent",
            Column::Beds => "Beds",
            Column::Baths => "Baths",
            Column::Score => "Score",
            Column::Source => "Source",
        }
    }

    /// The text shown in this column's cell for a record.
    pub fn cell_text(self, record: &ListingRecord) -> String {
        let h = &record.housing_data;
        match self {
            Column::Address => h.address.clone(),
            Column::Rent => format!("${}", opt_number(h.rent)),
            Column::Beds => opt_number(h.beds),
            Column::Baths => opt_number(h.baths),
            Column::Score => score_label(record.char_output.score),
            Column::Source => h.source.clone(),
        }
    }
}

/// `--` stands in for missing numbers.
pub fn opt_number(v: Option<f64>) -> String {
    v.map(|n| n.to_string()).unwrap_or_else(|| "--".to_string())
}

/// Per-table sort memory. The direction flag flips on every click,
/// whichever column was clicked; the first click sorts descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<Column>,
    pub descending: bool,
}

impl SortState {
    pub fn toggle(&mut self, column: Column) -> SortDirection {
        self.descending = !self.descending;
        self.column = Some(column);
        self.direction()
    }

    pub fn direction(&self) -> SortDirection {
        if self.descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }
}

/// Case-insensitive, ties broken by byte order.
fn text_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

fn parse_number(kind: ColumnKind, text: &str) -> Option<f64> {
    let text = text.trim();
    let text = match kind {
        ColumnKind::Currency => text.strip_prefix('$').unwrap_or(text),
        _ => text,
    };
    text.replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|n| !n.is_nan())
}

/// Stable sort of `rows` by the text `key` yields for each row.
///
/// Descending order is the exact reverse of ascending order. For numeric and
/// currency columns, rows whose key is not a number always come last, in their
/// original relative order, whichever direction is requested.
pub fn sort_rows<T, F>(rows: &mut Vec<T>, kind: ColumnKind, direction: SortDirection, key: F)
where
    F: Fn(&T) -> String,
{
    match kind {
        ColumnKind::Text => {
            rows.sort_by(|a, b| text_cmp(&key(a), &key(b)));
            if direction == SortDirection::Descending {
                rows.reverse();
            }
        }
        ColumnKind::Currency | ColumnKind::Numeric => {
            let mut numbers = Vec::new();
            let mut invalid = Vec::new();
            for row in rows.drain(..) {
                match parse_number(kind, &key(&row)) {
                    Some(n) => numbers.push((n, row)),
                    None => invalid.push(row),
                }
            }

            numbers.sort_by(|(a, _), (b, _)| a.total_cmp(b));
            if direction == SortDirection::Descending {
                numbers.reverse();
            }

            rows.extend(numbers.into_iter().map(|(_, row)| row));
            rows.extend(invalid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(values: &[&str], kind: ColumnKind, direction: SortDirection) -> Vec<String> {
        let mut rows: Vec<String> = values.iter().map(|s| s.to_string()).collect();
        sort_rows(&mut rows, kind, direction, |s| s.clone());
        rows
    }

    #[test]
    fn currency_compares_numerically() {
        let rows = sorted(&["$900", "$1500", "$1200"], ColumnKind::Currency, SortDirection::Ascending);
        assert_eq!(rows, vec!["$900", "$1200", "$1500"]);
    }

    #[test]
    fn nan_trails_in_both_directions() {
        let input = ["2", "--", "1", "3"];
        assert_eq!(
            sorted(&input, ColumnKind::Numeric, SortDirection::Ascending),
            vec!["1", "2", "3", "--"]
        );
        assert_eq!(
            sorted(&input, ColumnKind::Numeric, SortDirection::Descending),
            vec!["3", "2", "1", "--"]
        );
    }

    #[test]
    fn descending_is_exact_reverse_of_ascending() {
        let input = ["Maple", "apple", "Banana", "apple", "cherry"];
        let asc = sorted(&input, ColumnKind::Text, SortDirection::Ascending);
        let mut desc = sorted(&input, ColumnKind::Text, SortDirection::Descending);
        desc.reverse();
        assert_eq!(asc, desc);
        assert_eq!(asc, vec!["apple", "apple", "Banana", "cherry", "Maple"]);
    }

    #[test]
    fn toggle_flips_across_columns() {
        let mut state = SortState::default();
        assert_eq!(state.toggle(Column::Rent), SortDirection::Descending);
        assert_eq!(state.toggle(Column::Rent), SortDirection::Ascending);
        assert_eq!(state.toggle(Column::Address), SortDirection::Descending);
        assert_eq!(state.column, Some(Column::Address));
    }

    #[test]
    fn cell_text_uses_placeholders() {
        let record = ListingRecord::default();
        assert_eq!(Column::Rent.cell_text(&record), "$--");
        assert_eq!(Column::Beds.cell_text(&record), "--");
        assert_eq!(Column::Score.cell_text(&record), "0.00");
    }
}
