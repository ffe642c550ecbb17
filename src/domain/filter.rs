// src/domain/filter.rs

use std::collections::BTreeSet;

use crate::domain::listing::ListingRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterDimension {
    Neighborhood,
    Suburb,
    City,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::Neighborhood,
        FilterDimension::Suburb,
        FilterDimension::City,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterDimension::Neighborhood => "neighborhood",
            FilterDimension::Suburb => "suburb",
            FilterDimension::City => "city",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "neighborhood" => Some(FilterDimension::Neighborhood),
            "suburb" => Some(FilterDimension::Suburb),
            "city" => Some(FilterDimension::City),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterDimension::Neighborhood => "Neighborhood",
            FilterDimension::Suburb => "Suburb",
            FilterDimension::City => "City",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub neighborhood: BTreeSet<String>,
    pub suburb: BTreeSet<String>,
    pub city: BTreeSet<String>,
}

impl FilterSelection {
    pub fn values(&self, dim: FilterDimension) -> &BTreeSet<String> {
        match dim {
            FilterDimension::Neighborhood => &self.neighborhood,
            FilterDimension::Suburb => &self.suburb,
            FilterDimension::City => &self.city,
        }
    }

    pub fn values_mut(&mut self, dim: FilterDimension) -> &mut BTreeSet<String> {
        match dim {
            FilterDimension::Neighborhood => &mut self.neighborhood,
            FilterDimension::Suburb => &mut self.suburb,
            FilterDimension::City => &mut self.city,
        }
    }

    pub fn is_empty(&self) -> bool {
        FilterDimension::ALL
            .iter()
            .all(|dim| self.values(*dim).is_empty())
    }

    /// Build a selection from `dimension=value` pairs (a submitted form).
    /// Unknown dimensions and blank values are ignored.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut selection = FilterSelection::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match FilterDimension::parse(key) {
                Some(dim) => {
                    selection.values_mut(dim).insert(value.to_string());
                }
                None => log::debug!("Ignoring unknown filter dimension '{key}'"),
            }
        }
        selection
    }

    /// A record passes when no filter is active, or when it matches any
    /// selected value in any dimension.
    ///
    /// Dimensions are OR'd together: a neighborhood match shows the record even
    /// if it fails an active city filter.
    // TODO: switch to intersection across dimensions once the intended
    // semantics are confirmed with the people using the board.
    pub fn passes(&self, record: &ListingRecord) -> bool {
        if self.is_empty() {
            return true;
        }

        FilterDimension::ALL.iter().any(|dim| {
            record
                .housing_data
                .dimension_value(*dim)
                .map(|v| self.values(*dim).contains(v))
                .unwrap_or(false)
        })
    }
}
