// src/domain/listing.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::filter::FilterDimension;

// record
//  ├── housing_data
//  │    ├── address, link, source
//  │    ├── rent, beds, baths, sqft
//  │    └── city, suburb, neighborhood
//  └── char_output
//       ├── score            (0.0 ..= 1.0)
//       └── trains           (line name -> presence)

/// Opaque listing identifier shared by the scrape, the characterization and the host lists.
pub type Hash = String;

/// Hash -> record, in hash order.
pub type ListingSet = BTreeMap<Hash, ListingRecord>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HousingData {
    #[serde(default)]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub rent: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub beds: Option<f64>,
    #[serde(default, alias = "baths_str", deserialize_with = "lenient_number")]
    pub baths: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub sqft: Option<f64>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
}

impl HousingData {
    pub fn dimension_value(&self, dim: FilterDimension) -> Option<&str> {
        match dim {
            FilterDimension::Neighborhood => self.neighborhood.as_deref(),
            FilterDimension::Suburb => self.suburb.as_deref(),
            FilterDimension::City => self.city.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharOutput {
    #[serde(default)]
    pub score: f64,
    #[serde(default, alias = "trains")]
    pub transit: Option<BTreeMap<String, Value>>,
}

impl CharOutput {
    /// Line names flagged present. `false` and `null` entries count as absent.
    pub fn transit_lines(&self) -> Vec<&str> {
        self.transit
            .iter()
            .flatten()
            .filter(|(_, present)| !matches!(present, Value::Null | Value::Bool(false)))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

/// The two triage lists the host keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ListKind {
    Favorite,
    Reject,
}

impl ListKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListKind::Favorite => "favorite",
            ListKind::Reject => "reject",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "favorite" => Some(ListKind::Favorite),
            "reject" => Some(ListKind::Reject),
            _ => None,
        }
    }
}

/// One scraped listing joined with its characterization.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ListingRecord {
    pub housing_data: HousingData,
    pub char_output: CharOutput,
}

/// Scrapers hand us numbers, numeric strings ("1.5", "$1,450") or nothing at all.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    })
}
