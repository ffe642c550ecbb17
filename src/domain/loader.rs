// src/domain/loader.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::listing::{Hash, HousingData, ListingSet};
use crate::errors::ServerError;

/// Result of reading the data files at startup.
#[derive(Debug, Clone, Default)]
pub struct LoadedData {
    pub listings: ListingSet,
    /// Scraped hashes dropped because they had no characterization.
    pub missing_characterization: Vec<Hash>,
}

/// Read the characterization document and, when present, the listing document.
///
/// Returns `Ok(None)` when there is no characterization to show.
pub fn load_data_files(
    data_file: impl AsRef<Path>,
    char_file: impl AsRef<Path>,
) -> Result<Option<LoadedData>, ServerError> {
    let char_file = char_file.as_ref();
    if !char_file.is_file() {
        log::warn!(
            "No characterization data at {}, nothing to display",
            char_file.display()
        );
        return Ok(None);
    }

    let char_raw = fs::read_to_string(char_file).map_err(|e| {
        ServerError::DataError(format!("Failed to read {}: {e}", char_file.display()))
    })?;

    let data_file = data_file.as_ref();
    let listing_raw = if data_file.is_file() {
        Some(fs::read_to_string(data_file).map_err(|e| {
            ServerError::DataError(format!("Failed to read {}: {e}", data_file.display()))
        })?)
    } else {
        log::info!(
            "No listing data at {}, showing every characterized listing",
            data_file.display()
        );
        None
    };

    let loaded = parse_documents(listing_raw.as_deref(), &char_raw)?;
    if loaded.listings.is_empty() {
        return Ok(None);
    }
    Ok(Some(loaded))
}

/// Join the two JSON documents on hash.
pub fn parse_documents(listing_json: Option<&str>, char_json: &str) -> Result<LoadedData, ServerError> {
    let characterized: ListingSet = serde_json::from_str(char_json)
        .map_err(|e| ServerError::DataError(format!("Invalid characterization data: {e}")))?;

    let Some(listing_json) = listing_json else {
        return Ok(LoadedData {
            listings: characterized,
            missing_characterization: Vec::new(),
        });
    };

    let scraped: BTreeMap<Hash, HousingData> = serde_json::from_str(listing_json)
        .map_err(|e| ServerError::DataError(format!("Invalid listing data: {e}")))?;

    let mut loaded = LoadedData::default();
    for (hash, housing) in scraped {
        match characterized.get(&hash) {
            Some(record) => {
                loaded.listings.insert(hash, record.clone());
            }
            None => {
                log::warn!("Missing characterization data for '{}'", housing.address);
                loaded.missing_characterization.push(hash);
            }
        }
    }

    Ok(loaded)
}
