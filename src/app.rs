// src/app.rs
use std::sync::Mutex;

use crate::domain::filter::FilterDimension;
use crate::domain::listing::ListKind;
use crate::domain::loader::LoadedData;
use crate::errors::ServerError;
use crate::host::{HostApi, HostCounts};
use crate::templates::components::FilterChoices;
use crate::templates::pages::BoardVm;
use crate::view::state::ViewState;

pub const NO_DATA_MESSAGE: &str =
    "There was no housing data! Run the scraper to collect and characterize housing data.";

/// The mounted board: the host plus the view state it feeds.
pub struct App {
    host: Box<dyn HostApi>,
    state: Mutex<ViewState>,
    startup_alerts: Vec<String>,
}

impl App {
    /// Build the view state from the loaded data and the host's current lists.
    pub fn mount(host: impl HostApi + 'static, loaded: Option<LoadedData>) -> Self {
        let mut state = ViewState::new();
        let mut startup_alerts = Vec::new();

        match loaded {
            Some(data) => {
                if !data.missing_characterization.is_empty() {
                    log::warn!(
                        "{} listings had no characterization and are hidden",
                        data.missing_characterization.len()
                    );
                }
                state.load(data.listings);
            }
            None => startup_alerts.push(NO_DATA_MESSAGE.to_string()),
        }

        for kind in [ListKind::Favorite, ListKind::Reject] {
            match host.get_list(kind) {
                Ok(set) => state.reconcile(&set, kind),
                Err(e) => log::warn!("Could not fetch {} list: {e}", kind.as_str()),
            }
        }

        Self {
            host: Box::new(host),
            state: Mutex::new(state),
            startup_alerts,
        }
    }

    pub fn host(&self) -> &dyn HostApi {
        self.host.as_ref()
    }

    /// Run `f` with exclusive access to the view state. Holding the lock
    /// across the host call keeps actions on one row strictly ordered.
    pub fn with_state<T, F>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut ViewState, &dyn HostApi) -> Result<T, ServerError>,
    {
        let mut state = self.state.lock().map_err(|_| ServerError::InternalError)?;
        f(&mut state, self.host.as_ref())
    }

    /// Host counts, or `None` (logged) when the host call fails.
    pub fn counts(&self, state: &ViewState) -> Option<HostCounts> {
        match HostCounts::fetch(self.host()) {
            Ok(counts) => {
                state.check_totals(counts);
                Some(counts)
            }
            Err(e) => {
                log::warn!("Could not fetch list counts: {e}");
                None
            }
        }
    }

    fn filter_choices(&self) -> Vec<FilterChoices> {
        FilterDimension::ALL
            .iter()
            .filter_map(|dim| match self.host.get_filter_choices(*dim) {
                Ok(values) => Some(FilterChoices {
                    dimension: *dim,
                    values,
                }),
                Err(e) => {
                    log::warn!("Could not fetch {} choices: {e}", dim.as_str());
                    None
                }
            })
            .collect()
    }

    /// Everything needed to draw the current table.
    pub fn board_vm(&self, state: &ViewState, warnings: Vec<String>) -> BoardVm {
        let view = state.current_view();
        let mut alerts = self.startup_alerts.clone();
        alerts.extend(warnings);

        BoardVm {
            rows: state.rows(&view),
            sort: state.sort_state(&view),
            sources: state.sources(),
            counts: self.counts(state),
            filter_choices: self.filter_choices(),
            filters: state.filters().clone(),
            alerts,
            view,
        }
    }
}
