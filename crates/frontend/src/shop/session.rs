use super::settings::SearchOrdering;
use super::view_model::{CatalogState, SelectionState};
use contracts::shop::{CatalogResponse, SessionConfig};

/// State of one open/close cycle of the overlay.
///
/// A fresh session is built on every open message. Closing only flips the
/// `open` flag; the selection survives so a confirm click that races the
/// close still has an order to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ShopSession {
    open: bool,
    config: SessionConfig,
    pub catalog: CatalogState,
    pub selection: SelectionState,
    /// Sequence number of the newest search issued in this session
    latest_search: u64,
}

impl ShopSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            open: false,
            config,
            catalog: CatalogState::new(config.per_page),
            selection: SelectionState::new(config.max_qty),
            latest_search: 0,
        }
    }

    pub fn opened(config: SessionConfig) -> Self {
        Self {
            open: true,
            ..Self::new(config)
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn mark_search_issued(&mut self, seq: u64) {
        self.latest_search = self.latest_search.max(seq);
    }

    /// Apply a catalog reply; returns whether local state changed.
    ///
    /// Rejected replies never touch state. Under [`SearchOrdering::LastIssued`]
    /// replies to searches older than the newest issued one are dropped too.
    pub fn apply_catalog(
        &mut self,
        seq: u64,
        response: CatalogResponse,
        ordering: SearchOrdering,
    ) -> bool {
        if ordering == SearchOrdering::LastIssued && seq < self.latest_search {
            log::debug!(
                "Dropping stale catalog reply #{} (newest #{})",
                seq,
                self.latest_search
            );
            return false;
        }
        match response.into_items() {
            Some(items) => {
                self.catalog.set_catalog(items);
                true
            }
            None => false,
        }
    }
}

impl Default for ShopSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
