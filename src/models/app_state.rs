use std::sync::Arc;

use crate::{domain::Relayer, services::EvmLedgerClient};

/// Shared application state handed to every request handler.
///
/// The relayer itself is stateless; this only carries the injected
/// dependencies so handlers can reach the orchestrator.
#[derive(Clone)]
pub struct AppState {
    pub relayer: Arc<Relayer<EvmLedgerClient>>,
}

impl AppState {
    pub fn new(relayer: Relayer<EvmLedgerClient>) -> Self {
        Self {
            relayer: Arc::new(relayer),
        }
    }
}
