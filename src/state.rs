use std::sync::Arc;

use crate::auth::TokenService;
use crate::database::Gateway;

/// Shared application state, built once at startup and cloned into each request
#[derive(Clone)]
pub struct AppState {
    /// Persistence gateway shared by all controllers
    pub gateway: Arc<dyn Gateway>,
    /// Bearer token issuance and verification
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, tokens: TokenService) -> Self {
        Self {
            gateway,
            tokens: Arc::new(tokens),
        }
    }
}
