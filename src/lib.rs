pub mod api;
pub mod docs;
pub mod export;
pub mod flatten;
pub mod models;
pub mod pagination;
pub mod range;

use std::sync::Arc;

use crate::api::stripe_client::ChargeSource;

#[derive(Clone)]
pub struct AppState {
    pub charges: Arc<dyn ChargeSource>,
}
