use std::sync::Arc;

use crate::aggregate::MatchAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<MatchAggregator>,
    pub cors_origin: String,
}
