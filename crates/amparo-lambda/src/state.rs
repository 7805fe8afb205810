use amparo_flows::FlowContext;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub flows: FlowContext,
}
