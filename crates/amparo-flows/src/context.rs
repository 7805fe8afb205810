use std::sync::Arc;

use amparo_storage::directory::TherapistDirectory;
use amparo_storage::store::SessionStore;

use crate::policy::Policy;

/// Everything a flow needs: where sessions live, where the therapist
/// directory lives, and which policy applies.
#[derive(Clone)]
pub struct FlowContext {
    pub store: Arc<dyn SessionStore>,
    pub directory: Arc<dyn TherapistDirectory>,
    pub policy: Arc<Policy>,
}

impl FlowContext {
    /// Both handles point at the same backend.
    pub fn new<S>(backend: Arc<S>, policy: Policy) -> Self
    where
        S: SessionStore + TherapistDirectory + 'static,
    {
        Self {
            store: backend.clone(),
            directory: backend,
            policy: Arc::new(policy),
        }
    }
}
