use serde::{Deserialize, Serialize};

use amparo_instruments::instruments::dass21::Dass21Cutpoints;
use amparo_triage::emergency::EmergencyDirectory;
use amparo_triage::taxonomy::PhraseTaxonomy;

use crate::error::FlowError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NegotiationPolicy {
    /// Length of the safe-behavior window the user is asked to commit to.
    pub commitment_window_minutes: u32,
}

impl Default for NegotiationPolicy {
    fn default() -> Self {
        Self {
            commitment_window_minutes: 30,
        }
    }
}

/// Clinical and safety configuration, passed explicitly to every flow so
/// thresholds and phrase lists can be tuned per deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    #[serde(default)]
    pub dass21: Dass21Cutpoints,
    #[serde(default)]
    pub taxonomy: PhraseTaxonomy,
    #[serde(default)]
    pub negotiation: NegotiationPolicy,
    #[serde(default)]
    pub emergency: EmergencyDirectory,
}

impl Policy {
    pub fn validate(&self) -> Result<(), FlowError> {
        self.dass21
            .validate()
            .map_err(|e| FlowError::InvalidPolicy(e.to_string()))?;
        if self.negotiation.commitment_window_minutes == 0 {
            return Err(FlowError::InvalidPolicy(
                "commitment window must be at least one minute".to_string(),
            ));
        }
        if self.emergency.emergency_numbers.is_empty() {
            return Err(FlowError::InvalidPolicy(
                "emergency directory has no numbers".to_string(),
            ));
        }
        Ok(())
    }
}
