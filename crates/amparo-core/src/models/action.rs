use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A safety action the client must apply for a given risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ActionTag {
    HideAds,
    ShowSos,
    NotifyTherapistIfConsented,
    ForceCrisisScreen,
    OfferEmergencyCall,
}
