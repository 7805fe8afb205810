use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Emergency numbers and immediate stabilisation steps for one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmergencyDirectory {
    pub region: String,
    pub emergency_numbers: Vec<String>,
    pub next_steps: Vec<String>,
}

impl Default for EmergencyDirectory {
    /// Mexico: 911 and Línea de la Vida.
    fn default() -> Self {
        Self {
            region: "MX".to_string(),
            emergency_numbers: vec!["911".to_string(), "8009112000".to_string()],
            next_steps: vec![
                "Respiración 4-4-6".to_string(),
                "Contactar terapeuta autorizado".to_string(),
            ],
        }
    }
}
