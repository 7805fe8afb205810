use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Steps of the expressive-writing (EEA) exercise, in the order they are
/// presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EeaStep {
    EleccionDelEvento,
    EscrituraLibre,
    ExploracionEmocional,
    ReencuadreAutoreflexivo,
    CierrePositivo,
}

impl EeaStep {
    pub const ALL: [EeaStep; 5] = [
        EeaStep::EleccionDelEvento,
        EeaStep::EscrituraLibre,
        EeaStep::ExploracionEmocional,
        EeaStep::ReencuadreAutoreflexivo,
        EeaStep::CierrePositivo,
    ];

    pub fn key(self) -> &'static str {
        match self {
            EeaStep::EleccionDelEvento => "eleccion_del_evento",
            EeaStep::EscrituraLibre => "escritura_libre",
            EeaStep::ExploracionEmocional => "exploracion_emocional",
            EeaStep::ReencuadreAutoreflexivo => "reencuadre_autoreflexivo",
            EeaStep::CierrePositivo => "cierre_positivo",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// A user's free-text answer to one EEA step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EeaEntry {
    pub id: Uuid,
    pub session_id: Uuid,
    pub step: EeaStep,
    pub user_text: String,
    pub created_at: jiff::Timestamp,
}
