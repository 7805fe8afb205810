//! Fixed crisis response.
//!
//! The text is static so nothing generated can reach a user in crisis. The
//! triggering message is never echoed back.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

const OPENING: &str =
    "Gracias por decirlo. Tu seguridad es lo más importante ahora. Estoy aquí contigo.";

const HOLD: &str =
    "Ahora mismo, evitemos entrar en detalles; enfoquémonos en mantenerte a salvo.";

const CLOSING: &str = "¿Cuál opción prefieres?";

/// The four options offered to a user in crisis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CrisisOption {
    SosButton,
    EmergencyLine,
    BreathingExercise,
    NotifyTherapist,
}

impl CrisisOption {
    pub const ALL: [CrisisOption; 4] = [
        CrisisOption::SosButton,
        CrisisOption::EmergencyLine,
        CrisisOption::BreathingExercise,
        CrisisOption::NotifyTherapist,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CrisisOption::SosButton => "Mostrar el botón SOS para asistencia inmediata",
            CrisisOption::EmergencyLine => {
                "Llamar a 911 o a la Línea de la Vida (800 911 2000)"
            }
            CrisisOption::BreathingExercise => {
                "Enviarte un ejercicio breve de respiración para estabilizarnos mientras conectamos ayuda"
            }
            CrisisOption::NotifyTherapist => "Avisar a tu terapeuta si lo autorizas",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CrisisResponse {
    /// Acknowledgment, numbered options, and closing question as one message.
    pub message: String,
    pub options: Vec<CrisisOption>,
}

/// Build the de-escalation message. The input only matters in that it was
/// flagged; its content is discarded.
pub fn respond(_user_text: &str) -> CrisisResponse {
    let menu = CrisisOption::ALL
        .iter()
        .enumerate()
        .map(|(i, option)| format!("({}) {}", i + 1, option.label()))
        .collect::<Vec<_>>()
        .join(", ");

    CrisisResponse {
        message: format!("{OPENING} {HOLD} Puedo: {menu}. {CLOSING}"),
        options: CrisisOption::ALL.to_vec(),
    }
}
