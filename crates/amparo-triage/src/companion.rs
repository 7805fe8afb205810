//! Deterministic companion reply.
//!
//! Used when no generative model is configured. Anything that trips explicit
//! ideation or the guardrail list is routed to the crisis response.

use serde::{Deserialize, Serialize};

use crate::crisis;
use crate::taxonomy::{PhraseCategory, PhraseTaxonomy, normalize};

/// Avatar persona. Unknown names fall back to [`Persona::Tortuga`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    Nino,
    Nina,
    #[default]
    Tortuga,
}

impl Persona {
    pub fn parse(s: &str) -> Self {
        match s {
            "nino" => Persona::Nino,
            "nina" => Persona::Nina,
            _ => Persona::Tortuga,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Crisis,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionReply {
    pub message: String,
    pub source: ReplySource,
    pub persona: Persona,
}

const FALLBACK: &str = "Gracias por confiarme esto. Estoy aquí contigo. \
¿Te parece si hacemos una respiración 4-4-6 (inhala 4, sostén 4, exhala 6) \
y luego me cuentas qué parte se siente más pesada ahora mismo?\n\
Si en algún momento te sientes en riesgo, puedo mostrarte el botón SOS \
o ayudarte a contactar a la Línea de la Vida (800 911 2000) o 911.";

pub fn reply(taxonomy: &PhraseTaxonomy, user_text: &str, persona: Persona) -> CompanionReply {
    let normalized = normalize(user_text);
    let crisis = taxonomy.matches_normalized(PhraseCategory::ExplicitIdeation, &normalized)
        || taxonomy.matches_normalized(PhraseCategory::GuardrailBlock, &normalized);

    if crisis {
        return CompanionReply {
            message: crisis::respond(user_text).message,
            source: ReplySource::Crisis,
            persona,
        };
    }

    CompanionReply {
        message: FALLBACK.to_string(),
        source: ReplySource::Fallback,
        persona,
    }
}
