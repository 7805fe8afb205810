use serde::{Deserialize, Serialize};

use amparo_core::models::risk::RiskLevel;
use amparo_core::models::score::{DASS21_ITEM_COUNT, Dass21Score, Severity, SeverityBands, Subscale};

use crate::Instrument;
use crate::error::InstrumentError;
use crate::scoring::{Domain, Item, ScoreRange, ValidationError};

/// DASS-21: Depression, Anxiety and Stress Scales, 21-item version.
/// 21 items rated 0–3, seven per subscale. Subscale sums are doubled to match
/// the 42-item instrument, giving 0–42 per subscale and 0–126 in total.
pub struct Dass21;

/// 0-based item indices per subscale. Disjoint; together they cover all 21 items.
pub const DEPRESSION_ITEMS: [usize; 7] = [2, 4, 9, 12, 15, 16, 20];
pub const ANXIETY_ITEMS: [usize; 7] = [1, 3, 6, 8, 14, 18, 19];
pub const STRESS_ITEMS: [usize; 7] = [0, 5, 7, 10, 11, 13, 17];

pub const RESPONSE_RANGE: ScoreRange = ScoreRange { min: 0, max: 3 };
pub const SUBSCALE_RANGE: ScoreRange = ScoreRange { min: 0, max: 42 };
pub const TOTAL_RANGE: ScoreRange = ScoreRange { min: 0, max: 126 };

const QUESTIONS: [&str; DASS21_ITEM_COUNT] = [
    "Encontré difícil relajarme.",
    "Me di cuenta que tenía la boca seca.",
    "No parecía sentir ningún sentimiento positivo.",
    "Tuve dificultad para respirar (p. ej. respiración acelerada).",
    "Me costó iniciativa para hacer las cosas.",
    "Reaccioné de forma exagerada a situaciones.",
    "Sentí temblores (p. ej. en las manos).",
    "Sentí que estaba usando mucha energía nerviosa.",
    "Me preocupaba que situaciones me hicieran entrar en pánico y hacer el ridículo.",
    "No tuve nada que esperar con ilusión.",
    "Me sentí agitado/a.",
    "Me costó relajarme.",
    "Me sentí triste y deprimido/a.",
    "No toleré nada que impidiera que continúe con lo que estaba haciendo.",
    "Sentí que estaba cerca de entrar en pánico.",
    "No sentí entusiasmo por nada.",
    "Me sentí intolerante con cosas que generalmente tolero.",
    "Sentí que no valía mucho como persona.",
    "Me sentí bastante irritable.",
    "Noté cambios en mi ritmo cardiaco (p. ej. latidos acelerados).",
    "Sentí miedo sin una buena razón.",
];

/// Question text for a 0-based item index.
pub fn question(index: usize) -> Option<&'static str> {
    QUESTIONS.get(index).copied()
}

pub fn item_indices(subscale: Subscale) -> &'static [usize; 7] {
    match subscale {
        Subscale::Depression => &DEPRESSION_ITEMS,
        Subscale::Anxiety => &ANXIETY_ITEMS,
        Subscale::Stress => &STRESS_ITEMS,
    }
}

impl Instrument for Dass21 {
    fn id(&self) -> &str {
        "dass21"
    }

    fn name(&self) -> &str {
        "DASS-21"
    }

    fn items(&self) -> &[Item] {
        static ITEMS: std::sync::LazyLock<Vec<Item>> = std::sync::LazyLock::new(|| {
            QUESTIONS
                .iter()
                .enumerate()
                .map(|(index, text)| Item {
                    index,
                    text: text.to_string(),
                })
                .collect()
        });
        &ITEMS
    }

    fn domains(&self) -> &[Domain] {
        static DOMAINS: std::sync::LazyLock<Vec<Domain>> = std::sync::LazyLock::new(|| {
            vec![
                domain(Subscale::Depression, "Depresión"),
                domain(Subscale::Anxiety, "Ansiedad"),
                domain(Subscale::Stress, "Estrés"),
            ]
        });
        &DOMAINS
    }

    fn response_range(&self) -> ScoreRange {
        RESPONSE_RANGE
    }
}

fn domain(subscale: Subscale, name: &str) -> Domain {
    Domain {
        subscale,
        name: name.to_string(),
        item_indices: item_indices(subscale).to_vec(),
        score_range: SUBSCALE_RANGE,
        description: Some("Sum of seven items, doubled".to_string()),
    }
}

// ── Cutpoints ────────────────────────────────────────────────────────────────

/// Upper-inclusive bounds of the first four severity bands for one subscale.
/// Anything above `severe` is `Extreme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCutpoints {
    pub normal: u8,
    pub mild: u8,
    pub moderate: u8,
    pub severe: u8,
}

impl SeverityCutpoints {
    pub fn band(&self, score: u8) -> Severity {
        if score <= self.normal {
            Severity::Normal
        } else if score <= self.mild {
            Severity::Mild
        } else if score <= self.moderate {
            Severity::Moderate
        } else if score <= self.severe {
            Severity::Severe
        } else {
            Severity::Extreme
        }
    }

    fn bounds(&self) -> [i64; 4] {
        [self.normal, self.mild, self.moderate, self.severe].map(i64::from)
    }
}

/// Upper-inclusive bounds on the total score for the overall risk level.
/// Anything above `high` is `Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCutpoints {
    pub low: u16,
    pub medium: u16,
    pub high: u16,
}

impl RiskCutpoints {
    pub fn level(&self, total: u16) -> RiskLevel {
        if total <= self.low {
            RiskLevel::Low
        } else if total <= self.medium {
            RiskLevel::Medium
        } else if total <= self.high {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }
}

/// Clinical calibration for DASS-21 scoring. Injected rather than hardcoded
/// so deployments can tune thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dass21Cutpoints {
    pub depression: SeverityCutpoints,
    pub anxiety: SeverityCutpoints,
    pub stress: SeverityCutpoints,
    pub total_risk: RiskCutpoints,
}

impl Default for Dass21Cutpoints {
    fn default() -> Self {
        Self {
            depression: SeverityCutpoints {
                normal: 9,
                mild: 13,
                moderate: 20,
                severe: 27,
            },
            anxiety: SeverityCutpoints {
                normal: 7,
                mild: 9,
                moderate: 14,
                severe: 19,
            },
            stress: SeverityCutpoints {
                normal: 14,
                mild: 18,
                moderate: 25,
                severe: 33,
            },
            total_risk: RiskCutpoints {
                low: 19,
                medium: 33,
                high: 48,
            },
        }
    }
}

impl Dass21Cutpoints {
    pub fn for_subscale(&self, subscale: Subscale) -> &SeverityCutpoints {
        match subscale {
            Subscale::Depression => &self.depression,
            Subscale::Anxiety => &self.anxiety,
            Subscale::Stress => &self.stress,
        }
    }

    /// Every cutpoint list must be strictly ascending and inside the score range.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        for subscale in Subscale::ALL {
            check_ascending(
                subscale.as_str(),
                &self.for_subscale(subscale).bounds(),
                SUBSCALE_RANGE,
            )?;
        }
        let total = [self.total_risk.low, self.total_risk.medium, self.total_risk.high]
            .map(i64::from);
        check_ascending("total", &total, TOTAL_RANGE)
    }
}

fn check_ascending(scale: &str, bounds: &[i64], range: ScoreRange) -> Result<(), InstrumentError> {
    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(InstrumentError::InvalidCutpoints {
            scale: scale.to_string(),
            reason: format!("{bounds:?} is not strictly ascending"),
        });
    }
    if let Some(out) = bounds.iter().find(|b| !range.contains(**b)) {
        return Err(InstrumentError::InvalidCutpoints {
            scale: scale.to_string(),
            reason: format!("{out} is outside [{}, {}]", range.min, range.max),
        });
    }
    Ok(())
}

// ── Scoring ──────────────────────────────────────────────────────────────────

/// Score a DASS-21 submission.
///
/// Fails without partial output when there are not exactly 21 responses or
/// any response lies outside 0–3.
pub fn score(cutpoints: &Dass21Cutpoints, responses: &[i32]) -> Result<Dass21Score, ValidationError> {
    Dass21.validate_responses(responses)?;

    let subscale = |items: &[usize; 7]| -> u8 {
        let sum: i32 = items.iter().map(|&i| responses[i]).sum();
        // validated: 7 items * 3 * 2 = 42 at most
        (sum * 2) as u8
    };

    let depression = subscale(&DEPRESSION_ITEMS);
    let anxiety = subscale(&ANXIETY_ITEMS);
    let stress = subscale(&STRESS_ITEMS);
    let total = u16::from(depression) + u16::from(anxiety) + u16::from(stress);

    Ok(Dass21Score {
        depression,
        anxiety,
        stress,
        total,
        risk_level: cutpoints.total_risk.level(total),
        severity: SeverityBands {
            depression: cutpoints.depression.band(depression),
            anxiety: cutpoints.anxiety.band(anxiety),
            stress: cutpoints.stress.band(stress),
        },
    })
}

/// Score a fully-answered session's stored responses.
pub fn score_answers(cutpoints: &Dass21Cutpoints, answers: &[u8]) -> Result<Dass21Score, ValidationError> {
    let responses: Vec<i32> = answers.iter().map(|&v| i32::from(v)).collect();
    score(cutpoints, &responses)
}
