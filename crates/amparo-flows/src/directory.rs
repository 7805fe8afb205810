//! Therapist referral directory: registration and search.

use serde::Deserialize;
use uuid::Uuid;

use amparo_audit::{AuditAction, AuditEvent};
use amparo_core::models::therapist::TherapistRecord;
use amparo_triage::taxonomy::normalize;

use crate::context::FlowContext;
use crate::error::FlowError;

pub const DEFAULT_SEARCH_LIMIT: usize = 20;
pub const MAX_SEARCH_LIMIT: usize = 100;

#[derive(Debug, Clone, Deserialize)]
pub struct NewTherapist {
    pub name: String,
    pub license: String,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub convenio: bool,
    #[serde(default)]
    pub contact_email: Option<String>,
}

/// Search filters. Blank strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TherapistQuery {
    /// Free text matched against specialties, regions, or name.
    pub q: Option<String>,
    pub specialty: Option<String>,
    pub region: Option<String>,
    pub convenio: Option<bool>,
    pub limit: Option<usize>,
}

/// Validate and list a new therapist.
pub async fn register(
    ctx: &FlowContext,
    registered_by: &str,
    new: NewTherapist,
) -> Result<TherapistRecord, FlowError> {
    let name = new.name.trim();
    let license = new.license.trim();
    if name.is_empty() {
        return Err(FlowError::invalid("name must not be empty"));
    }
    if license.is_empty() {
        return Err(FlowError::invalid("license must not be empty"));
    }
    let contact_email = match new.contact_email.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(email) if is_email(email) => Some(email.to_string()),
        Some(_) => return Err(FlowError::invalid("contact_email is not an email address")),
    };

    let record = TherapistRecord {
        id: Uuid::new_v4(),
        name: name.to_string(),
        license: license.to_string(),
        specialties: clean(new.specialties),
        regions: clean(new.regions),
        convenio: new.convenio,
        contact_email,
        created_at: jiff::Timestamp::now(),
    };
    ctx.directory.add_therapist(&record).await?;

    AuditEvent::new(AuditAction::TherapistRegistered, "therapist", record.id.to_string())
        .by(registered_by)
        .emit();

    Ok(record)
}

/// Therapists matching `query`, ordered by name, at most `limit`.
///
/// `q` is used only when neither `specialty` nor `region` is given, and then
/// matches any specialty, any region, or the name. Otherwise the given
/// specialty and region must both match. Matching is a substring test that
/// ignores case and accents.
pub async fn search(
    ctx: &FlowContext,
    query: &TherapistQuery,
) -> Result<Vec<TherapistRecord>, FlowError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_SEARCH_LIMIT)
        .clamp(1, MAX_SEARCH_LIMIT);
    let filter = Filter::from_query(query);

    let mut found: Vec<TherapistRecord> = ctx
        .directory
        .therapists()
        .await?
        .into_iter()
        .filter(|t| filter.matches(t))
        .collect();
    found.sort_by(|a, b| normalize(&a.name).cmp(&normalize(&b.name)).then(a.id.cmp(&b.id)));
    found.truncate(limit);
    Ok(found)
}

struct Filter {
    any_field: Option<String>,
    specialty: Option<String>,
    region: Option<String>,
    convenio: Option<bool>,
}

impl Filter {
    fn from_query(query: &TherapistQuery) -> Self {
        let term = |s: &Option<String>| {
            s.as_deref()
                .map(normalize)
                .filter(|t| !t.is_empty())
        };
        let specialty = term(&query.specialty);
        let region = term(&query.region);
        let any_field = if specialty.is_none() && region.is_none() {
            term(&query.q)
        } else {
            None
        };
        Self {
            any_field,
            specialty,
            region,
            convenio: query.convenio,
        }
    }

    fn matches(&self, t: &TherapistRecord) -> bool {
        if self.convenio.is_some_and(|c| c != t.convenio) {
            return false;
        }
        if let Some(term) = &self.any_field {
            return contains_any(&t.specialties, term)
                || contains_any(&t.regions, term)
                || normalize(&t.name).contains(term.as_str());
        }
        self.specialty
            .as_ref()
            .is_none_or(|term| contains_any(&t.specialties, term))
            && self
                .region
                .as_ref()
                .is_none_or(|term| contains_any(&t.regions, term))
    }
}

fn contains_any(values: &[String], term: &str) -> bool {
    values.iter().any(|v| normalize(v).contains(term))
}

fn clean(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for v in values {
        let v = v.trim();
        if !v.is_empty() && !out.iter().any(|o| o == v) {
            out.push(v.to_string());
        }
    }
    out
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    }
}
