use std::path::PathBuf;

use amparo_flows::Policy;

/// Current policy file version. Bump this when changing the file's shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_POLICY_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Memory,
    S3,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: Backend,
    pub bucket: String,
    pub policy_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let backend = match lookup("AMPARO_BACKEND").as_deref() {
            None | Some("s3") => Backend::S3,
            Some("memory") => Backend::Memory,
            Some(other) => {
                return Err(eyre::eyre!(
                    "AMPARO_BACKEND must be `memory` or `s3`, got `{other}`"
                ));
            }
        };
        Ok(Self {
            backend,
            bucket: lookup("AMPARO_BUCKET").unwrap_or_else(|| "amparo".to_string()),
            policy_path: lookup("AMPARO_POLICY_PATH").map(PathBuf::from),
        })
    }

    /// The configured policy file, or the built-in defaults when none is set.
    pub fn load_policy(&self) -> eyre::Result<Policy> {
        let Some(path) = &self.policy_path else {
            return Ok(Policy::default());
        };
        let contents = std::fs::read_to_string(path)
            .map_err(|e| eyre::eyre!("failed to read policy at {}: {e}", path.display()))?;
        let policy = parse_policy(&contents)?;
        tracing::info!(path = %path.display(), "policy loaded");
        Ok(policy)
    }
}

/// Parse, migrate and validate a policy document.
pub fn parse_policy(contents: &str) -> eyre::Result<Policy> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| eyre::eyre!("config_version must be a small non-negative integer, got {v}"))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let policy: Policy = serde_json::from_value(migrated)?;
    policy.validate()?;
    Ok(policy)
}

/// Run sequential migrations from `from_version` up to
/// [`CURRENT_POLICY_VERSION`]. Each migration is a pure transform on the raw
/// JSON value.
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_POLICY_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_POLICY_VERSION})"
        ));
    }

    // v0 → v1: top-level `commitment_window_minutes` moved under `negotiation`
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("policy is not a JSON object"))?;
        if let Some(minutes) = obj.remove("commitment_window_minutes") {
            obj.insert(
                "negotiation".to_string(),
                serde_json::json!({ "commitment_window_minutes": minutes }),
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated policy v0 → v1 (nested negotiation settings)");
    }

    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    use amparo_core::models::risk::RiskLevel;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }

    #[test]
    fn env_defaults_to_s3() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.backend, Backend::S3);
        assert_eq!(config.bucket, "amparo");
        assert!(config.policy_path.is_none());
    }

    #[test]
    fn env_selects_memory_backend() {
        let config = Config::from_lookup(lookup(&[
            ("AMPARO_BACKEND", "memory"),
            ("AMPARO_POLICY_PATH", "/etc/amparo/policy.json"),
        ]))
        .unwrap();
        assert_eq!(config.backend, Backend::Memory);
        assert_eq!(
            config.policy_path,
            Some(PathBuf::from("/etc/amparo/policy.json"))
        );
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("AMPARO_BACKEND", "redis")])).is_err());
    }

    #[test]
    fn empty_policy_uses_defaults() {
        let policy = parse_policy(r#"{ "config_version": 1 }"#).unwrap();
        assert_eq!(policy, Policy::default());
    }

    #[test]
    fn pre_versioned_policy_is_migrated() {
        let policy = parse_policy(r#"{ "commitment_window_minutes": 20 }"#).unwrap();
        assert_eq!(policy.negotiation.commitment_window_minutes, 20);
    }

    #[test]
    fn custom_cutpoints_are_applied() {
        let policy = parse_policy(
            r#"{
                "config_version": 1,
                "dass21": {
                    "depression": { "normal": 9, "mild": 13, "moderate": 20, "severe": 27 },
                    "anxiety": { "normal": 7, "mild": 9, "moderate": 14, "severe": 19 },
                    "stress": { "normal": 14, "mild": 18, "moderate": 25, "severe": 33 },
                    "total_risk": { "low": 5, "medium": 10, "high": 15 }
                }
            }"#,
        )
        .unwrap();
        assert_eq!(policy.dass21.total_risk.level(14), RiskLevel::High);
    }

    #[test]
    fn descending_cutpoints_are_rejected() {
        let err = parse_policy(
            r#"{
                "config_version": 1,
                "dass21": {
                    "depression": { "normal": 20, "mild": 13, "moderate": 9, "severe": 27 },
                    "anxiety": { "normal": 7, "mild": 9, "moderate": 14, "severe": 19 },
                    "stress": { "normal": 14, "mild": 18, "moderate": 25, "severe": 33 },
                    "total_risk": { "low": 19, "medium": 33, "high": 48 }
                }
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("depression"));
    }

    #[test]
    fn empty_phrase_category_is_rejected() {
        let result = parse_policy(
            r#"{
                "config_version": 1,
                "taxonomy": {
                    "version": "test",
                    "explicit_ideation": [],
                    "hopelessness": ["sin esperanza"],
                    "crisis_watch": ["suic"],
                    "guardrail_block": ["veneno"]
                }
            }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn newer_version_is_rejected() {
        assert!(parse_policy(r#"{ "config_version": 9 }"#).is_err());
    }

    #[test]
    fn oversized_version_is_not_truncated() {
        // 2^32 + 1 would wrap to 1 if narrowed.
        assert!(parse_policy(r#"{ "config_version": 4294967297 }"#).is_err());
        assert!(parse_policy(r#"{ "config_version": -1 }"#).is_err());
        assert!(parse_policy(r#"{ "config_version": "1" }"#).is_err());
    }
}
