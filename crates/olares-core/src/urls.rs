//! Internal and external URL derivation.
//!
//! The internal URL is computed from the service naming convention. The
//! external URL depends on a third-level domain the platform writes into a
//! deployment annotation once it has assigned one; until then the URL is
//! simply not available.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::environment::Environment;
use crate::process::CommandOutput;

/// JSONPath of the annotation holding the assigned third-level domains.
pub const THIRD_LEVEL_DOMAIN_JSONPATH: &str =
    "jsonpath={.metadata.annotations.applications\\.app\\.bytetrade\\.io/default-thirdlevel-domains}";

/// Subdomain label assigned by the platform to a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThirdLevelDomain(String);

impl ThirdLevelDomain {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ThirdLevelDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse the annotation value: a JSON array whose first element carries
/// `thirdLevelDomain`. Anything else means no domain yet.
pub fn parse_third_level_domain(raw: &str) -> Option<ThirdLevelDomain> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let entries: Vec<Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            tracing::debug!(error = %err, "Unparsable third-level domain annotation");
            return None;
        }
    };

    // Only the first entry matters; later ones may have any shape.
    entries
        .first()
        .and_then(|entry| entry.get("thirdLevelDomain"))
        .and_then(Value::as_str)
        .filter(|label| !label.is_empty())
        .map(ThirdLevelDomain::new)
}

/// Interpret the cluster query outcome. Non-zero exits and empty output
/// mean the domain is not assigned.
pub fn third_level_domain_from_output(output: &CommandOutput) -> Option<ThirdLevelDomain> {
    if !output.success() {
        tracing::debug!(code = ?output.code, "Third-level domain query failed");
        return None;
    }
    parse_third_level_domain(&output.stdout)
}

/// `http://{app}-svc.{namespace}.svc.cluster.local:{port}`
pub fn internal_url(app_name: &str, namespace: &str, port: u16) -> String {
    format!(
        "http://{}-svc.{}.svc.cluster.local:{}",
        app_name, namespace, port
    )
}

/// `https://{tld}.{domain}`, or `None` if the pieces do not form a valid URL.
pub fn external_url(tld: &ThirdLevelDomain, domain: &str) -> Option<String> {
    let candidate = format!("https://{}.{}", tld, domain);
    match Url::parse(&candidate) {
        Ok(_) => Some(candidate),
        Err(err) => {
            tracing::warn!(url = %candidate, error = %err, "Discarding invalid external URL");
            None
        }
    }
}

/// URLs for a deployed application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedUrls {
    pub internal_url: String,
    pub external_url: Option<String>,
    pub third_level_domain: Option<ThirdLevelDomain>,
}

/// Combine the deterministic internal URL with whatever the platform has
/// assigned so far.
pub fn derive_urls(
    app_name: &str,
    env: &Environment,
    port: u16,
    third_level_domain: Option<ThirdLevelDomain>,
) -> DerivedUrls {
    let external_url = third_level_domain
        .as_ref()
        .and_then(|tld| external_url(tld, &env.domain));

    DerivedUrls {
        internal_url: internal_url(app_name, &env.namespace, port),
        external_url,
        third_level_domain,
    }
}
