use serde::{Deserialize, Serialize};

use crate::options::ApiSettings;

const MASK: &str = "***";

/// API settings with secrets removed, safe to write into run artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactedSettings {
    pub url: String,
    pub host: Option<String>,
    pub client_id: String,
    pub username: String,
    pub client_secret: String,
    pub password: String,
    pub include_conditional_members: bool,
    pub timeout_secs: u64,
}

/// Redact secrets from API settings while keeping identifying metadata.
pub fn redact_settings(settings: &ApiSettings) -> RedactedSettings {
    RedactedSettings {
        url: redact_url(&settings.url),
        host: extract_host(&settings.url),
        client_id: settings.client_id.clone(),
        username: settings.username.clone(),
        client_secret: MASK.to_string(),
        password: MASK.to_string(),
        include_conditional_members: settings.include_conditional_members,
        timeout_secs: settings.timeout_secs,
    }
}

/// Mask userinfo passwords and sensitive query parameters in a URL.
pub fn redact_url(url: &str) -> String {
    let mut redacted = url.to_string();

    if let Some(scheme_end) = url.find("://") {
        let after_scheme = &url[scheme_end + 3..];
        let authority_end = after_scheme
            .find(['/', '?', '#'])
            .unwrap_or(after_scheme.len());
        let authority = &after_scheme[..authority_end];

        if let Some(at_idx) = authority.rfind('@') {
            let userinfo = &authority[..at_idx];
            if let Some(colon_idx) = userinfo.find(':') {
                let password_start = scheme_end + 3 + colon_idx + 1;
                let password_end = scheme_end + 3 + at_idx;
                redacted.replace_range(password_start..password_end, MASK);
            }
        }
    }

    redact_query_params(&redacted)
}

fn extract_host(url: &str) -> Option<String> {
    let after_scheme = &url[url.find("://")? + 3..];
    let authority = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host_port = authority.rsplit('@').next().unwrap_or_default();
    let host = host_port.split(':').next().unwrap_or_default();
    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

fn redact_query_params(url: &str) -> String {
    let Some(query_start) = url.find('?') else {
        return url.to_string();
    };

    let (base, query) = url.split_at(query_start + 1);
    let mut redacted_params = Vec::new();

    for pair in query.split('&') {
        let mut iter = pair.splitn(2, '=');
        let key = iter.next().unwrap_or("");
        let value = iter.next().unwrap_or("");
        if is_sensitive_key(key) {
            redacted_params.push(format!("{key}={MASK}"));
        } else if value.is_empty() {
            redacted_params.push(key.to_string());
        } else {
            redacted_params.push(format!("{key}={value}"));
        }
    }

    format!("{base}{}", redacted_params.join("&"))
}

fn is_sensitive_key(key: &str) -> bool {
    matches!(
        key.to_lowercase().as_str(),
        "password" | "client_secret" | "token" | "access_token" | "api_key" | "apikey"
    )
}
