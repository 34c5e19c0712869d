use serde::{Deserialize, Serialize};

/// Connection settings for a Content Hub instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the instance, e.g. `https://tenant.stylelabs.cloud/`.
    pub url: String,
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    /// Ask the API to include conditional members in each definition.
    #[serde(default = "default_include_conditional_members")]
    pub include_conditional_members: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_include_conditional_members() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    60
}
