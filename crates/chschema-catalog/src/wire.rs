use serde::{Deserialize, Deserializer, Serialize};

/// One page of `api/entitydefinitions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPage {
    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<RawEntityDefinition>,
    pub total_items: Option<i64>,
    pub returned_items: Option<i64>,
    pub next: Option<RawLink>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLink {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawEntityDefinition {
    pub id: Option<serde_json::Value>,
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub member_groups: Vec<RawMemberGroup>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMemberGroup {
    pub name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub members: Vec<RawMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMember {
    #[serde(rename = "type")]
    pub member_type: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub cardinality: Option<String>,
    pub associated_entitydefinition: Option<RawLink>,
    #[serde(deserialize_with = "null_as_default")]
    pub allow_navigation: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_taxonomy_relation: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub content_is_copied: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_system_owned: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub is_nested: bool,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl RawPage {
    /// Link to the following page, if the catalog reports one.
    pub fn next_href(&self) -> Option<&str> {
        self.next
            .as_ref()
            .and_then(|link| link.href.as_deref())
            .filter(|href| !href.is_empty())
    }
}
