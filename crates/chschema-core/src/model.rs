use serde::{Deserialize, Serialize};

use crate::naming::TableName;

/// Schema-level description of one Content Hub entity type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDefinition {
    pub id: String,
    /// Dotted, namespace-qualified name (e.g. `M.Asset`).
    pub name: String,
    pub member_groups: Vec<MemberGroup>,
}

/// Named cluster of members. Grouping is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberGroup {
    pub name: String,
    pub members: Vec<RelationMember>,
}

/// Field on an entity definition: a scalar attribute or a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationMember {
    pub name: String,
    pub kind: MemberKind,
    /// Members maintained by the platform itself are excluded from the schema.
    pub is_system_owned: bool,
    pub role: Option<String>,
    pub cardinality: Option<String>,
}

/// Declared type of a member, decided once at ingestion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Scalar type tag, kept verbatim (e.g. `String`, `DateTimeOffset`).
    Scalar(String),
    /// Reference to the table of another definition.
    Relation(TableName),
}

impl EntityDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            member_groups: Vec::new(),
        }
    }

    /// Append a member group.
    pub fn with_group(mut self, name: impl Into<String>, members: Vec<RelationMember>) -> Self {
        self.member_groups.push(MemberGroup {
            name: name.into(),
            members,
        });
        self
    }

    pub fn table_name(&self) -> TableName {
        TableName::new(&self.name)
    }

    pub fn members(&self) -> impl Iterator<Item = &RelationMember> {
        self.member_groups.iter().flat_map(|group| group.members.iter())
    }
}

impl RelationMember {
    pub fn scalar(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Scalar(tag.into()),
            is_system_owned: false,
            role: None,
            cardinality: None,
        }
    }

    pub fn relation(name: impl Into<String>, target: TableName) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Relation(target),
            is_system_owned: false,
            role: None,
            cardinality: None,
        }
    }

    pub fn system_owned(mut self) -> Self {
        self.is_system_owned = true;
        self
    }
}
