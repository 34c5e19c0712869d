use chschema_core::{
    EntityDefinition, Error, MemberGroup, MemberKind, RELATION_TYPE_TAG, RelationMember, Result,
    TableName, normalize_name,
};

use crate::wire::{RawEntityDefinition, RawMember, RawPage};

/// Ingest every definition of every page, in page order.
pub fn map_pages(pages: &[RawPage]) -> Result<Vec<EntityDefinition>> {
    pages
        .iter()
        .flat_map(|page| page.items.iter())
        .map(map_definition)
        .collect()
}

/// Validate one raw definition and convert it into the core model.
pub fn map_definition(raw: &RawEntityDefinition) -> Result<EntityDefinition> {
    let name = match raw.name.as_deref() {
        Some(name) if !normalize_name(name).is_empty() => name.to_string(),
        _ => {
            return Err(Error::InvalidDefinition(format!(
                "entity definition {} has no name",
                id_to_string(raw.id.as_ref())
            )));
        }
    };

    let mut member_groups = Vec::with_capacity(raw.member_groups.len());
    for group in &raw.member_groups {
        let members = group
            .members
            .iter()
            .map(|member| map_member(&name, member))
            .collect::<Result<Vec<_>>>()?;
        member_groups.push(MemberGroup {
            name: group.name.clone().unwrap_or_default(),
            members,
        });
    }

    Ok(EntityDefinition {
        id: id_to_string(raw.id.as_ref()),
        name,
        member_groups,
    })
}

fn map_member(entity: &str, raw: &RawMember) -> Result<RelationMember> {
    let name = match raw.name.as_deref() {
        Some(name) if !normalize_name(name).is_empty() => name.to_string(),
        _ => {
            return Err(Error::InvalidDefinition(format!(
                "{entity} has a member without a name"
            )));
        }
    };

    let kind = match raw.member_type.as_deref() {
        Some(RELATION_TYPE_TAG) => {
            let href = raw
                .associated_entitydefinition
                .as_ref()
                .and_then(|link| link.href.as_deref())
                .ok_or_else(|| {
                    Error::InvalidDefinition(format!(
                        "{entity}.{name} is a relation without an associated definition"
                    ))
                })?;
            MemberKind::Relation(TableName::from_href(href)?)
        }
        Some(tag) if !tag.is_empty() => MemberKind::Scalar(tag.to_string()),
        _ => {
            return Err(Error::InvalidDefinition(format!(
                "{entity}.{name} has no type"
            )));
        }
    };

    Ok(RelationMember {
        name,
        kind,
        is_system_owned: raw.is_system_owned,
        role: raw.role.clone(),
        cardinality: raw.cardinality.clone(),
    })
}

fn id_to_string(id: Option<&serde_json::Value>) -> String {
    match id {
        Some(serde_json::Value::String(value)) => value.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::{RawLink, RawMemberGroup};

    fn raw_entity(name: Option<&str>, members: Vec<RawMember>) -> RawEntityDefinition {
        RawEntityDefinition {
            id: Some(serde_json::json!(7)),
            name: name.map(str::to_string),
            member_groups: vec![RawMemberGroup {
                name: Some("General".to_string()),
                members,
            }],
        }
    }

    fn raw_member(name: &str, member_type: &str, href: Option<&str>) -> RawMember {
        RawMember {
            member_type: Some(member_type.to_string()),
            name: Some(name.to_string()),
            associated_entitydefinition: href.map(|href| RawLink {
                href: Some(href.to_string()),
            }),
            ..RawMember::default()
        }
    }

    #[test]
    fn maps_relation_and_scalar_members() {
        let raw = raw_entity(
            Some("M.Asset"),
            vec![
                raw_member("Title", "String", None),
                raw_member(
                    "AssetTypeToAsset",
                    "Relation",
                    Some("https://hub.example/api/entitydefinitions/M.AssetType"),
                ),
            ],
        );

        let entity = map_definition(&raw).expect("valid definition");

        assert_eq!(entity.id, "7");
        assert_eq!(entity.name, "M.Asset");
        let members: Vec<&RelationMember> = entity.members().collect();
        assert_eq!(members[0].kind, MemberKind::Scalar("String".to_string()));
        assert_eq!(
            members[1].kind,
            MemberKind::Relation(TableName::new("MAssetType"))
        );
    }

    #[test]
    fn rejects_missing_entity_name() {
        let err = map_definition(&raw_entity(None, Vec::new())).unwrap_err();
        assert!(err.to_string().contains("has no name"));
        assert!(map_definition(&raw_entity(Some(""), Vec::new())).is_err());
    }

    #[test]
    fn rejects_entity_name_of_only_dots() {
        let err = map_definition(&raw_entity(Some("..."), Vec::new())).unwrap_err();
        assert!(matches!(err, Error::InvalidDefinition(_)));
    }

    #[test]
    fn rejects_member_name_of_only_dots() {
        let raw = raw_entity(
            Some("M.Asset"),
            vec![raw_member(
                ".",
                "Relation",
                Some("https://hub.example/api/entitydefinitions/User"),
            )],
        );

        let err = map_definition(&raw).unwrap_err();
        assert!(err.to_string().contains("member without a name"));
    }

    #[test]
    fn rejects_relation_without_target() {
        let raw = raw_entity(Some("M.Asset"), vec![raw_member("Owner", "Relation", None)]);
        assert!(map_definition(&raw).is_err());
    }

    #[test]
    fn rejects_relation_with_empty_target_segment() {
        let raw = raw_entity(
            Some("M.Asset"),
            vec![raw_member(
                "Owner",
                "Relation",
                Some("https://hub.example/api/entitydefinitions/"),
            )],
        );
        assert!(matches!(
            map_definition(&raw),
            Err(Error::InvalidDefinition(_))
        ));
    }

    #[test]
    fn keeps_system_owned_flag() {
        let mut member = raw_member("CreatedBy", "Long", None);
        member.is_system_owned = true;
        let entity = map_definition(&raw_entity(Some("M.Asset"), vec![member])).expect("valid");

        assert!(entity.members().all(|member| member.is_system_owned));
    }

    #[test]
    fn map_pages_preserves_page_order() {
        let pages = vec![
            RawPage {
                items: vec![raw_entity(Some("B"), Vec::new())],
                ..RawPage::default()
            },
            RawPage {
                items: vec![raw_entity(Some("A"), Vec::new())],
                ..RawPage::default()
            },
        ];

        let names: Vec<String> = map_pages(&pages)
            .expect("valid pages")
            .into_iter()
            .map(|entity| entity.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }
}
