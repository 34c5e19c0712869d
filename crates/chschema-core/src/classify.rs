use std::collections::HashSet;

use crate::model::{EntityDefinition, RelationMember};

/// Members of `entity` that belong in the exported schema.
///
/// System-owned members are dropped and the rest are deduplicated by name
/// across all member groups; the first member in enumeration order wins.
pub fn classify_relations(entity: &EntityDefinition) -> Vec<&RelationMember> {
    let mut seen = HashSet::new();
    entity
        .members()
        .filter(|member| !member.is_system_owned)
        .filter(|member| seen.insert(member.name.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MemberKind;
    use crate::naming::TableName;

    #[test]
    fn drops_system_owned_members() {
        let entity = EntityDefinition::new("1", "M.Asset").with_group(
            "General",
            vec![
                RelationMember::scalar("Title", "String"),
                RelationMember::scalar("CreatedBy", "Long").system_owned(),
            ],
        );

        let names: Vec<&str> = classify_relations(&entity)
            .iter()
            .map(|member| member.name.as_str())
            .collect();
        assert_eq!(names, vec!["Title"]);
    }

    #[test]
    fn first_duplicate_wins_across_groups() {
        let entity = EntityDefinition::new("1", "M.Asset")
            .with_group(
                "General",
                vec![
                    RelationMember::scalar("Title", "String"),
                    RelationMember::scalar("Title", "Json"),
                ],
            )
            .with_group(
                "Relations",
                vec![RelationMember::relation("Title", TableName::new("M.Other"))],
            );

        let classified = classify_relations(&entity);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, MemberKind::Scalar("String".to_string()));
    }

    #[test]
    fn system_owned_duplicate_does_not_shadow_later_member() {
        let entity = EntityDefinition::new("1", "M.Asset").with_group(
            "General",
            vec![
                RelationMember::scalar("Title", "Json").system_owned(),
                RelationMember::scalar("Title", "String"),
            ],
        );

        let classified = classify_relations(&entity);
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].kind, MemberKind::Scalar("String".to_string()));
    }

    #[test]
    fn empty_entity_yields_nothing() {
        let entity = EntityDefinition::new("1", "M.Empty");
        assert!(classify_relations(&entity).is_empty());
    }
}
