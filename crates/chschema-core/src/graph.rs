use serde::{Deserialize, Serialize};

use crate::classify::classify_relations;
use crate::model::{EntityDefinition, MemberKind};
use crate::naming::{TableName, normalize_name};
use crate::schema::{Column, ColumnKind, SchemaGraph};

/// Counters collected while folding entity definitions into a graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildStats {
    pub entities: usize,
    pub members: usize,
    pub columns_added: usize,
    /// Tables created from a back-edge before (or without) their own definition.
    pub synthesized_tables: usize,
}

/// Shape of a finished graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub tables: usize,
    pub columns: usize,
    pub reference_columns: usize,
    pub empty_tables: usize,
}

/// Fold `entities` into `graph`.
///
/// Entities are processed in ordinal name order so first-wins deduplication
/// does not depend on the order the catalog returned them in.
pub fn populate_graph(graph: &mut SchemaGraph, entities: &[EntityDefinition]) -> BuildStats {
    let mut ordered: Vec<&EntityDefinition> = entities.iter().collect();
    ordered.sort_by(|left, right| left.name.cmp(&right.name));

    let mut stats = BuildStats::default();

    for entity in ordered {
        let owner = entity.table_name();
        if !graph.contains(&owner) {
            tracing::debug!(event = "table_created", table = %owner, entity = %entity.name);
        }
        graph.ensure_table(&owner);
        stats.entities += 1;

        for member in classify_relations(entity) {
            stats.members += 1;
            let column_name = normalize_name(&member.name);
            let kind = match &member.kind {
                MemberKind::Scalar(tag) => ColumnKind::Scalar(tag.clone()),
                MemberKind::Relation(target) => ColumnKind::Reference(target.clone()),
            };

            let column = Column {
                name: column_name.clone(),
                kind,
            };
            if graph.ensure_table(&owner).push_unique(column) {
                stats.columns_added += 1;
            }

            if let MemberKind::Relation(target) = &member.kind {
                if seed_back_edge(graph, target, &column_name, &owner) {
                    stats.synthesized_tables += 1;
                    tracing::debug!(
                        event = "table_synthesized",
                        table = %target,
                        column = %column_name,
                        from = %owner
                    );
                }
            }
        }
    }

    stats
}

/// Create `target` with a single column pointing back at `owner`, unless the
/// table is already known.
fn seed_back_edge(
    graph: &mut SchemaGraph,
    target: &TableName,
    column_name: &str,
    owner: &TableName,
) -> bool {
    if graph.contains(target) {
        return false;
    }
    graph.insert_table(
        target.clone(),
        vec![Column::reference(column_name, owner.clone())],
    )
}

/// Summarize table and column counts of a graph.
pub fn summarize_graph(graph: &SchemaGraph) -> GraphSummary {
    let mut summary = GraphSummary {
        tables: graph.len(),
        columns: 0,
        reference_columns: 0,
        empty_tables: 0,
    };

    for table in graph.tables() {
        summary.columns += table.columns.len();
        summary.reference_columns += table
            .columns
            .iter()
            .filter(|column| matches!(column.kind, ColumnKind::Reference(_)))
            .count();
        if table.columns.is_empty() {
            summary.empty_tables += 1;
        }
    }

    summary
}
