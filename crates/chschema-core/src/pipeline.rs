use serde::Serialize;

use crate::fixups::{FixupReport, apply_fixups};
use crate::graph::{BuildStats, GraphSummary, populate_graph, summarize_graph};
use crate::model::EntityDefinition;
use crate::render::render_schema;
use crate::schema::SchemaGraph;

/// Everything produced by one pass over an entity catalog.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub graph: SchemaGraph,
    pub report: String,
    pub metrics: PipelineMetrics,
}

/// Serializable counters for a pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineMetrics {
    pub build: BuildStats,
    pub fixups: FixupReport,
    pub summary: GraphSummary,
}

/// Build, correct and render the schema for `entities`.
pub fn run_pipeline(entities: &[EntityDefinition]) -> PipelineOutput {
    let mut graph = SchemaGraph::new();

    let build = populate_graph(&mut graph, entities);
    tracing::info!(
        event = "graph_built",
        entities = build.entities,
        tables = graph.len(),
        synthesized_tables = build.synthesized_tables
    );

    let fixups = apply_fixups(&mut graph);
    tracing::info!(
        event = "fixups_applied",
        applied = fixups.applied.len(),
        skipped = fixups.skipped.len(),
        duplicates = fixups.duplicates().count()
    );

    let summary = summarize_graph(&graph);
    let report = render_schema(&graph);

    PipelineOutput {
        graph,
        report,
        metrics: PipelineMetrics {
            build,
            fixups,
            summary,
        },
    }
}
