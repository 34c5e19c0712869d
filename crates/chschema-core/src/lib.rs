//! Core contracts and helpers for chschema.
//!
//! This crate turns a catalog of Content Hub entity definitions into a
//! normalized relational schema graph and renders it as the line-oriented
//! text report consumed by schema visualisers.

pub mod classify;
pub mod error;
pub mod fixups;
pub mod graph;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod render;
pub mod schema;

pub use classify::classify_relations;
pub use error::{Error, Result};
pub use fixups::{AppliedFixup, Fixup, FixupReport, KNOWN_FIXUPS, apply_fixup_table, apply_fixups};
pub use graph::{BuildStats, GraphSummary, populate_graph, summarize_graph};
pub use model::{EntityDefinition, MemberGroup, MemberKind, RelationMember};
pub use naming::{TableName, normalize_name};
pub use pipeline::{PipelineMetrics, PipelineOutput, run_pipeline};
pub use render::render_schema;
pub use schema::{Column, ColumnKind, SCALAR_KINDS, SchemaGraph, Table};

/// Type tag the catalog uses for members that reference another definition.
pub const RELATION_TYPE_TAG: &str = "Relation";
