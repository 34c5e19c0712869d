use serde::{Deserialize, Serialize};

use crate::naming::TableName;
use crate::schema::{Column, SchemaGraph};

/// A relation the catalog does not expose on its owning definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fixup {
    pub owner: &'static str,
    pub column: &'static str,
    pub target: &'static str,
}

const fn fixup(owner: &'static str, column: &'static str, target: &'static str) -> Fixup {
    Fixup {
        owner,
        column,
        target,
    }
}

/// Known one-sided relations of the Content Hub catalog.
pub const KNOWN_FIXUPS: &[Fixup] = &[
    fixup("MAction", "ActionToStateMachine", "MAutomationStateMachine"),
    fixup("MAction", "ActionToScript", "MScript"),
    fixup("MAction", "DetailsPageToAction", "PortalPage"),
    fixup(
        "MAction",
        "BlockToDeliverablesLifecycleStatus",
        "MProjectDeliverablesLifecycleStatus",
    ),
    fixup(
        "MAction",
        "TaskToDeliverablesLifecycleStatus",
        "MProjectDeliverablesLifecycleStatus",
    ),
    fixup(
        "MProjectBlock",
        "BlockToDeliverablesLifecycleStatus",
        "MProjectDeliverablesLifecycleStatus",
    ),
    fixup(
        "MProjectTask",
        "TaskToDeliverablesLifecycleStatus",
        "MProjectDeliverablesLifecycleStatus",
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedFixup {
    pub owner: String,
    pub column: String,
    pub target: String,
    /// The owner already had a column of this name before the fixup ran.
    pub duplicate: bool,
}

/// Outcome of a fixup pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixupReport {
    pub applied: Vec<AppliedFixup>,
    /// Owners absent from the graph, one entry per skipped fixup.
    pub skipped: Vec<String>,
}

impl FixupReport {
    pub fn duplicates(&self) -> impl Iterator<Item = &AppliedFixup> {
        self.applied.iter().filter(|applied| applied.duplicate)
    }
}

/// Apply [`KNOWN_FIXUPS`] to `graph`.
pub fn apply_fixups(graph: &mut SchemaGraph) -> FixupReport {
    apply_fixup_table(graph, KNOWN_FIXUPS)
}

/// Append every fixup whose owner table exists as a reference column.
///
/// Columns are appended without deduplication against existing names; such
/// collisions are reported and logged but kept.
pub fn apply_fixup_table(graph: &mut SchemaGraph, fixups: &[Fixup]) -> FixupReport {
    let mut report = FixupReport::default();

    for fixup in fixups {
        let owner = TableName::new(fixup.owner);
        let Some(table) = graph.table_mut(&owner) else {
            report.skipped.push(fixup.owner.to_string());
            continue;
        };

        let duplicate = table.has_column(fixup.column);
        if duplicate {
            tracing::warn!(
                event = "fixup_duplicate",
                table = %owner,
                column = fixup.column,
                "fixup column already present; keeping both"
            );
        }

        table
            .columns
            .push(Column::reference(fixup.column, TableName::new(fixup.target)));
        report.applied.push(AppliedFixup {
            owner: fixup.owner.to_string(),
            column: fixup.column.to_string(),
            target: fixup.target.to_string(),
            duplicate,
        });
    }

    report
}
