use crate::schema::{Column, SchemaGraph};

/// Render `graph` as the line-oriented schema report.
///
/// Tables appear in ordinal name order, each followed by its columns ordered
/// by `(name, kind)` and a blank line. Plain scalar columns render as
/// `  <name> <kind>`; everything else as `  <name> relation fk <kind>.<name>`.
pub fn render_schema(graph: &SchemaGraph) -> String {
    let mut out = String::new();

    for table in graph.sorted_tables() {
        out.push_str(table.name.as_str());
        out.push('\n');

        for column in table.sorted_columns() {
            render_column(&mut out, column);
        }

        out.push('\n');
    }

    out
}

fn render_column(out: &mut String, column: &Column) {
    let kind = column.kind.as_str();
    let line = if column.kind.is_plain() {
        format!("  {} {}\n", column.name, kind)
    } else {
        format!("  {name} relation fk {kind}.{name}\n", name = column.name)
    };
    out.push_str(&line);
}
