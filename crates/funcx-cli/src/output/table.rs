//! Table formatting utilities for CLI output.

use comfy_table::{ContentArrangement, Table, presets};
use funcx::PipelineStep;

/// Format parsed steps as a table, one row per step.
pub fn format_steps_table(steps: &[PipelineStep]) -> Table {
    let mut table = new_table(vec!["#", "Kind", "Name", "Parameters"]);
    for (index, step) in steps.iter().enumerate() {
        let (kind, name, parameters) = match step {
            PipelineStep::Literal { value } => ("literal", format!("{value:?}"), String::new()),
            PipelineStep::Call(call) => (
                if index == 0 { "call" } else { "chained" },
                call.name.clone(),
                call.parameters
                    .iter()
                    .map(|p| format!("{p:?}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        };
        table.add_row(vec![(index + 1).to_string(), kind.to_string(), name, parameters]);
    }
    table
}

/// Format `(name, description)` rows under the given headers.
pub fn format_listing_table(headers: [&str; 2], rows: &[(String, String)]) -> Table {
    let mut table = new_table(headers.to_vec());
    for (name, description) in rows {
        table.add_row(vec![name.clone(), description.clone()]);
    }
    table
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}
