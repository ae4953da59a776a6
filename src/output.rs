//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! 001/004 beach.jpg
//!     Resampled: test_resampled_beach.jpg (4000x2667)
//!     Bordered: test_bordered_beach.jpg (4200x4200)
//! ...
//! Collage: test_collage.jpg (2 columns x 2 rows)
//! Final: test_collage_resampled_with_border.jpg (9999x9999, 1000px border)
//! ```
//!
//! ## Plan
//!
//! ```text
//! Grid: 2 columns x 2 rows (8400x8400)
//! Border: 1000px
//! Writes to /export
//!     test_resampled_beach.jpg
//!     test_bordered_beach.jpg
//!     ...
//!     test_collage.jpg
//!     test_collage_resampled_with_border.jpg
//! ```
//!
//! # Architecture
//!
//! Each `format_*` function returns `Vec<String>` and is pure; the `print_*`
//! wrappers write to stdout. `--json` output goes through the `*_json`
//! formatters for both plans and completed runs, whatever chose the files.

use crate::pipeline::{PipelineEvent, PipelinePlan, RunReport, display_name};

/// Format a 1-based position as `NNN/TTT`.
fn format_position(index: usize, total: usize) -> String {
    format!("{:0>3}/{:0>3}", index, total)
}

fn grid_label(columns: usize, rows: usize) -> String {
    format!("{columns} columns x {rows} rows")
}

/// Format a single pipeline event as display lines.
pub fn format_pipeline_event(event: &PipelineEvent) -> Vec<String> {
    match event {
        PipelineEvent::ImageStarted {
            index,
            total,
            source,
        } => vec![format!(
            "{} {}",
            format_position(*index, *total),
            display_name(source)
        )],
        PipelineEvent::ImageResampled {
            output,
            width,
            height,
            ..
        } => vec![format!(
            "    Resampled: {} ({}x{})",
            display_name(output),
            width,
            height
        )],
        PipelineEvent::ImageBordered { output, size, .. } => vec![format!(
            "    Bordered: {} ({}x{})",
            display_name(output),
            size,
            size
        )],
        PipelineEvent::CollageComposed { output, grid } => vec![format!(
            "Collage: {} ({})",
            display_name(output),
            grid_label(grid.columns, grid.rows)
        )],
        PipelineEvent::Finished {
            output,
            width,
            height,
            border,
        } => vec![format!(
            "Final: {} ({}x{}, {}px border)",
            display_name(output),
            width,
            height,
            border
        )],
    }
}

/// Format a plan: grid, border and every file a build would write.
pub fn format_plan(plan: &PipelinePlan) -> Vec<String> {
    let (w, h) = plan.collage_size;
    let mut lines = vec![
        format!(
            "Grid: {} ({}x{})",
            grid_label(plan.grid.columns, plan.grid.rows),
            w,
            h
        ),
        format!("Border: {}px", plan.border),
        format!("Writes to {}", plan.export_dir.display()),
    ];
    for image in &plan.images {
        lines.push(format!("    {}", display_name(&image.resampled)));
        lines.push(format!("    {}", display_name(&image.bordered)));
    }
    lines.push(format!("    {}", display_name(&plan.collage)));
    lines.push(format!("    {}", display_name(&plan.final_output)));
    lines
}

/// Final status line naming the deliverable.
pub fn format_report(report: &RunReport) -> Vec<String> {
    vec![format!(
        "Collage created: {}",
        report.final_output.display()
    )]
}

/// Pretty JSON for `plan --json`.
pub fn format_plan_json(plan: &PipelinePlan) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(plan)
}

/// Pretty JSON for `build --json`, with or without dialogs.
pub fn format_report_json(report: &RunReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn print_plan(plan: &PipelinePlan) {
    for line in format_plan(plan) {
        println!("{}", line);
    }
}

pub fn print_report(report: &RunReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}
