use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crosswalk_cli::hash::short_hash;
use crosswalk_cli::types::{CompileResult, FileSummary};

pub fn print_summary(result: &CompileResult) {
    if result.dry_run {
        println!("Dry run: no stylesheet written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Mapping"),
        header_cell("Stylesheet"),
        header_cell("Children"),
        header_cell("Bytes"),
        header_cell("SHA-256"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_children = 0usize;
    let mut total_bytes = 0usize;
    for summary in &result.files {
        total_children += summary.children;
        total_bytes += summary.bytes;
        table.add_row(vec![
            Cell::new(display_name(&summary.source))
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            output_cell(summary),
            Cell::new(summary.children),
            Cell::new(summary.bytes),
            dim_cell(short_hash(&summary.sha256)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell(format!("{} compiled", result.files.len())),
        Cell::new(total_children).add_attribute(Attribute::Bold),
        Cell::new(total_bytes).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");
    if !result.errors.is_empty() {
        eprintln!("Errors:");
        for error in &result.errors {
            eprintln!("- {error}");
        }
    }
}

fn output_cell(summary: &FileSummary) -> Cell {
    match &summary.output {
        Some(path) => Cell::new(path.display()).fg(Color::Green),
        None => dim_cell("-"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned())
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
