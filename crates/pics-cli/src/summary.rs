use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pics_model::Stage;

use crate::types::{ResolveResult, SheetSummary};

pub fn print_summary(result: &ResolveResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Resolved"),
        header_cell("Unresolved"),
        header_cell("Range"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    let mut total_rows = 0usize;
    let mut total_unresolved = 0usize;
    for sheet in &result.sheets {
        total_rows += sheet.summary.total;
        total_unresolved += sheet.summary.unresolved;
        table.add_row(vec![
            Cell::new(&sheet.sheet)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.summary.total),
            Cell::new(sheet.summary.resolved()),
            count_cell(sheet.summary.unresolved, Color::Yellow),
            optional_cell(sheet.output_range.as_deref()),
            optional_cell(
                sheet
                    .output
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .as_deref(),
            ),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_rows).add_attribute(Attribute::Bold),
        Cell::new(total_rows - total_unresolved).add_attribute(Attribute::Bold),
        count_cell(total_unresolved, Color::Yellow).add_attribute(Attribute::Bold),
        dim_cell("-"),
        dim_cell("-"),
    ]);
    println!("{table}");
    print_stage_table(&result.sheets);
    print_unresolved_table(&result.sheets);
}

fn print_stage_table(sheets: &[SheetSummary]) {
    let mut table = Table::new();
    let mut header = vec![header_cell("Stage")];
    header.extend(sheets.iter().map(|sheet| header_cell(&sheet.sheet)));
    table.set_header(header);
    apply_table_style(&mut table);
    for idx in 1..=sheets.len() {
        align_column(&mut table, idx, CellAlignment::Right);
    }
    for stage in Stage::CASCADE {
        if sheets.iter().all(|sheet| sheet.summary.count(stage) == 0) {
            continue;
        }
        let mut row = vec![Cell::new(stage.label())];
        row.extend(
            sheets
                .iter()
                .map(|sheet| count_cell(sheet.summary.count(stage), stage_color(stage))),
        );
        table.add_row(row);
    }
    println!();
    println!("Stages:");
    println!("{table}");
}

fn print_unresolved_table(sheets: &[SheetSummary]) {
    if sheets.iter().all(|sheet| sheet.diagnostics.is_empty()) {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Row"),
        header_cell("Text"),
        header_cell("Stage"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sheet in sheets {
        for diagnostic in &sheet.diagnostics {
            let text = if diagnostic.text.trim().is_empty() {
                dim_cell("(blank)")
            } else {
                Cell::new(&diagnostic.text)
            };
            table.add_row(vec![
                Cell::new(&sheet.sheet),
                Cell::new(diagnostic.row),
                text,
                Cell::new(diagnostic.stage.label()).fg(stage_color(diagnostic.stage)),
            ]);
        }
    }
    println!();
    println!("Unresolved rows:");
    println!("{table}");
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
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::NoMatch => Color::Red,
        Stage::ScopedPrefix => Color::Yellow,
        _ => Color::Green,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
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
