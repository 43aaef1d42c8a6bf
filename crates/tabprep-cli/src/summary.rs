use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use tabprep_cli::types::RunResult;
use tabprep_model::PipelineConfig;
use tabprep_transform::{PipelineEvent, TransformSummary};

pub fn print_summary(result: &RunResult, preview: Option<usize>) {
    let report = &result.report;
    println!("Input: {}", report.input.display());
    match &report.output {
        Some(path) => println!("Output: {}", path.display()),
        None => println!("Output: (dry run, not written)"),
    }
    println!(
        "Result: {} rows x {} columns ({})",
        report.rows,
        report.columns.len(),
        report.assembly.as_str()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Transform"),
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Details"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for event in &report.events {
        let PipelineEvent::TransformApplied {
            index,
            name,
            source,
            output,
            summary,
            ..
        } = event
        else {
            continue;
        };
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(source),
            Cell::new(output),
            Cell::new(summary_details(summary)),
        ]);
    }
    println!("{table}");

    if let Some(rows) = preview {
        println!();
        println!("Preview:");
        println!("{}", preview_table(&result.table, rows));
    }
}

pub fn print_config(config: &PipelineConfig) {
    println!("Assembly: {}", config.assembly.as_str());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Kind"),
        header_cell("Source"),
        header_cell("Output"),
        header_cell("Parameters"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for (index, spec) in config.transforms.iter().enumerate() {
        table.add_row(vec![
            dim_cell(index + 1),
            Cell::new(spec.display_name()),
            Cell::new(spec.kind.label()).fg(Color::Blue),
            Cell::new(&spec.source),
            Cell::new(spec.output_name()),
            match spec.kind.parameters() {
                Some(parameters) => Cell::new(parameters),
                None => dim_cell("-"),
            },
        ]);
    }
    println!("{table}");
}

fn summary_details(summary: &TransformSummary) -> String {
    match summary {
        TransformSummary::Standardize {
            mean,
            std_dev,
            observed,
            missing,
        } => {
            let mut details = format!("mean={mean:.4} std={std_dev:.4} n={observed}");
            if *missing > 0 {
                details.push_str(&format!(" missing={missing}"));
            }
            details
        }
        TransformSummary::Encode {
            vocabulary,
            reserved,
        } => {
            let mut details = format!("{} categories", vocabulary.len());
            if *reserved > 0 {
                details.push_str(&format!(
                    ", {reserved} missing -> {}",
                    vocabulary.reserved_code()
                ));
            }
            details
        }
        TransformSummary::Fill { filled } => format!("{filled} filled"),
    }
}

fn preview_table(df: &DataFrame, rows: usize) -> Table {
    let head = df.head(Some(rows));
    let mut table = Table::new();
    let header: Vec<Cell> = head
        .get_column_names()
        .into_iter()
        .map(|name| header_cell(name.as_str()))
        .collect();
    table.set_header(header);
    apply_table_style(&mut table);
    for row in 0..head.height() {
        let cells = head.get_columns().iter().map(|column| match column.get(row) {
            Ok(AnyValue::Null) => dim_cell("null"),
            Ok(value) => Cell::new(value),
            Err(_) => dim_cell("?"),
        });
        table.add_row(cells.collect::<Vec<_>>());
    }
    table
}

fn apply_table_style(table: &mut Table) {
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
        .set_width(120);
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
