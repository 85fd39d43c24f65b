use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result, bail};
use comfy_table::Table;
use tracing::{info, info_span};

use pics_cli::sheet::{output_path, output_range, write_output_column};
use pics_model::{FeatureCatalog, RuleConfig, VariableContext};
use pics_resolve::{ResolverContext, default_workers, predicates, resolve_batch_parallel};
use pics_standards::{
    load_conformance_sheet, load_feature_catalog, load_rule_config, load_scope_variables,
};

use crate::cli::{ExplainArgs, LookupArgs, LookupSources, ResolveArgs};
use crate::summary::apply_table_style;
use crate::types::{ResolveResult, SheetSummary};

fn load_context(sources: &LookupSources, rules: RuleConfig) -> Result<ResolverContext> {
    let catalog = load_feature_catalog(&sources.features).context("load feature catalog")?;
    let scopes = load_scope_variables(&sources.scopes).context("load scope variables")?;
    Ok(ResolverContext::new(rules, scopes, catalog))
}

pub fn run_resolve(args: &ResolveArgs) -> Result<ResolveResult> {
    let mut rules = load_rule_config(&args.sources.rules).context("load rule configuration")?;
    if let Some(column) = &args.column {
        rules = rules.with_conformance_column(column.clone());
    }
    rules.validate().context("validate rule configuration")?;
    let column = rules.conformance_column().to_string();
    if column == args.output_column {
        bail!("output column {column:?} would overwrite the conformance column");
    }
    let context = load_context(&args.sources, rules)?;
    let workers = args.jobs.unwrap_or_else(default_workers);
    if let Some(dir) = &args.output_dir
        && !args.dry_run
    {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir: {}", dir.display()))?;
    }

    let mut sheets = Vec::with_capacity(args.sheets.len());
    for path in &args.sheets {
        let sheet = sheet_name(path);
        let span = info_span!("sheet", sheet = %sheet);
        let _guard = span.enter();
        let start = Instant::now();

        let (table, inputs) = load_conformance_sheet(path, &column)
            .with_context(|| format!("load sheet: {}", path.display()))?;
        let report = resolve_batch_parallel(&context, &inputs, workers);
        let summary = report.summary();

        let (output, range) = if args.dry_run {
            (None, None)
        } else {
            let target = output_path(path, args.output_dir.as_deref());
            let column_index =
                write_output_column(&table, &args.output_column, &report.values(), &target)?;
            (Some(target), Some(output_range(column_index, inputs.len())))
        };
        info!(
            rows = summary.total,
            unresolved = summary.unresolved,
            range = range.as_deref().unwrap_or("-"),
            duration_ms = start.elapsed().as_millis(),
            "sheet resolved"
        );
        sheets.push(SheetSummary {
            sheet,
            input: path.clone(),
            output,
            output_range: range,
            summary,
            diagnostics: report.diagnostics,
        });
    }
    Ok(ResolveResult { sheets })
}

pub fn run_explain(args: &ExplainArgs) -> Result<()> {
    let rules = load_rule_config(&args.sources.rules).context("load rule configuration")?;
    let context = load_context(&args.sources, rules)?;
    let variable = VariableContext::new(args.context.as_str());
    let result = context.resolve_text(&args.text, &variable);
    let original = args.text.trim();
    let text = context.working_text(original);
    let scoped = predicates::split_scope_prefix(&text);

    let mut table = Table::new();
    table.set_header(vec!["Check", "Value"]);
    apply_table_style(&mut table);
    table.add_row(vec!["Input".to_string(), original.to_string()]);
    table.add_row(vec!["Working text".to_string(), text.clone()]);
    table.add_row(vec![
        "Row scope".to_string(),
        variable.scope_prefix().unwrap_or("-").to_string(),
    ]);
    table.add_row(vec![
        "Suffix group".to_string(),
        predicates::suffix_group(original).unwrap_or("-").to_string(),
    ]);
    table.add_row(vec![
        "Pipe list".to_string(),
        predicates::is_pipe_list(&text).to_string(),
    ]);
    table.add_row(vec![
        "Bracket delimited".to_string(),
        predicates::is_bracket_delimited(original).to_string(),
    ]);
    table.add_row(vec![
        "Annotated variable".to_string(),
        predicates::annotated_variable(original).unwrap_or("-").to_string(),
    ]);
    table.add_row(vec![
        "Direct value".to_string(),
        predicates::is_direct_value(&text, context.rules()).to_string(),
    ]);
    table.add_row(vec![
        "Scoped prefix".to_string(),
        scoped
            .map(|(prefix, value)| {
                let registered = if context.scopes().contains(prefix) {
                    "registered"
                } else {
                    "unregistered"
                };
                format!("{prefix} ({registered}) / {value}")
            })
            .unwrap_or_else(|| "-".to_string()),
    ]);
    table.add_row(vec![
        "Catalog records".to_string(),
        context.catalog().len().to_string(),
    ]);
    table.add_row(vec!["Stage".to_string(), result.stage.to_string()]);
    table.add_row(vec!["Expression".to_string(), result.expression.clone()]);
    println!("{table}");
    Ok(())
}

pub fn run_lookup(args: &LookupArgs) -> Result<()> {
    let catalog = load_feature_catalog(&args.features).context("load feature catalog")?;
    print_records(&catalog, &args.name, args.scope.as_deref());
    Ok(())
}

fn print_records(catalog: &FeatureCatalog, name: &str, scope: Option<&str>) {
    let records = match scope {
        Some(scope) => catalog.lookup_by_name_and_prefix(name, scope),
        None => catalog.lookup_by_name(name),
    };
    if records.is_empty() {
        println!("No feature registered as {name:?}");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "PICS name", "Variable", "Scope"]);
    apply_table_style(&mut table);
    for (idx, record) in records.iter().enumerate() {
        table.add_row(vec![
            (idx + 1).to_string(),
            record.pics_name.clone(),
            record.variable.clone(),
            record.scope_prefix.clone(),
        ]);
    }
    println!("{table}");
}

fn sheet_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("sheet")
        .to_string()
}
