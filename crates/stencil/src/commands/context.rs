//! Version-pin context commands

use crate::cli::{ContextCommands, ContextRenderArgs, ContextShowArgs};
use anyhow::{Context, Result};
use camino::Utf8Path;
use serde_json::Value;
use std::fs;
use stencil_core::{TemplateRenderer, VersionContext};
use tabled::{settings::Style, Table, Tabled};

use super::load_config;
use crate::output;

pub fn run(cmd: ContextCommands, config: Option<&Utf8Path>) -> Result<()> {
    match cmd {
        ContextCommands::Show(args) => show(args, config),
        ContextCommands::Render(args) => render(args, config),
    }
}

/// Embedded pins, then stencil.yaml `versions`, then `--set`
fn resolve(config: Option<&Utf8Path>, overrides: &[String]) -> Result<VersionContext> {
    let config = load_config(config)?;
    let mut context = VersionContext::resolve(&config)?;
    context.apply_overrides(overrides)?;
    Ok(context)
}

#[derive(Tabled)]
struct PinRow {
    name: String,
    value: String,
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn show(args: ContextShowArgs, config: Option<&Utf8Path>) -> Result<()> {
    let context = resolve(config, &args.overrides)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&context)?);
        return Ok(());
    }

    let rows: Vec<PinRow> = context
        .iter()
        .map(|(name, value)| PinRow {
            name: name.clone(),
            value: display_value(value),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::sharp());
    println!("{}", table);

    Ok(())
}

fn render(args: ContextRenderArgs, config: Option<&Utf8Path>) -> Result<()> {
    let context = resolve(config, &args.overrides)?;
    let mut renderer = TemplateRenderer::new();
    let rendered = renderer
        .render_file(&args.template, &context)
        .with_context(|| format!("Failed to render {}", args.template))?;

    match args.output {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("Failed to write {}", path))?;
            output::success(format!("Rendered {} to {}", args.template, path));
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
