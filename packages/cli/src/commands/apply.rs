use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailblocks_common::{validate, DocumentStore, FileStore};
use mailblocks_editor::{EditResult, Editor, EditorConfig, Mutation};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Template file to edit
    pub template: PathBuf,

    /// JSON file holding one mutation or an array of mutations
    pub mutations: PathBuf,

    /// Write the result here instead of over the input
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Config file (defaults to mailblocks.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Apply and report without saving
    #[arg(long)]
    pub dry_run: bool,
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let config = match &args.config {
        Some(path) => EditorConfig::load_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EditorConfig::load(cwd)?,
    };

    let mutations = read_mutations(&args.mutations)?;
    let source = FileStore::new(&args.template);
    let mut editor = Editor::open(&source, config)
        .with_context(|| format!("Failed to open {}", args.template.display()))?;

    println!("🧩 {} Applying mutations", "Starting".green().bold());
    println!("   Template:  {}", args.template.display());
    println!("   Mutations: {}", mutations.len());
    println!();

    let description = args.mutations.display().to_string();
    editor.begin_batch(description);

    let mut applied = 0;
    for (index, mutation) in mutations.into_iter().enumerate() {
        let name = mutation.name();
        match editor.apply(mutation) {
            Ok(EditResult::Applied { version }) => {
                applied += 1;
                println!("   {} #{} {} (v{})", "✓".green(), index, name, version);
            }
            Ok(EditResult::Noop { reason }) => {
                println!("   {} #{} {}: {}", "∙".dimmed(), index, name, reason.dimmed());
            }
            Err(err) => {
                println!("   {} #{} {}: {}", "✗".red(), index, name, err);
                return Err(anyhow::anyhow!(
                    "Mutation #{} failed, nothing was saved",
                    index
                ));
            }
        }
    }
    editor.end_batch();

    let report = validate(editor.template());
    if !report.is_valid() {
        for issue in &report.issues {
            println!("   {} {}", "warning".yellow().bold(), issue);
        }
    }

    println!();
    if args.dry_run {
        println!(
            "✨ {} {} of the mutations would change the template",
            "Dry run:".yellow().bold(),
            applied
        );
        return Ok(());
    }

    let out = args.out.as_ref().unwrap_or(&args.template);
    let mut target = FileStore::new(out);
    editor.save_to(&mut target)?;
    info!(path = %out.display(), applied, "Template written");

    println!("✨ {} {} mutations applied", "Done".green().bold(), applied);
    println!("   Output: {}", out.display());

    Ok(())
}

fn read_mutations(path: &Path) -> Result<Vec<Mutation>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&raw)?;

    let mutations = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Mutation>, _>>()?,
        single => vec![serde_json::from_value(single)?],
    };
    Ok(mutations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_model::{IDGenerator, Row, Template};
    use serde_json::json;

    fn setup(mutations: Value) -> (tempfile::TempDir, PathBuf, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let mut ids = IDGenerator::from_seed("cli");
        let mut template = Template::blank(&mut ids);
        let mut row = Row::new(&mut ids);
        row.id = "row-1".to_string();
        template.body.rows.push(row);

        let template_path = dir.path().join("template.json");
        FileStore::new(&template_path).save(&template).unwrap();
        let mutations_path = dir.path().join("mutations.json");
        fs::write(&mutations_path, mutations.to_string()).unwrap();
        (dir, template_path, mutations_path)
    }

    fn args(template: PathBuf, mutations: PathBuf) -> ApplyArgs {
        ApplyArgs {
            template,
            mutations,
            out: None,
            config: None,
            dry_run: false,
        }
    }

    #[test]
    fn test_apply_saves_result() {
        let (dir, template, mutations) = setup(json!([
            { "InsertRow": { "index": -1 } },
            { "SetRowLayout": { "row_id": "row-1", "cells": [1, 2] } },
            { "DeleteRow": { "row_id": "missing" } }
        ]));

        apply(args(template.clone(), mutations), dir.path()).unwrap();

        let saved = FileStore::new(&template).load().unwrap();
        assert_eq!(saved.rows().len(), 2);
        assert_eq!(saved.rows()[0].cells, vec![1, 2]);
    }

    #[test]
    fn test_single_mutation_object() {
        let (dir, template, mutations) = setup(json!({ "InsertRow": { "index": 0 } }));
        let out = dir.path().join("out.json");

        let mut args = args(template.clone(), mutations);
        args.out = Some(out.clone());
        apply(args, dir.path()).unwrap();

        assert_eq!(FileStore::new(&out).load().unwrap().rows().len(), 2);
        assert_eq!(FileStore::new(&template).load().unwrap().rows().len(), 1);
    }

    #[test]
    fn test_failure_saves_nothing() {
        let (dir, template, mutations) = setup(json!([
            { "InsertRow": { "index": -1 } },
            { "SetRowLayout": { "row_id": "row-1", "cells": [] } }
        ]));
        let before = fs::read_to_string(&template).unwrap();

        assert!(apply(args(template.clone(), mutations), dir.path()).is_err());
        assert_eq!(fs::read_to_string(&template).unwrap(), before);
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let (dir, template, mutations) = setup(json!([{ "InsertRow": { "index": -1 } }]));
        let before = fs::read_to_string(&template).unwrap();

        let mut args = args(template.clone(), mutations);
        args.dry_run = true;
        apply(args, dir.path()).unwrap();

        assert_eq!(fs::read_to_string(&template).unwrap(), before);
    }
}
