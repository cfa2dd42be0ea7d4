use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use mailblocks_common::{DocumentStore, FileStore};
use mailblocks_model::{column_widths_px, Template};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Template file to inspect
    pub template: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

/// Flattened view of a template for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Outline {
    body_id: String,
    schema_version: u32,
    content_width: u32,
    rows: Vec<RowOutline>,
}

#[derive(Debug, Serialize)]
struct RowOutline {
    id: String,
    cells: Vec<u32>,
    columns: Vec<ColumnOutline>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ColumnOutline {
    id: String,
    width_px: Option<f64>,
    blocked: bool,
    contents: Vec<ContentOutline>,
}

#[derive(Debug, Serialize)]
struct ContentOutline {
    id: String,
    #[serde(rename = "type")]
    content_type: String,
    summary: String,
}

impl Outline {
    fn of(template: &Template) -> Self {
        let content_width = template.body.values.content_width;
        let rows = template
            .rows()
            .iter()
            .map(|row| {
                let widths = column_widths_px(&row.cells, content_width);
                let columns = row
                    .columns
                    .iter()
                    .enumerate()
                    .map(|(index, column)| ColumnOutline {
                        id: column.id.clone(),
                        width_px: widths.as_ref().and_then(|w| w.get(index).copied()),
                        blocked: column.values.is_blocked(),
                        contents: column
                            .contents
                            .iter()
                            .map(|content| ContentOutline {
                                id: content.id.clone(),
                                content_type: content.content_type().to_string(),
                                summary: content.values.summary(),
                            })
                            .collect(),
                    })
                    .collect();
                RowOutline {
                    id: row.id.clone(),
                    cells: row.cells.clone(),
                    columns,
                }
            })
            .collect();

        Self {
            body_id: template.body.id.clone(),
            schema_version: template.schema_version,
            content_width,
            rows,
        }
    }
}

pub fn inspect(args: InspectArgs) -> Result<()> {
    let template = FileStore::new(&args.template)
        .load()
        .with_context(|| format!("Failed to load {}", args.template.display()))?;
    let outline = Outline::of(&template);

    match args.format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&outline)?);
        }
        "text" => print_text(&args, &outline),
        other => {
            return Err(anyhow::anyhow!(
                "Invalid format: {}. Use: text or json",
                other
            ));
        }
    }

    Ok(())
}

fn print_text(args: &InspectArgs, outline: &Outline) {
    println!(
        "{} {}",
        args.template.display().to_string().bright_white().bold(),
        format!(
            "(schema v{}, {}px wide, {} rows)",
            outline.schema_version,
            outline.content_width,
            outline.rows.len()
        )
        .dimmed()
    );

    for row in &outline.rows {
        println!("{} {} {:?}", "row".blue().bold(), row.id, row.cells);
        for column in &row.columns {
            let width = column
                .width_px
                .map(|w| format!("{w:.0}px"))
                .unwrap_or_else(|| "?px".to_string());
            let blocked = if column.blocked {
                " blocked".red().to_string()
            } else {
                String::new()
            };
            println!("  {} {} {}{}", "column".cyan(), column.id, width.dimmed(), blocked);

            if column.contents.is_empty() {
                println!("    {}", "(empty)".dimmed());
            }
            for content in &column.contents {
                println!(
                    "    {} {} {}",
                    content.content_type.green(),
                    content.id,
                    short(&content.summary).dimmed()
                );
            }
        }
    }
}

/// First line of a block summary with markup removed
fn short(summary: &str) -> String {
    let mut text = String::with_capacity(summary.len());
    let mut in_tag = false;
    for ch in summary.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > 48 {
        let cut: String = line.chars().take(47).collect();
        format!("{cut}…")
    } else {
        line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailblocks_model::{ContentType, IDGenerator, Palette, Row};

    #[test]
    fn test_outline_widths() {
        let mut ids = IDGenerator::from_seed("i");
        let mut template = Template::blank(&mut ids);
        let mut row = Row::new(&mut ids);
        row.cells = vec![1, 3];
        row.columns.push(mailblocks_model::Column::new(&mut ids));
        row.columns[1]
            .contents
            .push(Palette::default().instantiate(ContentType::Button, &mut ids));
        template.body.rows.push(row);

        let outline = Outline::of(&template);
        let columns = &outline.rows[0].columns;
        assert_eq!(columns[0].width_px, Some(175.0));
        assert_eq!(columns[1].width_px, Some(525.0));
        assert_eq!(columns[1].contents[0].content_type, "button");
    }

    #[test]
    fn test_short_strips_markup() {
        assert_eq!(short("<p>Hello <b>world</b></p>"), "Hello world");
        assert_eq!(short(&"x".repeat(60)).chars().count(), 48);
    }
}
