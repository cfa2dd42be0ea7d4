use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailblocks_common::{DocumentStore, FileStore};
use mailblocks_editor::{EditorConfig, IdStrategy, DEFAULT_CONFIG_NAME};
use mailblocks_model::{RandomIds, Row, Template};
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Template file to create
    #[arg(short, long, default_value = "template.json")]
    pub template: String,

    /// Id strategy for new entities (random, sequential)
    #[arg(long, default_value = "random")]
    pub ids: String,

    /// Start with one empty row
    #[arg(long)]
    pub with_row: bool,

    /// Force overwrite existing files
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);
    let template_path = cwd.join(&args.template);

    // Check if files already exist
    if !args.force {
        for path in [&config_path, &template_path] {
            if path.exists() {
                println!(
                    "{} {} already exists",
                    "⚠️".yellow(),
                    path.display().to_string().bright_white()
                );
                println!("Use --force to overwrite");
                return Ok(());
            }
        }
    }

    let id_strategy = match args.ids.as_str() {
        "random" => IdStrategy::Random,
        "sequential" => IdStrategy::Sequential,
        other => {
            return Err(anyhow::anyhow!(
                "Invalid id strategy: {}. Use: random or sequential",
                other
            ));
        }
    };

    println!(
        "{}",
        "📝 Initializing Mailblocks project...".bright_blue().bold()
    );

    let config = EditorConfig {
        id_strategy,
        ..Default::default()
    };
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json + "\n")?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    // The body id seeds sequential ids, so it is always random.
    let mut ids = RandomIds;
    let mut template = Template::blank(&mut ids);
    if args.with_row {
        let mut row_ids = config.id_source(&template);
        template.body.rows.push(Row::new(row_ids.as_mut()));
    }
    FileStore::new(&template_path).save(&template)?;
    println!("  {} Created {}", "✓".green(), args.template);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Write mutations to a JSON file");
    println!("  2. Run: mailblocks apply {} mutations.json", args.template);
    println!("  3. Run: mailblocks inspect {}", args.template);

    Ok(())
}
