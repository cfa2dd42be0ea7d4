use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mailblocks_common::{validate as validate_template, DocumentStore, FileStore};
use mailblocks_editor::DEFAULT_CONFIG_NAME;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Template files, directories or glob patterns
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Show templates without issues too
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Totals {
    files: usize,
    invalid: usize,
    issues: usize,
}

pub fn validate(args: ValidateArgs) -> Result<()> {
    println!("🔍 {} Mailblocks Validator", "Starting".green().bold());
    println!();

    let files = collect_files(&args.inputs)?;
    if files.is_empty() {
        return Err(anyhow::anyhow!("No template files found"));
    }

    let totals = check_files(&files, args.verbose);

    println!();
    println!(
        "✨ {} Validation complete!",
        if totals.invalid > 0 {
            "Done".red().bold()
        } else {
            "Done".green().bold()
        }
    );
    println!("   Files checked: {}", totals.files);

    if totals.invalid > 0 {
        println!("   {} {}", "Issues:".red(), totals.issues);
        return Err(anyhow::anyhow!(
            "{} of {} templates have problems",
            totals.invalid,
            totals.files
        ));
    }

    println!("   {} No issues found!", "✓".green());
    Ok(())
}

fn check_files(files: &[PathBuf], verbose: bool) -> Totals {
    let mut totals = Totals::default();

    for file in files {
        totals.files += 1;

        let template = match FileStore::new(file).load() {
            Ok(template) => template,
            Err(err) => {
                println!("{} {}: {}", "✗".red(), file.display(), err);
                totals.invalid += 1;
                totals.issues += 1;
                continue;
            }
        };

        let report = validate_template(&template);
        if report.is_valid() {
            if verbose {
                println!(
                    "{} {} {}",
                    "✓".green(),
                    file.display(),
                    format!(
                        "({} rows, {} columns, {} blocks)",
                        report.rows, report.columns, report.contents
                    )
                    .dimmed()
                );
            }
            continue;
        }

        totals.invalid += 1;
        totals.issues += report.issues.len();
        println!("{}", file.display());
        for issue in &report.issues {
            println!("  {} {}", "error".red().bold(), issue);
        }
    }

    totals
}

fn collect_files(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        let path = Path::new(input);
        if path.is_file() {
            files.push(path.to_path_buf());
        } else if path.is_dir() {
            files.extend(find_template_files(path));
        } else {
            // Anything else is treated as a glob pattern
            let mut matched = false;
            for entry in glob::glob(input)? {
                let entry = entry?;
                if entry.is_file() {
                    files.push(entry);
                    matched = true;
                }
            }
            if !matched {
                return Err(anyhow::anyhow!("Input path does not exist: {}", input));
            }
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn find_template_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path.extension().map(|e| e == "json").unwrap_or(false)
                && path.file_name().map(|n| n != DEFAULT_CONFIG_NAME).unwrap_or(false)
        })
        .collect()
}
