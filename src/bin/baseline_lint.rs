//! Command-line driver
//!
//! Discovers Java sources, analyzes each file independently (in
//! parallel), and reports diagnostics. A failure on one file never
//! aborts the analysis of the others. Exits nonzero only when an
//! error-severity diagnostic remains.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use walkdir::WalkDir;

use baseline_lint::fix::apply_fixes;
use baseline_lint::runner::first_fixes;
use baseline_lint::{builtin_rules, lint_with_config, Config, LintResult, Severity, SourceFile};

#[derive(Parser)]
#[command(
    name = "baseline-lint",
    about = "Static-analysis checks for discouraged Java patterns",
    version
)]
struct Cli {
    /// Files or directories to analyze
    #[arg(default_value = ".")]
    paths: Vec<PathBuf>,

    /// Apply suggested fixes in place
    #[arg(long)]
    fix: bool,

    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// List all rules and exit
    #[arg(long)]
    list_rules: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Serialize)]
struct JsonDiagnostic<'a> {
    path: &'a Path,
    line: usize,
    column: usize,
    severity: Severity,
    rule: &'a str,
    message: &'a str,
    help: Option<&'a str>,
    fixable: bool,
}

struct FileOutcome {
    path: PathBuf,
    source: SourceFile,
    result: LintResult,
    fixes_applied: usize,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.list_rules {
        list_rules();
        return Ok(ExitCode::SUCCESS);
    }

    let config = match &cli.config {
        Some(path) => {
            Config::load(path).with_context(|| format!("loading {}", path.display()))?
        }
        None => Config::default(),
    };

    let files = discover(&cli.paths);
    if files.is_empty() {
        eprintln!("no Java sources found");
        return Ok(ExitCode::SUCCESS);
    }

    let outcomes: Vec<std::result::Result<FileOutcome, String>> = files
        .par_iter()
        .map(|path| analyze(path, &config, cli.fix).map_err(|e| format!("{e:#}")))
        .collect();

    let mut failures = 0;
    let mut results = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(o) => results.push(o),
            Err(message) => {
                failures += 1;
                eprintln!("{} {message}", "error:".red().bold());
            }
        }
    }

    match cli.format {
        Format::Text => report_text(&results),
        Format::Json => report_json(&results)?,
    }

    let has_errors = results.iter().any(|o| o.result.has_errors());
    if has_errors || failures > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn list_rules() {
    for entry in builtin_rules() {
        let aliases = if entry.info.aliases.is_empty() {
            String::new()
        } else {
            format!(" (alias: {})", entry.info.aliases.join(", "))
        };
        println!(
            "{:32} {:12} {}{}",
            entry.info.name.bold(),
            entry.info.category.as_str().dimmed(),
            entry.info.description,
            aliases.dimmed()
        );
    }
}

fn discover(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_file() {
            files.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            if entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == "java")
            {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    files.sort();
    files.dedup();
    files
}

fn analyze(path: &Path, config: &Config, fix: bool) -> Result<FileOutcome> {
    let source = SourceFile::read(path)?;
    let result = lint_with_config(&source, config)?;

    if !fix {
        return Ok(FileOutcome {
            path: path.to_path_buf(),
            source,
            result,
            fixes_applied: 0,
        });
    }

    let fixes = first_fixes(&result);
    if fixes.is_empty() {
        return Ok(FileOutcome {
            path: path.to_path_buf(),
            source,
            result,
            fixes_applied: 0,
        });
    }

    let (rewritten, applied) = apply_fixes(source.text(), &fixes);
    fs::write(path, &rewritten).with_context(|| format!("writing {}", path.display()))?;

    // Re-lint the rewritten file so the report reflects what is left.
    let source = SourceFile::read(path)?;
    let result = lint_with_config(&source, config)?;
    Ok(FileOutcome {
        path: path.to_path_buf(),
        source,
        result,
        fixes_applied: applied,
    })
}

fn report_text(outcomes: &[FileOutcome]) {
    let mut errors = 0;
    let mut warnings = 0;
    let mut suggestions = 0;
    let mut fixed = 0;

    for outcome in outcomes {
        fixed += outcome.fixes_applied;
        for diag in &outcome.result.diagnostics {
            let (line, column) = outcome.source.line_col(diag.start);
            let severity = match diag.severity {
                Severity::Error => {
                    errors += 1;
                    "error".red().bold()
                }
                Severity::Warning => {
                    warnings += 1;
                    "warning".yellow().bold()
                }
                Severity::Suggestion => {
                    suggestions += 1;
                    "suggestion".cyan().bold()
                }
            };
            println!(
                "{}:{line}:{column}: {severity}: [{}] {}",
                outcome.path.display(),
                diag.rule.dimmed(),
                diag.message
            );
            if let Some(help) = &diag.help {
                println!("    {} {help}", "help:".dimmed());
            }
        }
    }

    let mut summary = format!(
        "{} error(s), {} warning(s), {} suggestion(s)",
        errors, warnings, suggestions
    );
    if fixed > 0 {
        summary.push_str(&format!(", {fixed} fix(es) applied"));
    }
    println!("{}", summary.dimmed());
}

fn report_json(outcomes: &[FileOutcome]) -> Result<()> {
    let mut diagnostics = Vec::new();
    for outcome in outcomes {
        for diag in &outcome.result.diagnostics {
            let (line, column) = outcome.source.line_col(diag.start);
            diagnostics.push(JsonDiagnostic {
                path: &outcome.path,
                line,
                column,
                severity: diag.severity,
                rule: &diag.rule,
                message: &diag.message,
                help: diag.help.as_deref(),
                fixable: !diag.fixes.is_empty(),
            });
        }
    }
    println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    Ok(())
}
