use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

mod cli;
mod config;

use cli::Cli;
use cli::commands::{Commands, split_field};
use config::Config;

use botdesk::catalog::{ToolCatalog, ToolEntry};
use botdesk::client::{Attachment, HttpBotClient, HttpClientConfig};
use botdesk::render::{Block, Copier, Document, SystemClipboard, render};
use botdesk::schema::{FieldKind, FieldSpec};
use botdesk::workspace::{InvocationPhase, Workspace};

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("botdesk")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("botdesk.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn run_application(cli: &Cli, config: &Config) -> Result<()> {
    info!("Starting application");

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
    }

    match &cli.command {
        // Default: show the catalog
        None => handle_list_command(None, config),
        Some(Commands::List { category }) => handle_list_command(category.as_deref(), config),
        Some(Commands::Describe { tool }) => handle_describe_command(tool, config),
        Some(Commands::Invoke {
            tool,
            fields,
            attach,
            copy,
        }) => handle_invoke_command(tool, fields, attach.as_deref(), *copy, config),
    }
}

fn load_catalog(config: &Config) -> Result<ToolCatalog> {
    match &config.catalog.path {
        Some(path) => ToolCatalog::from_file(path)
            .context(format!("Failed to load catalog from {}", path.display())),
        None => Ok(ToolCatalog::builtin()),
    }
}

fn handle_list_command(category: Option<&str>, config: &Config) -> Result<()> {
    info!("Listing catalog (category: {:?})", category);
    let catalog = load_catalog(config)?;

    let ids: Vec<String> = match category {
        Some(c) => catalog.by_category(c).iter().map(|e| e.id().to_string()).collect(),
        None => catalog.list().iter().map(|s| s.to_string()).collect(),
    };

    if ids.is_empty() {
        println!("{}", "No bots found".yellow());
        return Ok(());
    }

    for id in ids {
        if let Some(entry) = catalog.get(&id) {
            let d = &entry.descriptor;
            let attach = if d.accepts_attachment { " [file]" } else { "" };
            println!(
                "{:<22} {} ({} v{}){}",
                d.id.green(),
                d.name,
                d.category,
                d.version,
                attach.dimmed()
            );
        }
    }
    Ok(())
}

fn handle_describe_command(tool: &str, config: &Config) -> Result<()> {
    info!("Describing tool: {}", tool);
    let catalog = load_catalog(config)?;
    let entry = catalog.entry(tool)?;

    print_entry(entry);
    Ok(())
}

fn print_entry(entry: &ToolEntry) {
    let d = &entry.descriptor;
    println!("{} - {} ({} v{})", d.id.green().bold(), d.name, d.category, d.version);
    if d.accepts_attachment {
        println!("  accepts a file attachment");
    }
    println!("  fields:");
    for field in &entry.fields {
        println!("    {}", describe_field(field));
    }
}

fn describe_field(field: &FieldSpec) -> String {
    let kind = match field.kind {
        FieldKind::Text => "text".to_string(),
        FieldKind::LongText => "long text".to_string(),
        FieldKind::Number => "number".to_string(),
        FieldKind::Choice => format!("choice: {}", field.choices.join("|")),
        FieldKind::File => "file".to_string(),
    };

    let mut parts = vec![format!("{} ({})", field.name, kind)];
    if let Some(default) = &field.default {
        parts.push(format!("default {}", default));
    }
    if !field.required {
        parts.push("optional".to_string());
    }
    if let Some(dep) = &field.depends_on {
        parts.push(format!("when {} = {}", dep.field, dep.value));
    }
    let summary = parts.join(", ");

    if field.label != field.name {
        format!("{} - {}", summary, field.label)
    } else {
        summary
    }
}

fn handle_invoke_command(
    tool: &str,
    raw_fields: &[String],
    attach: Option<&std::path::Path>,
    copy: bool,
    config: &Config,
) -> Result<()> {
    info!("Invoking tool: {}", tool);

    let mut values = HashMap::new();
    for raw in raw_fields {
        let (name, value) = split_field(raw)
            .ok_or_else(|| eyre!("invalid --field '{}', expected NAME=VALUE", raw))?;
        values.insert(name.to_string(), value.to_string());
    }

    let attachment = match attach {
        Some(path) => {
            let bytes = fs::read(path)
                .context(format!("Failed to read attachment {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "attachment".to_string());
            Some(Attachment::new(file_name, bytes))
        }
        None => None,
    };

    let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
    runtime.block_on(run_invocation(tool, values, attachment, copy, config))
}

async fn run_invocation(
    tool: &str,
    values: HashMap<String, String>,
    attachment: Option<Attachment>,
    copy: bool,
    config: &Config,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let client = Arc::new(HttpBotClient::new(HttpClientConfig {
        base_url: config.backend.base_url.clone(),
        timeout: Duration::from_millis(config.backend.timeout_ms),
    })?);
    let workspace = Workspace::new(catalog, client);

    let submission = workspace.submit(tool, &values, attachment)?;
    println!(
        "{} {} at {}",
        "Submitted".green(),
        submission.invocation_id,
        chrono::Local::now().format("%H:%M:%S")
    );

    let mut status = submission.status;
    let mut note_shown = false;
    println!("{} {}", "status:".cyan(), status.borrow_and_update().message());
    loop {
        if !workspace.state().phase.is_pending() {
            break;
        }
        tokio::select! {
            changed = status.changed() => {
                if changed.is_ok() {
                    let tier = *status.borrow_and_update();
                    println!("{} {}", "status:".cyan(), tier.message());
                    if let Some(note) = tier.note() {
                        if !note_shown {
                            println!("  {}", note.dimmed());
                            note_shown = true;
                        }
                    }
                }
            }
            _ = tokio::time::sleep(Duration::from_millis(200)) => {}
        }
    }

    let state = workspace.state();
    match state.phase {
        InvocationPhase::Succeeded => {
            let raw = state.result.unwrap_or_default();
            println!();
            print_document(&render(&raw));

            if copy {
                let mut copier = Copier::new(SystemClipboard::new());
                if copier.copy(&raw) {
                    println!("{}", "Copied response to clipboard".green());
                } else {
                    println!("{}", "Could not access the clipboard".yellow());
                }
            }
            Ok(())
        }
        InvocationPhase::Failed => {
            let reason = state.error_reason.unwrap_or_else(|| "unknown error".to_string());
            eprintln!("{}", "Run the same command again to retry.".yellow());
            Err(eyre!(reason))
        }
        other => Err(eyre!("invocation ended in unexpected phase {:?}", other)),
    }
}

fn print_document(doc: &Document) {
    let mut fence_index = 0;
    for block in &doc.blocks {
        match block {
            Block::Heading { level, text } => {
                let marker = "#".repeat(usize::from(*level));
                println!("{}", format!("{} {}", marker, text).bold());
            }
            Block::Paragraph(text) => {
                println!("{}", text);
                println!();
            }
            Block::Bullets(items) => {
                for item in items {
                    println!("  - {}", item);
                }
                println!();
            }
            Block::CodeFence { language, code } => {
                fence_index += 1;
                let tag = language.as_deref().unwrap_or("code");
                println!("{}", format!("--- block {} ({}) ---", fence_index, tag).dimmed());
                for line in code.lines() {
                    println!("  {}", line);
                }
                println!("{}", "---".dimmed());
                println!();
            }
        }
    }
}

fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // Run the main application logic
    run_application(&cli, &config).context("Application failed")?;

    Ok(())
}
