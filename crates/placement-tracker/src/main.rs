//! `placetrack` - CLI for placement-tracker
//!
//! This binary provides the command-line interface for adding, listing,
//! deleting, and summarising tracked applications.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;

use placement_tracker::cli::{
    AddCommand, Cli, Command, ConfigCommand, DeleteCommand, ListCommand, OutputFormat,
};
use placement_tracker::render;
use placement_tracker::store::{Clock, SystemClock};
use placement_tracker::{
    init_logging, ApplicationStore, Config, LoadOrigin, MemorySlotStore, SlotStore,
    SqliteSlotStore,
};

type Store = ApplicationStore<Box<dyn SlotStore>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let Cli {
        config: config_path,
        database,
        ephemeral,
        command,
        ..
    } = cli;

    let config = Config::load_from(config_path).context("loading configuration")?;
    let open = || open_store(database.as_deref(), ephemeral, &config);

    match command {
        Command::Add(cmd) => handle_add(&mut open()?, cmd),
        Command::List(cmd) => handle_list(&open()?, &config, &cmd),
        Command::Delete(cmd) => handle_delete(&mut open()?, &cmd),
        Command::Summary(cmd) => {
            let summary = open()?.summary();
            if cmd.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", render::render_summary(&summary));
            }
            Ok(())
        }
        Command::Reset(cmd) => {
            if !cmd.yes && !prompt_yes_no("This will remove all applications. Continue?") {
                println!("Reset cancelled.");
                return Ok(());
            }
            open()?.clear()?;
            println!("All applications removed.");
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, &cmd),
    }
}

fn open_store(database: Option<&Path>, ephemeral: bool, config: &Config) -> anyhow::Result<Store> {
    let slots: Box<dyn SlotStore> = if ephemeral {
        Box::new(MemorySlotStore::new())
    } else {
        let path = database.map_or_else(|| config.database_path(), Path::to_path_buf);
        Box::new(
            SqliteSlotStore::open(&path)
                .with_context(|| format!("opening tracker database {}", path.display()))?,
        )
    };

    let store = ApplicationStore::load(slots, config.store_options())?;
    if store.origin() == LoadOrigin::Corrupt {
        eprintln!("warning: stored applications could not be read; starting with an empty list");
    }
    Ok(store)
}

fn handle_add(store: &mut Store, cmd: AddCommand) -> anyhow::Result<()> {
    let record = store.add(cmd.into_form(SystemClock.today()))?;
    println!(
        "Application for {} added successfully! (ID {})",
        record.company_name, record.id
    );
    Ok(())
}

fn handle_list(store: &Store, config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let date_format = &config.display.date_format;
    let output = match cmd.format {
        OutputFormat::Table => render::render_table(store.records(), date_format)?,
        OutputFormat::Plain => render::render_plain(store.records(), date_format)?,
        OutputFormat::Json => format!("{}\n", render::render_json(store.records())?),
    };
    print!("{output}");
    Ok(())
}

fn handle_delete(store: &mut Store, cmd: &DeleteCommand) -> anyhow::Result<()> {
    let mut confirm = |prompt: &str| cmd.yes || prompt_yes_no(prompt);

    match store.delete(cmd.id, &mut confirm) {
        Ok(true) => println!("Application deleted successfully!"),
        Ok(false) => println!("No application with ID {}.", cmd.id),
        Err(e) if e.is_declined() => println!("Deletion cancelled."),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: &ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if *json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:  {}", config.database_path().display());
                println!("  Slot key:       {}", config.storage.slot_key);
                println!();
                println!("[Tracker]");
                println!("  Seed examples:  {}", config.tracker.seed_examples);
                println!();
                println!("[Display]");
                println!("  Date format:    {}", config.display.date_format);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.clone().unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
fn prompt_yes_no(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
