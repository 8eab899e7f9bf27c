//! `roster` - CLI for the student record store
//!
//! Each subcommand maps to one action on the enrollment screen: `add` submits
//! the form, `list` opens the student table and `show` opens one row's details.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::Parser;

use roster::cli::{
    AddCommand, Cli, Command, ConfigCommand, ListCommand, OutputFormat, ShowCommand,
};
use roster::view::{render_details, render_plain, render_table};
use roster::{init_logging, Alert, App, Config, Error, RecordStore, SqliteKv};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::load_from(cli.config.clone())?;

    match cli.command {
        Command::Add(cmd) => handle_add(&config, &cmd).await,
        Command::List(cmd) => handle_list(&config, &cmd).await,
        Command::Show(cmd) => handle_show(&config, &cmd).await,
        Command::Courses => {
            handle_courses(&config);
            Ok(())
        }
        Command::Status(cmd) => handle_status(&config, cmd.json).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Print an error the way the screen would surface it.
fn report(err: &anyhow::Error) {
    match err.downcast_ref::<Error>().map(Alert::from_error) {
        Some(Alert::Blocking(msg)) => eprintln!("{msg}"),
        Some(Alert::Notice(_)) => eprintln!("warning: {err:#}"),
        None => eprintln!("error: {err:#}"),
    }
}

fn open_app(config: &Config) -> anyhow::Result<App<SqliteKv>> {
    let path = config.database_path();
    let kv = SqliteKv::open(&path)
        .with_context(|| format!("could not open student storage at {}", path.display()))?;
    Ok(App::new(RecordStore::with_key(
        kv,
        config.storage.store_key.as_str(),
    )))
}

async fn handle_add(config: &Config, cmd: &AddCommand) -> anyhow::Result<()> {
    config.check_course(&cmd.course)?;

    let mut app = open_app(config)?;
    *app.form_mut() = cmd.to_form();

    let record = app.add_student().await?;
    println!(
        "Added {} ({}, {}). {} student(s) stored.",
        record.full_name(),
        record.course,
        record.username,
        app.view().rows().len()
    );
    Ok(())
}

async fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    let rows = app.view_students().await?;

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Plain => {
            if !rows.is_empty() {
                println!("{}", render_plain(rows));
            }
        }
        OutputFormat::Table => {
            if rows.is_empty() {
                println!("(no students)");
            } else {
                println!("{}", render_table(rows));
            }
        }
    }

    app.close_list();
    Ok(())
}

async fn handle_show(config: &Config, cmd: &ShowCommand) -> anyhow::Result<()> {
    let mut app = open_app(config)?;
    app.view_students().await?;

    let index = usize::try_from(cmd.number - 1)?;
    let record = match app.select_row(index) {
        Ok(record) => record,
        Err(Error::RecordNotFound { len, .. }) => {
            return Err(anyhow!(
                "no student number {} ({} stored)",
                cmd.number,
                len
            ));
        }
        Err(e) => return Err(e.into()),
    };

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{}", render_details(record));
    }

    app.close_details();
    Ok(())
}

fn handle_courses(config: &Config) {
    for course in &config.form.courses {
        println!("{course}");
    }
}

async fn handle_status(config: &Config, json: bool) -> anyhow::Result<()> {
    let app = open_app(config)?;
    let store = app.store();
    let count = store.count().await?;
    let last_write = store.backend().last_modified(store.key())?;

    if json {
        let status = serde_json::json!({
            "database_path": store.backend().path(),
            "store_key": store.key(),
            "students": count,
            "last_write": last_write,
            "db_size_bytes": store.backend().size_bytes(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("roster status");
        println!("-------------");
        println!("Database:      {}", store.backend().path().display());
        println!("Key:           {}", store.key());
        println!("Students:      {count}");
        match last_write {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
        println!("Size:          {} bytes", store.backend().size_bytes());
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:      {}", config.database_path().display());
                println!("  Store key:          {}", config.storage.store_key);
                println!();
                println!("[Form]");
                println!("  Courses:            {}", config.form.courses.join(", "));
                println!("  Restrict courses:   {}", config.form.restrict_courses);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => return Err(anyhow!("configuration error: {e}")),
            }
        }
    }
    Ok(())
}
