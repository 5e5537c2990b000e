//! Terminal front end for the task service.
//!
//! # Design
//! The core builds and parses requests; this binary supplies the transport,
//! the text rendering and the input handling. One-shot subcommands mount the
//! app (initial load), perform a single action and print the resulting view.

mod render;
mod shell;
mod transport;

use std::io;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use task_core::{App, HealthCheck, OwnerId, TaskClient, TaskForm, TaskId, DEFAULT_OWNER_ID};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::shell::Shell;
use crate::transport::UreqTransport;

#[derive(Parser, Debug)]
#[command(name = "tasks", version, about = "Manage tasks on a task service")]
struct Cli {
    /// Base URL of the task service.
    #[arg(long, env = "TASKS_BASE_URL", default_value = "http://localhost:8000")]
    base_url: String,

    /// Owner whose tasks are listed and created.
    #[arg(long, env = "TASKS_OWNER_ID", default_value_t = DEFAULT_OWNER_ID)]
    owner_id: OwnerId,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Interactive session (default).
    Shell,
    /// Print the task list.
    List,
    /// Create a task.
    Add {
        title: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Flip a task's completion.
    Toggle { id: TaskId },
    /// Delete a task.
    Delete { id: TaskId },
    /// Check API status.
    Health,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!(base_url = %cli.base_url, owner_id = cli.owner_id, "starting");

    let client = TaskClient::new(&cli.base_url);
    let mut transport = UreqTransport::new();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => {
            let app = App::new(client.clone(), cli.owner_id);
            let mut shell = Shell::new(app, HealthCheck::new(client), &mut transport);
            shell.run(io::stdin().lock(), io::stdout().lock())?;
            info!(tasks = shell.app().tasks().len(), "session ended");
        }
        Command::Health => {
            let mut health = HealthCheck::new(client);
            health.check(&mut transport);
            print!("{}", render::health(&health));
            if let Some(error) = health.error() {
                bail!("{error}");
            }
        }
        command => {
            let mut app = App::new(client, cli.owner_id);
            app.load_tasks(&mut transport);
            match command {
                Command::Add { title, description } => {
                    let mut form = TaskForm::new();
                    form.set_title(title);
                    form.set_description(description.unwrap_or_default());
                    let Some(request) = form.submit() else {
                        bail!("task title must not be blank");
                    };
                    app.create_task(&mut transport, &request);
                }
                Command::Toggle { id } => app.toggle_task(&mut transport, id),
                Command::Delete { id } => app.delete_task(&mut transport, id),
                _ => {}
            }
            print!("{}", render::app(&app));
            if let Some(error) = app.error() {
                bail!("{error}");
            }
        }
    }
    Ok(())
}
