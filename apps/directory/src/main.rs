use std::{io::Write as _, path::PathBuf, sync::Arc};

use anyhow::Result;
use async_trait::async_trait;
use clap::Parser;
use client_core::{Confirm, DirectoryController, HttpStudentApi, Outcome};
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::Mutex,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod render;

use commands::{parse_command, Command, HELP};
use config::{load_settings, parse_server_url, DEFAULT_CONFIG_FILE};
use render::render;

#[derive(Parser, Debug)]
#[command(about = "Student directory: list, add and remove students")]
struct Args {
    /// Backend origin, overrides the config file and environment.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Skip delete confirmations.
    #[arg(long)]
    yes: bool,
}

type Input = Arc<Mutex<Lines<BufReader<Stdin>>>>;

struct StdinConfirm {
    input: Input,
    assume_yes: bool,
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut input = self.input.lock().await;
        match input.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

type Controller = DirectoryController<HttpStudentApi, StdinConfirm>;

fn redraw(controller: &Controller) {
    print!("\n{}", render(&controller.view()));
    let _ = std::io::stdout().flush();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config)?;
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    let base_url = parse_server_url(&settings.server_url)?;
    info!(server_url = %base_url, "starting student directory");

    let input: Input = Arc::new(Mutex::new(BufReader::new(tokio::io::stdin()).lines()));
    let controller: Arc<Controller> = Arc::new(DirectoryController::new(
        HttpStudentApi::new(base_url),
        StdinConfirm {
            input: input.clone(),
            assume_yes: args.yes,
        },
    ));

    controller.load_collection().await;
    redraw(&controller);
    println!("\n{HELP}");

    loop {
        print!("> ");
        let _ = std::io::stdout().flush();
        let line = {
            let mut input = input.lock().await;
            input.next_line().await?
        };
        let Some(line) = line else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };

        match command {
            Command::Help => println!("{HELP}"),
            Command::Show => redraw(&controller),
            Command::Set { field, value } => match controller.update_field(&field, value) {
                Ok(Outcome::Skipped) => println!("The form is disabled while saving."),
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
            Command::Submit => {
                let background = controller.clone();
                tokio::spawn(async move {
                    background.submit().await;
                    redraw(&background);
                });
                tokio::task::yield_now().await;
            }
            Command::Remove(id) => {
                controller.remove(id).await;
                redraw(&controller);
            }
            Command::Get(id) => match controller.api().fetch_student(id).await {
                Ok(student) => println!(
                    "#{} {} <{}> {}",
                    student.id, student.full_name, student.email, student.major
                ),
                Err(err) => println!("Unable to fetch student {id}: {err}"),
            },
            Command::Quit => break,
        }
    }

    Ok(())
}
