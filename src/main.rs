//! Event Manager CLI
//!
//! Command-line front end for the events platform console:
//! - Log in and out (the session is persisted between runs)
//! - List, create, edit and delete users, events, categories and enrollments
//! - Show the dashboard
//! - Run the interactive console

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use event_manager::config::generate_default_config;
use event_manager::logging::init_logging;
use event_manager::pages::DashboardView;
use event_manager::shell::HELP;
use event_manager::{ApiClient, Command, Config, FileSessionStore, Flow, Id, Shell};

#[derive(Parser)]
#[command(name = "event-manager")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Administrative console for the events platform")]
#[command(long_about = "Event Manager manages users, events, categories and enrollments\nof the events platform API from the terminal.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: platform config dir, /etc, ./config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and persist the session
    Login {
        /// Account email
        email: String,
        /// Password (read from stdin when omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Clear the persisted session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Show platform statistics
    Dashboard,

    /// Manage users
    Usuarios {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage events
    Eventos {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage categories
    Categorias {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Manage enrollments
    Inscripciones {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Interactive console
    Shell,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ResourceAction {
    /// List rows
    List {
        /// Search text
        #[arg(short, long)]
        search: Option<String>,
        /// Filters in key=value format (e.g. rol=Cliente, categoria=2)
        #[arg(short = 'F', long)]
        filter: Vec<String>,
    },

    /// Create a row from key=value fields
    Add {
        fields: Vec<String>,
    },

    /// Edit a row; only the given key=value fields change
    Edit {
        id: Id,
        fields: Vec<String>,
    },

    /// Delete a row
    Delete {
        id: Id,
    },
}

/// Split `key=value` arguments
fn parse_pairs(pairs: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .with_context(|| format!("Expected key=value, got '{}'", pair))
        })
        .collect()
}

fn print_toasts(shell: &mut Shell) {
    for toast in shell.drain_toasts() {
        eprintln!("{}", toast);
    }
}

/// Print pending toasts and exit non-zero when `ok` is false
fn finish(shell: &mut Shell, ok: bool) {
    print_toasts(shell);
    if !ok {
        std::process::exit(1);
    }
}

async fn run_resource(
    shell: &mut Shell,
    path: &str,
    action: ResourceAction,
    format: &str,
) -> anyhow::Result<()> {
    shell.navigate(path).await;
    if shell.route().path() != path {
        // The guard sent us elsewhere
        print_toasts(shell);
        eprintln!("Not logged in. Run: event-manager login <email>");
        std::process::exit(1);
    }

    match action {
        ResourceAction::List { search, filter } => {
            let mut ok = true;
            if let Some(text) = search {
                ok &= shell.search(&text).await;
            }
            for (name, value) in parse_pairs(&filter)? {
                ok &= shell.filter(&name, &value).await;
            }
            if !ok {
                finish(shell, false);
            }

            let route = shell.route().clone();
            if let Some(page) = shell.page(&route) {
                match format {
                    "json" => println!("{}", serde_json::to_string_pretty(&page.rows_json())?),
                    _ => print!("{}", page.table()),
                }
            }
            finish(shell, true);
        }

        ResourceAction::Add { fields } => {
            let fields = parse_pairs(&fields)?;
            let mut ok = shell.add();
            for (name, value) in &fields {
                ok = ok && shell.set(name, value);
            }
            ok = ok && shell.save().await;
            finish(shell, ok);
        }

        ResourceAction::Edit { id, fields } => {
            let fields = parse_pairs(&fields)?;
            let mut ok = shell.edit(id);
            for (name, value) in &fields {
                ok = ok && shell.set(name, value);
            }
            ok = ok && shell.save().await;
            finish(shell, ok);
        }

        ResourceAction::Delete { id } => {
            let ok = shell.delete(id).await;
            finish(shell, ok);
        }
    }

    Ok(())
}

async fn run_console(shell: &mut Shell) -> anyhow::Result<()> {
    println!("{}", shell.render());
    println!("Escriba 'help' para ver los comandos.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_toasts(shell);
        eprint!("{}> ", shell.route());

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        let help = command == Command::Help;
        if shell.execute(command).await == Flow::Quit {
            break;
        }
        print_toasts(shell);

        if help {
            println!("{}", HELP);
        } else {
            println!("{}", shell.render());
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, &config)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", config),
        }
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }

    init_logging(&config.logging).context("Failed to initialize logging")?;
    tracing::debug!(api = %config.api.base_url, session = %config.session.file, "Starting console");

    let store = Arc::new(FileSessionStore::new(&config.session.file));
    let client = ApiClient::new(&config.api, store).context("Failed to build API client")?;

    let mut shell = Shell::new(client);
    shell.boot();

    match cli.command {
        Commands::Login { email, password } => {
            let password = match password {
                Some(password) => password,
                None => {
                    eprint!("Contraseña: ");
                    let mut lines = BufReader::new(tokio::io::stdin()).lines();
                    lines.next_line().await?.unwrap_or_default()
                }
            };

            let ok = shell.login(&email, &password).await;
            if ok {
                if let Some(user) = shell.auth().user() {
                    println!("Logged in as {} <{}> ({})", user.nombre, user.email, user.rol);
                }
            }
            finish(&mut shell, ok);
        }

        Commands::Logout => {
            shell.logout();
            finish(&mut shell, true);
        }

        Commands::Whoami => match shell.auth().user() {
            Some(user) => match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&user)?),
                _ => println!("{} <{}> ({}) id={}", user.nombre, user.email, user.rol, user.id),
            },
            None => {
                eprintln!("Not logged in.");
                std::process::exit(1);
            }
        },

        Commands::Dashboard => {
            shell.navigate("/").await;
            if shell.route().path() != "/" {
                print_toasts(&mut shell);
                eprintln!("Not logged in. Run: event-manager login <email>");
                std::process::exit(1);
            }

            let dashboard = shell.dashboard();
            match (cli.format.as_str(), dashboard.view()) {
                ("json", DashboardView::Ready(stats)) => {
                    println!("{}", serde_json::to_string_pretty(stats)?)
                }
                _ => println!("{}", dashboard.render()),
            }
            let ok = matches!(dashboard.view(), DashboardView::Ready(_));
            finish(&mut shell, ok);
        }

        Commands::Usuarios { action } => {
            run_resource(&mut shell, "/usuarios", action, &cli.format).await?
        }
        Commands::Eventos { action } => {
            run_resource(&mut shell, "/eventos", action, &cli.format).await?
        }
        Commands::Categorias { action } => {
            run_resource(&mut shell, "/categorias", action, &cli.format).await?
        }
        Commands::Inscripciones { action } => {
            run_resource(&mut shell, "/inscripciones", action, &cli.format).await?
        }

        Commands::Shell => run_console(&mut shell).await?,

        Commands::Config { .. } => {}
    }

    Ok(())
}
