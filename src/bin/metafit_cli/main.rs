// ABOUTME: Metafit CLI - command-line front end for the Metafit fitness backend
// ABOUTME: Login, profile, weight progress, plans, recipes, exercises, and the dashboard
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Metafit
//!
//! Usage:
//! ```bash
//! export METAFIT_API_URL=https://api.metafit.example/api
//!
//! # Log in (the token is kept for later commands)
//! metafit login --email ana@example.com --password secreto1
//!
//! # Show goal progress and history
//! metafit progress show --history
//!
//! # Record today's weight
//! metafit progress record 84.5
//!
//! # Today's meals and exercises
//! metafit plan today
//!
//! # Search recipes for your BMI bucket
//! metafit recipes --search pollo --for-me
//! ```

mod commands;
mod helpers;

use clap::{Parser, Subcommand};
use commands::Context;
use metafit_client::config::ClientConfig;
use metafit_client::errors::AppResult;
use metafit_client::logging::{self, LoggingConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "metafit",
    version,
    about = "Metafit fitness client",
    long_about = "Command-line client for the Metafit backend: session, weight progress, daily plans, and the recipe catalog."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Backend base URL override (defaults to METAFIT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file override (defaults to METAFIT_TOKEN_PATH)
    #[arg(long, global = true)]
    token_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Log in with email and password
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create an account and log into it
    Register {
        /// Full name
        #[arg(long)]
        full_name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Password (at least 6 characters)
        #[arg(long)]
        password: String,

        /// Password confirmation (defaults to --password)
        #[arg(long)]
        password_confirm: Option<String>,

        /// Age in years
        #[arg(long)]
        age: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: String,

        /// Height in centimeters
        #[arg(long)]
        height: String,

        /// Goal weight in kilograms (30-300)
        #[arg(long)]
        target_weight: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in profile
    Whoami,

    /// Profile management
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Weight progress
    Progress {
        #[command(subcommand)]
        action: ProgressCommand,
    },

    /// Daily plans
    Plan {
        #[command(subcommand)]
        action: PlanCommand,
    },

    /// Search the recipe catalog
    Recipes {
        /// Text matched against recipe names and ingredients
        #[arg(long, short = 's', default_value = "")]
        search: String,

        /// Category: normal, sobrepeso, obesidadI, obesidadII, obesidadIII
        #[arg(long, short = 'c', conflicts_with = "for_me")]
        category: Option<String>,

        /// Only recipes for your BMI bucket
        #[arg(long)]
        for_me: bool,
    },

    /// List exercises
    Exercises {
        /// Ask for recommendations instead of the full catalog
        #[arg(long)]
        generate: bool,
    },

    /// Progress, today's plan, and catalog sizes at a glance
    Dashboard,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Update profile fields; omitted fields keep their current value
    Update {
        /// Full name
        #[arg(long)]
        full_name: Option<String>,

        /// Age in years (18-30)
        #[arg(long)]
        age: Option<String>,

        /// Weight in kilograms (30-300)
        #[arg(long)]
        weight: Option<String>,

        /// Height in centimeters
        #[arg(long)]
        height: Option<String>,

        /// Goal weight in kilograms (30-300)
        #[arg(long)]
        target_weight: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProgressCommand {
    /// Goal completion, weight change, and BMI
    Show {
        /// Also list every observation, newest first
        #[arg(long)]
        history: bool,
    },

    /// Record a weight observation
    Record {
        /// Weight in kilograms
        weight: String,

        /// Observation date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(long)]
        date: Option<String>,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum PlanCommand {
    /// Today's plan
    Today,
    /// Every plan
    List,
    /// Your own plans
    Mine,
    /// Generate a new plan
    Generate,
    /// Create a plan from a JSON file
    Create {
        /// Path to the plan JSON
        file: PathBuf,
    },
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = match &cli.api_url {
        Some(url) => ClientConfig::from_env_with_api_url(url)?,
        None => ClientConfig::from_env()?,
    };
    if let Some(path) = &cli.token_path {
        config.token_path.clone_from(path);
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    debug!(api_url = %config.api_url, "Metafit CLI starting");
    let ctx = Context::new(config);

    match cli.command {
        Command::Login { email, password } => commands::auth::login(&ctx, &email, &password).await,
        Command::Register {
            full_name,
            email,
            password,
            password_confirm,
            age,
            weight,
            height,
            target_weight,
        } => {
            let form = metafit_client::forms::RegisterForm {
                full_name,
                email,
                password_confirm: password_confirm.unwrap_or_else(|| password.clone()),
                password,
                age,
                weight,
                height,
                target_weight,
            };
            commands::auth::register(&ctx, &form).await
        }
        Command::Logout => {
            commands::auth::logout(&ctx).await;
            Ok(())
        }
        Command::Whoami => commands::auth::whoami(&ctx).await,
        Command::Profile { action } => match action {
            ProfileCommand::Update {
                full_name,
                age,
                weight,
                height,
                target_weight,
            } => {
                let changes = commands::profile::ProfileChanges {
                    full_name,
                    age,
                    weight,
                    height,
                    target_weight,
                };
                commands::profile::update(&ctx, changes).await
            }
        },
        Command::Progress { action } => match action {
            ProgressCommand::Show { history } => commands::progress::show(&ctx, history).await,
            ProgressCommand::Record { weight, date } => {
                commands::progress::record(&ctx, &weight, date.as_deref()).await
            }
        },
        Command::Plan { action } => match action {
            PlanCommand::Today => commands::plans::today(&ctx).await,
            PlanCommand::List => commands::plans::list(&ctx).await,
            PlanCommand::Mine => commands::plans::mine(&ctx).await,
            PlanCommand::Generate => commands::plans::generate(&ctx).await,
            PlanCommand::Create { file } => commands::plans::create(&ctx, &file).await,
        },
        Command::Recipes {
            search,
            category,
            for_me,
        } => commands::catalog::recipes(&ctx, search, category.as_deref(), for_me).await,
        Command::Exercises { generate } => commands::catalog::exercises(&ctx, generate).await,
        Command::Dashboard => commands::dashboard::show(&ctx).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let initialized = if cli.verbose {
        LoggingConfig::from_env().verbose().init()
    } else {
        logging::init_from_env()
    };
    if let Err(e) = initialized {
        eprintln!("Warning: {e}");
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!(error.code = ?e.code, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
