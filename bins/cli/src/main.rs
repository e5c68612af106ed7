//! Rentsplit command line tool.
//!
//! Computes the monthly rent/utility split for every configured household
//! member and emails each one an itemized statement.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rentsplit_core::billing::StatementBuilder;
use rentsplit_core::message;
use rentsplit_shared::{AppError, HouseholdConfig, Mailer, SmtpConfig};

#[derive(Parser, Debug)]
#[command(
    name = "rentsplit",
    about = "Send monthly rent reminder emails from a household config file"
)]
struct Cli {
    /// Path to the household YAML configuration file.
    config_file: PathBuf,

    /// Whether to actually transmit the composed emails.
    #[arg(value_enum)]
    mode: Mode,
}

/// Run mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Compute and print every message without transmitting.
    Dry,
    /// Compute and transmit every message via SMTP.
    Real,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rentsplit=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Loads configuration, builds every statement, and prints or sends each one.
///
/// One person's failure does not abort the batch: every remaining person is
/// still processed, all failures are reported, and the first failure's exit
/// code becomes the process exit code.
async fn run(cli: &Cli) -> Result<(), AppError> {
    let config = HouseholdConfig::load(&cli.config_file)?;
    let mailer = Mailer::new(SmtpConfig::load()?);

    let today = chrono::Local::now().date_naive();
    let builder = StatementBuilder::new(&config, today)?;
    info!(
        due_date = %builder.due_date(),
        schedule_since = %builder.schedule_since(),
        num_payers = builder.num_payers(),
        "Resolved billing run"
    );

    let mut failures: Vec<AppError> = Vec::new();

    for (name, person) in &config.people {
        println!("===");
        println!("Generating email for {name}");

        let mail = match builder.statement_for(name) {
            Ok(statement) => {
                message::compose(&statement, person, &config.email, &config.payment_links)
            }
            Err(err) => {
                let err: AppError = err.into();
                error!(person = %name, "{err}");
                failures.push(err);
                continue;
            }
        };

        println!("from: {}", mail.from);
        println!("recipients: {:?}", mail.recipients());
        println!("subject: {}", mail.subject);

        match cli.mode {
            Mode::Dry => {
                println!("Not sending email due to dry run");
                for line in mail.render().lines() {
                    println!("| {line}");
                }
            }
            Mode::Real => match mailer.send(&mail).await {
                Ok(()) => info!(to = %mail.to, "Sent email"),
                Err(err) => {
                    let err: AppError = err.into();
                    error!(person = %name, "{err}");
                    failures.push(err);
                }
            },
        }
    }

    match failures.into_iter().next() {
        None => Ok(()),
        Some(first) => Err(first),
    }
}
