use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    load_settings_from, ContactForm, DirectorySink, ExportOutcome, FormController, FormSchema,
    FormStatus, HireClient, HistoryPipeline, PredictForm, ValidationError,
};
use shared::domain::RecordId;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "smart-hire", about = "Command-line client for the hiring prediction backend")]
struct Cli {
    /// Backend base URL; overrides the config file and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[arg(long, global = true, default_value = client_core::config::CONFIG_FILE_NAME)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a candidate.
    Predict(PredictArgs),
    /// Send a message through the contact form.
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
    },
    /// List past predictions, in server order.
    History,
    /// Download the report for one prediction.
    Export {
        id: String,
        /// Target directory; defaults to the configured export directory.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Raw strings so the form's own validation decides what is acceptable.
#[derive(Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    age: String,
    /// 0: Female, 1: Male
    #[arg(long)]
    gender: String,
    #[arg(long)]
    education_level: String,
    #[arg(long)]
    experience_years: String,
    #[arg(long)]
    previous_companies: String,
    /// km
    #[arg(long)]
    distance_from_company: String,
    #[arg(long)]
    interview_score: String,
    #[arg(long)]
    skill_score: String,
    #[arg(long)]
    personality_score: String,
    #[arg(long)]
    recruitment_strategy: String,
}

impl PredictArgs {
    fn pairs(&self) -> [(&'static str, &str); 10] {
        [
            ("age", self.age.as_str()),
            ("gender", self.gender.as_str()),
            ("educationLevel", self.education_level.as_str()),
            ("experienceYears", self.experience_years.as_str()),
            ("previousCompanies", self.previous_companies.as_str()),
            ("distanceFromCompany", self.distance_from_company.as_str()),
            ("interviewScore", self.interview_score.as_str()),
            ("skillScore", self.skill_score.as_str()),
            ("personalityScore", self.personality_score.as_str()),
            ("recruitmentStrategy", self.recruitment_strategy.as_str()),
        ]
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings_from(&cli.config)?;
    if let Some(api_url) = cli.api_url.as_deref() {
        settings = settings.with_api_base_url(api_url)?;
    }
    info!(api_base_url = %settings.api_base_url, "using backend");
    let client = HireClient::from_settings(&settings);

    match cli.command {
        Command::Predict(args) => {
            let mut form = FormController::<PredictForm>::new();
            fill(&mut form, &args.pairs())?;
            form.submit(&client).await?;
            match form.status() {
                FormStatus::Succeeded(outcome) => {
                    println!("{}", outcome.headline());
                    println!("Probability of Hire: {}", outcome.probability_percent());
                }
                status => return settle_failure(status),
            }
        }
        Command::Contact {
            name,
            email,
            message,
        } => {
            let mut form = FormController::<ContactForm>::new();
            fill(
                &mut form,
                &[
                    ("name", name.as_str()),
                    ("email", email.as_str()),
                    ("message", message.as_str()),
                ],
            )?;
            form.submit(&client).await?;
            match form.status() {
                FormStatus::Succeeded(ack) => println!("{}", ack.message),
                status => return settle_failure(status),
            }
        }
        Command::History => {
            let mut history = HistoryPipeline::new();
            if !history.load(&client).await {
                bail!("history load was superseded");
            }
            if let Some(error) = history.error() {
                bail!("{error}");
            }
            if history.records().is_empty() {
                println!("No predictions yet.");
            }
            for record in history.records() {
                let input = &record.input;
                println!(
                    "{}  {}  {}  {:<10} {}",
                    record.id,
                    record.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    record.probability_percent(),
                    record.verdict_label(),
                    input.gender_label(),
                );
                println!(
                    "    age {} | education {} | experience {}y | companies {} | distance {}km",
                    input.age,
                    input.education_level,
                    input.experience_years,
                    input.previous_companies,
                    input.distance_from_company,
                );
                println!(
                    "    interview {} | skill {} | personality {} | strategy {}",
                    input.interview_score,
                    input.skill_score,
                    input.personality_score,
                    input.recruitment_strategy,
                );
            }
        }
        Command::Export { id, out } => {
            let target = out.unwrap_or_else(|| settings.resolved_export_dir());
            let mut sink = DirectorySink::new(target);
            let mut history = HistoryPipeline::new();
            match history.export(&client, RecordId::new(id), &mut sink).await {
                ExportOutcome::Saved(path) => println!("saved {}", path.display()),
                ExportOutcome::Cancelled => println!("export cancelled"),
                ExportOutcome::Failed(message) => bail!("{message}"),
                ExportOutcome::Discarded => bail!("export was discarded"),
            }
        }
    }

    Ok(())
}

fn fill<S: FormSchema>(
    form: &mut FormController<S>,
    pairs: &[(&'static str, &str)],
) -> Result<(), ValidationError> {
    for (name, value) in pairs {
        form.set_value(name, *value)?;
    }
    Ok(())
}

fn settle_failure<T>(status: &FormStatus<T>) -> Result<()> {
    match status.error_message() {
        Some(message) => Err(anyhow!("{message}")),
        None => bail!("submission did not complete"),
    }
}
