use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use risk_dashboard::app::component_factory::{ComponentFactory, ComponentFactoryError, Config};
use risk_dashboard::app::{Dashboard, DashboardRequest, ExtractionError, RiskExtractor};
use risk_dashboard::domain::riskdata::{Dataset, Facet, FilterSelection, RiskColumn};
use risk_dashboard::infra::{CsvDatasetLoader, CsvRiskWriter, DatasetLoadError};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "project_risk_management_dashboard_data.csv";

#[derive(Parser, Debug)]
#[command(version, about = "Extracts project risks from Asana and reports on them")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch every risk of a portfolio into the handoff CSV.
    Extract(ExtractArgs),
    /// Print the values offered by each filter control.
    Facets {
        #[arg(long)]
        data: PathBuf,
    },
    /// Render the markdown dashboard for a filter selection.
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Portfolio gid, overrides `asana.portfolio_gid` from the config.
    #[arg(long)]
    portfolio: Option<String>,
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[arg(long)]
    data: PathBuf,
    #[arg(long)]
    program: Vec<String>,
    #[arg(long)]
    office: Vec<String>,
    #[arg(long)]
    phase: Vec<String>,
    #[arg(long)]
    likelihood: Vec<String>,
    #[arg(long)]
    impact_level: Vec<String>,
    #[arg(long)]
    assessment: Vec<String>,
    #[arg(long)]
    status: Vec<String>,
    #[arg(long, value_parser = parse_budget_ceiling)]
    max_budget: Option<f64>,
    #[arg(long)]
    search_name: Option<String>,
    #[arg(long)]
    search_keyword: Option<String>,
    /// Search risk, project, program and office across the whole dataset, ignoring filters.
    #[arg(long)]
    global_search: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

impl ReportArgs {
    fn request(&self, dataset: &Dataset) -> DashboardRequest {
        let mut selection = [
            (Facet::WriProgram, &self.program),
            (Facet::Office, &self.office),
            (Facet::ProjectLifeCyclePhase, &self.phase),
            (Facet::RiskLikelihood, &self.likelihood),
            (Facet::RiskImpactLevel, &self.impact_level),
            (Facet::RiskAssessment, &self.assessment),
            (Facet::RiskStatus, &self.status),
        ]
        .into_iter()
        .filter(|(_, values)| !values.is_empty())
        .fold(FilterSelection::for_dataset(dataset), |selection, (facet, values)| {
            selection.select(facet, values.iter().cloned())
        });

        if let Some(ceiling) = self.max_budget {
            selection = selection.with_budget_ceiling(ceiling);
        }
        if let Some(term) = &self.search_name {
            selection = selection.search_in_column(RiskColumn::RiskName, term.clone());
        }
        if let Some(term) = &self.search_keyword {
            selection = selection.search_keyword(term.clone());
        }

        let request = DashboardRequest::new(selection);
        match &self.global_search {
            Some(term) => request.with_global_search(term.clone()),
            None => request,
        }
    }
}

fn parse_budget_ceiling(value: &str) -> Result<f64, String> {
    let ceiling: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("{value:?} is not a number: {e}"))?;
    if !ceiling.is_finite() || ceiling < 0.0 {
        return Err(format!("{value:?} must be a finite, non-negative amount"));
    }
    Ok(ceiling)
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Configuration(#[from] ComponentFactoryError),

    #[error(transparent)]
    Dataset(#[from] DatasetLoadError),

    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("unable to create {0}: {1}")]
    Output(String, String),
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::Extract(args) => extract(args).await,
        Command::Facets { data } => {
            let dataset = CsvDatasetLoader.load(&data)?;
            print!("{}", render_facets(&dataset));
            Ok(())
        }
        Command::Report(args) => report(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, ComponentFactoryError> {
    path.map(Config::from_file)
        .transpose()
        .map(Option::unwrap_or_default)
}

async fn extract(args: ExtractArgs) -> Result<(), CliError> {
    let factory = ComponentFactory::new(load_config(args.config.as_deref())?);
    let portfolio_gid = factory.portfolio_gid(args.portfolio)?;
    let source = factory.risk_source()?;

    // nothing is truncated before the portfolio has been fetched
    let mut writer = CsvRiskWriter::create(&args.output);

    let summary = RiskExtractor::new(source)
        .extract_into(&portfolio_gid, &mut writer)
        .await?;

    info!(
        "wrote {} risks from {} projects to {} ({} projects without a risk section)",
        summary.rows_written,
        summary.projects,
        args.output.display(),
        summary.projects_without_risk_section
    );
    Ok(())
}

fn report(args: ReportArgs) -> Result<(), CliError> {
    let factory = ComponentFactory::new(load_config(args.config.as_deref())?);
    let dataset = CsvDatasetLoader.load(&args.data)?;
    let request = args.request(&dataset);

    let dashboard = Dashboard::new(dataset, factory.display_options());
    let markdown = dashboard.render(&request);

    match &args.output {
        Some(path) => std::fs::write(path, markdown)
            .map_err(|e| CliError::Output(path.display().to_string(), e.to_string())),
        None => {
            print!("{markdown}");
            Ok(())
        }
    }
}

fn render_facets(dataset: &Dataset) -> String {
    let mut out = String::new();
    for facet in Facet::ALL {
        let _ = writeln!(out, "{facet}:");
        for value in dataset.facet_values(facet).iter() {
            let _ = writeln!(out, "  - {value}");
        }
    }
    match dataset.budget_range() {
        Some(range) => {
            let _ = writeln!(
                out,
                "Risk Budget: {} to {} (step {})",
                range.min,
                range.max,
                range.step()
            );
        }
        None => {
            let _ = writeln!(out, "Risk Budget: no numeric values");
        }
    }
    out
}
