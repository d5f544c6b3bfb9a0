//! Command-line front end driving the hazard and search workflows.
//!
//! Arguments are fed through the same field-edit operations a form would
//! use, so the CLI exercises the workflows exactly as an interactive shell
//! does.

mod console;

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

pub use self::console::{ConsoleMap, ConsoleNotifier};
use crate::domain::ports::{
    GeocodingGateway, GeolocationGateway, HazardSubmissionGateway, MapContainer, Notifier,
};
use crate::domain::{
    FormField, FormFieldError, HazardReportPorts, HazardReportWorkflow, LocationSearchWorkflow,
    LocationSource, SearchOutcome, SubmissionOutcome,
};

/// `road-app` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "road-app",
    about = "Report road hazards and search for places",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported operations.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Submit a hazard report.
    Report(ReportArgs),
    /// Geocode a place name and centre the map on it.
    Search(SearchArgs),
}

/// Arguments for `road-app report`.
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Hazard category: pothole, construction, accident, flooding, debris or
    /// other.
    #[arg(long = "type", value_name = "type", default_value = "pothole")]
    pub hazard_type: String,
    /// Free-text description of the hazard.
    #[arg(long, value_name = "text")]
    pub description: String,
    /// Severity: low, medium or high.
    #[arg(long, value_name = "level", default_value = "medium")]
    pub severity: String,
    /// Manual latitude. The device position is used when omitted.
    #[arg(
        long,
        value_name = "degrees",
        requires = "longitude",
        allow_hyphen_values = true
    )]
    pub latitude: Option<String>,
    /// Manual longitude. The device position is used when omitted.
    #[arg(
        long,
        value_name = "degrees",
        requires = "latitude",
        allow_hyphen_values = true
    )]
    pub longitude: Option<String>,
}

/// Arguments for `road-app search`.
#[derive(Debug, Clone, Args)]
pub struct SearchArgs {
    /// Place name; multiple words are joined with spaces.
    #[arg(value_name = "query", required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Adapters a CLI invocation runs against.
pub struct CliPorts {
    /// Device position source.
    pub geolocation: Arc<dyn GeolocationGateway>,
    /// Hazard service.
    pub submission: Arc<dyn HazardSubmissionGateway>,
    /// Place search service.
    pub geocoder: Arc<dyn GeocodingGateway>,
    /// Where notices go.
    pub notifier: Arc<dyn Notifier>,
    /// Where map updates go.
    pub map: Arc<dyn MapContainer>,
}

/// How a command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// The workflow completed successfully.
    Succeeded,
    /// The workflow reported a failure to the user.
    Failed,
}

impl From<CommandStatus> for ExitCode {
    fn from(status: CommandStatus) -> Self {
        match status {
            CommandStatus::Succeeded => Self::SUCCESS,
            CommandStatus::Failed => Self::FAILURE,
        }
    }
}

/// Run one parsed command to completion.
pub async fn execute(command: Command, ports: CliPorts) -> CommandStatus {
    match command {
        Command::Report(args) => report(&args, ports).await,
        Command::Search(args) => search(&args, ports).await,
    }
}

async fn report(args: &ReportArgs, ports: CliPorts) -> CommandStatus {
    let notifier = ports.notifier.clone();
    let workflow = HazardReportWorkflow::new(HazardReportPorts::new(
        ports.geolocation,
        ports.submission,
        ports.notifier,
        ports.map,
    ));

    if let Err(error) = fill_form(&workflow, args) {
        notifier.notify_error(&error.to_string());
        return CommandStatus::Failed;
    }

    match workflow.submit().await {
        SubmissionOutcome::Submitted(_) => CommandStatus::Succeeded,
        SubmissionOutcome::Failed(_) | SubmissionOutcome::AlreadySubmitting => {
            CommandStatus::Failed
        }
    }
}

fn fill_form(workflow: &HazardReportWorkflow, args: &ReportArgs) -> Result<(), FormFieldError> {
    workflow.update_field(FormField::HazardType, &args.hazard_type)?;
    workflow.update_field(FormField::Description, &args.description)?;
    workflow.update_field(FormField::Severity, &args.severity)?;

    if let (Some(latitude), Some(longitude)) = (&args.latitude, &args.longitude) {
        if workflow.location_source() != LocationSource::ManualCoordinates {
            workflow.toggle_location_source();
        }
        workflow.update_field(FormField::Latitude, latitude)?;
        workflow.update_field(FormField::Longitude, longitude)?;
    }
    debug!(location_source = ?workflow.location_source(), "report form filled");
    Ok(())
}

async fn search(args: &SearchArgs, ports: CliPorts) -> CommandStatus {
    let workflow = LocationSearchWorkflow::new(ports.geocoder, ports.notifier, ports.map);
    workflow.set_query(args.query.join(" "));

    match workflow.search().await {
        SearchOutcome::Found(_) => CommandStatus::Succeeded,
        SearchOutcome::Skipped => {
            debug!("blank search query");
            CommandStatus::Failed
        }
        SearchOutcome::NoResults | SearchOutcome::Failed(_) => CommandStatus::Failed,
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for argument parsing.

    use super::*;
    use rstest::rstest;

    #[rstest]
    fn report_defaults_type_and_severity() {
        let cli = Cli::try_parse_from(["road-app", "report", "--description", "Deep pothole"])
            .expect("arguments parse");

        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.hazard_type, "pothole");
        assert_eq!(args.severity, "medium");
        assert_eq!(args.latitude, None);
    }

    #[rstest]
    fn report_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "road-app",
            "report",
            "--description",
            "Debris",
            "--latitude",
            "-33.8688",
            "--longitude",
            "-151.2093",
        ])
        .expect("arguments parse");

        let Command::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.latitude.as_deref(), Some("-33.8688"));
        assert_eq!(args.longitude.as_deref(), Some("-151.2093"));
    }

    #[rstest]
    #[case::latitude_only(&["--latitude", "1"])]
    #[case::longitude_only(&["--longitude", "1"])]
    fn report_requires_both_coordinates(#[case] extra: &[&str]) {
        let mut argv = vec!["road-app", "report", "--description", "Debris"];
        argv.extend_from_slice(extra);

        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[rstest]
    fn search_joins_words() {
        let cli = Cli::try_parse_from(["road-app", "search", "Place", "de", "la", "Concorde"])
            .expect("arguments parse");

        let Command::Search(args) = cli.command else {
            panic!("expected search command");
        };
        assert_eq!(args.query.join(" "), "Place de la Concorde");
    }

    #[rstest]
    fn search_requires_a_query() {
        assert!(Cli::try_parse_from(["road-app", "search"]).is_err());
    }
}
