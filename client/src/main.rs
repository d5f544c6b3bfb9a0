//! `road-app` entry-point: loads settings, wires adapters and runs one command.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use road_client::RoadAppSettings;
use road_client::inbound::cli::{Cli, CliPorts, ConsoleMap, ConsoleNotifier, execute};
use road_client::outbound::geolocation::{FixedPositionSensor, SensorGeolocationGateway};
use road_client::outbound::hazard_api::HttpHazardSubmissionGateway;
use road_client::outbound::nominatim::{NominatimGeocoder, NominatimIdentity};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let settings = RoadAppSettings::load_from_iter([OsString::from("road-app")])
        .map_err(|error| eyre!("failed to load road-app settings: {error}"))?;
    init_tracing(settings.log_json);

    let ports = build_ports(&settings)?;
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build road-app runtime")?;
    let status = runtime.block_on(execute(cli.command, ports));
    Ok(status.into())
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.compact().try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

fn build_ports(settings: &RoadAppSettings) -> Result<CliPorts> {
    let timeout = settings.request_timeout();

    let geolocation = settings.device_position()?.map_or_else(
        SensorGeolocationGateway::unsupported,
        |position| SensorGeolocationGateway::new(Arc::new(FixedPositionSensor::new(position))),
    );
    let submission = HttpHazardSubmissionGateway::new(&settings.hazard_api_url()?, timeout)
        .wrap_err("failed to build hazard service client")?;
    let identity = NominatimIdentity {
        user_agent: settings.user_agent().to_owned(),
    };
    let geocoder = NominatimGeocoder::with_identity(settings.geocoder_url()?, timeout, identity)
        .wrap_err("failed to build geocoder client")?;

    Ok(CliPorts {
        geolocation: Arc::new(geolocation),
        submission: Arc::new(submission),
        geocoder: Arc::new(geocoder),
        notifier: Arc::new(ConsoleNotifier::new(io::stderr())),
        map: Arc::new(ConsoleMap::new(io::stdout())),
    })
}
