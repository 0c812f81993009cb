mod dataset;

use std::{io, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use arc_swap::ArcSwap;
use axum::{
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, get_service},
    Json, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use clap::{Parser, Subcommand};
use ocmap_shared::config::{MapConfig, CONFIG_PATH, LOCATIONS_PATH, NARCAN_PATH};
use tokio::time::sleep;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::dataset::{convert_file, get_reloading_geojson, CsvSource};

/// Location type given to facility rows when the sheet has no such column.
const FACILITY_LOCATION_TYPE: &str = "facility";

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the map site
    Serve(ServeArgs),
    /// Convert a spreadsheet CSV export into a GeoJSON file
    Convert {
        input: PathBuf,
        output: PathBuf,
        /// `location_type` for every row when the sheet has no such column
        #[arg(long)]
        default_location_type: Option<String>,
    },
}

#[derive(clap::Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Directory with index.html, the client bundle and the boundary file
    #[arg(long, default_value = "www")]
    static_dir: PathBuf,

    /// Name of the server certificate to load for TLS
    #[arg(short, long)]
    domain: Option<String>,

    /// CSV export of the care-facility sheet
    #[arg(long)]
    locations_csv: Option<PathBuf>,

    /// CSV export of the Narcan/OPPP sheet
    #[arg(long)]
    narcan_csv: Option<PathBuf>,

    /// Seconds between re-reads of the CSV exports
    #[arg(long, default_value_t = 60 * 60, value_parser = clap::value_parser!(u64).range(1..))]
    reload_secs: u64,

    /// Mapbox access token handed to the client
    #[arg(long, env = "MAPBOX_TOKEN", default_value = "")]
    token: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().command {
        Command::Serve(args) => serve(args).await,
        Command::Convert {
            input,
            output,
            default_location_type,
        } => {
            let source = CsvSource {
                path: input,
                default_location_type,
            };
            Ok(convert_file(&source, &output)?)
        }
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let every = Duration::from_secs(args.reload_secs);

    let config = MapConfig {
        access_token: args.token.clone(),
        narcan: args.narcan_csv.is_some().then(|| NARCAN_PATH.to_owned()),
        ..MapConfig::default()
    };
    if config.access_token.is_empty() {
        log::warn!("no mapbox token set, the map will not load tiles");
    }

    let mut router = Router::new().route(
        &format!("/{CONFIG_PATH}"),
        get(move || async move { Json(config) }),
    );

    if let Some(path) = args.locations_csv {
        let source = CsvSource {
            path,
            default_location_type: Some(FACILITY_LOCATION_TYPE.to_owned()),
        };
        router = dataset_route(router, LOCATIONS_PATH, get_reloading_geojson(source, every)?);
    }
    if let Some(path) = args.narcan_csv {
        let source = CsvSource {
            path,
            default_location_type: None,
        };
        router = dataset_route(router, NARCAN_PATH, get_reloading_geojson(source, every)?);
    }

    log::info!("serving {} on {}", args.static_dir.display(), args.listen);
    let router = router.fallback(get_service(ServeDir::new(&args.static_dir)).handle_error(
        |err: io::Error| async move {
            log::error!("error serving file: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "could not read file")
        },
    ));

    if let Some(domain) = &args.domain {
        let config = RustlsConfig::from_pem_file(
            format!("/etc/letsencrypt/live/{domain}/fullchain.pem"),
            format!("/etc/letsencrypt/live/{domain}/privkey.pem"),
        )
        .await?;

        tokio::spawn(reload(config.clone(), domain.clone()));
        axum_server::bind_rustls(args.listen, config)
            .serve(router.into_make_service())
            .await?;
    } else {
        axum_server::bind(args.listen)
            .serve(router.into_make_service())
            .await?;
    }

    Ok(())
}

fn dataset_route(router: Router, path: &str, geojson: Arc<ArcSwap<String>>) -> Router {
    router.route(
        &format!("/{path}"),
        ServiceBuilder::new()
            .layer(CorsLayer::very_permissive())
            .service(get(move || async move {
                (
                    [(header::CONTENT_TYPE, "application/geo+json")],
                    geojson.load().as_ref().clone(),
                )
                    .into_response()
            })),
    )
}

async fn reload(config: RustlsConfig, domain: String) {
    loop {
        sleep(Duration::from_secs(100_000)).await;
        log::info!("reloading rustls configuration");

        if let Err(err) = config
            .reload_from_pem_file(
                format!("/etc/letsencrypt/live/{domain}/fullchain.pem"),
                format!("/etc/letsencrypt/live/{domain}/privkey.pem"),
            )
            .await
        {
            log::error!("error reloading certificate: {err}");
        }
    }
}
