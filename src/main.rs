use actix_files as fs;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Result as ActixResult};
use clap::Parser;
use filedeck::config::UploadLimits;
use filedeck::DashboardConfig;
use std::path::PathBuf;

const BYTES_PER_MB: u64 = 1024 * 1024;
// 1 TiB per file and 1 PiB of quota keep the byte counts well inside u64
const MAX_UPLOAD_MB: u64 = 1024 * 1024;
const MAX_QUOTA_GB: u64 = 1024 * 1024;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging and report debug mode to the dashboard
    #[arg(long)]
    debug: bool,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Directory holding index.html and the compiled dashboard bundle
    #[arg(long, default_value = "./static")]
    static_dir: PathBuf,

    /// Largest file the upload simulation accepts, in MB
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=MAX_UPLOAD_MB))]
    max_upload_mb: u64,

    /// Storage quota shown on the storage page, in GB
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..=MAX_QUOTA_GB))]
    quota_gb: u64,
}

impl Args {
    fn dashboard_config(&self) -> DashboardConfig {
        DashboardConfig {
            debug: self.debug,
            uploads: UploadLimits {
                max_file_size: self.max_upload_mb * BYTES_PER_MB,
                ..UploadLimits::default()
            },
            storage_quota: self.quota_gb * 1024 * BYTES_PER_MB,
        }
    }
}

#[derive(Clone)]
struct AppState {
    config: DashboardConfig,
    static_dir: PathBuf,
}

// Serve the dashboard page
#[get("/")]
async fn index(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    let path = data.static_dir.join("index.html");
    let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
        log::error!("Failed to read {}: {}", path.display(), e);
        actix_web::error::ErrorInternalServerError("Dashboard page unavailable")
    })?;
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

// Limits and flags the dashboard reads on start
#[get("/config")]
async fn get_config(data: web::Data<AppState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(&data.config))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let config = args.dashboard_config();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.log_level().as_str()))
        .init();

    let app_state = AppState {
        config,
        static_dir: args.static_dir.clone(),
    };

    log::info!("Starting dashboard host at http://{}", args.bind);
    log::info!("Static directory: {}", args.static_dir.display());
    if args.debug {
        log::debug!("Dashboard config: {:?}", app_state.config);
    }

    HttpServer::new(move || {
        let static_dir = app_state.static_dir.clone();
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .wrap(Logger::default())
            .service(index)
            .service(get_config)
            // Compiled bundle (wasm + js glue) and assets
            .service(fs::Files::new("/static", static_dir))
    })
    .bind(&args.bind)?
    .run()
    .await
}
