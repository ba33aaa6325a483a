use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use place_report::api::http::HttpPlaceApi;
use place_report::config::ApiConfig;
use place_report::{ApiError, PlaceId, ProblemCategory, ReportState, SelectedFile, UploadState, UploadStatus};

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("failed to read {path}: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("upload rejected: {0}")]
    UploadFailed(String),
    #[error("report rejected: {0}")]
    ReportFailed(String),
}

#[derive(Parser, Debug)]
#[command(name = "place-report", about = "Upload place photos and report place problems")]
struct Cli {
    /// Backend origin; overrides `PLACE_REPORT_BASE_URL` from the config.
    #[arg(long, env = "PLACE_REPORT_BASE_URL")]
    base_url: Option<String>,

    /// Upload endpoint path; overrides `PLACE_REPORT_UPLOAD_PATH`.
    #[arg(long, env = "PLACE_REPORT_UPLOAD_PATH")]
    upload_path: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Upload a photo of a place.
    Upload(UploadArgs),
    /// Report a problem with a place.
    Report(ReportArgs),
}

#[derive(Args, Debug)]
struct UploadArgs {
    #[arg(long, value_parser = parse_place_id)]
    place_id: PlaceId,
    path: PathBuf,
}

#[derive(Args, Debug)]
struct ReportArgs {
    #[arg(long, value_parser = parse_place_id)]
    place_id: PlaceId,
    /// One of notHere, overload, broken, other.
    #[arg(long, value_parser = parse_category)]
    category: ProblemCategory,
    /// Free text, only used with `--category other`.
    #[arg(long)]
    description: Option<String>,
    /// Name of a photo to mention in the report.
    #[arg(long)]
    image: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let mut config = ApiConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config = config.with_base_url(base_url)?;
    }
    if let Some(upload_path) = cli.upload_path.as_deref() {
        config = config.with_upload_path(upload_path);
    }
    tracing::debug!(base_url = %config.base_url, "place-report client configured");
    let api = HttpPlaceApi::new(config)?;

    match cli.command {
        Command::Upload(args) => run_upload(&api, args).await,
        Command::Report(args) => run_report(&api, args).await,
    }
}

async fn run_upload(api: &HttpPlaceApi, args: UploadArgs) -> Result<(), CliError> {
    let content = tokio::fs::read(&args.path)
        .await
        .map_err(|source| CliError::ReadFile { path: args.path.clone(), source })?;
    let name = args
        .path
        .file_name()
        .map_or_else(|| args.path.display().to_string(), |n| n.to_string_lossy().into_owned());
    let mut file = SelectedFile::new(name, content);
    if let Some(mime) = guess_mime_type(&args.path) {
        file = file.with_mime_type(mime);
    }

    let mut state = UploadState::new(args.place_id);
    state.select_file(file);
    state.submit(api).await;

    match state.message() {
        Some(msg) if msg.status == UploadStatus::Success => {
            println!("{}", msg.text);
            Ok(())
        }
        Some(msg) => Err(CliError::UploadFailed(msg.text.clone())),
        None => Err(CliError::UploadFailed("nothing was sent".to_owned())),
    }
}

async fn run_report(api: &HttpPlaceApi, args: ReportArgs) -> Result<(), CliError> {
    let mut state = ReportState::new(args.place_id);
    state.set_category(Some(args.category));
    if let Some(text) = args.description {
        if !state.shows_free_text() {
            tracing::warn!(category = %args.category, "--description is only sent with --category other");
        }
        state.set_free_text(text);
    }
    state.set_attached_file(args.image.map(SelectedFile::named));
    state.submit(api).await;

    if let Some(message) = state.confirmation() {
        println!("{message}");
        return Ok(());
    }
    Err(CliError::ReportFailed(state.failure().unwrap_or("not submitted").to_owned()))
}

fn parse_place_id(raw: &str) -> Result<PlaceId, String> {
    PlaceId::new(raw).map_err(|e| e.to_string())
}

fn parse_category(raw: &str) -> Result<ProblemCategory, String> {
    ProblemCategory::parse(raw).ok_or_else(|| {
        let expected: Vec<&str> = ProblemCategory::ALL.iter().map(|c| c.as_str()).collect();
        format!("unknown category '{raw}' (expected one of: {})", expected.join(", "))
    })
}

fn guess_mime_type(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "heic" => Some("image/heic"),
        _ => None,
    }
}
