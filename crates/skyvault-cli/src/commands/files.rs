use std::io::BufRead;
use std::path::{Path, PathBuf};

use anyhow::anyhow;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use skyvault_api_models::format::{DEFAULT_DOWNLOAD_NAME, content_disposition_filename};
use skyvault_api_models::{FileRecord, StorageSummary, fallback, paths};

use crate::cli::{DownloadArgs, OutputFormat, RemoveArgs, UploadArgs};
use crate::client::{AppContext, CliError, CliResult, ensure_success, read_json, send};
use crate::commands::confirm;
use crate::output::{render_file, render_files, render_storage};

pub(crate) async fn handle_file_list(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let files = ctx
        .get_json::<Vec<FileRecord>>(paths::FILES, fallback::FILES)
        .await?;
    render_files(&files, format)
}

pub(crate) async fn handle_file_upload(
    ctx: &AppContext,
    args: UploadArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let token = ctx.token()?;
    let name = args
        .path
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            CliError::validation(format!("'{}' does not name a file", args.path.display()))
        })?;
    let bytes = tokio::fs::read(&args.path).await.map_err(|err| {
        CliError::failure(anyhow!(
            "failed to read '{}': {err}",
            args.path.display()
        ))
    })?;

    let form = Form::new().part(paths::UPLOAD_FIELD, Part::bytes(bytes).file_name(name));
    let url = ctx.endpoint(paths::UPLOAD)?;
    let response = send(
        ctx.client.post(url).bearer_auth(token).multipart(form),
        paths::UPLOAD,
    )
    .await?;
    let record = read_json::<FileRecord>(response, fallback::UPLOAD).await?;
    tracing::info!(file_id = record.id, "upload finished");
    render_file(&record, format)
}

pub(crate) async fn handle_file_download(ctx: &AppContext, args: DownloadArgs) -> CliResult<()> {
    let token = ctx.token()?;
    let path = paths::download(args.id);
    let url = ctx.endpoint(&path)?;
    let response = send(ctx.client.get(url).bearer_auth(token), &path).await?;
    let response = ensure_success(response, fallback::DOWNLOAD).await?;

    let hint = response
        .headers()
        .get(CONTENT_DISPOSITION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response
        .bytes()
        .await
        .map_err(|err| CliError::failure(anyhow!("download interrupted: {err}")))?;

    let dir = args.out.unwrap_or_else(|| PathBuf::from("."));
    let target = dir.join(local_name(hint.as_deref()));
    tokio::fs::create_dir_all(&dir).await.map_err(|err| {
        CliError::failure(anyhow!("failed to create '{}': {err}", dir.display()))
    })?;
    tokio::fs::write(&target, &bytes).await.map_err(|err| {
        CliError::failure(anyhow!("failed to write '{}': {err}", target.display()))
    })?;
    println!("Saved {}", target.display());
    Ok(())
}

pub(crate) async fn handle_file_remove(
    ctx: &AppContext,
    args: RemoveArgs,
    input: &mut dyn BufRead,
) -> CliResult<()> {
    ctx.token()?;
    let prompt = format!("Delete file {}?", args.id);
    if !confirm(&prompt, args.confirm.yes, input)? {
        println!("Aborted.");
        return Ok(());
    }
    ctx.delete(&paths::file(args.id), fallback::DELETE).await?;
    println!("Deleted file {}", args.id);
    Ok(())
}

pub(crate) async fn handle_storage(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let summary = ctx
        .get_json::<StorageSummary>(paths::STORAGE, fallback::STORAGE)
        .await?;
    render_storage(&summary, format)
}

/// Filename from a `Content-Disposition` hint, reduced to its last component.
fn local_name(hint: Option<&str>) -> String {
    let suggested = content_disposition_filename(hint);
    Path::new(&suggested)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DOWNLOAD_NAME)
        .to_string()
}
