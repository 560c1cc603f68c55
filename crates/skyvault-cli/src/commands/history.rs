use std::io::BufRead;

use anyhow::anyhow;
use skyvault_api_models::{ClearHistoryAck, HistoryEntry, fallback, paths};

use crate::cli::{ConfirmArgs, OutputFormat};
use crate::client::{AppContext, CliError, CliResult};
use crate::commands::confirm;
use crate::output::render_history;

pub(crate) async fn handle_history_list(
    ctx: &AppContext,
    limit: u32,
    format: OutputFormat,
) -> CliResult<()> {
    if limit == 0 {
        return Err(CliError::validation("--limit must be at least 1"));
    }
    let entries = ctx
        .get_json::<Vec<HistoryEntry>>(&paths::history(limit), fallback::HISTORY)
        .await?;
    render_history(&entries, format)
}

pub(crate) async fn handle_history_clear(
    ctx: &AppContext,
    args: ConfirmArgs,
    input: &mut dyn BufRead,
) -> CliResult<()> {
    ctx.token()?;
    if !confirm("Clear all activity history?", args.yes, input)? {
        println!("Aborted.");
        return Ok(());
    }
    let ack = ctx
        .delete(paths::HISTORY_CLEAR, fallback::CLEAR_HISTORY)
        .await?
        .json::<ClearHistoryAck>()
        .await
        .map_err(|err| CliError::failure(anyhow!("unexpected response body: {err}")))?;
    if !ack.cleared {
        return Err(CliError::failure(anyhow!(fallback::CLEAR_HISTORY)));
    }
    println!("History cleared.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{BEARER, signed_in};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn list_passes_the_limit() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/auth/history")
                .query_param("limit", "5")
                .header("authorization", BEARER);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!([
                    {"id": 1, "action": "upload", "filename": "a.txt", "created_at": "2024-01-01T10:00:00"}
                ]));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = signed_in(&server, &dir);

        handle_history_list(&ctx, 5, OutputFormat::Table)
            .await
            .expect("history should load");
        mock.assert();
    }

    #[tokio::test]
    async fn zero_limit_is_rejected() {
        let server = MockServer::start_async().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = signed_in(&server, &dir);

        let err = handle_history_list(&ctx, 0, OutputFormat::Table)
            .await
            .expect_err("limit must be positive");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn clear_after_confirmation_deletes_history() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(DELETE)
                .path(paths::HISTORY_CLEAR)
                .header("authorization", BEARER);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"cleared": true}));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = signed_in(&server, &dir);

        handle_history_clear(&ctx, ConfirmArgs::default(), &mut "y\n".as_bytes())
            .await
            .expect("clear should succeed");
        mock.assert();
    }

    #[tokio::test]
    async fn clear_failure_reports_the_server_detail() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(DELETE).path(paths::HISTORY_CLEAR);
            then.status(500)
                .header("content-type", "application/json")
                .json_body(json!({"detail": "database is locked"}));
        });
        let dir = tempfile::tempdir().expect("tempdir");
        let ctx = signed_in(&server, &dir);

        let err = handle_history_clear(&ctx, ConfirmArgs { yes: true }, &mut "".as_bytes())
            .await
            .expect_err("clear should fail");
        assert!(err.display_message().starts_with("database is locked"));
    }
}
