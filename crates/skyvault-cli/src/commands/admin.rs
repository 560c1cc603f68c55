use skyvault_api_models::{AdminStats, AdminUser, fallback, paths};

use crate::cli::OutputFormat;
use crate::client::{AppContext, CliResult};
use crate::output::{render_admin_stats, render_admin_users};

pub(crate) async fn handle_admin_stats(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let stats = ctx
        .get_json::<AdminStats>(paths::ADMIN_STATS, fallback::ADMIN_STATS)
        .await?;
    render_admin_stats(&stats, format)
}

pub(crate) async fn handle_admin_users(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let users = ctx
        .get_json::<Vec<AdminUser>>(paths::ADMIN_USERS, fallback::ADMIN_USERS)
        .await?;
    render_admin_users(&users, format)
}
