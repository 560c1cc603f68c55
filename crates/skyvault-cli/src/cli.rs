//! Argument parsing and command dispatch.

use std::io;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use reqwest::Url;
use skyvault_api_models::paths::HISTORY_PAGE_LIMIT;
use uuid::Uuid;

use crate::client::{
    AppContext, CliDependencies, CliResult, DEFAULT_LOG_LEVEL, init_logging, parse_url,
};
use crate::commands::admin::{handle_admin_stats, handle_admin_users};
use crate::commands::auth::{handle_login, handle_logout, handle_register, handle_whoami};
use crate::commands::files::{
    handle_file_download, handle_file_list, handle_file_remove, handle_file_upload,
    handle_storage,
};
use crate::commands::history::{handle_history_clear, handle_history_list};
use crate::session::SessionFile;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Parses CLI arguments, executes the requested command, and reports the
/// outcome. Returns the process exit code.
pub async fn run() -> i32 {
    let cli = Cli::parse();
    if let Err(err) = init_logging(&cli.log_level) {
        eprintln!("warning: {err:#}");
    }
    let command_name = command_label(&cli.command);
    let trace_id = Uuid::new_v4().to_string();
    let deps = match CliDependencies::from_env(&cli, &trace_id) {
        Ok(deps) => deps,
        Err(err) => {
            eprintln!("error: {}", err.display_message());
            return err.exit_code();
        }
    };

    match dispatch(cli, &deps).await {
        Ok(()) => {
            tracing::debug!(command = command_name, trace_id = %trace_id, "command succeeded");
            0
        }
        Err(err) => {
            let exit_code = err.exit_code();
            tracing::debug!(
                command = command_name,
                trace_id = %trace_id,
                exit_code,
                "command failed"
            );
            eprintln!("error: {}", err.display_message());
            exit_code
        }
    }
}

async fn dispatch(cli: Cli, deps: &CliDependencies) -> CliResult<()> {
    let session = SessionFile::new(cli.session_file.unwrap_or_else(SessionFile::default_path));
    let ctx = AppContext {
        client: deps.client.clone(),
        base_url: cli.api_url,
        session,
    };
    let output = cli.output;

    match cli.command {
        Command::Login(args) => handle_login(&ctx, args, output).await,
        Command::Register(args) => handle_register(&ctx, args, output).await,
        Command::Logout => handle_logout(&ctx),
        Command::Whoami => handle_whoami(&ctx, output).await,
        Command::Files(files) => match files {
            FilesCommand::Ls => handle_file_list(&ctx, output).await,
            FilesCommand::Upload(args) => handle_file_upload(&ctx, args, output).await,
            FilesCommand::Download(args) => handle_file_download(&ctx, args).await,
            FilesCommand::Rm(args) => {
                handle_file_remove(&ctx, args, &mut io::stdin().lock()).await
            }
        },
        Command::Storage => handle_storage(&ctx, output).await,
        Command::History(args) => match args.action {
            Some(HistoryCommand::Clear(confirm)) => {
                handle_history_clear(&ctx, confirm, &mut io::stdin().lock()).await
            }
            None => handle_history_list(&ctx, args.limit, output).await,
        },
        Command::Admin(admin) => match admin {
            AdminCommand::Stats => handle_admin_stats(&ctx, output).await,
            AdminCommand::Users => handle_admin_users(&ctx, output).await,
        },
    }
}

#[derive(Parser)]
#[command(name = "skyvault", about = "Command-line client for a SkyVault storage server")]
pub(crate) struct Cli {
    #[arg(
        long,
        global = true,
        env = "SKYVAULT_API_URL",
        value_parser = parse_url,
        default_value = DEFAULT_API_URL
    )]
    pub(crate) api_url: Url,
    #[arg(
        long,
        global = true,
        env = "SKYVAULT_HTTP_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS
    )]
    pub(crate) timeout: u64,
    #[arg(
        long,
        global = true,
        env = "SKYVAULT_SESSION_FILE",
        help = "Where the signed-in session is kept [default: ~/.skyvault/session.json]"
    )]
    pub(crate) session_file: Option<PathBuf>,
    #[arg(
        long = "output",
        alias = "format",
        global = true,
        value_enum,
        default_value_t = OutputFormat::Table,
        help = "Select output format for commands that render structured data"
    )]
    pub(crate) output: OutputFormat,
    #[arg(
        long,
        global = true,
        env = "SKYVAULT_LOG",
        default_value = DEFAULT_LOG_LEVEL,
        help = "Log filter used when RUST_LOG is unset"
    )]
    pub(crate) log_level: String,
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Sign in and keep the session on disk.
    Login(LoginArgs),
    /// Create an account and sign in.
    Register(RegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show the signed-in user after checking the session with the server.
    Whoami,
    /// Manage stored files.
    #[command(subcommand)]
    Files(FilesCommand),
    /// Show storage usage.
    Storage,
    /// Show or clear recent activity.
    History(HistoryArgs),
    /// Admin-only overview.
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Subcommand)]
pub(crate) enum FilesCommand {
    /// List files.
    Ls,
    /// Upload a local file.
    Upload(UploadArgs),
    /// Download a file into a directory.
    Download(DownloadArgs),
    /// Delete a file.
    Rm(RemoveArgs),
}

#[derive(Subcommand, Debug, Clone)]
pub(crate) enum HistoryCommand {
    /// Delete every activity entry.
    Clear(ConfirmArgs),
}

#[derive(Subcommand)]
pub(crate) enum AdminCommand {
    /// Global counters.
    Stats,
    /// Every registered account.
    Users,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "SKYVAULT_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "SKYVAULT_PASSWORD", hide_env_values = true)]
    pub(crate) password: Option<String>,
    #[arg(long)]
    pub(crate) full_name: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct UploadArgs {
    pub(crate) path: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct DownloadArgs {
    pub(crate) id: i64,
    #[arg(long, help = "Directory to write into [default: current directory]")]
    pub(crate) out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RemoveArgs {
    pub(crate) id: i64,
    #[command(flatten)]
    pub(crate) confirm: ConfirmArgs,
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub(crate) struct ConfirmArgs {
    #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
    pub(crate) yes: bool,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct HistoryArgs {
    #[arg(long, default_value_t = HISTORY_PAGE_LIMIT)]
    pub(crate) limit: u32,
    #[command(subcommand)]
    pub(crate) action: Option<HistoryCommand>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Table,
    Json,
}

const fn command_label(command: &Command) -> &'static str {
    match command {
        Command::Login(_) => "login",
        Command::Register(_) => "register",
        Command::Logout => "logout",
        Command::Whoami => "whoami",
        Command::Files(FilesCommand::Ls) => "files.ls",
        Command::Files(FilesCommand::Upload(_)) => "files.upload",
        Command::Files(FilesCommand::Download(_)) => "files.download",
        Command::Files(FilesCommand::Rm(_)) => "files.rm",
        Command::Storage => "storage",
        Command::History(HistoryArgs {
            action: Some(HistoryCommand::Clear(_)),
            ..
        }) => "history.clear",
        Command::History(_) => "history",
        Command::Admin(AdminCommand::Stats) => "admin.stats",
        Command::Admin(AdminCommand::Users) => "admin.users",
    }
}
