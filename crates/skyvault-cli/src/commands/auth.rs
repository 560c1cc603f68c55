use anyhow::anyhow;
use skyvault_api_models::{AuthResponse, LoginRequest, RegisterRequest, User, fallback, paths};

use crate::cli::{LoginArgs, OutputFormat, RegisterArgs};
use crate::client::{AppContext, CliError, CliResult, read_json, send};
use crate::output::render_user;
use crate::session::StoredSession;

pub(crate) async fn handle_login(
    ctx: &AppContext,
    args: LoginArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let email = required_email(&args.email)?;
    let password = resolve_password(args.password)?;
    let url = ctx.endpoint(paths::LOGIN)?;

    let response = send(
        ctx.client.post(url).json(&LoginRequest { email, password }),
        paths::LOGIN,
    )
    .await?;
    let auth = read_json::<AuthResponse>(response, fallback::LOGIN).await?;
    let user = persist(ctx, auth)?;
    tracing::info!(user_id = user.id, "signed in");
    render_user(&user, format)
}

pub(crate) async fn handle_register(
    ctx: &AppContext,
    args: RegisterArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let email = required_email(&args.email)?;
    let password = resolve_password(args.password)?;
    let request = RegisterRequest::new(email, password, args.full_name.as_deref().unwrap_or(""));
    let url = ctx.endpoint(paths::REGISTER)?;

    let response = send(ctx.client.post(url).json(&request), paths::REGISTER).await?;
    let auth = read_json::<AuthResponse>(response, fallback::REGISTER).await?;
    let user = persist(ctx, auth)?;
    tracing::info!(user_id = user.id, "account created");
    render_user(&user, format)
}

pub(crate) fn handle_logout(ctx: &AppContext) -> CliResult<()> {
    ctx.session.clear()?;
    println!("Signed out.");
    Ok(())
}

/// Check the stored session with the server; any failure signs out.
pub(crate) async fn handle_whoami(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let token = ctx.token()?;
    match fetch_me(ctx, &token).await {
        Ok(user) => {
            ctx.session.write(&StoredSession {
                token,
                user: user.clone(),
            })?;
            render_user(&user, format)
        }
        Err(err) => {
            tracing::warn!(error = %err.display_message(), "session rejected, signing out");
            ctx.session.clear()?;
            Err(err)
        }
    }
}

async fn fetch_me(ctx: &AppContext, token: &str) -> CliResult<User> {
    let url = ctx.endpoint(paths::ME)?;
    let response = send(ctx.client.get(url).bearer_auth(token), paths::ME).await?;
    read_json::<User>(response, fallback::ME).await
}

fn persist(ctx: &AppContext, auth: AuthResponse) -> CliResult<User> {
    if auth.access_token.trim().is_empty() {
        return Err(CliError::failure(anyhow!("server returned an empty token")));
    }
    ctx.session.write(&StoredSession {
        token: auth.access_token,
        user: auth.user.clone(),
    })?;
    Ok(auth.user)
}

fn required_email(raw: &str) -> CliResult<String> {
    let email = raw.trim();
    if email.is_empty() {
        return Err(CliError::validation("email must not be empty"));
    }
    Ok(email.to_string())
}

fn resolve_password(provided: Option<String>) -> CliResult<String> {
    let password = match provided {
        Some(password) => password,
        None => rpassword::prompt_password("Password: ")
            .map_err(|err| CliError::failure(anyhow!("failed to read password: {err}")))?,
    };
    if password.is_empty() {
        return Err(CliError::validation("password must not be empty"));
    }
    Ok(password)
}
