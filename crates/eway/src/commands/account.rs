//! Account command handlers: register, login, logout, profile.

use dialoguer::Input;
use secrecy::SecretString;
use serde::Serialize;

use eway_core::Portal;

use crate::cli::{GlobalOpts, RegisterArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Serialize)]
struct LoginReport {
    email: String,
    role: String,
}

#[derive(Serialize)]
struct ProfileReport {
    username: String,
    email: String,
}

fn prompt_text(prompt: &str) -> Result<String, CliError> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .interact_text()
        .map_err(util::prompt_err)?;
    let value = value.trim().to_owned();
    if value.is_empty() {
        return Err(CliError::Validation {
            field: prompt.to_lowercase(),
            reason: "cannot be empty".into(),
        });
    }
    Ok(value)
}

fn prompt_password(confirm: bool) -> Result<SecretString, CliError> {
    let pass = rpassword::prompt_password("Password: ").map_err(util::prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "cannot be empty".into(),
        });
    }
    if confirm {
        let again = rpassword::prompt_password("Confirm password: ").map_err(util::prompt_err)?;
        if again != pass {
            return Err(CliError::Validation {
                field: "password".into(),
                reason: "passwords do not match".into(),
            });
        }
    }
    Ok(SecretString::from(pass))
}

fn require_interactive(global: &GlobalOpts) -> Result<(), CliError> {
    if util::is_interactive() {
        Ok(())
    } else {
        let cfg = config::load_config_or_default();
        Err(CliError::NoCredentials {
            profile: config::active_profile_name(global, &cfg),
        })
    }
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn register(
    portal: &Portal,
    args: RegisterArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let needs_prompt = args.username.is_none() || global.email.is_none() || global.password.is_none();
    if needs_prompt && !util::is_interactive() {
        return Err(CliError::Validation {
            field: "register".into(),
            reason: "pass --username, --email and --password when not running interactively"
                .into(),
        });
    }

    let username = match args.username {
        Some(u) => u,
        None => prompt_text("Username")?,
    };
    let email = match global.email.clone() {
        Some(e) => e,
        None => prompt_text("Email")?,
    };
    let password = match global.password.clone() {
        Some(p) => SecretString::from(p),
        None => prompt_password(true)?,
    };

    let pb = output::spinner("Creating account…", global);
    let result = portal.register(&username, &email, &password).await;
    pb.finish_and_clear();
    let message = result?;

    if !global.quiet {
        eprintln!("✓ {message}");
        eprintln!("  Sign in with: eway login --email {email}");
    }
    Ok(())
}

pub async fn login(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    let (email, role) = if let Some(creds) = portal.config().credentials.as_ref() {
        let role = util::sign_in(portal, global).await?;
        (creds.email.clone(), role)
    } else {
        require_interactive(global)?;
        let email = match global.email.clone() {
            Some(e) => e,
            None => prompt_text("Email")?,
        };
        let password = prompt_password(false)?;
        let pb = output::spinner("Signing in…", global);
        let result = portal.login(&email, &password).await;
        pb.finish_and_clear();
        let role = result.map_err(|e| util::with_profile(e.into(), global))?;
        (email, role)
    };

    let report = LoginReport {
        email,
        role: role.to_string(),
    };
    let out = output::render_single(
        global.output,
        &report,
        |r| format!("✓ Signed in as {} ({})", r.email, r.role),
        |r| r.role.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn logout(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    if let Err(e) = portal.logout().await {
        tracing::warn!(error = %e, "logout request failed; local session cleared anyway");
    }
    if !global.quiet {
        eprintln!("✓ Signed out");
    }
    Ok(())
}

pub async fn profile(portal: &Portal, global: &GlobalOpts) -> Result<(), CliError> {
    if portal.config().credentials.is_some() {
        util::sign_in(portal, global).await?;
    }

    let pb = output::spinner("Loading profile…", global);
    let result = portal.load_profile().await;
    pb.finish_and_clear();
    let profile = result.map_err(|e| util::with_profile(e.into(), global))?;

    let report = ProfileReport {
        username: profile.username,
        email: profile.email,
    };
    let out = output::render_single(
        global.output,
        &report,
        |p| {
            output::detail_lines(&[
                ("Username", p.username.clone()),
                ("Email", p.email.clone()),
            ])
        },
        |p| p.username.clone(),
    );
    output::print_output(&out, global.quiet);
    Ok(())
}
