//! Configuration: `.env` loading and credential resolution.
//!
//! Precedence is explicit flag, then environment (first alias wins), then
//! an interactive prompt when one was offered.

use crate::console::Prompter;
use crate::error::{Error, Result};

/// Accepted environment aliases for the API key, in precedence order.
pub const KEY_ENV_VARS: [&str; 2] = ["GODADDY_TOKEN", "GODADDY_API_KEY"];
/// Accepted environment aliases for the API secret, in precedence order.
pub const SECRET_ENV_VARS: [&str; 2] = ["GODADDY_SECRET", "GODADDY_API_SECRET"];

#[derive(Debug, Clone)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

/// Loads a `.env` file from the working directory when present.
pub fn load_env() {
    dotenvy::dotenv().ok();
}

/// Resolves credentials once per invocation. `prompter` is only supplied
/// in interactive mode; without it, an incomplete pair is an error.
pub fn resolve_credentials(
    key_flag: Option<String>,
    secret_flag: Option<String>,
    prompter: Option<&dyn Prompter>,
) -> Result<Credentials> {
    let (key, secret) = resolve_from(key_flag, secret_flag, |var| std::env::var(var).ok());
    complete(key, secret, prompter)
}

fn resolve_from(
    key_flag: Option<String>,
    secret_flag: Option<String>,
    env: impl Fn(&str) -> Option<String>,
) -> (Option<String>, Option<String>) {
    let from_env = |vars: &[&str]| {
        vars.iter()
            .find_map(|var| env(var).filter(|value| !value.trim().is_empty()))
    };

    let key = key_flag
        .filter(|value| !value.trim().is_empty())
        .or_else(|| from_env(&KEY_ENV_VARS));
    let secret = secret_flag
        .filter(|value| !value.trim().is_empty())
        .or_else(|| from_env(&SECRET_ENV_VARS));
    (key, secret)
}

fn complete(
    key: Option<String>,
    secret: Option<String>,
    prompter: Option<&dyn Prompter>,
) -> Result<Credentials> {
    if let (Some(key), Some(secret)) = (&key, &secret) {
        return Ok(Credentials {
            key: key.clone(),
            secret: secret.clone(),
        });
    }

    let Some(prompter) = prompter else {
        return Err(Error::MissingCredentials);
    };

    let key = match key {
        Some(key) => key,
        None => prompt_value(prompter, |p| p.line("GoDaddy API key: "))?,
    };
    let secret = match secret {
        Some(secret) => secret,
        None => prompt_value(prompter, |p| p.secret("GoDaddy API secret: "))?,
    };
    Ok(Credentials { key, secret })
}

fn prompt_value(
    prompter: &dyn Prompter,
    ask: impl Fn(&dyn Prompter) -> std::io::Result<String>,
) -> Result<String> {
    let value = ask(prompter)?.trim().to_string();
    if value.is_empty() {
        return Err(Error::MissingCredentials);
    }
    Ok(value)
}
