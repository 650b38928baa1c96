//! Shared command plumbing: session setup and confirmation prompts.

use secrecy::SecretString;
use url::Url;

use portglass_api::{SwitchClient, TransportConfig};
use portglass_core::{MonitorConfig, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Everything a command handler needs: an authenticated client, the
/// session identity, and the profile's monitor tuning.
pub struct Ctx {
    pub client: SwitchClient,
    pub session: Session,
    pub monitor: MonitorConfig,
}

/// Resolve configuration, build the client, and log in.
pub async fn connect(global: &GlobalOpts) -> Result<Ctx, CliError> {
    let cfg = portglass_config::load_config_or_default();

    let (url, transport, monitor, username, password) =
        match portglass_config::resolve_profile(&cfg, global.profile.as_deref()) {
            Ok((profile_name, profile)) => {
                let url = match global.backend {
                    Some(ref b) => parse_backend(b)?,
                    None => portglass_config::backend_url(profile)?,
                };
                let mut transport = portglass_config::profile_transport(profile, &cfg.defaults);
                if global.insecure {
                    transport.danger_accept_invalid_certs = true;
                }
                let monitor = portglass_config::profile_monitor_config(profile, &cfg.defaults);
                let (mut username, password) =
                    portglass_config::resolve_credentials(profile, &profile_name)?;
                if let Some(ref u) = global.username {
                    username.clone_from(u);
                }
                (url, transport, monitor, username, password)
            }
            Err(profile_err) => {
                // No usable profile: fall back to flags + env vars alone.
                let Some(ref b) = global.backend else {
                    return Err(profile_err.into());
                };
                let url = parse_backend(b)?;
                let transport = TransportConfig {
                    danger_accept_invalid_certs: global.insecure,
                    ..TransportConfig::default()
                };
                let username = global
                    .username
                    .clone()
                    .ok_or_else(|| CliError::Validation {
                        message: "no username: set --username or PORTGLASS_USERNAME".into(),
                    })?;
                let password = std::env::var("PORTGLASS_PASSWORD")
                    .map(SecretString::from)
                    .map_err(|_| CliError::Validation {
                        message: "no password: set PORTGLASS_PASSWORD".into(),
                    })?;
                (url, transport, MonitorConfig::default(), username, password)
            }
        };

    let client = SwitchClient::new(url, &transport)?;
    let session = Session::from(client.login(&username, &password).await?);

    Ok(Ctx {
        client,
        session,
        monitor,
    })
}

fn parse_backend(raw: &str) -> Result<Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        message: format!("invalid backend URL: {raw}"),
    })
}

/// Interactive yes/no confirmation, skipped by `--yes`.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    Ok(dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}
