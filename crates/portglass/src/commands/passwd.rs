//! Interactive password change. Backend validation messages (length
//! rules, wrong old password) are surfaced verbatim.

use dialoguer::Password;
use secrecy::SecretString;

use crate::error::CliError;

use super::util;

pub async fn handle(ctx: &util::Ctx) -> Result<(), CliError> {
    let old = Password::new().with_prompt("Old password").interact()?;
    let new = Password::new()
        .with_prompt("New password")
        .with_confirmation("Confirm new password", "Passwords do not match")
        .interact()?;

    ctx.client
        .change_password(&SecretString::from(old), &SecretString::from(new))
        .await?;

    eprintln!("Password changed.");
    Ok(())
}
