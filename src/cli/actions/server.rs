use crate::api;
use crate::api::handlers::auth::AuthConfig;
use crate::cli::actions::Action;
use anyhow::{ensure, Context, Result};
use url::Url;

/// Handle the server action
///
/// # Errors
///
/// Returns an error if the DSN is malformed or the server fails to start
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server { port, dsn, otp_ttl } => {
            let parsed = Url::parse(&dsn).context("Invalid database DSN")?;
            ensure!(
                matches!(parsed.scheme(), "postgres" | "postgresql"),
                "DSN must use the postgres scheme, got: {}",
                parsed.scheme()
            );

            let auth_config = AuthConfig::new().with_otp_ttl_seconds(otp_ttl);

            api::new(port, dsn, auth_config).await?;
        }
    }

    Ok(())
}
