//! Log in to an Authware application and inspect the result.
//!
//! Required environment variables:
//! - AUTHWARE_APP_ID
//! - AUTHWARE_APP_VERSION
//! - AUTHWARE_USERNAME
//! - AUTHWARE_PASSWORD
//!
//! Optional:
//! - AUTHWARE_BASE_URL
//!
//! Run with: cargo run --example login

use authware::{AuthwareApplication, Credential, ErrorKind};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    println!("=== Authware Login Example ===\n");

    let app = AuthwareApplication::from_env()?;
    let application = app.initialize_application().await?;
    println!("✓ Connected to {application}");
    println!("  Users: {}", application.user_count);
    println!("  Hardware id checks: {}", application.is_hwid_checking_enabled);
    println!();

    let username = std::env::var("AUTHWARE_USERNAME")?;
    let password = std::env::var("AUTHWARE_PASSWORD")?;

    match app.login(&username, &password).await {
        Ok((auth, profile)) => {
            println!("✓ Logged in as {profile}");
            println!("  Email: {}", profile.email);
            println!("  Plan expires: {}", profile.expiration);
            if let Some(role) = &profile.role {
                println!("  Role: {role}");
            }

            let session = Credential::bearer(auth.auth_token);
            let variables = app.application_variables(Some(&session)).await?;
            println!("\nApplication variables:");
            for variable in variables {
                println!("  {variable}");
            }

            println!("\nClaims:");
            for claim in profile.claims() {
                println!("  {:?}: {}", claim.kind, claim.value);
            }
        }
        Err(err) => match &err.kind {
            ErrorKind::Api { response, .. } => {
                println!("✗ Login rejected: {response}");
            }
            ErrorKind::RateLimited { retry_after, .. } => {
                println!("✗ Too many attempts, try again in {}s", retry_after.as_secs());
            }
            ErrorKind::UpdateRequired { update_url, .. } => {
                println!("✗ This version is no longer supported, download {update_url}");
            }
            _ => return Err(err.into()),
        },
    }

    Ok(())
}
