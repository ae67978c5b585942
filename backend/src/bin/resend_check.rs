//! Sends one test email with the current environment to check the provider setup.

use dotenvy::dotenv;
use tracing_subscriber::{fmt, EnvFilter};

use estada_backend::api::resend::{EmailRelay, OutboundEmail, ResendClient};
use estada_backend::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let email_config = &config.email;

    println!("=== Resend API Configuration Test ===");
    println!("RESEND_API_KEY present: {}", email_config.resend_api_key.is_some());
    println!(
        "RESEND_API_KEY length: {}",
        email_config.resend_api_key.as_ref().map(|k| k.len()).unwrap_or(0)
    );
    println!("DEV_MODE: {}", email_config.dev_mode);
    println!("SENDER_EMAIL: {}", email_config.sender_email);
    println!("SENDER_NAME: {}", email_config.sender_name);
    println!("TEST_EMAIL: {}", email_config.test_email);
    println!("Will send to: {:?}", email_config.recipients());
    println!();

    let Some(client) = ResendClient::from_config(email_config)? else {
        anyhow::bail!("RESEND_API_KEY not set");
    };

    println!("Sending test email...");
    let email = OutboundEmail {
        from: email_config.from_header(),
        to: email_config.recipients(),
        subject: "Test Email from Estada".to_string(),
        text: "This is a test email from the Estada contact form system.".to_string(),
        html: None,
        reply_to: None,
        headers: Default::default(),
    };

    match client.send(&email).await {
        Ok(id) => {
            println!("SUCCESS: email accepted with id {}", id);
            Ok(())
        }
        Err(e) => {
            println!("FAILED: {}", e);
            println!("Hint: {}", e.user_message(email_config.dev_mode));
            Err(e.into())
        }
    }
}
