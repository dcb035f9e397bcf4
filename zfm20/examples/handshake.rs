//! Handshake and library status example

use tracing_subscriber::EnvFilter;
use zfm20::{FingerprintLink, LinkConfig, SerialTransport};

#[tokio::main]
async fn main() -> zfm20::Result<()> {
    // Initialize logging (RUST_LOG=zfm20=trace shows every frame)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Change to your module's serial port
    let port = std::env::var("ZFM20_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    println!("Opening {}...", port);

    let mut link = FingerprintLink::new(SerialTransport::new(port), LinkConfig::default())?;

    link.verify_password().await?;
    println!("✓ Password verified");

    let params = link.read_system_parameters().await?;
    println!(
        "✓ Library size {}, security level {}, {} baud",
        params.library_size,
        params.security_level,
        params.baud_rate()
    );

    let count = link.template_count().await?;
    println!("✓ {} templates stored", count);

    Ok(())
}
