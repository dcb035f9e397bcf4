//! Enrollment example
//!
//! Usage: ZFM20_PORT=/dev/ttyUSB0 cargo run --example enroll -- <id>

use zfm20::{ConfirmationCode, FingerprintLink};

#[tokio::main]
async fn main() -> zfm20::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("ZFM20_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
    let id: u16 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(1);

    let mut link = FingerprintLink::open(port, 57_600)?;
    link.verify_password().await?;

    println!("Place a finger on the sensor, lift it when asked, then place it again");

    match link.enroll(id).await? {
        ConfirmationCode::Ok => println!("✓ Stored as template {}", id),
        code => println!("✗ Enrollment failed: {}", code),
    }

    Ok(())
}
