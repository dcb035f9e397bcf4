//! Identify a finger against the library

use zfm20::{ConfirmationCode, FingerprintLink};

#[tokio::main]
async fn main() -> zfm20::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let port = std::env::var("ZFM20_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    let mut link = FingerprintLink::open(port, 57_600)?;
    link.verify_password().await?;

    println!("Waiting for a finger...");

    let code = link.wait_for_finger().await?;
    if code != ConfirmationCode::Ok {
        println!("✗ Capture failed: {}", code);
        return Ok(());
    }

    let code = link.image_to_template(1).await?;
    if code != ConfirmationCode::Ok {
        println!("✗ Feature extraction failed: {}", code);
        return Ok(());
    }

    let result = link.search(1).await?;
    println!("{}", result);

    Ok(())
}
