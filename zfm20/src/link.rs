//! High-level fingerprint module interface

use bytes::BytesMut;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, trace, warn};

use zfm20_core::{
    constants::{search, slots},
    Command, DeviceIdentity, Packet, PacketKind,
};
use zfm20_transport::{SerialTransport, Transport};
use zfm20_types::{ConfirmationCode, MatchResult, SearchResult, SystemParameters};

use crate::config::LinkConfig;
use crate::error::{Error, Result};
use crate::reply::Reply;

/// Link to a ZFM20 fingerprint module
///
/// Every operation sends one command packet, waits for the module's ACK
/// packet and reads the confirmation code from it. Operations that only
/// report a code return it as a value: `NoFinger` from
/// [`generate_image`](Self::generate_image) is an ordinary outcome.
///
/// The link owns its transport and is not `Clone`; all operations take
/// `&mut self`, so only one exchange is ever in flight.
///
/// Bytes left in the receive queue when an exchange starts belong to an
/// earlier reply that arrived after its timeout. They are discarded before
/// each command is sent, so a late reply is never taken for the answer to
/// the next command.
///
/// # Examples
///
/// ```no_run
/// use zfm20::{ConfirmationCode, FingerprintLink};
///
/// #[tokio::main]
/// async fn main() -> zfm20::Result<()> {
///     let mut link = FingerprintLink::open("/dev/ttyUSB0", 57_600)?;
///     link.verify_password().await?;
///
///     if link.wait_for_finger().await? == ConfirmationCode::Ok
///         && link.image_to_template(1).await? == ConfirmationCode::Ok
///     {
///         let result = link.search(1).await?;
///         println!("{}", result);
///     }
///
///     Ok(())
/// }
/// ```
pub struct FingerprintLink {
    transport: Box<dyn Transport>,
    identity: DeviceIdentity,
    config: LinkConfig,
}

impl FingerprintLink {
    /// Open a serial port and configure it for the given baud rate
    pub fn open(path: impl Into<String>, baud_rate: u32) -> Result<Self> {
        Self::new(
            SerialTransport::new(path),
            LinkConfig::default().with_baud_rate(baud_rate),
        )
    }

    /// Create a link over any transport
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot be configured for
    /// `config.baud_rate`.
    pub fn new(transport: impl Transport + 'static, config: LinkConfig) -> Result<Self> {
        let mut transport: Box<dyn Transport> = Box::new(transport);
        transport.configure(config.baud_rate)?;

        info!(
            "Opened fingerprint link on {} at {} baud",
            transport.name(),
            config.baud_rate
        );

        Ok(Self {
            transport,
            identity: DeviceIdentity::new(config.address, config.password),
            config,
        })
    }

    /// Current module address and password
    pub fn identity(&self) -> &DeviceIdentity {
        &self.identity
    }

    /// Link configuration
    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Handshake with the module using the current password
    ///
    /// Any well-formed ACK counts as verified; a non-OK code is logged but
    /// not turned into an error.
    pub async fn verify_password(&mut self) -> Result<bool> {
        debug!("Verifying password...");

        let password = self.identity.password().to_be_bytes();
        let reply = self.execute(Command::VerifyPassword, &password).await?;

        let code = reply.code();
        if !code.is_ok() {
            warn!("Module answered password handshake with {}", code);
        }

        Ok(true)
    }

    /// Number of templates stored in the library
    pub async fn template_count(&mut self) -> Result<u16> {
        debug!("Reading template count...");

        let reply = self.execute(Command::TemplateCount, &[]).await?;
        Self::ensure_ok(Command::TemplateCount, &reply)?;

        let count = reply.u16_at(10);
        debug!("Template count: {}", count);

        Ok(count)
    }

    /// Change the module password
    ///
    /// The new password is used for later handshakes once the module accepts
    /// it.
    pub async fn set_password(&mut self, password: u32) -> Result<()> {
        debug!("Setting new password...");

        let reply = self
            .execute(Command::SetPassword, &password.to_be_bytes())
            .await?;
        Self::ensure_ok(Command::SetPassword, &reply)?;

        self.identity.set_password(password);
        warn!("Module password changed");

        Ok(())
    }

    /// Change the module address
    ///
    /// Every later packet is addressed to `address` once the module accepts
    /// it.
    pub async fn set_address(&mut self, address: u32) -> Result<()> {
        debug!("Setting new address 0x{:08X}...", address);

        let reply = self
            .execute(Command::SetAddress, &address.to_be_bytes())
            .await?;
        Self::ensure_ok(Command::SetAddress, &reply)?;

        self.identity.set_address(address);
        warn!("Module address changed to 0x{:08X}", address);

        Ok(())
    }

    /// Capture a finger image into the image buffer
    pub async fn generate_image(&mut self) -> Result<ConfirmationCode> {
        let reply = self.execute(Command::GenImage, &[]).await?;
        Ok(reply.code())
    }

    /// Extract features from the image buffer into character buffer `slot`
    pub async fn image_to_template(&mut self, slot: u8) -> Result<ConfirmationCode> {
        Self::check_slot(slot)?;
        debug!("Converting image into buffer {}...", slot);

        let reply = self.execute(Command::Img2Tz, &[slot]).await?;
        Ok(reply.code())
    }

    /// Combine both character buffers into a template
    pub async fn create_model(&mut self) -> Result<ConfirmationCode> {
        debug!("Creating model...");

        let reply = self.execute(Command::RegModel, &[]).await?;
        Ok(reply.code())
    }

    /// Store character buffer `slot` in the library at `id`
    pub async fn store_model(&mut self, slot: u8, id: u16) -> Result<ConfirmationCode> {
        Self::check_slot(slot)?;
        debug!("Storing buffer {} as template {}...", slot, id);

        let [hi, lo] = id.to_be_bytes();
        let reply = self.execute(Command::Store, &[slot, hi, lo]).await?;
        Ok(reply.code())
    }

    /// Load template `id` from the library into character buffer `slot`
    pub async fn load_model(&mut self, slot: u8, id: u16) -> Result<ConfirmationCode> {
        Self::check_slot(slot)?;
        debug!("Loading template {} into buffer {}...", id, slot);

        let [hi, lo] = id.to_be_bytes();
        let reply = self.execute(Command::LoadChar, &[slot, hi, lo]).await?;
        Ok(reply.code())
    }

    /// Delete template `id` from the library
    pub async fn delete_model(&mut self, id: u16) -> Result<ConfirmationCode> {
        debug!("Deleting template {}...", id);

        let [hi, lo] = id.to_be_bytes();
        let reply = self
            .execute(Command::DeleteChar, &[hi, lo, 0x00, 0x01])
            .await?;
        Ok(reply.code())
    }

    /// Erase every template in the library
    pub async fn delete_database(&mut self) -> Result<ConfirmationCode> {
        warn!("Erasing template library...");

        let reply = self.execute(Command::Empty, &[]).await?;
        Ok(reply.code())
    }

    /// Search the library with character buffer `slot`
    ///
    /// Id and score are only read when the module reports a match; otherwise
    /// both are zero.
    pub async fn search(&mut self, slot: u8) -> Result<SearchResult> {
        Self::check_slot(slot)?;
        debug!("Searching library with buffer {}...", slot);

        let [start_hi, start_lo] = search::START_PAGE.to_be_bytes();
        let [count_hi, count_lo] = search::PAGE_COUNT.to_be_bytes();
        let reply = self
            .execute(
                Command::Search,
                &[slot, start_hi, start_lo, count_hi, count_lo],
            )
            .await?;

        let code = reply.code();
        if !code.is_ok() {
            return Ok(SearchResult::miss(code));
        }

        let result = SearchResult {
            code,
            id: reply.u16_at(10),
            score: reply.u16_at(12),
        };
        debug!("Search result: {}", result);

        Ok(result)
    }

    /// Compare the two character buffers
    pub async fn match_templates(&mut self) -> Result<MatchResult> {
        debug!("Matching buffers...");

        let reply = self.execute(Command::Match, &[]).await?;

        Ok(MatchResult {
            code: reply.code(),
            score: reply.u16_at(10),
        })
    }

    /// Read the module's system parameter block
    pub async fn read_system_parameters(&mut self) -> Result<SystemParameters> {
        debug!("Reading system parameters...");

        let reply = self.execute(Command::ReadSysPara, &[]).await?;
        Self::ensure_ok(Command::ReadSysPara, &reply)?;

        let params = SystemParameters::from_payload(reply.slice(10, 26))?;
        debug!("System parameters: {:?}", params);

        Ok(params)
    }

    /// Poll [`generate_image`](Self::generate_image) until a finger is seen
    ///
    /// Returns the first code other than `NoFinger`.
    pub async fn wait_for_finger(&mut self) -> Result<ConfirmationCode> {
        debug!("Waiting for finger...");

        loop {
            let code = self.generate_image().await?;
            if code != ConfirmationCode::NoFinger {
                return Ok(code);
            }
            sleep(self.config.poll_interval).await;
        }
    }

    /// Poll [`generate_image`](Self::generate_image) until the sensor is empty
    pub async fn wait_for_removal(&mut self) -> Result<()> {
        debug!("Waiting for finger removal...");

        loop {
            if self.generate_image().await? == ConfirmationCode::NoFinger {
                return Ok(());
            }
            sleep(self.config.poll_interval).await;
        }
    }

    /// Enroll a finger and store it as template `id`
    ///
    /// Captures the finger twice (asking for removal in between), combines
    /// both captures and stores the model. Returns the first code that is not
    /// OK, or OK when the template was stored.
    pub async fn enroll(&mut self, id: u16) -> Result<ConfirmationCode> {
        info!("Enrolling template {}...", id);

        for slot in [slots::FIRST, slots::SECOND] {
            if slot == slots::SECOND {
                self.wait_for_removal().await?;
            }

            let code = self.wait_for_finger().await?;
            if !code.is_ok() {
                return Ok(code);
            }

            let code = self.image_to_template(slot).await?;
            if !code.is_ok() {
                return Ok(code);
            }
        }

        let code = self.create_model().await?;
        if !code.is_ok() {
            return Ok(code);
        }

        let code = self.store_model(slots::FIRST, id).await?;
        if code.is_ok() {
            info!("Enrolled template {}", id);
        }

        Ok(code)
    }

    // Helper methods

    fn check_slot(slot: u8) -> Result<()> {
        if !slots::is_valid(slot) {
            return Err(Error::InvalidSlot(slot));
        }
        Ok(())
    }

    fn ensure_ok(command: Command, reply: &Reply) -> Result<()> {
        let code = reply.code();
        if !code.is_ok() {
            return Err(Error::Device { command, code });
        }
        Ok(())
    }

    async fn execute(&mut self, command: Command, params: &[u8]) -> Result<Reply> {
        let stale = self.transport.discard_input()?;
        if stale > 0 {
            warn!("Discarded {} stale bytes before {}", stale, command);
        }

        let packet = Packet::command(self.identity.address(), command, params);
        self.send_packet(&packet).await?;

        let reply = self.receive_reply(command.response_len()).await?;
        trace!("{} -> {}", command, reply.code());

        Ok(reply)
    }

    async fn send_packet(&mut self, packet: &Packet) -> Result<()> {
        trace!("Sending: {:?}", packet);

        let data = packet.encode()?;
        let mut written = 0;

        while written < data.len() {
            let n = self.transport.write(&data[written..]).await?;
            if n == 0 {
                return Err(zfm20_transport::Error::WriteFailed.into());
            }
            written += n;
        }

        Ok(())
    }

    async fn receive_reply(&mut self, expected: usize) -> Result<Reply> {
        let mut buf = BytesMut::zeroed(expected);
        let mut filled = 0;
        let started = Instant::now();

        while filled < expected {
            let elapsed = started.elapsed();
            if elapsed > self.config.response_timeout {
                warn!(
                    "No complete reply after {:?} ({} of {} bytes)",
                    elapsed, filled, expected
                );
                return Err(Error::Timeout {
                    elapsed_ms: elapsed.as_millis() as u64,
                });
            }

            if !self
                .transport
                .data_available(self.config.poll_interval)
                .await?
            {
                continue;
            }

            filled += self.transport.read(&mut buf[filled..]).await?;
        }

        trace!("Received: {}", hex::encode(&buf));

        Packet::check_header(&buf, PacketKind::Ack)?;
        if self.config.verify_checksum {
            Packet::decode(buf.clone())?;
        }

        Ok(Reply::new(buf.freeze()))
    }
}

impl std::fmt::Debug for FingerprintLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FingerprintLink")
            .field("transport", &self.transport.name())
            .field("identity", &self.identity)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_open_missing_port() {
        let result = FingerprintLink::open("/dev/zfm20-does-not-exist", 57_600);
        assert!(matches!(result, Err(Error::Transport(_))));
    }

    #[test]
    fn test_check_slot() {
        assert!(FingerprintLink::check_slot(1).is_ok());
        assert!(FingerprintLink::check_slot(2).is_ok());
        assert!(matches!(
            FingerprintLink::check_slot(0),
            Err(Error::InvalidSlot(0))
        ));
        assert!(matches!(
            FingerprintLink::check_slot(3),
            Err(Error::InvalidSlot(3))
        ));
    }

    // Requires a module on ZFM20_PORT
    #[tokio::test]
    #[ignore]
    async fn test_link_handshake() {
        let port = std::env::var("ZFM20_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
        let mut link = FingerprintLink::open(port, 57_600).unwrap();

        assert!(link.verify_password().await.unwrap());
        println!("{} templates", link.template_count().await.unwrap());
    }
}
