//! Link configuration

use std::time::Duration;

use zfm20_core::constants::{
    DEFAULT_ADDRESS, DEFAULT_BAUD_RATE, DEFAULT_PASSWORD, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_RESPONSE_TIMEOUT_MS,
};

/// Settings for a [`FingerprintLink`](crate::FingerprintLink)
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use zfm20::LinkConfig;
///
/// let config = LinkConfig::default()
///     .with_baud_rate(115_200)
///     .with_response_timeout(Duration::from_secs(2));
/// assert_eq!(config.baud_rate, 115_200);
/// ```
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// UART baud rate
    pub baud_rate: u32,

    /// Module address used until changed with `set_address`
    pub address: u32,

    /// Module password used until changed with `set_password`
    pub password: u32,

    /// Upper bound on waiting for a complete reply
    pub response_timeout: Duration,

    /// Wait per availability poll while collecting a reply
    pub poll_interval: Duration,

    /// Decode replies fully and reject bad checksums
    pub verify_checksum: bool,
}

impl LinkConfig {
    /// Set baud rate
    pub fn with_baud_rate(mut self, baud_rate: u32) -> Self {
        self.baud_rate = baud_rate;
        self
    }

    /// Set module address
    pub fn with_address(mut self, address: u32) -> Self {
        self.address = address;
        self
    }

    /// Set module password
    pub fn with_password(mut self, password: u32) -> Self {
        self.password = password;
        self
    }

    /// Set response timeout
    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    /// Set poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Enable or disable reply checksum verification (off by default)
    pub fn with_checksum_verification(mut self, enabled: bool) -> Self {
        self.verify_checksum = enabled;
        self
    }
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
            address: DEFAULT_ADDRESS,
            password: DEFAULT_PASSWORD,
            response_timeout: Duration::from_millis(DEFAULT_RESPONSE_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            verify_checksum: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LinkConfig::default();

        assert_eq!(config.baud_rate, 57_600);
        assert_eq!(config.address, 0xFFFF_FFFF);
        assert_eq!(config.password, 0);
        assert_eq!(config.response_timeout, Duration::from_millis(5_000));
        assert_eq!(config.poll_interval, Duration::from_millis(100));
        assert!(!config.verify_checksum);
    }

    #[test]
    fn test_config_builder() {
        let config = LinkConfig::default()
            .with_address(0x1234_5678)
            .with_password(42)
            .with_poll_interval(Duration::from_millis(10))
            .with_checksum_verification(true);

        assert_eq!(config.address, 0x1234_5678);
        assert_eq!(config.password, 42);
        assert_eq!(config.poll_interval, Duration::from_millis(10));
        assert!(config.verify_checksum);
    }
}
