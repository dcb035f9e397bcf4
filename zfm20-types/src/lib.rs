//! Type definitions for zfm20

pub mod confirmation;
pub mod error;
pub mod results;
pub mod system;

pub use confirmation::ConfirmationCode;
pub use error::{Error, Result};
pub use results::{MatchResult, SearchResult};
pub use system::{StatusFlags, SystemParameters};
