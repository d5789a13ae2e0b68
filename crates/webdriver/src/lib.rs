//! Minimal W3C WebDriver client.
//!
//! Speaks the JSON-over-HTTP wire protocol against a local driver binary
//! (geckodriver in practice): session lifecycle, navigation, element lookup
//! and interaction. Only the endpoints the booking flows need are
//! implemented; anything fancier belongs to the remote end.

mod error;
mod protocol;
mod session;

pub use error::{Error, Result};
pub use protocol::{Capabilities, ELEMENT_KEY};
pub use session::{By, Element, Session};
