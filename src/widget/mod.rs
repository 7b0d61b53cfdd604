//! Embeddable chat widget controller.
//!
//! Owns the open/closed panel state, the append-only message log and the
//! submit-to-response cycle. The surrounding page supplies the actual UI
//! through [`WidgetView`]; the chat endpoint is reached through
//! [`ChatTransport`]. Both are traits so a headless double can stand in
//! during tests.

mod controller;
mod transport;
mod view;

pub use controller::{ChatWidget, FALLBACK_ERROR_TEXT, PLACEHOLDER_TEXT, SubmitOutcome};
pub use transport::{ChatTransport, HttpTransport, TransportError};
pub use view::{WidgetView, format_message_timestamp};
