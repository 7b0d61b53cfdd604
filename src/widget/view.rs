use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

use crate::types::ChatMessage;

/// Anchor points the surrounding page exposes to the widget: the message
/// list, the panel, the open/close triggers, the composer and the suggestion
/// buttons. The controller drives these; it never touches the page directly.
pub trait WidgetView {
    /// A message landed at the end of the log (including the transient
    /// placeholder).
    fn message_appended(&mut self, message: &ChatMessage);

    /// The last log entry was retracted (placeholder removal).
    fn last_message_removed(&mut self);

    fn set_panel_hidden(&mut self, hidden: bool);

    fn set_trigger_hidden(&mut self, hidden: bool);

    fn clear_input(&mut self);

    /// Disabled while a conversation turn is in flight.
    fn set_composer_enabled(&mut self, enabled: bool);

    /// One-shot: all suggestion buttons disappear together.
    fn hide_suggestions(&mut self);
}

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Timestamp label for a rendered bubble, in the viewer's local time when the
/// offset is known.
pub fn format_message_timestamp(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}
