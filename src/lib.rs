//! Resume chat assistant: an embeddable widget controller plus the HTTP
//! endpoint that answers visitor questions from a fixed biographical context.

pub mod ai;
pub mod api;
pub mod persona;
pub mod types;
pub mod widget;
