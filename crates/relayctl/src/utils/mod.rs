pub(crate) mod error_messages;
pub mod logging;
