pub mod inbound;
pub mod twiml;

pub use inbound::InboundMessage;
pub use twiml::message_response;
