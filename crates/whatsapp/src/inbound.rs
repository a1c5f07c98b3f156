use serde::Deserialize;

/// Twilio WhatsApp webhook form payload.
///
/// Twilio posts many more fields (`MessageSid`, `NumMedia`, ...); only the
/// sender and the body drive a conversation turn.
#[derive(Clone, Debug, Deserialize)]
pub struct InboundMessage {
    /// Sender identity, e.g. `whatsapp:+5215512345678`.
    #[serde(rename = "From")]
    pub from: String,
    /// Message text as typed by the customer.
    #[serde(rename = "Body", default)]
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::InboundMessage;

    #[test]
    fn deserializes_twilio_form_fields() {
        let form = "From=whatsapp%3A%2B5215512345678&Body=hola&MessageSid=SM123&NumMedia=0";
        let inbound: InboundMessage =
            serde_urlencoded::from_str(form).expect("decode form payload");

        assert_eq!(inbound.from, "whatsapp:+5215512345678");
        assert_eq!(inbound.body, "hola");
    }

    #[test]
    fn missing_body_defaults_to_empty() {
        let inbound: InboundMessage =
            serde_urlencoded::from_str("From=whatsapp%3A%2B521").expect("decode form payload");

        assert_eq!(inbound.body, "");
    }
}
