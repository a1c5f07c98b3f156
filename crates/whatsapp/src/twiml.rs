//! Minimal TwiML rendering for webhook replies.

/// Wraps a reply in a TwiML `<Response><Message>` envelope.
pub fn message_response(reply: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response><Message>{}</Message></Response>",
        escape_xml(reply)
    )
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::message_response;

    #[test]
    fn wraps_reply_in_message_envelope() {
        let twiml = message_response("¡Hola! ¿Qué bolsa buscas?");

        assert!(twiml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(twiml.contains("<Response><Message>¡Hola! ¿Qué bolsa buscas?</Message></Response>"));
    }

    #[test]
    fn escapes_xml_metacharacters() {
        let twiml = message_response("bolsas <grandes> & \"gruesas\"");

        assert!(twiml.contains("bolsas &lt;grandes&gt; &amp; &quot;gruesas&quot;"));
        assert!(!twiml.contains("<grandes>"));
    }
}
