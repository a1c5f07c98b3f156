//! Delivery-data heuristic. A classifier, not a validator: false positives
//! and negatives are accepted, it only gates whether an order capture is
//! attempted.

const DELIVERY_KEYWORDS: [&str; 3] = ["calle", "colonia", "número"];

/// Length of a digit run interpreted as a local phone number.
pub const PHONE_RUN_LEN: usize = 10;

/// True when an utterance plausibly carries delivery information: an address
/// keyword in the lower-cased text, or a contiguous 10-digit run in the raw
/// text.
pub fn is_delivery_data(text: &str) -> bool {
    let lowered = text.to_lowercase();
    DELIVERY_KEYWORDS.iter().any(|keyword| lowered.contains(keyword))
        || first_phone_run(text).is_some()
}

/// First contiguous [`PHONE_RUN_LEN`]-digit run in the text. A longer run
/// yields its first ten digits.
pub fn first_phone_run(text: &str) -> Option<String> {
    let mut run = String::with_capacity(PHONE_RUN_LEN);

    for ch in text.chars() {
        if ch.is_ascii_digit() {
            run.push(ch);
            if run.len() == PHONE_RUN_LEN {
                return Some(run);
            }
        } else {
            run.clear();
        }
    }

    None
}
