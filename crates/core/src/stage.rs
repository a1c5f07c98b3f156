//! Explicit rendering of the per-customer conversation lifecycle that is
//! otherwise implicit in "latest row wins" queries.

/// NEW → ENGAGED on the first message; ENGAGED → ORDERED once an order row
/// exists. ORDERED is terminal for recommendation/context purposes: later
/// messages still see the order context but the recorder stays inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationStage {
    New,
    Engaged,
    Ordered,
}

impl ConversationStage {
    pub fn derive(history_len: usize, has_active_order: bool) -> Self {
        if has_active_order {
            Self::Ordered
        } else if history_len == 0 {
            Self::New
        } else {
            Self::Engaged
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Engaged => "engaged",
            Self::Ordered => "ordered",
        }
    }

    /// The recorder only fires on the ENGAGED→ORDERED edge; an ORDERED
    /// customer never captures a second order from this path.
    pub fn accepts_order_capture(&self) -> bool {
        !matches!(self, Self::Ordered)
    }
}
