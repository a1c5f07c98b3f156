pub mod config;
pub mod delivery;
pub mod domain;
pub mod prompt;
pub mod recommend;
pub mod rejection;
pub mod stage;

pub use delivery::{first_phone_run, is_delivery_data};
pub use domain::message::{Message, MessageRole};
pub use domain::order::Order;
pub use domain::product::Product;
pub use prompt::{compose_instructions, PromptInputs, NO_COMPATIBLE_SUGGESTIONS};
pub use recommend::{recommend, window_text, MAX_RECOMMENDATIONS};
pub use rejection::rejection_set;
pub use stage::ConversationStage;
