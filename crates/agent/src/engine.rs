//! Webhook-turn orchestration: log the inbound message, derive the
//! conversation state, capture delivery orders, and generate the reply.

use std::sync::Arc;

use chrono::Utc;
use maxibot_core::{
    compose_instructions, is_delivery_data, recommend, rejection_set, window_text,
    ConversationStage, Message, MessageRole, Order, Product, PromptInputs,
};
use maxibot_db::{MessageRepository, OrderRepository, ProductRepository};
use tracing::{info, warn};

use crate::llm::LlmClient;
use crate::recorder::{OrderOutcome, OrderRecorder};

/// Reply sent when the language model is unavailable. The turn still lands in
/// the conversation log so the next window reflects what the customer saw.
pub const FALLBACK_REPLY: &str =
    "Disculpa, tuvimos un problema técnico de nuestro lado. ¿Me repites tu mensaje, por favor?";

/// Most recent conversation turns considered per webhook.
pub const WINDOW_LIMIT: u32 = 10;

pub struct ConversationEngine {
    products: Arc<dyn ProductRepository>,
    messages: Arc<dyn MessageRepository>,
    orders: Arc<dyn OrderRepository>,
    recorder: OrderRecorder,
    llm: Arc<dyn LlmClient>,
    persona: String,
}

impl ConversationEngine {
    pub fn new(
        products: Arc<dyn ProductRepository>,
        messages: Arc<dyn MessageRepository>,
        orders: Arc<dyn OrderRepository>,
        llm: Arc<dyn LlmClient>,
        persona: String,
    ) -> Self {
        let recorder = OrderRecorder::new(orders.clone());
        Self { products, messages, orders, recorder, llm, persona }
    }

    /// Handles one inbound customer message and returns the reply text.
    ///
    /// Store and model failures degrade the turn instead of dropping it: a
    /// missing catalog means no recommendations, a failed order write leaves
    /// the conversation flowing, and a failed generation returns
    /// [`FALLBACK_REPLY`].
    pub async fn handle_inbound(&self, customer_id: &str, text: &str) -> String {
        let inbound = Message {
            customer_id: customer_id.to_string(),
            role: MessageRole::User,
            text: text.to_string(),
            sent_at: Utc::now(),
        };

        let inbound_logged = match self.messages.append_message(&inbound).await {
            Ok(()) => true,
            Err(error) => {
                warn!(customer_id, %error, event_name = "inbound_append_failed", "could not log inbound message");
                false
            }
        };

        let mut window = match self.messages.recent_messages(customer_id, WINDOW_LIMIT).await {
            Ok(window) => window,
            Err(error) => {
                warn!(customer_id, %error, event_name = "window_load_failed", "could not load conversation window");
                Vec::new()
            }
        };
        if !inbound_logged {
            // Keep the turn coherent even when the log write failed.
            window.push(inbound.clone());
            let excess = window.len().saturating_sub(WINDOW_LIMIT as usize);
            window.drain(..excess);
        }

        let products = match self.products.list_products().await {
            Ok(products) => products,
            Err(error) => {
                warn!(customer_id, %error, event_name = "catalog_load_failed", "could not load catalog, continuing without it");
                Vec::new()
            }
        };

        let mut active_order = match self.orders.latest_order(customer_id).await {
            Ok(order) => order,
            Err(error) => {
                warn!(customer_id, %error, event_name = "order_load_failed", "could not load order state");
                None
            }
        };

        let rejected = rejection_set(&window, &products);
        let shortlist = recommend(&products, &rejected, &window_text(&window));
        let stage = ConversationStage::derive(window.len(), active_order.is_some());

        if stage.accepts_order_capture() && is_delivery_data(text) {
            active_order = self.capture_order(customer_id, text, &shortlist).await.or(active_order);
        }

        info!(
            customer_id,
            stage = stage.as_str(),
            rejected = rejected.len(),
            recommended = shortlist.len(),
            has_order = active_order.is_some(),
            event_name = "turn_evaluated",
            "evaluated conversation turn"
        );

        let instructions = compose_instructions(&PromptInputs {
            persona: &self.persona,
            active_order: active_order.as_ref(),
            recommendations: &shortlist,
        });

        let reply = match self.llm.generate(&instructions, &window).await {
            Ok(reply) => reply,
            Err(error) => {
                warn!(customer_id, %error, event_name = "generation_failed", "reply generation failed, using fallback");
                FALLBACK_REPLY.to_string()
            }
        };

        let outbound = Message {
            customer_id: customer_id.to_string(),
            role: MessageRole::Assistant,
            text: reply.clone(),
            sent_at: Utc::now(),
        };
        if let Err(error) = self.messages.append_message(&outbound).await {
            warn!(customer_id, %error, event_name = "outbound_append_failed", "could not log assistant reply");
        }

        reply
    }

    /// Fire-and-forget order capture. A storage failure is logged and the
    /// turn proceeds without an active order.
    async fn capture_order(
        &self,
        customer_id: &str,
        utterance: &str,
        shortlist: &[Product],
    ) -> Option<Order> {
        match self.recorder.capture(customer_id, utterance, shortlist).await {
            Ok(OrderOutcome::Recorded(order)) => Some(order),
            Ok(OrderOutcome::AlreadyActive(order)) => Some(order),
            Err(error) => {
                warn!(customer_id, %error, event_name = "order_capture_failed", "order capture failed, continuing turn");
                None
            }
        }
    }
}
