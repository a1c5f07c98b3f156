use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Form, Router};
use maxibot_agent::ConversationEngine;
use maxibot_whatsapp::{message_response, InboundMessage};
use tracing::info;

#[derive(Clone)]
pub struct WebhookState {
    engine: Arc<ConversationEngine>,
}

pub fn router(engine: Arc<ConversationEngine>) -> Router {
    Router::new()
        .route("/", get(banner))
        .route("/whatsapp", post(inbound))
        .with_state(WebhookState { engine })
}

/// Liveness banner for browser checks against the webhook base URL.
pub async fn banner() -> &'static str {
    "Bot de MAXIBOLSAS funcionando. Conecta el webhook de Twilio a POST /whatsapp."
}

pub async fn inbound(
    State(state): State<WebhookState>,
    Form(message): Form<InboundMessage>,
) -> impl IntoResponse {
    info!(
        customer_id = %message.from,
        body_chars = message.body.chars().count(),
        event_name = "webhook.inbound",
        "inbound whatsapp message"
    );

    let reply = state.engine.handle_inbound(&message.from, &message.body).await;

    ([(header::CONTENT_TYPE, "text/xml")], message_response(&reply))
}
