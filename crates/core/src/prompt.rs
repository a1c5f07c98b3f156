//! Instruction-payload composition for the text generator.
//!
//! Pure assembly: persona preamble, then the captured-order context when an
//! active order exists, then the numbered recommendation shortlist. The
//! generator receives this as its system-side instructions alongside the raw
//! message history.

use crate::domain::order::Order;
use crate::domain::product::Product;

/// Rendered in place of the shortlist when every candidate was filtered out.
pub const NO_COMPATIBLE_SUGGESTIONS: &str =
    "Por ahora no hay una bolsa compatible con lo que pide el cliente; ofrece tomar nota de lo que busca.";

/// Default sales persona, overridable through the `[persona]` config section.
pub const DEFAULT_PERSONA: &str = "\
Eres un vendedor amable y directo de MAXIBOLSAS. Estás hablando por WhatsApp \
con un cliente interesado en comprar bolsas de basura. Tu objetivo es cerrar \
la venta. Habla solo en español. Siempre ofrece envío gratis y pago contra \
entrega. Si el cliente está interesado, pídele: 1) dirección completa, \
2) número de teléfono, 3) día para la entrega.";

pub struct PromptInputs<'a> {
    pub persona: &'a str,
    pub active_order: Option<&'a Order>,
    pub recommendations: &'a [Product],
}

/// Builds the full instruction string handed to the generation client.
pub fn compose_instructions(inputs: &PromptInputs<'_>) -> String {
    let mut sections = vec![inputs.persona.trim().to_string()];

    if let Some(order) = inputs.active_order {
        sections.push(order_context(order));
    }

    sections.push(recommendation_block(inputs.recommendations));
    sections.join("\n\n")
}

fn order_context(order: &Order) -> String {
    format!(
        "El cliente ya tiene un pedido registrado el {date}: producto \"{product}\", \
dirección \"{address}\", teléfono \"{phone}\". No vuelvas a pedirle estos datos; \
confirma la entrega si pregunta por su pedido.",
        date = order.created_at.format("%Y-%m-%d"),
        product = order.product_name,
        address = order.address,
        phone = order.phone,
    )
}

fn recommendation_block(recommendations: &[Product]) -> String {
    if recommendations.is_empty() {
        return NO_COMPATIBLE_SUGGESTIONS.to_string();
    }

    let mut block = String::from("Productos que puedes recomendar:");
    for (index, product) in recommendations.iter().enumerate() {
        block.push_str(&format!("\n{}. {} — ${}", index + 1, product.name, product.price));
        if let Some(description) = &product.description {
            block.push_str(&format!(" ({description})"));
        }
    }
    block
}
