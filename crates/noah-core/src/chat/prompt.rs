//! Store-support instruction sent with every generation call.
//!
//! The topical restriction is only an instruction to the model; nothing in
//! this crate filters replies.

/// Default system instruction: persona, store policies, and off-topic redirect.
pub const SYSTEM_PROMPT: &str = r#"You are Noah, a helpful and polite customer support agent for a small e-commerce store.
Answer clearly, concisely, and professionally.

Store Policies:
- Shipping: We ship worldwide. Delivery takes 5–7 business days.
- Returns: Items can be returned within 30 days for a full refund.
- Support Hours: Monday to Friday, 9 AM to 6 PM IST.

IMPORTANT: Only answer questions about our store, products, orders, shipping, returns, and store policies.

If the user asks about anything unrelated to the store (general knowledge, personal advice, coding help, or other off-topic requests), politely redirect them with a message such as:
"I appreciate your interest, but I'm here specifically to help with questions about our store, products, orders, and policies. Is there anything related to our store I can assist you with today?"

Stay focused on store topics only."#;

/// Build the final user turn: the instruction followed by the utterance.
pub fn compose_final_turn(system_instruction: &str, utterance: &str) -> String {
    format!("\n{system_instruction}\n\nUser: {utterance}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_turn_layout() {
        let turn = compose_final_turn("Be nice.", "Where is my parcel?");
        assert_eq!(turn, "\nBe nice.\n\nUser: Where is my parcel?\n");
    }

    #[test]
    fn test_default_prompt_mentions_policies_and_redirect() {
        assert!(SYSTEM_PROMPT.contains("30 days"));
        assert!(SYSTEM_PROMPT.contains("Is there anything related to our store"));
    }
}
