pub const GREETINGS: [&str; 6] = ["hello", "hi", "hey", "greetings", "good morning", "good evening"];

pub const MORNING_GREETING: &str = "Good morning! How can I assist you today?";
pub const AFTERNOON_GREETING: &str = "Good afternoon! How may I help you today?";
pub const EVENING_GREETING: &str = "Good evening! How can I be of service to you today?";

/// True when the lower-cased message contains any greeting as a substring.
///
/// Matching is unanchored, so "hi" also matches inside "history".
pub fn is_greeting(message: &str) -> bool {
    let message = message.to_lowercase();
    GREETINGS.iter().any(|greeting| message.contains(greeting))
}

pub fn time_based_greeting(hour: u32) -> &'static str {
    match hour {
        0..=11 => MORNING_GREETING,
        12..=17 => AFTERNOON_GREETING,
        _ => EVENING_GREETING,
    }
}
