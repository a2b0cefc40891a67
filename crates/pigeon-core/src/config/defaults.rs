use super::Choice;

pub(super) fn default_api_url() -> String {
    "https://api.telegram.org".to_string()
}
pub(super) fn default_log_level() -> String {
    "info".to_string()
}
pub(super) fn default_limit() -> u32 {
    100
}
pub(super) fn default_timeout_secs() -> u64 {
    30
}
pub(super) fn default_request_slack_secs() -> u64 {
    5
}
pub(super) fn default_max_backoff_secs() -> u64 {
    60
}
pub(super) fn default_queue_capacity() -> usize {
    64
}
pub(super) fn default_true() -> bool {
    true
}
pub(super) fn default_greeting() -> String {
    "Hi".to_string()
}
pub(super) fn default_location_button() -> String {
    "Share your location".to_string()
}
pub(super) fn default_prompt() -> String {
    "Your sex:".to_string()
}
pub(super) fn default_choice_prefix() -> String {
    "sex:".to_string()
}
pub(super) fn default_choices() -> Vec<Choice> {
    vec![
        Choice {
            label: "Female".to_string(),
            data: "female".to_string(),
        },
        Choice {
            label: "Male".to_string(),
            data: "male".to_string(),
        },
    ]
}
pub(super) fn default_choice_reply() -> String {
    "Your choice: {choice}".to_string()
}
pub(super) fn default_ack_text() -> String {
    "Your configs changed".to_string()
}
