const SYSTEM_AUDIT: &str = include_str!("../../prompts/system_audit.txt");

/// Build the system prompt for an audit.
pub fn build_system_prompt() -> &'static str {
    SYSTEM_AUDIT
}

/// Build the user message carrying the domain and the text under audit.
pub fn build_audit_prompt(domain: &str, text: &str) -> String {
    format!("Domain: {domain}\n\nText:\n{text}")
}
