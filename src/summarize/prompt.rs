//! Prompt construction for the summarization call

/// Instructions sent ahead of the query and evidence. The key names here are
/// a contract with the model, not a guarantee from it.
const SYSTEM_PROMPT: &str = "You are a search assistant. Use the web evidence to answer \
the user's query clearly. Then provide 3-5 bullet key takeaways and 3-5 follow-up \
questions. Respond as JSON with keys: final_answer, key_takeaways, followups.";

/// Placeholder substituted when no evidence was gathered, so the model sees
/// an explicit statement instead of a degenerate empty section.
const NO_EVIDENCE: &str = "(no web evidence available)";

/// Flatten instructions, query, and evidence into a single prompt string.
pub fn build_prompt(query: &str, evidence: &str) -> String {
    let evidence = if evidence.trim().is_empty() {
        NO_EVIDENCE
    } else {
        evidence
    };

    format!(
        "{}\n\nUser query: {}\n\nWeb evidence:\n{}",
        SYSTEM_PROMPT, query, evidence
    )
}
