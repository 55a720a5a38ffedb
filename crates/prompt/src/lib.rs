//! # Prompt
//!
//! Formats the pieces of a mission prompt into plain strings for the language model.
//!
//! ## Format
//!
//! - **Mission**: description plus the expected-output criteria
//! - **Context** (optional): mission wrapped with `This is the context you're working with:`
//! - **Memory** (optional): `# Useful context:` block holding the contextual memory sections
//! - **Knowledge** (optional): `Additional Information:` block with knowledge snippets
//! - **Instructions** (optional): `You MUST follow these instructions:` bulleted list
//!
//! Memory sections (`Recent Insights:`, `Historical Data:`, `Entities:`,
//! `User memories/preferences:`) are formatted here as well so the memory crate only
//! decides *what* goes into each section.
//!
//! ## External interactions
//!
//! - **Language models**: the assembled prompt is the `input` handed to the mission executor.

/// Section title for short-term memory hits.
pub const SECTION_SHORT_TERM: &str = "Recent Insights:";

/// Section title for long-term memory suggestions.
pub const SECTION_LONG_TERM: &str = "Historical Data:";

/// Section title for entity memory hits.
pub const SECTION_ENTITY: &str = "Entities:";

/// Section title for user memory hits.
pub const SECTION_USER: &str = "User memories/preferences:";

/// Heading that precedes knowledge-base snippets.
pub const KNOWLEDGE_HEADING: &str = "Additional Information:";

/// Heading that precedes mandatory instructions (human feedback or trained suggestions).
pub const INSTRUCTIONS_HEADING: &str = "You MUST follow these instructions:";

/// Renders the base prompt of a mission: its description and the criteria for the final answer.
pub fn mission_prompt(description: &str, expected_output: &str) -> String {
    format!(
        "{description}\n\nThis is the expect criteria for your final answer: {expected_output}\n\
         you MUST return the actual complete content as the final answer, not a summary."
    )
}

/// Wraps a mission prompt with the context produced by previous missions.
pub fn with_context(mission: &str, context: &str) -> String {
    format!("{mission}\n\nThis is the context you're working with:\n{context}")
}

/// Appends the contextual memory block to a prompt.
///
/// A blank `memory` leaves the prompt untouched so no empty header is emitted.
pub fn with_memory(mut prompt: String, memory: &str) -> String {
    if memory.trim().is_empty() {
        return prompt;
    }
    prompt.push_str("\n\n# Useful context: \n");
    prompt.push_str(memory);
    prompt
}

/// Appends knowledge snippets under [`KNOWLEDGE_HEADING`], one per line.
///
/// No snippets → prompt unchanged.
pub fn with_knowledge<I, S>(mut prompt: String, snippets: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let lines: Vec<String> = snippets
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    if lines.is_empty() {
        return prompt;
    }
    prompt.push_str("\n\n");
    prompt.push_str(KNOWLEDGE_HEADING);
    prompt.push('\n');
    prompt.push_str(&lines.join("\n"));
    prompt
}

/// Appends a bulleted list of mandatory instructions under [`INSTRUCTIONS_HEADING`].
///
/// No instructions → prompt unchanged.
pub fn with_instructions<I, S>(mut prompt: String, instructions: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<String> = instructions
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect();
    if items.is_empty() {
        return prompt;
    }
    prompt.push_str("\n\n");
    prompt.push_str(INSTRUCTIONS_HEADING);
    prompt.push_str(" \n - ");
    prompt.push_str(&items.join("\n - "));
    prompt
}

/// Formats one memory section: the title followed by `- {line}` per line.
///
/// Returns `None` when there are no lines, so callers never emit a bare header.
pub fn format_section<I, S>(title: &str, lines: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let body: Vec<String> = lines
        .into_iter()
        .map(|l| format!("- {}", l.as_ref()))
        .collect();
    if body.is_empty() {
        return None;
    }
    Some(format!("{title}\n{}", body.join("\n")))
}

/// Joins present memory sections with a newline, keeping the given order.
///
/// All sections absent → empty string.
pub fn join_sections<I>(sections: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    sections
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}
