//! Turns raw completions back into discrete keyword and prompt lines.

use crate::models::PromptStyle;

/// Trimmed, non-empty lines of `raw`, at most `limit` of them, in order.
pub fn parse_lines(raw: &str, limit: usize) -> Vec<String> {
    usable_lines(raw)
        .take(limit)
        .map(str::to_string)
        .collect()
}

/// Like [`parse_lines`], but only keeps lines that contain a period.
pub fn parse_prompt_lines(raw: &str, limit: usize) -> Vec<String> {
    usable_lines(raw)
        .filter(|line| line.contains('.'))
        .take(limit)
        .map(str::to_string)
        .collect()
}

fn usable_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Deterministic stand-in prompt for a keyword the model did not cover.
pub fn fallback_prompt(keyword: &str, style: PromptStyle) -> String {
    match style {
        PromptStyle::Photography => format!(
            "A professional photograph featuring {} with dramatic lighting and artistic composition.",
            keyword
        ),
        PromptStyle::Vector => format!(
            "A clean vector illustration of {} with modern design elements and vibrant colors.",
            keyword
        ),
    }
}

/// Pads `prompts` with fallbacks for the keywords past its end, so the result
/// has exactly one entry per keyword.
pub fn pad_with_fallbacks(
    mut prompts: Vec<String>,
    keywords: &[String],
    style: PromptStyle,
) -> Vec<String> {
    prompts.truncate(keywords.len());
    let missing = &keywords[prompts.len()..];
    if !missing.is_empty() {
        tracing::warn!(
            "Model returned {} usable prompt(s) for {} keyword(s); filling {} with fallbacks",
            prompts.len(),
            keywords.len(),
            missing.len()
        );
    }
    prompts.extend(missing.iter().map(|k| fallback_prompt(k, style)));
    prompts
}
