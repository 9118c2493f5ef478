//! Instruction templates sent to the providers.

use crate::models::PromptStyle;

pub const KEYWORDS: &str = include_str!("../data/prompts/keywords.txt");
pub const PROMPT_SYSTEM: &str = include_str!("../data/prompts/prompt_system.txt");
pub const PHOTOGRAPHY: &str = include_str!("../data/prompts/photography.txt");
pub const VECTOR: &str = include_str!("../data/prompts/vector.txt");
pub const BATCH: &str = include_str!("../data/prompts/batch.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// The template is scanned once, so substituted values are never expanded
/// again. Unknown placeholders are left as written.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            rest = &rest[start..];
            break;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => result.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Instruction asking for `count` keywords about `topic`, one per line.
pub fn keyword_instruction(topic: &str, count: u32) -> String {
    render(
        KEYWORDS,
        &[("topic", topic.trim()), ("count", &count.to_string())],
    )
}

/// Instruction asking for a single one-sentence prompt built around `keyword`.
pub fn prompt_instruction(keyword: &str, style: PromptStyle) -> String {
    let template = match style {
        PromptStyle::Photography => PHOTOGRAPHY,
        PromptStyle::Vector => VECTOR,
    };
    render(template, &[("keyword", keyword)])
}

/// Instruction asking for one prompt per keyword, in keyword order.
pub fn batch_prompt_instruction(keywords: &[String], style: PromptStyle) -> String {
    let (style_name, details) = match style {
        PromptStyle::Photography => (
            "photography",
            "Include specific technical or artistic photography details (lighting, composition, camera settings, etc.)",
        ),
        PromptStyle::Vector => (
            "vector art",
            "Include style, composition, or clean scalable design details suitable for vector illustration",
        ),
    };

    let numbered = keywords
        .iter()
        .enumerate()
        .map(|(i, k)| format!("{}. {}", i + 1, k))
        .collect::<Vec<_>>()
        .join(", ");

    render(
        BATCH,
        &[
            ("count", &keywords.len().to_string()),
            ("style", style_name),
            ("keywords", &keywords.join(", ")),
            ("numbered", &numbered),
            ("details", details),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_repeated_var() {
        assert_eq!(
            render("{{a}} and {{a}}", &[("a", "cats")]),
            "cats and cats"
        );
    }

    #[test]
    fn test_render_leaves_unknown_and_unclosed_placeholders() {
        assert_eq!(
            render("{{a}} {{b}} {{a", &[("a", "x")]),
            "x {{b}} {{a"
        );
    }

    #[test]
    fn test_render_does_not_expand_substituted_values() {
        assert_eq!(
            render("{{a}}-{{b}}", &[("a", "{{b}}"), ("b", "two")]),
            "{{b}}-two"
        );
    }

    #[test]
    fn test_keyword_instruction_keeps_placeholder_text_in_topic() {
        let text = keyword_instruction("{{count}} things", 7);
        assert!(text.contains("exactly 7 unique"));
        assert!(text.contains("\"{{count}} things\""));
        assert!(!text.contains("\"7 things\""));
    }

    #[test]
    fn test_batch_instruction_keeps_placeholder_text_in_keywords() {
        let keywords = vec!["{{details}}".to_string(), "{{numbered}}".to_string()];
        let text = batch_prompt_instruction(&keywords, PromptStyle::Photography);
        assert!(text.contains("{{details}}, {{numbered}}"));
        assert!(text.contains("1. {{details}}, 2. {{numbered}}"));
    }

    #[test]
    fn test_templates_have_placeholders() {
        assert!(KEYWORDS.contains("{{topic}}"));
        assert!(KEYWORDS.contains("{{count}}"));
        assert!(PHOTOGRAPHY.contains("{{keyword}}"));
        assert!(VECTOR.contains("{{keyword}}"));
        assert!(BATCH.contains("{{keywords}}"));
        assert!(!PROMPT_SYSTEM.is_empty());
    }

    #[test]
    fn test_keyword_instruction_fills_topic_and_count() {
        let text = keyword_instruction("  nature ", 12);
        assert!(text.contains("exactly 12 unique"));
        assert!(text.contains("\"nature\""));
        assert!(text.contains("1-3 words"));
        assert!(!text.contains("{{"));
    }

    #[test]
    fn test_prompt_instruction_branches_on_style() {
        let photo = prompt_instruction("owl", PromptStyle::Photography);
        assert!(photo.contains("\"owl\""));
        assert!(photo.contains("lighting"));
        assert!(photo.contains("camera settings"));

        let vector = prompt_instruction("owl", PromptStyle::Vector);
        assert!(vector.contains("\"owl\""));
        assert!(vector.contains("scalable"));
        assert!(!vector.contains("camera"));
    }

    #[test]
    fn test_batch_instruction_lists_keywords_in_order() {
        let keywords = vec!["owl".to_string(), "fox".to_string()];
        let text = batch_prompt_instruction(&keywords, PromptStyle::Vector);
        assert!(text.contains("exactly 2 unique, detailed vector art prompts"));
        assert!(text.contains("owl, fox"));
        assert!(text.contains("1. owl, 2. fox"));
        assert!(!text.contains("{{"));
    }
}
