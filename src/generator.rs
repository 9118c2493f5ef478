//! Keyword and prompt generation pipelines.
//!
//! Each pipeline builds the instruction, calls one [`CompletionService`] and
//! parses the completion into the final list. Nothing here knows which
//! provider is behind the service.

use crate::ai::{CompletionRequest, CompletionService, Task};
use crate::models::{KeywordRequest, PromptRequest};
use crate::{parser, prompts, Result};
use std::time::Duration;
use tracing::{debug, info};

/// Generates up to `request.count` keywords with a single completion call.
///
/// The result may be shorter than requested when the model under-delivers.
pub async fn generate_keywords(
    service: &dyn CompletionService,
    request: &KeywordRequest,
) -> Result<Vec<String>> {
    request.validate()?;

    let instruction = prompts::keyword_instruction(&request.input, request.count);
    let raw = service
        .complete(&CompletionRequest::new(Task::Keywords, instruction))
        .await?;

    let keywords = parser::parse_lines(&raw, request.count as usize);
    info!(
        "Generated {} of {} requested keywords for '{}'",
        keywords.len(),
        request.count,
        request.input.trim()
    );
    Ok(keywords)
}

/// Generates one prompt per selected keyword, one completion call each.
///
/// Calls run strictly in keyword order with `pacing` between consecutive
/// calls. A keyword whose completion has no usable sentence gets its
/// fallback prompt, so the result always has one entry per selected keyword.
pub async fn generate_prompts(
    service: &dyn CompletionService,
    request: &PromptRequest,
    pacing: Duration,
) -> Result<Vec<String>> {
    request.validate()?;

    let keywords = request.selected_keywords();
    let mut generated = Vec::with_capacity(keywords.len());

    for (i, keyword) in keywords.iter().enumerate() {
        if i > 0 && !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }

        debug!("Generating prompt {}/{} for '{}'", i + 1, keywords.len(), keyword);
        let instruction = prompts::prompt_instruction(keyword, request.style);
        let raw = service
            .complete(
                &CompletionRequest::new(Task::Prompt, instruction)
                    .with_system(prompts::PROMPT_SYSTEM.trim()),
            )
            .await?;

        generated.extend(parser::pad_with_fallbacks(
            parser::parse_prompt_lines(&raw, 1),
            std::slice::from_ref(keyword),
            request.style,
        ));
    }

    info!(
        "Generated {} {} prompts",
        generated.len(),
        request.style.as_str()
    );
    Ok(generated)
}

/// Generates all prompts with one combined completion call.
///
/// Relies on the model keeping keyword order; slots it leaves empty are
/// filled with fallbacks.
pub async fn generate_prompts_batch(
    service: &dyn CompletionService,
    request: &PromptRequest,
) -> Result<Vec<String>> {
    request.validate()?;

    let keywords = request.selected_keywords();
    let instruction = prompts::batch_prompt_instruction(keywords, request.style);
    let raw = service
        .complete(
            &CompletionRequest::new(Task::BatchPrompts, instruction)
                .with_system(prompts::PROMPT_SYSTEM.trim()),
        )
        .await?;

    Ok(parser::pad_with_fallbacks(
        parser::parse_prompt_lines(&raw, keywords.len()),
        keywords,
        request.style,
    ))
}
