//! Prompt shaping shared by the HTTP handlers and the CLI.
//!
//! Image providers receive at most [`MAX_PROMPT_CHARS`] characters; the text
//! route wraps the caller's prompt in a fixed analysis template instead.

/// Maximum prompt length forwarded to the image providers.
pub const MAX_PROMPT_CHARS: usize = 1024;

/// Temperature used for every analysis completion.
pub const ANALYSIS_TEMPERATURE: f32 = 0.7;

/// Truncate `prompt` to the first [`MAX_PROMPT_CHARS`] characters.
///
/// Counts characters, not bytes, so multi-byte input is never split in the
/// middle of a scalar value.
pub fn truncate_prompt(prompt: &str) -> &str {
    match prompt.char_indices().nth(MAX_PROMPT_CHARS) {
        Some((idx, _)) => &prompt[..idx],
        None => prompt,
    }
}

/// Wrap a machine description in the fixed intuitive-interface analysis ask.
pub fn machine_analysis(prompt: &str) -> String {
    format!(
        "Based on the {prompt}. List factors on how the chosen machine's interface can be made \
         more intuitive to human behaviour in accordance to the suggested feature such as \
         sustainability, adaptability, emotional intelligence etc.."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_prompts_pass_through_unmodified() {
        let prompt = "a coffee machine with one button";
        assert_eq!(truncate_prompt(prompt), prompt);

        let exactly_limit = "x".repeat(MAX_PROMPT_CHARS);
        assert_eq!(truncate_prompt(&exactly_limit), exactly_limit);
    }

    #[test]
    fn long_prompts_keep_exactly_the_first_1024_chars() {
        let long = "y".repeat(MAX_PROMPT_CHARS * 3);
        let cut = truncate_prompt(&long);
        assert_eq!(cut.chars().count(), MAX_PROMPT_CHARS);
        assert_eq!(cut, &long[..MAX_PROMPT_CHARS]);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; byte-indexed slicing at 1024 would panic here.
        let long = "é".repeat(MAX_PROMPT_CHARS + 10);
        let cut = truncate_prompt(&long);
        assert_eq!(cut.chars().count(), MAX_PROMPT_CHARS);
        assert!(cut.chars().all(|c| c == 'é'));
    }

    #[test]
    fn analysis_template_embeds_the_prompt() {
        let wrapped = machine_analysis("vending machine");
        assert!(wrapped.starts_with("Based on the vending machine."));
        assert!(wrapped.contains("more intuitive to human behaviour"));
    }
}
