use thiserror::Error;

/// Errors from the language model collaborator.
#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to send chat completion request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Chat completion request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse chat completion response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Chat completion response contained no choices")]
    EmptyResponse,
}

/// Errors from the weather provider collaborator.
///
/// "City not found" is deliberately not an error: providers report it as
/// `Ok(None)` so the agent can phrase a normal clarification reply.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to send weather request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Weather request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Cap an upstream error body before embedding it in an error message.
///
/// Bodies are arbitrary text (localized provider errors, model output), so the
/// cut must land on a char boundary.
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;

    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_passes_through() {
        assert_eq!(truncate_body("not found"), "not found");
    }

    #[test]
    fn long_body_is_capped_with_ellipsis() {
        let body = "x".repeat(300);
        let capped = truncate_body(&body);

        assert_eq!(capped.len(), 203);
        assert!(capped.ends_with("..."));
    }

    #[test]
    fn multibyte_body_is_cut_on_a_char_boundary() {
        // 'é' is two bytes; with a leading ASCII byte the 200-byte mark lands
        // inside a character.
        let body = format!("a{}", "é".repeat(101));
        let capped = truncate_body(&body);

        assert!(capped.ends_with("..."));
        assert_eq!(capped.trim_end_matches("...").chars().count(), 100);
    }
}
