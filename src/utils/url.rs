//! Endpoint URL assembly.
//!
//! Users paste resource URLs with or without a trailing slash; both must
//! produce the same request URL.

/// Strip every trailing slash from a resource URL.
///
/// ```
/// use mahoraga::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://res.openai.azure.com/"), "https://res.openai.azure.com");
/// assert_eq!(normalize_base_url("https://res.openai.azure.com"), "https://res.openai.azure.com");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a resource URL and a relative endpoint path with exactly one slash.
///
/// ```
/// use mahoraga::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://res.openai.azure.com/", "/openai/deployments"),
///     "https://res.openai.azure.com/openai/deployments"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let normalized_base = normalize_base_url(base_url);
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalized_base, endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slashes_and_whitespace() {
        assert_eq!(
            normalize_base_url("https://res.openai.azure.com///"),
            "https://res.openai.azure.com"
        );
        assert_eq!(
            normalize_base_url("  https://res.openai.azure.com/ "),
            "https://res.openai.azure.com"
        );
        assert_eq!(normalize_base_url(""), "");
    }

    #[test]
    fn deployment_endpoint_is_joined_once() {
        let expected = "https://res.openai.azure.com/openai/deployments/gpt4/chat/completions?api-version=2024-02-15-preview";
        for base in ["https://res.openai.azure.com", "https://res.openai.azure.com/"] {
            assert_eq!(
                construct_api_url(
                    base,
                    "openai/deployments/gpt4/chat/completions?api-version=2024-02-15-preview"
                ),
                expected
            );
        }
        assert_eq!(
            construct_api_url(
                "https://res.openai.azure.com",
                "//openai/deployments/gpt4/chat/completions?api-version=2024-02-15-preview"
            ),
            expected
        );
    }
}
