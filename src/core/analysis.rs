//! Structured prompt assessment returned by a provider.

use serde::Serialize;
use serde_json::Value;

use crate::core::providers::AnalysisError;

/// Scoring rubric sent as the system turn of every analysis request.
pub const RUBRIC_PROMPT: &str = r#"You are a prompt analysis expert. Your task is to evaluate prompts that will be given to AI agents and provide structured feedback.

Analyze the user's prompt and respond with a JSON object containing:
1. "score": A number between 0 and 1 indicating how well an AI agent would understand and execute the prompt (1 = perfect clarity)
2. "improvements": An array of specific suggestions to make the prompt clearer or more effective
3. "unclearParts": An array of phrases or sections that are ambiguous or vague

Consider these factors when scoring:
- Clarity of instructions
- Specificity of requirements
- Defined output format
- Edge case handling
- Context provided

Respond ONLY with valid JSON, no markdown or additional text.

Example response:
{
  "score": 0.72,
  "improvements": ["Specify the expected output format", "Define what 'handle errors appropriately' means"],
  "unclearParts": ["'as needed' is vague", "'good performance' lacks metrics"]
}"#;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Clarity score in `[0, 1]`.
    pub score: f64,
    pub improvements: Vec<String>,
    pub unclear_parts: Vec<String>,
}

impl AnalysisResult {
    /// Score as a whole percentage, for display.
    pub fn percent(&self) -> u8 {
        (self.score.clamp(0.0, 1.0) * 100.0).round() as u8
    }
}

/// Parses the assistant's text content into an [`AnalysisResult`].
///
/// `score` is mandatory and must lie in `[0, 1]`. Missing or non-array
/// `improvements` / `unclearParts` become empty lists; non-string entries
/// inside them are dropped.
pub fn parse_analysis_payload(content: &str) -> Result<AnalysisResult, AnalysisError> {
    let value: Value = serde_json::from_str(content.trim())
        .map_err(|source| AnalysisError::MalformedPayload { source })?;

    let Value::Object(fields) = value else {
        return Err(AnalysisError::InvalidScore { score: None });
    };

    let score = match fields.get("score").and_then(Value::as_f64) {
        Some(score) if (0.0..=1.0).contains(&score) => score,
        other => return Err(AnalysisError::InvalidScore { score: other }),
    };

    Ok(AnalysisResult {
        score,
        improvements: string_list(fields.get("improvements")),
        unclear_parts: string_list(fields.get("unclearParts")),
    })
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}
