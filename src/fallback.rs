use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

use crate::error::{ProcessorError, Result};

const DEFAULT_TOPIC: &str = "default";

/// Links offered when a generated answer sounds unsure.
///
/// `fallback_links` keeps file order: the first matching topic wins.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct FallbackConfig {
    #[serde(default)]
    pub uncertainty_keywords: Vec<String>,
    #[serde(default)]
    pub fallback_links: Map<String, Value>,
}

impl FallbackConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ProcessorError::Config(format!(
                "Failed to read fallback config '{}': {}",
                path.display(),
                e
            ))
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Pick a link for `question` when `answer` contains an uncertainty keyword.
    pub fn fallback_link(&self, question: &str, answer: &str) -> Option<&str> {
        let answer_lower = answer.to_lowercase();
        let uncertain = self
            .uncertainty_keywords
            .iter()
            .any(|k| answer_lower.contains(&k.to_lowercase()));
        if !uncertain {
            return None;
        }

        let question_lower = question.to_lowercase();
        self.fallback_links
            .iter()
            .find(|(topic, _)| topic.as_str() != DEFAULT_TOPIC && question_lower.contains(topic.as_str()))
            .map(|(_, link)| link)
            .or_else(|| self.fallback_links.get(DEFAULT_TOPIC))
            .and_then(Value::as_str)
    }
}

/// Append the "more information" pointer to an answer.
pub fn with_fallback(answer: &str, link: &str) -> String {
    format!("{}\n\nFor more information, please visit: {}", answer, link)
}
