//! Prompt templates for Referat.
//!
//! Prompts can be customized by placing TOML files in the custom prompts
//! directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub qa: QaPrompts,
    pub summary: SummaryPrompts,
}


/// Prompts for question answering over the transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QaPrompts {
    pub system: String,
    pub user: String,
}

impl Default for QaPrompts {
    fn default() -> Self {
        Self {
            system: "You are an assistant that answers questions about an audio transcript \
                     of a conversation between Jeffrey Epstein and Ehud Barak. \
                     Use ONLY the provided transcript excerpts to answer. \
                     If the answer isn't in the excerpts, say so. \
                     Be concise and cite which speaker said what when relevant. \
                     Use their actual names (Epstein, Ehud) not speaker numbers."
                .to_string(),

            user: "Transcript excerpts:\n\n{{context}}\n\nQuestion: {{question}}".to_string(),
        }
    }
}

/// Prompts for detailed summary generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
    pub user: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert analyst creating a detailed table of contents and summary for an audio transcript of a conversation between Jeffrey Epstein and Ehud Barak.

Produce a JSON object with this exact structure:
{
  "headline": "A single compelling headline summarizing the entire conversation",
  "overview": "A 2-3 paragraph executive summary of the conversation, covering the key themes, context, and significance",
  "sections": [
    {
      "title": "Section title (e.g., 'Opening Remarks and Context Setting')",
      "timestamp_start": "approximate start time like '0:00'",
      "timestamp_end": "approximate end time like '12:30'",
      "summary": "2-4 sentence summary of this section",
      "key_points": ["bullet point 1", "bullet point 2", ...],
      "speakers_involved": ["Epstein", "Ehud"]
    }
  ],
  "key_figures_mentioned": [
    {"name": "Person Name", "context": "Brief description of how they're referenced"}
  ],
  "key_themes": ["theme 1", "theme 2", ...]
}

Break the conversation into 8-15 logical sections based on topic shifts. Be thorough and specific - include names, places, and concrete details from the conversation. Do not editorialize or add moral judgments."#
                .to_string(),

            user: "Here is the full transcript:\n\n{{transcript}}".to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from defaults, with optional overrides from a custom directory.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let qa_path = custom_path.join("qa.toml");
            if qa_path.exists() {
                let content = std::fs::read_to_string(&qa_path)?;
                prompts.qa = toml::from_str(&content)?;
            }

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }
}
