//! Flat-file JSON artifacts.
//!
//! The pipeline writes its artifacts as plain JSON files in the data
//! directory; the explorer API reads the same files. There is no other
//! persistence layer.

use crate::config::Settings;
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Raw transcription response, saved verbatim on receipt.
pub const RAW_TRANSCRIPTION_FILE: &str = "transcription.json";
/// Normalized transcript.
pub const STRUCTURED_TRANSCRIPT_FILE: &str = "transcript_structured.json";
/// One embedding vector per paragraph, positionally aligned.
pub const EMBEDDINGS_FILE: &str = "embeddings.json";
/// Detailed table-of-contents summary.
pub const DETAILED_SUMMARY_FILE: &str = "detailed_summary.json";

/// Locations of the recording and all pipeline artifacts.
#[derive(Debug, Clone)]
pub struct DataPaths {
    data_dir: PathBuf,
    audio_file: String,
}

impl DataPaths {
    /// Derive paths from settings.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            data_dir: settings.data_dir(),
            audio_file: settings.general.audio_file.clone(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// The source recording.
    pub fn audio(&self) -> PathBuf {
        self.data_dir.join(&self.audio_file)
    }

    pub fn raw_transcription(&self) -> PathBuf {
        self.data_dir.join(RAW_TRANSCRIPTION_FILE)
    }

    pub fn structured_transcript(&self) -> PathBuf {
        self.data_dir.join(STRUCTURED_TRANSCRIPT_FILE)
    }

    pub fn embeddings(&self) -> PathBuf {
        self.data_dir.join(EMBEDDINGS_FILE)
    }

    pub fn detailed_summary(&self) -> PathBuf {
        self.data_dir.join(DETAILED_SUMMARY_FILE)
    }
}

/// Read and deserialize a JSON file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize a value to an indented JSON file, creating parent directories.
///
/// Used for the artifacts people open in an editor.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

/// Serialize a value to a compact JSON file, creating parent directories.
///
/// Used for the embeddings, where indentation would triple the file size.
pub fn write_json_compact<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string(value)?)?;
    Ok(())
}

/// Load the detailed summary as raw JSON, or an empty object when the file
/// has not been generated yet.
pub fn load_summary_or_empty(path: &Path) -> Result<serde_json::Value> {
    if !path.exists() {
        return Ok(serde_json::Value::Object(serde_json::Map::new()));
    }
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_in(dir: &Path) -> DataPaths {
        let mut settings = Settings::default();
        settings.general.data_dir = dir.to_string_lossy().to_string();
        DataPaths::from_settings(&settings)
    }

    #[test]
    fn test_paths_join_data_dir() {
        let paths = paths_in(Path::new("/srv/data"));
        assert_eq!(
            paths.raw_transcription(),
            PathBuf::from("/srv/data/transcription.json")
        );
        assert_eq!(
            paths.audio(),
            PathBuf::from("/srv/data/epstein_ehud_recording.mp4")
        );
    }

    #[test]
    fn test_json_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("vectors.json");

        let vectors: Vec<Vec<f32>> = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        write_json_compact(&path, &vectors).unwrap();

        let loaded: Vec<Vec<f32>> = read_json(&path).unwrap();
        assert_eq!(loaded, vectors);

        // Compact output has no indentation.
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains('\n'));
    }

    #[test]
    fn test_summary_defaults_to_empty_object() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("detailed_summary.json");

        let value = load_summary_or_empty(&missing).unwrap();
        assert_eq!(value, serde_json::json!({}));
    }
}
