//! Transcript export as plain text or JSON.

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local, NaiveDate};
use thiserror::Error;

use crate::domain::message::Message;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("there are no messages to export")]
    EmptyTranscript,
    #[error("failed to encode transcript: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to write export to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub fn render_transcript(messages: &[Message], format: ExportFormat) -> Result<String, ExportError> {
    match format {
        ExportFormat::Text => Ok(messages
            .iter()
            .map(transcript_line)
            .collect::<Vec<_>>()
            .join("\n")),
        ExportFormat::Json => serde_json::to_string_pretty(messages).map_err(ExportError::Encode),
    }
}

pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "chat-export-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Writes the transcript into `dir`, replacing an export from the same day.
pub fn export_to_dir(
    dir: &Path,
    messages: &[Message],
    format: ExportFormat,
    now: DateTime<Local>,
) -> Result<PathBuf, ExportError> {
    if messages.is_empty() {
        return Err(ExportError::EmptyTranscript);
    }

    let content = render_transcript(messages, format)?;
    let path = dir.join(export_file_name(format, now.date_naive()));

    fs::create_dir_all(dir).map_err(|source| ExportError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, content).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    tracing::info!(
        path = %path.display(),
        messages = messages.len(),
        format = format.extension(),
        "transcript exported"
    );
    Ok(path)
}

fn transcript_line(message: &Message) -> String {
    let local_time = message.created_at.with_timezone(&Local);
    format!(
        "[{}] {}: {}",
        local_time.format("%Y-%m-%d %H:%M:%S"),
        message.sender_label(),
        message.text
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn transcript() -> Vec<Message> {
        vec![Message::new("hi", false), Message::new("Hello there!", true)]
    }

    #[test]
    fn text_export_has_one_line_per_message() {
        let text = render_transcript(&transcript(), ExportFormat::Text).expect("text export");
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with('['));
        assert!(lines[0].ends_with("] You: hi"));
        assert!(lines[1].ends_with("] Bot: Hello there!"));
    }

    #[test]
    fn json_export_contains_full_messages() {
        let messages = transcript();
        let json = render_transcript(&messages, ExportFormat::Json).expect("json export");

        let parsed: Vec<Message> = serde_json::from_str(&json).expect("export must parse");
        assert_eq!(parsed, messages);
        assert!(json.contains("\"isFromBot\""));
    }

    #[test]
    fn file_name_includes_date_and_extension() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 9).expect("valid date");

        assert_eq!(
            export_file_name(ExportFormat::Text, date),
            "chat-export-2026-03-09.txt"
        );
        assert_eq!(
            export_file_name(ExportFormat::Json, date),
            "chat-export-2026-03-09.json"
        );
    }

    #[test]
    fn export_to_dir_writes_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let target = dir.path().join("exports");
        let now = Local
            .with_ymd_and_hms(2026, 1, 2, 10, 0, 0)
            .single()
            .expect("unambiguous local time");

        let path = export_to_dir(&target, &transcript(), ExportFormat::Text, now)
            .expect("export should succeed");

        assert_eq!(path, target.join("chat-export-2026-01-02.txt"));
        let content = fs::read_to_string(path).expect("export should be readable");
        assert!(content.contains("You: hi"));
    }

    #[test]
    fn empty_transcript_is_not_exported() {
        let dir = tempfile::tempdir().expect("temp dir should be created");

        let result = export_to_dir(dir.path(), &[], ExportFormat::Json, Local::now());

        assert!(matches!(result, Err(ExportError::EmptyTranscript)));
    }
}
