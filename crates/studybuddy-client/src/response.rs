//! Chat API response payload and its interpretation.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::sanitize::display_text;
use crate::schedule::ScheduleView;
use crate::ChatError;

/// Date string (`YYYY-MM-DD`) to the study blocks planned for that day.
/// `BTreeMap` keeps days in lexicographic order.
pub type Schedule = BTreeMap<String, Vec<StudyBlock>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyBlock {
    #[serde(default, deserialize_with = "null_as_default")]
    pub topic: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleMetadata {
    pub exam_date: Option<String>,
    #[serde(deserialize_with = "whole_days")]
    pub days_until_exam: Option<i64>,
    pub status: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub tips: Vec<String>,
}

/// Raw payload of `GET /chat`. Either `error` or the success fields are
/// populated.
///
/// The extension fields decode leniently: a malformed schedule, metadata,
/// or question list is dropped with a warning and the reply text survives.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatResponse {
    pub error: Option<String>,
    pub agent_response: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub schedule: Option<Schedule>,
    #[serde(deserialize_with = "lenient")]
    pub metadata: Option<ScheduleMetadata>,
    #[serde(deserialize_with = "lenient")]
    pub questions: Option<Vec<String>>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `8` or `8.0`.
fn whole_days<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?
        .filter(|d| d.is_finite())
        .map(|d| d.round() as i64))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match serde_json::from_value(v) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!("ignoring malformed chat response field: {e}");
            None
        }
    }))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseStatus {
    ScheduleReady,
    ClarificationNeeded,
    Other(String),
}

impl From<&str> for ResponseStatus {
    fn from(s: &str) -> Self {
        match s {
            "schedule_ready" => ResponseStatus::ScheduleReady,
            "clarification_needed" => ResponseStatus::ClarificationNeeded,
            other => ResponseStatus::Other(other.to_string()),
        }
    }
}

/// What a successful turn adds beyond the reply text.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyExtension {
    Plain,
    Clarification(Vec<String>),
    Schedule(ScheduleView),
}

/// A successful turn, ready to record and render.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatReply {
    /// Reply exactly as the server sent it; this is what enters the transcript.
    pub text: String,
    /// Sanitized copy for display.
    pub display: String,
    pub extension: ReplyExtension,
}

impl ChatResponse {
    /// Server-reported error, ignoring empty strings.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn status_kind(&self) -> Option<ResponseStatus> {
        self.status.as_deref().map(ResponseStatus::from)
    }

    /// Interpret the payload as one of error, plain reply, clarification
    /// request, or schedule.
    pub fn into_reply(self) -> Result<ChatReply, ChatError> {
        if let Some(err) = self.error_message() {
            return Err(ChatError::Application(err.to_string()));
        }

        let status = self.status_kind();
        let text = self.agent_response.ok_or_else(|| {
            ChatError::Parse("response has neither 'error' nor 'agent_response'".into())
        })?;

        let extension = match (status, self.schedule, self.questions) {
            (Some(ResponseStatus::ScheduleReady), Some(schedule), _) => {
                ReplyExtension::Schedule(ScheduleView::new(&schedule, self.metadata))
            }
            (Some(ResponseStatus::ClarificationNeeded), _, Some(questions)) => {
                ReplyExtension::Clarification(questions)
            }
            _ => ReplyExtension::Plain,
        };

        Ok(ChatReply {
            display: display_text(&text),
            text,
            extension,
        })
    }
}
