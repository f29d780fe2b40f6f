//! Interview entity model and DTOs.

use kiroku_core::error::CoreError;
use kiroku_core::interview::{
    derive_summary, deserialize_optional_date, validate_create_fields, validate_update_fields,
    MISSING_FIELDS_MESSAGE,
};
use kiroku_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An interview row from the `interviews` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Interview {
    pub id: DbId,
    pub interviewee_name: String,
    pub interview_date: Date,
    pub content: String,
    pub summary: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /interviews`.
///
/// Every field is optional at the wire level so a missing field becomes a
/// 400 from [`CreateInterview::into_fields`] rather than a deserializer error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateInterview {
    pub interviewee_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub interview_date: Option<Date>,
    pub content: Option<String>,
    /// Derived from `content` when omitted or empty.
    pub summary: Option<String>,
}

/// Request body for `PUT /interviews/{id}`. Replaces all four fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInterview {
    pub interviewee_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub interview_date: Option<Date>,
    pub content: Option<String>,
    /// Derived from the new `content` when omitted or empty.
    pub summary: Option<String>,
}

/// Validated column values bound by insert and update statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewFields {
    pub interviewee_name: String,
    pub interview_date: Date,
    pub content: String,
    pub summary: String,
}

impl CreateInterview {
    /// Check required fields and apply the summary default.
    pub fn into_fields(self) -> Result<InterviewFields, CoreError> {
        validate_create_fields(
            self.interviewee_name.as_deref(),
            self.interview_date,
            self.content.as_deref(),
        )?;
        InterviewFields::assemble(
            self.interviewee_name,
            self.interview_date,
            self.content,
            self.summary,
        )
    }
}

impl UpdateInterview {
    /// Check field presence and apply the summary default from the new content.
    pub fn into_fields(self) -> Result<InterviewFields, CoreError> {
        validate_update_fields(
            self.interviewee_name.as_deref(),
            self.interview_date,
            self.content.as_deref(),
        )?;
        InterviewFields::assemble(
            self.interviewee_name,
            self.interview_date,
            self.content,
            self.summary,
        )
    }
}

impl InterviewFields {
    fn assemble(
        interviewee_name: Option<String>,
        interview_date: Option<Date>,
        content: Option<String>,
        summary: Option<String>,
    ) -> Result<Self, CoreError> {
        let (Some(interviewee_name), Some(interview_date), Some(content)) =
            (interviewee_name, interview_date, content)
        else {
            return Err(CoreError::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        };
        let summary = derive_summary(summary.as_deref(), &content);
        Ok(Self {
            interviewee_name,
            interview_date,
            content,
            summary,
        })
    }
}
