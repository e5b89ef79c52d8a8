//! Bulk report mailing request validation.
//!
//! Only type metadata is checked; template bodies are never read.

use crate::error::ValidationError;
use crate::model::sequence_item::PayloadRef;
use crate::service::submission_draft::DeliveryChannels;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

const MEDIA_TYPE_TEXT: &str = "text/plain";
const MEDIA_TYPE_DOCX: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

static SHEET_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{44}$").expect("sheet id pattern must compile")
});

/// Returns whether `value` has the shape of a spreadsheet id.
pub fn is_valid_sheet_id(value: &str) -> bool {
    SHEET_ID_PATTERN.is_match(value)
}

/// Templates plus recipient sheet for one mailing run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportMailingRequest {
    pub templates: Vec<PayloadRef>,
    #[serde(rename = "sheet_id")]
    pub recipient_sheet_id: String,
    #[serde(flatten)]
    pub channels: DeliveryChannels,
}

impl ReportMailingRequest {
    pub fn new(
        templates: Vec<PayloadRef>,
        recipient_sheet_id: impl Into<String>,
        channels: DeliveryChannels,
    ) -> Self {
        Self {
            templates,
            recipient_sheet_id: recipient_sheet_id.into().trim().to_string(),
            channels,
        }
    }

    /// Checks templates, sheet id and channels in that order.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.templates.is_empty() {
            return Err(ValidationError::NoTemplates);
        }
        for template in &self.templates {
            if !is_supported_template(template) {
                let name = template.file_name().unwrap_or("inline text");
                return Err(ValidationError::UnsupportedTemplateType(name.to_string()));
            }
        }
        if !is_valid_sheet_id(&self.recipient_sheet_id) {
            return Err(ValidationError::InvalidSheetId(
                self.recipient_sheet_id.clone(),
            ));
        }
        if !self.channels.any() {
            return Err(ValidationError::NoDeliveryChannel);
        }
        Ok(())
    }
}

fn is_supported_template(template: &PayloadRef) -> bool {
    let PayloadRef::File { name, media_type } = template else {
        return false;
    };
    let media_type = media_type.trim().to_ascii_lowercase();
    if media_type == MEDIA_TYPE_TEXT || media_type == MEDIA_TYPE_DOCX {
        return true;
    }
    let name = name.to_ascii_lowercase();
    media_type.is_empty() && (name.ends_with(".txt") || name.ends_with(".docx"))
}
