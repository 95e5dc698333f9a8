use serde::{Deserialize, Deserializer, Serialize};

/// The four fields of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Subject,
    Message,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Name,
        FormField::Email,
        FormField::Subject,
        FormField::Message,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Subject => "subject",
            FormField::Message => "message",
        }
    }
}

/// One or more required fields were absent or empty.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("all fields required")]
pub struct MissingField(pub Vec<FormField>);

/// A contact message as typed by the visitor.
///
/// Absent and `null` fields deserialize to the empty string so that they
/// surface as [`MissingField`] rather than as a malformed payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub subject: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub message: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl SubmissionForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Subject => &self.subject,
            FormField::Message => &self.message,
        }
    }

    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Subject => &mut self.subject,
            FormField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|f| self.field(*f).is_empty())
    }

    /// Every field must be non-empty. Content is not otherwise inspected.
    pub fn validate(&self) -> Result<(), MissingField> {
        let missing: Vec<FormField> = FormField::ALL
            .into_iter()
            .filter(|f| self.field(*f).is_empty())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingField(missing))
        }
    }

    /// `mailto:` link that hands the message to the visitor's own mail client.
    pub fn mailto_link(&self, recipient: &str) -> String {
        let body = format!("From: {} ({})\n\n{}", self.name, self.email, self.message);
        format!(
            "mailto:{}?subject={}&body={}",
            recipient,
            urlencoding::encode(&self.subject),
            urlencoding::encode(&body),
        )
    }
}
