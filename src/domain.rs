mod email_address;
mod notification_email;
mod submission_form;

pub use email_address::EmailAddress;
pub use notification_email::NotificationEmail;
pub use submission_form::{FormField, MissingField, SubmissionForm};
