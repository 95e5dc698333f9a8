use anyhow::Context;
use askama::Template;

use crate::config::MailSettings;

use super::{EmailAddress, SubmissionForm};

#[derive(Template)]
#[template(path = "emails/contact-notification.html")]
struct NotificationHtmlTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    site_owner: &'a str,
}

#[derive(Template)]
#[template(path = "emails/contact-notification.txt")]
struct NotificationTextTemplate<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    site_owner: &'a str,
}

/// The email delivered to the site owner for one submission.
#[derive(Debug)]
pub struct NotificationEmail {
    pub from: String,
    pub to: EmailAddress,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
    pub reply_to: String,
}

impl NotificationEmail {
    /// Expects a form that already passed [`SubmissionForm::validate`].
    pub fn compose(form: &SubmissionForm, mail: &MailSettings) -> Result<Self, anyhow::Error> {
        let html_body = NotificationHtmlTemplate {
            name: &form.name,
            email: &form.email,
            subject: &form.subject,
            message: &form.message,
            site_owner: &mail.site_owner,
        }
        .render()
        .context("failed to render HTML notification template.")?;

        let text_body = NotificationTextTemplate {
            name: &form.name,
            email: &form.email,
            subject: &form.subject,
            message: &form.message,
            site_owner: &mail.site_owner,
        }
        .render()
        .context("failed to render text notification template.")?;

        Ok(Self {
            from: mail.sender_mailbox(),
            to: mail.recipient.clone(),
            subject: format!("{} {}", mail.subject_tag, form.subject),
            html_body,
            text_body,
            reply_to: form.email.clone(),
        })
    }
}
