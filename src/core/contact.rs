//! Contact form. Submitting builds a mail deep link; nothing is sent.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::links::MailtoLink;
use crate::error::ContactError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Company,
    Subject,
    Message,
}

impl ContactField {
    /// Form order.
    pub const ALL: [ContactField; 5] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Company,
        ContactField::Subject,
        ContactField::Message,
    ];

    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Company)
    }

    /// Short machine name, as used in form ids.
    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Company => "company",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Full Name",
            ContactField::Email => "Email Address",
            ContactField::Company => "Company/Organization",
            ContactField::Subject => "Subject",
            ContactField::Message => "Message",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            ContactField::Name => "Your full name",
            ContactField::Email => "your.email@company.com",
            ContactField::Company => "Your company or organization",
            ContactField::Subject => "Brief subject line",
            ContactField::Message => "Tell me about your project, opportunity, or question...",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub company: String,
    pub subject: String,
    pub message: String,
}

impl ContactForm {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Company => &self.company,
            ContactField::Subject => &self.subject,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: impl Into<String>) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Company => &mut self.company,
            ContactField::Subject => &mut self.subject,
            ContactField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// First required field left blank, in form order.
    pub fn first_missing(&self) -> Option<ContactField> {
        ContactField::ALL
            .into_iter()
            .find(|&field| field.is_required() && self.get(field).trim().is_empty())
    }

    /// Build the mail deep link addressed to `recipient`.
    ///
    /// Fields are left untouched so the user can submit again.
    pub fn submit(&self, recipient: &str) -> Result<MailtoLink, ContactError> {
        if let Some(field) = self.first_missing() {
            tracing::debug!(%field, "contact form blocked by required field");
            return Err(ContactError::MissingField(field));
        }
        Ok(MailtoLink::new(recipient)
            .with_subject(&self.subject)
            .with_encoded_body(self.encoded_body()))
    }

    fn encoded_body(&self) -> String {
        format!(
            "Name: {}%0D%0ACompany: {}%0D%0A%0D%0AMessage:%0D%0A{}",
            urlencoding::encode(&self.name),
            urlencoding::encode(&self.company),
            urlencoding::encode(&self.message),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        let mut form = ContactForm::default();
        form.set(ContactField::Name, "Ada");
        form.set(ContactField::Email, "ada@example.com");
        form.set(ContactField::Company, "Acme");
        form.set(ContactField::Subject, "Hi");
        form.set(ContactField::Message, "Hello");
        form
    }

    #[test]
    fn fields_update_independently() {
        let mut form = ContactForm::default();
        form.set(ContactField::Subject, "Hi");
        assert_eq!(form.subject, "Hi");
        assert!(form.name.is_empty());
        assert!(form.message.is_empty());
    }

    #[test]
    fn body_lists_name_company_then_message() {
        let link = filled().submit("me@example.com").unwrap();
        assert_eq!(link.subject().as_deref(), Some("Hi"));
        assert_eq!(
            link.encoded_body(),
            Some("Name: Ada%0D%0ACompany: Acme%0D%0A%0D%0AMessage:%0D%0AHello")
        );
        assert_eq!(
            link.to_uri(),
            "mailto:me@example.com?subject=Hi&body=Name: Ada%0D%0ACompany: Acme%0D%0A%0D%0AMessage:%0D%0AHello"
        );
    }

    #[test]
    fn message_is_percent_encoded() {
        let mut form = filled();
        form.set(ContactField::Message, "Tea & cake?\nSure");
        let link = form.submit("me@example.com").unwrap();
        let body = link.encoded_body().unwrap();
        assert!(body.ends_with("Message:%0D%0ATea%20%26%20cake%3F%0ASure"));
        assert_eq!(
            link.body().as_deref(),
            Some("Name: Ada\r\nCompany: Acme\r\n\r\nMessage:\r\nTea & cake?\nSure")
        );
    }

    #[test]
    fn company_is_optional() {
        let mut form = filled();
        form.set(ContactField::Company, "");
        assert!(form.submit("me@example.com").is_ok());
    }

    #[test]
    fn blank_required_field_blocks_submit() {
        let mut form = filled();
        form.set(ContactField::Email, "   ");
        assert_eq!(
            form.submit("me@example.com"),
            Err(ContactError::MissingField(ContactField::Email))
        );
    }
}
