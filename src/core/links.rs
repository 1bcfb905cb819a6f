//! Outbound links: mail and call deep links, external pages, downloads and
//! in-page anchors.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::LinkError;
use crate::models::Anchor;

/// A `mailto:` deep link.
///
/// Subject and body are stored already encoded for the URI; the body may mix
/// literal text with percent-encoded segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailtoLink {
    recipient: String,
    subject: Option<String>,
    body: Option<String>,
}

impl MailtoLink {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            subject: None,
            body: None,
        }
    }

    /// Set the subject from plain text; it is percent-encoded.
    pub fn with_subject(mut self, subject: &str) -> Self {
        self.subject = Some(urlencoding::encode(subject).into_owned());
        self
    }

    /// Set a body that is already in URI form.
    pub fn with_encoded_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    /// The decoded subject.
    pub fn subject(&self) -> Option<String> {
        self.subject.as_deref().map(decode)
    }

    /// The body exactly as it appears in the URI.
    pub fn encoded_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// The decoded body.
    pub fn body(&self) -> Option<String> {
        self.body.as_deref().map(decode)
    }

    pub fn to_uri(&self) -> String {
        let mut uri = format!("mailto:{}", self.recipient);
        let mut sep = '?';
        if let Some(subject) = &self.subject {
            uri.push(sep);
            uri.push_str("subject=");
            uri.push_str(subject);
            sep = '&';
        }
        if let Some(body) = &self.body {
            uri.push(sep);
            uri.push_str("body=");
            uri.push_str(body);
        }
        uri
    }
}

fn decode(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    Mail(MailtoLink),
    /// Telephone number as displayed; spaces are stripped in the URI.
    Call(String),
    /// External page, opened in a new browsing context.
    External(String),
    /// Static downloadable document.
    Download(String),
    Anchor(Anchor),
}

impl DeepLink {
    pub fn to_uri(&self) -> String {
        match self {
            DeepLink::Mail(mail) => mail.to_uri(),
            DeepLink::Call(phone) => {
                let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
                format!("tel:{digits}")
            }
            DeepLink::External(url) | DeepLink::Download(url) => url.clone(),
            DeepLink::Anchor(anchor) => anchor.to_string(),
        }
    }

    /// Whether following the link leaves the page for another application.
    pub fn leaves_page(&self) -> bool {
        !matches!(self, DeepLink::Anchor(_))
    }
}

impl fmt::Display for DeepLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_uri())
    }
}

/// Hands a link off to whatever the environment has registered for it.
pub trait LinkOpener: Send + Sync {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError>;
}

/// Opens links with the operating system's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl LinkOpener for SystemOpener {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError> {
        let uri = link.to_uri();
        tracing::info!(%uri, "opening link");
        open::that(&uri).map_err(|source| LinkError::Open { uri, source })
    }
}

/// Records links instead of opening them.
#[derive(Debug, Default, Clone)]
pub struct RecordingOpener {
    opened: Arc<Mutex<Vec<DeepLink>>>,
}

impl RecordingOpener {
    pub fn opened(&self) -> Vec<DeepLink> {
        self.opened
            .lock()
            .map(|links| links.clone())
            .unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, link: &DeepLink) -> Result<(), LinkError> {
        if let Ok(mut links) = self.opened.lock() {
            links.push(link.clone());
        }
        Ok(())
    }
}

/// Follow a link; a missing handler is logged and otherwise ignored.
pub fn follow(opener: &dyn LinkOpener, link: &DeepLink) {
    if let Err(error) = opener.open(link) {
        tracing::warn!(%error, "link was not handled");
    }
}
