//! Error types for content, the contact form, configuration, links and
//! decorative scenes.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::contact::ContactField;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse content file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Two entries of the same list share an identifier.
    #[error("Duplicate {list} identifier '{id}'")]
    DuplicateId { list: &'static str, id: String },

    /// A navigation entry points at an anchor no section answers to.
    #[error("Navigation entry '{name}' targets unknown anchor '{href}'")]
    UnknownAnchor { name: String, href: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("Please fill out the {0} field")]
    MissingField(ContactField),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        ConfigError::Figment(Box::new(error))
    }
}

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("No handler could open '{uri}': {source}")]
    Open {
        uri: String,
        #[source]
        source: std::io::Error,
    },
}

/// A decorative 3D element could not be brought up.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Graphics support is unavailable")]
    GraphicsUnavailable,

    #[error("Failed to initialize {name}: {reason}")]
    Init { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Contact(#[from] ContactError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
