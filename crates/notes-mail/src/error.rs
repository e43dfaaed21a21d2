use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Delivery failed: {message} {location}")]
    Delivery {
        message: String,
        location: ErrorLocation,
    },

    #[error("Mail transport error: {source} {location}")]
    Transport {
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl From<reqwest::Error> for MailError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Transport {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, MailError>;
