//! Acknowledgment service: blocking notices the user must dismiss.

use std::future::Future;
use std::pin::Pin;

/// A modal notice. Copy notices never offer a cancel button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgment {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub show_cancel: bool,
}

impl Acknowledgment {
    pub fn new(title: &str, message: &str) -> Self {
        Self {
            title: title.to_owned(),
            message: message.to_owned(),
            confirm_label: "OK".to_owned(),
            show_cancel: false,
        }
    }

    pub fn copied() -> Self {
        Self::new("Success", "API Key copied to clipboard!")
    }

    pub fn copy_failed() -> Self {
        Self::new("Error", "Failed to copy API Key. Please try again.")
    }
}

/// Shows an acknowledgment and resolves once the user dismisses it.
pub trait Acknowledger: Send + Sync {
    fn show(&self, ack: Acknowledgment) -> Pin<Box<dyn Future<Output = ()> + Send + '_>>;
}
