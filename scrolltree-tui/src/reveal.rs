//! Resolves outline actions against the loaded document.

use serde_json::Value;
use thiserror::Error;

use scrolltree::{ActionError, ActionHandler};

use crate::outline::OutlineAction;

#[derive(Debug, Error)]
pub enum RevealError {
    #[error("nothing at {0} any more")]
    Missing(String),
    #[error("cannot render {pointer}: {source}")]
    Render {
        pointer: String,
        source: serde_json::Error,
    },
}

/// Puts the value behind the activated node in the status line.
pub struct Revealer<'d> {
    document: &'d Value,
    status: String,
}

impl<'d> Revealer<'d> {
    pub fn new(document: &'d Value) -> Self {
        Self {
            document,
            status: String::from("arrows: move, enter: reveal, q: quit"),
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    fn reveal(&self, pointer: &str) -> Result<String, RevealError> {
        let shown = if pointer.is_empty() { "/" } else { pointer };
        let value = self
            .document
            .pointer(pointer)
            .ok_or_else(|| RevealError::Missing(shown.to_string()))?;
        let rendered = serde_json::to_string(value).map_err(|source| RevealError::Render {
            pointer: shown.to_string(),
            source,
        })?;
        Ok(format!("{shown} = {rendered}"))
    }
}

impl ActionHandler<OutlineAction> for Revealer<'_> {
    fn perform(&mut self, action: &OutlineAction) -> Result<(), ActionError> {
        match action {
            OutlineAction::Reveal { pointer } => {
                self.status = self.reveal(pointer)?;
                log::debug!("[reveal] {}", self.status);
                Ok(())
            }
        }
    }
}
