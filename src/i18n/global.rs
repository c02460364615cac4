//! Optional process-wide translator
//!
//! Applications that cannot thread a [`Translator`] through their call
//! graph can install exactly one instance here. Creating it a second time
//! is an error, as is asking for it before it exists.

use once_cell::sync::OnceCell;
use super::translator::Translator;
use crate::utils::errors::{LexiconError, Result};

static INSTANCE: OnceCell<Translator> = OnceCell::new();

/// Install the process-wide translator.
pub fn create_instance(translator: Translator) -> Result<&'static Translator> {
    INSTANCE
        .set(translator)
        .map_err(|_| LexiconError::InstanceAlreadyCreated)?;
    instance()
}

/// The process-wide translator.
pub fn instance() -> Result<&'static Translator> {
    INSTANCE.get().ok_or(LexiconError::InstanceNotCreated)
}
