//! Session domain module.
//!
//! - `model`: the active `Session`, its `SummaryOptions` and `SessionStatus`
//! - known option values and translation languages

mod model;

pub use model::{
    ORIGINAL_LANGUAGE, STYLES, SUMMARY_TYPES, SUPPORTED_LANGUAGES, Session, SessionStatus,
    SummaryOptions, TONALITIES, is_translation,
};
