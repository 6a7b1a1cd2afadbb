//! URL modeling and filename derivation.
//!
//! Extracts the content reference from a Viki page URL and derives the local
//! base filename for each downloadable title.

mod content_ref;
mod filename;
mod sanitize;

pub use content_ref::{ContentKind, ContentRef};
pub use filename::{base_filename, subtitle_filename};
pub use sanitize::{sanitize_title, truncate_to_bytes, NAME_MAX};
