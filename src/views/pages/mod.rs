//! Page containers composing the list and form views.

mod admin;
mod public;

pub use admin::*;
pub use public::*;
