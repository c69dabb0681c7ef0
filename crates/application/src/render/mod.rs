//! Markup fragment builders. Pure functions from records to strings; the
//! services write the output into the view surface. Every user-supplied
//! field is escaped here, nowhere else.

pub mod alerts;
pub mod escape;
pub mod filedrop;
pub mod rules;

/// Class carried by every empty-state placeholder, asserted on by tests
/// and styled by the page.
pub const EMPTY_STATE_CLASS: &str = "empty-state";
