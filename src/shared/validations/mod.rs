//! Request input validation
//!
//! `input` reads typed values out of a JSON object body and produces the
//! client-facing message for each failure; `rules` holds the character-class
//! and format predicates those readers (and the services) share.

pub mod input;
pub mod rules;

pub use input::*;
pub use rules::*;
