//! CMS content mapping: tolerant decoding, text helpers, view-models and
//! the per-section mappers.

pub mod mappers;
pub mod model;
pub mod probe;
pub mod text;

pub use model::*;
pub use text::{format_date, split_title_into_headline, strip_markup};
