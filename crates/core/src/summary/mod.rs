//! Narrative summary paragraphs.
//!
//! Sections form a closed, ordered set; each is rendered by a pure function
//! of the analysis results. Numbers are plain rounded decimals.

pub mod generators;
pub mod types;

pub use generators::{Generator, generate, generator};
pub use types::{
    SummaryContext, SummaryParagraph, SummarySection, SummaryToggles, UnknownSection,
};
