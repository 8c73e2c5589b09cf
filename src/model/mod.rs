//! Document model types for parsed CV content.
//!
//! This module defines the normalized representation produced by parsing:
//! identity metadata plus an ordered list of typed sections. The model is
//! source-agnostic and serializes to the shape downstream renderers and
//! services consume.

mod document;
mod section;

pub use document::{Metadata, ParsedDocument};
pub use section::{Entry, Section, SectionBlock, SectionKind, SkillGroup};
