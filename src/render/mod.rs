//! Rendering module for producing sanitized, styled markup from a body.

mod html;
mod sanitize;
mod style;

pub use html::StyledRenderer;
pub use style::StyleConfig;
