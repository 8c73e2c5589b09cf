//! CV document parsing module.

mod classify;
mod cv_parser;
pub(crate) mod frontmatter;
mod inline;
mod options;
mod segmenter;

pub use cv_parser::CvParser;
pub use options::ParseOptions;
