//! Parsing options and configuration.

/// Options for parsing CV documents.
///
/// Both flags only apply when a frontmatter block is present; the body
/// fallback path never enforces fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Validate the format of frontmatter fields that are present
    pub strict_frontmatter: bool,

    /// Require non-empty `name` and `email` in the frontmatter
    pub validate_required: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults (both checks off).
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable format validation of present frontmatter fields.
    pub fn strict_frontmatter(mut self) -> Self {
        self.strict_frontmatter = true;
        self
    }

    /// Require non-empty `name` and `email` when a frontmatter block exists.
    pub fn validate_required(mut self) -> Self {
        self.validate_required = true;
        self
    }

    /// Enable both frontmatter checks.
    pub fn strict(mut self) -> Self {
        self.strict_frontmatter = true;
        self.validate_required = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().strict_frontmatter();
        assert!(options.strict_frontmatter);
        assert!(!options.validate_required);

        let options = ParseOptions::new().strict();
        assert!(options.strict_frontmatter);
        assert!(options.validate_required);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert!(!options.strict_frontmatter);
        assert!(!options.validate_required);
    }
}
