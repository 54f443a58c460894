//! Output options.

/// Record terminator for CSV output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    /// `\r\n`, as RFC 4180 prescribes
    #[default]
    CrLf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// The terminator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Options for CSV output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: char,

    /// Record terminator
    pub line_ending: LineEnding,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            line_ending: LineEnding::CrLf,
        }
    }
}

impl CsvOptions {
    /// Create new CSV options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field delimiter.
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the record terminator.
    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = CsvOptions::default();
        assert_eq!(opts.delimiter, ',');
        assert_eq!(opts.line_ending, LineEnding::CrLf);
        assert_eq!(opts.line_ending.as_str(), "\r\n");
    }

    #[test]
    fn test_builder_pattern() {
        let opts = CsvOptions::new()
            .with_delimiter(';')
            .with_line_ending(LineEnding::Lf);

        assert_eq!(opts.delimiter, ';');
        assert_eq!(opts.line_ending.as_str(), "\n");
    }
}
