//! Tokenizing helpers shared by the scene and material parsers.

use thiserror::Error;
use tracer_math::Vec3;

/// Errors that can occur while parsing a text file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Invalid number \"{token}\" at line {line}")]
    InvalidNumber { line: usize, token: String },

    #[error("Unknown directive \"{directive}\" at line {line}")]
    UnknownDirective { line: usize, directive: String },

    #[error("Unsupported illumination model {illum} at line {line}")]
    UnsupportedIllum { line: usize, illum: i64 },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Cursor over the whitespace-separated tokens of one line.
pub struct LineParser<'a> {
    line: usize,
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> LineParser<'a> {
    pub fn new(line: usize, text: &'a str) -> Self {
        Self {
            line,
            tokens: text.split_whitespace(),
        }
    }

    /// 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Build a parse error located at this line.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::Parse {
            line: self.line,
            message: message.into(),
        }
    }

    /// Next raw token, if any.
    pub fn next_token(&mut self) -> Option<&'a str> {
        self.tokens.next()
    }

    /// Next token, required.
    pub fn word(&mut self, what: &str) -> ParseResult<&'a str> {
        self.tokens
            .next()
            .ok_or_else(|| self.error(format!("missing {what}")))
    }

    pub fn float(&mut self, what: &str) -> ParseResult<f32> {
        let token = self.word(what)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    pub fn int(&mut self, what: &str) -> ParseResult<i64> {
        let token = self.word(what)?;
        token.parse().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            token: token.to_string(),
        })
    }

    pub fn vec3(&mut self, what: &str) -> ParseResult<Vec3> {
        Ok(Vec3::new(
            self.float(what)?,
            self.float(what)?,
            self.float(what)?,
        ))
    }
}

/// Iterate over the meaningful lines of `content`.
///
/// Yields the directive (first token) and a parser positioned after it.
/// Blank lines and lines whose first token starts with `#` are skipped.
pub fn directives(content: &str) -> impl Iterator<Item = (&str, LineParser<'_>)> {
    content.lines().enumerate().filter_map(|(i, text)| {
        let mut parser = LineParser::new(i + 1, text);
        match parser.next_token() {
            Some(directive) if !directive.starts_with('#') => Some((directive, parser)),
            _ => None,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_skip_blank_and_comments() {
        let content = "\n# header\neye 0 0 0\n   \n#comment\nd 1.5\n";
        let found: Vec<_> = directives(content)
            .map(|(directive, parser)| (directive, parser.line()))
            .collect();

        assert_eq!(found, vec![("eye", 3), ("d", 6)]);
    }

    #[test]
    fn test_line_parser_numbers() {
        let mut parser = LineParser::new(7, "1.5 -2 3e-1 42");
        assert_eq!(parser.vec3("position").unwrap(), Vec3::new(1.5, -2.0, 0.3));
        assert_eq!(parser.int("count").unwrap(), 42);
        assert_eq!(
            parser.float("extra").unwrap_err(),
            ParseError::Parse {
                line: 7,
                message: "missing extra".to_string()
            }
        );
    }

    #[test]
    fn test_line_parser_invalid_number() {
        let mut parser = LineParser::new(2, "abc");
        assert_eq!(
            parser.float("radius").unwrap_err(),
            ParseError::InvalidNumber {
                line: 2,
                token: "abc".to_string()
            }
        );
    }
}
