//! LaTeX token classifier.
//!
//! Lexing and domain filtering are kept apart: [`Lexer`] turns a latex body
//! into a flat stream of [`Token`]s without knowing anything about
//! variables, and [`classify`] decides which tokens name a variable.

use super::commands::{IgnoreList, takes_text_argument};

/// Subscript attached to a bare letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subscript<'a> {
    /// `x_1`
    Single(char),
    /// `x_{max}`, content without the braces
    Braced(&'a str),
}

/// Token types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Backslash command, name without the backslash
    Command(&'a str),
    /// ASCII letter with an optional subscript
    Letter {
        symbol: char,
        subscript: Option<Subscript<'a>>,
    },
    /// Anything else: digits, operators, braces, escaped symbols
    Other(char),
}

/// Lexer over a single latex body.
///
/// The lexer is infallible: malformed input degrades into `Other` tokens.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Source input
    input: &'a str,
    /// Current position in bytes
    pos: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer.
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// Tokenize the entire input.
    pub fn tokenize(self) -> Vec<Token<'a>> {
        self.collect()
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    #[inline]
    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn advance(&mut self, ch: char) {
        self.pos += ch.len_utf8();
    }

    /// Parse a command after the backslash has been consumed.
    fn parse_command(&mut self) -> Token<'a> {
        let start = self.pos;
        while self.peek_byte_at(0).is_some_and(|b| b.is_ascii_alphabetic()) {
            self.pos += 1;
        }

        if start == self.pos {
            // Control symbol such as `\,` or `\{`
            return match self.peek() {
                Some(ch) => {
                    self.advance(ch);
                    Token::Other(ch)
                },
                None => Token::Other('\\'),
            };
        }

        let name = &self.input[start..self.pos];
        if takes_text_argument(name) {
            self.skip_text_argument();
        }
        Token::Command(name)
    }

    /// Skip a braced argument, honouring nested braces.
    fn skip_text_argument(&mut self) {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        if !trimmed.starts_with('{') {
            return;
        }
        let open = self.pos + (rest.len() - trimmed.len());

        let mut depth = 0usize;
        for (offset, byte) in self.input.as_bytes()[open..].iter().enumerate() {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        self.pos = open + offset + 1;
                        return;
                    }
                },
                _ => {},
            }
        }
        // Unclosed argument runs to the end of the body
        self.pos = self.input.len();
    }

    /// Parse an optional `_x` or `_{...}` subscript after a letter.
    fn parse_subscript(&mut self) -> Option<Subscript<'a>> {
        if self.peek_byte_at(0) != Some(b'_') {
            return None;
        }

        match self.peek_byte_at(1) {
            Some(b'{') => {
                let content_start = self.pos + 2;
                let close = memchr::memchr(b'}', &self.input.as_bytes()[content_start..])?;
                if close == 0 {
                    return None;
                }
                let content = &self.input[content_start..content_start + close];
                self.pos = content_start + close + 1;
                Some(Subscript::Braced(content))
            },
            Some(b) if b.is_ascii_alphanumeric() => {
                self.pos += 2;
                Some(Subscript::Single(b as char))
            },
            _ => None,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let ch = self.peek()?;
        self.advance(ch);

        let token = match ch {
            '\\' => self.parse_command(),
            c if c.is_ascii_alphabetic() => Token::Letter {
                symbol: c,
                subscript: self.parse_subscript(),
            },
            c => Token::Other(c),
        };
        Some(token)
    }
}

/// Map a token to a variable name, applying the ignore list.
///
/// Commands are normalized to `\` plus the lowercased name. Letters keep
/// their subscript exactly as written.
pub fn classify(token: &Token<'_>, ignore: &IgnoreList) -> Option<String> {
    match *token {
        Token::Command(name) if !ignore.contains(name) => {
            Some(format!("\\{}", name.to_ascii_lowercase()))
        },
        Token::Command(_) => None,
        Token::Letter { symbol, subscript } => Some(match subscript {
            None => symbol.to_string(),
            Some(Subscript::Single(s)) => format!("{}_{}", symbol, s),
            Some(Subscript::Braced(s)) => format!("{}_{{{}}}", symbol, s),
        }),
        Token::Other(_) => None,
    }
}

/// Extract every candidate variable from a latex body.
///
/// Command variables come first, then letter variables, each in order of
/// first appearance with duplicates removed.
pub fn extract_variables(latex: &str, ignore: &IgnoreList) -> Vec<String> {
    let tokens = Lexer::new(latex).tokenize();
    let (commands, letters): (Vec<_>, Vec<_>) = tokens
        .iter()
        .filter(|token| !matches!(token, Token::Other(_)))
        .partition(|token| matches!(token, Token::Command(_)));

    let mut variables: Vec<String> = Vec::new();
    for token in commands.into_iter().chain(letters) {
        if let Some(name) = classify(token, ignore)
            && !variables.contains(&name)
        {
            variables.push(name);
        }
    }
    variables
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_tokenization() {
        let tokens = Lexer::new(r"x_1 + \alpha").tokenize();
        assert_eq!(
            tokens,
            vec![
                Token::Letter { symbol: 'x', subscript: Some(Subscript::Single('1')) },
                Token::Other(' '),
                Token::Other('+'),
                Token::Other(' '),
                Token::Command("alpha"),
            ]
        );
    }

    #[test]
    fn test_braced_subscript() {
        let tokens = Lexer::new("v_{max}^2").tokenize();
        assert_eq!(
            tokens[0],
            Token::Letter { symbol: 'v', subscript: Some(Subscript::Braced("max")) }
        );
        assert_eq!(tokens[1], Token::Other('^'));
    }

    #[test]
    fn test_empty_or_unclosed_subscript_is_not_consumed() {
        let tokens = Lexer::new("a_{}").tokenize();
        assert_eq!(tokens[0], Token::Letter { symbol: 'a', subscript: None });
        assert_eq!(tokens[1], Token::Other('_'));

        let tokens = Lexer::new("a_{b").tokenize();
        assert_eq!(tokens[0], Token::Letter { symbol: 'a', subscript: None });
    }

    #[test]
    fn test_command_letters_are_not_variables() {
        let tokens = Lexer::new(r"\frac{a}{b}").tokenize();
        assert_eq!(tokens[0], Token::Command("frac"));
        let letters: Vec<char> = tokens
            .iter()
            .filter_map(|t| match t {
                Token::Letter { symbol, .. } => Some(*symbol),
                _ => None,
            })
            .collect();
        assert_eq!(letters, vec!['a', 'b']);
    }

    #[test]
    fn test_text_argument_skipped() {
        let tokens = Lexer::new(r"\text{mass {of} body} m").tokenize();
        assert_eq!(tokens[0], Token::Command("text"));
        assert_eq!(tokens[1], Token::Other(' '));
        assert_eq!(tokens[2], Token::Letter { symbol: 'm', subscript: None });
        assert_eq!(tokens.len(), 3);
    }

    #[test]
    fn test_control_symbols() {
        let tokens = Lexer::new(r"\,\{").tokenize();
        assert_eq!(tokens, vec![Token::Other(','), Token::Other('{')]);

        let tokens = Lexer::new("\\").tokenize();
        assert_eq!(tokens, vec![Token::Other('\\')]);
    }

    #[test]
    fn test_non_ascii_is_other() {
        let tokens = Lexer::new("é").tokenize();
        assert_eq!(tokens, vec![Token::Other('é')]);
    }

    #[test]
    fn test_classify() {
        let ignore = IgnoreList::new();
        assert_eq!(classify(&Token::Command("Delta"), &ignore), Some("\\delta".to_string()));
        assert_eq!(classify(&Token::Command("sqrt"), &ignore), None);
        assert_eq!(
            classify(
                &Token::Letter { symbol: 'x', subscript: Some(Subscript::Braced("0")) },
                &ignore
            ),
            Some("x_{0}".to_string())
        );
        assert_eq!(classify(&Token::Other('+'), &ignore), None);
    }

    #[test]
    fn test_extract_variables_order_and_dedup() {
        let ignore = IgnoreList::new();
        let vars = extract_variables(r"a + \beta b + a \cdot \beta", &ignore);
        assert_eq!(vars, vec!["\\beta", "a", "b"]);
    }

    #[test]
    fn test_extract_variables_ignores_frac() {
        let ignore = IgnoreList::new();
        let vars = extract_variables(r"\frac{a}{b}", &ignore);
        assert_eq!(vars, vec!["a", "b"]);
    }
}
