//! Tokenizer for linker version scripts
//!
//! Produces a sequence of typed tokens, each carrying the 0-based line and
//! column of its first character. Whitespace and `#`-to-end-of-line
//! comments are skipped anywhere. A character that fits no token class
//! comes back as a one-character `Unknown` token; the parser decides what
//! that means in its current state.

/// Lexical token classes of the version-script grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
  /// A run of word characters (letters, digits, underscore)
  Ident,
  /// The `*` catch-all symbol pattern
  Wildcard,
  OpenBrace,
  CloseBrace,
  Colon,
  Semicolon,
  /// End of input; positioned just past the last line
  Eof,
  /// A character outside the grammar's alphabet
  Unknown,
}

/// A token with its source position
#[derive(Debug, Clone)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  /// 0-based line index
  pub line: usize,
  /// 0-based column of the first character
  pub column: usize,
}

fn is_word(c: char) -> bool {
  c.is_ascii_alphanumeric() || c == '_'
}

/// Scanner over the lines of a script
pub struct Lexer<'a> {
  lines: &'a [String],
  line: usize,
  column: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(lines: &'a [String]) -> Self {
    Lexer {
      lines,
      line: 0,
      column: 0,
    }
  }

  /// The text of a line, for error context (empty when out of range)
  pub fn line_text(&self, line: usize) -> &str {
    self.lines.get(line).map(String::as_str).unwrap_or("")
  }

  /// Advance past whitespace and comments to the next token
  pub fn next_token(&mut self) -> Token {
    loop {
      let Some(line) = self.lines.get(self.line) else {
        return self.eof_token();
      };
      let rest = &line[self.column..];

      let mut chars = rest.chars();
      match chars.next() {
        None => {
          self.line += 1;
          self.column = 0;
        }
        Some('#') => {
          // Comment runs to end of line
          self.line += 1;
          self.column = 0;
        }
        Some(c) if c.is_whitespace() => {
          self.column += c.len_utf8();
        }
        Some(c) => {
          let start = (self.line, self.column);
          let (kind, len) = match c {
            '{' => (TokenKind::OpenBrace, c.len_utf8()),
            '}' => (TokenKind::CloseBrace, c.len_utf8()),
            ':' => (TokenKind::Colon, c.len_utf8()),
            ';' => (TokenKind::Semicolon, c.len_utf8()),
            '*' => (TokenKind::Wildcard, c.len_utf8()),
            c if is_word(c) => {
              let len: usize = rest.chars().take_while(|c| is_word(*c)).map(char::len_utf8).sum();
              (TokenKind::Ident, len)
            }
            _ => (TokenKind::Unknown, c.len_utf8()),
          };
          self.column += len;
          return Token {
            kind,
            text: rest[..len].to_string(),
            line: start.0,
            column: start.1,
          };
        }
      }
    }
  }

  fn eof_token(&self) -> Token {
    let line = self.lines.len().saturating_sub(1);
    let column = self.lines.last().map(|l| l.len()).unwrap_or(0);
    Token {
      kind: TokenKind::Eof,
      text: String::new(),
      line,
      column,
    }
  }
}
