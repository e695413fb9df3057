//! Finite-state parser building a `Map` from version-script text
//!
//! The grammar, with whitespace and `#` comments ignorable anywhere:
//!
//! ```text
//! script      := release*
//! release     := IDENT '{' element* '}' (IDENT)? ';'
//! element     := IDENT ':'             // opens a visibility scope
//!              | (IDENT | '*') ';'     // a symbol in the open scope
//! ```
//!
//! The first structural error is fatal; there is no recovery. Errors point
//! at the first unconsumed character. Two conditions are only warnings:
//! a duplicated release name, and a symbol appearing before any visibility
//! scope was opened (it lands in an implicit `global` scope).

use crate::core::error::{ParseError, SymverResult};
use crate::model::{Map, Release};
use crate::script::lexer::{Lexer, Token, TokenKind};
use crate::ui::reporter::Reporter;

/// Parser states, in the order the grammar visits them
#[derive(Debug)]
enum State {
  /// Searching for a release name (or end of input)
  SeekReleaseName,
  /// Searching for the release opening `{`
  SeekOpenBrace,
  /// Searching for an identifier, `*`, or `}`
  SeekElementOrClose,
  /// Saw an identifier; searching for `:` (scope) or `;` (symbol)
  SeekElementCloser(Token),
  /// Saw `}`; searching for the previous-release name or `;`
  SeekPreviousName,
  /// Saw the previous-release name; searching for the closing `;`
  SeekPreviousCloser(Token),
}

/// Parse script lines into a `Map`
///
/// `filename` is only used in diagnostics; pass the path the lines came
/// from, or a placeholder for scripts built in memory.
pub fn parse(filename: &str, lines: &[String], reporter: &Reporter) -> SymverResult<Map> {
  let mut lexer = Lexer::new(lines);
  let mut releases: Vec<Release> = Vec::new();
  let mut current = Release::default();
  let mut scope_open = false;
  let mut state = State::SeekReleaseName;

  let error = |lexer: &Lexer<'_>, token: &Token, message: String| {
    ParseError::new(filename, lexer.line_text(token.line), token.line, token.column, message)
  };

  loop {
    let token = lexer.next_token();

    if token.kind == TokenKind::Eof {
      match state {
        State::SeekReleaseName => break,
        _ => return Err(error(&lexer, &token, "Unexpected end of file".to_string()).into()),
      }
    }

    state = match state {
      State::SeekReleaseName => match token.kind {
        TokenKind::Ident => {
          if releases.iter().any(|release| release.name == token.text) {
            reporter.warning(error(
              &lexer,
              &token,
              format!("Duplicated Release identifier '{}'", token.text),
            ));
          }
          current = Release::new(token.text);
          scope_open = false;
          State::SeekOpenBrace
        }
        _ => return Err(error(&lexer, &token, "Invalid Release identifier".to_string()).into()),
      },

      State::SeekOpenBrace => match token.kind {
        TokenKind::OpenBrace => State::SeekElementOrClose,
        _ => return Err(error(&lexer, &token, "Missing '{'".to_string()).into()),
      },

      State::SeekElementOrClose => match token.kind {
        TokenKind::CloseBrace => State::SeekPreviousName,
        TokenKind::Ident | TokenKind::Wildcard => State::SeekElementCloser(token),
        _ => return Err(error(&lexer, &token, "Invalid identifier".to_string()).into()),
      },

      State::SeekElementCloser(identifier) => match token.kind {
        TokenKind::Colon => {
          // New visibility scope
          current.symbols.push((identifier.text, Vec::new()));
          scope_open = true;
          State::SeekElementOrClose
        }
        TokenKind::Semicolon => {
          if !scope_open {
            reporter.warning(error(
              &lexer,
              &identifier,
              format!(
                "Missing visibility scope before '{}'. Symbols considered in 'global:'",
                identifier.text
              ),
            ));
            current.symbols.push(("global".to_string(), Vec::new()));
            scope_open = true;
          }
          if let Some((_, symbols)) = current.symbols.last_mut() {
            symbols.push(identifier.text);
          }
          State::SeekElementOrClose
        }
        _ => {
          return Err(
            error(
              &lexer,
              &token,
              format!("Missing ';' or ':' after '{}'", identifier.text),
            )
            .into(),
          );
        }
      },

      State::SeekPreviousName => match token.kind {
        TokenKind::Semicolon => {
          // No previous release
          releases.push(std::mem::take(&mut current));
          State::SeekReleaseName
        }
        TokenKind::Ident => State::SeekPreviousCloser(token),
        _ => return Err(error(&lexer, &token, "Invalid identifier".to_string()).into()),
      },

      State::SeekPreviousCloser(previous) => match token.kind {
        TokenKind::Semicolon => {
          current.previous = previous.text;
          releases.push(std::mem::take(&mut current));
          State::SeekReleaseName
        }
        _ => return Err(error(&lexer, &token, "Missing ';'".to_string()).into()),
      },
    };
  }

  Ok(Map {
    filename: filename.to_string(),
    releases,
  })
}
