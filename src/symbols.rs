//! Symbol-list input handling
//!
//! The update and new commands take a flat list of exported symbol names,
//! read from a file or stdin: whitespace-delimited tokens, each reduced to
//! its leading run of word characters. Tokens with no leading word
//! character (stray punctuation, annotations) are discarded.

use std::fs;
use std::io::Read;
use std::path::Path;

use crate::core::error::{ResultExt, SymverResult};

/// Reduce raw input lines to a list of symbol names
pub fn clean_symbols(lines: &[String]) -> Vec<String> {
  let mut clean = Vec::new();
  for line in lines {
    for token in line.split_whitespace() {
      let word: String = token
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
      if !word.is_empty() {
        clean.push(word);
      }
    }
  }
  clean
}

/// Read symbol input lines from a file, or stdin when no path is given
pub fn read_symbol_lines(input: Option<&Path>) -> SymverResult<Vec<String>> {
  let text = match input {
    Some(path) => {
      fs::read_to_string(path).with_context(|| format!("Failed to read symbol list '{}'", path.display()))?
    }
    None => {
      let mut text = String::new();
      std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read symbol list from stdin")?;
      text
    }
  };
  Ok(text.lines().map(String::from).collect())
}
