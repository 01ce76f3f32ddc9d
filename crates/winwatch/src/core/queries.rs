/*!
Enumeration adapter and title search.

Both wrap the binding's synchronous visit-every-window primitive in an async
shape; results materialize in binding enumeration order (typically
front-to-back Z-order).
*/

use super::{Shared, Winwatch};
use crate::platform::{WindowBinding, WindowHandle};
use crate::types::{WinwatchError, WinwatchResult};
use regex::Regex;

/// A title search pattern: either a prebuilt regex or a literal string.
///
/// A literal is compiled as a regular expression **verbatim** - unescaped
/// metacharacters are interpreted as regex syntax, so searching for `"a.b"`
/// matches a window titled `"axb"`. This mirrors the historical behavior of
/// the API and is intentional; use [`regex::escape`] to match literally.
#[derive(Debug, Clone)]
pub enum TitlePattern {
  /// Compiled verbatim with [`Regex::new`] at query time.
  Literal(String),
  /// Used as-is.
  Regex(Regex),
}

impl From<&str> for TitlePattern {
  fn from(pattern: &str) -> Self {
    Self::Literal(pattern.to_owned())
  }
}

impl From<String> for TitlePattern {
  fn from(pattern: String) -> Self {
    Self::Literal(pattern)
  }
}

impl From<Regex> for TitlePattern {
  fn from(regex: Regex) -> Self {
    Self::Regex(regex)
  }
}

impl TitlePattern {
  fn compile(self) -> WinwatchResult<Regex> {
    match self {
      Self::Regex(regex) => Ok(regex),
      Self::Literal(pattern) => {
        Regex::new(&pattern).map_err(|source| WinwatchError::InvalidPattern { pattern, source })
      }
    }
  }
}

impl<B: WindowBinding> Shared<B> {
  /// Enumerate all windows, keeping those `predicate` accepts. Enumeration
  /// always runs to completion regardless of predicate outcome.
  pub(crate) fn find_windows_with(
    &self,
    predicate: &mut dyn FnMut(&B::Handle) -> bool,
  ) -> WinwatchResult<Vec<B::Handle>> {
    let mut result = Vec::new();
    self.binding.enumerate_windows(&mut |window| {
      if predicate(&window) {
        result.push(window);
      }
      true
    })?;
    Ok(result)
  }
}

impl<B: WindowBinding> Winwatch<B> {
  /// All top-level windows, in enumeration order.
  pub async fn windows(&self) -> WinwatchResult<Vec<B::Handle>> {
    self.shared.find_windows_with(&mut |_| true)
  }

  /// All top-level windows accepted by `predicate`, in enumeration order.
  ///
  /// A panicking predicate unwinds through this call; nothing is caught.
  pub async fn find_windows(
    &self,
    mut predicate: impl FnMut(&B::Handle) -> bool,
  ) -> WinwatchResult<Vec<B::Handle>> {
    self.shared.find_windows_with(&mut predicate)
  }

  /// First window (in enumeration order) whose title matches `pattern`,
  /// stopping enumeration at the match.
  ///
  /// Fails with [`WinwatchError::NoMatch`] when no title matches. See
  /// [`TitlePattern`] for how literal strings are interpreted.
  pub async fn find_by_title(
    &self,
    pattern: impl Into<TitlePattern>,
  ) -> WinwatchResult<B::Handle> {
    let regex = pattern.into().compile()?;

    let mut found = None;
    self.shared.binding.enumerate_windows(&mut |window| {
      let title = match window.title() {
        Ok(title) => title,
        Err(err) => {
          // Stale mid-enumeration; skip the window, not the search.
          log::debug!("skipping window {}: {err}", window.hwnd());
          return true;
        }
      };
      if regex.is_match(&title) {
        found = Some(window);
        false
      } else {
        true
      }
    })?;

    found.ok_or_else(|| WinwatchError::NoMatch {
      pattern: regex.as_str().to_owned(),
    })
  }
}
