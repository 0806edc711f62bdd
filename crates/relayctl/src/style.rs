//! Response styling.
//!
//! Every piece of text the interpretor hands back goes through a [`Palette`].
//! Callers pick a semantic [`Style`] and never deal with escape codes, so the
//! color decisions live here and nowhere else.

use std::fmt::Display;

use owo_colors::{OwoColorize as _, Style as AnsiStyle};

/// Semantic category of a piece of output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
  /// Regular informational output.
  Normal,
  /// Field names and headers. Same hue as [`Style::Normal`], emphasized.
  Label,
  /// Failures the operator should notice.
  Error,
}

impl Style {
  fn ansi(self) -> AnsiStyle {
    match self {
      Style::Normal => AnsiStyle::new().blue(),
      Style::Label => AnsiStyle::new().blue().bold(),
      Style::Error => AnsiStyle::new().red().bold(),
    }
  }
}

/// How styles are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
  /// ANSI escape sequences for terminals.
  #[default]
  Ansi,
  /// Text passes through untouched.
  Plain,
}

impl Palette {
  #[must_use]
  pub fn from_color_flag(color: bool) -> Self {
    if color { Palette::Ansi } else { Palette::Plain }
  }

  /// Wrap `text` in the markup for `style`.
  #[must_use]
  pub fn paint(self, style: Style, text: impl Display) -> String {
    match self {
      Palette::Ansi => format!("{}", text.style(style.ansi())),
      Palette::Plain => text.to_string(),
    }
  }

  /// Style each line of `text` on its own. Empty lines stay empty so that
  /// trailing newlines survive without stray escape codes.
  #[must_use]
  pub fn paint_lines(self, style: Style, text: &str) -> String {
    text
      .split('\n')
      .map(|line| {
        if line.is_empty() {
          String::new()
        } else {
          self.paint(style, line)
        }
      })
      .collect::<Vec<_>>()
      .join("\n")
  }

  #[must_use]
  pub fn normal(self, text: impl Display) -> String {
    self.paint(Style::Normal, text)
  }

  #[must_use]
  pub fn label(self, text: impl Display) -> String {
    self.paint(Style::Label, text)
  }

  #[must_use]
  pub fn error(self, text: impl Display) -> String {
    self.paint(Style::Error, text)
  }
}
