use crate::commands::ParsedCommand;
use crate::interpretor::{ControlInterpretor, SessionTerminated};
use crate::style::{Palette, Style};
use crate::texts::help;

pub(super) fn run(
  interpretor: &ControlInterpretor,
  command: &ParsedCommand<'_>,
) -> Result<String, SessionTerminated> {
  Ok(render(interpretor.palette(), command.args.first().copied()))
}

/// Help for `topic`, falling back to the general listing for unknown ones.
pub(crate) fn render(palette: Palette, topic: Option<&str>) -> String {
  let entry = topic.and_then(|topic| {
    let name = topic.trim_start_matches('/').to_ascii_uppercase();
    help::topic(&name)
  });

  match entry {
    Some((usage, description)) => format!(
      "{}{}\n\n{}\n",
      palette.label("Usage: "),
      palette.normal(usage),
      palette.paint_lines(Style::Normal, description)
    ),
    None => {
      let lines: Vec<String> = help::GENERAL
        .lines()
        .map(|line| {
          if line.is_empty() {
            String::new()
          } else if line.starts_with(' ') {
            palette.normal(line)
          } else {
            palette.label(line)
          }
        })
        .collect();
      format!("{}\n", lines.join("\n"))
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn general_listing_names_every_command() {
    let out = render(Palette::Plain, None);
    assert!(out.contains("Interpretor commands include:"));
    for name in ["/help", "/events", "/info", "/quit", "GETINFO", "SETEVENTS"] {
      assert!(out.contains(name), "missing {name}");
    }
  }

  #[test]
  fn topics_ignore_case_and_slash() {
    let expected = render(Palette::Plain, Some("INFO"));
    assert_eq!(render(Palette::Plain, Some("/info")), expected);
    assert_eq!(render(Palette::Plain, Some("Info")), expected);
    assert!(expected.contains("Usage: /info"));
  }

  #[test]
  fn unknown_topic_falls_back_to_listing() {
    assert_eq!(render(Palette::Plain, Some("BLARG")), render(Palette::Plain, None));
  }
}
