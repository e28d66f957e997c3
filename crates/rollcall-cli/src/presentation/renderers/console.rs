use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::Write;

use super::traits::Renderer;
use crate::presentation::view_models::{CommandResultViewModel, CreateView, TextStyle};
use crate::types::OutputFormat;

pub struct ConsoleRenderer {
    json_mode: bool,
    style: TextStyle,
}

impl ConsoleRenderer {
    /// Colors are enabled only for plain output on a terminal
    pub fn new(format: OutputFormat) -> Self {
        let json_mode = format == OutputFormat::Json;
        Self {
            json_mode,
            style: TextStyle {
                color: !json_mode && std::io::stdout().is_terminal(),
            },
        }
    }

    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    pub fn render_to<T, W>(&self, out: &mut W, result: &CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
        W: Write,
    {
        if self.json_mode {
            writeln!(out, "{}", serde_json::to_string_pretty(result)?)?;
            return Ok(());
        }

        if let Some(badge) = &result.badge {
            if self.style.color {
                writeln!(out, "{} {}", badge.icon(), badge.label.bold())?;
            } else {
                writeln!(out, "{} {}", badge.icon(), badge.label)?;
            }
        }

        write!(out, "{}", result.content.create_view(self.style))?;

        if !result.suggestions.is_empty() {
            writeln!(out)?;
            for tip in &result.suggestions {
                write!(out, "  → {}", tip.description)?;
                if let Some(cmd) = &tip.command {
                    if self.style.color {
                        write!(out, ": {}", cmd.cyan())?;
                    } else {
                        write!(out, ": {}", cmd)?;
                    }
                }
                writeln!(out)?;
            }
        }

        Ok(())
    }
}

impl Renderer for ConsoleRenderer {
    fn render<T>(&self, result: CommandResultViewModel<T>) -> Result<()>
    where
        T: Serialize + CreateView,
    {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.render_to(&mut out, &result)?;
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::view_models::{ExportViewModel, Guidance, StatusBadge};

    fn result() -> CommandResultViewModel<ExportViewModel> {
        CommandResultViewModel::new(ExportViewModel {
            file_name: "attendance_2024-09-02.csv".into(),
            path: Some("/tmp/attendance_2024-09-02.csv".into()),
            row_count: 3,
        })
        .with_badge(StatusBadge::success("Exported 3 session(s)"))
        .with_suggestion(Guidance::new("Open it").with_command("open /tmp"))
    }

    #[test]
    fn test_plain_output() {
        let renderer = ConsoleRenderer::new(OutputFormat::Plain).with_style(TextStyle::default());
        let mut out = Vec::new();
        renderer.render_to(&mut out, &result()).unwrap();

        insta::assert_snapshot!(String::from_utf8(out).unwrap(), @r"
        ✔ Exported 3 session(s)
        Wrote /tmp/attendance_2024-09-02.csv

          → Open it: open /tmp
        ");
    }

    #[test]
    fn test_json_output_is_full_view_model() {
        let renderer = ConsoleRenderer::new(OutputFormat::Json);
        let mut out = Vec::new();
        renderer.render_to(&mut out, &result()).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["content"]["row_count"], 3);
        assert_eq!(value["badge"]["level"], "success");
        assert_eq!(value["suggestions"][0]["command"], "open /tmp");
    }
}
