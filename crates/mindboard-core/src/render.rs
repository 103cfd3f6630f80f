use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::session::{DashboardState, StepOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
    format: OutputFormat,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color_cfg = cfg.get("color").unwrap_or_else(|| "on".to_string());
        let color = match color_cfg.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        let output_cfg = cfg.get("output").unwrap_or_else(|| "table".to_string());
        let format = match output_cfg.to_ascii_lowercase().as_str() {
            "table" => OutputFormat::Table,
            "json" => OutputFormat::Json,
            other => return Err(anyhow!("invalid output setting: {other}")),
        };

        Ok(Self { color, format })
    }

    #[tracing::instrument(skip(self, steps))]
    pub fn print_steps(&mut self, steps: &[StepOutcome]) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        if self.format == OutputFormat::Json {
            return write_json(&mut out, &steps);
        }
        let rows = self.step_rows(steps);
        write_table(&mut out, step_headers(), rows)
    }

    #[tracing::instrument(skip(self, state))]
    pub fn print_state(&mut self, state: &DashboardState) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        if self.format == OutputFormat::Json {
            return write_json(&mut out, state);
        }
        write_state(&mut out, state)
    }

    fn step_rows(&self, steps: &[StepOutcome]) -> Vec<Vec<String>> {
        steps
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let value = if step.changed {
                    self.paint(&step.value, "32")
                } else {
                    self.paint(&step.value, "90")
                };
                vec![
                    (idx + 1).to_string(),
                    step.control.clone(),
                    step.input.clone(),
                    value,
                ]
            })
            .collect()
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn step_headers() -> Vec<String> {
    vec![
        "Step".to_string(),
        "Control".to_string(),
        "Input".to_string(),
        "Value".to_string(),
    ]
}

fn write_json<W: Write, T: Serialize + ?Sized>(mut writer: W, value: &T) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    writeln!(writer, "{text}")?;
    Ok(())
}

fn write_state<W: Write>(mut writer: W, state: &DashboardState) -> anyhow::Result<()> {
    writeln!(writer, "pathname          {}", state.pathname)?;
    writeln!(writer, "heatmap_open      {}", state.heatmap_open)?;
    writeln!(writer, "sankey_open       {}", state.sankey_open)?;
    writeln!(writer, "data_source_open  {}", state.data_source_open)?;
    writeln!(writer, "cursor            {}", state.choropleth_cursor)?;
    writeln!(
        writer,
        "select_disabled   {}",
        state.continent_select_disabled
    )?;
    writeln!(
        writer,
        "rotation          lon={:.2} lat={:.2}",
        state.rotation.lon, state.rotation.lat
    )?;
    Ok(())
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
