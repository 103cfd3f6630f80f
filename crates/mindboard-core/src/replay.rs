use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{
  Deserialize,
  Serialize
};
use tracing::info;

use crate::session::{
  DashboardState,
  Event,
  Session,
  StepOutcome
};

/// A recorded sequence of UI interactions,
/// optionally starting from an explicit
/// state instead of the configured one.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct Script {
  #[serde(default)]
  pub initial: Option<DashboardState>,
  #[serde(default)]
  pub events:  Vec<Event>
}

#[derive(
  Debug, Clone, Serialize, Deserialize,
)]
pub struct ReplayReport {
  pub steps:       Vec<StepOutcome>,
  pub final_state: DashboardState
}

impl Script {
  /// Reads a script from disk. Files ending
  /// in `.toml` are parsed as TOML,
  /// everything else as JSON.
  #[tracing::instrument]
  pub fn load(
    path: &Path
  ) -> anyhow::Result<Self> {
    let raw = fs::read_to_string(path)
      .with_context(|| {
        format!(
          "failed to read script {}",
          path.display()
        )
      })?;

    let is_toml = path
      .extension()
      .is_some_and(|ext| ext == "toml");

    let script = if is_toml {
      toml::from_str::<Script>(&raw)
        .with_context(|| {
          format!(
            "failed to parse TOML script \
             {}",
            path.display()
          )
        })?
    } else {
      serde_json::from_str::<Script>(&raw)
        .with_context(|| {
          format!(
            "failed to parse JSON script \
             {}",
            path.display()
          )
        })?
    };

    info!(
      path = %path.display(),
      events = script.events.len(),
      "loaded script"
    );
    Ok(script)
  }
}

pub fn run_script(
  session: &mut Session,
  script: &Script
) -> ReplayReport {
  if let Some(initial) = &script.initial
  {
    session
      .replace_state(initial.clone());
  }

  let steps = script
    .events
    .iter()
    .map(|event| session.apply(event))
    .collect();

  ReplayReport {
    steps,
    final_state: session.state().clone()
  }
}

#[cfg(test)]
mod tests {
  use super::{
    Script,
    run_script
  };
  use crate::config::Config;
  use crate::session::Session;

  #[test]
  fn initial_state_replaces_configured_one()
   {
    let script: Script =
      serde_json::from_str(
        r#"{
          "initial": {"heatmap_open": true, "pathname": "/disorder-gdp"},
          "events": [
            {"control": "modal_toggle", "modal": "heatmap", "n_clicks": 1},
            {"control": "navigate", "input": "next"}
          ]
        }"#
      )
      .unwrap();

    let mut session = Session::from_config(
      &Config::default()
    )
    .unwrap();
    let report =
      run_script(&mut session, &script);

    assert_eq!(report.steps.len(), 2);
    assert!(!report.final_state.heatmap_open);
    assert_eq!(
      report.final_state.pathname,
      "/survey-analysis"
    );
  }

  #[test]
  fn toml_scripts_use_event_tables() {
    let script: Script = toml::from_str(
      r#"
        [[events]]
        control = "animation_toggle"
        n_clicks = 1

        [[events]]
        control = "navigate"
        input = { key = "ArrowLeft" }
      "#
    )
    .unwrap();
    assert_eq!(script.events.len(), 2);
    assert!(script.initial.is_none());
  }
}
