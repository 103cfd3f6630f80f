use tracing::{
  debug,
  info
};

use crate::cli::Command;
use crate::config::Config;
use crate::render::Renderer;
use crate::replay::{
  self,
  Script
};
use crate::session::{
  Event,
  Session,
  StepOutcome
};
use crate::trigger::Trigger;

#[tracing::instrument(skip(
  cfg, renderer
))]
pub fn dispatch(
  cfg: &Config,
  renderer: &mut Renderer,
  command: Command
) -> anyhow::Result<()> {
  let mut session =
    Session::from_config(cfg)?;

  match command {
    | Command::Replay { script } => {
      let script = Script::load(&script)?;
      let report = replay::run_script(
        &mut session,
        &script
      );
      info!(
        steps = report.steps.len(),
        changed = report
          .steps
          .iter()
          .filter(|s| s.changed)
          .count(),
        "replay finished"
      );
      renderer.print_steps(&report.steps)?;
      renderer
        .print_state(&report.final_state)
    }
    | Command::State => {
      renderer.print_state(session.state())
    }
    | command => {
      match single_step(
        &mut session,
        command
      ) {
        | Some(outcome) => {
          renderer.print_steps(&[outcome])
        }
        | None => Ok(())
      }
    }
  }
}

/// Seeds the session from the command's
/// flags and applies its one event.
///
/// `None` for commands that are not a
/// single interaction.
pub fn single_step(
  session: &mut Session,
  command: Command
) -> Option<StepOutcome> {
  let event = match command {
    | Command::Toggle {
      modal,
      n_clicks,
      opened
    } => {
      let mut state =
        session.state().clone();
      state.set_modal_open(modal, opened);
      session.replace_state(state);
      Event::ModalToggle {
        modal,
        n_clicks: Trigger::from(n_clicks)
      }
    }
    | Command::Cursor { n_clicks } => {
      Event::AnimationToggle {
        n_clicks: Trigger::from(n_clicks)
      }
    }
    | Command::Navigate { from, input } => {
      debug!(from = %from, input = %input, "navigating");
      let mut state =
        session.state().clone();
      state.pathname = from;
      session.replace_state(state);
      Event::Navigate { input }
    }
    | Command::Replay { .. }
    | Command::State => return None
  };

  Some(session.apply(&event))
}

#[cfg(test)]
mod tests {
  use super::single_step;
  use crate::cli::Command;
  use crate::config::Config;
  use crate::dispatch::Modal;
  use crate::navigation::NavInput;
  use crate::session::{
    NO_UPDATE,
    Session
  };

  fn session() -> Session {
    Session::from_config(
      &Config::default()
    )
    .unwrap()
  }

  #[test]
  fn toggle_flips_the_seeded_modal() {
    let mut session = session();
    let outcome = single_step(
      &mut session,
      Command::Toggle {
        modal:    Modal::Sankey,
        n_clicks: Some(1),
        opened:   true
      }
    )
    .unwrap();

    assert_eq!(outcome.control, "modal:sankey");
    assert_eq!(outcome.value, "false");
    assert!(!session.state().sankey_open);
  }

  #[test]
  fn toggle_without_clicks_keeps_seed() {
    let mut session = session();
    let outcome = single_step(
      &mut session,
      Command::Toggle {
        modal:    Modal::DataSource,
        n_clicks: None,
        opened:   true
      }
    )
    .unwrap();

    assert!(!outcome.changed);
    assert_eq!(outcome.value, NO_UPDATE);
    assert!(session.state().data_source_open);
  }

  #[test]
  fn cursor_uses_click_parity() {
    let mut session = session();
    let outcome = single_step(
      &mut session,
      Command::Cursor {
        n_clicks: Some(5)
      }
    )
    .unwrap();
    assert_eq!(outcome.value, "0");
  }

  #[test]
  fn navigate_starts_from_given_path() {
    let mut session = session();
    let outcome = single_step(
      &mut session,
      Command::Navigate {
        from:  "/disorder-gdp".to_string(),
        input: NavInput::Prev
      }
    )
    .unwrap();

    assert_eq!(
      outcome.value,
      "/global-analysis"
    );
    assert_eq!(
      session.state().pathname,
      "/global-analysis"
    );
  }

  #[test]
  fn state_is_not_a_single_step() {
    let mut session = session();
    assert!(
      single_step(
        &mut session,
        Command::State
      )
      .is_none()
    );
  }
}
