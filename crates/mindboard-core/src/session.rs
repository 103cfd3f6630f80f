use std::fmt::Display;

use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  trace
};

use crate::config::Config;
use crate::dispatch::{
  self,
  AnimationCursor,
  Modal
};
use crate::navigation::{
  self,
  NavInput,
  PageOrder
};
use crate::rotation::{
  self,
  GlobeRotation
};
use crate::trigger::Trigger;
use crate::update::Update;

/// Everything the dashboard host owns.
/// Reducers never touch this directly; it
/// only changes through applied updates.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(default)]
pub struct DashboardState {
  pub heatmap_open:              bool,
  pub sankey_open:               bool,
  pub data_source_open:          bool,
  pub choropleth_cursor:         AnimationCursor,
  pub continent_select_disabled: bool,
  pub pathname:                  String,
  pub rotation:                  GlobeRotation
}

impl Default for DashboardState {
  fn default() -> Self {
    Self {
      heatmap_open:              false,
      sankey_open:               false,
      data_source_open:          false,
      choropleth_cursor:         AnimationCursor::default(),
      continent_select_disabled: false,
      pathname:                  "/".to_string(),
      rotation:                  GlobeRotation::default()
    }
  }
}

impl DashboardState {
  pub fn modal_open(
    &self,
    modal: Modal
  ) -> bool {
    match modal {
      | Modal::Heatmap => {
        self.heatmap_open
      }
      | Modal::Sankey => self.sankey_open,
      | Modal::DataSource => {
        self.data_source_open
      }
    }
  }

  pub fn set_modal_open(
    &mut self,
    modal: Modal,
    opened: bool
  ) {
    *self.modal_open_mut(modal) = opened;
  }

  fn modal_open_mut(
    &mut self,
    modal: Modal
  ) -> &mut bool {
    match modal {
      | Modal::Heatmap => {
        &mut self.heatmap_open
      }
      | Modal::Sankey => {
        &mut self.sankey_open
      }
      | Modal::DataSource => {
        &mut self.data_source_open
      }
    }
  }
}

/// A single UI interaction as reported by
/// the host.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
)]
#[serde(
  tag = "control",
  rename_all = "snake_case"
)]
pub enum Event {
  ModalToggle {
    modal:    Modal,
    #[serde(default)]
    n_clicks: Trigger
  },
  AnimationToggle {
    #[serde(default)]
    n_clicks: Trigger
  },
  GroupFilterSwitch {
    checked: bool
  },
  Navigate {
    input: NavInput
  },
  RotationTick {
    #[serde(default)]
    n_intervals: Trigger
  }
}

impl Event {
  pub fn control(&self) -> String {
    match self {
      | Event::ModalToggle {
        modal,
        ..
      } => format!("modal:{modal}"),
      | Event::AnimationToggle {
        ..
      } => "animation".to_string(),
      | Event::GroupFilterSwitch {
        ..
      } => "group_filter".to_string(),
      | Event::Navigate { .. } => {
        "navigate".to_string()
      }
      | Event::RotationTick { .. } => {
        "rotation".to_string()
      }
    }
  }

  pub fn input(&self) -> String {
    match self {
      | Event::ModalToggle {
        n_clicks,
        ..
      }
      | Event::AnimationToggle {
        n_clicks
      } => n_clicks.to_string(),
      | Event::GroupFilterSwitch {
        checked
      } => checked.to_string(),
      | Event::Navigate { input } => {
        input.to_string()
      }
      | Event::RotationTick {
        n_intervals
      } => n_intervals.to_string()
    }
  }
}

/// What one event did to the state.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct StepOutcome {
  pub control: String,
  pub input:   String,
  pub changed: bool,
  /// Rendered new value, or `no_update`.
  pub value:   String
}

pub const NO_UPDATE: &str = "no_update";

#[derive(Debug, Clone)]
pub struct Session {
  order: PageOrder,
  step:  f64,
  state: DashboardState
}

impl Session {
  pub fn new(
    order: PageOrder,
    step: f64,
    state: DashboardState
  ) -> Self {
    Self { order, step, state }
  }

  /// Builds the initial state from config:
  /// modal flags from `modal.*.opened` and
  /// the first page of `pages.order`.
  pub fn from_config(
    cfg: &Config
  ) -> anyhow::Result<Self> {
    let order = cfg.page_order()?;
    let step = cfg.rotation_step()?;
    let state = DashboardState {
      heatmap_open: cfg
        .modal_opened(Modal::Heatmap),
      sankey_open: cfg
        .modal_opened(Modal::Sankey),
      data_source_open: cfg
        .modal_opened(Modal::DataSource),
      pathname: order.first().to_string(),
      ..DashboardState::default()
    };
    Ok(Self::new(order, step, state))
  }

  pub fn state(&self) -> &DashboardState {
    &self.state
  }

  pub fn replace_state(
    &mut self,
    state: DashboardState
  ) {
    self.state = state;
  }

  #[tracing::instrument(skip(self))]
  pub fn apply(
    &mut self,
    event: &Event
  ) -> StepOutcome {
    let state = &mut self.state;
    let (changed, value) = match event {
      | Event::ModalToggle {
        modal,
        n_clicks
      } => {
        let slot =
          state.modal_open_mut(*modal);
        commit(
          dispatch::toggle_modal(
            *modal, *n_clicks, *slot
          ),
          slot
        )
      }
      | Event::AnimationToggle {
        n_clicks
      } => commit(
        dispatch::animation_cursor(
          *n_clicks
        ),
        &mut state.choropleth_cursor
      ),
      | Event::GroupFilterSwitch {
        checked
      } => {
        let disabled =
          dispatch::disabled_from_checked(
            *checked
          );
        commit(
          Update::NewValue(disabled),
          &mut state
            .continent_select_disabled
        )
      }
      | Event::Navigate { input } => {
        commit(
          navigation::navigate(
            &self.order,
            input,
            &state.pathname
          ),
          &mut state.pathname
        )
      }
      | Event::RotationTick {
        n_intervals
      } => {
        let update = rotation::advance(
          state.rotation,
          self.step,
          *n_intervals
        );
        let rendered =
          update.new_value().map(|r| {
            format!(
              "lon={:.2} lat={:.2}",
              r.lon, r.lat
            )
          });
        let changed =
          update.apply(&mut state.rotation);
        (
          changed,
          rendered.unwrap_or_else(|| {
            NO_UPDATE.to_string()
          })
        )
      }
    };

    let outcome = StepOutcome {
      control: event.control(),
      input: event.input(),
      changed,
      value
    };

    if outcome.changed {
      debug!(
        control = %outcome.control,
        value = %outcome.value,
        "applied update"
      );
    } else {
      trace!(
        control = %outcome.control,
        "no update"
      );
    }

    outcome
  }
}

fn commit<T: Display>(
  update: Update<T>,
  slot: &mut T
) -> (bool, String) {
  let rendered = update
    .new_value()
    .map(ToString::to_string);
  let changed = update.apply(slot);
  (
    changed,
    rendered.unwrap_or_else(|| {
      NO_UPDATE.to_string()
    })
  )
}

#[cfg(test)]
mod tests {
  use super::{
    DashboardState,
    Event,
    NO_UPDATE,
    Session
  };
  use crate::config::Config;
  use crate::dispatch::{
    AnimationCursor,
    Modal
  };
  use crate::navigation::NavInput;
  use crate::trigger::Trigger;

  fn session() -> Session {
    Session::from_config(
      &Config::default()
    )
    .unwrap()
  }

  #[test]
  fn modal_toggle_sequence() {
    let mut session = session();
    let values: Vec<String> = [
      Trigger::absent(),
      Trigger::fired(1),
      Trigger::fired(2)
    ]
    .into_iter()
    .map(|n_clicks| {
      session
        .apply(&Event::ModalToggle {
          modal: Modal::Sankey,
          n_clicks
        })
        .value
    })
    .collect();

    assert_eq!(
      values,
      vec![NO_UPDATE, "true", "false"]
    );
    assert!(!session.state().sankey_open);
    assert!(!session.state().heatmap_open);
  }

  #[test]
  fn no_change_keeps_cursor() {
    let mut session = session();
    session.apply(
      &Event::AnimationToggle {
        n_clicks: Trigger::fired(3)
      }
    );
    assert_eq!(
      session.state().choropleth_cursor,
      AnimationCursor::START
    );

    let outcome = session.apply(
      &Event::AnimationToggle {
        n_clicks: Trigger::absent()
      }
    );
    assert!(!outcome.changed);
    assert_eq!(
      session.state().choropleth_cursor,
      AnimationCursor::START
    );
  }

  #[test]
  fn group_filter_always_writes() {
    let mut session = session();
    let outcome = session.apply(
      &Event::GroupFilterSwitch {
        checked: false
      }
    );
    assert!(outcome.changed);
    assert_eq!(outcome.value, "false");

    session.apply(
      &Event::GroupFilterSwitch {
        checked: true
      }
    );
    assert!(
      session
        .state()
        .continent_select_disabled
    );
  }

  #[test]
  fn navigation_updates_pathname() {
    let mut session = session();
    session.apply(&Event::Navigate {
      input: NavInput::Next
    });
    assert_eq!(
      session.state().pathname,
      "/global-analysis"
    );

    session.replace_state(
      DashboardState {
        pathname: "/404".to_string(),
        ..DashboardState::default()
      }
    );
    let outcome =
      session.apply(&Event::Navigate {
        input: NavInput::Prev
      });
    assert_eq!(outcome.value, NO_UPDATE);
    assert_eq!(
      session.state().pathname,
      "/404"
    );
  }

  #[test]
  fn rotation_tick_reports_position() {
    let mut session = session();
    let outcome =
      session.apply(&Event::RotationTick {
        n_intervals: Trigger::fired(1)
      });
    assert_eq!(
      outcome.value,
      "lon=0.50 lat=0.00"
    );
    assert_eq!(
      session.state().rotation.lon,
      0.5
    );
  }

  #[test]
  fn events_deserialize_from_json() {
    let events: Vec<Event> =
      serde_json::from_str(
        r#"[
          {"control": "modal_toggle", "modal": "data_source", "n_clicks": null},
          {"control": "animation_toggle"},
          {"control": "navigate", "input": {"key": "ArrowRight"}},
          {"control": "navigate", "input": "prev"}
        ]"#
      )
      .unwrap();

    assert_eq!(
      events[0],
      Event::ModalToggle {
        modal:    Modal::DataSource,
        n_clicks: Trigger::absent()
      }
    );
    assert_eq!(
      events[1],
      Event::AnimationToggle {
        n_clicks: Trigger::absent()
      }
    );
    assert_eq!(
      events[2],
      Event::Navigate {
        input: NavInput::Key(
          "ArrowRight".to_string()
        )
      }
    );
    assert_eq!(
      events[3],
      Event::Navigate {
        input: NavInput::Prev
      }
    );
  }
}
