//! Guarded reducers for the dashboard's
//! toggle controls.
//!
//! Every function here is pure: the host
//! passes the trigger and the state it
//! currently holds, and applies whatever
//! comes back. An absent trigger is never an
//! error, it yields [`Update::NoChange`].

use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

use crate::trigger::Trigger;
use crate::update::Update;

/// Modal dialogs whose visibility is
/// flipped by a button.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Hash,
  clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
  Heatmap,
  Sankey,
  DataSource
}

impl Modal {
  pub const ALL: [Modal; 3] = [
    Modal::Heatmap,
    Modal::Sankey,
    Modal::DataSource
  ];

  pub fn name(self) -> &'static str {
    match self {
      | Modal::Heatmap => "heatmap",
      | Modal::Sankey => "sankey",
      | Modal::DataSource => {
        "data_source"
      }
    }
  }
}

impl fmt::Display for Modal {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.name())
  }
}

/// Frame index driving the choropleth
/// animation; `-1` means stopped.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct AnimationCursor(i64);

impl AnimationCursor {
  pub const START: AnimationCursor =
    AnimationCursor(0);
  pub const STOPPED: AnimationCursor =
    AnimationCursor(-1);

  pub fn frame(self) -> i64 {
    self.0
  }

  pub fn is_stopped(self) -> bool {
    self == Self::STOPPED
  }
}

impl Default for AnimationCursor {
  fn default() -> Self {
    Self::STOPPED
  }
}

impl fmt::Display for AnimationCursor {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub fn guarded_flip(
  trigger: Trigger,
  current: bool
) -> Update<bool> {
  trigger.guard(|_| !current)
}

/// Flips `opened` once the modal's button
/// has fired.
pub fn toggle_modal(
  _modal: Modal,
  trigger: Trigger,
  opened: bool
) -> Update<bool> {
  guarded_flip(trigger, opened)
}

/// Odd activation counts restart the
/// animation at frame 0, even ones stop it.
pub fn animation_cursor(
  trigger: Trigger
) -> Update<AnimationCursor> {
  trigger.guard(|n| {
    if n % 2 == 1 {
      AnimationCursor::START
    } else {
      AnimationCursor::STOPPED
    }
  })
}

/// The continent selector is disabled while
/// the group filter checkbox is checked.
pub fn disabled_from_checked(
  checked: bool
) -> bool {
  checked
}
