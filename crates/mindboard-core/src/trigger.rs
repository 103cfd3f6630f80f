use std::fmt;

use serde::{
  Deserialize,
  Serialize
};

use crate::update::Update;

/// Activation count supplied by the host
/// for one control. Absent until the
/// control is first used.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(transparent)]
pub struct Trigger(Option<u64>);

impl Trigger {
  pub const fn absent() -> Self {
    Trigger(None)
  }

  pub const fn fired(count: u64) -> Self {
    Trigger(Some(count))
  }

  pub fn count(self) -> Option<u64> {
    self.0
  }

  pub fn is_absent(self) -> bool {
    self.0.is_none()
  }

  /// Runs `f` with the activation count,
  /// or yields `NoChange` when the trigger
  /// has never fired.
  pub fn guard<T, F>(
    self,
    f: F
  ) -> Update<T>
  where
    F: FnOnce(u64) -> T
  {
    self.0.map(f).into()
  }
}

impl From<Option<u64>> for Trigger {
  fn from(value: Option<u64>) -> Self {
    Trigger(value)
  }
}

impl From<u64> for Trigger {
  fn from(value: u64) -> Self {
    Trigger::fired(value)
  }
}

impl fmt::Display for Trigger {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self.0 {
      | Some(count) => {
        write!(f, "{count}")
      }
      | None => f.write_str("-")
    }
  }
}

#[cfg(test)]
mod tests {
  use super::Trigger;
  use crate::update::Update;

  #[test]
  fn guard_skips_absent_trigger() {
    let update = Trigger::absent()
      .guard(|n| n + 1);
    assert_eq!(update, Update::NoChange);

    let update =
      Trigger::fired(0).guard(|n| n + 1);
    assert_eq!(
      update,
      Update::NewValue(1)
    );
  }

  #[test]
  fn deserializes_null_as_absent() {
    let absent: Trigger =
      serde_json::from_str("null")
        .unwrap();
    assert!(absent.is_absent());

    let fired: Trigger =
      serde_json::from_str("3").unwrap();
    assert_eq!(fired.count(), Some(3));
    assert_eq!(fired.to_string(), "3");
    assert_eq!(
      Trigger::absent().to_string(),
      "-"
    );
  }
}
