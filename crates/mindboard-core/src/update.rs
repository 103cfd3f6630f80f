use serde::{
  Deserialize,
  Serialize
};

/// Result of a guarded reducer.
///
/// `NoChange` tells the host to leave the
/// current value untouched. It is never
/// conflated with a real value, so a
/// reducer over `bool` or an integer can
/// still return `false` or `-1`.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(
  tag = "kind",
  content = "value",
  rename_all = "snake_case"
)]
pub enum Update<T> {
  NoChange,
  NewValue(T)
}

impl<T> Update<T> {
  pub fn is_no_change(&self) -> bool {
    matches!(self, Update::NoChange)
  }

  pub fn new_value(&self) -> Option<&T> {
    match self {
      | Update::NoChange => None,
      | Update::NewValue(value) => {
        Some(value)
      }
    }
  }

  pub fn map<U, F>(
    self,
    f: F
  ) -> Update<U>
  where
    F: FnOnce(T) -> U
  {
    match self {
      | Update::NoChange => {
        Update::NoChange
      }
      | Update::NewValue(value) => {
        Update::NewValue(f(value))
      }
    }
  }

  pub fn into_option(self) -> Option<T> {
    match self {
      | Update::NoChange => None,
      | Update::NewValue(value) => {
        Some(value)
      }
    }
  }

  /// Writes a new value into `target`.
  /// Returns whether anything was written.
  pub fn apply(
    self,
    target: &mut T
  ) -> bool {
    match self {
      | Update::NoChange => false,
      | Update::NewValue(value) => {
        *target = value;
        true
      }
    }
  }
}

impl<T> From<Option<T>> for Update<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      | Some(value) => {
        Update::NewValue(value)
      }
      | None => Update::NoChange
    }
  }
}
