use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use serde::{
  Deserialize,
  Serialize
};

use crate::update::Update;

pub const DEFAULT_PAGE_ORDER: &str = "/,/global-analysis,/disorder-gdp,/survey-analysis";

#[derive(
  Debug, Clone, PartialEq, Eq,
)]
pub struct PageOrder {
  paths: Vec<String>
}

impl PageOrder {
  pub fn new(
    paths: Vec<String>
  ) -> anyhow::Result<Self> {
    if paths.is_empty() {
      return Err(anyhow!(
        "page order cannot be empty"
      ));
    }
    Ok(Self { paths })
  }

  /// Parses a comma separated list of
  /// paths, ignoring blank entries.
  pub fn parse(
    raw: &str
  ) -> anyhow::Result<Self> {
    let paths = raw
      .split(',')
      .map(str::trim)
      .filter(|p| !p.is_empty())
      .map(str::to_string)
      .collect();
    Self::new(paths)
  }

  pub fn paths(&self) -> &[String] {
    &self.paths
  }

  pub fn first(&self) -> &str {
    &self.paths[0]
  }

  pub fn position(
    &self,
    path: &str
  ) -> Option<usize> {
    self
      .paths
      .iter()
      .position(|p| p == path)
  }
}

impl Default for PageOrder {
  fn default() -> Self {
    Self {
      paths: DEFAULT_PAGE_ORDER
        .split(',')
        .map(str::to_string)
        .collect()
    }
  }
}

/// What moved the user: one of the footer
/// buttons or a key press from the page
/// listener.
#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
#[serde(rename_all = "snake_case")]
pub enum NavInput {
  Prev,
  Next,
  Key(String)
}

impl FromStr for NavInput {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s.trim() {
      | "" => Err(anyhow!(
        "navigation input cannot be \
         empty"
      )),
      | "prev" => Ok(NavInput::Prev),
      | "next" => Ok(NavInput::Next),
      | key => {
        Ok(NavInput::Key(key.to_string()))
      }
    }
  }
}

impl fmt::Display for NavInput {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | NavInput::Prev => {
        f.write_str("prev")
      }
      | NavInput::Next => {
        f.write_str("next")
      }
      | NavInput::Key(key) => {
        write!(f, "key:{key}")
      }
    }
  }
}

enum Direction {
  Back,
  Forward
}

impl NavInput {
  fn direction(
    &self
  ) -> Option<Direction> {
    match self {
      | NavInput::Prev => {
        Some(Direction::Back)
      }
      | NavInput::Next => {
        Some(Direction::Forward)
      }
      | NavInput::Key(key) => {
        match key.as_str() {
          | "ArrowLeft" => {
            Some(Direction::Back)
          }
          | "ArrowRight" => {
            Some(Direction::Forward)
          }
          | _ => None
        }
      }
    }
  }
}

/// Moves one page through `order`.
///
/// Unknown current paths, unrelated keys
/// and moves past either end leave the
/// location alone.
pub fn navigate(
  order: &PageOrder,
  input: &NavInput,
  current_path: &str
) -> Update<String> {
  let Some(index) =
    order.position(current_path)
  else {
    return Update::NoChange;
  };

  let target = match input.direction() {
    | Some(Direction::Back)
      if index > 0 =>
    {
      Some(index - 1)
    }
    | Some(Direction::Forward)
      if index + 1 < order.paths.len() =>
    {
      Some(index + 1)
    }
    | _ => None
  };

  target
    .map(|i| order.paths[i].clone())
    .into()
}
