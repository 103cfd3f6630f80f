use std::collections::HashMap;
use std::fs;
use std::path::{
  Path,
  PathBuf
};

use anyhow::{
  Context,
  anyhow
};
use tracing::{
  debug,
  info,
  trace,
  warn
};

use crate::dispatch::Modal;
use crate::navigation::{
  DEFAULT_PAGE_ORDER,
  PageOrder
};
use crate::rotation::DEFAULT_STEP;

#[derive(Debug, Clone)]
pub struct Config {
  map: HashMap<String, String>,
  pub loaded_files: Vec<PathBuf>
}

impl Default for Config {
  fn default() -> Self {
    let mut map = HashMap::new();
    map.insert(
      "pages.order".to_string(),
      DEFAULT_PAGE_ORDER.to_string()
    );
    map.insert(
      "rotation.step".to_string(),
      DEFAULT_STEP.to_string()
    );
    for modal in Modal::ALL {
      map.insert(
        modal_key(modal),
        "false".to_string()
      );
    }
    map.insert(
      "color".to_string(),
      "on".to_string()
    );
    map.insert(
      "output".to_string(),
      "table".to_string()
    );

    Config {
      map,
      loaded_files: vec![]
    }
  }
}

impl Config {
  #[tracing::instrument(skip(
    rc_override
  ))]
  pub fn load(
    rc_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let mut cfg = Config::default();

    let rc = resolve_rc_path(rc_override)?;
    if let Some(path) = rc {
      info!(rc = %path.display(), "loading mindboardrc");
      cfg.load_file(&path, &mut Vec::new())?;
    } else {
      warn!(
        "no mindboardrc found; using \
         defaults"
      );
    }

    Ok(cfg)
  }

  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .to_string();
      debug!(key = %key, value = %v, "applying override");
      self.map.insert(key, v);
    }
  }

  pub fn get(
    &self,
    key: &str
  ) -> Option<String> {
    self.map.get(key).cloned()
  }

  pub fn get_bool(
    &self,
    key: &str
  ) -> Option<bool> {
    self
      .map
      .get(key)
      .map(|v| parse_bool(v))
  }

  pub fn get_f64(
    &self,
    key: &str
  ) -> anyhow::Result<Option<f64>> {
    self
      .map
      .get(key)
      .map(|v| {
        v.trim().parse::<f64>().map_err(
          |e| {
            anyhow!(
              "invalid number for \
               {key}: {v} ({e})"
            )
          }
        )
      })
      .transpose()
  }

  pub fn page_order(
    &self
  ) -> anyhow::Result<PageOrder> {
    match self.get("pages.order") {
      | Some(raw) => PageOrder::parse(&raw)
        .context("invalid pages.order"),
      | None => Ok(PageOrder::default())
    }
  }

  pub fn rotation_step(
    &self
  ) -> anyhow::Result<f64> {
    let step = self
      .get_f64("rotation.step")?
      .unwrap_or(DEFAULT_STEP);
    if !step.is_finite() {
      return Err(anyhow!(
        "rotation.step must be finite, \
         got {step}"
      ));
    }
    Ok(step)
  }

  pub fn modal_opened(
    &self,
    modal: Modal
  ) -> bool {
    self
      .get_bool(&modal_key(modal))
      .unwrap_or(false)
  }

  /// `open` holds the canonical paths of
  /// the files currently being read, outermost
  /// first.
  #[tracing::instrument(skip(self, open))]
  fn load_file(
    &mut self,
    path: &Path,
    open: &mut Vec<PathBuf>
  ) -> anyhow::Result<()> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    let canonical = fs::canonicalize(&path)
      .with_context(|| {
        format!(
          "failed to resolve {}",
          path.display()
        )
      })?;
    open.push(canonical);

    self
      .loaded_files
      .push(path.clone());

    let base_dir = path
      .parent()
      .map(|p| p.to_path_buf())
      .unwrap_or_else(|| {
        PathBuf::from(".")
      });

    for (line_num, raw_line) in
      text.lines().enumerate()
    {
      let mut line = raw_line.trim();
      if line.is_empty()
        || line.starts_with('#')
      {
        continue;
      }

      if let Some((before, _)) =
        line.split_once('#')
      {
        line = before.trim();
      }

      if line.is_empty() {
        continue;
      }

      if let Some(include_rest) =
        line.strip_prefix("include ")
      {
        let include_path =
          resolve_include_path(
            &base_dir,
            include_rest.trim()
          )?;
        debug!(
            file = %path.display(),
            include = %include_path.display(),
            line = line_num + 1,
            "processing include"
        );

        if include_path.exists() {
          let target =
            fs::canonicalize(&include_path)
              .with_context(|| {
                format!(
                  "failed to resolve {}",
                  include_path.display()
                )
              })?;
          if open.contains(&target) {
            return Err(anyhow!(
              "include cycle at {}:{}: {} \
               is already being loaded",
              path.display(),
              line_num + 1,
              include_path.display()
            ));
          }
          self.load_file(
            &include_path,
            open
          )?;
        } else {
          warn!(include = %include_path.display(), "include file does not exist; skipping");
        }
        continue;
      }

      let (k, v) = line
        .split_once('=')
        .ok_or_else(|| {
          anyhow!(
            "invalid config line \
             {}:{}: {}",
            path.display(),
            line_num + 1,
            raw_line
          )
        })?;

      let key = k.trim().to_string();
      let value = v.trim().to_string();
      trace!(key = %key, value = %value, "loaded config key");
      self.map.insert(key, value);
    }

    open.pop();
    Ok(())
  }
}

fn modal_key(modal: Modal) -> String {
  format!("modal.{}.opened", modal.name())
}

#[tracing::instrument(skip(
  override_path
))]
fn resolve_rc_path(
  override_path: Option<&Path>
) -> anyhow::Result<Option<PathBuf>> {
  if let Some(path) = override_path {
    return Ok(Some(path.to_path_buf()));
  }

  if let Ok(rc_env) =
    std::env::var("MINDBOARDRC")
  {
    if rc_env == "/dev/null" {
      return Ok(None);
    }
    return Ok(Some(PathBuf::from(
      rc_env
    )));
  }

  let home = dirs::home_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine home \
         directory"
      )
    })?;
  let candidate =
    home.join(".mindboardrc");
  if candidate.exists() {
    return Ok(Some(candidate));
  }

  Ok(None)
}

fn resolve_include_path(
  base_dir: &Path,
  include: &str
) -> anyhow::Result<PathBuf> {
  if include.trim().is_empty() {
    return Err(anyhow!(
      "include path cannot be empty"
    ));
  }

  let raw = PathBuf::from(include);
  let expanded = expand_tilde(&raw);
  if expanded.is_absolute() {
    Ok(expanded)
  } else {
    Ok(base_dir.join(expanded))
  }
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> bool {
  matches!(
    s.trim()
      .to_ascii_lowercase()
      .as_str(),
    "1" | "y" | "yes" | "on" | "true"
  )
}
