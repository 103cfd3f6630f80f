pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod navigation;
pub mod render;
pub mod replay;
pub mod rotation;
pub mod session;
pub mod trigger;
pub mod update;

use std::ffi::OsString;

use clap::Parser;
use tracing::{
  debug,
  info
};

pub use dispatch::{
  AnimationCursor,
  Modal,
  animation_cursor,
  disabled_from_checked,
  guarded_flip,
  toggle_modal
};
pub use trigger::Trigger;
pub use update::Update;

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let pre =
    cli::preprocess_args(&raw_args)?;
  let cli = cli::GlobalCli::parse_from(
    pre.cleaned_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting mindboard"
  );
  debug!(?pre.rc_overrides, "preprocessed rc overrides");

  let mut cfg = config::Config::load(
    cli.config.as_deref()
  )?;
  cfg.apply_overrides(
    pre.rc_overrides.into_iter().chain(
      cli
        .rc_overrides
        .into_iter()
        .map(|kv| (kv.key, kv.value))
    )
  );

  let mut renderer =
    render::Renderer::new(&cfg)?;
  let command = cli
    .command
    .unwrap_or(cli::Command::State);

  commands::dispatch(
    &cfg,
    &mut renderer,
    command
  )?;

  info!("done");
  Ok(())
}
