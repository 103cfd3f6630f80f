use serde::{
  Deserialize,
  Serialize
};

use crate::trigger::Trigger;
use crate::update::Update;

pub const DEFAULT_STEP: f64 = 0.5;

const LAT_SNAP: f64 = 0.01;

/// Projection rotation of the choropleth
/// globe, in degrees.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  Serialize,
  Deserialize,
  PartialEq,
)]
pub struct GlobeRotation {
  pub lon: f64,
  pub lat: f64
}

/// One interval tick of the auto-rotation.
///
/// Longitude wraps at the antimeridian
/// before stepping; latitude is clamped to
/// the poles and snapped to the equator
/// when within 0.01 degrees of it.
pub fn advance(
  rotation: GlobeRotation,
  step: f64,
  trigger: Trigger
) -> Update<GlobeRotation> {
  trigger.guard(|_| {
    let mut lon = rotation.lon;
    if lon <= -180.0 {
      lon = 180.0;
    }
    if lon >= 180.0 {
      lon = -180.0;
    }

    let mut lat =
      rotation.lat.clamp(-90.0, 90.0);
    if lat.abs() < LAT_SNAP {
      lat = 0.0;
    }

    GlobeRotation {
      lon: lon + step,
      lat
    }
  })
}

#[cfg(test)]
mod tests {
  use super::{
    DEFAULT_STEP,
    GlobeRotation,
    advance
  };
  use crate::trigger::Trigger;

  fn tick(
    lon: f64,
    lat: f64
  ) -> GlobeRotation {
    advance(
      GlobeRotation { lon, lat },
      DEFAULT_STEP,
      Trigger::fired(1)
    )
    .into_option()
    .unwrap()
  }

  #[test]
  fn waits_for_first_interval() {
    assert!(
      advance(
        GlobeRotation::default(),
        DEFAULT_STEP,
        Trigger::absent()
      )
      .is_no_change()
    );
  }

  #[test]
  fn steps_longitude() {
    assert_eq!(
      tick(10.0, 20.0),
      GlobeRotation {
        lon: 10.5,
        lat: 20.0
      }
    );
  }

  #[test]
  fn wraps_at_antimeridian() {
    assert_eq!(tick(180.0, 0.0).lon, -179.5);
    assert_eq!(tick(-180.0, 0.0).lon, -179.5);
    assert_eq!(tick(-200.0, 0.0).lon, -179.5);
  }

  #[test]
  fn clamps_and_snaps_latitude() {
    assert_eq!(tick(0.0, 120.0).lat, 90.0);
    assert_eq!(tick(0.0, -95.0).lat, -90.0);
    assert_eq!(tick(0.0, 0.005).lat, 0.0);
    assert_eq!(tick(0.0, -0.02).lat, -0.02);
  }
}
