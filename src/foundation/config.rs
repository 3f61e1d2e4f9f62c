use crate::foundation::error::{OrbdrawError, OrbdrawResult};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Viewport width class used to pick point and cap sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ScreenWidth {
    /// Up to 500px.
    S,
    /// Up to 768px.
    M,
    /// Up to 1024px.
    L,
    /// Anything wider.
    XL,
}

impl ScreenWidth {
    /// Classify a viewport width in CSS pixels.
    pub fn classify(width_px: f64) -> Self {
        if width_px <= 500.0 {
            Self::S
        } else if width_px <= 768.0 {
            Self::M
        } else if width_px <= 1024.0 {
            Self::L
        } else {
            Self::XL
        }
    }

    /// Curve point size in pixels for this class.
    pub fn point_px(self) -> f64 {
        match self {
            Self::S => 3.0,
            Self::M => 6.0,
            Self::L => 8.0,
            Self::XL => 9.0,
        }
    }
}

/// Animation and presentation options.
///
/// Only `speed`, `max_delta_time`, `eps` and `backward_fade_fraction` influence the state
/// machine and the orb sub-animator. The remaining fields are consumed by visual sinks.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Progress units per second.
    pub speed: f64,
    /// Ceiling for a single tick's elapsed time, in seconds.
    pub max_delta_time: f64,
    /// Boundary tolerance for run starts and completion tests.
    pub eps: f64,
    /// Leading fraction of the backward run over which the orb fades out.
    pub backward_fade_fraction: f64,
    /// Tessellation segments per curve.
    pub line_segments: u32,
    /// Orb radius in world units. Read by rendering sinks; the driver does not use it.
    pub orb_radius: f64,
    /// Depth the orb drops in from (camera depth); the entrance starts at `orb_depth_far + 2`.
    pub orb_depth_far: f64,
    /// Curve point size in pixels.
    ///
    /// This and the cap sizes are passed through to sinks that rasterize; see
    /// [`Timeline::config`](crate::Timeline::config).
    pub point_px: f64,
    /// Green teardrop cap size in pixels.
    pub cap_px_green: f64,
    /// Blue teardrop cap size in pixels.
    pub cap_px_blue: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::for_screen(ScreenWidth::XL)
    }
}

impl Config {
    /// Default configuration for a screen width class.
    pub fn for_screen(sw: ScreenWidth) -> Self {
        let point_px = sw.point_px();
        Self {
            speed: 1.0,
            max_delta_time: 1.0 / 30.0,
            eps: 1e-4,
            backward_fade_fraction: 0.4,
            line_segments: 2000,
            orb_radius: 0.5,
            orb_depth_far: 10.0,
            point_px,
            cap_px_green: point_px * 1.2,
            cap_px_blue: point_px * 1.4,
        }
    }

    /// Default configuration for a viewport width in CSS pixels.
    pub fn for_viewport_width(width_px: f64) -> Self {
        Self::for_screen(ScreenWidth::classify(width_px))
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their [`Default`] values.
    pub fn from_reader<R: std::io::Read>(r: R) -> OrbdrawResult<Self> {
        let cfg: Config = serde_json::from_reader(r)
            .map_err(|e| OrbdrawError::serde(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> OrbdrawResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OrbdrawError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check that every option lies in the domain the state machine is total over.
    pub fn validate(&self) -> OrbdrawResult<()> {
        let floats = [
            ("speed", self.speed),
            ("max_delta_time", self.max_delta_time),
            ("eps", self.eps),
            ("backward_fade_fraction", self.backward_fade_fraction),
            ("orb_radius", self.orb_radius),
            ("orb_depth_far", self.orb_depth_far),
            ("point_px", self.point_px),
            ("cap_px_green", self.cap_px_green),
            ("cap_px_blue", self.cap_px_blue),
        ];
        if let Some((name, _)) = floats.iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbdrawError::validation(format!("{name} must be finite")));
        }
        if self.speed <= 0.0 {
            return Err(OrbdrawError::validation("speed must be > 0"));
        }
        if self.max_delta_time <= 0.0 {
            return Err(OrbdrawError::validation("max_delta_time must be > 0"));
        }
        if !(self.eps > 0.0 && self.eps < 0.5) {
            return Err(OrbdrawError::validation("eps must be in (0, 0.5)"));
        }
        if !(self.backward_fade_fraction > 0.0 && self.backward_fade_fraction <= 1.0) {
            return Err(OrbdrawError::validation(
                "backward_fade_fraction must be in (0, 1]",
            ));
        }
        if self.line_segments == 0 {
            return Err(OrbdrawError::validation("line_segments must be >= 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
