use kurbo::{CubicBez, ParamCurve, ParamCurveDeriv, Point};

/// Tangent samples stay this far inside the curve so the cap angle is defined at the ends.
const TANGENT_MARGIN: f64 = 1e-4;

/// Control points of one curve, named as authored.
///
/// The curve is traversed from `end` to `start`: progress 0 sits on `end`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveParams {
    /// Authored start point (reached at progress 1).
    pub start: Point,
    /// Authored end point (progress 0).
    pub end: Point,
    /// Control point next to `start`.
    pub c1: Point,
    /// Control point next to `end`.
    pub c2: Point,
}

impl CurveParams {
    /// Build from `[sx, sy, ex, ey, c1x, c1y, c2x, c2y]`.
    pub fn from_array(v: [f64; 8]) -> Self {
        Self {
            start: Point::new(v[0], v[1]),
            end: Point::new(v[2], v[3]),
            c1: Point::new(v[4], v[5]),
            c2: Point::new(v[6], v[7]),
        }
    }

    /// The traversed bezier.
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.end, self.c2, self.c1, self.start)
    }
}

/// Placement of a teardrop end-cap.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CapPose {
    /// Cap anchor on the curve.
    pub position: Point,
    /// Direction of the curve tangent, in radians.
    pub angle: f64,
}

/// Number of tessellated points drawn at `progress`; never fewer than two.
pub fn draw_count(progress: f64, segments: u32) -> u32 {
    let drawn = (progress.clamp(0.0, 1.0) * f64::from(segments)).floor() as u32;
    drawn.saturating_add(1).max(2)
}

/// Where the cap of `curve` sits at `progress`.
pub fn cap_pose(curve: &CubicBez, progress: f64) -> CapPose {
    let t = progress.clamp(0.0, 1.0);
    let tangent = curve
        .deriv()
        .eval(t.clamp(TANGENT_MARGIN, 1.0 - TANGENT_MARGIN))
        .to_vec2();
    CapPose {
        position: curve.eval(t),
        angle: tangent.y.atan2(tangent.x),
    }
}

/// Green and blue curve pair converging on the orb.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveInstance {
    /// Green curve.
    pub green: CurveParams,
    /// Blue curve.
    pub blue: CurveParams,
}

/// A curve instance evaluated at one progress value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstanceFrame {
    /// Tessellated points drawn on each curve.
    pub draw_count: u32,
    /// Green cap placement.
    pub green_cap: CapPose,
    /// Blue cap placement.
    pub blue_cap: CapPose,
}

impl CurveInstance {
    /// Left instance of the mirrored pair.
    pub fn left() -> Self {
        Self {
            green: CurveParams::from_array([4.0, 0.9, -4.0, 0.0, 0.5, 2.0, -1.35, -2.0]),
            blue: CurveParams::from_array([4.0, 0.9, -4.0, 0.5, 0.5, 1.5, -1.35, -2.5]),
        }
    }

    /// Right instance of the mirrored pair.
    pub fn right() -> Self {
        Self {
            green: CurveParams::from_array([-4.0, -0.3, 4.0, 0.0, -1.35, -2.0, 0.5, 2.0]),
            blue: CurveParams::from_array([-4.0, -0.3, 4.0, 0.5, -1.35, -2.5, 0.5, 1.5]),
        }
    }

    /// Evaluate draw range and cap placement at `progress`.
    pub fn sample(&self, progress: f64, segments: u32) -> InstanceFrame {
        InstanceFrame {
            draw_count: draw_count(progress, segments),
            green_cap: cap_pose(&self.green.to_cubic(), progress),
            blue_cap: cap_pose(&self.blue.to_cubic(), progress),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/curve/progress.rs"]
mod tests;
