//! Quality and quantization-parameter scales.
//!
//! Two numeric conventions exist for the compression knob and they run in
//! opposite directions: the user-facing quality scale (0-100, higher is
//! better) and the codec's native quantization parameter (0-63, higher is
//! worse). Each gets its own type so a bare integer can never silently mean
//! one where the other was intended. [`Quality`] converts through
//! [`Quality::to_qp`]; the raw codec scale is only reachable through
//! [`Qp::new`].

const MAX_QP: i32 = 63;

/// Codec-native quantization parameter, clamped into `[0, 63]`.
///
/// 0 is the finest quantization (best quality, largest output), 63 the
/// coarsest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Qp(u8);

impl Qp {
    /// Finest quantization, largest output.
    pub const MIN: Qp = Qp(0);
    /// Coarsest quantization, smallest output.
    pub const MAX: Qp = Qp(63);
    /// Parameter used when the caller sets neither quality nor qp.
    pub const DEFAULT: Qp = Qp(20);

    /// Clamp `value` into `[0, 63]`. Out-of-range values are never rejected.
    pub const fn new(value: i32) -> Qp {
        let v = if value < 0 {
            0
        } else if value > MAX_QP {
            MAX_QP
        } else {
            value
        };
        Qp(v as u8)
    }

    /// The raw parameter value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// This parameter expressed on the quality scale.
    ///
    /// Truncating, and not an exact inverse of [`Quality::to_qp`]; its job is
    /// publishing [`Quality::DEFAULT`] and reporting, not round-tripping.
    pub const fn to_quality(self) -> Quality {
        Quality((100 * (MAX_QP - self.0 as i32) / MAX_QP) as u8)
    }
}

/// User-facing quality scale, clamped into `[0, 100]`; higher is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u8);

impl Quality {
    pub const WORST: Quality = Quality(0);
    pub const BEST: Quality = Quality(100);
    /// [`Qp::DEFAULT`] expressed on the quality scale.
    pub const DEFAULT: Quality = Qp::DEFAULT.to_quality();

    /// Clamp `value` into `[0, 100]`. Out-of-range values are never rejected.
    pub const fn new(value: i32) -> Quality {
        let v = if value < 0 {
            0
        } else if value > 100 {
            100
        } else {
            value
        };
        Quality(v as u8)
    }

    /// The raw quality value.
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Map onto the codec scale: 100 is qp 0, 0 is qp 63, linear with
    /// round-half-up in between.
    pub const fn to_qp(self) -> Qp {
        let q = self.0 as i32;
        if q >= 100 {
            Qp::MIN
        } else if q <= 0 {
            Qp::MAX
        } else {
            Qp(((MAX_QP * (100 - q) + 50) / 100) as u8)
        }
    }
}
