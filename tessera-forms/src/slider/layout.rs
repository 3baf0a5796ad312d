/// Horizontal extent of the track, in the same coordinate space as the
/// pointer positions delivered with events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackBounds {
    /// Client x of the track's left edge.
    pub left: f64,
    /// Width of the track; zero or negative while the track is not laid out.
    pub width: f64,
}

impl TrackBounds {
    /// Creates bounds from the track's left edge and width.
    pub fn new(left: f64, width: f64) -> Self {
        Self { left, width }
    }

    /// Normalized progress of a pointer's client x along the track.
    ///
    /// Positions outside the track clamp to the nearest end. Returns `None`
    /// while the track has no usable width.
    pub fn fraction_at(&self, client_x: f64) -> Option<f64> {
        if self.width.is_nan() || self.width <= 0.0 || !client_x.is_finite() {
            return None;
        }
        Some(((client_x - self.left) / self.width).clamp(0.0, 1.0))
    }

    /// Client x of a track fraction.
    pub fn client_x_at(&self, fraction: f64) -> f64 {
        fraction.clamp(0.0, 1.0).mul_add(self.width.max(0.0), self.left)
    }
}
