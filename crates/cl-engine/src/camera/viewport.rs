/// Render target size in physical pixels.
///
/// Dimensions are always at least 1; see [`Viewport::clamped`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Viewport {
    width: i32,
    height: i32,
}

impl Viewport {
    /// Builds a viewport, clamping each dimension to a minimum of 1 pixel.
    ///
    /// A minimised window reports a zero height; clamping keeps the aspect ratio
    /// finite instead of dividing by zero.
    #[inline]
    pub const fn clamped(width: i32, height: i32) -> Self {
        Self {
            width: if width < 1 { 1 } else { width },
            height: if height < 1 { 1 } else { height },
        }
    }

    #[inline]
    pub const fn width(self) -> i32 {
        self.width
    }

    #[inline]
    pub const fn height(self) -> i32 {
        self.height
    }

    /// Width divided by height. Always finite.
    #[inline]
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::clamped(1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_dimensions_are_kept() {
        let vp = Viewport::clamped(800, 600);
        assert_eq!((vp.width(), vp.height()), (800, 600));
    }

    #[test]
    fn zero_and_negative_dimensions_clamp_to_one() {
        let dims = |vp: Viewport| (vp.width(), vp.height());
        assert_eq!(dims(Viewport::clamped(0, 0)), (1, 1));
        assert_eq!(dims(Viewport::clamped(-5, 720)), (1, 720));
        assert_eq!(dims(Viewport::clamped(1280, -1)), (1280, 1));
        assert_eq!(Viewport::default(), Viewport::clamped(1, 1));
    }

    #[test]
    fn aspect_of_zero_height_is_finite() {
        let a = Viewport::clamped(800, 0).aspect();
        assert!(a.is_finite());
        assert_eq!(a, 800.0);
    }

    #[test]
    fn every_constructible_viewport_has_finite_aspect() {
        for (w, h) in [(800, 0), (0, 600), (i32::MIN, i32::MIN), (i32::MAX, 1)] {
            let vp = Viewport::clamped(w, h);
            assert!(vp.width() >= 1 && vp.height() >= 1);
            assert!(vp.aspect().is_finite());
        }
    }
}
