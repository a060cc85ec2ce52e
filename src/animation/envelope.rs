use crate::{animation::ease::Ease, foundation::math::lerp};

/// Fade-in / hold / fade-out opacity curve over a path's lifespan, in frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FadeEnvelope {
    pub fade_in: u32,
    pub fade_out: u32,
    pub lifespan: u32,
    pub peak: f64,
    pub ease: Ease,
}

impl FadeEnvelope {
    /// First age past which the fade-out applies. Negative when the lifespan is
    /// shorter than the fade-out window.
    pub fn fade_out_start(&self) -> i64 {
        i64::from(self.lifespan) - i64::from(self.fade_out)
    }

    /// Opacity at `age`, on the same scale as `peak`.
    ///
    /// The fade-in branch is checked first and the fade-out branch second; when both
    /// windows cover `age` the fade-out value is used.
    pub fn opacity_at(&self, age: u32) -> f64 {
        let mut opacity = self.peak;

        if self.fade_in > 0 && age < self.fade_in {
            let t = f64::from(age) / f64::from(self.fade_in);
            opacity = lerp(0.0, self.peak, self.ease.apply(t));
        }

        let start = self.fade_out_start();
        if self.fade_out > 0 && i64::from(age) > start {
            let t = (i64::from(age) - start) as f64 / f64::from(self.fade_out);
            opacity = lerp(self.peak, 0.0, self.ease.apply(t));
        }

        opacity.clamp(0.0, self.peak.max(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(lifespan: u32, peak: f64) -> FadeEnvelope {
        FadeEnvelope {
            fade_in: 30,
            fade_out: 60,
            lifespan,
            peak,
            ease: Ease::Linear,
        }
    }

    #[test]
    fn phase_boundaries() {
        let e = env(200, 210.0);
        assert_eq!(e.opacity_at(0), 0.0);
        assert!((e.opacity_at(15) - 105.0).abs() < 1e-9);
        assert_eq!(e.opacity_at(30), 210.0);
        assert_eq!(e.opacity_at(140), 210.0);
        assert!((e.opacity_at(170) - 105.0).abs() < 1e-9);
        assert_eq!(e.opacity_at(200), 0.0);
        assert_eq!(e.opacity_at(260), 0.0);
    }

    #[test]
    fn shape_is_monotonic_per_phase() {
        for lifespan in [180u32, 200, 300] {
            let e = env(lifespan, 177.5);
            let hold_end = lifespan - 60;
            for age in 0..30 {
                assert!(e.opacity_at(age + 1) >= e.opacity_at(age));
            }
            for age in 31..=hold_end {
                assert_eq!(e.opacity_at(age), 177.5);
            }
            for age in hold_end..lifespan {
                assert!(e.opacity_at(age + 1) <= e.opacity_at(age));
            }
            assert_eq!(e.opacity_at(lifespan), 0.0);
        }
    }

    #[test]
    fn overlapping_windows_prefer_fade_out() {
        // lifespan 60: fade-out covers every age > 0.
        let e = env(60, 200.0);
        let fade_out_only = lerp(200.0, 0.0, 10.0 / 60.0);
        assert!((e.opacity_at(10) - fade_out_only).abs() < 1e-9);
        assert_eq!(e.opacity_at(60), 0.0);

        // lifespan shorter than the fade-out window still ends at zero.
        let e = env(40, 200.0);
        assert!(e.opacity_at(1) > 0.0);
        assert_eq!(e.opacity_at(40), 0.0);
    }

    #[test]
    fn eased_fades_keep_endpoints() {
        let e = FadeEnvelope {
            ease: Ease::InOutCubic,
            ..env(200, 255.0)
        };
        assert_eq!(e.opacity_at(0), 0.0);
        assert_eq!(e.opacity_at(30), 255.0);
        assert_eq!(e.opacity_at(200), 0.0);
    }
}
