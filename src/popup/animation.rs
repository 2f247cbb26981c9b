// src/popup/animation.rs
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_ANIMATION_STYLE: i32 = 1;
pub const REVEAL_DURATION: Duration = Duration::from_millis(150);

/// How a popup appears when shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStyle {
    /// Rows unroll top-down.
    Drop,
    /// Rows unroll while the width grows.
    Expand,
}

impl AnimationStyle {
    pub fn from_id(id: i32) -> Self {
        match id {
            1 => Self::Drop,
            2 => Self::Expand,
            other => {
                debug!("Unknown animation style {}, using drop", other);
                Self::Drop
            }
        }
    }

    /// Fraction of the popup that is visible `elapsed` after it was shown.
    pub fn reveal(&self, elapsed: Duration) -> f32 {
        if elapsed >= REVEAL_DURATION {
            return 1.0;
        }
        elapsed.as_secs_f32() / REVEAL_DURATION.as_secs_f32()
    }

    /// Visible (width, height) for a popup of full size `width` x `height`.
    pub fn clip(&self, width: u16, height: u16, elapsed: Duration) -> (u16, u16) {
        let total = REVEAL_DURATION.as_millis();
        let done = elapsed.as_millis().min(total);
        let scaled = |v: u16| {
            let visible = (v as u128 * done).div_ceil(total) as u16;
            visible.clamp(1.min(v), v)
        };
        match self {
            Self::Drop => (width, scaled(height)),
            Self::Expand => (scaled(width), scaled(height)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_map_to_styles() {
        assert_eq!(AnimationStyle::from_id(1), AnimationStyle::Drop);
        assert_eq!(AnimationStyle::from_id(2), AnimationStyle::Expand);
        assert_eq!(AnimationStyle::from_id(77), AnimationStyle::Drop);
    }

    #[test]
    fn reveal_clips_until_done() {
        let drop = AnimationStyle::Drop;
        assert_eq!(drop.clip(20, 10, Duration::ZERO), (20, 1));
        assert_eq!(drop.clip(20, 10, Duration::from_millis(75)), (20, 5));
        assert_eq!(drop.clip(20, 10, REVEAL_DURATION), (20, 10));

        let expand = AnimationStyle::Expand;
        assert_eq!(expand.clip(20, 10, Duration::from_millis(75)), (10, 5));
        assert_eq!(expand.clip(0, 0, Duration::ZERO), (0, 0));
    }
}
