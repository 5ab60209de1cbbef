//! Fading trail behind the player
//!
//! Points are appended at the back and leave from the front, either because
//! the buffer is full or because they outlived the trail duration.

use std::collections::VecDeque;
use std::collections::vec_deque::Iter;

use glam::Vec2;
use serde::Serialize;

use super::state::Player;

/// A timestamped position sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Frame clock time (ms) when the point was recorded
    pub created_at: f64,
    /// 1.0 when fresh, 0.0 at the end of the trail duration
    pub opacity: f32,
}

/// Linear fade from 1 at age 0 to 0 at `duration_ms`
#[inline]
pub fn opacity_at(age_ms: f64, duration_ms: f64) -> f32 {
    (1.0 - age_ms / duration_ms).max(0.0) as f32
}

/// Capacity-bounded trail buffer
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
    duration_ms: f64,
    capacity: usize,
}

impl Trail {
    pub fn new(duration_ms: f64, capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity + 1),
            duration_ms,
            capacity,
        }
    }

    /// Record the player's position if it should leave a mark
    ///
    /// A point is added while the player is moving (or the trail is empty),
    /// but never twice in a row at the same spot. Returns true if a point was
    /// appended.
    pub fn record(&mut self, player: &Player, now: f64) -> bool {
        if !player.is_moving() && !self.points.is_empty() {
            return false;
        }
        if self.points.back().is_some_and(|last| last.pos == player.pos) {
            return false;
        }

        self.points.push_back(TrailPoint {
            pos: player.pos,
            created_at: now,
            opacity: 1.0,
        });
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
        true
    }

    /// Refresh opacities and drop points older than the trail duration
    ///
    /// A point exactly `duration_ms` old survives with opacity 0 for one more
    /// frame.
    pub fn decay(&mut self, now: f64) -> Iter<'_, TrailPoint> {
        let duration = self.duration_ms;
        self.points.retain_mut(|point| {
            let age = now - point.created_at;
            if age > duration {
                return false;
            }
            point.opacity = opacity_at(age, duration);
            true
        });
        self.points.iter()
    }

    /// Visible points, oldest first
    pub fn points(&self) -> Iter<'_, TrailPoint> {
        self.points.iter()
    }

    pub fn last(&self) -> Option<&TrailPoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use proptest::prelude::*;

    fn player_at(x: f32, y: f32, moving: bool) -> Player {
        let mut player = Player::new(Vec2::new(x, y), PLAYER_RADIUS, PLAYER_SPEED);
        if moving {
            player.vel = Vec2::new(PLAYER_SPEED, 0.0);
        }
        player
    }

    fn trail() -> Trail {
        Trail::new(TRAIL_DURATION_MS, TRAIL_MAX_LENGTH)
    }

    #[test]
    fn test_first_point_recorded_while_standing_still() {
        let mut trail = trail();
        assert!(trail.record(&player_at(400.0, 300.0, false), 0.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_stationary_player_adds_nothing_more() {
        let mut trail = trail();
        let player = player_at(400.0, 300.0, false);
        trail.record(&player, 0.0);
        assert!(!trail.record(&player, 16.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_blocked_player_does_not_duplicate_point() {
        // Holding a key against a wall: velocity is non-zero but position is unchanged
        let mut trail = trail();
        let player = player_at(487.0, 300.0, true);
        assert!(trail.record(&player, 0.0));
        assert!(!trail.record(&player, 16.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_moving_player_extends_trail() {
        let mut trail = trail();
        for i in 0..10 {
            trail.record(&player_at(400.0 + i as f32 * 3.0, 300.0, true), i as f64 * 16.0);
        }
        assert_eq!(trail.len(), 10);
        assert_eq!(trail.last().map(|p| p.pos.x), Some(427.0));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut trail = trail();
        for i in 0..(TRAIL_MAX_LENGTH + 10) {
            trail.record(&player_at(i as f32, 300.0, true), i as f64);
        }
        assert_eq!(trail.len(), TRAIL_MAX_LENGTH);
        let oldest = trail.points().next().map(|p| p.pos.x);
        assert_eq!(oldest, Some(10.0));
    }

    #[test]
    fn test_opacity_is_linear_in_age() {
        assert_eq!(opacity_at(0.0, TRAIL_DURATION_MS), 1.0);
        assert_eq!(opacity_at(1000.0, TRAIL_DURATION_MS), 0.75);
        assert_eq!(opacity_at(2000.0, TRAIL_DURATION_MS), 0.5);
        assert_eq!(opacity_at(4000.0, TRAIL_DURATION_MS), 0.0);
        assert_eq!(opacity_at(5000.0, TRAIL_DURATION_MS), 0.0);
    }

    #[test]
    fn test_decay_drops_expired_points() {
        let mut trail = trail();
        trail.record(&player_at(10.0, 10.0, true), 0.0);
        trail.record(&player_at(13.0, 10.0, true), 1000.0);

        let visible: Vec<f32> = trail.decay(4000.0).map(|p| p.opacity).collect();
        assert_eq!(visible, vec![0.0, 0.25]);

        let visible: Vec<f32> = trail.decay(4000.5).map(|p| p.opacity).collect();
        assert_eq!(visible.len(), 1);

        assert_eq!(trail.decay(5000.5).count(), 0);
        assert!(trail.is_empty());
    }

    proptest! {
        #[test]
        fn trail_never_exceeds_capacity(
            steps in proptest::collection::vec((0.0f32..800.0, 0.0f32..600.0, any::<bool>()), 1..600)
        ) {
            let mut trail = trail();
            for (i, (x, y, moving)) in steps.into_iter().enumerate() {
                let now = i as f64 * 16.0;
                trail.record(&player_at(x, y, moving), now);
                trail.decay(now);
                prop_assert!(trail.len() <= TRAIL_MAX_LENGTH);
            }
        }

        #[test]
        fn opacity_strictly_decreases_until_expiry(a in 0.0f64..4000.0, b in 0.0f64..4000.0) {
            prop_assume!((a - b).abs() > 0.01);
            let (young, old) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(opacity_at(young, TRAIL_DURATION_MS) > opacity_at(old, TRAIL_DURATION_MS));
        }
    }
}
