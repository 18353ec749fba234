// Directional combat geometry and strike resolution

use glam::Vec2;
use log::debug;

use super::actor::Actor;
use super::direction::{Horizontal, Quadrant, Vertical};
use crate::core::math::{bearing_degrees, distance, within};

/// Attack frame on which a swing connects
pub const STRIKE_FRAME: usize = 2;

/// Slack, in pixels, of the coarse facing test
const FACING_TOLERANCE: f32 = 1.0;

/// Whether a bearing (degrees, screen space) lies in a quadrant's swing arc
pub fn quadrant_covers(quadrant: Quadrant, bearing: f32) -> bool {
    match quadrant {
        Quadrant::RightUp => within(bearing, -110.0, 20.0),
        Quadrant::LeftUp => within(bearing, -180.0, -70.0) || within(bearing, 160.0, 180.0),
        Quadrant::RightDown => within(bearing, -20.0, 110.0),
        Quadrant::LeftDown => within(bearing, -180.0, -160.0) || within(bearing, 70.0, 180.0),
    }
}

/// Whether `defender` stands inside the arc of the attacker's current swing
///
/// Keyed on the attacker's playing clip: only `attack_{h}_{v}` clips have an arc.
pub fn facing_cone(attacker: &Actor, defender: &Actor) -> bool {
    let Some(quadrant) = Quadrant::from_attack_clip(attacker.animation.current_animation()) else {
        return false;
    };
    let bearing = bearing_degrees(attacker.position, defender.position);
    quadrant_covers(quadrant, bearing)
}

/// Coarse check that the chaser's intent already points at the target
pub fn roughly_facing(chaser: &Actor, target: Vec2) -> bool {
    let (cx, cy) = (chaser.position.x, chaser.position.y);
    let (tx, ty) = (target.x, target.y);

    let horizontal = match chaser.facing.horizontal {
        Some(Horizontal::Right) if cx < tx + FACING_TOLERANCE => true,
        Some(Horizontal::Left) if cx > tx - FACING_TOLERANCE => true,
        _ => cx == tx,
    };
    let vertical = match chaser.facing.vertical {
        Some(Vertical::Down) => cy <= ty + FACING_TOLERANCE,
        Some(Vertical::Up) => cy > ty - FACING_TOLERANCE,
        None => false,
    };

    horizontal && vertical
}

/// Point the chaser's intent at the target unless it roughly faces it already
///
/// Exact vertical alignment still yields a downward intent, but leaves the
/// vertical memory untouched.
pub fn steer_toward(chaser: &mut Actor, target: Vec2) {
    if roughly_facing(chaser, target) {
        return;
    }
    let offset = target - chaser.position;

    let horizontal = if offset.x > 0.0 {
        Some(Horizontal::Right)
    } else if offset.x < 0.0 {
        Some(Horizontal::Left)
    } else {
        None
    };
    chaser.facing.set_horizontal(horizontal);

    if offset.y > 0.0 {
        chaser.facing.set_vertical(Some(Vertical::Down));
    } else if offset.y < 0.0 {
        chaser.facing.set_vertical(Some(Vertical::Up));
    } else {
        chaser.facing.vertical = Some(Vertical::Down);
    }
}

/// Resolve the attacker's swing against `targets`, once per swing
///
/// Nothing happens before the strike frame or after the swing was resolved.
/// A target is struck when it is within reach, inside the swing arc and not
/// already recoiling or dying. Returns how many targets were struck.
pub fn resolve_strike(attacker: &mut Actor, targets: &mut [Actor]) -> usize {
    match attacker.swing.as_mut() {
        Some(swing) if !swing.resolved => {
            if attacker.animation.current_frame() < STRIKE_FRAME {
                return 0;
            }
            swing.resolved = true;
        }
        _ => return 0,
    }

    let mut landed = 0;
    for target in targets.iter_mut() {
        if !target.state().is_targetable()
            || distance(attacker.position, target.position) > attacker.stats.attack_range
            || !facing_cone(attacker, target)
        {
            continue;
        }
        target.receive_blow(attacker.stats.damage);
        landed += 1;
    }

    debug!("actor {} struck {} target(s)", attacker.id, landed);
    landed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::HeadlessAudio;
    use crate::game::characters::direction::Horizontal::{Left, Right};
    use crate::game::characters::direction::Vertical::{Down, Up};
    use crate::game::characters::state::ActorState;
    use crate::game::config::GameConfig;

    fn orc(id: u32, x: f32, y: f32) -> Actor {
        let mut audio = HeadlessAudio::new();
        Actor::orc(id, Vec2::new(x, y), &GameConfig::default(), &mut audio)
    }

    fn hero(x: f32, y: f32) -> Actor {
        let mut audio = HeadlessAudio::new();
        Actor::hero(0, Vec2::new(x, y), &GameConfig::default(), &mut audio)
    }

    /// Hero mid-swing toward `h`/`v`, already on the strike frame
    fn swinging_hero(x: f32, y: f32, h: Horizontal, v: Vertical) -> Actor {
        let mut audio = HeadlessAudio::new();
        let mut hero = hero(x, y);
        hero.facing.steer(Some(h), Some(v));
        hero.start_swing(&mut audio);
        hero.animation.set_frame(STRIKE_FRAME);
        hero
    }

    #[test]
    fn test_quadrant_windows() {
        assert!(quadrant_covers(Quadrant::RightUp, -45.0));
        assert!(quadrant_covers(Quadrant::RightUp, 20.0));
        assert!(!quadrant_covers(Quadrant::RightUp, 21.0));

        assert!(quadrant_covers(Quadrant::LeftUp, -135.0));
        assert!(quadrant_covers(Quadrant::LeftUp, 170.0));
        assert!(!quadrant_covers(Quadrant::LeftUp, 150.0));

        assert!(quadrant_covers(Quadrant::RightDown, 45.0));
        assert!(quadrant_covers(Quadrant::RightDown, -20.0));
        assert!(!quadrant_covers(Quadrant::RightDown, 120.0));

        assert!(quadrant_covers(Quadrant::LeftDown, 135.0));
        assert!(quadrant_covers(Quadrant::LeftDown, -170.0));
        assert!(!quadrant_covers(Quadrant::LeftDown, -150.0));
    }

    #[test]
    fn test_facing_cone_needs_attack_clip() {
        let attacker = hero(50.0, 50.0);
        let defender = orc(1, 55.0, 55.0);
        // Idling clip: no arc at all
        assert!(!facing_cone(&attacker, &defender));

        let attacker = swinging_hero(50.0, 50.0, Right, Down);
        assert!(facing_cone(&attacker, &defender));
        let behind = orc(2, 45.0, 45.0);
        assert!(!facing_cone(&attacker, &behind));
    }

    #[test]
    fn test_roughly_facing() {
        let mut chaser = orc(1, 50.0, 50.0);
        chaser.facing.steer(Some(Right), Some(Down));
        assert!(roughly_facing(&chaser, Vec2::new(60.0, 60.0)));
        assert!(!roughly_facing(&chaser, Vec2::new(40.0, 60.0)));
        assert!(!roughly_facing(&chaser, Vec2::new(60.0, 40.0)));

        // Inside the tolerance band
        assert!(roughly_facing(&chaser, Vec2::new(49.5, 49.5)));

        // No vertical intent never counts as facing
        chaser.facing.steer(Some(Right), None);
        assert!(!roughly_facing(&chaser, Vec2::new(60.0, 50.0)));
    }

    #[test]
    fn test_roughly_facing_vertical_asymmetry() {
        let mut chaser = orc(1, 50.0, 51.0);
        chaser.facing.steer(None, Some(Down));
        // cy <= ty + 1 holds at the edge for Down ...
        assert!(roughly_facing(&chaser, Vec2::new(50.0, 50.0)));

        chaser.position.y = 49.0;
        chaser.facing.steer(None, Some(Up));
        // ... while Up uses a strict comparison
        assert!(!roughly_facing(&chaser, Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn test_steer_toward() {
        let mut chaser = orc(1, 50.0, 50.0);
        steer_toward(&mut chaser, Vec2::new(30.0, 20.0));
        assert_eq!(chaser.facing.horizontal, Some(Left));
        assert_eq!(chaser.facing.vertical, Some(Up));
        assert_eq!(chaser.facing.last_vertical(), Up);
    }

    #[test]
    fn test_steer_toward_aligned_target() {
        let mut chaser = orc(1, 50.0, 50.0);
        chaser.facing.steer(Some(Right), Some(Up));
        steer_toward(&mut chaser, Vec2::new(30.0, 50.0));

        assert_eq!(chaser.facing.horizontal, Some(Left));
        assert_eq!(chaser.facing.vertical, Some(Down));
        assert_eq!(chaser.facing.last_vertical(), Up);
    }

    #[test]
    fn test_steer_skipped_when_roughly_facing() {
        let mut chaser = orc(1, 50.0, 50.0);
        chaser.facing.steer(Some(Right), Some(Down));
        steer_toward(&mut chaser, Vec2::new(50.5, 70.0));
        assert_eq!(chaser.facing.horizontal, Some(Right));
    }

    #[test]
    fn test_strike_lands_once_per_swing() {
        let mut attacker = swinging_hero(50.0, 50.0, Right, Down);
        let mut targets = vec![orc(1, 55.0, 55.0)];

        assert_eq!(resolve_strike(&mut attacker, &mut targets), 1);
        assert_eq!(targets[0].life, 20);

        // Same swing, target back on its feet: still no second blow
        targets[0].state_machine.transition(ActorState::Idle);
        for _ in 0..5 {
            assert_eq!(resolve_strike(&mut attacker, &mut targets), 0);
        }
        assert_eq!(targets[0].life, 20);
    }

    #[test]
    fn test_strike_waits_for_strike_frame() {
        let mut audio = HeadlessAudio::new();
        let mut attacker = hero(50.0, 50.0);
        attacker.start_swing(&mut audio);
        let mut targets = vec![orc(1, 55.0, 55.0)];

        assert_eq!(resolve_strike(&mut attacker, &mut targets), 0);
        assert_eq!(targets[0].life, 30);
        assert!(!attacker.swing.unwrap().resolved);
    }

    #[test]
    fn test_hit_and_dying_targets_are_skipped() {
        let mut attacker = swinging_hero(50.0, 50.0, Right, Down);
        let mut targets = vec![orc(1, 55.0, 55.0), orc(2, 54.0, 56.0), orc(3, 56.0, 54.0)];
        targets[0].state_machine.transition(ActorState::Hit);
        targets[1].state_machine.transition(ActorState::Die);

        assert_eq!(resolve_strike(&mut attacker, &mut targets), 1);
        assert_eq!(targets[0].life, 30);
        assert_eq!(targets[1].life, 30);
        assert_eq!(targets[2].life, 20);
        assert_eq!(targets[2].state(), ActorState::Hit);
    }

    #[test]
    fn test_strike_respects_reach() {
        let mut attacker = swinging_hero(50.0, 50.0, Right, Down);
        let mut targets = vec![orc(1, 70.0, 60.0)];
        assert_eq!(resolve_strike(&mut attacker, &mut targets), 0);
        assert_eq!(targets[0].life, 30);
    }
}
