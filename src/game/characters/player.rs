// Keyboard-driven hero behavior

use glam::Vec2;

use super::actor::{Actor, TickContext};
use super::combat::resolve_strike;
use super::direction::axes_from_vector;
use super::state::ActorState;
use crate::engine::input::{Action, Keyboard};

/// Net movement requested by the arrow keys (unnormalized)
pub fn movement_input(keyboard: &Keyboard) -> Vec2 {
    let mut movement = Vec2::ZERO;
    if keyboard.is_down(Action::MoveUp) {
        movement.y -= 1.0;
    }
    if keyboard.is_down(Action::MoveDown) {
        movement.y += 1.0;
    }
    if keyboard.is_down(Action::MoveLeft) {
        movement.x -= 1.0;
    }
    if keyboard.is_down(Action::MoveRight) {
        movement.x += 1.0;
    }
    movement
}

/// Whether the held arrows should start a walk
///
/// Any arrow counts, except exactly up+down or exactly left+right.
fn wants_to_walk(keyboard: &Keyboard) -> bool {
    let up = keyboard.is_down(Action::MoveUp);
    let down = keyboard.is_down(Action::MoveDown);
    let left = keyboard.is_down(Action::MoveLeft);
    let right = keyboard.is_down(Action::MoveRight);

    let any = up || down || left || right;
    let only_vertical_pair = up && down && !left && !right;
    let only_horizontal_pair = left && right && !up && !down;
    any && !only_vertical_pair && !only_horizontal_pair
}

/// Advance the hero by one tick; `enemies` are the strike targets
pub fn update(hero: &mut Actor, keyboard: &Keyboard, enemies: &mut [Actor], ctx: &mut TickContext) {
    match hero.state() {
        ActorState::Die => hero.update_die(ctx.dt, ctx.events),
        ActorState::Hit => hero.update_hit(),
        ActorState::Attack => attack(hero, enemies, ctx),
        ActorState::Walk => walk(hero, keyboard, ctx),
        // Orc-only states never reach the hero; treat them as standing still
        ActorState::Idle | ActorState::Chase | ActorState::ChooseDirection => idle(hero, keyboard),
    }
    hero.finish_tick(ctx.dt);
}

fn idle(hero: &mut Actor, keyboard: &Keyboard) {
    hero.state_machine.take_entry();
    if keyboard.just_pressed(Action::Attack) {
        hero.state_machine.transition(ActorState::Attack);
        return;
    }
    if wants_to_walk(keyboard) {
        hero.state_machine.transition(ActorState::Walk);
        return;
    }
    hero.state_machine.transition(ActorState::Idle);
    hero.play_state_clip(ActorState::Idle);
}

fn walk(hero: &mut Actor, keyboard: &Keyboard, ctx: &mut TickContext) {
    hero.state_machine.take_entry();
    if keyboard.just_pressed(Action::Attack) {
        hero.state_machine.transition(ActorState::Attack);
        return;
    }

    let movement = movement_input(keyboard);
    if movement == Vec2::ZERO {
        hero.state_machine.transition(ActorState::Idle);
        return;
    }

    let (horizontal, vertical) = axes_from_vector(movement);
    hero.facing.steer_side_on(horizontal, vertical);
    let speed = hero.stats.speed;
    hero.step(speed, ctx.dt, ctx.map);
    hero.play_state_clip(ActorState::Walk);
}

fn attack(hero: &mut Actor, enemies: &mut [Actor], ctx: &mut TickContext) {
    if hero.state_machine.take_entry() || !hero.swing_active() {
        hero.start_swing(ctx.audio);
        return;
    }

    resolve_strike(hero, enemies);

    if hero.animation.is_finished() {
        hero.swing = None;
        hero.state_machine.transition(ActorState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::audio::{AudioBackend, HeadlessAudio};
    use crate::game::characters::actor::ActorEvent;
    use crate::game::characters::direction::{Horizontal, Vertical};
    use crate::game::config::GameConfig;
    use crate::game::map::{walled_arena, TileMap};
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    struct Rig {
        map: TileMap,
        config: GameConfig,
        audio: HeadlessAudio,
        events: Vec<ActorEvent>,
    }

    impl Rig {
        fn new() -> Self {
            Self {
                map: TileMap::build(&walled_arena(16, 12)).unwrap(),
                config: GameConfig::default(),
                audio: HeadlessAudio::new(),
                events: Vec::new(),
            }
        }

        fn hero(&mut self, x: f32, y: f32) -> Actor {
            Actor::hero(0, Vec2::new(x, y), &self.config, &mut self.audio)
        }

        fn orc(&mut self, x: f32, y: f32) -> Actor {
            Actor::orc(1, Vec2::new(x, y), &self.config, &mut self.audio)
        }

        fn tick(&mut self, hero: &mut Actor, keyboard: &Keyboard, enemies: &mut [Actor]) {
            let mut ctx = TickContext {
                dt: DT,
                map: &self.map,
                config: &self.config,
                audio: &mut self.audio as &mut dyn AudioBackend,
                events: &mut self.events,
            };
            update(hero, keyboard, enemies, &mut ctx);
        }
    }

    #[test]
    fn test_walk_condition() {
        let walk = |actions: &[Action]| wants_to_walk(&Keyboard::with_pressed(actions));
        assert!(!walk(&[]));
        assert!(walk(&[Action::MoveLeft]));
        assert!(walk(&[Action::MoveUp, Action::MoveRight]));
        assert!(!walk(&[Action::MoveUp, Action::MoveDown]));
        assert!(!walk(&[Action::MoveLeft, Action::MoveRight]));
        assert!(walk(&[Action::MoveUp, Action::MoveDown, Action::MoveLeft]));
    }

    #[test]
    fn test_idle_to_walk_and_back() {
        let mut rig = Rig::new();
        let mut hero = rig.hero(60.0, 60.0);
        let held = Keyboard::with_pressed(&[Action::MoveRight]);

        rig.tick(&mut hero, &held, &mut []);
        assert_eq!(hero.state(), ActorState::Walk);
        assert_eq!(hero.position, Vec2::new(60.0, 60.0));

        rig.tick(&mut hero, &held, &mut []);
        assert_relative_eq!(hero.position.x, 60.0 + 5.0 * 10.0 * DT);
        assert_eq!(hero.animation.current_animation(), "walk_right_down");

        rig.tick(&mut hero, &Keyboard::new(), &mut []);
        assert_eq!(hero.state(), ActorState::Idle);
        rig.tick(&mut hero, &Keyboard::new(), &mut []);
        assert_eq!(hero.animation.current_animation(), "idle_right_down");
    }

    #[test]
    fn test_walk_updates_direction_memory() {
        let mut rig = Rig::new();
        let mut hero = rig.hero(60.0, 60.0);
        let up_left = Keyboard::with_pressed(&[Action::MoveUp, Action::MoveLeft]);
        for _ in 0..3 {
            rig.tick(&mut hero, &up_left, &mut []);
        }
        assert_eq!(hero.animation.current_animation(), "walk_left_up");

        let left = Keyboard::with_pressed(&[Action::MoveLeft]);
        rig.tick(&mut hero, &left, &mut []);
        assert_eq!(hero.facing.last_vertical(), Vertical::Down);
        assert_eq!(hero.animation.current_animation(), "walk_left_down");

        rig.tick(&mut hero, &Keyboard::new(), &mut []);
        rig.tick(&mut hero, &Keyboard::new(), &mut []);
        assert_eq!(hero.facing.last_horizontal(), Horizontal::Left);
        assert_eq!(hero.animation.current_animation(), "idle_left_down");
    }

    #[test]
    fn test_walk_into_wall_slides() {
        let mut rig = Rig::new();
        // Footprint already touches the west wall
        let mut hero = rig.hero(12.1, 60.0);
        let keys = Keyboard::with_pressed(&[Action::MoveLeft, Action::MoveDown]);
        for _ in 0..10 {
            rig.tick(&mut hero, &keys, &mut []);
        }
        assert!(hero.position.x >= 12.0);
        assert!(hero.position.y > 60.0);
    }

    #[test]
    fn test_attack_swings_once_and_returns_to_idle() {
        let mut rig = Rig::new();
        let mut hero = rig.hero(60.0, 60.0);
        let mut enemies = vec![rig.orc(65.0, 65.0)];
        let press = Keyboard::with_pressed(&[Action::Attack]);

        rig.tick(&mut hero, &press, &mut enemies);
        assert_eq!(hero.state(), ActorState::Attack);
        rig.tick(&mut hero, &Keyboard::new(), &mut enemies);
        assert!(hero.swing_active());
        assert_eq!(rig.audio.plays_of("punch"), 1);

        for _ in 0..60 {
            rig.tick(&mut hero, &Keyboard::new(), &mut enemies);
        }
        assert_eq!(hero.state(), ActorState::Idle);
        assert!(!hero.swing_active());
        assert_eq!(enemies[0].life, 20);
        assert_eq!(enemies[0].state(), ActorState::Hit);
    }

    #[test]
    fn test_attack_misses_behind() {
        let mut rig = Rig::new();
        let mut hero = rig.hero(60.0, 60.0);
        let mut enemies = vec![rig.orc(52.0, 60.0)];
        let press = Keyboard::with_pressed(&[Action::Attack]);
        rig.tick(&mut hero, &press, &mut enemies);
        for _ in 0..60 {
            rig.tick(&mut hero, &Keyboard::new(), &mut enemies);
        }
        assert_eq!(enemies[0].life, 30);
    }

    #[test]
    fn test_attack_key_held_does_not_repeat() {
        let mut rig = Rig::new();
        let mut hero = rig.hero(60.0, 60.0);
        let mut keyboard = Keyboard::with_pressed(&[Action::Attack]);
        rig.tick(&mut hero, &keyboard, &mut []);
        keyboard.end_frame();
        for _ in 0..90 {
            rig.tick(&mut hero, &keyboard, &mut []);
        }
        assert_eq!(hero.state(), ActorState::Idle);
        assert_eq!(rig.audio.plays_of("punch"), 1);
    }
}
