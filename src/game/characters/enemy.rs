// Orc behavior: roaming, chasing and swinging at the hero

use std::slice;

use super::actor::{Actor, TickContext};
use super::combat::{resolve_strike, steer_toward};
use super::direction::Heading;
use super::state::ActorState;
use crate::core::math::distance;
use crate::engine::random::RandomSource;

/// Per-mille chance, each idle tick, to start roaming
const WANDER_CHANCE: i32 = 10;
/// Per-mille chance, each walking tick, to turn (then, separately, to stop)
const TURN_CHANCE: i32 = 5;
const STOP_CHANCE: i32 = 5;

fn roll_per_mille(rng: &mut dyn RandomSource) -> i32 {
    rng.random_in_range(0, 1000)
}

/// Advance one orc by one tick against the hero
pub fn update(
    orc: &mut Actor,
    hero: &mut Actor,
    rng: &mut dyn RandomSource,
    ctx: &mut TickContext,
) {
    let reach = distance(orc.position, hero.position);

    match orc.state() {
        ActorState::Die => orc.update_die(ctx.dt, ctx.events),
        ActorState::Hit => orc.update_hit(),
        ActorState::Attack => attack(orc, hero, reach, ctx),
        ActorState::Chase => chase(orc, hero, reach, ctx),
        ActorState::Walk => walk(orc, reach, rng, ctx),
        ActorState::ChooseDirection => choose_direction(orc, reach, rng, ctx),
        ActorState::Idle => idle(orc, reach, rng, ctx),
    }
    orc.finish_tick(ctx.dt);
}

fn idle(orc: &mut Actor, reach: f32, rng: &mut dyn RandomSource, ctx: &TickContext) {
    orc.state_machine.take_entry();
    if reach <= ctx.config.orc_chase_range {
        orc.state_machine.transition(ActorState::Chase);
        return;
    }
    if roll_per_mille(rng) <= WANDER_CHANCE {
        orc.state_machine.transition(ActorState::Walk);
        return;
    }
    orc.play_state_clip(ActorState::Idle);
}

fn walk(orc: &mut Actor, reach: f32, rng: &mut dyn RandomSource, ctx: &TickContext) {
    orc.state_machine.take_entry();
    if reach <= ctx.config.orc_chase_range {
        orc.state_machine.transition(ActorState::Chase);
        return;
    }
    if roll_per_mille(rng) <= TURN_CHANCE {
        orc.state_machine.transition(ActorState::ChooseDirection);
        return;
    }
    if roll_per_mille(rng) <= STOP_CHANCE {
        orc.state_machine.transition(ActorState::Idle);
        return;
    }

    let walked = orc.step(ctx.config.orc_speed, ctx.dt, ctx.map);
    orc.play_state_clip(ActorState::Walk);
    if !walked {
        orc.state_machine.transition(ActorState::ChooseDirection);
    }
}

fn choose_direction(orc: &mut Actor, reach: f32, rng: &mut dyn RandomSource, ctx: &TickContext) {
    orc.state_machine.take_entry();
    let heading = Heading::from_roll(rng.random_in_range(0, 7));
    let (horizontal, vertical) = heading.axes();
    // Heading west keeps the vertical memory, heading east faces down
    if heading == Heading::East {
        orc.facing.steer_side_on(horizontal, vertical);
    } else {
        orc.facing.steer(horizontal, vertical);
    }

    let next = if reach <= ctx.config.orc_chase_range {
        ActorState::Chase
    } else {
        ActorState::Walk
    };
    orc.state_machine.transition(next);
}

fn chase(orc: &mut Actor, hero: &Actor, reach: f32, ctx: &TickContext) {
    orc.state_machine.take_entry();
    if reach <= orc.stats.attack_range {
        if let Some(brain) = orc.brain_mut() {
            brain.attack_cooldown = 0.0;
        }
        orc.state_machine.transition(ActorState::Attack);
        return;
    }
    if reach > ctx.config.orc_chase_range {
        orc.state_machine.transition(ActorState::Idle);
        return;
    }

    steer_toward(orc, hero.position);
    if !orc.animation.current_animation().starts_with("walk") {
        orc.restart_state_clip(ActorState::Walk);
    }
    orc.step(ctx.config.orc_chase_speed, ctx.dt, ctx.map);
    orc.play_state_clip(ActorState::Walk);
}

fn attack(orc: &mut Actor, hero: &mut Actor, reach: f32, ctx: &mut TickContext) {
    if orc.state_machine.take_entry() {
        orc.swing = None;
    }
    if let Some(brain) = orc.brain_mut() {
        brain.attack_cooldown -= ctx.dt;
    }

    if !orc.swing_active() {
        try_swing(orc, hero, ctx);
        return;
    }

    resolve_strike(orc, slice::from_mut(hero));

    if orc.animation.is_finished() {
        orc.swing = None;
        if reach <= orc.stats.attack_range {
            try_swing(orc, hero, ctx);
        } else {
            orc.state_machine.transition(ActorState::Idle);
        }
    }
}

/// Start a swing when the cooldown allows it, otherwise stand guard
fn try_swing(orc: &mut Actor, hero: &Actor, ctx: &mut TickContext) {
    let ready = orc.brain().is_none_or(|brain| brain.attack_cooldown <= 0.0);
    if !ready {
        orc.play_state_clip(ActorState::Idle);
        return;
    }

    if let Some(brain) = orc.brain_mut() {
        brain.attack_cooldown = ctx.config.orc_attack_cooldown;
    }
    steer_toward(orc, hero.position);
    orc.start_swing(ctx.audio);
}
