// Actor state machine

/// Represents the current state of an actor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActorState {
    /// Standing still
    #[default]
    Idle,
    /// Moving along the current intent
    Walk,
    /// Swinging at targets in front
    Attack,
    /// Recoiling from a blow
    Hit,
    /// Dying, then lying dead
    Die,
    /// Picking a new roaming heading (orcs only)
    ChooseDirection,
    /// Closing in on the hero (orcs only)
    Chase,
}

impl ActorState {
    /// Check if the actor can be struck
    pub fn is_targetable(&self) -> bool {
        !matches!(self, Self::Hit | Self::Die)
    }

    /// Clip prefix for this state
    pub fn animation_prefix(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Walk | Self::Chase | Self::ChooseDirection => "walk",
            Self::Attack => "attack",
            Self::Hit => "hit",
            Self::Die => "die",
        }
    }
}

/// State machine that tracks actor state transitions
///
/// A transition leaves an entry pending; the state handler consumes it with
/// `take_entry` to run its on-entry work exactly once, even when the same
/// state is forced again.
#[derive(Debug, Clone)]
pub struct ActorStateMachine {
    current_state: ActorState,
    entry_pending: bool,
}

impl Default for ActorStateMachine {
    fn default() -> Self {
        Self::new(ActorState::Idle)
    }
}

impl ActorStateMachine {
    pub fn new(initial: ActorState) -> Self {
        Self {
            current_state: initial,
            entry_pending: true,
        }
    }

    /// Get the current state
    pub fn state(&self) -> ActorState {
        self.current_state
    }

    /// Transition to a new state
    pub fn transition(&mut self, new_state: ActorState) {
        if self.current_state != new_state {
            self.force_transition(new_state);
        }
    }

    /// Force transition even to the same state (re-arms the entry)
    pub fn force_transition(&mut self, new_state: ActorState) {
        log::debug!("state {:?} -> {:?}", self.current_state, new_state);
        self.current_state = new_state;
        self.entry_pending = true;
    }

    /// Consume the pending entry; true once per transition
    pub fn take_entry(&mut self) -> bool {
        std::mem::replace(&mut self.entry_pending, false)
    }
}
