// Facing and direction memory

use glam::Vec2;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Horizontal {
    Left,
    #[default]
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Vertical {
    Up,
    #[default]
    Down,
}

impl Horizontal {
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// -1 for left, 1 for right
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

impl Vertical {
    pub fn name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    /// -1 for up, 1 for down (screen space)
    pub fn sign(self) -> f32 {
        match self {
            Self::Up => -1.0,
            Self::Down => 1.0,
        }
    }
}

/// One of the eight roaming headings, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Heading {
    pub const ALL: [Heading; 8] = [
        Heading::North,
        Heading::NorthEast,
        Heading::East,
        Heading::SouthEast,
        Heading::South,
        Heading::SouthWest,
        Heading::West,
        Heading::NorthWest,
    ];

    /// Heading for a roll in `[0, 7]`; out-of-range rolls wrap
    pub fn from_roll(roll: i32) -> Self {
        Self::ALL[roll.rem_euclid(8) as usize]
    }

    /// Split into per-axis intent
    pub fn axes(self) -> (Option<Horizontal>, Option<Vertical>) {
        use Horizontal::{Left, Right};
        use Vertical::{Down, Up};
        match self {
            Self::North => (None, Some(Up)),
            Self::NorthEast => (Some(Right), Some(Up)),
            Self::East => (Some(Right), None),
            Self::SouthEast => (Some(Right), Some(Down)),
            Self::South => (None, Some(Down)),
            Self::SouthWest => (Some(Left), Some(Down)),
            Self::West => (Some(Left), None),
            Self::NorthWest => (Some(Left), Some(Up)),
        }
    }
}

/// The four swing quadrants an attack clip can face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    RightUp,
    LeftUp,
    RightDown,
    LeftDown,
}

impl Quadrant {
    /// Quadrant of an attack clip name, e.g. `attack_left_up`
    pub fn from_attack_clip(name: &str) -> Option<Self> {
        match name {
            "attack_right_up" => Some(Self::RightUp),
            "attack_left_up" => Some(Self::LeftUp),
            "attack_right_down" => Some(Self::RightDown),
            "attack_left_down" => Some(Self::LeftDown),
            _ => None,
        }
    }
}

/// Current intent per axis plus the last concrete value of each
///
/// The memory is what keeps clip names resolvable when an axis goes neutral.
/// A fresh facing remembers right and down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Facing {
    pub horizontal: Option<Horizontal>,
    pub vertical: Option<Vertical>,
    last_horizontal: Horizontal,
    last_vertical: Vertical,
}

impl Facing {
    pub fn last_horizontal(&self) -> Horizontal {
        self.last_horizontal
    }

    pub fn last_vertical(&self) -> Vertical {
        self.last_vertical
    }

    /// Horizontal used for clip names: intent, else memory
    pub fn resolved_horizontal(&self) -> Horizontal {
        self.horizontal.unwrap_or(self.last_horizontal)
    }

    /// Vertical used for clip names: intent, else memory
    pub fn resolved_vertical(&self) -> Vertical {
        self.vertical.unwrap_or(self.last_vertical)
    }

    /// Clip name for a state, e.g. `walk_left_down`
    pub fn clip(&self, state: &str) -> String {
        format!(
            "{}_{}_{}",
            state,
            self.resolved_horizontal().name(),
            self.resolved_vertical().name()
        )
    }

    /// Set the horizontal intent, remembering concrete values
    pub fn set_horizontal(&mut self, horizontal: Option<Horizontal>) {
        self.horizontal = horizontal;
        if let Some(h) = horizontal {
            self.last_horizontal = h;
        }
    }

    /// Set the vertical intent, remembering concrete values
    pub fn set_vertical(&mut self, vertical: Option<Vertical>) {
        self.vertical = vertical;
        if let Some(v) = vertical {
            self.last_vertical = v;
        }
    }

    /// Take a travel direction, keeping the memory of a neutral axis
    pub fn steer(&mut self, horizontal: Option<Horizontal>, vertical: Option<Vertical>) {
        self.set_horizontal(horizontal);
        self.set_vertical(vertical);
    }

    /// Take a travel direction, drawing purely sideways travel as down-facing
    ///
    /// The vertical memory resets to `Down` when only the horizontal axis is set.
    pub fn steer_side_on(&mut self, horizontal: Option<Horizontal>, vertical: Option<Vertical>) {
        self.steer(horizontal, vertical);
        if vertical.is_none() && horizontal.is_some() {
            self.last_vertical = Vertical::Down;
        }
    }

    /// Unit travel vector for the current intent (zero when neutral)
    pub fn travel(&self) -> Vec2 {
        let raw = Vec2::new(
            self.horizontal.map_or(0.0, Horizontal::sign),
            self.vertical.map_or(0.0, Vertical::sign),
        );
        raw.normalize_or_zero()
    }
}

/// Per-axis intent from a signed movement vector
pub fn axes_from_vector(movement: Vec2) -> (Option<Horizontal>, Option<Vertical>) {
    let horizontal = if movement.x > 0.0 {
        Some(Horizontal::Right)
    } else if movement.x < 0.0 {
        Some(Horizontal::Left)
    } else {
        None
    };
    let vertical = if movement.y > 0.0 {
        Some(Vertical::Down)
    } else if movement.y < 0.0 {
        Some(Vertical::Up)
    } else {
        None
    };
    (horizontal, vertical)
}
