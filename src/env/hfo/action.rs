/// Number of selectable action kinds in [`HybridAction::kind`].
pub const NUM_ACTION_KINDS: usize = 5;

/// A single command for the controlled player.
///
/// `NoOp` and `Quit` are never produced from agent input; the environment
/// issues them itself while resetting and tearing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Dash { power: f32, direction: f32 },
    Turn { direction: f32 },
    Kick { power: f32, direction: f32 },
    Tackle { direction: f32 },
    Catch,
    NoOp,
    Quit,
}

impl Action {
    /// HFO's native `action_t` value.
    pub fn code(&self) -> i32 {
        match self {
            Action::Dash { .. } => 0,
            Action::Turn { .. } => 1,
            Action::Tackle { .. } => 2,
            Action::Kick { .. } => 3,
            Action::Catch => 12,
            Action::NoOp => 13,
            Action::Quit => 14,
        }
    }

    pub fn params(&self) -> Vec<f32> {
        match *self {
            Action::Dash { power, direction } | Action::Kick { power, direction } => {
                vec![power, direction]
            }
            Action::Turn { direction } | Action::Tackle { direction } => vec![direction],
            Action::Catch | Action::NoOp | Action::Quit => vec![],
        }
    }
}

/// The action tuple as an agent produces it: a selector plus one
/// parameter block per parameterised kind.
///
/// | kind | action | block read |
/// |------|--------|------------|
/// | 0 | dash | `dash` (power, direction) |
/// | 1 | turn | `turn` (direction) |
/// | 2 | kick | `kick` (power, direction) |
/// | 3 | tackle | `tackle` |
/// | 4 | catch | none |
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HybridAction {
    pub kind: usize,
    pub dash: [f32; 2],
    pub turn: [f32; 1],
    pub kick: [f32; 2],
    pub tackle: [f32; 1],
}

impl HybridAction {
    /// Picks the command named by `kind`. Blocks other than the selected
    /// one are ignored and no parameter is range-checked.
    pub fn decode(&self) -> Option<Action> {
        match self.kind {
            0 => Some(Action::Dash {
                power: self.dash[0],
                direction: self.dash[1],
            }),
            1 => Some(Action::Turn {
                direction: self.turn[0],
            }),
            2 => Some(Action::Kick {
                power: self.kick[0],
                direction: self.kick[1],
            }),
            3 => Some(Action::Tackle {
                direction: self.tackle[0],
            }),
            4 => Some(Action::Catch),
            _ => None,
        }
    }
}

impl From<(usize, [f32; 2], [f32; 1], [f32; 2], [f32; 1])> for HybridAction {
    fn from(value: (usize, [f32; 2], [f32; 1], [f32; 2], [f32; 1])) -> Self {
        Self {
            kind: value.0,
            dash: value.1,
            turn: value.2,
            kick: value.3,
            tackle: value.4,
        }
    }
}
