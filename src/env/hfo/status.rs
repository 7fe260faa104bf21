use std::fmt;

use crate::env::hfo::client::ClientError;

/// Game status reported by the simulator after every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    InGame,
    ServerDown,
    Goal,
    OutOfBounds,
    OutOfTime,
    CapturedByDefense,
}

/// Native status codes as defined by HFO's `status_t`.
const NATIVE_CODES: [(i32, Status); 6] = [
    (0, Status::InGame),
    (1, Status::Goal),
    (2, Status::CapturedByDefense),
    (3, Status::OutOfBounds),
    (4, Status::OutOfTime),
    (5, Status::ServerDown),
];

impl Status {
    pub const ALL: [Status; 6] = [
        Status::InGame,
        Status::ServerDown,
        Status::Goal,
        Status::OutOfBounds,
        Status::OutOfTime,
        Status::CapturedByDefense,
    ];

    pub fn from_code(code: i32) -> Result<Self, ClientError> {
        NATIVE_CODES
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, status)| *status)
            .ok_or(ClientError::UnknownStatus(code))
    }

    pub fn code(&self) -> i32 {
        NATIVE_CODES
            .iter()
            .find(|(_, status)| status == self)
            .map(|(c, _)| *c)
            .unwrap_or_default()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Status::InGame => "IN_GAME",
            Status::ServerDown => "SERVER_DOWN",
            Status::Goal => "GOAL",
            Status::OutOfBounds => "OUT_OF_BOUNDS",
            Status::OutOfTime => "OUT_OF_TIME",
            Status::CapturedByDefense => "CAPTURED_BY_DEFENSE",
        }
    }

    /// Reward from the goalie's point of view: conceding is punished, any
    /// other way the trial ends is a save.
    pub fn reward(&self) -> f32 {
        match self {
            Status::Goal => -1.0,
            Status::OutOfBounds | Status::OutOfTime | Status::CapturedByDefense => 1.0,
            Status::InGame | Status::ServerDown => 0.0,
        }
    }

    pub fn is_episode_over(&self) -> bool {
        *self != Status::InGame
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod test {
    use assert_approx_eq::assert_approx_eq;

    use super::Status;
    use crate::env::hfo::client::ClientError;

    #[test]
    fn test_reward_table() {
        assert_approx_eq!(Status::Goal.reward(), -1.0);
        assert_approx_eq!(Status::OutOfBounds.reward(), 1.0);
        assert_approx_eq!(Status::OutOfTime.reward(), 1.0);
        assert_approx_eq!(Status::CapturedByDefense.reward(), 1.0);
        assert_approx_eq!(Status::InGame.reward(), 0.0);
        assert_approx_eq!(Status::ServerDown.reward(), 0.0);
    }

    #[test]
    fn test_episode_over_iff_not_in_game() {
        for status in Status::ALL {
            assert_eq!(status.is_episode_over(), status != Status::InGame);
        }
    }

    #[test]
    fn test_native_codes_round_trip() {
        for status in Status::ALL {
            assert_eq!(Status::from_code(status.code()).unwrap(), status);
        }

        assert_eq!(Status::from_code(1).unwrap(), Status::Goal);
        assert_eq!(Status::from_code(5).unwrap(), Status::ServerDown);
    }

    #[test]
    fn test_unknown_code() {
        assert!(matches!(
            Status::from_code(42),
            Err(ClientError::UnknownStatus(42))
        ));
    }

    #[test]
    fn test_names() {
        let names: Vec<_> = Status::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "IN_GAME",
                "SERVER_DOWN",
                "GOAL",
                "OUT_OF_BOUNDS",
                "OUT_OF_TIME",
                "CAPTURED_BY_DEFENSE"
            ]
        );
    }
}
