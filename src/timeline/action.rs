use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::engine::VirtualTime;
use crate::enums::Direction;
use crate::exception::GameError;

/// 기록/재생되는 플레이어 입력
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    /// 세션 종료. 재생되면 고스트가 사라진다.
    Destroy,
}

impl Action {
    /// 이동 입력이면 방향
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            Self::Destroy => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
            Self::Left => write!(f, "left"),
            Self::Right => write!(f, "right"),
            Self::Destroy => write!(f, "destroy"),
        }
    }
}

impl FromStr for Action {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "destroy" => Ok(Self::Destroy),
            _ => Err(GameError::UnknownAction(s.to_string())),
        }
    }
}

/// 세션 시작 기준 경과 시간(ms)에 찍힌 입력 하나
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStamp {
    pub timestamp: VirtualTime,
    pub action: Action,
}

impl ActionStamp {
    pub fn new(timestamp: VirtualTime, action: Action) -> Self {
        Self { timestamp, action }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        assert_eq!("UP".parse::<Action>().unwrap(), Action::Up);
        assert_eq!(" destroy ".parse::<Action>().unwrap(), Action::Destroy);
        assert!(matches!(
            "jump".parse::<Action>(),
            Err(GameError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_direction_mapping() {
        assert_eq!(Action::from(Direction::Left), Action::Left);
        assert_eq!(Action::Down.direction(), Some(Direction::Down));
        assert_eq!(Action::Destroy.direction(), None);
    }
}
