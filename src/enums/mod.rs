pub mod constant;

use std::fmt::Display;
use std::str::FromStr;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::exception::GameError;

/// 엔티티 분류. 히트 콜백은 이 단위로 등록된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Projectile,
    Boss,
    EnemyProjectile,
    TimeTravelPlayer,
    Explosion,
}

impl Display for SpriteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Player => write!(f, "Player"),
            Self::Projectile => write!(f, "Projectile"),
            Self::Boss => write!(f, "Boss"),
            Self::EnemyProjectile => write!(f, "EnemyProjectile"),
            Self::TimeTravelPlayer => write!(f, "TimeTravelPlayer"),
            Self::Explosion => write!(f, "Explosion"),
        }
    }
}

/// 빔 공격 방향. 화면 좌표계라 y 는 아래로 증가한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Right,
    Left,
    Up,
    Down,
}

impl Direction {
    pub fn unit(self) -> Vec2 {
        match self {
            Self::Right => Vec2::new(1.0, 0.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Up => Vec2::new(0.0, -1.0),
            Self::Down => Vec2::new(0.0, 1.0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Right => write!(f, "right"),
            Self::Left => write!(f, "left"),
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" => Ok(Self::Right),
            "left" => Ok(Self::Left),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}
