use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::enums::constant::*;
use crate::exception::GameError;

/// 게임 밸런스 설정 전체
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameBalanceConfig {
    pub arena: ArenaConfig,
    pub attack: AttackConfig,
    pub replay: ReplayConfig,
    pub frame: FrameConfig,
}

/// 화면(아레나) 크기. 빔은 이 경계까지 뻗는다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
}

/// 공격 타이밍 설정 (단위: ms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackConfig {
    pub laser_grace_ms: u64,
    pub blast_display_ms: u64,
    pub debris_speed: f32,
    pub debris_lifespan_ms: u64,
}

/// 고스트 리플레이 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayConfig {
    pub ghost_speed: f32,
    pub ghost_spawn_x: f32,
    /// 파괴된 우주 수가 이 값 이하일 때만 고스트가 작별 인사를 남긴다
    pub farewell_universe_limit: u32,
    pub ghost_fire_period_ms: u64,
    pub projectile_speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    pub step_ms: u64,
}

impl ArenaConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(GameError::InvalidConfig(format!(
                "arena must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

impl ReplayConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.ghost_speed < 0.0 {
            return Err(GameError::InvalidConfig(format!(
                "replay.ghost_speed: {} (must be >= 0)",
                self.ghost_speed
            )));
        }
        if self.ghost_fire_period_ms == 0 {
            return Err(GameError::InvalidConfig(
                "replay.ghost_fire_period_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 전역 게임 밸런스 설정 인스턴스
static GAME_BALANCE: Lazy<GameBalanceConfig> = Lazy::new(|| {
    GameBalanceConfig::load().unwrap_or_else(|e| {
        tracing::warn!("Failed to load game balance config: {}. Using defaults.", e);
        GameBalanceConfig::default()
    })
});

impl GameBalanceConfig {
    /// 전역 설정 인스턴스 가져오기
    pub fn global() -> &'static GameBalanceConfig {
        &GAME_BALANCE
    }

    /// 설정 파일 로드
    pub fn load() -> Result<Self, GameError> {
        let config_path = Self::find_config_file()?;
        Self::load_from(&config_path)
    }

    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let config_content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&config_content)?;

        tracing::info!("Game balance config loaded from: {:?}", path.as_ref());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, GameError> {
        let config: GameBalanceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        self.arena.validate()?;
        self.replay.validate()?;
        if self.frame.step_ms == 0 {
            return Err(GameError::InvalidConfig(
                "frame.step_ms must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// 설정 파일 위치 찾기
    fn find_config_file() -> Result<PathBuf, GameError> {
        // 1. 환경 변수로 지정된 경로
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            tracing::warn!("{} points to a missing file: {:?}", CONFIG_PATH_ENV, path);
        }

        // 2. 현재 작업 디렉토리
        let cwd_config = std::env::current_dir()?.join(GAME_BALANCE_TOML_PATH);
        if cwd_config.exists() {
            return Ok(cwd_config);
        }

        // 3. 실행 파일 위치 기준
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let exe_config = exe_dir.join(GAME_BALANCE_TOML_PATH);
                if exe_config.exists() {
                    return Ok(exe_config);
                }
            }
        }

        Err(GameError::ConfigNotFound)
    }
}

impl Default for GameBalanceConfig {
    fn default() -> Self {
        Self {
            arena: ArenaConfig {
                width: ARENA_WIDTH,
                height: ARENA_HEIGHT,
            },
            attack: AttackConfig {
                laser_grace_ms: LASER_GRACE_MS,
                blast_display_ms: BLAST_DISPLAY_MS,
                debris_speed: DEBRIS_SPEED,
                debris_lifespan_ms: DEBRIS_LIFESPAN_MS,
            },
            replay: ReplayConfig {
                ghost_speed: GHOST_SPEED,
                ghost_spawn_x: GHOST_SPAWN_X,
                farewell_universe_limit: FAREWELL_UNIVERSE_LIMIT,
                ghost_fire_period_ms: GHOST_FIRE_PERIOD_MS,
                projectile_speed: PROJECTILE_SPEED,
            },
            frame: FrameConfig {
                step_ms: FRAME_STEP_MS,
            },
        }
    }
}

/// 편의 헬퍼 함수들
pub mod balance {
    use super::GameBalanceConfig;

    pub fn arena() -> &'static super::ArenaConfig {
        &GameBalanceConfig::global().arena
    }

    pub fn attack() -> &'static super::AttackConfig {
        &GameBalanceConfig::global().attack
    }

    pub fn replay() -> &'static super::ReplayConfig {
        &GameBalanceConfig::global().replay
    }
}
