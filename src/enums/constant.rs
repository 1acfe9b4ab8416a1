//! 설정 파일이 없을 때 쓰는 기본값들

pub const GAME_BALANCE_TOML_PATH: &str = "config/game_balance.toml";
pub const CONFIG_PATH_ENV: &str = "TIMELINE_STRIKE_CONFIG";

pub const ARENA_WIDTH: f32 = 160.0;
pub const ARENA_HEIGHT: f32 = 120.0;

/// 예열이 끝난 뒤 실제 판정이 켜지기까지의 유예 시간
pub const LASER_GRACE_MS: u64 = 500;
pub const BLAST_DISPLAY_MS: u64 = 1000;
pub const DEBRIS_SPEED: f32 = 50.0;
pub const DEBRIS_LIFESPAN_MS: u64 = 5000;

pub const GHOST_SPEED: f32 = 50.0;
pub const GHOST_SPAWN_X: f32 = 32.0;
pub const FAREWELL_UNIVERSE_LIMIT: u32 = 2;
pub const GHOST_FIRE_PERIOD_MS: u64 = 500;
pub const PROJECTILE_SPEED: f32 = 100.0;

pub const FRAME_STEP_MS: u64 = 20;

pub const COLOR_CLEAR: u8 = 0;
pub const COLOR_INNER: u8 = 1;
pub const COLOR_OUTER: u8 = 2;
