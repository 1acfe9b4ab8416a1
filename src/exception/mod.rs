use std::fmt;

use crate::attack::CheckerStatus;

/// 라이브러리 전체에서 쓰는 에러 타입
///
/// 게임플레이 경로(충돌 판정, 리플레이)는 실패하지 않는다. 여기 있는 에러는
/// 설정 로딩, 파일 입출력, 문자열 파싱, 사용 중인 체커 재정의 같은 경계 지점에서만 발생한다.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("config file not found")]
    ConfigNotFound,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error("checker cannot be redefined while {0}")]
    CheckerBusy(CheckerStatus),
    #[error("unknown direction: {0}")]
    UnknownDirection(String),
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("failed to serialize timeline: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl GameError {
    /// 로그용 짧은 코드
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::ConfigNotFound => ErrorCode::ConfigNotFound,
            Self::ConfigParse(_) | Self::InvalidConfig(_) => ErrorCode::InvalidConfig,
            Self::Io(_) => ErrorCode::IoFailed,
            Self::CheckerBusy(_) => ErrorCode::CheckerBusy,
            Self::UnknownDirection(_) | Self::UnknownAction(_) => ErrorCode::ParseError,
            Self::Serialize(_) => ErrorCode::SerializeFailed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ConfigNotFound,
    InvalidConfig,
    CheckerBusy,
    ParseError,
    SerializeFailed,
    IoFailed,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigNotFound => write!(f, "CONFIG_NOT_FOUND"),
            Self::InvalidConfig => write!(f, "INVALID_CONFIG"),
            Self::CheckerBusy => write!(f, "CHECKER_BUSY"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::SerializeFailed => write!(f, "SERIALIZE_FAILED"),
            Self::IoFailed => write!(f, "IO_FAILED"),
        }
    }
}
