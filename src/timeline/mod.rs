//! 세션 입력 기록과 고스트 재생

pub mod action;
pub mod ghost;
pub mod log;
pub mod replayer;

pub use action::{Action, ActionStamp};
pub use ghost::{GhostActor, ReplayActor};
pub use log::{ActionLog, ArchivedLog, TimelineArchive};
pub use replayer::TimelineReplayer;
