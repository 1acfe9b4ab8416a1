use std::fmt::Write as _;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::action::{Action, ActionStamp};
use crate::engine::VirtualTime;
use crate::exception::GameError;

/// 진행 중인 세션의 입력 기록. 추가만 할 수 있다.
///
/// 타임스탬프는 감소하지 않는다. 이전보다 작은 값이 들어오면 직전 값으로 맞춘다.
#[derive(Debug)]
pub struct ActionLog {
    session: usize,
    actions: Vec<ActionStamp>,
}

impl ActionLog {
    pub fn new(session: usize) -> Self {
        Self {
            session,
            actions: Vec::new(),
        }
    }

    pub fn session(&self) -> usize {
        self.session
    }

    pub fn record(&mut self, action: Action, timestamp: VirtualTime) {
        let last = self.actions.last().map(|stamp| stamp.timestamp).unwrap_or(0);
        let timestamp = if timestamp < last {
            warn!(
                "session {}: timestamp {} went backwards (last {}), clamping",
                self.session, timestamp, last
            );
            last
        } else {
            timestamp
        };
        self.actions.push(ActionStamp::new(timestamp, action));
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// 세션 종료. 이후로는 읽기 전용이다.
    pub fn archive(self) -> ArchivedLog {
        debug!(
            "session {} archived with {} action(s)",
            self.session,
            self.actions.len()
        );
        ArchivedLog {
            session: self.session,
            actions: self.actions.into(),
        }
    }
}

#[derive(Serialize)]
struct LogView<'a> {
    session: usize,
    actions: &'a [ActionStamp],
}

#[derive(Deserialize)]
struct OwnedLog {
    session: usize,
    actions: Vec<ActionStamp>,
}

/// 끝난 세션의 읽기 전용 기록. 복제해도 내용은 공유된다.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchivedLog {
    session: usize,
    actions: Arc<[ActionStamp]>,
}

impl ArchivedLog {
    pub fn session(&self) -> usize {
        self.session
    }

    pub fn actions(&self) -> &[ActionStamp] {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// `ts:action;` 형식 텍스트
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for stamp in self.actions.iter() {
            let _ = write!(out, "{}:{};", stamp.timestamp, stamp.action);
        }
        out
    }

    pub fn to_json_string(&self) -> Result<String, GameError> {
        Ok(serde_json::to_string(&self.view())?)
    }

    pub fn from_json_str(json: &str) -> Result<Self, GameError> {
        let owned: OwnedLog = serde_json::from_str(json)?;
        Ok(Self::from_owned(owned))
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.view())?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let reader = BufReader::new(File::open(path)?);
        let owned: OwnedLog = serde_json::from_reader(reader)?;
        Ok(Self::from_owned(owned))
    }

    fn view(&self) -> LogView<'_> {
        LogView {
            session: self.session,
            actions: &self.actions,
        }
    }

    fn from_owned(owned: OwnedLog) -> Self {
        Self {
            session: owned.session,
            actions: owned.actions.into(),
        }
    }
}

/// 끝난 세션 기록 전체. 세션 순서대로 쌓인다.
#[derive(Debug, Clone, Default)]
pub struct TimelineArchive {
    logs: Vec<ArchivedLog>,
}

impl TimelineArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, log: ArchivedLog) {
        self.logs.push(log);
    }

    pub fn len(&self) -> usize {
        self.logs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.logs.is_empty()
    }

    pub fn logs(&self) -> &[ArchivedLog] {
        &self.logs
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchivedLog> {
        self.logs.iter()
    }

    /// 세션마다 한 줄
    pub fn dump(&self) -> String {
        self.logs
            .iter()
            .map(|log| format!("#{} {}", log.session(), log.dump()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
