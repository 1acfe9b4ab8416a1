use std::fmt;

use super::beam::BeamChecker;
use super::blast::BlastChecker;
use super::dispatch::{HitCallback, HitDispatcher, HitRegistration};
use crate::enums::SpriteKind;
use crate::world::{EntityRef, EntityRegistry};

/// 체커 상태. CREATED → STARTED → STOPPED 순서로만 움직인다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckerStatus {
    Created,
    Started,
    Stopped,
}

impl fmt::Display for CheckerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "CREATED"),
            Self::Started => write!(f, "STARTED"),
            Self::Stopped => write!(f, "STOPPED"),
        }
    }
}

/// 빔/폭발 체커가 공유하는 히트 등록 인터페이스
pub trait AttackChecker {
    fn register_hit(&mut self, kind: SpriteKind, callback: HitCallback);

    fn registrations(&self) -> &[HitRegistration];
}

pub enum Checker {
    Beam(BeamChecker),
    Blast(BlastChecker),
}

impl Checker {
    /// 더 이상 판정하지 않게 만든다. 여러 번 불러도 된다.
    pub fn stop(&mut self) {
        match self {
            Self::Beam(beam) => beam.stop(),
            Self::Blast(blast) => blast.disarm(),
        }
    }

    pub fn as_beam(&self) -> Option<&BeamChecker> {
        match self {
            Self::Beam(beam) => Some(beam),
            Self::Blast(_) => None,
        }
    }
}

/// 등록 순서대로 후보를 훑어 `is_hit` 이 true 인 대상마다 콜백을 보낸다.
///
/// 충돌하지 않는 대상(고스트, 카메라 고정)은 `is_hit` 에 넘기기 전에 걸러진다.
pub(crate) fn scan_targets<F>(
    registrations: &[HitRegistration],
    scene: &dyn EntityRegistry,
    dispatcher: &HitDispatcher,
    mut is_hit: F,
) -> usize
where
    F: FnMut(&EntityRef) -> bool,
{
    let mut hits = 0;
    for registration in registrations {
        for candidate in scene.all_of_kind(registration.kind) {
            if candidate.flags().is_non_interactive() {
                continue;
            }
            if is_hit(&candidate) {
                dispatcher.dispatch(candidate, registration.callback.clone());
                hits += 1;
            }
        }
    }
    hits
}
