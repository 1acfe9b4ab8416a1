use std::fmt;
use std::sync::Weak;

use super::registry::AttackRegistry;

/// 공격 아레나 슬롯 식별자. 슬롯이 재사용되면 세대가 올라간다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttackId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

/// 진행 중인 공격 하나에 대한 핸들
///
/// 체커나 표시를 소유하지 않는다. 레지스트리가 사라졌거나 공격이 이미 끝났으면
/// 모든 호출이 아무 일도 하지 않는다.
#[derive(Clone)]
pub struct AttackObject {
    id: AttackId,
    registry: Weak<AttackRegistry>,
}

impl AttackObject {
    pub(crate) fn new(id: AttackId, registry: Weak<AttackRegistry>) -> Self {
        Self { id, registry }
    }

    pub fn id(&self) -> AttackId {
        self.id
    }

    /// 체커를 멈추고 표시를 내린다. 실제로 멈췄으면 true.
    pub fn stop_at_once(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.retire(self.id),
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .map(|registry| registry.is_live(self.id))
            .unwrap_or(false)
    }
}

impl fmt::Debug for AttackObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackObject").field("id", &self.id).finish()
    }
}
