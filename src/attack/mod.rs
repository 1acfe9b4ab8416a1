//! 공격 판정
//!
//! 빔(지속형)과 폭발(1회성) 두 가지 판정기, 판정 결과를 콜백으로 흘려보내는
//! 디스패처, 그리고 공격의 예열/발사/종료를 관리하는 `AttackRegistry` 로 이루어진다.
//! 보스의 분노 공격은 `AngerCooldown` 으로 한 번에 하나만 나간다.

pub mod beam;
pub mod blast;
pub mod checker;
pub mod cooldown;
pub mod dispatch;
pub mod object;
pub mod registry;

pub use beam::BeamChecker;
pub use blast::BlastChecker;
pub use checker::{AttackChecker, Checker, CheckerStatus};
pub use cooldown::AngerCooldown;
pub use dispatch::{hit_callback, HitCallback, HitDispatcher, HitFuture, HitRegistration};
pub use object::{AttackId, AttackObject};
pub use registry::AttackRegistry;
