use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::enums::SpriteKind;
use crate::world::EntityRef;

pub type HitFuture = BoxFuture<'static, ()>;

/// 히트 콜백. 대상이 이미 파괴됐을 수 있으니 살아 있는지는 콜백이 직접 확인한다.
pub type HitCallback = Arc<dyn Fn(EntityRef) -> HitFuture + Send + Sync>;

/// async 클로저를 `HitCallback` 으로 감싼다
pub fn hit_callback<F, Fut>(callback: F) -> HitCallback
where
    F: Fn(EntityRef) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |target| callback(target).boxed())
}

#[derive(Clone)]
pub struct HitRegistration {
    pub kind: SpriteKind,
    pub callback: HitCallback,
}

impl HitRegistration {
    pub fn new(kind: SpriteKind, callback: HitCallback) -> Self {
        Self { kind, callback }
    }
}

pub struct HitJob {
    pub target: EntityRef,
    pub callback: HitCallback,
}

/// 판정 루프에서 콜백 실행을 떼어 내는 채널
///
/// 판정 루프는 `dispatch` 로 작업을 보내기만 하고 기다리지 않는다. 워커 태스크가
/// 작업마다 별도 태스크를 띄우므로 느린 콜백이 다음 프레임이나 다른 콜백을 막지
/// 않는다. 보내는 순서는 등록 순서지만 끝나는 순서는 정해져 있지 않다.
#[derive(Clone)]
pub struct HitDispatcher {
    tx: mpsc::UnboundedSender<HitJob>,
    dispatched: Arc<AtomicU64>,
}

impl HitDispatcher {
    /// tokio 런타임 안에서 호출해야 한다
    pub fn spawn() -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<HitJob>();

        tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                tokio::spawn((job.callback)(job.target));
            }
            debug!("hit dispatcher closed");
        });

        Self {
            tx,
            dispatched: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn dispatch(&self, target: EntityRef, callback: HitCallback) {
        if self.tx.send(HitJob { target, callback }).is_err() {
            warn!("hit dispatcher is gone, dropping hit");
            return;
        }
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }
}
