use once_cell::sync::OnceCell;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

pub mod animation;
pub mod attack;
pub mod config;
pub mod engine;
pub mod enums;
pub mod exception;
pub mod geometry;
pub mod session;
pub mod timeline;
pub mod world;

static GUARD: OnceCell<WorkerGuard> = OnceCell::new();

/// 시간 단위로 회전하는 `logs/app.log` 에 로그를 남긴다. 여러 번 불러도 한 번만 설치된다.
pub fn setup_logger() {
    GUARD.get_or_init(|| {
        let file_appender = RollingFileAppender::new(Rotation::HOURLY, "logs", "app.log");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        let installed = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
            .with_thread_ids(true)
            .with_ansi(false)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_target(false)
            .with_writer(non_blocking)
            .pretty()
            .try_init();
        if let Err(e) = installed {
            eprintln!("logger already installed: {}", e);
        }

        guard
    });
}

pub trait LogExt<T, E> {
    fn log_ok(self, f: impl FnOnce(&T)) -> Self;
    fn log_err(self, f: impl FnOnce(&E)) -> Self;
}

impl<T, E> LogExt<T, E> for Result<T, E> {
    fn log_ok(self, f: impl FnOnce(&T)) -> Self {
        if let Ok(ref value) = self {
            f(value);
        }
        self
    }

    fn log_err(self, f: impl FnOnce(&E)) -> Self {
        if let Err(ref e) = self {
            f(e);
        }
        self
    }
}
