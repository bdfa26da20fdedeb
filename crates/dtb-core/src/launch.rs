use std::{future::Future, sync::Arc};

use tokio::task::JoinSet;

use crate::{
    logging::{log, log_exception, LogLevel},
    ports::ChatBot,
    state::AppState,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LaunchReport {
    pub started: usize,
    pub failed: usize,
    pub interrupted: bool,
}

/// Run every bot concurrently until they have all exited or `shutdown` resolves.
///
/// A bot that fails is logged and counted, never restarted. On shutdown the
/// remaining bots are aborted before this returns.
pub async fn run<F>(state: AppState, bots: Vec<Arc<dyn ChatBot>>, shutdown: F) -> LaunchReport
where
    F: Future<Output = ()>,
{
    let mut report = LaunchReport::default();
    let mut tasks = JoinSet::new();

    for bot in bots {
        let platform = bot.platform();
        let state = state.clone();
        log(LogLevel::Info, &format!("starting {platform} bot"));
        tasks.spawn(async move { (platform, bot.run(state).await) });
        report.started += 1;
    }

    tokio::pin!(shutdown);
    while !tasks.is_empty() {
        tokio::select! {
            biased;

            Some(joined) = tasks.join_next() => match joined {
                Ok((platform, Ok(()))) => {
                    log(LogLevel::Info, &format!("{platform} bot stopped"));
                }
                Ok((platform, Err(e))) => {
                    report.failed += 1;
                    log_exception(&e, None, &format!("{platform} bot failed"));
                }
                Err(e) => {
                    report.failed += 1;
                    log_exception(&e, None, "bot task did not finish");
                }
            },
            () = &mut shutdown => {
                log(LogLevel::Info, "shutdown requested, stopping bots");
                report.interrupted = true;
                tasks.shutdown().await;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, domain::Platform, errors::Error, state::SharedLock, Result};
    use async_trait::async_trait;
    use std::sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    };
    use tempfile::TempDir;

    fn test_state() -> (TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.json"),
            r#"{"discord_token":"abc123","twitch_client_id":"xyz","twitch_credentials":"pqr"}"#,
        )
        .unwrap();
        let cfg = Config::load_from(dir.path()).unwrap();
        (dir, AppState::new(cfg))
    }

    struct FakeBot {
        platform: Platform,
        fail: bool,
        expected_lock: SharedLock,
        runs: AtomicUsize,
        saw_shared_lock: AtomicBool,
    }

    impl FakeBot {
        fn new(platform: Platform, fail: bool, expected_lock: &SharedLock) -> Arc<Self> {
            Arc::new(Self {
                platform,
                fail,
                expected_lock: expected_lock.clone(),
                runs: AtomicUsize::new(0),
                saw_shared_lock: AtomicBool::new(false),
            })
        }
    }

    #[async_trait]
    impl ChatBot for FakeBot {
        fn platform(&self) -> Platform {
            self.platform
        }

        async fn run(&self, state: AppState) -> Result<()> {
            let _guard = state.lock.lock().await;
            self.runs.fetch_add(1, Ordering::SeqCst);
            self.saw_shared_lock
                .store(state.lock.same_as(&self.expected_lock), Ordering::SeqCst);
            if self.fail {
                return Err(Error::External(format!("{} connection refused", self.platform)));
            }
            Ok(())
        }
    }

    /// Never returns; flags when its future is dropped.
    struct HangingBot {
        dropped: Arc<AtomicBool>,
        started: Arc<tokio::sync::Notify>,
    }

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl ChatBot for HangingBot {
        fn platform(&self) -> Platform {
            Platform::Twitch
        }

        async fn run(&self, _state: AppState) -> Result<()> {
            let _flag = DropFlag(self.dropped.clone());
            self.started.notify_one();
            std::future::pending::<()>().await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn every_bot_runs_with_the_same_lock() {
        let (_dir, state) = test_state();
        let discord = FakeBot::new(Platform::Discord, false, &state.lock);
        let twitch = FakeBot::new(Platform::Twitch, false, &state.lock);

        let bots: Vec<Arc<dyn ChatBot>> = vec![discord.clone(), twitch.clone()];
        let report = run(state, bots, std::future::pending()).await;

        assert_eq!(
            report,
            LaunchReport {
                started: 2,
                failed: 0,
                interrupted: false
            }
        );
        for bot in [&discord, &twitch] {
            assert_eq!(bot.runs.load(Ordering::SeqCst), 1);
            assert!(bot.saw_shared_lock.load(Ordering::SeqCst));
        }
    }

    #[tokio::test]
    async fn failures_are_counted_not_retried() {
        let (_dir, state) = test_state();
        let ok = FakeBot::new(Platform::Discord, false, &state.lock);
        let bad = FakeBot::new(Platform::Twitch, true, &state.lock);

        let bots: Vec<Arc<dyn ChatBot>> = vec![ok, bad.clone()];
        let report = run(state, bots, std::future::pending()).await;

        assert_eq!(report.started, 2);
        assert_eq!(report.failed, 1);
        assert_eq!(bad.runs.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn shutdown_aborts_running_bots() {
        let (_dir, state) = test_state();
        let dropped = Arc::new(AtomicBool::new(false));
        let started = Arc::new(tokio::sync::Notify::new());
        let bot = Arc::new(HangingBot {
            dropped: dropped.clone(),
            started: started.clone(),
        });

        let bots: Vec<Arc<dyn ChatBot>> = vec![bot];
        let report = run(state, bots, async move { started.notified().await }).await;

        assert!(report.interrupted);
        assert_eq!(report.failed, 0);
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn no_bots_returns_immediately() {
        let (_dir, state) = test_state();
        let calls = Mutex::new(0);
        let report = run(state, Vec::new(), async {
            *calls.lock().unwrap() += 1;
        })
        .await;

        assert_eq!(report, LaunchReport::default());
        assert_eq!(*calls.lock().unwrap(), 0);
    }
}
