//! Watch mode: one watcher and one listener per variant.

use crate::bundle::{BuildConfiguration, Variant};
use crate::config::constants;
use crate::driver::{Bundler, build_variant};
use crate::error::BundleResult;
use crate::util::time::format_duration;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    Start,
    End { duration: Duration },
    Error { error: String },
}

impl WatchEvent {
    /// The line logged for this event
    pub fn describe(&self, variant: Variant) -> String {
        match self {
            WatchEvent::Start => format!("Bundling {variant}..."),
            WatchEvent::End { duration } => {
                format!("Bundled {variant} in {}", format_duration(*duration))
            }
            WatchEvent::Error { error } => error.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WatchSettings {
    /// Directory watched recursively for source changes
    pub root: PathBuf,
    /// Changes below these directories never trigger a rebuild
    pub ignore: Vec<PathBuf>,
    pub debounce: Duration,
}

impl WatchSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: Vec::new(),
            debounce: Duration::from_millis(constants::WATCH_DEBOUNCE_MS),
        }
    }

    pub fn ignoring(mut self, dirs: Vec<PathBuf>) -> Self {
        self.ignore = dirs;
        self
    }

    fn is_relevant(&self, event: &Event) -> bool {
        matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) && event
            .paths
            .iter()
            .any(|path| !self.ignore.iter().any(|dir| path.starts_with(dir)))
    }
}

/// Rebuilds one variant whenever the sources change
pub struct VariantWatcher {
    variant: Variant,
    config: BuildConfiguration,
    bundler: Arc<dyn Bundler>,
    settings: WatchSettings,
}

impl VariantWatcher {
    pub fn new(
        variant: Variant,
        config: BuildConfiguration,
        bundler: Arc<dyn Bundler>,
        settings: WatchSettings,
    ) -> Self {
        Self {
            variant,
            config,
            bundler,
            settings,
        }
    }

    /// Start watching. The first build runs immediately; the returned
    /// channel yields events until the watcher stops.
    pub fn spawn(self) -> BundleResult<mpsc::UnboundedReceiver<WatchEvent>> {
        let (fs_tx, mut fs_rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = fs_tx.send(res);
        })?;
        watcher.watch(&self.settings.root, RecursiveMode::Recursive)?;
        debug!("Watching {:?} for {}", self.settings.root, self.variant);

        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            // Dropping the watcher would end the file system subscription
            let _watcher = watcher;

            self.rebuild(&tx).await;

            loop {
                match fs_rx.recv().await {
                    Some(Ok(event)) if self.settings.is_relevant(&event) => {
                        debug!("{} change: {:?}", self.variant, event.paths);
                    }
                    Some(Ok(_)) => continue,
                    Some(Err(e)) => {
                        warn!("Watch error for {}: {}", self.variant, e);
                        continue;
                    }
                    None => break,
                }

                let open = settle(&mut fs_rx, &self.settings).await;
                if !open || tx.is_closed() {
                    break;
                }
                self.rebuild(&tx).await;
            }

            debug!("Watcher for {} stopped", self.variant);
        });

        Ok(rx)
    }

    async fn rebuild(&self, events: &mpsc::UnboundedSender<WatchEvent>) {
        let _ = events.send(WatchEvent::Start);
        let started = Instant::now();

        let event = match build_variant(self.bundler.as_ref(), &self.config).await {
            Ok(()) => WatchEvent::End {
                duration: started.elapsed(),
            },
            Err(e) => WatchEvent::Error {
                error: e.to_string(),
            },
        };
        let _ = events.send(event);
    }
}

/// Wait until no relevant change arrived for one debounce period, so a burst
/// of saves builds once. Irrelevant events do not extend the wait. Returns
/// false when the file system channel closed.
pub async fn settle(
    fs_events: &mut mpsc::UnboundedReceiver<notify::Result<Event>>,
    settings: &WatchSettings,
) -> bool {
    let mut deadline = tokio::time::Instant::now() + settings.debounce;
    loop {
        match tokio::time::timeout_at(deadline, fs_events.recv()).await {
            Ok(Some(Ok(event))) if settings.is_relevant(&event) => {
                deadline = tokio::time::Instant::now() + settings.debounce;
            }
            Ok(Some(_)) => {}
            Ok(None) => return false,
            Err(_) => return true,
        }
    }
}

pub fn log_event(variant: Variant, event: &WatchEvent) {
    match event {
        WatchEvent::Error { .. } => error!("{}", event.describe(variant)),
        _ => info!("{}", event.describe(variant)),
    }
}

/// Log every event of one variant's watcher
pub async fn listen(variant: Variant, mut events: mpsc::UnboundedReceiver<WatchEvent>) {
    while let Some(event) = events.recv().await {
        log_event(variant, &event);
    }
}

/// Watch every configuration until Ctrl-C
pub async fn run_watch(
    bundler: Arc<dyn Bundler>,
    configs: Vec<(Variant, BuildConfiguration)>,
    settings: WatchSettings,
) -> BundleResult<()> {
    let mut listeners = JoinSet::new();

    for (variant, config) in configs {
        let events =
            VariantWatcher::new(variant, config, Arc::clone(&bundler), settings.clone()).spawn()?;
        listeners.spawn(listen(variant, events));
    }

    info!(
        "Watching {} for changes, press Ctrl-C to stop",
        settings.root.display()
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Stopping watchers"),
        _ = async { while listeners.join_next().await.is_some() {} } => {
            debug!("All watchers stopped");
        }
    }

    Ok(())
}
