// Watchers run an initial build, rebuild on source changes and report both as events
mod common;

use bundleforge::bundle::{Variant, VariantSet};
use bundleforge::config::ProjectConfig;
use bundleforge::driver::{VariantWatcher, WatchEvent, WatchSettings};
use bundleforge::mode::BuildOptions;
use common::RecordingBundler;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

async fn next(rx: &mut tokio::sync::mpsc::UnboundedReceiver<WatchEvent>) -> WatchEvent {
    timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("watch event in time")
        .expect("watcher still running")
}

/// No event arrives for well over one debounce period
async fn assert_quiet(rx: &mut tokio::sync::mpsc::UnboundedReceiver<WatchEvent>) {
    if let Ok(event) = timeout(Duration::from_millis(800), rx.recv()).await {
        panic!("unexpected watch event {event:?}");
    }
}

async fn initial_build(rx: &mut tokio::sync::mpsc::UnboundedReceiver<WatchEvent>) {
    assert_eq!(next(rx).await, WatchEvent::Start);
    assert!(matches!(next(rx).await, WatchEvent::End { .. }));
}

fn es_config() -> bundleforge::bundle::BuildConfiguration {
    VariantSet::build(&BuildOptions::new(true, false, false), &ProjectConfig::default())
        .unwrap()
        .get(Variant::Es)
        .unwrap()
        .clone()
}

#[tokio::test]
async fn test_initial_build_emits_start_and_end() {
    let dir = tempfile::tempdir().unwrap();
    let bundler = RecordingBundler::default();

    let mut events = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(bundler.clone()),
        WatchSettings::new(dir.path()),
    )
    .spawn()
    .unwrap();

    assert_eq!(next(&mut events).await, WatchEvent::Start);
    assert!(matches!(next(&mut events).await, WatchEvent::End { .. }));
    assert_eq!(bundler.writes().len(), 1);
}

#[tokio::test]
async fn test_failed_build_emits_error() {
    let dir = tempfile::tempdir().unwrap();
    let bundler = RecordingBundler::failing(&["dist/main.es.js"]);

    let mut events = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(bundler.clone()),
        WatchSettings::new(dir.path()),
    )
    .spawn()
    .unwrap();

    assert_eq!(next(&mut events).await, WatchEvent::Start);
    match next(&mut events).await {
        WatchEvent::Error { error } => assert!(error.contains("Could not resolve entry module")),
        other => panic!("expected error event, got {other:?}"),
    }
    assert!(bundler.writes().is_empty());
}

#[tokio::test]
async fn test_missing_watch_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    let result = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(RecordingBundler::default()),
        WatchSettings::new(dir.path().join("absent")),
    )
    .spawn();
    assert!(result.is_err());
}

#[tokio::test]
async fn test_source_change_rebuilds() {
    let dir = tempfile::tempdir().unwrap();
    let bundler = RecordingBundler::default();

    let mut events = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(bundler.clone()),
        WatchSettings::new(dir.path()),
    )
    .spawn()
    .unwrap();
    initial_build(&mut events).await;

    std::fs::write(dir.path().join("a.js"), "export const a = 1;").unwrap();

    assert_eq!(next(&mut events).await, WatchEvent::Start);
    assert!(matches!(next(&mut events).await, WatchEvent::End { .. }));
    assert_eq!(bundler.bundled().len(), 2);
    assert_eq!(bundler.writes().len(), 2);
}

#[tokio::test]
async fn test_burst_of_saves_rebuilds_once() {
    let dir = tempfile::tempdir().unwrap();
    let bundler = RecordingBundler::default();

    let mut events = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(bundler.clone()),
        WatchSettings::new(dir.path()),
    )
    .spawn()
    .unwrap();
    initial_build(&mut events).await;

    for i in 0..3 {
        std::fs::write(dir.path().join("a.js"), format!("export const a = {i};")).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(next(&mut events).await, WatchEvent::Start);
    assert!(matches!(next(&mut events).await, WatchEvent::End { .. }));
    assert_quiet(&mut events).await;
    assert_eq!(bundler.bundled().len(), 2);
}

#[tokio::test]
async fn test_writes_to_ignored_dirs_do_not_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let dist = dir.path().join("dist");
    std::fs::create_dir(&dist).unwrap();
    let bundler = RecordingBundler::default();

    let mut events = VariantWatcher::new(
        Variant::Es,
        es_config(),
        Arc::new(bundler.clone()),
        WatchSettings::new(dir.path()).ignoring(vec![dist.clone()]),
    )
    .spawn()
    .unwrap();
    initial_build(&mut events).await;

    std::fs::write(dist.join("main.es.js"), "export {};").unwrap();

    assert_quiet(&mut events).await;
    assert_eq!(bundler.bundled().len(), 1);
}
