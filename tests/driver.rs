// One-shot runs against a recording bundler
mod common;

use bundleforge::bundle::{PluginKind, Variant, VariantSet};
use bundleforge::cli::run_mode;
use bundleforge::config::ProjectConfig;
use bundleforge::driver::{Bundler, WatchSettings, run_once};
use bundleforge::mode::{BuildOptions, Mode};
use common::RecordingBundler;
use std::path::PathBuf;
use std::sync::Arc;

fn setup(options: BuildOptions) -> (Mode, VariantSet) {
    let configs = VariantSet::build(&options, &ProjectConfig::default()).unwrap();
    (Mode::select(&options), configs)
}

fn written_files(bundler: &RecordingBundler) -> Vec<PathBuf> {
    let mut files: Vec<_> = bundler
        .writes()
        .into_iter()
        .map(|config| config.output.file)
        .collect();
    files.sort();
    files
}

#[tokio::test]
async fn test_no_flags_writes_three_bundles() {
    let (mode, configs) = setup(BuildOptions::new(false, false, true));
    let bundler = RecordingBundler::default();

    run_mode(
        &mode,
        &configs,
        Arc::new(bundler.clone()),
        WatchSettings::new("src"),
    )
    .await
    .unwrap();

    assert_eq!(
        written_files(&bundler),
        vec![
            PathBuf::from("dist/main.cjs.js"),
            PathBuf::from("dist/main.es.js"),
            PathBuf::from("dist/main.js"),
        ]
    );
    for config in bundler.writes() {
        assert!(!config.plugins.contains(PluginKind::Uglify));
    }
}

#[tokio::test]
async fn test_minify_writes_only_minified_bundle() {
    let (mode, configs) = setup(BuildOptions::new(false, true, true));
    let bundler = RecordingBundler::default();

    run_mode(
        &mode,
        &configs,
        Arc::new(bundler.clone()),
        WatchSettings::new("src"),
    )
    .await
    .unwrap();

    let writes = bundler.writes();
    assert_eq!(writes.len(), 1);
    assert_eq!(writes[0].output.file, PathBuf::from("dist/main.min.js"));
    assert_eq!(
        writes[0].plugins.len(),
        configs.get(Variant::Umd).unwrap().plugins.len() + 1
    );
}

#[tokio::test]
async fn test_failure_does_not_abort_siblings() {
    let (_, configs) = setup(BuildOptions::default());
    let bundler = RecordingBundler::failing(&["dist/main.cjs.js"]);
    let shared: Arc<dyn Bundler> = Arc::new(bundler.clone());

    let report = run_once(shared, configs.select(&Variant::STANDARD)).await;

    assert!(!report.is_success());
    assert_eq!(report.failed(), vec![Variant::Cjs]);
    assert_eq!(report.outcomes().len(), 3);
    assert_eq!(bundler.bundled().len(), 3);
    assert_eq!(
        written_files(&bundler),
        vec![PathBuf::from("dist/main.es.js"), PathBuf::from("dist/main.js")]
    );
}

#[tokio::test]
async fn test_failed_variant_fails_the_run() {
    let (mode, configs) = setup(BuildOptions::default());
    let bundler = RecordingBundler::failing(&["dist/main.js"]);

    let result = run_mode(
        &mode,
        &configs,
        Arc::new(bundler.clone()),
        WatchSettings::new("src"),
    )
    .await;

    let err = result.unwrap_err();
    assert_eq!(err.to_string(), "Bundling failed for umd");
    assert_eq!(bundler.writes().len(), 2);
}

#[tokio::test]
async fn test_empty_selection() {
    let bundler: Arc<dyn Bundler> = Arc::new(RecordingBundler::default());
    let report = run_once(bundler, Vec::new()).await;
    assert!(report.is_success());
    assert!(report.outcomes().is_empty());
}
