//! Execution mode, decided once from the command-line flags.

use crate::bundle::Variant;

/// Normalised bundle flags. Watch mode and the progress bar exclude each
/// other, so `progress` is always false when `watch` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    watch: bool,
    minify: bool,
    progress: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::new(false, false, true)
    }
}

impl BuildOptions {
    pub fn new(watch: bool, minify: bool, progress: bool) -> Self {
        Self {
            watch,
            minify,
            progress: progress && !watch,
        }
    }

    pub fn watch(&self) -> bool {
        self.watch
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn progress(&self) -> bool {
        self.progress
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    OneShot(Vec<Variant>),
    Watch(Vec<Variant>),
}

impl Mode {
    pub fn select(options: &BuildOptions) -> Self {
        if options.watch() {
            // The minified bundle is a release artifact and never watched
            Mode::Watch(Variant::STANDARD.to_vec())
        } else if options.minify() {
            Mode::OneShot(vec![Variant::MinifiedUmd])
        } else {
            Mode::OneShot(Variant::STANDARD.to_vec())
        }
    }

    pub fn variants(&self) -> &[Variant] {
        match self {
            Mode::OneShot(variants) | Mode::Watch(variants) => variants,
        }
    }
}
