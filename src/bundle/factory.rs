//! Base configurations every variant starts from.

use crate::bundle::{
    BabelOptions, BuildConfiguration, CommonJsOptions, OutputDescriptor, OutputFormat, Plugin,
    PluginChain, ResolveOptions, WarningFilter,
};
use crate::config::ProjectConfig;
use crate::mode::BuildOptions;

/// The ES module build
pub fn es(options: &BuildOptions, project: &ProjectConfig) -> BuildConfiguration {
    let plugins = PluginChain::new()
        .with(Plugin::Json)
        .with(Plugin::Babel(BabelOptions::default()));

    BuildConfiguration {
        entry_point: project.entry.clone(),
        plugins: finish_chain(plugins, options),
        warning_filter: WarningFilter::default(),
        legacy: true,
        output: OutputDescriptor {
            format: OutputFormat::Es,
            file: project.bundle_file(".es.js"),
            name: None,
            strict: false,
        },
    }
}

/// The universal build. Built on its own rather than from [`es`] since it
/// also resolves and inlines dependencies.
pub fn umd(options: &BuildOptions, project: &ProjectConfig) -> BuildConfiguration {
    let plugins = PluginChain::new()
        .with(Plugin::NodeResolve(ResolveOptions::default()))
        .with(Plugin::Json)
        .with(Plugin::Commonjs(CommonJsOptions::default()))
        .with(Plugin::Babel(BabelOptions::default()));

    BuildConfiguration {
        entry_point: project.entry.clone(),
        plugins: finish_chain(plugins, options),
        warning_filter: WarningFilter::surface_all(),
        legacy: true,
        output: OutputDescriptor {
            format: OutputFormat::Umd,
            file: project.bundle_file(".js"),
            name: Some(project.export_name.clone()),
            strict: false,
        },
    }
}

// Progress reporting and size reporting close every chain
fn finish_chain(mut plugins: PluginChain, options: &BuildOptions) -> PluginChain {
    if options.progress() {
        plugins.push(Plugin::Progress);
    }
    plugins.push(Plugin::Filesize);
    plugins
}
