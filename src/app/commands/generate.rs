//! Full asset generation pipeline.

use tracing::{error, info, warn};

use super::cleanup::ScratchGuard;
use super::{deploy, pack, patch, rasterize, summary, synthesize};
use crate::app::AppContext;
use crate::domain::paths::summary_path;
use crate::domain::{
    AppError, AssetFormat, AssetSpec, ContainerKind, DeploymentMapping,
    GeneratedArtifacts, GeneratedClass, RasterMatrix, RunReport, Stage, StageReport, ToolError,
    ToolKind,
};
use crate::ports::AssetToolchain;

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Keep intermediate files in the builder directory even on success.
    pub keep_scratch: bool,
}

/// Probe every external tool once.
pub fn check_tools<T: AssetToolchain>(toolchain: &T) -> Vec<(ToolKind, Result<(), ToolError>)> {
    ToolKind::ALL.into_iter().map(|tool| (tool, toolchain.probe(tool))).collect()
}

/// Fail when a required tool is missing or hangs. An unavailable optional
/// tool surfaces later as a failed pack item. Probes that merely exit
/// unsuccessfully are logged and tolerated.
fn ensure_tools<T: AssetToolchain>(toolchain: &T) -> Result<(), AppError> {
    let mut unavailable = Vec::new();
    for (tool, result) in check_tools(toolchain) {
        match result {
            Ok(()) => info!(tool = %tool, "tool available"),
            Err(err) if err.is_unavailable() && tool.is_required() => {
                error!(tool = %tool, error = %err, "tool unavailable");
                unavailable.push(format!("{tool} ({err})"));
            }
            Err(err) if err.is_unavailable() => {
                warn!(tool = %tool, error = %err, "optional tool unavailable, its container will be skipped");
            }
            Err(err) => warn!(tool = %tool, error = %err, "tool probe failed, continuing"),
        }
    }
    if unavailable.is_empty() {
        Ok(())
    } else {
        Err(AppError::ToolsUnavailable(unavailable.join(", ")))
    }
}

/// Run the whole pipeline for `ctx`.
///
/// Returns `Err` only for environment problems detected before any work
/// starts. Everything after that is best-effort and reported in the
/// returned [`RunReport`].
pub fn execute<T: AssetToolchain>(
    ctx: &AppContext<T>,
    options: &GenerateOptions,
) -> Result<RunReport, AppError> {
    ensure_tools(ctx.toolchain())?;

    let config = ctx.config();
    let scratch = ctx.scratch();
    let mut guard = ScratchGuard::new(scratch.clone());
    if options.keep_scratch {
        guard.retain();
    }
    let mut stages: Vec<StageReport> = Vec::new();

    info!(product = %config.brand.name, "generating brand assets");
    let (vector, report) = synthesize::execute(&config.palette, config.assets.logo_edge, &scratch);
    stages.push(report);

    let mut matrix = RasterMatrix::new();
    stages.push(rasterize::execute(
        ctx.toolchain(),
        vector.as_deref(),
        &config.assets.raster_sizes(),
        &scratch,
        &mut matrix,
    ));

    let (containers, report) = pack::execute(ctx.toolchain(), &matrix, &scratch);
    stages.push(report);

    let artifacts = GeneratedArtifacts { vector, rasters: matrix, containers };
    let mapping = DeploymentMapping::standard();
    let variants = ctx.variants();

    for variant in &variants {
        let report = deploy::execute(&artifacts, &mapping, variant);
        if !report.failures.is_empty() {
            guard.retain();
        }
        stages.push(report);
    }
    for variant in &variants {
        stages.push(patch::execute(variant, &config.brand));
    }

    let scratch_retained = guard.is_retained();
    stages.push(guard.finish());

    let path = summary_path(ctx.builder_dir(), &config.brand.slug());
    let mut report = RunReport {
        product: config.brand.name.clone(),
        palette: config.palette.clone(),
        assets: generated_classes(&config.assets.specs(), &artifacts),
        raster_sizes: artifacts.rasters.sizes().collect(),
        variants: config.variants.clone(),
        stages,
        summary_path: None,
        scratch_retained,
    };

    let mut summary_report = StageReport::new(Stage::Summary);
    match summary::execute(&report, &path) {
        Ok(()) => {
            summary_report.produced(path.display().to_string());
            report.summary_path = Some(path);
        }
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to write summary report");
            summary_report.failed(path.display().to_string(), err);
        }
    }
    report.stages.push(summary_report);

    info!(health = %report.health(), "asset generation finished");
    Ok(report)
}

/// What was actually produced, per asset class.
fn generated_classes(specs: &[AssetSpec], artifacts: &GeneratedArtifacts) -> Vec<GeneratedClass> {
    specs
        .iter()
        .map(|spec| {
            let mut items: Vec<String> = Vec::new();
            for edge in spec.raster_edges() {
                let item = format!("{edge}x{edge} PNG");
                if artifacts.rasters.contains(edge) && !items.contains(&item) {
                    items.push(item);
                }
            }
            for kind in ContainerKind::ALL {
                if spec.formats.contains(&kind.format()) && artifacts.containers.contains_key(&kind) {
                    items.push(kind.display_name().to_string());
                }
            }
            if spec.formats.contains(&AssetFormat::VectorSvg) && artifacts.vector.is_some() {
                items.push("SVG vector".to_string());
            }
            GeneratedClass { class: spec.class, items }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        AssetClass, BrandConfig, DescriptorKind, RunHealth, ScratchLayout, VariantTarget,
    };
    use crate::testing::FakeToolchain;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const DESKTOP: &str = "[Desktop Entry]\nName=Code\nExec=code\nIcon=code\n";

    fn config() -> BrandConfig {
        let mut config = BrandConfig::default();
        config.assets.icon_sizes = vec![16, 32, 48, 128, 256];
        config
    }

    fn context(builder: &Path, toolchain: FakeToolchain) -> AppContext<FakeToolchain> {
        AppContext::new(config(), toolchain, builder.to_path_buf(), builder.join("source"))
    }

    fn scratch_left(builder: &Path) -> Vec<String> {
        let layout = ScratchLayout::new(builder, "cortexide");
        fs::read_dir(builder)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .filter(|name| layout.is_scratch_name(name))
            .collect()
    }

    #[test]
    fn full_run_deploys_every_variant_and_cleans_up() {
        let dir = tempdir().unwrap();
        let stable = VariantTarget::under(dir.path(), "stable");
        let desktop = stable.resolve(DescriptorKind::Desktop.relative_path());
        fs::create_dir_all(desktop.parent().unwrap()).unwrap();
        fs::write(&desktop, DESKTOP).unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        assert_eq!(report.health(), RunHealth::Healthy);
        for name in ["stable", "insider"] {
            let variant = VariantTarget::under(dir.path(), name);
            for relative in [
                "resources/win32/code.ico",
                "resources/darwin/code.icns",
                "resources/linux/code.svg",
                "resources/win32/code_150x150.png",
                "resources/server/code-512.png",
            ] {
                assert!(variant.resolve(relative).is_file(), "{name}: {relative} missing");
            }
        }
        assert!(fs::read_to_string(&desktop).unwrap().contains("Name=CortexIDE"));
        assert!(scratch_left(dir.path()).is_empty());
        let summary = report.summary_path.clone().unwrap();
        assert!(summary.ends_with("cortexide-asset-generation-summary.md"));
        assert!(fs::read_to_string(summary).unwrap().contains("## Run Health: healthy"));
        assert!(!report.scratch_retained);
    }

    #[test]
    fn every_consumed_size_is_rasterized_once() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        execute(&ctx, &GenerateOptions::default()).unwrap();

        let expected: Vec<u32> = ctx.config().assets.raster_sizes().into_iter().collect();
        assert_eq!(ctx.toolchain().rasterized_sizes(), expected);
        for size in [16, 70, 150, 192, 1024] {
            assert!(expected.contains(&size), "{size} not rasterized");
        }
    }

    #[test]
    fn missing_required_tool_aborts_before_any_work() {
        for tool in [ToolKind::Rasterizer, ToolKind::IcoPacker] {
            let dir = tempdir().unwrap();
            let ctx = context(dir.path(), FakeToolchain::new().with_missing_tool(tool));

            let err = execute(&ctx, &GenerateOptions::default()).unwrap_err();

            assert!(matches!(err, AppError::ToolsUnavailable(ref tools) if tools.contains(tool.key())));
            assert!(ctx.toolchain().rasterized.lock().unwrap().is_empty());
            assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
        }
    }

    #[test]
    fn missing_icns_packer_still_deploys_everything_else() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new().with_missing_tool(ToolKind::IcnsPacker));

        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        assert_eq!(report.health(), RunHealth::Degraded);
        let pack = report.stages.iter().find(|stage| stage.stage == Stage::Pack).unwrap();
        assert!(pack.failures.iter().any(|failure| failure.item == ContainerKind::Icns.to_string()));
        let stable = VariantTarget::under(dir.path(), "stable");
        for relative in [
            "resources/win32/code.ico",
            "resources/linux/code.svg",
            "resources/win32/code_150x150.png",
            "resources/server/code-512.png",
        ] {
            assert!(stable.resolve(relative).is_file(), "{relative} missing");
        }
        assert!(!stable.resolve("resources/darwin/code.icns").exists());
        assert!(!report.assets[0].items.contains(&"macOS ICNS".to_string()));
    }

    #[test]
    fn installer_class_reports_nothing_produced() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        let installer = report.assets.iter().find(|class| class.class == AssetClass::Installer).unwrap();
        assert!(installer.items.is_empty(), "{:?}", installer.items);
        let summary = fs::read_to_string(report.summary_path.unwrap()).unwrap();
        let section = summary.split("### Installer").nth(1).unwrap();
        assert!(section.lines().take(3).any(|line| line.contains("(none produced)")));
        assert!(!summary.contains("bitmap"));
    }

    #[test]
    fn failed_size_degrades_the_run_but_keeps_the_rest() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new().with_failing_sizes(&[48]));

        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        assert_eq!(report.health(), RunHealth::Degraded);
        assert!(!report.raster_sizes.contains(&48));
        let ico_inputs = ctx.toolchain().ico_inputs.lock().unwrap();
        assert!(!ico_inputs[0].iter().any(|path| path.ends_with("temp_cortexide_48.png")));
        let icons = &report.assets[0];
        assert_eq!(icons.class, AssetClass::Icon);
        assert!(icons.items.contains(&"16x16 PNG".to_string()));
        assert!(!icons.items.contains(&"48x48 PNG".to_string()));
        assert!(icons.items.contains(&"Windows ICO".to_string()));
    }

    #[test]
    fn deploy_failure_keeps_scratch_for_inspection() {
        let dir = tempdir().unwrap();
        let insider = VariantTarget::under(dir.path(), "insider");
        // A file where a directory is expected makes every win32 copy fail.
        let blocker = insider.resolve("resources/win32");
        fs::create_dir_all(blocker.parent().unwrap()).unwrap();
        fs::write(&blocker, "not a directory").unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        assert_eq!(report.health(), RunHealth::Degraded);
        assert!(report.scratch_retained);
        assert!(!scratch_left(dir.path()).is_empty());
        assert!(VariantTarget::under(dir.path(), "stable").resolve("resources/win32/code.ico").is_file());
    }

    #[test]
    fn keep_scratch_option_retains_intermediates() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        let report = execute(&ctx, &GenerateOptions { keep_scratch: true }).unwrap();

        assert_eq!(report.health(), RunHealth::Healthy);
        assert!(ScratchLayout::new(dir.path(), "cortexide").vector().is_file());
    }

    #[test]
    fn rerun_over_previous_output_is_safe() {
        let dir = tempdir().unwrap();
        let ctx = context(dir.path(), FakeToolchain::new());

        execute(&ctx, &GenerateOptions::default()).unwrap();
        let report = execute(&ctx, &GenerateOptions::default()).unwrap();

        assert_eq!(report.health(), RunHealth::Healthy);
        let ico = VariantTarget::under(dir.path(), "stable").resolve("resources/win32/code.ico");
        assert!(crate::domain::backup_path(&ico).is_file());
    }

    #[test]
    fn check_tools_reports_every_tool_in_order() {
        let toolchain = FakeToolchain::new().with_missing_tool(ToolKind::Rasterizer);

        let results = check_tools(&toolchain);

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_ok());
        assert_eq!(*toolchain.probed.lock().unwrap(), ToolKind::ALL.to_vec());
    }
}
