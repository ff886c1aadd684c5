use occlusion_heatmap::config::demo::{load_config, DemoConfig, DemoScaleConfig};
use occlusion_heatmap::engine::{from_fn, OcclusionEngine, ScoringContext};
use occlusion_heatmap::image::io::{load_rgba_image, write_json_file};
use occlusion_heatmap::image::RgbaView;
use occlusion_heatmap::refine::ScoreThreshold;
use occlusion_heatmap::{ColorScale, HeatmapReport, HeatmapSurface};
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let mut image = load_rgba_image(&config.input)?;
    let baseline = mean_luma(&image);
    let engine = OcclusionEngine::new(config.params.clone(), two_stop_scale(&config.scale))
        .map_err(|e| e.to_string())?;
    let mut surface = HeatmapSurface::new(image.w, image.h);

    let gain = config.scorer.gain;
    let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
        Ok(((mean_luma(ctx.image) - baseline).abs() * gain).min(1.0))
    });
    let mut zoom = ScoreThreshold(config.scorer.zoom_threshold);
    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut zoom)
        .map_err(|e| e.to_string())?;

    print_summary(&config, &report);
    write_json_file(&config.output.report_json, &report)?;
    println!(
        "Saved {} samples to {}",
        report.samples.len(),
        config.output.report_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: heatmap_demo <config.json>".to_string()
}

/// Mean Rec. 601 luma in `[0, 1]`.
fn mean_luma(image: &dyn RgbaView) -> f32 {
    let mut sum = 0.0f64;
    for y in 0..image.height() {
        for px in image.row(y).chunks_exact(4) {
            sum += 0.299 * px[0] as f64 + 0.587 * px[1] as f64 + 0.114 * px[2] as f64;
        }
    }
    let n = (image.width() * image.height()).max(1) as f64;
    (sum / n / 255.0) as f32
}

fn two_stop_scale(cfg: &DemoScaleConfig) -> ColorScale {
    ColorScale::from_fn(|i| {
        let t = i as f32 / 255.0;
        let mut out = [0u8; 4];
        for (c, v) in out.iter_mut().enumerate() {
            *v = (cfg.low[c] as f32 + (cfg.high[c] as f32 - cfg.low[c] as f32) * t).round() as u8;
        }
        out
    })
}

fn print_summary(config: &DemoConfig, report: &HeatmapReport) {
    println!("Heatmap summary");
    println!("  input: {}", config.input.display());
    println!(
        "  image: {}x{} initial window {}",
        report.input.width, report.input.height, report.input.initial_window
    );
    println!("  samples: {}", report.samples.len());
    println!(
        "  passes: {} (max depth {})",
        report.passes.len(),
        report.max_depth()
    );
    println!("  masks: {}", report.masks_generated);
    println!("  total_ms: {:.3}", report.total_ms);
    if let Some(hot) = report.hottest() {
        println!(
            "  hottest: ({}, {}, {}x{}) score {:.3} depth {}",
            hot.rect.x, hot.rect.y, hot.rect.w, hot.rect.h, hot.score, hot.depth
        );
    }
}
