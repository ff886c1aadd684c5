mod common;

use common::synthetic_image::{checkerboard_rgba, noise_rgba, solid_rgba};
use occlusion_heatmap::engine::{from_fn, ScoringContext};
use occlusion_heatmap::image::{RgbaImage, RgbaImageMut};
use occlusion_heatmap::occlusion::{mean_color, pick_color, OcclusionColor};
use occlusion_heatmap::refine::{NeverZoom, RefinePolicy, ScoreThreshold};
use occlusion_heatmap::types::{Rect, WindowSize};
use occlusion_heatmap::{
    CancelToken, ColorScale, HeatmapError, HeatmapParams, HeatmapSurface, OcclusionEngine,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn red_scale() -> ColorScale {
    ColorScale::from_fn(|i| [255, 0, 0, i])
}

#[test]
fn uniform_gray_image_sweeps_four_windows() {
    init_logging();
    let mut image = solid_rgba(100, 100, [127, 127, 127]);
    let original = image.clone();
    let params = HeatmapParams {
        slide_ratio: 1.0,
        ..Default::default()
    };
    let engine = OcclusionEngine::new(params, red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(100, 100);

    let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
        let mean = mean_color(&original, ctx.window)?;
        Ok(if pick_color(mean) == OcclusionColor::Gray {
            1.0
        } else {
            0.0
        })
    });
    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
        .unwrap();

    let rects: Vec<Rect> = report.samples.iter().map(|s| s.rect).collect();
    assert_eq!(
        rects,
        vec![
            Rect::new(0, 0, 50, 50),
            Rect::new(50, 0, 50, 50),
            Rect::new(0, 50, 50, 50),
            Rect::new(50, 50, 50, 50),
        ]
    );
    assert!(report.samples.iter().all(|s| s.score == 1.0 && s.depth == 0));
    assert_eq!(report.passes.len(), 1);
    assert_eq!(image, original);

    // Window centres are fully weighted, so the surface carries the top entry.
    assert_eq!(surface.pixel(25, 25), [255, 0, 0, 255]);
    assert_eq!(surface.pixel(75, 75), [255, 0, 0, 255]);
}

#[test]
fn adaptive_zoom_stays_inside_the_hot_window() {
    init_logging();
    let mut image = checkerboard_rgba(100, 100, 10);
    let original = image.clone();
    let params = HeatmapParams {
        max_window: Some(WindowSize::new(50, 50)),
        min_window: WindowSize::new(5, 5),
        ..Default::default()
    };
    let engine = OcclusionEngine::new(params, red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(100, 100);

    let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
        Ok(if ctx.window.contains_point(10, 10) { 1.0 } else { 0.0 })
    });
    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut ScoreThreshold(0.5))
        .unwrap();

    let depth0: Vec<_> = report.samples_at_depth(0).collect();
    assert_eq!(depth0.len(), 9);
    assert_eq!(
        depth0.iter().filter(|s| s.score > 0.5).count(),
        1,
        "only the top-left window covers (10, 10)"
    );

    let hot = Rect::new(0, 0, 50, 50);
    for sample in report.samples.iter().filter(|s| s.depth > 0) {
        assert!(
            hot.contains_rect(&sample.rect),
            "refined sample {:?} escaped {:?}",
            sample.rect,
            hot
        );
    }

    // 50 -> 25 -> 13 -> 7; halving 7 gives 4, below the 5x5 minimum.
    assert_eq!(report.max_depth(), 3);
    assert!(report
        .samples
        .iter()
        .all(|s| s.rect.w >= 5 && s.rect.h >= 5));
    assert_eq!(report.samples_at_depth(1).count(), 9);
    assert_eq!(report.samples_at_depth(2).count(), 9);
    assert_eq!(report.samples_at_depth(3).count(), 36);
    assert_eq!(report.passes.len(), 7);

    // Passes are drained breadth first, so depth never decreases.
    let depths: Vec<usize> = report.samples.iter().map(|s| s.depth).collect();
    assert!(depths.windows(2).all(|d| d[0] <= d[1]));
    assert_eq!(image, original);
}

#[test]
fn global_shrink_resweeps_the_whole_image() {
    init_logging();
    let mut image = noise_rgba(20, 20, 7);
    let original = image.clone();
    let params = HeatmapParams {
        slide_ratio: 1.0,
        min_window: WindowSize::new(1, 1),
        refine: RefinePolicy::GlobalShrink {
            ratio: 0.5,
            passes: 3,
        },
        ..Default::default()
    };
    let engine = OcclusionEngine::new(params, red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(20, 20);
    let mut scorer = from_fn(|_: &ScoringContext<'_>| Ok(0.5));

    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
        .unwrap();

    let windows: Vec<WindowSize> = report.passes.iter().map(|p| p.window).collect();
    assert_eq!(
        windows,
        vec![
            WindowSize::new(10, 10),
            WindowSize::new(5, 5),
            WindowSize::new(3, 3)
        ]
    );
    assert!(report.passes.iter().all(|p| p.region == Rect::full(20, 20)));
    assert_eq!(report.samples.len(), 4 + 16 + 49);
    assert_eq!(report.masks_generated, 3);
    assert_eq!(image, original);
}

#[test]
fn refinement_can_be_switched_off() {
    let mut image = noise_rgba(40, 30, 3);
    let params = HeatmapParams {
        refine_enabled: false,
        ..Default::default()
    };
    let engine = OcclusionEngine::new(params, red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(40, 30);
    let mut scorer = from_fn(|_: &ScoringContext<'_>| Ok(1.0));

    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut ScoreThreshold(0.0))
        .unwrap();
    assert_eq!(report.max_depth(), 0);
    assert_eq!(report.passes.len(), 1);
}

#[test]
fn cancellation_stops_between_windows_and_restores() {
    init_logging();
    let mut image = noise_rgba(64, 64, 11);
    let original = image.clone();
    let token = CancelToken::new();
    let engine = OcclusionEngine::new(HeatmapParams::default(), red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(64, 64);

    let mut zoom = NeverZoom;
    let handle = token.clone();
    let mut scorer = from_fn(move |ctx: &ScoringContext<'_>| {
        if ctx.sample_index == 2 {
            handle.cancel();
        }
        Ok(0.25)
    });
    let err = engine
        .run_with_cancel(&mut image, &mut surface, &mut scorer, &mut zoom, &token)
        .unwrap_err();

    assert!(matches!(err, HeatmapError::Cancelled { samples: 3 }), "{err}");
    assert!(token.is_cancelled());
    assert_eq!(image, original);
}

#[test]
fn engine_runs_again_after_a_cancelled_run() {
    let mut image = noise_rgba(32, 32, 21);
    let engine = OcclusionEngine::new(HeatmapParams::default(), red_scale()).unwrap();

    let mut zoom = NeverZoom;
    let token = CancelToken::new();
    let handle = token.clone();
    let mut cancelling = from_fn(move |_: &ScoringContext<'_>| {
        handle.cancel();
        Ok(0.0)
    });
    let mut surface = HeatmapSurface::new(32, 32);
    let err = engine
        .run_with_cancel(&mut image, &mut surface, &mut cancelling, &mut zoom, &token)
        .unwrap_err();
    assert!(matches!(err, HeatmapError::Cancelled { samples: 1 }), "{err}");

    let mut surface = HeatmapSurface::new(32, 32);
    let mut scorer = from_fn(|_: &ScoringContext<'_>| Ok(0.0));
    let report = engine
        .run(&mut image, &mut surface, &mut scorer, &mut zoom)
        .unwrap();
    assert_eq!(report.samples.len(), 9);

    let fresh = CancelToken::new();
    let report = engine
        .run_with_cancel(&mut image, &mut surface, &mut scorer, &mut zoom, &fresh)
        .unwrap();
    assert_eq!(report.samples.len(), 9);
}

#[test]
fn scoring_failure_propagates_with_pixels_restored() {
    let mut image = noise_rgba(32, 32, 5);
    let original = image.clone();
    let engine = OcclusionEngine::new(HeatmapParams::default(), red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(32, 32);

    let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
        if ctx.sample_index == 1 {
            Err("model unavailable".into())
        } else {
            Ok(0.0)
        }
    });
    let err = engine
        .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
        .unwrap_err();

    match err {
        HeatmapError::ScoringFailure { rect, source } => {
            assert_eq!(rect, Rect::new(8, 0, 16, 16));
            assert_eq!(source.to_string(), "model unavailable");
        }
        other => panic!("unexpected error {other}"),
    }
    assert_eq!(image, original);
}

#[test]
fn strided_caller_buffer_keeps_its_padding() {
    let (w, h, stride) = (24usize, 18usize, 24 * 4 + 12);
    let mut storage: Vec<u8> = (0..stride * h).map(|i| (i * 37 % 251) as u8).collect();
    let before = storage.clone();

    {
        let mut view = RgbaImageMut::new(w, h, stride, &mut storage).unwrap();
        let engine = OcclusionEngine::new(HeatmapParams::default(), red_scale()).unwrap();
        let mut surface = HeatmapSurface::new(w, h);
        let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
            assert_eq!(ctx.image.width(), w);
            Ok(ctx.window.x as f32 / w as f32)
        });
        let report = engine
            .run(&mut view, &mut surface, &mut scorer, &mut ScoreThreshold(0.3))
            .unwrap();
        assert!(!report.samples.is_empty());
    }

    assert_eq!(storage, before);
}

#[test]
fn scorer_sees_the_heatmap_painted_so_far() {
    let mut image = solid_rgba(16, 16, [10, 200, 30]);
    let params = HeatmapParams {
        slide_ratio: 1.0,
        ..Default::default()
    };
    let engine = OcclusionEngine::new(params, red_scale()).unwrap();
    let mut surface = HeatmapSurface::new(16, 16);

    let mut painted = Vec::new();
    let mut scorer = from_fn(|ctx: &ScoringContext<'_>| {
        painted.push(ctx.heatmap.pixel(4, 4)[3]);
        Ok(1.0)
    });
    engine
        .run(&mut image, &mut surface, &mut scorer, &mut NeverZoom)
        .unwrap();

    assert_eq!(painted.len(), 4);
    assert_eq!(painted[0], 0);
    assert!(painted[1] > 0, "first sample should already be composited");
}

#[test]
fn surface_matches_a_fresh_image_copy() {
    let image = noise_rgba(12, 9, 99);
    let copy = RgbaImage::from_view(&image);
    assert_eq!(copy, image);
    assert_eq!(HeatmapSurface::new(12, 9).pixel(11, 8), [0, 0, 0, 0]);
}
