//! Integration tests for the scaled preview and hit-testing

use pretty_assertions::assert_eq;
use svg_design_inspector::preview::{stroke_for, Point};
use svg_design_inspector::{analyze, render_preview, Config, PreviewConfig, Viewport};

#[test]
fn test_wide_design_limited_by_width() {
    let config = PreviewConfig::default();
    // (600 - 30) / 1140 = 0.5, (300 - 30) / 100 = 2.7
    let viewport = Viewport::fit(1140.0, 100.0, &config);
    assert_eq!(viewport.scale, 0.5);
    assert_eq!(viewport.padding, 15.0);
}

#[test]
fn test_hit_prefers_topmost_rect() {
    let design = analyze(
        r#"<svg width="100" height="100">
             <rect x="0" y="0" width="60" height="60"/>
             <rect x="40" y="40" width="60" height="60"/>
           </svg>"#,
        "overlap.svg",
    )
    .unwrap();
    let config = PreviewConfig::new().with_canvas_size(230.0, 230.0);
    // scale (230 - 30) / 100 = 2
    let viewport = Viewport::fit(100.0, 100.0, &config);
    assert_eq!(viewport.scale, 2.0);

    let items = design.items();
    assert_eq!(viewport.hit_test(items, Point::new(20.0, 20.0)), Some(0));
    // overlap: 40..60 in design space, 95..135 on the surface
    assert_eq!(viewport.hit_test(items, Point::new(110.0, 110.0)), Some(1));
    assert_eq!(viewport.hit_test(items, Point::new(214.0, 214.0)), Some(1));
    // right edge of the second rect is 15 + 100 * 2 = 215, edges included
    assert_eq!(viewport.hit_test(items, Point::new(215.0, 215.0)), Some(1));
    assert_eq!(viewport.hit_test(items, Point::new(216.0, 216.0)), None);
    assert_eq!(viewport.hit_test(items, Point::new(5.0, 5.0)), None);
}

#[test]
fn test_hover_highlight_in_preview() {
    let design = analyze(
        r##"<svg width="100" height="100">
             <rect width="10" height="10" fill="#111111"/>
             <rect x="20" width="10" height="10" fill="#222222"/>
             <rect x="95" width="10" height="10" fill="#333333"/>
           </svg>"##,
        "hover.svg",
    )
    .unwrap();
    let config = PreviewConfig::default();

    let svg = render_preview(&design, &config, Some(1));
    assert_eq!(svg.matches(r#"class="preview-item""#).count(), 3);
    assert_eq!(svg.matches(r##"stroke="#4F46E5""##).count(), 1);
    assert_eq!(svg.matches(r##"stroke="#FF0000""##).count(), 1);
    assert_eq!(svg.matches(r##"stroke="#374151""##).count(), 1);

    // Hovering an out-of-bounds rect keeps it red
    let svg = render_preview(&design, &config, Some(2));
    assert_eq!(svg.matches(r##"stroke="#4F46E5""##).count(), 0);
    assert_eq!(stroke_for(&design.items()[2], true, &config).color, "#FF0000");
}

#[test]
fn test_empty_canvas_preview_falls_back_to_unit_scale() {
    let design = analyze(r#"<svg><rect width="10" height="10"/></svg>"#, "nosize.svg").unwrap();
    let config = PreviewConfig::default();
    let viewport = Viewport::fit(design.svg_width(), design.svg_height(), &config);
    assert_eq!(viewport.scale, 1.0);

    let svg = render_preview(&design, &config, None);
    assert!(svg.starts_with(r#"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="300""#));
    assert!(svg.contains(r#"data-index="0" x="15" y="15" width="10" height="10""#));
}

#[test]
fn test_preview_respects_config_file() {
    let config = Config::from_str(
        r##"
[preview]
canvas_width = 130
canvas_height = 130
padding = 5
background = "#FFFFFF"
"##,
    )
    .unwrap();
    let design = analyze(r#"<svg width="60" height="30"><rect width="30" height="30"/></svg>"#, "c.svg").unwrap();

    let svg = render_preview(&design, &config.preview, None);
    // scale min(120 / 60, 120 / 30) = 2
    assert!(svg.contains(r##"class="preview-canvas" x="5" y="5" width="120" height="60" fill="#FFFFFF""##));
    assert!(svg.contains(r#"x="5" y="5" width="60" height="60""#));
}
