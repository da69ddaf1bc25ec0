//! End-to-end flows for the assembled screen, headless: layout, the
//! scroll-driven snapshot lifecycle and fade values, touch routing between
//! banner and rows, momentum, and frame composition.

use scrim::{Event, HeaderScreen, Pixmap, Point, ScreenConfig, Size};
use std::sync::Arc;

fn demo_screen(header_height: u32) -> HeaderScreen {
    let config = ScreenConfig::new()
        .size(480, 800)
        .header_height(header_height)
        .row_height(56)
        .items((1..=30).map(|i| format!("Test Item {i}")).collect());
    let mut screen = HeaderScreen::new(config);
    screen.resize(Size::new(480, 800));
    screen
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_scroll_sequence_drives_snapshot_and_fade() {
    let mut screen = demo_screen(100);
    let steps = [
        (0.0_f32, 0.0_f32, false),
        (10.0, 0.142857, true),
        (50.0, 0.714286, true),
        (70.0, 1.0, true),
        (100.0, 1.0, true),
        (0.0, 0.0, false),
    ];
    for (scroll, fade, snapshot) in steps {
        screen.scroll_to(scroll);
        assert_eq!(screen.offset(), scroll as u32);
        assert!(
            approx(screen.frost().opacity(), fade),
            "fade at offset {scroll}: got {}",
            screen.frost().opacity()
        );
        assert!(approx(screen.scrim().opacity(), fade));
        assert_eq!(screen.has_snapshot(), snapshot, "snapshot at offset {scroll}");
        assert_eq!(screen.frost().has_image(), snapshot);
    }
}

#[test]
fn test_snapshot_captured_once_per_cover_cycle() {
    let mut screen = demo_screen(100);
    screen.scroll_to(10.0);
    let first = screen.snapshot().cloned().expect("captured on first scroll");

    screen.scroll_to(10.0); // unchanged offset: no work
    screen.scroll_to(50.0); // deeper into the range: same image
    screen.scroll_to(100.0); // fully covered: retained
    let later = screen.snapshot().cloned().unwrap();
    assert!(Arc::ptr_eq(&first, &later));

    // Revealing and covering again captures from scratch
    screen.scroll_to(0.0);
    assert!(screen.snapshot().is_none());
    screen.scroll_to(10.0);
    let again = screen.snapshot().cloned().unwrap();
    assert!(!Arc::ptr_eq(&first, &again));
}

#[test]
fn test_snapshot_downscales_the_banner() {
    let mut screen = demo_screen(280);
    screen.scroll_to(40.0);
    let snapshot = screen.snapshot().unwrap();
    assert_eq!(snapshot.width(), 480 / 8);
    assert_eq!(snapshot.height(), 280 / 8);
}

#[test]
fn test_layout_is_measured_once() {
    let mut screen = demo_screen(280);
    assert_eq!(screen.max_offset(), 280);
    screen.on_layout_measured(999);
    assert_eq!(screen.max_offset(), 280);
    // A later viewport change keeps the measured range too
    screen.resize(Size::new(480, 600));
    assert_eq!(screen.max_offset(), 280);
}

#[test]
fn test_events_before_layout_do_nothing() {
    let config = ScreenConfig::new()
        .header_height(280)
        .items(vec!["row".into(); 30]);
    let mut screen = HeaderScreen::new(config);
    screen.handle_event(&Event::Wheel { delta_y: 120.0 });
    screen.scroll_to(50.0);
    assert_eq!(screen.offset(), 0);
    assert!(!screen.has_snapshot());
    assert_eq!(screen.frost().opacity(), 0.0);
    assert_eq!(screen.scrim().opacity(), 0.0);
}

#[test]
fn test_touch_on_exposed_banner_forwards_to_header() {
    let mut screen = demo_screen(280);
    assert_eq!(screen.header().page(), 0);

    let on_banner = Point::new(240, 120);
    screen.handle_event(&Event::PointerDown {
        position: on_banner,
    });
    screen.handle_event(&Event::PointerUp {
        position: on_banner,
    });

    assert_eq!(screen.header().page(), 1, "tap flips the banner page");
    assert_eq!(screen.offset(), 0, "the rows did not scroll");
}

#[test]
fn test_touch_on_rows_scrolls_the_list() {
    let mut screen = demo_screen(280);
    screen.handle_event(&Event::PointerDown {
        position: Point::new(240, 500),
    });
    screen.handle_event(&Event::PointerMoved {
        position: Point::new(240, 460),
    });
    screen.handle_event(&Event::PointerUp {
        position: Point::new(240, 460),
    });

    assert_eq!(screen.offset(), 40);
    assert_eq!(screen.header().page(), 0, "the banner was not tapped");
    assert!(screen.has_snapshot());
}

#[test]
fn test_forwarding_region_shrinks_as_banner_covers() {
    let mut screen = demo_screen(280);
    screen.scroll_to(200.0); // exposed banner is 80px tall now

    let over_rows = Point::new(10, 120);
    screen.handle_event(&Event::PointerDown {
        position: over_rows,
    });
    screen.handle_event(&Event::PointerUp {
        position: over_rows,
    });
    assert_eq!(screen.header().page(), 0, "y=120 sits over the rows now");

    let over_banner = Point::new(10, 40);
    screen.handle_event(&Event::PointerDown {
        position: over_banner,
    });
    screen.handle_event(&Event::PointerUp {
        position: over_banner,
    });
    assert_eq!(screen.header().page(), 1);
}

#[test]
fn test_touch_goes_to_rows_once_banner_fully_covered() {
    let mut screen = demo_screen(280);
    screen.scroll_to(280.0);
    let top = Point::new(10, 5);
    screen.handle_event(&Event::PointerDown { position: top });
    screen.handle_event(&Event::PointerUp { position: top });
    assert_eq!(screen.header().page(), 0);
}

#[test]
fn test_release_over_banner_ends_the_drag() {
    let mut screen = demo_screen(280);
    screen.handle_event(&Event::PointerDown {
        position: Point::new(240, 400),
    });
    screen.handle_event(&Event::PointerMoved {
        position: Point::new(240, 300),
    });
    assert_eq!(screen.offset(), 100);
    // The finger is now above the row region (content top is 180)
    screen.handle_event(&Event::PointerUp {
        position: Point::new(240, 100),
    });
    assert!(!screen.tick(), "no fling after an off-row release");
    // A later move without a press must not drag the rows
    screen.handle_event(&Event::PointerMoved {
        position: Point::new(240, 600),
    });
    assert_eq!(screen.offset(), 100);
}

#[test]
fn test_capture_failure_keeps_state_and_retries() {
    let mut screen = demo_screen(280);
    screen.resize(Size::new(0, 800)); // degenerate width: banner renders empty
    screen.scroll_to(40.0);
    assert!(!screen.has_snapshot(), "empty capture source is skipped");
    assert!(
        screen.scrim().opacity() > 0.0,
        "the dim still tracks the scroll"
    );

    screen.resize(Size::new(480, 800)); // banner has pixels again
    screen.scroll_to(41.0); // the next scroll event retries the capture
    assert!(screen.has_snapshot());
}

#[test]
fn test_wheel_scrolling_saturates_the_fade() {
    let mut screen = demo_screen(100);
    screen.handle_event(&Event::Wheel { delta_y: 30.0 });
    assert_eq!(screen.offset(), 30);
    assert!(approx(screen.frost().opacity(), 30.0 / 70.0));

    for _ in 0..20 {
        screen.handle_event(&Event::Wheel { delta_y: 48.0 });
    }
    assert_eq!(screen.offset(), 100);
    assert!(approx(screen.frost().opacity(), 1.0));
    assert!(screen.has_snapshot());

    // Wheel back up to the very top clears the frost
    for _ in 0..40 {
        screen.handle_event(&Event::Wheel { delta_y: -48.0 });
    }
    assert_eq!(screen.offset(), 0);
    assert!(!screen.has_snapshot());
    assert_eq!(screen.frost().opacity(), 0.0);
}

#[test]
fn test_fling_covers_the_banner_and_keeps_the_snapshot() {
    let mut screen = demo_screen(100);
    screen.handle_event(&Event::PointerDown {
        position: Point::new(240, 700),
    });
    screen.handle_event(&Event::PointerMoved {
        position: Point::new(240, 650),
    });
    screen.handle_event(&Event::PointerUp {
        position: Point::new(240, 650),
    });
    assert_eq!(screen.offset(), 50);

    let mut frames = 0;
    while screen.tick() {
        frames += 1;
        assert!(frames < 300, "fling never settled");
    }
    assert_eq!(screen.offset(), 100);
    assert!(screen.has_snapshot());
    assert!(approx(screen.frost().opacity(), 1.0));
}

#[test]
fn test_paint_whitens_the_exposed_banner_at_full_fade() {
    let mut screen = demo_screen(280);
    let mut frame = Pixmap::new(480, 800);
    screen.paint(&mut frame, None);
    let rest = frame.pixel(5, 5).unwrap();
    assert_eq!(rest, screen.header().render().pixel(5, 5).unwrap());

    screen.scroll_to(196.0); // 70% of the range: the fade saturates at 1.0
    let mut frame = Pixmap::new(480, 800);
    screen.paint(&mut frame, None);
    let frosted = frame.pixel(5, 5).unwrap();
    assert_ne!(frosted, rest);
    // The white wash floors every channel at its base alpha
    assert!(frosted.r >= 100 && frosted.g >= 100 && frosted.b >= 100);
}
