//! End-to-end scenarios driving the engine the way the browser binding does

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use folio_desktop::{
    Desktop, DesktopConfig, DocumentEffect, DocumentHost, FixedRandom, InputResult, OpenOutcome,
    Project, Rect, ResizeHandle, Size, SurfacePhase, Vec2, ViewMode, WindowId, WindowUpdate,
};

/// Page state as a browser would see it
#[derive(Default)]
struct Page {
    active: BTreeSet<&'static str>,
    transitions: usize,
}

#[derive(Clone, Default)]
struct RecordingHost(Rc<RefCell<Page>>);

impl RecordingHost {
    fn is(&self, name: &'static str) -> bool {
        self.0.borrow().active.contains(name)
    }

    fn is_clean(&self) -> bool {
        self.0.borrow().active.is_empty()
    }
}

impl DocumentHost for RecordingHost {
    fn apply(&mut self, effect: DocumentEffect, active: bool) {
        let name = match effect {
            DocumentEffect::SuppressSelection => "user-select",
            DocumentEffect::LockScroll => "overflow",
            DocumentEffect::CapturePointer => "listeners",
        };
        let mut page = self.0.borrow_mut();
        page.transitions += 1;
        if active {
            assert!(page.active.insert(name), "{} applied twice", name);
        } else {
            assert!(page.active.remove(name), "{} released twice", name);
        }
    }
}

const VIEWPORT: Size = Size::new(1920.0, 1080.0);

fn setup() -> (Desktop, RecordingHost) {
    let host = RecordingHost::default();
    let mut desktop =
        Desktop::new(DesktopConfig::default(), host.clone()).with_random_source(FixedRandom(0.0));
    desktop.set_viewport(VIEWPORT);
    (desktop, host)
}

fn project(id: &str) -> Rc<Project> {
    Rc::new(Project {
        id: id.to_string(),
        title: format!("Project {}", id),
        url: format!("https://{}.example.com", id),
        image_src: format!("/images/{}.png", id),
        description: String::new(),
    })
}

fn card() -> Rect {
    Rect::new(80.0, 620.0, 560.0, 420.0)
}

fn open(desktop: &mut Desktop, name: &str, now: f64) -> WindowId {
    match desktop.open_project(project(name), Some(card()), now) {
        OpenOutcome::Window(id) => id,
        other => panic!("expected a window, got {:?}", other),
    }
}

/// Open a window and park it at (100, 100)
fn open_at_100(desktop: &mut Desktop, name: &str) -> WindowId {
    let id = open(desktop, name, 0.0);
    desktop.update(id, WindowUpdate::position(Vec2::new(100.0, 100.0)));
    desktop.tick(1000.0);
    id
}

#[test]
fn open_grows_from_card_and_closes_back_into_it() {
    let (mut desktop, _) = setup();
    let id = open(&mut desktop, "atlas", 0.0);

    let first = desktop.frames(0.0).remove(0);
    assert_eq!(first.rect, card());
    assert_eq!(first.phase, SurfacePhase::Opening);
    assert!(first.loading);
    assert_eq!(first.content_url, "https://atlas.example.com");

    assert!(!desktop.tick(800.0));
    let settled = desktop.frames(800.0).remove(0);
    assert_eq!(settled.rect, Rect::new(360.0, 140.0, 1200.0, 800.0));
    assert!((settled.corner_radius - 12.0).abs() < 0.001);

    assert!(desktop.content_loaded(id));
    assert!(!desktop.frames(800.0)[0].loading);

    assert!(desktop.close(id, 1000.0));
    let closing = desktop.frames(1000.0).remove(0);
    assert_eq!(closing.content_url, "about:blank");
    assert!(!closing.interactive);

    let end = desktop.frames(1600.0).remove(0);
    assert_eq!(end.rect, card());
    assert!(end.opacity.abs() < 0.001);
    assert!((end.corner_radius - 8.0).abs() < 0.001);
}

#[test]
fn drag_below_threshold_commits_nothing() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    assert!(desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1000.0));
    assert!(host.is("user-select"));
    assert!(host.is("listeners"));

    desktop.pointer_move(Vec2::new(501.0, 121.0));
    desktop.pointer_move(Vec2::new(502.0, 120.0));
    assert_eq!(desktop.pointer_up(), InputResult::Handled);

    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.position, Vec2::new(100.0, 100.0));
    assert!(host.is_clean());
}

#[test]
fn drag_is_clamped_to_viewport() {
    let (mut desktop, _) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1000.0);
    desktop.pointer_move(Vec2::new(5000.0, -500.0));
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.position, Vec2::new(720.0, 0.0));

    desktop.pointer_move(Vec2::new(-5000.0, 5000.0));
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.position, Vec2::new(0.0, 280.0));
    desktop.pointer_up();
}

#[test]
fn resize_from_each_side() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_resize(id, ResizeHandle::BottomRight, Vec2::new(1300.0, 900.0), 0, 1000.0);
    let frame = desktop.frames(1000.0).remove(0);
    assert!(!frame.content_interactive);
    assert_eq!(frame.overlay_cursor, Some("se-resize"));

    desktop.pointer_move(Vec2::new(1350.0, 880.0));
    desktop.pointer_up();
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.size, Size::new(1250.0, 780.0));
    assert_eq!(window.position, Vec2::new(100.0, 100.0));
    assert!(host.is_clean());

    desktop.begin_resize(id, ResizeHandle::TopLeft, Vec2::new(100.0, 100.0), 0, 1000.0);
    desktop.pointer_move(Vec2::new(130.0, 110.0));
    desktop.pointer_up();
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.size, Size::new(1220.0, 770.0));
    assert_eq!(window.position, Vec2::new(130.0, 110.0));
}

#[test]
fn resize_floors_at_minimum_and_keeps_opposite_edge() {
    let (mut desktop, _) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_resize(id, ResizeHandle::Left, Vec2::new(100.0, 500.0), 0, 1000.0);
    desktop.pointer_move(Vec2::new(1200.0, 500.0));
    desktop.pointer_up();

    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.size.width, 400.0);
    assert_eq!(window.position.x + window.size.width, 1300.0);
}

#[test]
fn blur_during_drag_releases_everything() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1000.0);
    desktop.pointer_move(Vec2::new(550.0, 150.0));
    assert_eq!(desktop.blur(), InputResult::Handled);
    assert!(host.is_clean());
    assert!(!desktop.is_gesturing());

    // A release arriving after the blur finds nothing to end
    assert_eq!(desktop.pointer_up(), InputResult::Unhandled);
    assert_eq!(desktop.pointer_move(Vec2::new(900.0, 900.0)), InputResult::Unhandled);
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.position, Vec2::new(150.0, 130.0));
}

#[test]
fn mode_update_mid_drag_ends_the_drag() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1000.0);
    assert!(desktop.update(id, WindowUpdate::mode(ViewMode::Fullscreen)));
    assert!(!desktop.is_gesturing());
    assert!(!host.is("user-select"));
    assert!(!host.is("listeners"));
    assert!(host.is("overflow"));

    assert_eq!(desktop.pointer_move(Vec2::new(600.0, 220.0)), InputResult::Unhandled);
    let window = desktop.registry().get(id).unwrap();
    assert_eq!(window.position, Vec2::new(100.0, 100.0));
    assert_eq!(desktop.frames(1000.0)[0].rect, Rect::from_size(VIEWPORT));
}

#[test]
fn closing_mid_drag_releases_effects() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1000.0);
    assert!(desktop.close(id, 1000.0));
    assert!(host.is_clean());
    assert!(!desktop.begin_move(id, Vec2::new(500.0, 120.0), 0, 1010.0));
}

#[test]
fn fullscreen_locks_scroll_until_last_window_exits() {
    let (mut desktop, host) = setup();
    let a = open_at_100(&mut desktop, "a");
    let b = open_at_100(&mut desktop, "b");

    desktop.toggle_fullscreen(a, 1000.0);
    desktop.toggle_fullscreen(b, 1000.0);
    assert!(host.is("overflow"));

    let frame = desktop.frames(1200.0).into_iter().find(|f| f.id == a).unwrap();
    assert_eq!(frame.rect, Rect::from_size(VIEWPORT));
    assert!((frame.corner_radius).abs() < 0.001);
    assert!(!frame.resizable);

    desktop.toggle_fullscreen(a, 1200.0);
    assert!(host.is("overflow"));
    desktop.close(b, 1200.0);
    assert!(!host.is("overflow"));

    let window = desktop.registry().get(a).unwrap();
    assert_eq!(window.position, Vec2::new(100.0, 100.0));
    assert_eq!(window.size, Size::new(1200.0, 800.0));
}

#[test]
fn minimized_fullscreen_window_restores_to_fullscreen() {
    let (mut desktop, host) = setup();
    let id = open_at_100(&mut desktop, "atlas");

    desktop.toggle_fullscreen(id, 1000.0);
    desktop.minimize(id, 1200.0);
    assert_eq!(
        desktop.registry().get(id).unwrap().mode,
        ViewMode::Minimized {
            from_fullscreen: true
        }
    );
    assert!(!host.is("overflow"));

    desktop.restore(id, 1400.0);
    assert_eq!(desktop.registry().get(id).unwrap().mode, ViewMode::Fullscreen);
    assert!(host.is("overflow"));
}

#[test]
fn tray_tiles_stack_in_registry_order() {
    let (mut desktop, _) = setup();
    let a = open_at_100(&mut desktop, "a");
    let b = open_at_100(&mut desktop, "b");
    let c = open_at_100(&mut desktop, "c");

    desktop.minimize(c, 1000.0);
    desktop.minimize(a, 1000.0);

    let frames = desktop.frames(1500.0);
    let tile = |id| {
        frames
            .iter()
            .find(|f| f.id == id)
            .and_then(|f| f.tray)
    };
    let tile_a = tile(a).unwrap();
    let tile_c = tile(c).unwrap();
    assert!(tile(b).is_none());

    assert_eq!(tile_a.rank, 0);
    assert_eq!(tile_c.rank, 1);
    assert_eq!(tile_a.bottom, 16.0);
    assert_eq!(tile_c.bottom, 76.0);
    assert_eq!(tile_a.right, 16.0);
    assert_eq!(tile_a.rect, Rect::new(1724.0, 1024.0, 180.0, 40.0));

    // Restoring the first tile moves the other down
    desktop.restore(a, 1500.0);
    assert_eq!(desktop.minimized_index_of(c), Some(0));
    assert_eq!(desktop.registry().front().unwrap().id, a);
}

#[test]
fn z_order_and_removal() {
    let (mut desktop, _) = setup();
    let a = open(&mut desktop, "a", 0.0);
    let b = open(&mut desktop, "b", 0.0);

    assert_eq!(desktop.registry().get(a).unwrap().z_index, 100);
    assert_eq!(desktop.registry().get(b).unwrap().z_index, 101);
    assert_eq!(desktop.bring_to_front(a), Some(102));

    desktop.close(b, 0.0);
    assert_eq!(desktop.registry().len(), 2);
    desktop.tick(599.0);
    assert_eq!(desktop.registry().len(), 2);
    desktop.tick(600.0);
    assert_eq!(desktop.registry().len(), 1);

    // Reopening the same project gives a new id and a fresh animation
    let again = open(&mut desktop, "b", 700.0);
    assert!(again > b);
    assert_eq!(desktop.phase(again), Some(SurfacePhase::Opening));
    assert_eq!(desktop.frames(700.0)[1].rect, card());
}

#[test]
fn small_screens_open_externally() {
    let (mut desktop, host) = setup();
    desktop.set_viewport(Size::new(599.0, 900.0));

    assert_eq!(
        desktop.open_project(project("atlas"), Some(card()), 0.0),
        OpenOutcome::External("https://atlas.example.com".to_string())
    );
    assert!(desktop.registry().is_empty());
    assert_eq!(host.0.borrow().transitions, 0);
}

#[test]
fn engine_drop_restores_page() {
    let (mut desktop, host) = setup();
    let a = open_at_100(&mut desktop, "a");
    let b = open_at_100(&mut desktop, "b");
    desktop.toggle_fullscreen(a, 1000.0);
    desktop.begin_move(b, Vec2::new(500.0, 120.0), 0, 1000.0);

    assert!(!host.is_clean());
    drop(desktop);
    assert!(host.is_clean());
}
