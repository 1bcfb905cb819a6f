mod common;

use std::time::Instant;

use common::*;
use folio::core::ambient::dice::{BOUNDS_MAX, BOUNDS_MIN, DieControl, Protocol};
use folio::core::ambient::ripple::RIPPLE_SLOTS;
use folio::core::boundary::Contained;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn die_control(page: &Page, protocol: Protocol) -> DieControl {
    let scene = page
        .ambient()
        .dice()
        .and_then(Contained::mounted)
        .expect("dice mounted");
    scene
        .dice()
        .iter()
        .find(|die| die.protocol() == protocol)
        .map(|die| die.control())
        .expect("die present")
}

#[rstest]
#[case(400.0, 30, 1.0, 3.0)]
#[case(768.0, 30, 1.0, 3.0)]
#[case(769.0, 80, 2.0, 5.0)]
#[case(1200.0, 80, 2.0, 5.0)]
fn particle_table_follows_viewport(
    #[case] width: f32,
    #[case] count: usize,
    #[case] min_size: f32,
    #[case] max_size: f32,
) {
    let page = make_page(test_config(), (width, 800.0));
    let particles = page.ambient().particles().particles();
    assert_eq!(particles.len(), count);
    assert!(
        particles
            .iter()
            .all(|p| p.size >= min_size && p.size < max_size)
    );
}

#[test]
fn same_seed_same_field() {
    let a = desktop_page();
    let b = desktop_page();
    assert_eq!(a.ambient().particles().particles(), b.ambient().particles().particles());
}

#[test]
fn crossing_breakpoint_reseeds_particles() {
    let mut page = desktop_page();
    let now = Instant::now();
    page.handle(PageEvent::Resized { width: 1000.0, height: 700.0 }, now);
    assert_eq!(page.ambient().particles().len(), 80);

    page.handle(PageEvent::Resized { width: 400.0, height: 700.0 }, now);
    assert_eq!(page.ambient().particles().len(), 30);
}

#[test]
fn reduced_motion_renders_nothing() {
    let mut page = make_page(reduced_motion_config(), DESKTOP);
    let start = Instant::now();
    assert!(page.ambient().is_empty());
    assert_eq!(page.ambient().element_count(), 0);
    assert_eq!(page.ambient().orb_frames(1280.0, 800.0).count(), 0);

    page.handle(
        PageEvent::SkillPressed {
            skill: "UVM".to_string(),
            button: Rect::new(0.0, 0.0, 80.0, 32.0),
            at: Point::new(10.0, 10.0),
        },
        start,
    );
    assert!(page.ripples("UVM").is_none());

    for frame in 1..=30 {
        page.handle(PageEvent::Frame, after(start, frame * 16));
    }
    assert_eq!(page.ambient().element_count(), 0);
}

#[test]
fn missing_graphics_falls_back_to_illustrations() {
    let page = make_page(no_graphics_config(), DESKTOP);
    assert!(matches!(page.ambient().dice(), Some(Contained::Fallback(_))));
    // 80 particles, 3 orbs, one still image
    assert_eq!(page.ambient().element_count(), 84);

    let chip = page
        .chip(&ProjectId::new("configurable-memory-dv"))
        .expect("first project has a chip");
    assert!(chip.is_fallback());
}

#[test]
fn chips_mount_for_first_and_protocol_projects() {
    let page = desktop_page();
    assert!(page.chip(&ProjectId::new("configurable-memory-dv")).is_some());
    assert!(page.chip(&ProjectId::new("protocol-dv-suite")).is_some());
    assert!(page.chip(&ProjectId::new("sync-async-fifo-dv")).is_none());
}

#[test]
fn card_hover_speeds_up_chip() {
    let mut page = desktop_page();
    let start = Instant::now();
    let id = ProjectId::new("protocol-dv-suite");
    page.handle(
        PageEvent::CardHover {
            project: id.clone(),
            hovered: true,
        },
        start,
    );
    page.handle(PageEvent::Frame, start);
    page.handle(PageEvent::Frame, after(start, 50));

    let chip = page.chip(&id).and_then(Contained::mounted).expect("chip mounted");
    assert!(chip.is_hovered());
    assert!(chip.glow > 0.0);
    assert!(!chip.lanes().is_empty());
}

#[test]
fn quick_click_launches_and_blocks_hover() {
    let mut page = desktop_page();
    let start = Instant::now();
    let die = |pointer| PageEvent::Die(Protocol::Ahb, pointer);

    page.handle(die(DiePointer::Down), start);
    page.handle(die(DiePointer::Up), after(start, 100));
    assert!(matches!(
        die_control(&page, Protocol::Ahb),
        DieControl::Cooldown { .. }
    ));

    page.handle(die(DiePointer::Enter), after(start, 500));
    assert!(matches!(
        die_control(&page, Protocol::Ahb),
        DieControl::Cooldown { .. }
    ));

    page.handle(die(DiePointer::Enter), after(start, 1700));
    assert_eq!(die_control(&page, Protocol::Ahb), DieControl::Controlled);
}

#[test]
fn slow_press_does_not_launch() {
    let mut page = desktop_page();
    let start = Instant::now();
    page.handle(PageEvent::Die(Protocol::Axi, DiePointer::Down), start);
    page.handle(PageEvent::Die(Protocol::Axi, DiePointer::Up), after(start, 300));
    assert_eq!(die_control(&page, Protocol::Axi), DieControl::Idle);
}

#[test]
fn dice_stay_inside_the_box() {
    let mut page = desktop_page();
    let start = Instant::now();
    page.handle(PageEvent::Die(Protocol::Apb, DiePointer::Down), start);
    page.handle(PageEvent::Die(Protocol::Apb, DiePointer::Up), after(start, 50));

    for frame in 1..=600 {
        page.handle(PageEvent::Frame, after(start, frame * 16));
    }

    let scene = page.ambient().dice().and_then(Contained::mounted).expect("dice mounted");
    for die in scene.dice() {
        for axis in 0..3 {
            let p = die.position[axis];
            assert!(
                p >= BOUNDS_MIN[axis] && p <= BOUNDS_MAX[axis],
                "{} axis {axis} at {p}",
                die.protocol()
            );
        }
    }
}

#[test]
fn ripples_are_bounded_and_expire() {
    let mut page = desktop_page();
    let start = Instant::now();
    let press = |x: f32| PageEvent::SkillPressed {
        skill: "UVM".to_string(),
        button: Rect::new(0.0, 0.0, 100.0, 40.0),
        at: Point::new(x, 20.0),
    };

    page.handle(press(30.0), start);
    let ripple = page
        .ripples("UVM")
        .and_then(|buffer| buffer.active().next().copied())
        .expect("ripple spawned");
    assert_eq!(ripple.size, 100.0);
    assert_eq!(ripple.origin, Point::new(-20.0, -30.0));

    for i in 1..12 {
        page.handle(press(i as f32), after(start, i));
    }
    let active = page.ripples("UVM").map_or(0, |buffer| buffer.active().count());
    assert_eq!(active, RIPPLE_SLOTS);

    page.handle(PageEvent::Frame, after(start, 700));
    assert!(page.ripples("UVM").is_none());
}
