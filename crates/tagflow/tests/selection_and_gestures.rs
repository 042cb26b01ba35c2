#![forbid(unsafe_code)]

//! Selection toggling and raw pointer routing through `TagGroup`.
//!
//! Run:
//!   cargo test -p tagflow --test selection_and_gestures

use std::time::{Duration, Instant};

use tagflow::{
    Flow, GestureConfig, MeasureSpec, NoopListener, PointerEvent, RenderCommand, SelectionChange,
    SelectionNoopReason, Size, Tag, TagGroup, TagGroupConfig, TagId,
};

type Seen = Vec<(TagId, bool)>;

fn config() -> TagGroupConfig {
    TagGroupConfig::default()
        .flow(Flow::new().spacing(10))
        .gesture(
            GestureConfig::default()
                .long_press_threshold(Duration::from_millis(500))
                .tap_slop(3),
        )
}

fn build<L>(listener: L) -> (TagGroup<&'static str, Vec<RenderCommand>, L>, Vec<TagId>)
where
    L: tagflow::TagListener<&'static str>,
{
    let mut group = TagGroup::with_listener(config(), Vec::new(), listener);
    group.on_container_resized(MeasureSpec::wrap_height(250));
    let ids = group.add_tags(["A", "B", "C", "D", "E"]);
    for &id in &ids {
        group.on_size_available(id, 100, 30);
    }
    group.sink_mut().clear();
    (group, ids)
}

fn labels<L: tagflow::TagListener<&'static str>>(
    group: &TagGroup<&'static str, Vec<RenderCommand>, L>,
) -> String {
    group.tags().map(|tag| *tag.content()).collect()
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn activation_toggles_and_notifies_once() {
    let mut seen: Seen = Vec::new();
    let (mut group, ids) = build(|tag: &Tag<&'static str>| seen.push((tag.id(), tag.is_selected())));

    assert_eq!(group.on_tag_activated(ids[2]), SelectionChange::Selected);
    assert!(group.tag(ids[2]).is_some_and(Tag::is_selected));
    assert_eq!(group.on_tag_activated(ids[2]), SelectionChange::Deselected);
    drop(group);

    assert_eq!(seen, vec![(ids[2], true), (ids[2], false)]);
}

#[test]
fn selection_never_touches_layout() {
    let (mut group, ids) = build(NoopListener);
    let before = group.layout().clone();

    group.on_tag_activated(ids[0]);
    group.on_tag_activated(ids[4]);

    assert_eq!(group.layout(), &before);
    assert!(group.sink().is_empty());
    assert_eq!(labels(&group), "ABCDE");
}

#[test]
fn dragged_tag_cannot_be_toggled() {
    let mut calls = 0usize;
    let (mut group, ids) = build(|_: &Tag<&'static str>| calls += 1);
    group.on_long_press_start(ids[1]);

    assert_eq!(
        group.on_tag_activated(ids[1]),
        SelectionChange::Ignored {
            reason: SelectionNoopReason::TagBeingDragged
        }
    );
    assert_eq!(group.on_tag_activated(ids[3]), SelectionChange::Selected);
    drop(group);
    assert_eq!(calls, 1);
}

#[test]
fn selection_survives_reorder() {
    let (mut group, ids) = build(NoopListener);
    group.on_tag_activated(ids[0]);
    group.on_long_press_start(ids[0]);
    group.on_pointer_move(150, 50);
    group.on_pointer_release();

    assert_eq!(labels(&group), "BCDAE");
    assert!(group.tag(ids[0]).is_some_and(Tag::is_selected));
}

#[test]
fn unknown_tag_activation_is_ignored() {
    let (mut group, ids) = build(NoopListener);
    group.remove_tag(ids[0]);
    assert_eq!(
        group.on_tag_activated(ids[0]),
        SelectionChange::Ignored {
            reason: SelectionNoopReason::UnknownTag
        }
    );
}

// ============================================================================
// Pointer routing
// ============================================================================

#[test]
fn quick_press_is_a_tap() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.handle_pointer(&PointerEvent::up(51, 10), t0 + Duration::from_millis(80));

    assert!(group.tag(ids[0]).is_some_and(Tag::is_selected));
    assert!(!group.is_dragging());
}

#[test]
fn moving_past_slop_is_neither_tap_nor_drag() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.handle_pointer(&PointerEvent::moved(80, 10), t0 + Duration::from_millis(50));
    group.handle_pointer(&PointerEvent::up(80, 10), t0 + Duration::from_millis(900));

    assert!(!group.tag(ids[0]).is_some_and(Tag::is_selected));
    assert!(!group.is_dragging());
}

#[test]
fn held_press_starts_drag_on_tick() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.tick(t0 + Duration::from_millis(200));
    assert!(!group.is_dragging());

    group.tick(t0 + Duration::from_millis(600));
    assert!(group.is_dragging());
    assert_eq!(
        group.sink().as_slice(),
        &[RenderCommand::DragSource {
            id: ids[0],
            active: true
        }]
    );
}

#[test]
fn full_gesture_reorders_and_drops() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.tick(t0 + Duration::from_millis(550));
    group.handle_pointer(&PointerEvent::moved(150, 50), t0 + Duration::from_millis(700));
    assert_eq!(labels(&group), "BCDAE");
    assert!(group.is_dragging());

    group.handle_pointer(&PointerEvent::up(150, 50), t0 + Duration::from_millis(800));
    assert!(!group.is_dragging());
    assert_eq!(labels(&group), "BCDAE");
    assert_eq!(group.model().position(ids[0]), Some(3));
    // A long press never selects.
    assert!(!group.tag(ids[0]).is_some_and(Tag::is_selected));
}

#[test]
fn late_move_emits_long_press_first() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    // No tick: the overdue long press is recognized on the first move.
    group.handle_pointer(&PointerEvent::down(150, 50), t0);
    group.handle_pointer(&PointerEvent::moved(50, 10), t0 + Duration::from_millis(700));

    assert!(group.is_dragging());
    assert_eq!(labels(&group), "DABCE");
    assert_eq!(group.model().position(ids[3]), Some(0));
}

#[test]
fn platform_cancel_ends_drag() {
    let (mut group, ids) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.tick(t0 + Duration::from_millis(600));
    group.handle_pointer(&PointerEvent::moved(150, 50), t0 + Duration::from_millis(650));
    group.handle_pointer(&PointerEvent::cancel(), t0 + Duration::from_millis(700));

    assert!(!group.is_dragging());
    assert_eq!(group.model().position(ids[0]), Some(3));
}

#[test]
fn release_outside_via_pointer_cancels() {
    let (mut group, _) = build(NoopListener);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(50, 10), t0);
    group.tick(t0 + Duration::from_millis(600));
    group.handle_pointer(&PointerEvent::up(50, 500), t0 + Duration::from_millis(700));

    assert!(!group.is_dragging());
    assert_eq!(labels(&group), "ABCDE");
}

#[test]
fn tap_on_empty_space_does_nothing() {
    let mut calls = 0usize;
    let (mut group, _) = build(|_: &Tag<&'static str>| calls += 1);
    let t0 = Instant::now();

    group.handle_pointer(&PointerEvent::down(230, 100), t0);
    group.handle_pointer(&PointerEvent::up(230, 100), t0 + Duration::from_millis(10));
    drop(group);
    assert_eq!(calls, 0);
}

#[test]
fn tag_at_hits_current_placements() {
    let (group, ids) = build(NoopListener);
    assert_eq!(group.tag_at(10, 10), Some(ids[0]));
    assert_eq!(group.tag_at(120, 45), Some(ids[3]));
    assert_eq!(group.tag_at(105, 10), None);
    assert_eq!(group.tag_at(-1, 10), None);
}

// ============================================================================
// Tag list edits
// ============================================================================

#[test]
fn hidden_tags_take_no_space() {
    let (mut group, ids) = build(NoopListener);
    assert!(group.set_visible(ids[0], false));
    assert_eq!(group.placement(ids[0]), None);
    assert_eq!(group.tag_at(10, 10), Some(ids[1]));
    assert_eq!(group.layout().rows(), 2);

    assert!(group.set_visible(ids[0], true));
    assert_eq!(group.layout().rows(), 3);
}

#[test]
fn unmeasured_tags_are_skipped_until_sized() {
    let (mut group, _) = build(NoopListener);
    let late = group.add_tag("F");
    assert_eq!(group.placement(late), None);
    assert_eq!(group.layout().rows(), 3);

    assert!(group.on_size_available(late, 100, 30));
    assert_eq!(group.layout().rows(), 3);
    assert!(group.placement(late).is_some());
}

#[test]
fn set_tags_replaces_everything() {
    let (mut group, ids) = build(NoopListener);
    let fresh = group.set_tags(["x", "y"]);
    assert_eq!(fresh.len(), 2);
    assert!(group.tag(ids[0]).is_none());
    assert_eq!(labels(&group), "xy");
    assert_eq!(group.container_size(), Size::new(0, 0));
    assert!(!group.on_size_available(ids[0], 10, 10));
}

#[test]
fn config_round_trips_through_json() {
    let json = r#"{"flow":{"horizontal_spacing":8},"cancel_policy":"restore_order"}"#;
    let config: TagGroupConfig = serde_json::from_str(json).expect("config");
    assert_eq!(config.flow.horizontal_spacing, 8);
    assert_eq!(config.flow.vertical_spacing, tagflow::DEFAULT_SPACING);
    assert_eq!(config.cancel_policy, tagflow::CancelPolicy::RestoreOrder);
    assert_eq!(config.gesture, GestureConfig::default());
}
