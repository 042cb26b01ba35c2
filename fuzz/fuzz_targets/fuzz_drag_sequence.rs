#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tagflow::{MeasureSpec, RenderCommand, TagGroup, TagGroupConfig, TagId};

#[derive(Debug, Arbitrary)]
enum Op {
    Add { width: u8, height: u8 },
    Remove(u8),
    Hide(u8),
    Show(u8),
    Resize(u8),
    LongPress(u8),
    Move { x: i16, y: i16 },
    Release,
    Cancel,
    Activate(u8),
}

#[derive(Debug, Arbitrary)]
struct Input {
    width: u8,
    ops: Vec<Op>,
}

fn pick(group: &TagGroup<(), Vec<RenderCommand>>, n: u8) -> Option<TagId> {
    let order = group.order();
    (!order.is_empty()).then(|| order[usize::from(n) % order.len()])
}

fuzz_target!(|input: Input| {
    let mut group = TagGroup::new(TagGroupConfig::default(), Vec::<RenderCommand>::new());
    group.on_container_resized(MeasureSpec::wrap_height(i32::from(input.width) * 2));

    for op in input.ops.into_iter().take(512) {
        match op {
            Op::Add { width, height } => {
                let id = group.add_tag(());
                group.on_size_available(id, i32::from(width), i32::from(height));
            }
            Op::Remove(n) => {
                if let Some(id) = pick(&group, n) {
                    group.remove_tag(id);
                }
            }
            Op::Hide(n) => {
                if let Some(id) = pick(&group, n) {
                    group.set_visible(id, false);
                }
            }
            Op::Show(n) => {
                if let Some(id) = pick(&group, n) {
                    group.set_visible(id, true);
                }
            }
            Op::Resize(width) => {
                group.on_container_resized(MeasureSpec::wrap_height(i32::from(width) * 2));
            }
            Op::LongPress(n) => {
                if let Some(id) = pick(&group, n) {
                    group.on_long_press_start(id);
                }
            }
            Op::Move { x, y } => {
                group.on_pointer_move(i32::from(x), i32::from(y));
            }
            Op::Release => {
                group.on_pointer_release();
            }
            Op::Cancel => {
                group.on_gesture_cancelled();
            }
            Op::Activate(n) => {
                if let Some(id) = pick(&group, n) {
                    group.on_tag_activated(id);
                }
            }
        }

        // Placements always match the live sequence.
        let order = group.order();
        for placement in group.layout().placements() {
            let tag = group.model().at(placement.index).expect("placed tag exists");
            assert_eq!(tag.id(), order[placement.index]);
            assert!(tag.is_laid_out());
        }
        group.sink_mut().clear();
    }

    // Leaving the drag always settles the layout.
    group.cancel_drag();
    assert!(!group.is_dragging());
});
