#![no_main]

use tagflow_layout::{Flow, FlowItem, MeasureSpec};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header: width, spacing, pinned flag. Then 3 bytes per item.
    if data.len() < 3 {
        return;
    }
    let width = i32::from(data[0]) * 4;
    let spacing = u32::from(data[1] % 32);
    let pinned = data[2] & 1 == 1;

    let items: Vec<FlowItem> = data[3..]
        .chunks_exact(3)
        .take(256)
        .map(|chunk| {
            FlowItem::new(i32::from(chunk[0]), i32::from(chunk[1] % 64))
                .visible(chunk[2] & 0x80 == 0)
                .row_hint(usize::from(chunk[2] & 0x0f))
        })
        .collect();

    let flow = Flow::new().spacing(spacing);
    let out = flow.layout(&items, MeasureSpec::wrap_height(width), pinned);

    // Every visible item placed exactly once, in order.
    let visible: Vec<usize> = items
        .iter()
        .enumerate()
        .filter(|(_, item)| item.visible)
        .map(|(index, _)| index)
        .collect();
    let placed: Vec<usize> = out.placements().iter().map(|p| p.index).collect();
    assert_eq!(placed, visible);

    // Rows never decrease and rows with more than one item fit the width.
    for pair in out.placements().windows(2) {
        assert!(pair[1].row >= pair[0].row);
    }
    for row in 0..out.rows() {
        let members: Vec<_> = out
            .placements()
            .iter()
            .filter(|p| p.row == row)
            .collect();
        if members.len() > 1 {
            let right = members.last().map_or(0, |p| p.rect.right());
            assert!(right <= width as u32, "row {row} overflows {width}");
        }
    }

    // Same input, same output.
    assert_eq!(out, flow.layout(&items, MeasureSpec::wrap_height(width), pinned));
});
