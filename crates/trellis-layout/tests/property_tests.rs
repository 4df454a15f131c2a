//! Property tests for the box solver.
//! These check invariants over arbitrary trees, not just fixed scenes.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use trellis_layout::{FixedContent, LayoutConfig, NodeId, Offset, Scene, Size};
use trellis_style::{
    Alignment, Border, BoxSizing, Color, ComputedStyle, SizeUnits, StackDirection, Unit,
};

fn percent_width(percent: u8) -> ComputedStyle {
    ComputedStyle {
        size: SizeUnits {
            width: Unit::Percentage(f32::from(percent % 101)),
            height: Unit::Unset,
        },
        ..ComputedStyle::default()
    }
}

/// A horizontal parent with one fixed child followed by percentage-width
/// dependents.
fn budget_scene(parent_width: u16, fixed_width: u8, percents: &[u8]) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new(LayoutConfig::default());
    let parent = scene.create_box(ComputedStyle {
        size: SizeUnits::px(f32::from(parent_width), 10.0),
        stack: StackDirection::Horizontal,
        ..ComputedStyle::default()
    });
    let fixed = scene.create_box(ComputedStyle {
        size: SizeUnits::px(f32::from(fixed_width), 10.0),
        ..ComputedStyle::default()
    });
    scene.append_child(parent, fixed).unwrap();
    let mut ids = vec![parent, fixed];
    for &percent in percents.iter().take(8) {
        let child = scene.create_box(percent_width(percent));
        scene.append_child(parent, child).unwrap();
        ids.push(child);
    }
    (scene, ids)
}

fn snapshot(scene: &Scene, ids: &[NodeId]) -> Vec<(Option<Size>, Option<Offset>, Option<i32>)> {
    ids.iter()
        .map(|&id| (scene.resolved_size(id), scene.offset(id), scene.baseline(id)))
        .collect()
}

/// Percentage children never take more than the space the parent has left
/// after its static children.
#[quickcheck]
fn prop_dependents_fit_in_remaining_budget(
    parent_width: u16,
    fixed_width: u8,
    percents: Vec<u8>,
) -> TestResult {
    if u16::from(fixed_width) > parent_width {
        return TestResult::discard();
    }
    let (mut scene, ids) = budget_scene(parent_width, fixed_width, &percents);
    let _ = scene.update();

    let used: u32 = ids[2..]
        .iter()
        .filter_map(|&id| scene.resolved_size(id))
        .map(|size| size.width)
        .sum();
    TestResult::from_bool(used <= u32::from(parent_width - u16::from(fixed_width)))
}

/// Re-running layout over an unchanged tree reproduces the same result.
#[quickcheck]
fn prop_relayout_is_idempotent(parent_width: u16, fixed_width: u8, percents: Vec<u8>) -> bool {
    let (mut scene, ids) = budget_scene(parent_width, fixed_width, &percents);
    let _ = scene.update();
    let first = snapshot(&scene, &ids);

    for &id in &ids {
        scene.request_update(id, true);
    }
    let _ = scene.update();

    snapshot(&scene, &ids) == first && !scene.has_pending_update()
}

/// A content-sized line of inline leaves, each followed by a column whose
/// height is a percentage of the line and whose only child sits at the
/// bottom.
fn nested_line_scene(items: &[(u8, u8, u8)]) -> (Scene, Vec<NodeId>) {
    let mut scene = Scene::new(LayoutConfig::default());
    let line = scene.create_box(ComputedStyle {
        stack: StackDirection::Horizontal,
        ..ComputedStyle::default()
    });
    let mut ids = vec![line];
    for &(extent, percent, border) in items.iter().take(6) {
        let leaf = scene.create_leaf(
            ComputedStyle::default(),
            FixedContent::new(u32::from(extent), u32::from(extent / 2)),
        );
        let column = scene.create_box(ComputedStyle {
            size: SizeUnits {
                width: Unit::Pixel(10.0),
                height: Unit::Percentage(f32::from(percent % 101)),
            },
            border: Border::uniform(u32::from(border % 8), Color::BLACK),
            ..ComputedStyle::default()
        });
        let bottom = scene.create_leaf(
            ComputedStyle {
                alignment: Alignment::BOTTOM,
                ..ComputedStyle::default()
            },
            FixedContent::new(u32::from(extent / 3), u32::from(extent)),
        );
        scene.append_child(line, leaf).unwrap();
        scene.append_child(line, column).unwrap();
        scene.append_child(column, bottom).unwrap();
        ids.extend([leaf, column, bottom]);
    }
    (scene, ids)
}

/// Idempotence also holds when percentage-height boxes take part in
/// baseline alignment.
#[quickcheck]
fn prop_relayout_of_nested_line_is_idempotent(items: Vec<(u8, u8, u8)>) -> bool {
    let (mut scene, ids) = nested_line_scene(&items);
    let _ = scene.update();
    let first = snapshot(&scene, &ids);

    for &id in &ids {
        scene.request_update(id, true);
    }
    let _ = scene.update();

    snapshot(&scene, &ids) == first && !scene.has_pending_update()
}

/// A border-box size shrinks by the border and never below zero.
#[quickcheck]
fn prop_border_box_size_is_clamped(width: u16, border: u8) -> bool {
    let mut scene = Scene::new(LayoutConfig::default());
    let id = scene.create_box(ComputedStyle {
        size: SizeUnits::px(f32::from(width), f32::from(width)),
        border: Border::uniform(u32::from(border), Color::BLACK),
        box_sizing: BoxSizing::Border,
        ..ComputedStyle::default()
    });
    let _ = scene.update();

    let expected = u32::from(width).saturating_sub(2 * u32::from(border));
    scene.resolved_size(id) == Some(Size::new(expected, expected))
}

/// A vertical stack is exactly as tall as its children and as wide as the
/// widest one.
#[quickcheck]
fn prop_vertical_stack_accumulates(sizes: Vec<(u8, u8)>) -> bool {
    let mut scene = Scene::new(LayoutConfig::default());
    let parent = scene.create_box(ComputedStyle::default());
    for &(width, height) in &sizes {
        let child = scene.create_box(ComputedStyle {
            size: SizeUnits::px(f32::from(width), f32::from(height)),
            ..ComputedStyle::default()
        });
        scene.append_child(parent, child).unwrap();
    }
    let _ = scene.update();

    let width = sizes.iter().map(|&(w, _)| u32::from(w)).max().unwrap_or(0);
    let height = sizes.iter().map(|&(_, h)| u32::from(h)).sum();
    scene.resolved_size(parent) == Some(Size::new(width, height))
}
