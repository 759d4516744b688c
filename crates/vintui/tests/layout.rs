//! Layout engine behavior: intrinsic sizing, the six alignment
//! policies, grow distribution, clipping, and relative rects.

use vintui::{Align, Anchor, ParentConfig, Pos, Rect, Size, TextConfig, Tui, TuiConfig};

fn tui(w: i32, h: i32) -> Tui {
    let mut tui = Tui::new(TuiConfig::default());
    tui.set_size(Size::new(w, h));
    tui
}

fn label(string: &str) -> TextConfig {
    TextConfig {
        string: string.into(),
        ..Default::default()
    }
}

fn rect_of(tui: &Tui, id: vintui::WidgetId) -> Rect {
    tui.widget(id).unwrap().frame_rect()
}

#[test]
fn horizontal_start_packs_left() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 20, 5)),
                align: Align::Start,
                pos: Pos::Start,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();
    let c = tui.add_text(Anchor::Child(parent), label("C")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, a), Rect::new(0, 0, 1, 1));
    assert_eq!(rect_of(&tui, b), Rect::new(1, 0, 1, 1));
    assert_eq!(rect_of(&tui, c), Rect::new(2, 0, 1, 1));
}

#[test]
fn vertical_between_distributes_slack() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 1, 10)),
                align: Align::Between,
                is_vertical: true,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();
    let c = tui.add_text(Anchor::Child(parent), label("C")).unwrap();

    tui.relayout();

    // Free space 7 over two gaps: 3 each, the first gap takes the
    // remainder cell.
    assert_eq!(rect_of(&tui, a).y, 0);
    assert_eq!(rect_of(&tui, b).y, 5);
    assert_eq!(rect_of(&tui, c).y, 9);
}

#[test]
fn evenly_shares_the_axis() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                align: Align::Evenly,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, a), Rect::new(0, 0, 5, 1));
    assert_eq!(rect_of(&tui, b), Rect::new(5, 0, 5, 1));
}

#[test]
fn evenly_remainder_goes_to_first_children() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                align: Align::Evenly,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();
    let c = tui.add_text(Anchor::Child(parent), label("C")).unwrap();

    tui.relayout();

    // 10 / 3 = 3 remainder 1: widths 4, 3, 3.
    assert_eq!(rect_of(&tui, a), Rect::new(0, 0, 4, 1));
    assert_eq!(rect_of(&tui, b), Rect::new(4, 0, 3, 1));
    assert_eq!(rect_of(&tui, c), Rect::new(7, 0, 3, 1));
}

#[test]
fn atomic_child_hides_on_overflow() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 3, 1)),
                ..Default::default()
            },
        )
        .unwrap();

    let hello = tui
        .add_text(
            Anchor::Child(parent),
            TextConfig {
                string: "HELLO".into(),
                is_atomic: true,
                ..Default::default()
            },
        )
        .unwrap();

    tui.relayout();

    assert!(tui.widget(parent).unwrap().is_visible());
    assert!(!tui.widget(hello).unwrap().is_visible());
}

#[test]
fn non_atomic_child_clips_instead() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 3, 1)),
                ..Default::default()
            },
        )
        .unwrap();

    let hello = tui
        .add_text(Anchor::Child(parent), label("HELLO"))
        .unwrap();

    tui.relayout();

    let rect = rect_of(&tui, hello);
    assert!(tui.widget(hello).unwrap().is_visible());
    assert_eq!(rect.w, 3);
}

#[test]
fn decorations_add_up_in_intrinsic_size() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                has_padding: true,
                has_shadow: true,
                border: vintui::Border {
                    is_active: true,
                    ..Default::default()
                },
                is_vertical: true,
                ..Default::default()
            },
        )
        .unwrap();

    let child = tui.add_text(Anchor::Child(parent), label("abc")).unwrap();

    tui.relayout();

    // 3 + padding 4 + border 2 + shadow 2 wide; 1 + 2 + 2 + 1 tall.
    assert_eq!(rect_of(&tui, parent), Rect::new(0, 0, 11, 6));
    // Content origin: border 1 + padding 2 across, border 1 + padding 1 down.
    assert_eq!(rect_of(&tui, child), Rect::new(3, 2, 3, 1));
}

#[test]
fn grow_child_absorbs_slack() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                ..Default::default()
            },
        )
        .unwrap();

    let grower = tui
        .add_text(
            Anchor::Child(parent),
            TextConfig {
                string: "A".into(),
                w_grow: true,
                ..Default::default()
            },
        )
        .unwrap();
    let fixed = tui.add_text(Anchor::Child(parent), label("B")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, grower), Rect::new(0, 0, 9, 1));
    assert_eq!(rect_of(&tui, fixed), Rect::new(9, 0, 1, 1));
}

#[test]
fn center_alignment_offsets_group() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                align: Align::Center,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("ABCD")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, a), Rect::new(3, 0, 4, 1));
}

#[test]
fn end_alignment_pushes_to_far_edge() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                align: Align::End,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("ABCD")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, a), Rect::new(6, 0, 4, 1));
}

#[test]
fn around_alignment_pads_both_edges() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 1, 10)),
                align: Align::Around,
                is_vertical: true,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();

    tui.relayout();

    // Slack 8 over three gaps of 2, remainder 2: one extra cell before
    // the first child.
    assert_eq!(rect_of(&tui, a).y, 3);
    assert_eq!(rect_of(&tui, b).y, 6);
}

#[test]
fn gap_separates_children() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 1)),
                has_gap: true,
                ..Default::default()
            },
        )
        .unwrap();

    let a = tui.add_text(Anchor::Child(parent), label("A")).unwrap();
    let b = tui.add_text(Anchor::Child(parent), label("B")).unwrap();

    tui.relayout();

    // Two columns of gap between horizontal siblings.
    assert_eq!(rect_of(&tui, a).x, 0);
    assert_eq!(rect_of(&tui, b).x, 3);
}

#[test]
fn relative_rect_resolves_against_parent() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 20, 10)),
                ..Default::default()
            },
        )
        .unwrap();

    let full = tui
        .add_text(
            Anchor::Child(parent),
            TextConfig {
                string: "X".into(),
                rect: Some(Rect::new(0, 0, 0, 0)),
                ..Default::default()
            },
        )
        .unwrap();

    let corner = tui
        .add_text(
            Anchor::Child(parent),
            TextConfig {
                string: "X".into(),
                rect: Some(Rect::new(-5, -1, 5, 1)),
                ..Default::default()
            },
        )
        .unwrap();

    tui.relayout();

    // w/h of zero mean "parent extent"; negative x/y count from the
    // parent's far edge.
    assert_eq!(rect_of(&tui, full), Rect::new(0, 0, 20, 10));
    assert_eq!(rect_of(&tui, corner), Rect::new(15, 9, 5, 1));
}

#[test]
fn hidden_child_and_descendants_are_invisible() {
    let mut tui = tui(80, 24);

    let outer = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 20, 10)),
                ..Default::default()
            },
        )
        .unwrap();

    let inner = tui
        .add_parent(
            Anchor::Child(outer),
            ParentConfig {
                is_hidden: true,
                ..Default::default()
            },
        )
        .unwrap();

    let leaf = tui.add_text(Anchor::Child(inner), label("X")).unwrap();

    tui.relayout();

    assert!(!tui.widget(inner).unwrap().is_visible());
    assert!(!tui.widget(leaf).unwrap().is_visible());
}

#[test]
fn contain_child_takes_full_cross_extent() {
    let mut tui = tui(80, 24);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(0, 0, 10, 5)),
                ..Default::default()
            },
        )
        .unwrap();

    let contained = tui
        .add_text(
            Anchor::Child(parent),
            TextConfig {
                string: "A".into(),
                is_contain: true,
                ..Default::default()
            },
        )
        .unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, contained).h, 5);
}

#[test]
fn visible_children_stay_inside_parent() {
    let mut tui = tui(40, 12);

    let parent = tui
        .add_parent(
            Anchor::Root,
            ParentConfig {
                rect: Some(Rect::new(2, 1, 30, 8)),
                has_padding: true,
                border: vintui::Border {
                    is_active: true,
                    ..Default::default()
                },
                is_vertical: true,
                ..Default::default()
            },
        )
        .unwrap();

    let mut children = Vec::new();
    for string in ["one", "two", "three", "four"] {
        children.push(tui.add_text(Anchor::Child(parent), label(string)).unwrap());
    }

    tui.relayout();

    let outer = rect_of(&tui, parent);
    for child in children {
        let widget = tui.widget(child).unwrap();
        if widget.is_visible() {
            let rect = widget.frame_rect();
            assert!(
                outer.contains_rect(&rect),
                "{rect:?} escapes {outer:?}"
            );
        }
    }
}

#[test]
fn childless_auto_parent_disappears() {
    let mut tui = tui(80, 24);

    // No rect and no children: the intrinsic size is empty.
    let empty = tui.add_parent(Anchor::Root, ParentConfig::default()).unwrap();

    tui.relayout();

    assert!(!tui.widget(empty).unwrap().is_visible());
}

#[test]
fn top_level_without_rect_uses_intrinsic_size() {
    let mut tui = tui(80, 24);

    let text = tui.add_text(Anchor::Root, label("hello")).unwrap();

    tui.relayout();

    assert_eq!(rect_of(&tui, text), Rect::new(0, 0, 5, 1));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        // Visible aligned children always land inside their parent.
        #[test]
        fn children_stay_inside_parent(
            parent_w in 1..40i32,
            parent_h in 1..12i32,
            vertical in proptest::bool::ANY,
            labels in proptest::collection::vec("[a-z]{1,6}", 1..6),
            align in 0..6i32,
        ) {
            let mut tui = tui(80, 24);

            let align = match align {
                0 => Align::Start,
                1 => Align::Center,
                2 => Align::End,
                3 => Align::Between,
                4 => Align::Around,
                _ => Align::Evenly,
            };

            let parent = tui
                .add_parent(
                    Anchor::Root,
                    ParentConfig {
                        rect: Some(Rect::new(0, 0, parent_w, parent_h)),
                        is_vertical: vertical,
                        align,
                        ..Default::default()
                    },
                )
                .unwrap();

            let mut children = Vec::new();
            for string in &labels {
                children.push(tui.add_text(Anchor::Child(parent), label(string)).unwrap());
            }

            tui.relayout();

            let outer = rect_of(&tui, parent);
            for child in children {
                let widget = tui.widget(child).unwrap();
                if widget.is_visible() {
                    let rect = widget.frame_rect();
                    prop_assert!(
                        outer.contains_rect(&rect),
                        "{:?} escapes {:?}",
                        rect,
                        outer
                    );
                }
            }
        }
    }
}

#[test]
fn unwrappable_text_sits_the_frame_out() {
    let mut tui = tui(4, 24);

    // A single word wider than the whole screen cannot wrap.
    let text = tui.add_text(Anchor::Root, label("toowide")).unwrap();

    tui.relayout();

    assert!(!tui.widget(text).unwrap().is_visible());
}
