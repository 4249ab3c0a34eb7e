//! Layout engine tests.

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    use proptest::prelude::*;
    use sash::{
        Alignment, Attach, Context, NodeId, Tree, Widget,
        error::Result,
        geom::Rect,
        layout::place,
        testing::CountingStyle,
        widgets::Panel,
    };

    fn counting_tree(w: f32, h: f32) -> (Tree, CountingStyle) {
        let style = CountingStyle::new();
        let mut tree = Tree::new(Panel::new(), Arc::new(style.clone()));
        let root = tree.root();
        tree.set_size(root, w, h).unwrap();
        (tree, style)
    }

    /// Asks its parent to lay out again every time it is resized.
    struct Relayout {
        resizes: Arc<AtomicUsize>,
    }

    impl Widget for Relayout {
        fn on_resize(&mut self, ctx: &mut Context<'_>) {
            self.resizes.fetch_add(1, Ordering::SeqCst);
            if let Some(parent) = ctx.node().and_then(|n| n.parent()) {
                ctx.tree().resize_children(parent);
            }
        }
    }

    #[test]
    fn nested_relayout_of_running_pass_is_suppressed() -> Result<()> {
        let (mut t, style) = counting_tree(100.0, 50.0);
        let root = t.root();
        let group = t.add_child(root, Panel::new(), Alignment::Fill)?;
        let resizes = Arc::new(AtomicUsize::new(0));
        let child = t.add_child(
            group,
            Relayout {
                resizes: resizes.clone(),
            },
            Attach::new(Alignment::Left).size(10.0, 0.0),
        )?;
        style.reset();
        resizes.store(0, Ordering::SeqCst);

        t.resize_children(group);
        assert!(resizes.load(Ordering::SeqCst) >= 1);
        assert_eq!(style.resizes(group), 1);
        assert_eq!(t.rect(child), Some(Rect::new(0.0, 0.0, 10.0, 50.0)));

        // Outside a pass the same request goes through.
        t.with_widget::<Relayout, _>(child, |_, ctx| ctx.tree().resize_children(group))?;
        assert_eq!(style.resizes(group), 2);
        Ok(())
    }

    #[test]
    fn stacked_edges() -> Result<()> {
        let (mut t, _) = counting_tree(100.0, 50.0);
        let root = t.root();
        t.set_padding(root, 1.0)?;
        let top = t.add_child(root, Panel::new(), Attach::new(Alignment::Top).size(0.0, 10.0))?;
        let left = t.add_child(root, Panel::new(), Attach::new(Alignment::Left).size(20.0, 0.0))?;
        let fill = t.add_child(root, Panel::new(), Alignment::Fill)?;

        // Client starts at (1, 1, 98, 48).
        assert_eq!(t.rect(top), Some(Rect::new(1.0, 39.0, 98.0, 10.0)));
        // Top consumed 10 + 2 + 1 of the height.
        assert_eq!(t.rect(left), Some(Rect::new(1.0, 1.0, 20.0, 35.0)));
        // Left consumed 20 + 2 + 1 of the width and advanced x by 21.
        assert_eq!(t.rect(fill), Some(Rect::new(22.0, 1.0, 75.0, 35.0)));
        Ok(())
    }

    #[test]
    fn overlap_does_not_consume() -> Result<()> {
        let (mut t, _) = counting_tree(100.0, 50.0);
        let root = t.root();
        let badge = t.add_child(
            root,
            Panel::new(),
            Attach::new(Alignment::CornerTopRight).overlap().size(10.0, 10.0),
        )?;
        let body = t.add_child(root, Panel::new(), Alignment::Fill)?;
        assert_eq!(t.rect(badge), Some(Rect::new(90.0, 40.0, 10.0, 10.0)));
        assert_eq!(t.rect(body), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        Ok(())
    }

    #[test]
    fn exhausted_client_skips_remaining_children() -> Result<()> {
        let (mut t, style) = counting_tree(100.0, 50.0);
        let root = t.root();
        let fill = t.add_child(root, Panel::new(), Alignment::Fill)?;
        let late = t.add_child(root, Panel::new(), Attach::new(Alignment::Left).size(5.0, 5.0))?;
        style.reset();
        t.resize_children(root);
        assert_eq!(style.resizes(fill), 1);
        assert_eq!(style.resizes(late), 0);
        assert_eq!(t.rect(late), Some(Rect::new(0.0, 0.0, 5.0, 5.0)));
        Ok(())
    }

    #[test]
    fn borders_collapse_client() -> Result<()> {
        let (mut t, _) = counting_tree(10.0, 50.0);
        let root = t.root();
        t.set_h_border(root, 5.0)?;
        let child = t.add_child(root, Panel::new(), Alignment::Fill)?;
        assert_eq!(t.rect(child), Some(Rect::zero()));
        Ok(())
    }

    #[test]
    fn first_size_becomes_default() -> Result<()> {
        let (mut t, _) = counting_tree(100.0, 50.0);
        let root = t.root();
        let child = t.add_child(root, Panel::new(), Alignment::Fill)?;
        let default = t.node(child).map(|n| n.default_rect());
        assert_eq!(default, Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

        t.set_size(root, 40.0, 20.0)?;
        assert_eq!(t.rect(child), Some(Rect::new(0.0, 0.0, 40.0, 20.0)));
        let default = t.node(child).map(|n| n.default_rect());
        assert_eq!(default, Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        Ok(())
    }

    #[test]
    fn set_alignment_relayouts() -> Result<()> {
        let (mut t, _) = counting_tree(100.0, 50.0);
        let root = t.root();
        let child = t.add_child(root, Panel::new(), Attach::new(Alignment::Left).size(10.0, 10.0))?;
        t.set_alignment(child, Alignment::Right)?;
        assert_eq!(t.rect(child), Some(Rect::new(90.0, 0.0, 10.0, 50.0)));
        Ok(())
    }

    /// Build a random tree under the root, returning every created node.
    fn grow(t: &mut Tree, shape: &[(usize, usize, f32, f32)]) -> Vec<NodeId> {
        let mut ids = vec![t.root()];
        for (parent, align, w, h) in shape {
            let parent = ids[parent % ids.len()];
            let alignment = Alignment::ALL[align % Alignment::ALL.len()];
            let id = t
                .add_child(parent, Panel::new(), Attach::new(alignment).size(*w, *h))
                .unwrap();
            ids.push(id);
        }
        ids
    }

    proptest! {
        #[test]
        fn edge_tags_shrink_exactly(
            tag in 0usize..12,
            cx in -50.0f32..50.0,
            cy in -50.0f32..50.0,
            cw in 0.0f32..200.0,
            ch in 0.0f32..200.0,
            w in 0.0f32..200.0,
            h in 0.0f32..200.0,
            padding in 0.0f32..5.0,
        ) {
            let alignment = Alignment::EDGES[tag];
            let before = Rect::new(cx, cy, cw, ch);
            let child = Rect::new(0.0, 0.0, w, h).clamp_size(before.size());
            let mut client = before;
            place(&mut client, child, alignment, false, padding);
            let (len, other, extent, other_before) = if alignment.consumes_width() {
                (client.w, client.h, child.w, before.h)
            } else {
                (client.h, client.w, child.h, before.w)
            };
            let want = ((if alignment.consumes_width() { before.w } else { before.h })
                - (extent + 2.0 * padding + 1.0))
                .max(0.0);
            prop_assert!((len - want).abs() < 1e-3);
            prop_assert!(len >= 0.0);
            prop_assert_eq!(other, other_before);
        }

        #[test]
        fn overlap_never_consumes(
            tag in 0usize..25,
            w in 0.0f32..100.0,
            h in 0.0f32..100.0,
        ) {
            let before = Rect::new(0.0, 0.0, 100.0, 100.0);
            let mut client = before;
            place(&mut client, Rect::new(0.0, 0.0, w, h), Alignment::ALL[tag], true, 2.0);
            prop_assert_eq!(client, before);
        }

        #[test]
        fn style_resize_once_per_pass(
            shape in prop::collection::vec((0usize..16, 0usize..25, 0.0f32..60.0, 0.0f32..60.0), 0..16),
        ) {
            let (mut t, style) = counting_tree(200.0, 100.0);
            let ids = grow(&mut t, &shape);
            style.reset();
            t.resize_children(t.root());
            prop_assert_eq!(style.resizes(t.root()), 1);
            for id in &ids {
                prop_assert!(style.resizes(*id) <= 1);
            }
            for id in &ids {
                if let Some(r) = t.rect(*id) {
                    prop_assert!(r.w >= 0.0 && r.h >= 0.0);
                }
            }
        }
    }
}
