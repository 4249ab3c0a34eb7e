//! Focus and visibility tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use proptest::prelude::*;
    use sash::{
        Alignment, Attach, FocusManager, NodeId, Tree, Window,
        error::Result,
        event::key::{Key, KeyCode},
        geom::Rect,
        style::PlainStyle,
        testing::{Probe, Recorder},
        widgets::{Panel, TextEdit},
    };

    fn probe_tree(rec: &Recorder) -> Tree {
        Tree::new(Probe::new("root", rec), Arc::new(PlainStyle::new()))
    }

    #[test]
    fn no_focusable_descendant() -> Result<()> {
        let rec = Recorder::new();
        let mut t = probe_tree(&rec);
        let root = t.root();
        let a = t.add_child(root, Probe::new("a", &rec).focusable(), Alignment::Left)?;
        let group = t.add_child(root, Probe::new("g", &rec), Alignment::Fill)?;
        t.add_child(group, Probe::new("x", &rec), Alignment::Fill)?;
        assert_eq!(t.set_focus(a, true), Some(a));
        rec.take();

        assert_eq!(t.set_focus(group, true), None);
        assert_eq!(t.focused(), Some(a));
        assert!(rec.take().is_empty());
        Ok(())
    }

    #[test]
    fn destroy_releases_focus() -> Result<()> {
        let rec = Recorder::new();
        let mut t = probe_tree(&rec);
        let root = t.root();
        let group = t.add_child(root, Probe::new("g", &rec), Alignment::Fill)?;
        let leaf = t.add_child(group, Probe::new("leaf", &rec).focusable(), Alignment::Fill)?;
        t.set_focus(leaf, true);
        rec.take();

        t.destroy(group)?;
        assert_eq!(t.focused(), None);
        assert!(!t.contains(leaf));
        let log = rec.take();
        assert!(log.contains(&"leaf:lost_focus".to_string()));
        let leaf_gone = log.iter().position(|e| e == "leaf:destroy");
        let group_gone = log.iter().position(|e| e == "g:destroy");
        assert!(leaf_gone < group_gone);
        Ok(())
    }

    #[test]
    fn remove_releases_focus() -> Result<()> {
        let rec = Recorder::new();
        let mut t = probe_tree(&rec);
        let root = t.root();
        let leaf = t.add_child(root, Probe::new("leaf", &rec).focusable(), Alignment::Fill)?;
        t.set_focus(leaf, true);
        t.remove(root, leaf)?;
        assert_eq!(t.focused(), None);
        assert!(t.contains(leaf));
        assert!(!t.is_visible(leaf));
        Ok(())
    }

    #[test]
    fn disabled_node_refuses_focus() -> Result<()> {
        let rec = Recorder::new();
        let mut t = probe_tree(&rec);
        let root = t.root();
        let a = t.add_child(root, Probe::new("a", &rec).focusable(), Alignment::Left)?;
        let b = t.add_child(root, Probe::new("b", &rec).focusable(), Alignment::Left)?;
        t.set_focus(a, true);
        t.enable(b, false)?;
        assert_eq!(t.set_focus(b, true), None);
        assert!(t.is_focused(a));
        Ok(())
    }

    #[test]
    fn tab_cycles_through_window() -> Result<()> {
        let mut w = Window::with_root(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Panel::new(),
            Arc::new(PlainStyle::new()),
        );
        let root = w.root();
        let tree = w.tree_mut();
        let first = tree.add_child(root, TextEdit::new(""), top(10.0))?;
        let second = tree.add_child(root, TextEdit::new(""), top(10.0))?;
        w.show(true);

        let tab = Key::from(KeyCode::Tab);
        w.key_down(tab);
        assert_eq!(w.tree().focused(), Some(first));
        w.key_down(Key::from('a'));
        w.key_down(tab);
        assert_eq!(w.tree().focused(), Some(second));
        w.key_down(tab);
        assert_eq!(w.tree().focused(), Some(first));
        assert_eq!(w.tree().widget::<TextEdit>(first)?.text(), "a");
        Ok(())
    }

    #[test]
    fn tab_skips_hidden_nodes() -> Result<()> {
        let mut w = Window::with_root(
            Rect::new(0.0, 0.0, 100.0, 40.0),
            Panel::new(),
            Arc::new(PlainStyle::new()),
        );
        let root = w.root();
        let tree = w.tree_mut();
        let hidden = tree.add_child(root, TextEdit::new(""), top(10.0))?;
        let group = tree.add_child(root, Panel::new(), top(10.0))?;
        let nested = tree.add_child(group, TextEdit::new(""), Alignment::Fill)?;
        let shown = tree.add_child(root, TextEdit::new(""), top(10.0))?;
        tree.show(hidden, false)?;
        tree.show(group, false)?;
        w.show(true);

        let tab = Key::from(KeyCode::Tab);
        assert!(w.key_down(tab));
        assert_eq!(w.tree().focused(), Some(shown));
        assert!(w.key_down(tab));
        assert_eq!(w.tree().focused(), Some(shown));
        assert!(!w.tree().is_focused(hidden));
        assert!(!w.tree().is_focused(nested));
        Ok(())
    }

    fn top(h: f32) -> Attach {
        Attach::new(Alignment::Top).size(0.0, h)
    }

    /// Build a chain below the root, one node per flag.
    fn chain(t: &mut Tree, flags: &[bool]) -> Vec<NodeId> {
        let mut ids = Vec::new();
        let mut parent = t.root();
        for _ in flags {
            let id = t.add_child(parent, Panel::new(), Alignment::Fill).unwrap();
            ids.push(id);
            parent = id;
        }
        for (id, visible) in ids.iter().zip(flags) {
            t.show(*id, *visible).unwrap();
        }
        ids
    }

    proptest! {
        #[test]
        fn visible_iff_whole_chain_visible(
            root_visible in any::<bool>(),
            flags in prop::collection::vec(any::<bool>(), 1..8),
        ) {
            let mut t = Tree::default();
            let ids = chain(&mut t, &flags);
            t.show(t.root(), root_visible).unwrap();
            for (i, id) in ids.iter().enumerate() {
                let want = root_visible && flags[..=i].iter().all(|f| *f);
                prop_assert_eq!(t.is_visible(*id), want);
            }
        }

        #[test]
        fn detached_nodes_are_never_visible(visible in any::<bool>()) {
            let mut t = Tree::default();
            let id = t.create_detached(Panel::new());
            t.show(id, visible).unwrap();
            prop_assert!(!t.is_visible(id));
        }
    }
}
