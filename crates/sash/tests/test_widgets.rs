//! Tests for the built-in widgets, driven through a window manager.

#[cfg(test)]
mod tests {
    use sash::{
        Alignment, Attach, EventKind, FocusManager, NodeId, UiEvent, Widget, Window, WindowId,
        WindowManager,
        error::Result,
        event::{
            InputEvent,
            key::{Key, KeyCode, Mods},
            mouse::Button as MouseButton,
        },
        geom::Rect,
        testing::RecordingRenderer,
        widgets::{Button, Panel, TextEdit, ToggleButton, ValueSelect},
    };

    /// A shown window hosting one widget that fills it, with the bus drained.
    fn host<W: Widget>(widget: W) -> (WindowManager, WindowId, NodeId) {
        let mut m = WindowManager::default();
        let mut w = Window::new(Rect::new(0.0, 0.0, 100.0, 50.0));
        let root = w.root();
        let id = w
            .tree_mut()
            .add_child(root, widget, Alignment::Fill)
            .unwrap();
        let wid = m.add(w);
        m.show(wid, true).unwrap();
        m.draw_frame(&mut RecordingRenderer::default());
        m.bus().drain();
        (m, wid, id)
    }

    fn click(m: &mut WindowManager, down: (f32, f32), up: (f32, f32)) {
        m.on_input(&InputEvent::press(MouseButton::Left, down.0, down.1));
        m.on_input(&InputEvent::release(MouseButton::Left, up.0, up.1));
    }

    fn kinds(m: &WindowManager, node: NodeId) -> Vec<UiEvent> {
        m.bus()
            .drain()
            .into_iter()
            .filter(|n| n.node == node)
            .map(|n| n.event)
            .filter(|e| {
                !matches!(
                    e.kind(),
                    EventKind::MouseDown
                        | EventKind::MouseUp
                        | EventKind::KeyDown
                        | EventKind::KeyUp
                        | EventKind::GotFocus
                        | EventKind::Resize
                        | EventKind::Move
                )
            })
            .collect()
    }

    #[test]
    fn button_clicks_on_release_inside() -> Result<()> {
        let (mut m, wid, id) = host(Button::new());
        click(&mut m, (10.0, 10.0), (20.0, 10.0));
        assert_eq!(kinds(&m, id), vec![UiEvent::Click]);
        let clicks =
            m.with_window(wid, |w| w.tree().widget::<Button>(id).map(Button::clicks))??;
        assert_eq!(clicks, 1);
        // Pressing also focused the button.
        assert_eq!(m.with_window(wid, |w| w.tree().focused())?, Some(id));
        Ok(())
    }

    #[test]
    fn pressed_button_shifts_its_children() -> Result<()> {
        let (mut m, wid, id) = host(Button::new());
        let label = m.with_window(wid, |w| {
            w.tree_mut().add_child(id, Panel::new(), Alignment::Fill)
        })??;
        let rect = |m: &WindowManager| m.with_window(wid, |w| w.tree().rect(label));
        assert_eq!(rect(&m)?, Some(Rect::new(0.0, 0.0, 100.0, 50.0)));

        m.on_input(&InputEvent::press(MouseButton::Left, 50.0, 20.0));
        assert_eq!(rect(&m)?, Some(Rect::new(1.0, -1.0, 100.0, 50.0)));
        m.on_input(&InputEvent::release(MouseButton::Left, 50.0, 20.0));
        assert_eq!(rect(&m)?, Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        Ok(())
    }

    #[test]
    fn button_release_outside_is_not_a_click() -> Result<()> {
        let (mut m, wid, id) = host(Button::new());
        click(&mut m, (10.0, 10.0), (300.0, 10.0));
        assert!(kinds(&m, id).is_empty());
        let pushed = m.with_window(wid, |w| w.tree().node(id).map(|n| n.is_pushed()))?;
        assert_eq!(pushed, Some(false));
        Ok(())
    }

    #[test]
    fn button_needs_a_press() {
        let (mut m, _, id) = host(Button::new());
        m.on_input(&InputEvent::release(MouseButton::Left, 10.0, 10.0));
        assert!(kinds(&m, id).is_empty());
    }

    #[test]
    fn toggle_flips() -> Result<()> {
        let (mut m, wid, id) = host(ToggleButton::new(false));
        let checked = |m: &WindowManager| -> Result<bool> {
            m.with_window(wid, |w| {
                w.tree()
                    .widget::<ToggleButton>(id)
                    .map(ToggleButton::is_checked)
            })?
        };
        click(&mut m, (10.0, 10.0), (10.0, 10.0));
        assert!(checked(&m)?);
        click(&mut m, (10.0, 10.0), (10.0, 10.0));
        assert!(!checked(&m)?);
        assert_eq!(kinds(&m, id), vec![UiEvent::Click, UiEvent::Click]);

        // Setting the state directly does not click.
        m.with_window(wid, |w| {
            w.tree_mut()
                .with_widget::<ToggleButton, _>(id, |t, ctx| t.set_checked(ctx, true))
        })??;
        assert!(checked(&m)?);
        assert!(kinds(&m, id).is_empty());
        Ok(())
    }

    fn select(m: &WindowManager, wid: WindowId, id: NodeId) -> Result<ValueSelect> {
        m.with_window(wid, |w| w.tree().widget::<ValueSelect>(id).cloned())?
    }

    #[test]
    fn value_select_rejects_bad_ranges() -> Result<()> {
        let (m, wid, id) = host(ValueSelect::new(0.0, 10.0, 5.0, 1.0));
        let before = select(&m, wid, id)?;
        let accepted = m.with_window(wid, |w| {
            w.tree_mut().with_widget::<ValueSelect, _>(id, |v, ctx| {
                [
                    v.set_min(ctx, 20.0),
                    v.set_min(ctx, 0.0),
                    v.set_max(ctx, -1.0),
                    v.set_max(ctx, 10.0),
                    v.set_step(ctx, 0.0),
                ]
            })
        })??;
        assert_eq!(accepted, [false; 5]);
        assert_eq!(select(&m, wid, id)?, before);
        assert!(m.bus().drain().is_empty());
        Ok(())
    }

    #[test]
    fn value_select_allows_single_point_range() -> Result<()> {
        let (m, wid, id) = host(ValueSelect::new(0.0, 10.0, 5.0, 1.0));
        let accepted = m.with_window(wid, |w| {
            w.tree_mut()
                .with_widget::<ValueSelect, _>(id, |v, ctx| v.set_min(ctx, 10.0))
        })??;
        assert!(accepted);
        let v = select(&m, wid, id)?;
        assert_eq!((v.min(), v.max(), v.value()), (10.0, 10.0, 10.0));

        let accepted = m.with_window(wid, |w| {
            w.tree_mut().with_widget::<ValueSelect, _>(id, |v, ctx| {
                [v.set_min(ctx, 0.0), v.set_max(ctx, 0.0)]
            })
        })??;
        assert_eq!(accepted, [true, true]);
        let v = select(&m, wid, id)?;
        assert_eq!((v.min(), v.max(), v.value()), (0.0, 0.0, 0.0));
        Ok(())
    }

    #[test]
    fn value_select_range_pulls_value() -> Result<()> {
        let (m, wid, id) = host(ValueSelect::new(0.0, 10.0, 5.0, 1.0));
        m.with_window(wid, |w| {
            w.tree_mut()
                .with_widget::<ValueSelect, _>(id, |v, ctx| v.set_min(ctx, 7.0))
        })??;
        assert_eq!(
            kinds(&m, id),
            vec![
                UiEvent::ValueChange {
                    value: 7.0,
                    previous: 5.0
                },
                UiEvent::RangeChange {
                    min: 7.0,
                    max: 10.0,
                    value: 7.0
                },
            ]
        );

        m.with_window(wid, |w| {
            w.tree_mut()
                .with_widget::<ValueSelect, _>(id, |v, ctx| v.set_max(ctx, 8.0))
        })??;
        assert_eq!(
            kinds(&m, id),
            vec![UiEvent::RangeChange {
                min: 7.0,
                max: 8.0,
                value: 7.0
            }]
        );
        Ok(())
    }

    #[test]
    fn value_select_keys() -> Result<()> {
        let (mut m, wid, id) = host(ValueSelect::new(0.0, 10.0, 5.0, 2.0));
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;
        m.bus().drain();

        assert!(m.on_input(&InputEvent::key_down(KeyCode::Right)));
        assert_eq!(select(&m, wid, id)?.value(), 7.0);
        m.on_input(&InputEvent::key_down(KeyCode::Up));
        m.on_input(&InputEvent::key_down(KeyCode::Up));
        assert_eq!(select(&m, wid, id)?.value(), 10.0);
        m.on_input(&InputEvent::key_down(KeyCode::Home));
        assert_eq!(select(&m, wid, id)?.value(), 0.0);
        m.on_input(&InputEvent::key_down(KeyCode::Down));
        assert_eq!(select(&m, wid, id)?.value(), 0.0);

        // Chords are left for the application.
        let chord = Key::new(Mods::CTRL, KeyCode::Right);
        assert!(!m.on_input(&InputEvent::key_down(chord)));

        let changes = m.bus().drain_kind(EventKind::ValueChange);
        assert_eq!(changes.len(), 4);
        assert_eq!(
            changes[0].event,
            UiEvent::ValueChange {
                value: 7.0,
                previous: 5.0
            }
        );
        Ok(())
    }

    fn type_text(m: &mut WindowManager, s: &str) {
        for c in s.chars() {
            m.on_input(&InputEvent::key_down(c));
        }
    }

    fn edit_text(m: &WindowManager, wid: WindowId, id: NodeId) -> Result<String> {
        m.with_window(wid, |w| {
            w.tree()
                .widget::<TextEdit>(id)
                .map(|e| e.text().to_string())
        })?
    }

    #[test]
    fn text_edit_typing() -> Result<()> {
        let (mut m, wid, id) = host(TextEdit::new(""));
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;
        m.bus().drain();

        type_text(&mut m, "hello");
        m.on_input(&InputEvent::key_down(KeyCode::Home));
        type_text(&mut m, ">");
        m.on_input(&InputEvent::key_down(KeyCode::End));
        m.on_input(&InputEvent::key_down(KeyCode::Backspace));
        m.on_input(&InputEvent::key_down(KeyCode::Left));
        m.on_input(&InputEvent::key_down(KeyCode::Delete));
        assert_eq!(edit_text(&m, wid, id)?, ">hel");

        let changes: Vec<_> = m
            .bus()
            .drain_kind(EventKind::TextChange)
            .into_iter()
            .map(|n| n.event)
            .collect();
        // Five letters, one prefix, two deletions. Caret moves are silent.
        assert_eq!(changes.len(), 8);
        assert_eq!(changes.last(), Some(&UiEvent::TextChange(">hel".into())));
        Ok(())
    }

    #[test]
    fn text_edit_graphemes() -> Result<()> {
        let (mut m, wid, id) = host(TextEdit::new(""));
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;
        type_text(&mut m, "e\u{301}x");
        m.on_input(&InputEvent::key_down(KeyCode::Left));
        m.on_input(&InputEvent::key_down(KeyCode::Backspace));
        assert_eq!(edit_text(&m, wid, id)?, "x");
        let caret =
            m.with_window(wid, |w| w.tree().widget::<TextEdit>(id).map(TextEdit::caret))??;
        assert_eq!(caret, 0);
        Ok(())
    }

    #[test]
    fn text_edit_edges_are_silent() -> Result<()> {
        let (mut m, wid, id) = host(TextEdit::new("ab"));
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;
        m.bus().drain();
        m.on_input(&InputEvent::key_down(KeyCode::Home));
        assert!(m.on_input(&InputEvent::key_down(KeyCode::Backspace)));
        m.on_input(&InputEvent::key_down(KeyCode::End));
        assert!(m.on_input(&InputEvent::key_down(KeyCode::Delete)));
        assert!(m.bus().drain_kind(EventKind::TextChange).is_empty());
        assert_eq!(edit_text(&m, wid, id)?, "ab");
        Ok(())
    }

    #[test]
    fn text_edit_read_only() -> Result<()> {
        let (mut m, wid, id) = host(TextEdit::new("fixed").read_only());
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;
        m.bus().drain();
        assert!(!m.on_input(&InputEvent::key_down('x')));
        assert!(!m.on_input(&InputEvent::key_down(KeyCode::Backspace)));
        assert_eq!(edit_text(&m, wid, id)?, "fixed");
        assert!(m.bus().drain_kind(EventKind::TextChange).is_empty());

        // Programmatic updates still apply.
        m.with_window(wid, |w| {
            w.tree_mut()
                .with_widget::<TextEdit, _>(id, |e, ctx| e.set_text(ctx, "other"))
        })??;
        assert_eq!(edit_text(&m, wid, id)?, "other");
        assert_eq!(m.bus().drain_kind(EventKind::TextChange).len(), 1);
        Ok(())
    }

    #[test]
    fn text_edit_scrolls_to_caret() -> Result<()> {
        let mut m = WindowManager::default();
        let mut w = Window::new(Rect::new(0.0, 0.0, 100.0, 50.0));
        let root = w.root();
        let id = w.tree_mut().add_child(
            root,
            TextEdit::new(""),
            Attach::new(Alignment::Left).size(4.0, 10.0),
        )?;
        let wid = m.add(w);
        m.show(wid, true)?;
        m.draw_frame(&mut RecordingRenderer::default());
        m.with_window(wid, |w| w.tree_mut().set_focus(id, true))?;

        type_text(&mut m, "abcdef");
        let visible = m.with_window(wid, |w| {
            w.tree()
                .widget::<TextEdit>(id)
                .map(|e| e.visible_text().to_string())
        })??;
        assert_eq!(visible, "cdef");
        Ok(())
    }
}
