//! Scripted session: two windows, a button click, a text edit and an edge
//! drag, printing bus notifications as they arrive.
//!
//! Logs at debug level:
//!
//! ```text
//! cargo run -p sash --example drag --features testing
//! ```

use std::sync::Arc;

use sash::{
    Attach, Borders, Notification,
    prelude::*,
    style::{Color, PlainStyle},
    testing::RecordingRenderer,
    widgets::{Button as PushButton, Panel, TextEdit},
};
use tracing_subscriber::fmt;

fn report(m: &WindowManager) {
    for Notification {
        window,
        node,
        event,
    } in m.bus().drain()
    {
        println!("{window} {node:?}: {event:?}");
    }
}

fn main() -> anyhow::Result<()> {
    fmt()
        .with_max_level(tracing::Level::DEBUG)
        .without_time()
        .compact()
        .init();

    let style = Arc::new(PlainStyle::new().with_color("toolbar", Color::rgb(40, 40, 60)));
    let mut m = WindowManager::new(ManagerConfig::default().with_virtual_size(400.0));
    m.set_extent(Expanse::new(800.0, 800.0));

    let mut editor = Window::with_root(Rect::new(10.0, 10.0, 200.0, 120.0), Panel::new(), style)
        .with_borders(Borders::all());
    let root = editor.root();
    let tree = editor.tree_mut();
    let toolbar = tree.add_child(
        root,
        Panel::new(),
        Attach::new(Alignment::Top).resource("toolbar").size(0.0, 20.0),
    )?;
    let ok = tree.add_child(
        toolbar,
        PushButton::new(),
        Attach::new(Alignment::Left).size(40.0, 0.0),
    )?;
    let text = tree.add_child(root, TextEdit::new("hello"), Alignment::Fill)?;
    tree.set_padding(root, 2.0)?;

    let palette = Window::new(Rect::new(250.0, 10.0, 100.0, 100.0));

    let editor = m.add(editor);
    let palette = m.add(palette);
    m.show(palette, true)?;
    m.show(editor, true)?;

    let mut renderer = RecordingRenderer::default();
    m.draw_frame(&mut renderer);
    println!("frame: {} fills, focus {:?}", renderer.fills.len(), m.focused());
    report(&m);

    // Device coordinates are twice the internal ones.
    m.with_window(editor, |w| w.tree_mut().set_focus(text, true))?;
    for c in " world".chars() {
        m.on_input(&InputEvent::key_down(c));
    }
    let ok_rect = m.with_window(editor, |w| w.tree().rect(ok))?.unwrap_or_default();
    let (x, y) = ((10.0 + ok_rect.x + 5.0) * 2.0, (10.0 + ok_rect.y + 5.0) * 2.0);
    m.on_input(&InputEvent::press(Button::Left, x, y));
    m.on_input(&InputEvent::release(Button::Left, x, y));
    report(&m);

    // Drag the editor's right edge from x=208 to x=240.
    m.on_input(&InputEvent::motion(416.0, 100.0));
    println!("drag: {:?}, cursor {:?}", m.drag_state(), m.cursor());
    m.on_input(&InputEvent::press(Button::Left, 416.0, 100.0));
    m.on_input(&InputEvent::motion(480.0, 100.0));
    m.on_input(&InputEvent::release(Button::Left, 480.0, 100.0));
    println!("editor rect: {:?}", m.with_window(editor, |w| w.rect())?);

    m.remove(editor)?;
    if m.draw_frame(&mut renderer) {
        println!("frame: {} fills, focus {:?}", renderer.fills.len(), m.focused());
    }
    report(&m);
    Ok(())
}
