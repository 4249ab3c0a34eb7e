//! Input propagation through a tree.
//!
//! A node updates its own state, offers the event to its children in list
//! order, stops at the first child that consumes it, and calls its own widget
//! last. Hidden children never receive pointer events.

use crate::{
    core::{
        bus::UiEvent,
        event::{
            key::Key,
            mouse::{Button, Buttons},
        },
        focus::FocusManager,
        id::NodeId,
        tree::Tree,
    },
    geom::Point,
    widget::{Motion, Pointer},
};

/// Does a visible child contain the point?
fn hit(tree: &Tree, id: NodeId, pos: Point) -> bool {
    tree.nodes
        .get(id)
        .is_some_and(|n| n.visible && n.rect.contains_point(pos))
}

/// Deliver a button press to `id` and its subtree. Returns true if the press
/// was consumed or landed inside a child.
pub(crate) fn mouse_down(tree: &mut Tree, id: NodeId, button: Button, pos: Point) -> bool {
    let (children, redraw) = match tree.nodes.get_mut(id) {
        Some(node) if node.enabled => {
            node.pushed = true;
            (node.children.clone(), node.redraw_on_mouse_event)
        }
        _ => return false,
    };
    if redraw {
        tree.resize_children(id);
    }

    let mut consumed = false;
    let mut inside = false;
    let mut target = None;
    for child in children {
        if !hit(tree, child, pos) {
            continue;
        }
        inside = true;
        consumed |= mouse_down(tree, child, button, pos);
        target = Some(child);
        if tree.nodes.get(child).is_some_and(|n| n.redraw_on_mouse_event) {
            tree.refresh(child);
        }
        if consumed {
            break;
        }
    }
    if let Some(t) = target
        && tree.nodes.get(t).is_some_and(|n| n.allow_focus)
    {
        tree.set_focus(t, true);
    }
    if redraw {
        tree.refresh(id);
    }

    let ev = Pointer {
        button,
        pos,
        was_pushed: false,
        inside: tree.rect(id).is_some_and(|r| r.contains_point(pos)),
        children_consumed: consumed,
    };
    let own = tree
        .with_hook(id, |w, ctx| w.on_mouse_down(ctx, &ev))
        .unwrap_or(false);
    tree.emit(id, UiEvent::MouseDown { button, pos });
    consumed || own || inside
}

/// Deliver a button release to `id` and its subtree. A pushed child receives
/// the release even when the pointer has left it.
pub(crate) fn mouse_up(tree: &mut Tree, id: NodeId, button: Button, pos: Point) -> bool {
    let (children, redraw, was_pushed) = match tree.nodes.get_mut(id) {
        Some(node) if node.enabled => {
            let was = node.pushed;
            node.pushed = false;
            (node.children.clone(), node.redraw_on_mouse_event, was)
        }
        _ => return false,
    };
    if redraw {
        tree.resize_children(id);
    }

    let mut consumed = false;
    let mut inside = false;
    for child in children {
        let pushed = tree.nodes.get(child).is_some_and(|n| n.pushed);
        if !(hit(tree, child, pos) || pushed) {
            continue;
        }
        inside = true;
        consumed |= mouse_up(tree, child, button, pos);
        if tree.nodes.get(child).is_some_and(|n| n.redraw_on_mouse_event) {
            tree.refresh(child);
        }
        if consumed {
            break;
        }
    }
    if redraw {
        tree.refresh(id);
    }

    let ev = Pointer {
        button,
        pos,
        was_pushed,
        inside: tree.rect(id).is_some_and(|r| r.contains_point(pos)),
        children_consumed: consumed,
    };
    let own = tree
        .with_hook(id, |w, ctx| w.on_mouse_up(ctx, &ev))
        .unwrap_or(false);
    tree.emit(id, UiEvent::MouseUp { button, pos });
    consumed || own || inside
}

/// Deliver pointer motion to `id` and its subtree, updating hover flags.
pub(crate) fn mouse_move(tree: &mut Tree, id: NodeId, buttons: Buttons, pos: Point) -> bool {
    let children = match tree.nodes.get(id) {
        Some(node) if node.enabled => node.children.clone(),
        _ => return false,
    };

    let mut consumed = false;
    for child in children {
        let over = hit(tree, child, pos);
        let changed = match tree.nodes.get_mut(child) {
            Some(n) if n.pointed != over => {
                n.pointed = over;
                n.redraw_on_mouse_move
            }
            _ => false,
        };
        if changed {
            tree.refresh(child);
        }
        if over {
            consumed |= mouse_move(tree, child, buttons, pos);
            if consumed {
                break;
            }
        }
    }

    let ev = Motion { buttons, pos };
    let own = tree
        .with_hook(id, |w, ctx| w.on_mouse_move(ctx, &ev))
        .unwrap_or(false);
    consumed || own
}

/// Deliver a key to the focused node only.
pub(crate) fn key(tree: &mut Tree, key: Key, down: bool) -> bool {
    let Some(id) = tree.focused() else {
        return false;
    };
    if !tree.is_enabled(id) {
        return false;
    }
    let consumed = tree
        .with_hook(id, |w, ctx| {
            if down {
                w.on_key_down(ctx, key)
            } else {
                w.on_key_up(ctx, key)
            }
        })
        .unwrap_or(false);
    tree.emit(
        id,
        if down {
            UiEvent::KeyDown(key)
        } else {
            UiEvent::KeyUp(key)
        },
    );
    consumed
}
