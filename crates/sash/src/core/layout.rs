//! Alignment-driven layout.
//!
//! A parent's client rect is consumed by its children in list order. Each
//! child starts from its default rect, clamped to what remains, and is placed
//! by its [`Alignment`]. Unless the child overlaps, placement shrinks the
//! remaining client rect. Coordinates are y-up: "top" is the larger y.

use scopeguard::guard;
use serde::{Deserialize, Serialize};

use crate::{
    core::{id::NodeId, tree::Tree},
    geom::Rect,
};

/// Placement of a child inside its parent's remaining client rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Keep the default rect unchanged.
    #[default]
    None,
    /// Take the whole remaining rect.
    Fill,
    /// Center on both axes.
    Center,
    /// Center horizontally at the bottom edge, full height.
    VCenter,
    /// Center vertically at the left edge, full width.
    HCenter,
    /// Full width at the bottom edge.
    Bottom,
    /// Full height at the left edge.
    Left,
    /// Full width at the top edge.
    Top,
    /// Full height at the right edge.
    Right,
    /// Bottom edge, horizontally centered.
    BottomCenter,
    /// Top edge, horizontally centered.
    TopCenter,
    /// Left edge, vertically centered.
    LeftCenter,
    /// Right edge, vertically centered.
    RightCenter,
    /// Bottom edge at the left; consumes height.
    BottomLeft,
    /// Top edge at the left; consumes height.
    TopLeft,
    /// Top edge at the right; consumes height.
    TopRight,
    /// Bottom edge at the right; consumes height.
    BottomRight,
    /// Left edge at the bottom; consumes width.
    LeftBottom,
    /// Left edge at the top; consumes width.
    LeftTop,
    /// Right edge at the top; consumes width.
    RightTop,
    /// Right edge at the bottom; consumes width.
    RightBottom,
    /// Pinned to the bottom-left corner.
    CornerBottomLeft,
    /// Pinned to the top-left corner.
    CornerTopLeft,
    /// Pinned to the top-right corner.
    CornerTopRight,
    /// Pinned to the bottom-right corner.
    CornerBottomRight,
}

impl Alignment {
    /// Every tag, in declaration order.
    pub const ALL: [Self; 25] = [
        Self::None,
        Self::Fill,
        Self::Center,
        Self::VCenter,
        Self::HCenter,
        Self::Bottom,
        Self::Left,
        Self::Top,
        Self::Right,
        Self::BottomCenter,
        Self::TopCenter,
        Self::LeftCenter,
        Self::RightCenter,
        Self::BottomLeft,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::LeftBottom,
        Self::LeftTop,
        Self::RightTop,
        Self::RightBottom,
        Self::CornerBottomLeft,
        Self::CornerTopLeft,
        Self::CornerTopRight,
        Self::CornerBottomRight,
    ];

    /// Edge tags that shrink the client rect by `extent + 2 * padding + 1`
    /// along their consuming axis.
    pub const EDGES: [Self; 12] = [
        Self::Bottom,
        Self::Left,
        Self::Top,
        Self::Right,
        Self::BottomLeft,
        Self::TopLeft,
        Self::TopRight,
        Self::BottomRight,
        Self::LeftBottom,
        Self::LeftTop,
        Self::RightTop,
        Self::RightBottom,
    ];

    /// Does the tag consume width (as opposed to height)?
    pub fn consumes_width(&self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Right
                | Self::LeftCenter
                | Self::RightCenter
                | Self::LeftBottom
                | Self::LeftTop
                | Self::RightTop
                | Self::RightBottom
                | Self::VCenter
        )
    }
}

/// Shrink `len` by a placed extent plus padding on both sides and a one-unit
/// gap, never below zero.
fn shrink(len: f32, extent: f32, padding: f32) -> f32 {
    (len - (extent + 2.0 * padding) - 1.0).max(0.0)
}

/// Place one child.
///
/// `child` is the child's default rect, already clamped to the remaining
/// client size. Returns the child's final rect and, unless `overlap` is set,
/// shrinks `client`.
pub fn place(
    client: &mut Rect,
    child: Rect,
    alignment: Alignment,
    overlap: bool,
    padding: f32,
) -> Rect {
    let c = *client;
    let (w, h) = (child.w, child.h);
    let mut r = child;
    let center_x = c.x + (c.w - w) / 2.0;
    let center_y = c.y + (c.h - h) / 2.0;
    let far_x = c.x + c.w - w;
    let far_y = c.y + c.h - h;

    match alignment {
        Alignment::None => {}
        Alignment::Fill => {
            r = c;
            if !overlap {
                client.w = 0.0;
                client.h = 0.0;
            }
        }
        Alignment::Center => {
            r.x = center_x;
            r.y = center_y;
            if !overlap {
                client.w = 0.0;
                client.h = 0.0;
            }
        }
        Alignment::VCenter => {
            r.x = center_x;
            r.y = c.y;
            if !overlap {
                r.h = c.h;
                client.w = 0.0;
            }
        }
        Alignment::HCenter => {
            r.x = c.x;
            r.y = center_y;
            if !overlap {
                r.w = c.w;
                client.h = 0.0;
            }
        }
        Alignment::Bottom => {
            r.x = c.x;
            r.y = c.y;
            if !overlap {
                r.w = c.w;
                client.y += h + 1.0;
                client.h = shrink(c.h, h, padding);
            }
        }
        Alignment::Top => {
            r.x = c.x;
            r.y = far_y;
            if !overlap {
                r.w = c.w;
                client.h = shrink(c.h, h, padding);
            }
        }
        Alignment::Left => {
            r.x = c.x;
            r.y = c.y;
            if !overlap {
                r.h = c.h;
                client.x += w + 1.0;
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::Right => {
            r.x = far_x;
            r.y = c.y;
            if !overlap {
                r.h = c.h;
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::BottomCenter => {
            r.x = center_x;
            r.y = c.y;
            if !overlap {
                client.y += h + padding;
                client.h = (c.h - (h + 2.0 * padding)).max(0.0);
            }
        }
        Alignment::TopCenter => {
            r.x = center_x;
            r.y = far_y;
            if !overlap {
                client.h = shrink(c.h, h, padding);
            }
        }
        Alignment::LeftCenter => {
            r.x = c.x;
            r.y = center_y;
            if !overlap {
                client.x += w + padding + 1.0;
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::RightCenter => {
            r.x = far_x;
            r.y = center_y;
            if !overlap {
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::BottomLeft | Alignment::BottomRight => {
            r.x = if alignment == Alignment::BottomLeft {
                c.x
            } else {
                far_x
            };
            r.y = c.y;
            if !overlap {
                client.y += h + padding + 1.0;
                client.h = shrink(c.h, h, padding);
            }
        }
        Alignment::TopLeft | Alignment::TopRight => {
            r.x = if alignment == Alignment::TopLeft {
                c.x
            } else {
                far_x
            };
            r.y = far_y;
            if !overlap {
                client.h = shrink(c.h, h, padding);
            }
        }
        Alignment::LeftBottom | Alignment::LeftTop => {
            r.x = c.x;
            r.y = if alignment == Alignment::LeftBottom {
                c.y
            } else {
                far_y
            };
            if !overlap {
                client.x += w + padding + 1.0;
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::RightTop | Alignment::RightBottom => {
            r.x = far_x;
            r.y = if alignment == Alignment::RightBottom {
                c.y
            } else {
                far_y
            };
            if !overlap {
                client.w = shrink(c.w, w, padding);
            }
        }
        Alignment::CornerBottomLeft | Alignment::CornerBottomRight => {
            r.x = if alignment == Alignment::CornerBottomLeft {
                c.x
            } else {
                far_x
            };
            r.y = c.y;
            if !overlap {
                client.y += h + padding;
            }
        }
        Alignment::CornerTopLeft => {
            r.x = c.x;
            r.y = far_y;
        }
        Alignment::CornerTopRight => {
            r.x = far_x;
            r.y = far_y;
        }
    }
    r
}

/// Lay out the children of `id`.
///
/// The node is frozen for the duration of the pass; nested requests to lay
/// out the same node (for example from a child resize) return immediately.
/// The style's `resize` hook runs once before any child is placed.
pub(crate) fn resize_children(tree: &mut Tree, id: NodeId) {
    match tree.nodes.get_mut(id) {
        Some(node) if !node.frozen => node.frozen = true,
        Some(_) => {
            tracing::trace!(?id, "layout suppressed, pass already running");
            return;
        }
        None => return,
    }
    let mut tree = guard(tree, move |tree| {
        if let Some(node) = tree.nodes.get_mut(id) {
            node.frozen = false;
        }
    });

    let style = tree.style.clone();
    let (mut client, padding, children) = {
        let Some(node) = tree.nodes.get_mut(id) else {
            return;
        };
        let resource = node.resource.clone();
        let rect = node.rect;
        style.resize(node, rect, &resource);
        (node.client_rect(), node.padding, node.children.clone())
    };

    for child in children {
        if client.w <= 0.0 || client.h <= 0.0 {
            break;
        }
        let Some(node) = tree.nodes.get(child) else {
            continue;
        };
        let start = node.default_rect.clamp_size(client.size());
        let rect = place(&mut client, start, node.alignment, node.overlap, padding);
        tree.place_child(child, rect);
    }
}
