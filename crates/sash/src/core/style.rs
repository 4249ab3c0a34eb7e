//! Style and renderer seams.
//!
//! The engine never draws pixels itself. A [`Style`] turns node state into
//! fill operations on a [`Frame`], and the host's [`Renderer`] executes them.

use std::collections::HashMap;

use crate::{
    core::node::Node,
    geom::{Point, Rect},
};

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Mid grey.
    pub const GREY: Self = Self::rgb(128, 128, 128);
}

/// A visual resource assigned to a node when it is attached.
///
/// The name is an opaque style key. Comma-separated segments after the first
/// are treated as flags, so `"button,LOWERED"` names the `button` resource
/// with the `LOWERED` flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Resource {
    /// Full resource string.
    name: String,
}

impl Resource {
    /// Construct a resource from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The full resource string.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The style key, without flags.
    pub fn key(&self) -> &str {
        self.name.split(',').next().unwrap_or_default().trim()
    }

    /// Does the resource carry the given flag?
    pub fn has_flag(&self, flag: &str) -> bool {
        self.name.split(',').skip(1).any(|f| f.trim() == flag)
    }
}

/// Host drawing backend.
pub trait Renderer {
    /// Begin a new frame, discarding the previous one.
    fn restart(&mut self);

    /// Fill a rectangle given in manager coordinates.
    fn fill_rect(&mut self, rect: Rect, color: Color);
}

/// A drawing target that translates window-local coordinates into manager
/// coordinates.
pub struct Frame<'a> {
    /// Underlying renderer.
    renderer: &'a mut dyn Renderer,
    /// Window origin in manager coordinates.
    origin: Point,
}

impl<'a> Frame<'a> {
    /// Wrap a renderer for a window at `origin`.
    pub fn new(renderer: &'a mut dyn Renderer, origin: Point) -> Self {
        Self { renderer, origin }
    }

    /// The window origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Fill a window-local rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.is_empty() {
            return;
        }
        self.renderer
            .fill_rect(rect.translate(self.origin.x, self.origin.y), color);
    }
}

/// Visual style shared by every node of a tree.
pub trait Style: Send + Sync {
    /// Resolve a resource name for a node being attached. Styles may adjust
    /// node metrics such as borders and padding here.
    fn add_resource(&self, _node: &mut Node, name: &str) -> Resource {
        Resource::new(name)
    }

    /// Called once per node per layout pass, before its children are placed.
    fn resize(&self, _node: &mut Node, _rect: Rect, _resource: &Resource) {}

    /// Draw a node. Called twice per frame: once with `background` set before
    /// the children are drawn, and once after.
    fn draw(&self, node: &Node, resource: &Resource, frame: &mut Frame<'_>, background: bool);
}

/// A flat style: every node that draws a background is filled with the color
/// registered for its resource key, or the default fill.
#[derive(Debug, Clone)]
pub struct PlainStyle {
    /// Default background.
    fill: Color,
    /// Per-resource backgrounds.
    colors: HashMap<String, Color>,
    /// Fill used for pushed nodes.
    pushed: Color,
}

impl Default for PlainStyle {
    fn default() -> Self {
        Self {
            fill: Color::GREY,
            colors: HashMap::new(),
            pushed: Color::rgb(96, 96, 96),
        }
    }
}

impl PlainStyle {
    /// A style using the default palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a background for a resource key.
    pub fn with_color(mut self, key: impl Into<String>, color: Color) -> Self {
        self.colors.insert(key.into(), color);
        self
    }

    /// The color a node would be filled with.
    pub fn color_for(&self, node: &Node, resource: &Resource) -> Color {
        if node.is_pushed() || resource.has_flag("LOWERED") {
            return self.pushed;
        }
        self.colors.get(resource.key()).copied().unwrap_or(self.fill)
    }
}

impl Style for PlainStyle {
    fn draw(&self, node: &Node, resource: &Resource, frame: &mut Frame<'_>, background: bool) {
        if background && node.draws_background() {
            frame.fill_rect(node.rect(), self.color_for(node, resource));
        }
    }
}
