//! Screen-space overlay elements drawn on top of the 3D view.
//!
//! Overlays are plain data: a layout rectangle in viewport fractions, an
//! optional background, and a few lines of text. The 2D pass walks them in
//! [`OverlayLayer::draw_order`] every frame.
//!
//! Elements built with [`OverlayElement::scene_overlay`] carry a marker that
//! says "a scene owns me". Scenes remove their own elements on dispose; the
//! scene manager calls [`OverlayLayer::sweep_scene_overlays`] afterwards so a
//! scene that forgot one can't leak it into the next.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::color::Color;

/// Handle to an element in an [`OverlayLayer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OverlayId(u32);

/// Where an element sits, in fractions of the viewport.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Layout {
    /// Covers the whole viewport.
    Fill,
    /// Top-left corner plus size, all in `0.0..=1.0` viewport units.
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// A resolved rectangle in physical pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl PixelRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }
}

impl Layout {
    pub fn rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn resolve(&self, viewport: Vec2) -> PixelRect {
        match *self {
            Layout::Fill => PixelRect {
                x: 0.0,
                y: 0.0,
                width: viewport.x,
                height: viewport.y,
            },
            Layout::Rect {
                x,
                y,
                width,
                height,
            } => PixelRect {
                x: x * viewport.x,
                y: y * viewport.y,
                width: width * viewport.x,
                height: height * viewport.y,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Background {
    None,
    Solid(Color),
    /// Dark edges fading to a clear center.
    Vignette(Color),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
}

/// One overlay element.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayElement {
    pub layout: Layout,
    pub background: Background,
    /// Multiplies both background and text alpha.
    pub opacity: f32,
    pub lines: Vec<String>,
    pub text_color: Color,
    /// Font size in logical pixels.
    pub font_size: f32,
    pub align: TextAlign,
    /// Higher values draw later (on top).
    pub z: i32,
    pub visible: bool,
    /// Interactive elements take part in [`OverlayLayer::hit_test`].
    pub interactive: bool,
    /// Swallows pointer input even though it isn't interactive itself.
    pub blocks_input: bool,
    scene_overlay: bool,
}

impl OverlayElement {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            background: Background::None,
            opacity: 1.0,
            lines: Vec::new(),
            text_color: Color::WHITE,
            font_size: 16.0,
            align: TextAlign::Left,
            z: 0,
            visible: true,
            interactive: false,
            blocks_input: false,
            scene_overlay: false,
        }
    }

    /// Tag the element as owned by the active scene.
    pub fn scene_overlay(mut self) -> Self {
        self.scene_overlay = true;
        self
    }

    pub fn is_scene_overlay(&self) -> bool {
        self.scene_overlay
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Background::Solid(color);
        self
    }

    pub fn vignette(mut self, edge: Color) -> Self {
        self.background = Background::Vignette(edge);
        self
    }

    pub fn opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn centered(mut self) -> Self {
        self.align = TextAlign::Center;
        self
    }

    pub fn z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Keep clicks from reaching elements drawn underneath.
    pub fn blocking(mut self) -> Self {
        self.blocks_input = true;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Replace the text, one line per `\n`.
    pub fn set_text(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_owned).collect();
    }

    /// Whether the element would put anything on screen.
    pub fn is_drawn(&self) -> bool {
        self.visible && self.opacity > 0.0
    }
}

/// All overlay elements currently alive.
#[derive(Debug, Default)]
pub struct OverlayLayer {
    elements: BTreeMap<OverlayId, OverlayElement>,
    next_id: u32,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: OverlayElement) -> OverlayId {
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, element);
        id
    }

    pub fn get(&self, id: OverlayId) -> Option<&OverlayElement> {
        self.elements.get(&id)
    }

    pub fn get_mut(&mut self, id: OverlayId) -> Option<&mut OverlayElement> {
        self.elements.get_mut(&id)
    }

    pub fn remove(&mut self, id: OverlayId) -> Option<OverlayElement> {
        self.elements.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn scene_overlay_count(&self) -> usize {
        self.elements.values().filter(|e| e.scene_overlay).count()
    }

    /// Remove every marker-tagged element, returning how many were removed.
    pub fn sweep_scene_overlays(&mut self) -> usize {
        let before = self.elements.len();
        self.elements.retain(|_, e| !e.scene_overlay);
        before - self.elements.len()
    }

    /// Elements back to front: ascending `z`, creation order within a layer.
    pub fn draw_order(&self) -> Vec<(OverlayId, &OverlayElement)> {
        let mut order: Vec<_> = self
            .elements
            .iter()
            .filter(|(_, e)| e.is_drawn())
            .map(|(id, e)| (*id, e))
            .collect();
        order.sort_by_key(|(id, e)| (e.z, *id));
        order
    }

    /// Topmost drawn, interactive element under `point` (physical pixels).
    ///
    /// A blocking element above it hides it; the click then lands nowhere.
    pub fn hit_test(&self, point: Vec2, viewport: Vec2) -> Option<OverlayId> {
        self.draw_order()
            .into_iter()
            .rev()
            .find(|(_, e)| {
                (e.interactive || e.blocks_input) && e.layout.resolve(viewport).contains(point)
            })
            .filter(|(_, e)| e.interactive)
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweep_removes_only_marked_elements() {
        let mut layer = OverlayLayer::new();
        let hud = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.2, 0.05)).text("Scene: Room"));
        layer.add(OverlayElement::new(Layout::Fill).scene_overlay());
        layer.add(OverlayElement::new(Layout::Fill).scene_overlay().hidden());

        assert_eq!(layer.scene_overlay_count(), 2);
        assert_eq!(layer.sweep_scene_overlays(), 2);
        assert_eq!(layer.sweep_scene_overlays(), 0);
        assert_eq!(layer.len(), 1);
        assert!(layer.get(hud).is_some());
    }

    #[test]
    fn draw_order_sorts_by_z_and_skips_invisible() {
        let mut layer = OverlayLayer::new();
        let top = layer.add(OverlayElement::new(Layout::Fill).z(10));
        let bottom = layer.add(OverlayElement::new(Layout::Fill).z(-1));
        layer.add(OverlayElement::new(Layout::Fill).opacity(0.0));

        let ids: Vec<_> = layer.draw_order().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![bottom, top]);
    }

    #[test]
    fn hit_test_picks_topmost_interactive_element() {
        let mut layer = OverlayLayer::new();
        let viewport = Vec2::new(1000.0, 500.0);
        let left = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.5, 1.0)).interactive());
        let cover = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.25, 1.0)).interactive().z(1));
        layer.add(OverlayElement::new(Layout::Fill).z(5));

        assert_eq!(layer.hit_test(Vec2::new(100.0, 10.0), viewport), Some(cover));
        assert_eq!(layer.hit_test(Vec2::new(400.0, 10.0), viewport), Some(left));
        assert_eq!(layer.hit_test(Vec2::new(900.0, 10.0), viewport), None);
    }

    #[test]
    fn blocking_elements_swallow_clicks_underneath() {
        let mut layer = OverlayLayer::new();
        let viewport = Vec2::new(1000.0, 500.0);
        let button = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.2, 0.2)).interactive());
        let panel = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.5, 1.0)).blocking().z(3));
        let tab = layer.add(OverlayElement::new(Layout::rect(0.0, 0.0, 0.1, 0.1)).interactive().z(4));
        layer.add(OverlayElement::new(Layout::Fill).z(9));

        assert_eq!(layer.hit_test(Vec2::new(150.0, 50.0), viewport), None);
        assert_eq!(layer.hit_test(Vec2::new(50.0, 20.0), viewport), Some(tab));

        layer.get_mut(panel).unwrap().visible = false;
        assert_eq!(layer.hit_test(Vec2::new(150.0, 50.0), viewport), Some(button));
    }

    #[test]
    fn set_text_splits_lines() {
        let mut element = OverlayElement::new(Layout::Fill);
        element.set_text("one\ntwo");
        assert_eq!(element.lines, vec!["one".to_owned(), "two".to_owned()]);
    }
}
