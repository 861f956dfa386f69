//! Render command collection and batching.
//!
//! Components push commands in viewport space; the renderer groups them by
//! layer so fixed chrome (navbar, progress bar, cursor) always lands on top
//! of the scrolling page.

use crate::icon::Glyph;
use crate::layout::Rect;
use crate::style::{Color, FontFace};

/// A render command for the page.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    /// Filled rectangle.
    Rect {
        /// Bounds.
        bounds: Rect,
        /// Fill color.
        color: Color,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Rectangle outline.
    RectOutline {
        /// Bounds.
        bounds: Rect,
        /// Stroke color.
        color: Color,
        /// Line width.
        width: f32,
        /// Corner radius.
        corner_radius: f32,
    },
    /// Text run.
    Text {
        /// Text content.
        text: String,
        /// X position.
        x: f32,
        /// Y position (top of the line box).
        y: f32,
        /// Text color.
        color: Color,
        /// Font size.
        font_size: f32,
        /// Type family.
        font: FontFace,
    },
    /// Icon from atlas.
    Icon {
        /// Bounds.
        bounds: Rect,
        /// Glyph to draw.
        glyph: Glyph,
        /// Tint color.
        color: Color,
    },
    /// Remote image.
    Image {
        /// Bounds.
        bounds: Rect,
        /// Source URL.
        source: String,
        /// Opacity (0-1).
        opacity: f32,
    },
    /// Placeholder drawn where an image failed to load.
    BrokenImage {
        /// Bounds the image would have occupied.
        bounds: Rect,
        /// Alternative text.
        alt: String,
    },
    /// Scissor rect (clip children).
    PushClip {
        /// Clip bounds.
        bounds: Rect,
    },
    /// Pop scissor rect.
    PopClip,
}

impl RenderCommand {
    /// Screen area covered by the command, if it draws anything.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect { bounds, .. }
            | Self::RectOutline { bounds, .. }
            | Self::Icon { bounds, .. }
            | Self::Image { bounds, .. }
            | Self::BrokenImage { bounds, .. } => Some(*bounds),
            Self::Text { .. } | Self::PushClip { .. } | Self::PopClip => None,
        }
    }
}

/// A batch of render commands on one layer.
#[derive(Debug, Clone, Default)]
pub struct UIBatch {
    /// Commands in this batch.
    pub commands: Vec<RenderCommand>,
    /// Z-index for sorting.
    pub z_index: i32,
}

impl UIBatch {
    /// Creates a new empty batch.
    #[must_use]
    pub fn new(z_index: i32) -> Self {
        Self {
            commands: Vec::with_capacity(256),
            z_index,
        }
    }

    /// Tessellates solid fills into quads (two triangles each).
    ///
    /// Text, images and clips are drawn by dedicated passes and skipped here.
    #[must_use]
    pub fn tessellate(&self) -> Vec<UIVertex> {
        let mut vertices = Vec::with_capacity(self.commands.len() * 6);
        for command in &self.commands {
            let (bounds, color) = match command {
                RenderCommand::Rect { bounds, color, .. }
                | RenderCommand::Icon { bounds, color, .. } => (*bounds, color.to_array()),
                RenderCommand::BrokenImage { bounds, .. } => {
                    (*bounds, Color::rgba(0.5, 0.5, 0.5, 0.2).to_array())
                }
                _ => continue,
            };
            let (x0, y0, x1, y1) = (bounds.x, bounds.y, bounds.right(), bounds.bottom());
            vertices.extend_from_slice(&[
                UIVertex::new(x0, y0, 0.0, 0.0, color),
                UIVertex::new(x1, y0, 1.0, 0.0, color),
                UIVertex::new(x1, y1, 1.0, 1.0, color),
                UIVertex::new(x0, y0, 0.0, 0.0, color),
                UIVertex::new(x1, y1, 1.0, 1.0, color),
                UIVertex::new(x0, y1, 0.0, 1.0, color),
            ]);
        }
        vertices
    }
}

/// Collects commands per layer and hands out sorted batches.
pub struct UIRenderer {
    /// Commands per z-index, in submission order.
    layers: Vec<UIBatch>,
    /// Layer currently receiving commands.
    current_z: i32,
    /// Clip stack.
    clip_stack: Vec<Rect>,
}

impl UIRenderer {
    /// Creates a new renderer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            layers: Vec::with_capacity(8),
            current_z: 0,
            clip_stack: Vec::with_capacity(16),
        }
    }

    /// Begins a new frame.
    pub fn begin_frame(&mut self) {
        self.layers.clear();
        self.clip_stack.clear();
        self.current_z = 0;
    }

    /// Routes subsequent commands to layer `z_index`.
    pub fn set_layer(&mut self, z_index: i32) {
        self.current_z = z_index;
    }

    /// Adds a render command to the current layer.
    pub fn push(&mut self, command: RenderCommand) {
        self.layer_mut().commands.push(command);
    }

    /// Adds multiple render commands to the current layer.
    pub fn extend(&mut self, commands: impl IntoIterator<Item = RenderCommand>) {
        self.layer_mut().commands.extend(commands);
    }

    /// Pushes a clip rect.
    pub fn push_clip(&mut self, bounds: Rect) {
        let actual_clip = if let Some(current) = self.clip_stack.last() {
            current.intersection(&bounds).unwrap_or(Rect::ZERO)
        } else {
            bounds
        };

        self.clip_stack.push(actual_clip);
        self.push(RenderCommand::PushClip {
            bounds: actual_clip,
        });
    }

    /// Pops the current clip rect.
    pub fn pop_clip(&mut self) {
        self.clip_stack.pop();
        self.push(RenderCommand::PopClip);
    }

    /// Returns the current clip rect.
    #[must_use]
    pub fn current_clip(&self) -> Option<Rect> {
        self.clip_stack.last().copied()
    }

    /// Ends the frame and returns batches sorted by z-index.
    pub fn end_frame(&mut self) -> &[UIBatch] {
        self.layers.retain(|batch| !batch.commands.is_empty());
        self.layers.sort_by_key(|batch| batch.z_index);
        &self.layers
    }

    /// Returns the total command count.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.layers.iter().map(|batch| batch.commands.len()).sum()
    }

    fn layer_mut(&mut self) -> &mut UIBatch {
        let z = self.current_z;
        let index = match self.layers.iter().position(|batch| batch.z_index == z) {
            Some(index) => index,
            None => {
                self.layers.push(UIBatch::new(z));
                self.layers.len() - 1
            }
        };
        &mut self.layers[index]
    }
}

impl Default for UIRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertex for UI rendering.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UIVertex {
    /// Position (x, y).
    pub position: [f32; 2],
    /// UV coordinates.
    pub uv: [f32; 2],
    /// Color (RGBA).
    pub color: [f32; 4],
}

impl UIVertex {
    /// Creates a new vertex.
    #[must_use]
    pub const fn new(x: f32, y: f32, u: f32, v: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            uv: [u, v],
            color,
        }
    }

    /// Views a vertex slice as raw bytes for upload.
    #[must_use]
    pub fn as_bytes(vertices: &[Self]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renderer_frame() {
        let mut renderer = UIRenderer::new();

        renderer.begin_frame();
        renderer.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 100.0, 50.0),
            color: Color::WHITE,
            corner_radius: 0.0,
        });

        let batches = renderer.end_frame();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].commands.len(), 1);
    }

    #[test]
    fn test_layers_sorted_by_z() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();

        renderer.set_layer(9999);
        renderer.push(RenderCommand::PopClip);
        renderer.set_layer(0);
        renderer.push(RenderCommand::PopClip);
        renderer.set_layer(50);
        renderer.push(RenderCommand::PopClip);

        let order: Vec<i32> = renderer.end_frame().iter().map(|b| b.z_index).collect();
        assert_eq!(order, vec![0, 50, 9999]);
    }

    #[test]
    fn test_clip_stack() {
        let mut renderer = UIRenderer::new();
        renderer.begin_frame();

        renderer.push_clip(Rect::new(0.0, 0.0, 100.0, 100.0));
        renderer.push_clip(Rect::new(50.0, 50.0, 100.0, 100.0));
        assert_eq!(
            renderer.current_clip(),
            Some(Rect::new(50.0, 50.0, 50.0, 50.0))
        );

        renderer.pop_clip();
        renderer.pop_clip();
        assert!(renderer.current_clip().is_none());
    }

    #[test]
    fn test_tessellate_quads() {
        let mut batch = UIBatch::new(0);
        batch.commands.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
            color: Color::APEX_YELLOW,
            corner_radius: 0.0,
        });
        batch.commands.push(RenderCommand::PopClip);

        let vertices = batch.tessellate();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[2].position, [10.0, 10.0]);
        assert_eq!(UIVertex::as_bytes(&vertices).len(), 6 * 32);
    }
}
