use std::fmt::Write;

use super::colors::SequentialScale;
use super::{Frame, FrameNode, Renderer};
use crate::ui::tooltip::format_bytes;

/// Renders frames into a standalone SVG document.
///
/// Every node becomes a translated group holding its title, a filled rect, a clip
/// path and a two-line label. Groups are layered by height so containers sit under
/// their contents. Element ids are generated here and never leak into the model.
#[derive(Debug)]
pub struct SvgScene {
    pub scale: SequentialScale,
    svg: String,
    next_id: u64,
}

impl SvgScene {
    pub fn new(scale: SequentialScale) -> Self {
        Self {
            scale,
            svg: String::new(),
            next_id: 0,
        }
    }

    /// The document for the most recent frame (empty before the first one).
    pub fn svg(&self) -> &str {
        &self.svg
    }

    fn fresh_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn write_node(&mut self, out: &mut String, node: &FrameNode) -> std::fmt::Result {
        let rect_id = self.fresh_id("node");
        let clip_id = self.fresh_id("clip");
        let r = node.rect;

        write!(out, r#"<g transform="translate({},{})""#, r.x0, r.y0)?;
        if node.zoomable {
            write!(out, r#" cursor="pointer" data-path="{}""#, escape(&node.path))?;
        }
        out.push('>');
        write!(out, "<title>{}</title>", escape(&node.title))?;
        write!(
            out,
            r#"<rect id="{}" fill="{}" width="{}" height="{}"/>"#,
            rect_id,
            self.scale.color(node.height).to_hex(),
            r.width(),
            r.height()
        )?;
        write!(
            out,
            r##"<clipPath id="{}"><use href="#{}"/></clipPath>"##,
            clip_id, rect_id
        )?;

        let name = escape(&node.name);
        let size = format_bytes(node.value, 2);
        write!(out, r#"<text clip-path="url(#{})">"#, clip_id)?;
        if node.is_leaf {
            // Leaves stack name over size.
            write!(out, r#"<tspan x="3" y="15">{}</tspan>"#, name)?;
            write!(out, r#"<tspan x="3" y="30" fill-opacity="0.75">{}</tspan>"#, size)?;
        } else {
            // Containers put both on the header band.
            write!(out, r#"<tspan dx="5" y="15">{}</tspan>"#, name)?;
            write!(out, r#"<tspan dx="5" y="15" fill-opacity="0.75">{}</tspan>"#, size)?;
        }
        out.push_str("</text></g>");
        Ok(())
    }

    fn write_frame(&mut self, frame: &Frame) -> std::fmt::Result {
        let mut out = String::with_capacity(frame.nodes.len() * 384);
        let b = frame.bounds;
        write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" font-family="sans-serif" font-size="10">"#,
            b.x0,
            b.y0,
            b.width(),
            b.height(),
            b.width(),
            b.height()
        )?;
        out.push_str(
            r#"<filter id="shadow"><feDropShadow flood-opacity="0.5" dx="0" dy="0" stdDeviation="2"/></filter>"#,
        );
        for (height, nodes) in frame.layers() {
            write!(out, r#"<g filter="url(#shadow)" data-height="{}">"#, height)?;
            for node in nodes {
                self.write_node(&mut out, node)?;
            }
            out.push_str("</g>");
        }
        out.push_str("</svg>\n");
        self.svg = out;
        Ok(())
    }
}

impl Default for SvgScene {
    fn default() -> Self {
        Self::new(SequentialScale::default())
    }
}

impl Renderer for SvgScene {
    fn present(&mut self, frame: &Frame) {
        if let Err(e) = self.write_frame(frame) {
            tracing::error!("Failed to write SVG scene: {}", e);
            return;
        }
        tracing::debug!("SVG scene written: {} nodes, {} bytes", frame.nodes.len(), self.svg.len());
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
