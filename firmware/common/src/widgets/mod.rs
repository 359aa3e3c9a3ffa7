//! Per-variant draw routines of the renderer.
//!
//! Each submodule adds `render_*` methods to [`RenderPass`](crate::render::RenderPass)
//! for one family of field variants. [`primitives`] holds the aligned text
//! helpers they share.

mod editable;
mod graph;
mod primitives;
mod scrollable;
mod text;

pub(crate) use primitives::{Pen, char_step, draw_text_common, put_aligned, put_centered, put_right};
