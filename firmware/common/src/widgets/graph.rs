//! Graph fields: a bar per sample, colored by threshold band.
//!
//! Graphs keep their own duty cycle. They sample and redraw every
//! `GRAPH_TICKS` ticks, or at once when dirty. The title and axes are only
//! drawn when dirty; the min/max labels and the bars are redrawn on every
//! sample since the scale may have moved.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::canvas::Canvas;
use crate::colors::{GRAPH_ACCENT, GRAPH_AXIS, GRAPH_BACKGROUND, GRAPH_ERROR, GRAPH_NORMAL, GRAPH_WARN, LABEL_COLOR};
use crate::config::{GRAPH_AXIS_DIGITS, GRAPH_MAX_POINTS};
use crate::field::{FieldId, FieldKind};
use crate::graph::GraphCache;
use crate::layout::FieldLayout;
use crate::render::RenderPass;
use crate::widgets::{Pen, char_step, put_centered, put_right};

/// Plot area of a graph. `x_min`/`y_min` is where the axes cross.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct GraphArea {
    pub x_min: i32,
    /// Rightmost bar column.
    pub x_max: i32,
    /// Row of the horizontal axis.
    pub y_min: i32,
    /// Row the running maximum maps to.
    pub y_max: i32,
}

impl RenderPass<'_, '_> {
    pub(crate) fn render_graph(
        &mut self,
        layout: &mut FieldLayout,
        id: FieldId,
        parent: Option<FieldId>,
    ) -> bool {
        let is_customizing = parent.is_some() && self.cx.customize.current() == parent;
        let need_blink = self.cx.blink.changed() && is_customizing;
        if need_blink {
            self.fields[id].dirty = true;
        }

        let due = self.cx.blink.graph_due();
        let dirty = self.fields[id].dirty;
        if !due && !dirty {
            return false;
        }

        let FieldKind::Graph(graph) = self.fields[id].kind else {
            unreachable!("render_graph on a non-graph field");
        };
        let Some(source) = self.fields[graph.source].as_editable() else {
            panic!("graph source must be an editable");
        };
        let profile = self.cx.profile;
        let blink_on = self.cx.blink.is_on();
        let units = self.cx.units;

        let cache = self.cx.graph.claim(id);
        if due {
            let sample = source.display_value(units).min(i32::MAX as u32) as i32;
            cache.add_point(sample, graph.min_threshold);
        }

        let axis_width = GRAPH_AXIS_DIGITS * char_step(profile.fonts.graph_value);
        let x_min = layout.x + axis_width;
        let area = GraphArea {
            x_min,
            // one column per sample at most
            x_max: (layout.x + layout.width - 1).min(x_min + GRAPH_MAX_POINTS as i32),
            y_min: layout.y + layout.height - 1,
            y_max: layout.y + profile.fonts.graph_label.character_size.height as i32,
        };

        if dirty {
            self.canvas.fill_rect(layout.bounds(), GRAPH_BACKGROUND);
        }
        if need_blink && !blink_on {
            return true;
        }

        if dirty {
            put_centered(
                self.canvas,
                layout.x,
                layout.y,
                layout.width,
                Pen::new(profile.fonts.graph_label, LABEL_COLOR),
                source.label,
            );
            let origin = Point::new(area.x_min, area.y_min);
            self.canvas.draw_line(origin, Point::new(area.x_min, area.y_max), GRAPH_AXIS);
            self.canvas.draw_line(origin, Point::new(area.x_max, area.y_min), GRAPH_AXIS);
        }

        let pen = Pen::new(profile.fonts.graph_value, GRAPH_ACCENT);
        let label_box = Size::new(axis_width.max(0) as u32, pen.height() as u32);
        let extremes = [
            (cache.max_val(), area.y_max),
            (cache.min_val(), area.y_min - pen.height()),
        ];
        for (value, y) in extremes {
            let Some(value) = value else {
                continue;
            };
            // a shorter number must not leave digits of the old one behind
            self.canvas.fill_rect(Rectangle::new(Point::new(layout.x, y), label_box), GRAPH_BACKGROUND);
            let text = source.format_value(value.max(0) as u32);
            put_right(self.canvas, area.x_min, y, pen, &text);
        }

        draw_points(self.canvas, &area, cache, graph.warn_threshold, graph.error_threshold);
        true
    }
}

/// Draw one column per sample, newest at the right, clipped to the area.
///
/// Each bar runs from the sample down to just above the axis and is split
/// into error, warning and normal bands. The space above the bar is erased
/// so a rescale never leaves old bars behind.
pub(crate) fn draw_points(
    canvas: &mut dyn Canvas,
    area: &GraphArea,
    cache: &GraphCache,
    warn_threshold: Option<i32>,
    error_threshold: Option<i32>,
) {
    if cache.is_empty() {
        return;
    }

    let base = area.y_min - 1;
    // a threshold above the running maximum maps above the area and never draws
    let band = |t: Option<i32>| t.map(|t| cache.scale_y(t, area.y_min, area.y_max).min(base));
    let (warn_y, error_y) = (band(warn_threshold), band(error_threshold));

    let columns = (area.x_max - area.x_min).max(0) as usize;
    let skip = cache.len().saturating_sub(columns);

    for (x, value) in (area.x_min + 1..).zip(cache.iter().skip(skip)) {
        let mut y = cache.scale_y(value, area.y_min, area.y_max).clamp(area.y_max, area.y_min);

        if y > area.y_max {
            canvas.draw_line(Point::new(x, area.y_max), Point::new(x, y - 1), GRAPH_BACKGROUND);
        }
        if let Some(limit) = error_y
            && y <= limit
        {
            canvas.draw_line(Point::new(x, y), Point::new(x, limit), GRAPH_ERROR);
            y = limit + 1;
        }
        if let Some(limit) = warn_y
            && y <= limit
        {
            canvas.draw_line(Point::new(x, y), Point::new(x, limit), GRAPH_WARN);
            y = limit + 1;
        }
        if y <= base {
            canvas.draw_line(Point::new(x, y), Point::new(x, base), GRAPH_NORMAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use core::sync::atomic::AtomicU16;

    use super::*;
    use crate::config::SW102;
    use crate::field::{Field, FieldArena, NumberFormat};
    use crate::render::UiContext;
    use crate::testing::RecordingCanvas;

    #[test]
    fn test_threshold_above_max_never_draws() {
        let mut cache = GraphCache::new();
        for v in [0, 50, 95, 100] {
            cache.add_point(v, 0);
        }
        let area = GraphArea {
            x_min: 0,
            x_max: 10,
            y_min: 101,
            y_max: 0,
        };
        let mut canvas = RecordingCanvas::new(Size::new(16, 110));

        draw_points(&mut canvas, &area, &cache, Some(90), Some(120));

        assert!(!canvas.any_in(0, 0, 16, 110, GRAPH_ERROR));
        // 50 stays below the warning band
        assert!(!canvas.any_in(2, 0, 1, 110, GRAPH_WARN));
        assert_eq!(canvas.pixel(2, 60), GRAPH_NORMAL);
        // 95 maps to row 5, the band ends at row 10
        assert_eq!(canvas.pixel(3, 7), GRAPH_WARN);
        assert_eq!(canvas.pixel(3, 11), GRAPH_NORMAL);
        // the axis row is left alone
        assert!(!canvas.any_in(0, 101, 16, 1, GRAPH_NORMAL));
    }

    #[test]
    fn test_only_newest_samples_fit() {
        let mut cache = GraphCache::new();
        for v in 0..20 {
            cache.add_point(v, 0);
        }
        let area = GraphArea {
            x_min: 0,
            x_max: 5,
            y_min: 40,
            y_max: 0,
        };
        let mut canvas = RecordingCanvas::new(Size::new(16, 48));

        draw_points(&mut canvas, &area, &cache, None, None);

        // five columns, the rightmost holds the maximum
        assert_eq!(canvas.pixel(5, 0), GRAPH_NORMAL);
        assert!(!canvas.any_in(6, 0, 10, 48, GRAPH_NORMAL));
    }

    #[test]
    fn test_graph_samples_on_its_own_cycle() {
        static TEMP: AtomicU16 = AtomicU16::new(40);
        let mut fields = FieldArena::new();
        let source = fields.add(Field::readonly_number("motor", &TEMP, NumberFormat::new("C"))).unwrap();
        let id = fields.add(Field::graph(source, Some(70), Some(90), 0)).unwrap();
        let mut layouts = [FieldLayout::new(id).at(0, 0).size(64, 60)];
        let mut cx = UiContext::new(&SW102);
        let mut canvas = RecordingCanvas::new(SW102.size());

        let mut pass = RenderPass {
            fields: &mut fields,
            cx: &mut cx,
            canvas: &mut canvas,
        };
        assert!(pass.render_layouts(&mut layouts, true));
        assert_eq!(pass.cx.graph.owner(), Some(id));
        assert_eq!(pass.cx.graph.cache.len(), 1);

        pass.cx.blink.tick();
        assert!(!pass.render_layouts(&mut layouts, false));
        assert_eq!(pass.cx.graph.cache.len(), 1);

        // title in the label color, vertical axis right of the value labels
        assert!(canvas.any_in(0, 0, 64, 8, LABEL_COLOR));
        assert_eq!(canvas.pixel(25, 30), GRAPH_AXIS);
    }
}
