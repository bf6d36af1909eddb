//! Procedural tool icons.

use egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, pos2};
use gridpaint_core::Icon;

use crate::sizing;

/// Point inside `rect` from fractional coordinates.
fn at(rect: Rect, fx: f32, fy: f32) -> Pos2 {
    pos2(rect.left() + rect.width() * fx, rect.top() + rect.height() * fy)
}

/// Paint `icon` fitted to `rect`. Every glyph keeps its working tip in the
/// bottom-left corner so it can double as a cursor.
pub fn paint_icon(painter: &Painter, icon: Icon, rect: Rect, color: Color32) {
    let stroke = Stroke::new(sizing::ICON_STROKE, color);
    match icon {
        Icon::Pencil => {
            let body = vec![
                at(rect, 0.0, 1.0),
                at(rect, 0.15, 0.6),
                at(rect, 0.75, 0.0),
                at(rect, 1.0, 0.25),
                at(rect, 0.4, 0.85),
            ];
            painter.add(Shape::closed_line(body, stroke));
            painter.line_segment([at(rect, 0.15, 0.6), at(rect, 0.4, 0.85)], stroke);
        }
        Icon::Marker => {
            let body = vec![
                at(rect, 0.1, 0.65),
                at(rect, 0.65, 0.1),
                at(rect, 0.9, 0.35),
                at(rect, 0.35, 0.9),
            ];
            painter.add(Shape::convex_polygon(body, color, Stroke::NONE));
            let nib = vec![at(rect, 0.0, 1.0), at(rect, 0.1, 0.65), at(rect, 0.35, 0.9)];
            painter.add(Shape::convex_polygon(nib, color, stroke));
        }
        Icon::Eraser => {
            let body = vec![
                at(rect, 0.0, 0.7),
                at(rect, 0.6, 0.1),
                at(rect, 0.95, 0.45),
                at(rect, 0.35, 1.0),
            ];
            painter.add(Shape::closed_line(body, stroke));
            let pad = vec![
                at(rect, 0.0, 0.7),
                at(rect, 0.25, 0.45),
                at(rect, 0.6, 0.8),
                at(rect, 0.35, 1.0),
            ];
            painter.add(Shape::convex_polygon(pad, color, Stroke::NONE));
        }
        Icon::ColorPicker => {
            painter.line_segment([at(rect, 0.0, 1.0), at(rect, 0.6, 0.4)], Stroke::new(sizing::ICON_STROKE * 1.5, color));
            let radius = rect.width().min(rect.height()) * 0.18;
            painter.circle_filled(at(rect, 0.75, 0.25), radius, color);
            painter.line_segment([at(rect, 0.45, 0.3), at(rect, 0.7, 0.55)], stroke);
        }
    }
}
