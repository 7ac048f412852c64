use yew::prelude::*;
use web_sys::{window, HtmlCanvasElement, CanvasRenderingContext2d};
use wasm_bindgen::JsCast;
use std::f64::consts::PI;

const SEGMENT_COLORS: [&str; 6] = [
    "#f97316", // Orange
    "#06b6d4", // Cyan
    "#8b5cf6", // Violet
    "#ec4899", // Pink
    "#22c55e", // Green
    "#eab308", // Amber
];

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub rotation: f64,
    pub is_spinning: bool,
    pub labels: Vec<String>,
    /// Clockwise from 12 o'clock, in degrees.
    #[prop_or_default]
    pub pointer_angle: f64,
}

fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Neighbouring wedges never share a color, including the wrap-around seam.
fn segment_color(index: usize, count: usize) -> &'static str {
    let palette = SEGMENT_COLORS.len();
    let mut slot = index % palette;
    if count > 1 && index == count - 1 && slot == 0 {
        // Previous wedge sits on the last palette slot.
        slot = 2;
    }
    SEGMENT_COLORS[slot]
}

fn is_dark_mode() -> bool {
    window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .map(|el| el.class_list().contains("dark"))
        .unwrap_or(false)
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_wheel(
    context: &CanvasRenderingContext2d,
    width: f64,
    height: f64,
    rotation: f64,
    is_spinning: bool,
    labels: &[String],
    pointer_angle: f64,
) {
    let center_x = width / 2.0;
    let center_y = height / 2.0;
    let radius = width.min(height) / 2.0 - 20.0;
    let dark = is_dark_mode();

    context.clear_rect(0.0, 0.0, width, height);

    // Outer glow
    let glow_intensity = if is_spinning { 0.25 } else { 0.15 };
    context.begin_path();
    if dark {
        context.set_fill_style_str(&format!("rgba(130, 100, 255, {})", glow_intensity));
    } else {
        context.set_fill_style_str(&format!("rgba(100, 130, 255, {})", glow_intensity));
    }
    let _ = context.arc(center_x, center_y, radius + 15.0, 0.0, 2.0 * PI);
    context.fill();

    context.begin_path();
    context.set_fill_style_str(if dark { "#1a1c2e" } else { "#f0f2ff" });
    let _ = context.arc(center_x, center_y, radius, 0.0, 2.0 * PI);
    context.fill();

    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(to_radians(rotation));
    let _ = context.translate(-center_x, -center_y);

    let count = labels.len().max(1);
    let sweep = 2.0 * PI / count as f64;
    // Canvas angles start at 3 o'clock; wedge 0 starts at 12.
    let start_of = |i: usize| i as f64 * sweep - PI / 2.0;

    for i in 0..labels.len() {
        context.begin_path();
        context.set_fill_style_str(segment_color(i, labels.len()));
        context.move_to(center_x, center_y);
        let _ = context.arc(center_x, center_y, radius, start_of(i), start_of(i) + sweep);
        context.close_path();
        context.fill();
    }

    // Dividers
    context.set_stroke_style_str(if dark { "rgba(255, 255, 255, 0.7)" } else { "rgba(255, 255, 255, 0.9)" });
    context.set_line_width(2.5);
    if labels.len() > 1 {
        for i in 0..labels.len() {
            let angle = start_of(i);
            context.begin_path();
            context.move_to(center_x, center_y);
            context.line_to(center_x + radius * angle.cos(), center_y + radius * angle.sin());
            context.stroke();
        }
    }

    // Labels read outward from the hub
    let font_px = (radius / 12.0).clamp(12.0, 20.0);
    context.set_font(&format!("bold {}px 'Segoe UI', Roboto, system-ui, sans-serif", font_px));
    context.set_text_align("center");
    context.set_text_baseline("middle");
    context.set_fill_style_str("#ffffff");
    context.set_shadow_color(if dark { "rgba(0, 0, 0, 0.7)" } else { "rgba(0, 0, 0, 0.5)" });
    context.set_shadow_blur(3.0);
    context.set_shadow_offset_x(1.0);
    context.set_shadow_offset_y(1.0);
    for (i, label) in labels.iter().enumerate() {
        context.save();
        let _ = context.translate(center_x, center_y);
        let _ = context.rotate(start_of(i) + sweep / 2.0);
        let _ = context.translate(radius * 0.62, 0.0);
        let _ = context.fill_text(label, 0.0, 0.0);
        context.restore();
    }
    context.set_shadow_color("rgba(0, 0, 0, 0)");
    context.set_shadow_blur(0.0);
    context.set_shadow_offset_x(0.0);
    context.set_shadow_offset_y(0.0);

    context.restore();

    // Hub
    let inner_radius = radius * 0.18;
    context.begin_path();
    context.set_fill_style_str(if dark { "#2d3142" } else { "#8b5cf6" });
    let _ = context.arc(center_x, center_y, inner_radius, 0.0, 2.0 * PI);
    context.fill();
    context.begin_path();
    context.set_fill_style_str(if dark { "#d8b4fe" } else { "#ffffff" });
    let _ = context.arc(center_x, center_y, inner_radius * 0.3, 0.0, 2.0 * PI);
    context.fill();

    // Rim
    context.begin_path();
    if is_spinning {
        let pulse = (js_sys::Date::now() / 400.0).sin() * 0.2 + 0.5;
        context.set_stroke_style_str(&format!("rgba(130, 100, 255, {})", pulse));
        context.set_line_width(5.0);
    } else {
        context.set_stroke_style_str("rgba(130, 100, 255, 0.5)");
        context.set_line_width(4.0);
    }
    let _ = context.arc(center_x, center_y, radius - 2.0, 0.0, 2.0 * PI);
    context.stroke();

    // Pointer, drawn at 12 o'clock then turned to its configured angle
    context.save();
    let _ = context.translate(center_x, center_y);
    let _ = context.rotate(to_radians(pointer_angle));
    let _ = context.translate(-center_x, -center_y);
    context.set_shadow_color(if is_spinning { "rgba(255, 215, 130, 0.8)" } else { "rgba(255, 215, 0, 0.6)" });
    context.set_shadow_blur(if is_spinning { 10.0 } else { 4.0 });

    let pointer_width = 20.0;
    let pointer_height = 30.0;
    let pointer_radius = 5.0;
    let left_corner_x = center_x - pointer_width;
    let top_y = center_y - radius - pointer_height;

    context.begin_path();
    context.move_to(center_x, center_y - radius + 5.0);
    context.line_to(left_corner_x + pointer_radius, top_y + pointer_radius);
    context.quadratic_curve_to(left_corner_x, top_y + pointer_radius, left_corner_x, top_y);
    context.line_to(center_x + pointer_width - pointer_radius, top_y);
    context.quadratic_curve_to(
        center_x + pointer_width, top_y,
        center_x + pointer_width, top_y + pointer_radius,
    );
    context.close_path();
    context.set_fill_style_str(if is_spinning { "#ffd700" } else { "#f59e0b" });
    context.fill();
    context.set_stroke_style_str("#e69500");
    context.set_line_width(1.5);
    context.stroke();
    context.restore();
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let canvas_ref = use_node_ref();

    {
        let canvas_ref = canvas_ref.clone();
        use_effect_with(
            (props.rotation, props.is_spinning, props.labels.clone(), props.pointer_angle),
            move |(rotation, is_spinning, labels, pointer_angle)| {
                if let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() {
                    if let Some(context) = context_2d(&canvas) {
                        draw_wheel(
                            &context,
                            canvas.width() as f64,
                            canvas.height() as f64,
                            *rotation,
                            *is_spinning,
                            labels,
                            *pointer_angle,
                        );
                    }
                }
                || ()
            },
        );
    }

    html! {
        <div class="relative">
            <canvas
                ref={canvas_ref}
                width="450"
                height="450"
                class="w-full max-w-[450px] h-auto rounded-full shadow-lg transition-all duration-300"
                style={if props.is_spinning {
                    "filter: drop-shadow(0px 5px 20px rgba(130, 100, 255, 0.4));"
                } else {
                    "filter: drop-shadow(0px 5px 15px rgba(0, 0, 0, 0.2));"
                }}
            />
        </div>
    }
}

// Easing function for smooth deceleration
pub fn ease_out_cubic(t: f64) -> f64 {
    // Modified ease-out: 1 - (1-t)^4
    1.0 - (1.0 - t).powi(4)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_wedges_differ() {
        for count in 2..=20 {
            for i in 0..count {
                let next = (i + 1) % count;
                assert_ne!(segment_color(i, count), segment_color(next, count), "count {} wedge {}", count, i);
            }
        }
    }

    #[test]
    fn test_easing_endpoints() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }
}
