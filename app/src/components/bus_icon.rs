use sycamore::prelude::*;

use crate::{consts::DEFAULT_BUS_COLOR, registry::Attrs, svg};

#[derive(Prop)]
pub struct BusIconProps {
    /// Route label shown next to the icon.
    pub line: String,
    /// Bearing in degrees, clockwise from north.
    pub heading: Option<f64>,
    pub color: Option<String>,
}

#[component]
pub fn BusIcon<G: Html>(cx: Scope, props: BusIconProps) -> View<G> {
    let color = props.color.as_deref().unwrap_or(DEFAULT_BUS_COLOR);
    let style = format!("color: {color}");

    let rotation = match props.heading.and_then(normalize_heading) {
        Some(heading) => format!("display: inline-block; transform: rotate({heading}deg)"),
        None => "display: inline-block".to_owned(),
    };

    let title = format!("Line {}", props.line);
    let line = props.line;

    view! { cx,
        span(class="bus-icon inline-flex items-center gap-1", style=style, title=title) {
            span(class="w-[16px]", style=rotation, dangerously_set_inner_html=svg::BUS) {}
            span(class="font-bold text-xs") { (line) }
        }
    }
}

/// Adapts props passed by name to [`BusIcon`], see [`crate::registry::Components`].
pub fn render<G: Html>(cx: Scope, attrs: Attrs) -> View<G> {
    let line = attrs.get("line").unwrap_or_default().to_owned();
    let heading = attrs.get("heading").and_then(|h| h.trim().parse::<f64>().ok());
    let color = attrs.get("color").map(ToOwned::to_owned);

    view! { cx, BusIcon(line=line, heading=heading, color=color) }
}

fn normalize_heading(heading: f64) -> Option<f64> {
    heading.is_finite().then(|| heading.rem_euclid(360.0))
}
