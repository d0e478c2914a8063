// Fill is `currentColor`, the color is set through the css `color` of the parent.
pub static BUS: &str = include_str!("svg/bus.svg");
