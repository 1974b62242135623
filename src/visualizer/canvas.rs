//! Drawing surface abstraction and a recording implementation that can be
//! exported as SVG.

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::Serialize;

pub const WIDTH: f64 = 340.0;
pub const HEIGHT: f64 = 220.0;

pub mod palette {
    pub const BACKGROUND: &str = "#0f1117";
    pub const FOUND: &str = "#4ade80";
    pub const CURRENT: &str = "#22d3ee";
    pub const VISITED: &str = "#1e3a2f";
    pub const VISITED_STROKE: &str = "#4ade8060";
    pub const IDLE: &str = "#1a1d2e";
    pub const EDGE: &str = "#2a2d3a";
    pub const TEXT: &str = "#e2e8f0";
    pub const MUTED: &str = "#6b7280";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextStyle {
    pub color: String,
    pub size: f64,
    pub bold: bool,
    pub align: Align,
}

impl TextStyle {
    pub fn label(color: &str) -> Self {
        Self {
            color: color.to_string(),
            size: 10.0,
            bold: false,
            align: Align::Left,
        }
    }

    pub fn centered(color: &str, size: f64, bold: bool) -> Self {
        Self {
            color: color.to_string(),
            size,
            bold,
            align: Align::Center,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Clear {
        color: String,
    },
    FillRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
    },
    StrokeRect {
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        color: String,
        line_width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        stroke: String,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        color: String,
        line_width: f64,
    },
    Polygon {
        points: Vec<(f64, f64)>,
        color: String,
    },
    Text {
        x: f64,
        y: f64,
        content: String,
        style: TextStyle,
    },
}

pub trait Canvas {
    fn width(&self) -> f64;
    fn height(&self) -> f64;
    fn clear(&mut self, color: &str);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64);
    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str);
    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, line_width: f64);
    fn polygon(&mut self, points: &[(f64, f64)], color: &str);
    fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle);
}

/// Records draw calls in order.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayList {
    pub width: f64,
    pub height: f64,
    pub commands: Vec<DrawCommand>,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

impl DisplayList {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn to_svg(&self) -> Result<String> {
        let mut writer = Writer::new(Vec::new());

        let mut root = BytesStart::new("svg");
        root.push_attribute(("xmlns", "http://www.w3.org/2000/svg"));
        root.push_attribute(("width", fmt_num(self.width).as_str()));
        root.push_attribute(("height", fmt_num(self.height).as_str()));
        root.push_attribute((
            "viewBox",
            format!("0 0 {} {}", fmt_num(self.width), fmt_num(self.height)).as_str(),
        ));
        root.push_attribute(("font-family", "JetBrains Mono, monospace"));
        writer.write_event(Event::Start(root))?;

        for command in &self.commands {
            write_command(&mut writer, command, self.width, self.height)?;
        }

        writer.write_event(Event::End(BytesEnd::new("svg")))?;
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn fmt_num(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{:.2}", v)
    }
}

fn empty(name: &str, attrs: &[(&str, String)]) -> BytesStart<'static> {
    let mut el = BytesStart::new(name.to_string());
    for (key, value) in attrs {
        el.push_attribute((*key, value.as_str()));
    }
    el
}

fn write_command(
    writer: &mut Writer<Vec<u8>>,
    command: &DrawCommand,
    width: f64,
    height: f64,
) -> Result<()> {
    let el = match command {
        DrawCommand::Clear { color } => empty(
            "rect",
            &[
                ("x", "0".to_string()),
                ("y", "0".to_string()),
                ("width", fmt_num(width)),
                ("height", fmt_num(height)),
                ("fill", color.clone()),
            ],
        ),
        DrawCommand::FillRect { x, y, w, h, color } => empty(
            "rect",
            &[
                ("x", fmt_num(*x)),
                ("y", fmt_num(*y)),
                ("width", fmt_num(*w)),
                ("height", fmt_num(*h)),
                ("fill", color.clone()),
            ],
        ),
        DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color,
            line_width,
        } => empty(
            "rect",
            &[
                ("x", fmt_num(*x)),
                ("y", fmt_num(*y)),
                ("width", fmt_num(*w)),
                ("height", fmt_num(*h)),
                ("fill", "none".to_string()),
                ("stroke", color.clone()),
                ("stroke-width", fmt_num(*line_width)),
            ],
        ),
        DrawCommand::Circle {
            cx,
            cy,
            r,
            fill,
            stroke,
        } => empty(
            "circle",
            &[
                ("cx", fmt_num(*cx)),
                ("cy", fmt_num(*cy)),
                ("r", fmt_num(*r)),
                ("fill", fill.clone()),
                ("stroke", stroke.clone()),
                ("stroke-width", "1.5".to_string()),
            ],
        ),
        DrawCommand::Line {
            x1,
            y1,
            x2,
            y2,
            color,
            line_width,
        } => empty(
            "line",
            &[
                ("x1", fmt_num(*x1)),
                ("y1", fmt_num(*y1)),
                ("x2", fmt_num(*x2)),
                ("y2", fmt_num(*y2)),
                ("stroke", color.clone()),
                ("stroke-width", fmt_num(*line_width)),
            ],
        ),
        DrawCommand::Polygon { points, color } => {
            let points = points
                .iter()
                .map(|(x, y)| format!("{},{}", fmt_num(*x), fmt_num(*y)))
                .collect::<Vec<_>>()
                .join(" ");
            empty("polygon", &[("points", points), ("fill", color.clone())])
        }
        DrawCommand::Text {
            x,
            y,
            content,
            style,
        } => {
            let mut attrs = vec![
                ("x", fmt_num(*x)),
                ("y", fmt_num(*y)),
                ("fill", style.color.clone()),
                ("font-size", fmt_num(style.size)),
            ];
            if style.bold {
                attrs.push(("font-weight", "bold".to_string()));
            }
            if style.align == Align::Center {
                attrs.push(("text-anchor", "middle".to_string()));
                attrs.push(("dominant-baseline", "central".to_string()));
            }

            writer.write_event(Event::Start(empty("text", &attrs)))?;
            writer.write_event(Event::Text(BytesText::new(content)))?;
            writer.write_event(Event::End(BytesEnd::new("text")))?;
            return Ok(());
        }
    };

    writer.write_event(Event::Empty(el))?;
    Ok(())
}

impl Canvas for DisplayList {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self, color: &str) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear {
            color: color.to_string(),
        });
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: &str, line_width: f64) {
        self.commands.push(DrawCommand::StrokeRect {
            x,
            y,
            w,
            h,
            color: color.to_string(),
            line_width,
        });
    }

    fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: &str, stroke: &str) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            r,
            fill: fill.to_string(),
            stroke: stroke.to_string(),
        });
    }

    fn line(&mut self, from: (f64, f64), to: (f64, f64), color: &str, line_width: f64) {
        self.commands.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            color: color.to_string(),
            line_width,
        });
    }

    fn polygon(&mut self, points: &[(f64, f64)], color: &str) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color: color.to_string(),
        });
    }

    fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            x,
            y,
            content: content.to_string(),
            style,
        });
    }
}
