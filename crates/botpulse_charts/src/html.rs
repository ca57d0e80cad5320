//! Standalone HTML dashboard page.
//!
//! The page declares its canvases up front, the same way the hosting page
//! of a browser dashboard owns its `<canvas>` elements. Charts drawn into
//! [`CanvasSurface`]s are then placed onto matching canvases and emitted as
//! one charting-library constructor call per canvas.

use crate::config::ChartConfig;
use crate::surface::{RenderError, Surface};
use std::fs;
use std::path::Path;
use tracing::info;

pub const CHART_JS_SRC: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// A canvas element that keeps the last chart drawn into it.
#[derive(Debug, Clone, Default)]
pub struct CanvasSurface {
    id: String,
    chart: Option<ChartConfig>,
}

impl CanvasSurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            chart: None,
        }
    }

    pub fn chart(&self) -> Option<&ChartConfig> {
        self.chart.as_ref()
    }
}

impl Surface for CanvasSurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&mut self, chart: &ChartConfig) -> Result<(), RenderError> {
        self.chart = Some(chart.clone());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Slot {
    id: String,
    chart: Option<ChartConfig>,
}

#[derive(Debug, Clone)]
pub struct HtmlDashboard {
    title: String,
    script_src: String,
    slots: Vec<Slot>,
}

impl HtmlDashboard {
    /// Every canvas id must be unique on the page.
    pub fn new<I, S>(title: impl Into<String>, canvas_ids: I) -> Result<Self, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut slots: Vec<Slot> = Vec::new();
        for id in canvas_ids {
            let id = id.into();
            if slots.iter().any(|slot| slot.id == id) {
                return Err(RenderError::DuplicateSurface(id));
            }
            slots.push(Slot { id, chart: None });
        }

        Ok(Self {
            title: title.into(),
            script_src: CHART_JS_SRC.to_string(),
            slots,
        })
    }

    #[must_use]
    pub fn with_script_src(mut self, script_src: impl Into<String>) -> Self {
        self.script_src = script_src.into();
        self
    }

    /// Put the chart held by `surface` onto the canvas with the same id.
    pub fn place(&mut self, surface: &CanvasSurface) -> Result<(), RenderError> {
        let slot = self
            .slots
            .iter_mut()
            .find(|slot| slot.id == surface.id)
            .ok_or_else(|| RenderError::UnknownSurface(surface.id.clone()))?;

        slot.chart = surface.chart.clone();
        Ok(())
    }

    pub fn to_html(&self) -> Result<String, RenderError> {
        let title = escape_html(&self.title);
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{title}</title>\n"));
        html.push_str(&format!(
            "<script src=\"{}\"></script>\n",
            escape_html(&self.script_src)
        ));
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{title}</h1>\n"));

        for slot in &self.slots {
            html.push_str(&format!(
                "<div class=\"chart-container\"><canvas id=\"{}\"></canvas></div>\n",
                escape_html(&slot.id)
            ));
        }

        html.push_str("<script>\n");
        for slot in &self.slots {
            let Some(chart) = &slot.chart else {
                continue;
            };
            html.push_str(&format!(
                "new Chart(document.getElementById({}).getContext(\"2d\"), {});\n",
                script_json(&slot.id)?,
                script_json(chart)?
            ));
        }
        html.push_str("</script>\n</body>\n</html>\n");

        Ok(html)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let path = path.as_ref();
        fs::write(path, self.to_html()?)?;
        info!(path = %path.display(), "dashboard page written");
        Ok(())
    }
}

// JSON is valid JS; only a closing tag inside a string could end the script early.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
