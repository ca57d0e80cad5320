use crate::config::ChartConfig;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to write chart output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize chart: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("No canvas with id '{0}' on the page")]
    UnknownSurface(String),
    #[error("Canvas id '{0}' is used more than once")]
    DuplicateSurface(String),
}

/// Something a chart can be drawn into.
pub trait Surface {
    fn id(&self) -> &str;

    fn draw(&mut self, chart: &ChartConfig) -> Result<(), RenderError>;
}

/// Keeps every chart drawn into it, in call order.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    id: String,
    drawn: Vec<ChartConfig>,
}

impl MemorySurface {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            drawn: Vec::new(),
        }
    }

    pub fn drawn(&self) -> &[ChartConfig] {
        &self.drawn
    }

    pub fn last(&self) -> Option<&ChartConfig> {
        self.drawn.last()
    }
}

impl Surface for MemorySurface {
    fn id(&self) -> &str {
        &self.id
    }

    fn draw(&mut self, chart: &ChartConfig) -> Result<(), RenderError> {
        self.drawn.push(chart.clone());
        Ok(())
    }
}
