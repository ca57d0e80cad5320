use botpulse_charts::{
    CanvasSurface, ChartStyle, HtmlDashboard, RenderError, Surface, render_activity_chart,
    render_response_chart,
};
use botpulse_shared_models::StatisticsSnapshot;
use botpulse_stats_api::{FetchError, StatsApiClient};
use thiserror::Error;
use tracing::{error, info};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000";
pub const ACTIVITY_SURFACE: &str = "activityChart";
pub const RESPONSE_SURFACE: &str = "responseChart";

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("Activity and response charts both target surface '{0}'")]
    DuplicateSurface(String),
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub endpoint: String,
    pub activity_surface: String,
    pub response_surface: String,
    pub style: ChartStyle,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            activity_surface: ACTIVITY_SURFACE.to_string(),
            response_surface: RESPONSE_SURFACE.to_string(),
            style: ChartStyle::default(),
        }
    }
}

pub struct Dashboard {
    config: DashboardConfig,
    client: StatsApiClient,
}

impl Dashboard {
    pub fn init(config: DashboardConfig) -> Result<Self, DashboardError> {
        if config.activity_surface == config.response_surface {
            return Err(DashboardError::DuplicateSurface(config.activity_surface));
        }

        let client = StatsApiClient::new(&config.endpoint)?;
        info!(endpoint = client.base_url(), "dashboard initialized");
        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fetch one snapshot and draw both charts from it.
    ///
    /// A failed fetch is logged and returned before any surface is touched.
    pub async fn run<A, R>(
        &self,
        activity: &mut A,
        response: &mut R,
    ) -> Result<StatisticsSnapshot, DashboardError>
    where
        A: Surface + ?Sized,
        R: Surface + ?Sized,
    {
        let snapshot = match self.client.fetch_stats().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!(endpoint = self.client.base_url(), "Failed to fetch stats: {}", e);
                return Err(e.into());
            }
        };

        render_activity_chart(&snapshot, activity, &self.config.style)?;
        render_response_chart(&snapshot, response, &self.config.style)?;

        Ok(snapshot)
    }
}

/// Page holding both canvases, each with the chart drawn into it.
pub fn html_page(
    title: &str,
    activity: &CanvasSurface,
    response: &CanvasSurface,
) -> Result<HtmlDashboard, RenderError> {
    let mut page = HtmlDashboard::new(title, [activity.id(), response.id()])?;
    page.place(activity)?;
    page.place(response)?;
    Ok(page)
}
