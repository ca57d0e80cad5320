use crate::config::{Axis, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset, Scales};
use crate::style::{ACTIVITY_LABELS, ChartStyle, RESPONSE_LABELS};
use crate::surface::{RenderError, Surface};
use botpulse_shared_models::StatisticsSnapshot;
use tracing::info;

pub const ACTIVITY_DATASET: &str = "Activity";
pub const RESPONSE_DATASET: &str = "Responses";

/// Bar chart of posts, replies and mentions.
pub fn activity_chart(snapshot: &StatisticsSnapshot, style: &ChartStyle) -> ChartConfig {
    let scales = style.begin_at_zero.then(|| Scales {
        y: Axis {
            begin_at_zero: true,
        },
    });

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: ACTIVITY_LABELS.map(String::from).to_vec(),
            datasets: vec![Dataset {
                label: ACTIVITY_DATASET.to_string(),
                data: vec![
                    snapshot.post_count,
                    snapshot.reply_count,
                    snapshot.mention_count,
                ],
                background_color: style.activity_palette.to_vec(),
            }],
        },
        options: ChartOptions { scales },
    }
}

/// Pie chart of text against image responses.
pub fn response_chart(snapshot: &StatisticsSnapshot, style: &ChartStyle) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels: RESPONSE_LABELS.map(String::from).to_vec(),
            datasets: vec![Dataset {
                label: RESPONSE_DATASET.to_string(),
                data: vec![
                    snapshot.text_response_count,
                    snapshot.image_response_count,
                ],
                background_color: style.response_palette.to_vec(),
            }],
        },
        options: ChartOptions::default(),
    }
}

pub fn render_activity_chart<S: Surface + ?Sized>(
    snapshot: &StatisticsSnapshot,
    surface: &mut S,
    style: &ChartStyle,
) -> Result<ChartConfig, RenderError> {
    draw(activity_chart(snapshot, style), surface)
}

pub fn render_response_chart<S: Surface + ?Sized>(
    snapshot: &StatisticsSnapshot,
    surface: &mut S,
    style: &ChartStyle,
) -> Result<ChartConfig, RenderError> {
    draw(response_chart(snapshot, style), surface)
}

fn draw<S: Surface + ?Sized>(
    chart: ChartConfig,
    surface: &mut S,
) -> Result<ChartConfig, RenderError> {
    surface.draw(&chart)?;
    info!(surface = surface.id(), kind = %chart.kind, "chart rendered");
    Ok(chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn snapshot() -> StatisticsSnapshot {
        StatisticsSnapshot {
            post_count: 5,
            reply_count: 3,
            mention_count: 1,
            text_response_count: 7,
            image_response_count: 2,
        }
    }

    #[test]
    fn activity_chart_orders_posts_replies_mentions() {
        let chart = activity_chart(&snapshot(), &ChartStyle::default());

        assert_eq!(chart.kind, ChartKind::Bar);
        assert_eq!(chart.data.labels, vec!["Posts", "Replies", "Mentions"]);
        assert_eq!(chart.data.datasets.len(), 1);
        assert_eq!(chart.data.datasets[0].data, vec![5, 3, 1]);
        assert_eq!(
            chart.data.datasets[0].background_color,
            vec!["#1DA1F2", "#17BF63", "#FFAD1F"]
        );
        assert_eq!(
            chart.options.scales,
            Some(Scales {
                y: Axis {
                    begin_at_zero: true
                }
            })
        );
    }

    #[test]
    fn response_chart_orders_text_then_image() {
        let chart = response_chart(&snapshot(), &ChartStyle::default());

        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.data.labels, vec!["Text Responses", "Image Responses"]);
        assert_eq!(chart.data.datasets[0].data, vec![7, 2]);
        assert_eq!(chart.data.datasets[0].background_color, vec!["#1DA1F2", "#794BC4"]);
        assert_eq!(chart.options.scales, None);
    }

    #[test]
    fn axis_floor_follows_style() {
        let style = ChartStyle::builder().begin_at_zero(false).build();

        let chart = activity_chart(&snapshot(), &style);

        assert_eq!(chart.options.scales, None);
    }

    #[test]
    fn serializes_to_charting_library_shape() {
        let chart = activity_chart(&snapshot(), &ChartStyle::default());

        let value = serde_json::to_value(&chart).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "type": "bar",
                "data": {
                    "labels": ["Posts", "Replies", "Mentions"],
                    "datasets": [{
                        "label": "Activity",
                        "data": [5, 3, 1],
                        "backgroundColor": ["#1DA1F2", "#17BF63", "#FFAD1F"]
                    }]
                },
                "options": { "scales": { "y": { "beginAtZero": true } } }
            })
        );

        let pie = response_chart(&snapshot(), &ChartStyle::default());
        let pie = serde_json::to_value(&pie).unwrap();
        assert_eq!(pie["type"], "pie");
        assert_eq!(pie["options"], serde_json::json!({}));
    }

    #[test]
    fn points_pair_labels_with_values() {
        let chart = response_chart(&snapshot(), &ChartStyle::default());

        let points: Vec<_> = chart.points().collect();

        assert_eq!(points, vec![("Text Responses", 7), ("Image Responses", 2)]);
        assert_eq!(chart.title(), "Responses");
    }
}
