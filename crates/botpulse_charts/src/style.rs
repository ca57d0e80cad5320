use bon::Builder;

pub const ACTIVITY_LABELS: [&str; 3] = ["Posts", "Replies", "Mentions"];
pub const RESPONSE_LABELS: [&str; 2] = ["Text Responses", "Image Responses"];

pub const ACTIVITY_PALETTE: [&str; 3] = ["#1DA1F2", "#17BF63", "#FFAD1F"];
pub const RESPONSE_PALETTE: [&str; 2] = ["#1DA1F2", "#794BC4"];

pub const BEGIN_AT_ZERO: bool = true;

/// Presentation settings shared by both dashboard charts.
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct ChartStyle {
    #[builder(default = BEGIN_AT_ZERO)]
    pub begin_at_zero: bool,
    /// One colour per activity category, in label order.
    #[builder(default = ACTIVITY_PALETTE.map(String::from))]
    pub activity_palette: [String; 3],
    #[builder(default = RESPONSE_PALETTE.map(String::from))]
    pub response_palette: [String; 2],
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::builder().build()
    }
}
