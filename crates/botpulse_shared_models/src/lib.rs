use serde::{Deserialize, Serialize};
use std::fmt;

/// Counters reported by the bot's `/api/stats` endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    pub post_count: u64,
    pub reply_count: u64,
    pub mention_count: u64,
    pub text_response_count: u64,
    pub image_response_count: u64,
}

impl StatisticsSnapshot {
    /// Count one handled interaction and the kind of response it got.
    pub fn record(&mut self, interaction: InteractionType, response: ResponseType) {
        let activity = match interaction {
            InteractionType::Post => &mut self.post_count,
            InteractionType::Reply => &mut self.reply_count,
            InteractionType::Mention => &mut self.mention_count,
        };
        *activity = activity.saturating_add(1);

        let responses = match response {
            ResponseType::Text => &mut self.text_response_count,
            ResponseType::Image => &mut self.image_response_count,
        };
        *responses = responses.saturating_add(1);
    }

    /// Counters paired with their wire field names, in declaration order.
    pub fn counters(&self) -> [(&'static str, u64); 5] {
        [
            ("post_count", self.post_count),
            ("reply_count", self.reply_count),
            ("mention_count", self.mention_count),
            ("text_response_count", self.text_response_count),
            ("image_response_count", self.image_response_count),
        ]
    }

    pub fn counter_mut(&mut self, field: &str) -> Option<&mut u64> {
        match field {
            "post_count" => Some(&mut self.post_count),
            "reply_count" => Some(&mut self.reply_count),
            "mention_count" => Some(&mut self.mention_count),
            "text_response_count" => Some(&mut self.text_response_count),
            "image_response_count" => Some(&mut self.image_response_count),
            _ => None,
        }
    }

    pub fn total_activity(&self) -> u64 {
        self.post_count
            .saturating_add(self.reply_count)
            .saturating_add(self.mention_count)
    }

    pub fn total_responses(&self) -> u64 {
        self.text_response_count
            .saturating_add(self.image_response_count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionType {
    Post,
    Reply,
    Mention,
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionType::Post => write!(f, "post"),
            InteractionType::Reply => write!(f, "reply"),
            InteractionType::Mention => write!(f, "mention"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Image,
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseType::Text => write!(f, "text"),
            ResponseType::Image => write!(f, "image"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_bumps_activity_and_response_counters() {
        let mut snapshot = StatisticsSnapshot::default();

        snapshot.record(InteractionType::Post, ResponseType::Text);
        snapshot.record(InteractionType::Reply, ResponseType::Image);
        snapshot.record(InteractionType::Mention, ResponseType::Text);
        snapshot.record(InteractionType::Reply, ResponseType::Text);

        assert_eq!(
            snapshot,
            StatisticsSnapshot {
                post_count: 1,
                reply_count: 2,
                mention_count: 1,
                text_response_count: 3,
                image_response_count: 1,
            }
        );
        assert_eq!(snapshot.total_activity(), 4);
        assert_eq!(snapshot.total_responses(), 4);
    }

    #[test]
    fn record_saturates() {
        let mut snapshot = StatisticsSnapshot {
            post_count: u64::MAX,
            image_response_count: u64::MAX,
            ..Default::default()
        };

        snapshot.record(InteractionType::Post, ResponseType::Image);

        assert_eq!(snapshot.post_count, u64::MAX);
        assert_eq!(snapshot.image_response_count, u64::MAX);
    }

    #[test]
    fn decodes_endpoint_payload() {
        let body = r#"{
            "post_count": 5,
            "reply_count": 3,
            "mention_count": 1,
            "image_response_count": 2,
            "text_response_count": 7
        }"#;

        let snapshot: StatisticsSnapshot = serde_json::from_str(body).unwrap();

        assert_eq!(snapshot.post_count, 5);
        assert_eq!(snapshot.reply_count, 3);
        assert_eq!(snapshot.mention_count, 1);
        assert_eq!(snapshot.text_response_count, 7);
        assert_eq!(snapshot.image_response_count, 2);
    }

    #[test]
    fn rejects_incomplete_or_negative_payloads() {
        let missing = r#"{
            "post_count": 1,
            "reply_count": 2,
            "mention_count": 3,
            "text_response_count": 4
        }"#;
        assert!(serde_json::from_str::<StatisticsSnapshot>(missing).is_err());

        let negative = r#"{
            "post_count": -1,
            "reply_count": 0,
            "mention_count": 0,
            "image_response_count": 0,
            "text_response_count": 0
        }"#;
        assert!(serde_json::from_str::<StatisticsSnapshot>(negative).is_err());
    }

    #[test]
    fn interaction_wire_names_are_lowercase() {
        assert_eq!(
            serde_json::to_string(&InteractionType::Mention).unwrap(),
            "\"mention\""
        );
        let response: ResponseType = serde_json::from_str("\"image\"").unwrap();
        assert_eq!(response, ResponseType::Image);
        assert_eq!(InteractionType::Reply.to_string(), "reply");
    }

    #[test]
    fn counter_names_match_wire_fields() {
        let mut snapshot = StatisticsSnapshot {
            post_count: 1,
            reply_count: 2,
            mention_count: 3,
            text_response_count: 4,
            image_response_count: 5,
        };
        let wire = serde_json::to_value(snapshot).unwrap();

        for (field, value) in snapshot.counters() {
            assert_eq!(wire[field], value, "{field}");
        }

        *snapshot.counter_mut("mention_count").unwrap() = 30;
        assert_eq!(snapshot.mention_count, 30);
        assert!(snapshot.counter_mut("follower_count").is_none());
    }
}
