use serde::de::DeserializeOwned;

/// A parameterless GET endpoint of the stats API.
pub trait Method0 {
    const PATH: &'static str;

    type Response: DeserializeOwned;
}
