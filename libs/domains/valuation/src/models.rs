use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /predict`
///
/// Missing fields deserialize to empty values so they fail validation with
/// `INVALID_INPUT` instead of a JSON data error.
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct PredictRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "city is required"))]
    #[schema(example = "Islamabad")]
    pub city: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "society is required"))]
    #[schema(example = "DHA Phase 2")]
    pub society: String,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "marla must be positive"))]
    #[schema(example = 10.0)]
    pub marla: f64,
}

/// What the predictor service expects
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictorRequest {
    pub city: String,
    pub location: String,
    pub marla: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlotPoint {
    #[serde(rename = "Date")]
    pub date: i32,
    #[serde(rename = "Price")]
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Prediction {
    /// Formatted price, e.g. "24,500,000.00"
    pub prediction: String,
    #[serde(rename = "plotData")]
    pub plot_data: Vec<PlotPoint>,
}

impl Prediction {
    /// Drops the first 2024 point; the predictor emits the forecast year twice
    pub fn without_first_forecast_year(mut self) -> Self {
        if let Some(index) = self.plot_data.iter().position(|p| p.date == 2024) {
            self.plot_data.remove(index);
        }
        self
    }
}

/// Body of `POST /recommend-societies`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RecommendRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,

    /// Price band, e.g. "medium"
    #[serde(default)]
    #[validate(length(min = 1, message = "price_bin is required"))]
    pub price_bin: String,

    #[serde(default)]
    #[validate(range(exclusive_min = 0.0, message = "marla must be positive"))]
    pub marla: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendation {
    pub city: String,
    pub location: String,
    pub price_2023: f64,
    pub area_marla: f64,
    pub price_bin: String,
    pub cluster: i64,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recommendations {
    pub recommendations: Vec<Recommendation>,
}
