use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ValuationConfig;
use crate::error::{ValuationError, ValuationResult};
use crate::models::{PredictorRequest, Prediction, RecommendRequest, Recommendations};

/// The two model services behind this domain
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ValuationBackend: Send + Sync {
    async fn predict(&self, request: &PredictorRequest) -> ValuationResult<Prediction>;

    async fn recommend(&self, request: &RecommendRequest) -> ValuationResult<Recommendations>;
}

/// JSON-over-HTTP client for the predictor and recommender
#[derive(Clone)]
pub struct HttpValuationClient {
    client: Client,
    predictor_url: String,
    recommender_url: String,
}

impl HttpValuationClient {
    pub fn new(config: &ValuationConfig) -> ValuationResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            predictor_url: config.predictor_url.trim_end_matches('/').to_string(),
            recommender_url: config.recommender_url.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B, T>(&self, url: String, body: &B) -> ValuationResult<T>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self.client.post(&url).json(body).send().await?;

        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ValuationError::NoData(
                "No data available for the given filters.".to_string(),
            )),
            status => {
                tracing::warn!(%url, %status, "Valuation service returned an error");
                Err(ValuationError::Upstream(format!("{url} answered {status}")))
            }
        }
    }
}

#[async_trait]
impl ValuationBackend for HttpValuationClient {
    async fn predict(&self, request: &PredictorRequest) -> ValuationResult<Prediction> {
        self.post(format!("{}/predict", self.predictor_url), request)
            .await
    }

    async fn recommend(&self, request: &RecommendRequest) -> ValuationResult<Recommendations> {
        self.post(format!("{}/recommend", self.recommender_url), request)
            .await
    }
}
