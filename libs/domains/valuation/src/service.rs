use domain_societies::SocietyRepository;
use std::sync::Arc;
use validator::Validate;

use crate::client::ValuationBackend;
use crate::error::{ValuationError, ValuationResult};
use crate::models::{PredictRequest, Prediction, PredictorRequest, RecommendRequest, Recommendations};

#[derive(Clone)]
pub struct ValuationService<B: ValuationBackend, R: SocietyRepository> {
    backend: Arc<B>,
    societies: Arc<R>,
}

fn validate(input: &impl Validate) -> ValuationResult<()> {
    input
        .validate()
        .map_err(|e| ValuationError::InvalidInput(e.to_string()))
}

impl<B: ValuationBackend, R: SocietyRepository> ValuationService<B, R> {
    pub fn new(backend: B, societies: R) -> Self {
        Self {
            backend: Arc::new(backend),
            societies: Arc::new(societies),
        }
    }

    /// Price prediction for a society the directory knows about
    pub async fn predict(&self, request: PredictRequest) -> ValuationResult<Prediction> {
        validate(&request)?;
        let (city, society) = (request.city.trim(), request.society.trim());

        if self
            .societies
            .find_by_city_and_name(city, society)
            .await?
            .is_none()
        {
            tracing::warn!(city, society, "Prediction requested for unknown society");
            return Err(ValuationError::SocietyNotFound {
                city: city.to_string(),
                society: society.to_string(),
            });
        }

        let prediction = self
            .backend
            .predict(&PredictorRequest {
                city: city.to_string(),
                location: society.to_string(),
                marla: request.marla,
            })
            .await?;

        tracing::info!(city, society, marla = request.marla, "Price predicted");
        Ok(prediction.without_first_forecast_year())
    }

    pub async fn recommend(&self, request: RecommendRequest) -> ValuationResult<Recommendations> {
        validate(&request)?;

        match self.backend.recommend(&request).await {
            Ok(recommendations) => {
                tracing::info!(
                    city = %request.city,
                    price_bin = %request.price_bin,
                    results = recommendations.recommendations.len(),
                    "Societies recommended"
                );
                Ok(recommendations)
            }
            Err(ValuationError::NoData(_)) => Err(ValuationError::NoData(
                "No societies found for the given filters".to_string(),
            )),
            Err(e) => Err(e),
        }
    }
}
