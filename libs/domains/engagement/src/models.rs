use axum_helpers::JwtClaims;
use chrono::{DateTime, Utc};
use domain_societies::Society;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{EngagementError, EngagementResult};

/// The signed-in caller, taken from the JWT
#[derive(Debug, Clone, PartialEq)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
}

impl Author {
    /// `sub` must be a user id; tokens from other issuers are refused
    pub fn from_claims(claims: &JwtClaims) -> EngagementResult<Self> {
        let id = Uuid::parse_str(&claims.sub)
            .map_err(|_| EngagementError::UnknownCaller(claims.sub.clone()))?;
        Ok(Self {
            id,
            name: claims.name.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SocietyReview {
    pub id: Uuid,
    pub society_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    /// 1 to 5
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SocietyReview {
    pub fn new(society_id: Uuid, author: Author, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            society_id,
            user_id: author.id,
            user_name: author.name,
            rating: input.rating,
            comment: input.normalized_comment(),
            created_at: Utc::now(),
        }
    }
}

/// Review of the site itself rather than a society
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SiteReview {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SiteReview {
    pub fn new(author: Author, input: CreateReview) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: author.id,
            user_name: author.name,
            rating: input.rating,
            comment: input.normalized_comment(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateReview {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5."))]
    #[schema(example = 4)]
    pub rating: i32,

    #[validate(length(max = 2000, message = "Comment must be at most 2000 characters"))]
    pub comment: Option<String>,
}

impl CreateReview {
    /// Blank comments are stored as none
    fn normalized_comment(&self) -> Option<String> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
    }
}

/// Body for `POST /user-search/record-search`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate)]
pub struct RecordSearch {
    pub society_id: Uuid,
}

/// One society a user looked at; names are copied at record time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub society_id: Uuid,
    pub society_name: String,
    pub city_name: String,
    pub created_at: DateTime<Utc>,
}

impl SearchRecord {
    pub fn new(author: Author, society: &Society) -> Self {
        Self {
            id: Uuid::now_v7(),
            user_id: author.id,
            user_name: author.name,
            society_id: society.id,
            society_name: society.name.clone(),
            city_name: society.city.clone(),
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchHistory {
    pub searches: Vec<SearchRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClearedHistory {
    pub deleted: u64,
}

/// Query for `GET /top-trending-societies`
#[derive(Debug, Clone, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct TrendingQuery {
    #[validate(length(
        min = 1,
        message = "City is required to fetch top trending societies."
    ))]
    pub city: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendingSociety {
    #[serde(flatten)]
    pub society: Society,
    pub review_count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Trend {
    Rising,
    Stable,
    Declining,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbySociety {
    #[serde(flatten)]
    pub society: Society,
    pub distance_km: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendReport {
    pub society_id: Uuid,
    pub trend: Trend,
    pub search_count: u64,
    /// Ascending
    pub searched_at: Vec<DateTime<Utc>>,
    /// Nearest other societies with coordinates
    pub similar_societies: Vec<NearbySociety>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(sub: &str) -> JwtClaims {
        JwtClaims {
            sub: sub.to_string(),
            email: "ali@example.com".to_string(),
            name: "Ali".to_string(),
            roles: vec!["USER".to_string()],
            exp: 0,
            iat: 0,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_author_needs_uuid_subject() {
        let id = Uuid::now_v7();
        let author = Author::from_claims(&claims(&id.to_string())).unwrap();
        assert_eq!(author.id, id);
        assert_eq!(author.name, "Ali");

        let err = Author::from_claims(&claims("u-1")).unwrap_err();
        assert!(matches!(err, EngagementError::UnknownCaller(_)));
    }

    #[test]
    fn test_rating_bounds() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let input = CreateReview {
                rating,
                comment: None,
            };
            assert_eq!(input.validate().is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn test_blank_comment_is_dropped() {
        let author = Author {
            id: Uuid::now_v7(),
            name: "Ali".to_string(),
        };
        let review = SiteReview::new(
            author,
            CreateReview {
                rating: 3,
                comment: Some("   ".to_string()),
            },
        );
        assert_eq!(review.comment, None);
    }

    #[test]
    fn test_trend_serializes_as_word() {
        assert_eq!(serde_json::to_value(Trend::Rising).unwrap(), "Rising");
    }
}
