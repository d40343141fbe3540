//! Nutritionix API client
//!
//! `POST /v2/natural/nutrients` resolves a name to nutrient detail and
//! `GET /v2/search/instant` powers search. Every request carries the
//! `x-app-id`, `x-app-key` and `x-remote-user-id` headers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::{IngredientLookup, LookupError};
use crate::config::NutritionixConfig;
use crate::models::{
    FoodTag, IngredientRecord, IngredientSummary, Nutrients, Photo, ServingMeasure,
};

const NUTRIENTS_PATH: &str = "/v2/natural/nutrients";
const SEARCH_PATH: &str = "/v2/search/instant";
const LOCALE: &str = "en_US";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct NutrientsRequest<'a> {
    query: &'a str,
    locale: &'a str,
}

#[derive(Debug, Deserialize)]
struct NutrientsResponse {
    #[serde(default)]
    foods: Vec<FoodWire>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    common: Vec<IngredientSummary>,
}

/// A food as Nutritionix sends it. Nutrient fields may be null.
#[derive(Debug, Deserialize)]
struct FoodWire {
    food_name: String,
    brand_name: Option<String>,
    serving_qty: f64,
    serving_unit: String,
    serving_weight_grams: Option<f64>,
    nf_calories: Option<f64>,
    nf_total_fat: Option<f64>,
    nf_saturated_fat: Option<f64>,
    nf_cholesterol: Option<f64>,
    nf_sodium: Option<f64>,
    nf_total_carbohydrate: Option<f64>,
    nf_dietary_fiber: Option<f64>,
    nf_sugars: Option<f64>,
    nf_protein: Option<f64>,
    nf_potassium: Option<f64>,
    nf_p: Option<f64>,
    alt_measures: Option<Vec<ServingMeasure>>,
    tags: Option<FoodTag>,
    photo: Option<Photo>,
}

impl From<FoodWire> for IngredientRecord {
    fn from(food: FoodWire) -> Self {
        let nutrients = Nutrients {
            nf_calories: food.nf_calories.unwrap_or_default(),
            nf_total_fat: food.nf_total_fat.unwrap_or_default(),
            nf_saturated_fat: food.nf_saturated_fat.unwrap_or_default(),
            nf_cholesterol: food.nf_cholesterol.unwrap_or_default(),
            nf_sodium: food.nf_sodium.unwrap_or_default(),
            nf_total_carbohydrate: food.nf_total_carbohydrate.unwrap_or_default(),
            nf_dietary_fiber: food.nf_dietary_fiber.unwrap_or_default(),
            nf_sugars: food.nf_sugars.unwrap_or_default(),
            nf_protein: food.nf_protein.unwrap_or_default(),
            nf_potassium: food.nf_potassium.unwrap_or_default(),
        };
        IngredientRecord {
            selected_qty: food.serving_qty,
            selected_unit: food.serving_unit.clone(),
            food_name: food.food_name,
            brand_name: food.brand_name,
            serving_qty: food.serving_qty,
            serving_unit: food.serving_unit,
            serving_weight_grams: food.serving_weight_grams.unwrap_or_default(),
            nutrients,
            nf_p: food.nf_p,
            alt_measures: food.alt_measures.unwrap_or_default(),
            tags: food.tags,
            photo: food.photo,
        }
    }
}

/// HTTP client for the Nutritionix v2 API
#[derive(Clone)]
pub struct NutritionixClient {
    http: reqwest::Client,
    config: NutritionixConfig,
}

impl NutritionixClient {
    pub fn new(config: NutritionixConfig) -> Result<Self, LookupError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    fn authorize(&self, request: RequestBuilder) -> Result<RequestBuilder, LookupError> {
        let (Some(app_id), Some(app_key)) = (&self.config.app_id, &self.config.app_key) else {
            return Err(LookupError::MissingCredentials);
        };
        Ok(request
            .header("x-app-id", app_id)
            .header("x-app-key", app_key)
            .header("x-remote-user-id", &self.config.remote_user_id))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }
}

async fn error_for_status(response: reqwest::Response) -> LookupError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    LookupError::Status { status, body }
}

#[async_trait]
impl IngredientLookup for NutritionixClient {
    async fn fetch_ingredient(
        &self,
        food_name: &str,
    ) -> Result<Option<IngredientRecord>, LookupError> {
        let request = self.http.post(self.url(NUTRIENTS_PATH)).json(&NutrientsRequest {
            query: food_name,
            locale: LOCALE,
        });
        let response = self.authorize(request)?.send().await?;

        // Nutritionix answers 404 when the query matches no food
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("No Nutritionix match for '{}'", food_name);
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let data: NutrientsResponse = response.json().await?;
        let found = data
            .foods
            .into_iter()
            .find(|food| food.food_name == food_name)
            .map(IngredientRecord::from);

        if found.is_none() {
            tracing::debug!("Nutritionix returned no exact match for '{}'", food_name);
        }
        Ok(found)
    }

    async fn search(&self, query: &str) -> Result<Vec<IngredientSummary>, LookupError> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let request = self.http.get(self.url(SEARCH_PATH)).query(&[("query", query)]);
        let response = self.authorize(request)?.send().await?;
        if !response.status().is_success() {
            return Err(error_for_status(response).await);
        }

        let data: SearchResponse = response.json().await?;
        Ok(data.common)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> NutritionixClient {
        let config = NutritionixConfig::with_credentials("app", "secret").with_base_url(server.uri());
        NutritionixClient::new(config).unwrap()
    }

    fn broccoli_json() -> serde_json::Value {
        json!({
            "food_name": "broccoli",
            "brand_name": null,
            "serving_qty": 1,
            "serving_unit": "cup chopped",
            "serving_weight_grams": 91,
            "nf_calories": 30.94,
            "nf_total_fat": 0.34,
            "nf_saturated_fat": 0.07,
            "nf_cholesterol": 0,
            "nf_sodium": 29.12,
            "nf_total_carbohydrate": 6.04,
            "nf_dietary_fiber": 2.37,
            "nf_sugars": 1.55,
            "nf_protein": 2.57,
            "nf_potassium": 287.56,
            "nf_p": 60.06,
            "full_nutrients": [],
            "alt_measures": [
                {"serving_weight": 91, "measure": "cup chopped", "seq": 1, "qty": 1},
                {"serving_weight": 28.35, "measure": "spear", "seq": 8, "qty": 1}
            ],
            "tags": {"item": "broccoli", "measure": null, "quantity": "1.0", "food_group": 4, "tag_id": 510},
            "photo": {"thumb": "https://example.test/broccoli.jpg", "highres": null, "is_user_uploaded": false}
        })
    }

    #[tokio::test]
    async fn test_fetch_ingredient_exact_match() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(NUTRIENTS_PATH))
            .and(header("x-app-id", "app"))
            .and(header("x-app-key", "secret"))
            .and(header("x-remote-user-id", "0"))
            .and(body_json(json!({"query": "broccoli", "locale": "en_US"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "foods": [broccoli_json()]
            })))
            .mount(&server)
            .await;

        let ingredient = client_for(&server)
            .fetch_ingredient("broccoli")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(ingredient.serving_weight_grams, 91.0);
        assert_eq!(ingredient.nutrients.nf_calories, 30.94);
        assert_eq!(ingredient.selected_unit, "cup chopped");
        assert_eq!(ingredient.selected_qty, 1.0);
        assert_eq!(ingredient.alt_measures.len(), 2);
        assert_eq!(ingredient.tags.map(|t| t.item), Some("broccoli".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_ingredient_requires_exact_name() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(NUTRIENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "foods": [broccoli_json()]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_ingredient("Broccoli").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_fetch_ingredient_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(NUTRIENTS_PATH))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "message": "We couldn't match any of your foods"
            })))
            .mount(&server)
            .await;

        assert!(client_for(&server).fetch_ingredient("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_null_nutrients_become_zero() {
        let server = MockServer::start().await;
        let mut food = broccoli_json();
        food["nf_potassium"] = json!(null);
        food["alt_measures"] = json!(null);
        Mock::given(method("POST"))
            .and(path(NUTRIENTS_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [food] })))
            .mount(&server)
            .await;

        let ingredient = client_for(&server)
            .fetch_ingredient("broccoli")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(ingredient.nutrients.nf_potassium, 0.0);
        assert!(ingredient.alt_measures.is_empty());
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(NUTRIENTS_PATH))
            .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
            .mount(&server)
            .await;

        let err = client_for(&server).fetch_ingredient("broccoli").await.unwrap_err();
        assert!(matches!(err, LookupError::Status { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_search_returns_common_foods() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(SEARCH_PATH))
            .and(query_param("query", "brocc"))
            .and(header("x-app-id", "app"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "common": [
                    {"food_name": "broccoli", "serving_unit": "cup", "tag_name": "broccoli",
                     "serving_qty": 1, "common_type": null, "tag_id": "510",
                     "photo": {"thumb": "https://example.test/b.jpg"}, "locale": "en_US"}
                ],
                "branded": [{"food_name": "Broccoli Bites"}]
            })))
            .mount(&server)
            .await;

        let hits = client_for(&server).search("brocc").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].food_name, "broccoli");
        assert_eq!(hits[0].tag_id.as_deref(), Some("510"));
    }

    #[tokio::test]
    async fn test_blank_search_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        assert!(client_for(&server).search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let client = NutritionixClient::new(NutritionixConfig::default()).unwrap();
        let err = client.fetch_ingredient("broccoli").await.unwrap_err();
        assert!(matches!(err, LookupError::MissingCredentials));
    }
}
