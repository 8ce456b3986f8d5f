use actix_web::{web, HttpResponse};
use log::{error, info};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::db::PlanStore;
use crate::errors::AppError;
use crate::generator::PlanGenerator;
use crate::models::form::FormInput;
use crate::models::plan::{GeneratedPlan, NewPlan, Plan};
use crate::utils::validation::{is_present, validate_payload};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SavePlanRequest {
    #[validate(required(message = "userId is required"))]
    #[validate(length(min = 1, message = "userId cannot be empty"))]
    user_id: Option<String>,

    username: Option<String>,
    email: Option<String>,
    image_url: Option<String>,
    form_data: Option<Value>,

    #[validate(required(message = "workoutPlan is required"))]
    workout_plan: Option<Value>,

    #[validate(required(message = "dietPlan is required"))]
    diet_plan: Option<Value>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetPlanQuery {
    user_id: Option<String>,
}

#[derive(Serialize)]
struct SuccessResponse {
    success: bool,
}

#[derive(Serialize)]
struct PlansResponse {
    success: bool,
    plans: Vec<Plan>,
}

#[derive(Serialize)]
struct GeneratedResponse {
    success: bool,
    data: GeneratedPlan,
}

// POST /api/save-plan
pub async fn save_plan(
    store: web::Data<dyn PlanStore>,
    payload: web::Json<SavePlanRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate().map_err(|err| {
        info!("Rejected save-plan request: {}", err);
        AppError::BadRequest("Missing required fields".to_string())
    })?;

    let payload = payload.into_inner();
    let (Some(user_id), Some(workout_plan), Some(diet_plan)) =
        (payload.user_id, payload.workout_plan, payload.diet_plan)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let plan = store
        .insert_plan(NewPlan::stamped(
            user_id,
            payload.username,
            payload.email,
            payload.image_url,
            payload.form_data,
            workout_plan,
            diet_plan,
        ))
        .await?;

    info!("Saved plan {} for user {}", plan.id, plan.user_id);
    Ok(HttpResponse::Ok().json(SuccessResponse { success: true }))
}

// GET /api/get-plan?userId=
pub async fn get_plan(
    store: web::Data<dyn PlanStore>,
    query: web::Query<GetPlanQuery>,
) -> Result<HttpResponse, AppError> {
    let user_id = query
        .user_id
        .as_deref()
        .filter(|id| is_present(Some(*id)))
        .ok_or_else(|| AppError::BadRequest("Missing userId".to_string()))?;

    let plans = store.plans_for_user(user_id).await?;

    Ok(HttpResponse::Ok().json(PlansResponse { success: true, plans }))
}

// POST /api/generate-plan
pub async fn generate_plan(
    generator: web::Data<PlanGenerator>,
    payload: web::Json<FormInput>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&*payload)?;

    let plan = generator.generate(&payload).await.map_err(|e| {
        error!("Failed to generate plan: {}", e);
        AppError::BadGateway("Failed to generate plan".to_string())
    })?;

    Ok(HttpResponse::Ok().json(GeneratedResponse { success: true, data: plan }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use chrono::DateTime;
    use serde_json::json;
    use uuid::Uuid;

    use crate::db::memory::MemoryPlanStore;
    use crate::generator::prompts::PromptLocale;
    use crate::generator::testing::{ScriptedGenerator, DIET_JSON, WORKOUT_JSON};
    use crate::generator::{GenerationOptions, PlanGenerator};

    use super::*;

    fn save_body(user_id: &str) -> Value {
        json!({
            "userId": user_id,
            "username": "nino",
            "email": "nino@example.com",
            "imageUrl": "https://img.example.com/nino.png",
            "formData": {
                "age": "25", "weight": "60", "height": "165",
                "fitnessGoal": "maintenance", "numberOfDays": "3", "fitnessLevel": "beginner"
            },
            "workoutPlan": { "schedule": ["Monday"], "exercises": [
                { "day": "Monday", "routines": [{ "name": "Plank", "sets": 3, "reps": 30 }] }
            ]},
            "dietPlan": { "dailyCalories": 1900, "meals": [{ "name": "Lunch", "foods": ["Soup"] }] }
        })
    }

    fn scripted_generator(responses: Vec<Result<String, crate::generator::GenerationError>>) -> PlanGenerator {
        PlanGenerator::new(
            Arc::new(ScriptedGenerator::new(responses)),
            GenerationOptions::json("test-model"),
            PromptLocale::english(),
        )
    }

    macro_rules! app {
        ($store:expr) => {
            app!($store, scripted_generator(Vec::new()))
        };
        ($store:expr, $generator:expr) => {{
            let store: Arc<dyn PlanStore> = $store.clone();
            test::init_service(
                App::new()
                    .app_data(web::Data::from(store))
                    .app_data(web::Data::new($generator))
                    .configure(crate::configure_routes),
            )
            .await
        }};
    }

    async fn read_json(resp: actix_web::dev::ServiceResponse) -> Value {
        test::read_body_json(resp).await
    }

    #[actix_web::test]
    async fn save_inserts_and_reports_success() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        let req = test::TestRequest::post().uri("/api/save-plan").set_json(save_body("user_1")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(read_json(resp).await, json!({ "success": true }));
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn save_without_required_fields_inserts_nothing() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        for field in ["userId", "workoutPlan", "dietPlan"] {
            let mut body = save_body("user_1");
            body.as_object_mut().unwrap().remove(field);
            let req = test::TestRequest::post().uri("/api/save-plan").set_json(body).to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "without {}", field);
            assert_eq!(
                read_json(resp).await,
                json!({ "success": false, "message": "Missing required fields" })
            );
        }

        let mut body = save_body("");
        body["dietPlan"] = Value::Null;
        let req = test::TestRequest::post().uri("/api/save-plan").set_json(body).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

        assert_eq!(store.insert_calls(), 0);
    }

    #[actix_web::test]
    async fn save_accepts_missing_optional_fields() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        let body = json!({
            "userId": "user_1",
            "workoutPlan": { "exercises": [] },
            "dietPlan": { "meals": [] }
        });
        let req = test::TestRequest::post().uri("/api/save-plan").set_json(body).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(store.len(), 1);
    }

    #[actix_web::test]
    async fn identical_saves_are_not_deduplicated() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        for _ in 0..2 {
            let req = test::TestRequest::post().uri("/api/save-plan").set_json(save_body("user_1")).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
        assert_eq!(store.len(), 2);
    }

    #[actix_web::test]
    async fn save_store_failure_is_generic_500() {
        let store = Arc::new(MemoryPlanStore::new());
        store.set_failing(true);
        let app = app!(store);

        let req = test::TestRequest::post().uri("/api/save-plan").set_json(save_body("user_1")).to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(resp).await, json!({ "success": false }));
    }

    #[actix_web::test]
    async fn malformed_body_is_bad_request() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        let req = test::TestRequest::post()
            .uri("/api/save-plan")
            .insert_header(("content-type", "application/json"))
            .set_payload("{ \"userId\": ")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(resp).await["success"], false);
        assert_eq!(store.insert_calls(), 0);
    }

    #[actix_web::test]
    async fn list_without_user_id_runs_no_query() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        for uri in ["/api/get-plan", "/api/get-plan?userId="] {
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            assert_eq!(read_json(resp).await, json!({ "success": false, "message": "Missing userId" }));
        }
        assert_eq!(store.query_calls(), 0);
    }

    #[actix_web::test]
    async fn list_is_newest_first_and_scoped_to_user() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);

        for (user, calories) in [("user_1", 1), ("user_2", 99), ("user_1", 2), ("user_1", 3)] {
            let mut body = save_body(user);
            body["dietPlan"]["dailyCalories"] = json!(calories);
            let req = test::TestRequest::post().uri("/api/save-plan").set_json(body).to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let req = test::TestRequest::get().uri("/api/get-plan?userId=user_1").to_request();
        let body = read_json(test::call_service(&app, req).await).await;

        assert_eq!(body["success"], true);
        let calories: Vec<i64> = body["plans"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["dietPlan"]["dailyCalories"].as_i64().unwrap())
            .collect();
        assert_eq!(calories, vec![3, 2, 1]);
    }

    #[actix_web::test]
    async fn saved_plan_round_trips_through_list() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store);
        let sent = save_body("user_rt");

        let req = test::TestRequest::post().uri("/api/save-plan").set_json(sent.clone()).to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/get-plan?userId=user_rt").to_request();
        let body = read_json(test::call_service(&app, req).await).await;
        let mut stored = body["plans"][0].as_object().unwrap().clone();

        let id = stored.remove("id").unwrap();
        let created_at = stored.remove("createdAt").unwrap();
        assert!(Uuid::parse_str(id.as_str().unwrap()).is_ok());
        assert!(DateTime::parse_from_rfc3339(created_at.as_str().unwrap()).is_ok());
        assert_eq!(Value::Object(stored), sent);
    }

    #[actix_web::test]
    async fn list_store_failure_is_generic_500() {
        let store = Arc::new(MemoryPlanStore::new());
        store.set_failing(true);
        let app = app!(store);

        let req = test::TestRequest::get().uri("/api/get-plan?userId=user_1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(read_json(resp).await, json!({ "success": false }));
    }

    #[actix_web::test]
    async fn generate_returns_validated_plan() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(
            store,
            scripted_generator(vec![Ok(WORKOUT_JSON.to_string()), Ok(DIET_JSON.to_string())])
        );

        let req = test::TestRequest::post()
            .uri("/api/generate-plan")
            .set_json(save_body("user_1")["formData"].clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body = read_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["workoutPlan"]["exercises"][1]["routines"][0]["sets"], 1);
        assert_eq!(body["data"]["dietPlan"]["meals"][0]["name"], "Breakfast");
        assert_eq!(store.insert_calls(), 0);
    }

    #[actix_web::test]
    async fn generate_failure_is_bad_gateway() {
        let store = Arc::new(MemoryPlanStore::new());
        let app = app!(store, scripted_generator(vec![Ok("not json".to_string())]));

        let req = test::TestRequest::post()
            .uri("/api/generate-plan")
            .set_json(save_body("user_1")["formData"].clone())
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(read_json(resp).await["success"], false);
    }
}
