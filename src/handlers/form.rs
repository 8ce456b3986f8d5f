use actix_web::http::header;
use actix_web::{web, HttpResponse};
use log::{error, info};

use crate::db::PlanStore;
use crate::errors::AppError;
use crate::generator::PlanGenerator;
use crate::models::form::FormInput;
use crate::models::plan::NewPlan;
use crate::utils::identity::CurrentUser;
use crate::utils::validation::validate_payload;
use crate::views::{self, dashboard::DASHBOARD_PATH};

// GET /generate-program
pub async fn show_form() -> HttpResponse {
    views::html(views::form::render(None))
}

// POST /generate-program
pub async fn submit_form(
    user: CurrentUser,
    store: web::Data<dyn PlanStore>,
    generator: web::Data<PlanGenerator>,
    form: web::Form<FormInput>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    validate_payload(&form)?;

    let plan = match generator.generate(&form).await {
        Ok(plan) => plan,
        Err(e) => {
            error!("Failed to generate plans for user {}: {}", user.id, e);
            return Ok(views::html(views::form::render(Some(&form))));
        }
    };

    let form_data = serde_json::to_value(&form)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode form: {}", e)))?;
    let workout_plan = serde_json::to_value(&plan.workout_plan)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode workout plan: {}", e)))?;
    let diet_plan = serde_json::to_value(&plan.diet_plan)
        .map_err(|e| AppError::InternalServerError(format!("Failed to encode diet plan: {}", e)))?;

    let new_plan = NewPlan::stamped(
        user.id.clone(),
        user.username,
        user.email,
        user.image_url,
        Some(form_data),
        workout_plan,
        diet_plan,
    );

    // A failed save still lands on the dashboard
    match store.insert_plan(new_plan).await {
        Ok(saved) => info!("Saved generated plan {} for user {}", saved.id, user.id),
        Err(e) => error!("Failed to save plan for user {}: {}", user.id, e),
    }

    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, DASHBOARD_PATH))
        .finish())
}
