use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::plan::{NewPlan, Plan};

/// Persistence for plan documents. Plans are only ever inserted and listed.
#[async_trait]
pub trait PlanStore: Send + Sync {
    /// Inserts a new plan. Never upserts: identical payloads make distinct rows.
    async fn insert_plan(&self, plan: NewPlan) -> Result<Plan, AppError>;

    /// All plans owned by `user_id`, newest first.
    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<Plan>, AppError>;
}

pub struct PgPlanStore {
    pool: PgPool,
}

impl PgPlanStore {
    pub fn new(pool: PgPool) -> Self {
        PgPlanStore { pool }
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PlanStore for PgPlanStore {
    async fn insert_plan(&self, plan: NewPlan) -> Result<Plan, AppError> {
        let plan = sqlx::query_as::<_, Plan>(
            "INSERT INTO user_plans \
             (id, user_id, username, email, image_url, form_data, workout_plan, diet_plan, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(plan.user_id)
        .bind(plan.username)
        .bind(plan.email)
        .bind(plan.image_url)
        .bind(plan.form_data.map(Json))
        .bind(Json(plan.workout_plan))
        .bind(Json(plan.diet_plan))
        .bind(plan.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to save plan: {}", e)))?;

        Ok(plan)
    }

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        let plans = sqlx::query_as::<_, Plan>(
            "SELECT * FROM user_plans WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::InternalServerError(format!("Failed to fetch plans: {}", e)))?;

        Ok(plans)
    }
}
