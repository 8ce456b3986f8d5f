//! In-memory `PlanStore` used by handler tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::PlanStore;
use crate::errors::AppError;
use crate::models::plan::{NewPlan, Plan};

#[derive(Default)]
pub struct MemoryPlanStore {
    plans: Mutex<Vec<Plan>>,
    failing: AtomicBool,
    inserts: AtomicUsize,
    queries: AtomicUsize,
}

impl MemoryPlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail like a lost connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.plans.lock().unwrap().len()
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn query_calls(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError("store unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlanStore for MemoryPlanStore {
    async fn insert_plan(&self, plan: NewPlan) -> Result<Plan, AppError> {
        self.inserts.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let plan = plan.into_plan(Uuid::now_v7());
        self.plans.lock().unwrap().push(plan.clone());
        Ok(plan)
    }

    async fn plans_for_user(&self, user_id: &str) -> Result<Vec<Plan>, AppError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut plans: Vec<Plan> = self
            .plans
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect();
        plans.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(plans)
    }
}
