use actix_web::{web, HttpResponse};
use log::{error, warn};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::PlanStore;
use crate::utils::identity::CurrentUser;
use crate::views::{self, dashboard::DashboardState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    plan_id: Option<String>,
}

// GET /profile
pub async fn show_dashboard(
    user: CurrentUser,
    store: web::Data<dyn PlanStore>,
    query: Option<web::Query<DashboardQuery>>,
) -> HttpResponse {
    if query.is_none() {
        warn!("Ignoring unreadable dashboard query string");
    }
    let requested = query
        .as_ref()
        .and_then(|q| q.plan_id.as_deref())
        .and_then(|id| match Uuid::parse_str(id) {
            Ok(id) => Some(id),
            Err(_) => {
                warn!("Ignoring malformed planId {:?}", id);
                None
            }
        });

    // An unreachable store shows the same view as a user with no plans
    let plans = store.plans_for_user(&user.id).await.unwrap_or_else(|e| {
        error!("Failed to fetch plans for user {}: {}", user.id, e);
        Vec::new()
    });

    let state = DashboardState::new(plans, requested);
    views::html(views::dashboard::render(&user, &state))
}
