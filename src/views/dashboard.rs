use std::fmt::Write;

use uuid::Uuid;

use super::{attr, page, text};
use crate::models::plan::{DietPlan, Plan, WorkoutPlan};
use crate::utils::identity::CurrentUser;
use crate::views::form::FORM_PATH;

pub const DASHBOARD_PATH: &str = "/profile";

/// What the dashboard shows once the user's plans are loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardState {
    Empty,
    Populated { plans: Vec<Plan>, selected: Uuid },
}

impl DashboardState {
    /// Selects `requested` when it names one of `plans`, otherwise the
    /// most recently created plan.
    pub fn new(plans: Vec<Plan>, requested: Option<Uuid>) -> Self {
        let requested = requested.filter(|id| plans.iter().any(|p| p.id == *id));
        let latest = plans
            .iter()
            .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
            .map(|p| p.id);

        match requested.or(latest) {
            Some(selected) => DashboardState::Populated { plans, selected },
            None => DashboardState::Empty,
        }
    }

    pub fn selected_plan(&self) -> Option<&Plan> {
        match self {
            DashboardState::Empty => None,
            DashboardState::Populated { plans, selected } => plans.iter().find(|p| p.id == *selected),
        }
    }
}

fn profile_header(out: &mut String, user: &CurrentUser) {
    out.push_str("<section class=\"panel\">\n");
    if let Some(image) = &user.image_url {
        let _ = writeln!(out, "<img src=\"{}\" alt=\"\" width=\"64\" height=\"64\">", attr(image));
    }
    let name = user.username.as_deref().unwrap_or("Athlete");
    let _ = writeln!(out, "<h1>{}</h1>", text(name));
    if let Some(email) = &user.email {
        let _ = writeln!(out, "<p class=\"muted\">{}</p>", text(email));
    }
    out.push_str("</section>\n");
}

fn empty_view(out: &mut String) {
    out.push_str("<section class=\"panel\">\n<h2>No fitness plan yet</h2>\n");
    out.push_str("<p class=\"muted\">Create your first personalized workout and diet plan.</p>\n");
    let _ = writeln!(out, "<a class=\"button\" href=\"{}\">Create a plan</a>", FORM_PATH);
    out.push_str("</section>\n");
}

fn plan_selector(out: &mut String, plans: &[Plan], selected: Uuid) {
    out.push_str("<section class=\"panel\">\n");
    let _ = writeln!(
        out,
        "<h2><span class=\"accent\">Your</span> Fitness Plans <span class=\"muted mono\">TOTAL: {}</span></h2>",
        plans.len()
    );
    for plan in plans {
        let class = if plan.id == selected { "button selected" } else { "button" };
        let _ = writeln!(
            out,
            "<a class=\"{}\" href=\"{}?planId={}\">{}</a>",
            class,
            DASHBOARD_PATH,
            plan.id,
            text(&plan.title())
        );
    }
    out.push_str("</section>\n");
}

fn profile_info(out: &mut String, plan: &Plan) {
    let field = |key: &str| plan.form_field(key).unwrap_or_else(|| "N/A".to_string());
    let goal = field("fitnessGoal").replacen('_', " ", 1);
    let rows = [
        ("Age", field("age")),
        ("Weight", format!("{} kg", field("weight"))),
        ("Height", format!("{} cm", field("height"))),
        ("Fitness Level", field("fitnessLevel")),
        ("Goal", goal),
        ("Days/Week", field("numberOfDays")),
    ];

    out.push_str("<section class=\"panel\">\n<h3 class=\"accent\">Your Profile Info</h3>\n<div class=\"grid\">\n");
    for (label, value) in rows {
        let _ = writeln!(out, "<div><span class=\"muted\">{}:</span> {}</div>", label, text(&value));
    }
    out.push_str("</div>\n</section>\n");
}

fn workout_tab(out: &mut String, workout: Option<WorkoutPlan>) {
    out.push_str("<div class=\"tab-content workout\">\n");
    let Some(workout) = workout else {
        out.push_str("<p class=\"muted\">Workout details unavailable for this plan.</p>\n</div>\n");
        return;
    };

    let _ = writeln!(out, "<p class=\"muted mono\">SCHEDULE: {}</p>", text(&workout.schedule.join(", ")));
    for day in &workout.exercises {
        let _ = writeln!(
            out,
            "<details>\n<summary><span class=\"accent mono\">{}</span><span class=\"muted\">{} EXERCISES</span></summary>",
            text(&day.day),
            day.routines.len()
        );
        for routine in &day.routines {
            let _ = writeln!(
                out,
                "<div class=\"routine\"><strong>{}</strong><span><span class=\"badge\">{} SETS</span><span class=\"badge\">{} REPS</span></span></div>",
                text(&routine.name),
                routine.sets,
                routine.reps
            );
        }
        out.push_str("</details>\n");
    }
    out.push_str("</div>\n");
}

fn diet_tab(out: &mut String, diet: Option<DietPlan>) {
    out.push_str("<div class=\"tab-content diet\">\n");
    let Some(diet) = diet else {
        out.push_str("<p class=\"muted\">Diet details unavailable for this plan.</p>\n</div>\n");
        return;
    };

    let _ = writeln!(
        out,
        "<p><span class=\"muted mono\">DAILY CALORIE TARGET</span> <span class=\"accent mono\">{} KCAL</span></p>\n<hr>",
        diet.daily_calories
    );
    for meal in &diet.meals {
        let _ = writeln!(out, "<div class=\"panel\">\n<h4 class=\"accent mono\">{}</h4>\n<ul>", text(&meal.name));
        for (index, food) in meal.foods.iter().enumerate() {
            let _ = writeln!(out, "<li><span class=\"accent mono\">{:02}</span> {}</li>", index + 1, text(food));
        }
        out.push_str("</ul>\n</div>\n");
    }
    out.push_str("</div>\n");
}

fn plan_details(out: &mut String, plan: &Plan) {
    out.push_str("<section class=\"panel\">\n");
    let _ = writeln!(out, "<h3>PLAN: <span class=\"accent\">{}</span></h3>", text(&plan.title()));
    out.push_str("<div class=\"tabs\">\n");
    out.push_str("<input type=\"radio\" name=\"tab\" id=\"tab-workout\" checked><label for=\"tab-workout\">Workout Plan</label>\n");
    out.push_str("<input type=\"radio\" name=\"tab\" id=\"tab-diet\"><label for=\"tab-diet\">Diet Plan</label>\n");
    workout_tab(out, plan.workout());
    diet_tab(out, plan.diet());
    out.push_str("</div>\n</section>\n");
}

pub fn render(user: &CurrentUser, state: &DashboardState) -> String {
    let mut body = String::new();
    match state {
        DashboardState::Empty => empty_view(&mut body),
        DashboardState::Populated { plans, selected } => {
            profile_header(&mut body, user);
            plan_selector(&mut body, plans, *selected);
            if let Some(plan) = state.selected_plan() {
                profile_info(&mut body, plan);
                plan_details(&mut body, plan);
            }
        }
    }
    page("Your Fitness Plans", &body)
}
