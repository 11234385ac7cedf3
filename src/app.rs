use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/entries", get(handlers::list_entries).post(handlers::save_entry))
        .route("/api/entries/stats", get(handlers::entry_stats))
        .route(
            "/api/entries/:date",
            put(handlers::edit_entry).delete(handlers::delete_entry),
        )
        .route("/api/habits", get(handlers::list_habits).post(handlers::save_habit))
        .route("/api/habits/:name", delete(handlers::delete_habit))
        .route("/api/habits/:name/toggle", post(handlers::toggle_habit_day))
        .route("/api/lists", get(handlers::list_lists).post(handlers::save_lists))
        .route("/api/tasks", get(handlers::get_tasks).post(handlers::save_tasks))
        .route("/api/tasks/defaults", get(handlers::task_defaults))
        .route(
            "/api/timetracker",
            get(handlers::get_timetracker).post(handlers::save_timetracker),
        )
        .route("/api/timetracker/entries", post(handlers::add_time_entry))
        .route("/api/timetracker/entries/:id", delete(handlers::delete_time_entry))
        .route("/api/timetracker/summary", get(handlers::timetracker_summary))
        .route("/api/mindful", get(handlers::get_mindful).post(handlers::save_mindful))
        .route("/api/mindful/gratitude", post(handlers::add_gratitude))
        .route(
            "/api/mindful/affirmations",
            get(handlers::list_affirmations).post(handlers::add_affirmation),
        )
        .route("/api/dashboard", get(handlers::dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
