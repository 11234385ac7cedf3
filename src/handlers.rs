use crate::dashboard::build_dashboard;
use crate::errors::AppError;
use crate::models::{
    AffirmationRequest, DashboardResponse, GratitudeEntry, GratitudeRequest, Habit, JournalEntry,
    JournalStats, ListColumn, MindfulData, NewTimeEntry, SuccessResponse, Summary, TaskList,
    TaskState, TaskTemplate, TimeEntry, TimeTrackerState, ToggleDayRequest, ToggleDayResponse,
};
use crate::state::AppState;
use crate::storage::Domain;
use crate::tasks::{TaskDay, prepare_save, tasks_for_day};
use crate::{habits, journal, lists, mindful, tasks, timetracker};
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{Local, NaiveDate};
use tracing::{info, warn};

type ApiResult<T> = Result<Json<T>, AppError>;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

// ----- journal -----

pub async fn list_entries(State(state): State<AppState>) -> Json<Vec<JournalEntry>> {
    Json(state.store.read(Domain::Entries).await)
}

pub async fn save_entry(
    State(state): State<AppState>,
    Json(entry): Json<JournalEntry>,
) -> ApiResult<SuccessResponse> {
    journal::validate(&entry)?;
    let _guard = state.write_lock.lock().await;
    let mut entries: Vec<JournalEntry> = state.store.read_for_update(Domain::Entries).await?;
    journal::upsert_entry(&mut entries, entry);
    state.store.write(Domain::Entries, &entries).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn edit_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(entry): Json<JournalEntry>,
) -> ApiResult<SuccessResponse> {
    journal::validate(&entry)?;
    let _guard = state.write_lock.lock().await;
    let mut entries: Vec<JournalEntry> = state.store.read_for_update(Domain::Entries).await?;
    if !journal::edit_entry(&mut entries, &date, entry) {
        return Err(AppError::not_found("Entry not found"));
    }
    state.store.write(Domain::Entries, &entries).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn delete_entry(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    let mut entries: Vec<JournalEntry> = state.store.read_for_update(Domain::Entries).await?;
    if journal::delete_entry(&mut entries, &date) {
        state.store.write(Domain::Entries, &entries).await?;
    }
    Ok(Json(SuccessResponse::ok()))
}

pub async fn entry_stats(State(state): State<AppState>) -> Json<JournalStats> {
    let entries: Vec<JournalEntry> = state.store.read(Domain::Entries).await;
    Json(journal::stats(&entries))
}

// ----- habits -----

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<Habit>> {
    Json(habits::normalize_all(state.store.read(Domain::Habits).await))
}

pub async fn save_habit(
    State(state): State<AppState>,
    Json(habit): Json<Habit>,
) -> ApiResult<SuccessResponse> {
    if habit.name.trim().is_empty() {
        return Err(AppError::bad_request("Please enter a habit name"));
    }
    let _guard = state.write_lock.lock().await;
    let stored: Vec<Habit> = state.store.read_for_update(Domain::Habits).await?;
    let mut all = habits::normalize_all(stored);
    habits::upsert_habit(&mut all, habit);
    state.store.write(Domain::Habits, &all).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    let mut all: Vec<Habit> = state.store.read_for_update(Domain::Habits).await?;
    if habits::delete_habit(&mut all, &name) {
        state.store.write(Domain::Habits, &all).await?;
    }
    Ok(Json(SuccessResponse::ok()))
}

pub async fn toggle_habit_day(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(payload): Json<ToggleDayRequest>,
) -> ApiResult<ToggleDayResponse> {
    let date = habits::normalize_date_key(&payload.date)
        .ok_or_else(|| AppError::bad_request("date must be a calendar day like 2025-03-07"))?;
    let _guard = state.write_lock.lock().await;
    let stored: Vec<Habit> = state.store.read_for_update(Domain::Habits).await?;
    let mut all = habits::normalize_all(stored);
    let tracked = habits::toggle_day(&mut all, &name, &date)
        .ok_or_else(|| AppError::not_found("Habit not found"))?;
    state.store.write(Domain::Habits, &all).await?;
    Ok(Json(ToggleDayResponse {
        name,
        date,
        tracked,
    }))
}

// ----- lists -----

pub async fn list_lists(State(state): State<AppState>) -> Json<Vec<ListColumn>> {
    Json(state.store.read(Domain::Lists).await)
}

pub async fn save_lists(
    State(state): State<AppState>,
    Json(columns): Json<Vec<ListColumn>>,
) -> ApiResult<SuccessResponse> {
    let columns = lists::normalize_lists(columns);
    let _guard = state.write_lock.lock().await;
    state.store.write(Domain::Lists, &columns).await?;
    Ok(Json(SuccessResponse::ok()))
}

// ----- daily tasks -----

pub async fn get_tasks(State(state): State<AppState>) -> Json<Vec<TaskList>> {
    let _guard = state.write_lock.lock().await;
    let stored: TaskState = state.store.read(Domain::Tasks).await;
    match tasks_for_day(stored, today()) {
        TaskDay::Current(task_lists) => Json(task_lists),
        TaskDay::Reset(fresh) => {
            info!("daily tasks reset for {}", fresh.last_reset_date.as_deref().unwrap_or("today"));
            if state.store.write(Domain::Tasks, &fresh).await.is_err() {
                warn!("serving reset tasks that could not be saved");
            }
            Json(fresh.tasks.unwrap_or_default())
        }
    }
}

pub async fn save_tasks(
    State(state): State<AppState>,
    Json(task_lists): Json<Vec<TaskList>>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    let stored: TaskState = state.store.read(Domain::Tasks).await;
    let next = prepare_save(stored, task_lists, today());
    state.store.write(Domain::Tasks, &next).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn task_defaults() -> Json<Vec<TaskTemplate>> {
    Json(tasks::template())
}

// ----- time tracker -----

pub async fn get_timetracker(State(state): State<AppState>) -> Json<TimeTrackerState> {
    let _guard = state.write_lock.lock().await;
    let today = today();
    match state.store.read_for_update::<TimeTrackerState>(Domain::TimeTracker).await {
        Ok(mut data) => {
            if timetracker::reconcile(&mut data, today)
                && state.store.write(Domain::TimeTracker, &data).await.is_err()
            {
                warn!("serving reconciled time tracker state that could not be saved");
            }
            Json(data)
        }
        Err(_) => {
            let mut data = TimeTrackerState::default();
            timetracker::reconcile(&mut data, today);
            Json(data)
        }
    }
}

pub async fn save_timetracker(
    State(state): State<AppState>,
    Json(mut data): Json<TimeTrackerState>,
) -> ApiResult<SuccessResponse> {
    timetracker::refresh_summaries(&mut data);
    let _guard = state.write_lock.lock().await;
    state.store.write(Domain::TimeTracker, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn add_time_entry(
    State(state): State<AppState>,
    Json(input): Json<NewTimeEntry>,
) -> ApiResult<TimeEntry> {
    let _guard = state.write_lock.lock().await;
    let now = Local::now();
    let mut data: TimeTrackerState = state.store.read_for_update(Domain::TimeTracker).await?;
    let entry = timetracker::add_entry(
        &mut data,
        input,
        now.date_naive(),
        state.config.hourly_rate,
        now.timestamp_millis(),
    )?;
    state.store.write(Domain::TimeTracker, &data).await?;
    Ok(Json(entry))
}

pub async fn delete_time_entry(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    let mut data: TimeTrackerState = state.store.read_for_update(Domain::TimeTracker).await?;
    if timetracker::delete_entry(&mut data, id) {
        state.store.write(Domain::TimeTracker, &data).await?;
    }
    Ok(Json(SuccessResponse::ok()))
}

pub async fn timetracker_summary(State(state): State<AppState>) -> Json<Summary> {
    let mut data: TimeTrackerState = state.store.read(Domain::TimeTracker).await;
    timetracker::reconcile(&mut data, today());
    Json(timetracker::summarize(&data.current_entries))
}

// ----- mindful -----

pub async fn get_mindful(State(state): State<AppState>) -> Json<MindfulData> {
    Json(state.store.read(Domain::Mindful).await)
}

pub async fn save_mindful(
    State(state): State<AppState>,
    Json(data): Json<MindfulData>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    state.store.write(Domain::Mindful, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn add_gratitude(
    State(state): State<AppState>,
    Json(payload): Json<GratitudeRequest>,
) -> ApiResult<GratitudeEntry> {
    let _guard = state.write_lock.lock().await;
    let mut data: MindfulData = state.store.read_for_update(Domain::Mindful).await?;
    let entry = mindful::add_gratitude(&mut data, &payload.entry, Local::now())?;
    state.store.write(Domain::Mindful, &data).await?;
    Ok(Json(entry))
}

pub async fn list_affirmations(State(state): State<AppState>) -> Json<Vec<String>> {
    let data: MindfulData = state.store.read(Domain::Mindful).await;
    Json(mindful::all_affirmations(&data))
}

pub async fn add_affirmation(
    State(state): State<AppState>,
    Json(payload): Json<AffirmationRequest>,
) -> ApiResult<SuccessResponse> {
    let _guard = state.write_lock.lock().await;
    let mut data: MindfulData = state.store.read_for_update(Domain::Mindful).await?;
    mindful::add_affirmation(&mut data, &payload.affirmation)?;
    state.store.write(Domain::Mindful, &data).await?;
    Ok(Json(SuccessResponse::ok()))
}

// ----- dashboard -----

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let entries: Vec<JournalEntry> = state.store.read(Domain::Entries).await;
    let all_habits: Vec<Habit> = state.store.read(Domain::Habits).await;
    let columns: Vec<ListColumn> = state.store.read(Domain::Lists).await;
    Json(build_dashboard(today(), &entries, &all_habits, &columns))
}
