use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::domain::HolidayRecord;
use super::editor::{HolidaySchedule, ScheduleEdit};
use super::format::{format_date, format_time};
use super::status::{derive_status, DisplayStatusView};
use super::views::{HolidayView, ScheduleSummary};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    pub holidays: Vec<HolidayRecord>,
    #[serde(default)]
    pub today: Option<NaiveDate>,
    #[serde(default)]
    pub upcoming_only: bool,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub today: NaiveDate,
    pub holidays: Vec<HolidayView>,
    pub summary: ScheduleSummary,
}

#[derive(Debug, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub holidays: Vec<HolidayRecord>,
    pub edits: Vec<ScheduleEdit>,
}

#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub holidays: Vec<HolidayRecord>,
}

/// Router exposing the schedule rules to page renderers.
pub fn schedule_router() -> Router {
    Router::new()
        .route("/api/v1/holidays/schedule", post(schedule_handler))
        .route("/api/v1/holidays/status", post(status_handler))
        .route("/api/v1/holidays/edits", post(edit_handler))
        .route("/api/v1/holidays/format/time/:time", get(format_time_handler))
        .route("/api/v1/holidays/format/date/:date", get(format_date_handler))
}

pub(crate) async fn schedule_handler(Json(request): Json<ScheduleRequest>) -> Json<ScheduleResponse> {
    let ScheduleRequest {
        holidays,
        today,
        upcoming_only,
    } = request;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let schedule = HolidaySchedule::new(holidays);
    debug!(holidays = schedule.len(), %today, upcoming_only, "rendering holiday schedule");

    let mut views = schedule.views(today);
    if upcoming_only {
        views.retain(|view| view.upcoming);
    }

    Json(ScheduleResponse {
        today,
        holidays: views,
        summary: schedule.summary(today),
    })
}

pub(crate) async fn status_handler(Json(record): Json<HolidayRecord>) -> Json<DisplayStatusView> {
    Json(derive_status(&record).view())
}

/// Applies the edits in order; the first failing edit rejects the whole request.
pub(crate) async fn edit_handler(
    Json(request): Json<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let mut schedule = HolidaySchedule::new(request.holidays);
    for edit in request.edits {
        if let Err(err) = schedule.apply(edit) {
            warn!(error = %err, "rejected schedule edit");
            return Err(err.into());
        }
    }

    Ok(Json(EditResponse {
        holidays: schedule.into_records(),
    }))
}

pub(crate) async fn format_time_handler(Path(time): Path<String>) -> Json<Value> {
    Json(json!({ "input": time, "formatted": format_time(&time) }))
}

pub(crate) async fn format_date_handler(Path(date): Path<String>) -> Json<Value> {
    Json(json!({ "input": date, "formatted": format_date(&date) }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::HolidayStatus;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[tokio::test]
    async fn schedule_handler_sorts_and_filters() {
        let request = ScheduleRequest {
            holidays: vec![
                HolidayRecord::closed("New Year", "2025-01-01"),
                HolidayRecord::closed("Halloween", "2024-10-31"),
                HolidayRecord::closed("Christmas", "2024-12-25"),
            ],
            today: NaiveDate::from_ymd_opt(2024, 11, 28),
            upcoming_only: true,
        };

        let Json(body) = schedule_handler(Json(request)).await;

        let names: Vec<_> = body.holidays.iter().map(|view| view.name.as_str()).collect();
        assert_eq!(names, ["Christmas", "New Year"]);
        assert_eq!(body.summary.total, 3);
        assert_eq!(body.summary.upcoming, 2);
    }

    #[tokio::test]
    async fn status_route_returns_badge() {
        let payload = json!({
            "name": "Eve",
            "date": "2024-12-24",
            "status": "special",
            "open_time": "09:00",
            "close_time": "17:00"
        });

        let response = schedule_router()
            .oneshot(
                Request::post("/api/v1/holidays/status")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["text"], "9:00 AM - 5:00 PM");
        assert_eq!(body["icon"], "clock");
        assert_eq!(body["color"], "info");
    }

    #[tokio::test]
    async fn format_routes_render_inputs() {
        let response = schedule_router()
            .oneshot(
                Request::get("/api/v1/holidays/format/time/00:00")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(read_json_body(response).await["formatted"], "12:00 AM");

        let response = schedule_router()
            .oneshot(
                Request::get("/api/v1/holidays/format/date/2024-11-28")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(
            read_json_body(response).await["formatted"],
            "Thursday, November 28, 2024"
        );
    }

    #[tokio::test]
    async fn edit_handler_applies_edits_in_order() {
        let request = EditRequest {
            holidays: vec![HolidayRecord::closed("Christmas Day", "2024-12-25")],
            edits: vec![
                ScheduleEdit::SetStatus {
                    name: "Christmas Day".to_string(),
                    status: HolidayStatus::Special,
                },
                ScheduleEdit::SetNotes {
                    name: "Christmas Day".to_string(),
                    notes: "Brunch only".to_string(),
                },
            ],
        };

        let Json(body) = edit_handler(Json(request)).await.expect("edits apply");

        assert_eq!(body.holidays[0].open_time.as_deref(), Some("09:00"));
        assert_eq!(body.holidays[0].notes.as_deref(), Some("Brunch only"));
    }

    #[tokio::test]
    async fn edit_route_reports_unknown_holidays() {
        let payload = json!({
            "holidays": [],
            "edits": [{ "action": "remove", "name": "Boxing Day" }]
        });

        let response = schedule_router()
            .oneshot(
                Request::post("/api/v1/holidays/edits")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json_body(response).await;
        assert!(body["error"].as_str().unwrap().contains("Boxing Day"));
    }

    #[tokio::test]
    async fn malformed_status_payload_is_rejected() {
        let response = schedule_router()
            .oneshot(
                Request::post("/api/v1/holidays/status")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name":"Eve","date":"2024-12-24","status":"maybe"}"#))
                    .unwrap(),
            )
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }
}
