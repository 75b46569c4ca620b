use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Local, NaiveDate, Utc};
use holiday_hours::catalog::{BusinessType, PresetHoliday, Price, PRESET_HOLIDAYS, PRICE};
use holiday_hours::error::AppError;
use holiday_hours::listing::{
    Analytics, Business, IncrementViewRequest, Page, PaymentStatus, TokenClaims,
};
use holiday_hours::schedule::{
    format_date, schedule_router, HolidayRecord, HolidaySchedule, HolidayStatus, HolidayView,
    ScheduleSummary,
};
use holiday_hours::wizard::{BusinessDraft, CreationWizard, WizardSubmission};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
pub(crate) struct WizardPreviewRequest {
    pub(crate) business: BusinessDraft,
    #[serde(default)]
    pub(crate) holidays: Vec<HolidayRecord>,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct WizardPreviewResponse {
    pub(crate) submission: WizardSubmission,
    pub(crate) holidays: Vec<HolidayView>,
    pub(crate) summary: ScheduleSummary,
    pub(crate) price: Price,
    pub(crate) price_label: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PageRenderRequest {
    pub(crate) business: Business,
    pub(crate) page: Page,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub(crate) struct PublicPageView {
    pub(crate) business_name: String,
    pub(crate) live: bool,
    pub(crate) page_url: String,
    pub(crate) facebook_share_url: String,
    pub(crate) twitter_share_url: String,
    pub(crate) regular_hours: Vec<RegularHoursRow>,
    pub(crate) hours_today: Option<String>,
    pub(crate) holidays: Vec<HolidayView>,
    pub(crate) summary: ScheduleSummary,
    pub(crate) last_updated: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DashboardRequest {
    pub(crate) business: Business,
    pub(crate) page: Page,
    #[serde(default)]
    pub(crate) analytics: Option<Analytics>,
    pub(crate) token: String,
    pub(crate) claims: TokenClaims,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

/// What the owner sees behind a magic link.
#[derive(Debug, Serialize)]
pub(crate) struct DashboardView {
    pub(crate) business_name: String,
    pub(crate) payment_status: PaymentStatus,
    pub(crate) payment_label: &'static str,
    pub(crate) live: bool,
    pub(crate) views: u64,
    pub(crate) views_by_source: BTreeMap<String, u64>,
    pub(crate) last_viewed: Option<DateTime<Utc>>,
    pub(crate) page_url: String,
    pub(crate) dashboard_url: String,
    pub(crate) holidays: Vec<HolidayView>,
    pub(crate) summary: ScheduleSummary,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecordViewRequest {
    pub(crate) analytics: Analytics,
    #[serde(flatten)]
    pub(crate) view: IncrementViewRequest,
}

#[derive(Debug, Serialize)]
pub(crate) struct HolidayStatusOption {
    pub(crate) value: HolidayStatus,
    pub(crate) label: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct RegularHoursRow {
    pub(crate) day: &'static str,
    pub(crate) hours: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct BusinessTypeOption {
    pub(crate) value: &'static str,
    pub(crate) label: &'static str,
}

pub(crate) fn with_site_routes() -> axum::Router {
    schedule_router()
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/catalog/presets",
            axum::routing::get(presets_endpoint),
        )
        .route(
            "/api/v1/catalog/business-types",
            axum::routing::get(business_types_endpoint),
        )
        .route(
            "/api/v1/catalog/holiday-statuses",
            axum::routing::get(holiday_statuses_endpoint),
        )
        .route(
            "/api/v1/catalog/pricing",
            axum::routing::get(pricing_endpoint),
        )
        .route(
            "/api/v1/wizard/preview",
            axum::routing::post(wizard_preview_endpoint),
        )
        .route(
            "/api/v1/pages/render",
            axum::routing::post(page_render_endpoint),
        )
        .route(
            "/api/v1/pages/dashboard",
            axum::routing::post(dashboard_endpoint),
        )
        .route(
            "/api/v1/pages/views",
            axum::routing::post(record_view_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn presets_endpoint() -> Json<Vec<PresetHoliday>> {
    Json(PRESET_HOLIDAYS.to_vec())
}

pub(crate) async fn business_types_endpoint() -> Json<Vec<BusinessTypeOption>> {
    Json(
        BusinessType::ordered()
            .into_iter()
            .map(|kind| BusinessTypeOption {
                value: kind.value(),
                label: kind.label(),
            })
            .collect(),
    )
}

pub(crate) async fn holiday_statuses_endpoint() -> Json<Vec<HolidayStatusOption>> {
    Json(
        HolidayStatus::ordered()
            .into_iter()
            .map(|status| HolidayStatusOption {
                value: status,
                label: status.label(),
            })
            .collect(),
    )
}

pub(crate) async fn pricing_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "amount_minor": PRICE.amount_minor,
        "currency": PRICE.currency,
        "display": PRICE.display(),
    }))
}

/// Validates a finished wizard and returns the step 4 preview.
pub(crate) async fn wizard_preview_endpoint(
    Json(payload): Json<WizardPreviewRequest>,
) -> Result<Json<WizardPreviewResponse>, AppError> {
    let WizardPreviewRequest {
        business,
        holidays,
        today,
    } = payload;

    let mut wizard = CreationWizard::new();
    wizard.business = business;
    wizard.holidays = HolidaySchedule::new(holidays);

    let submission = wizard.submission()?;
    submission.business.validate()?;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    info!(
        business = %submission.business.name,
        holidays = submission.holidays.len(),
        "wizard preview built"
    );

    Ok(Json(WizardPreviewResponse {
        holidays: wizard.holidays.views(today),
        summary: wizard.holidays.summary(today),
        submission,
        price: PRICE,
        price_label: PRICE.display(),
    }))
}

pub(crate) async fn page_render_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PageRenderRequest>,
) -> Result<Json<PublicPageView>, AppError> {
    let PageRenderRequest {
        business,
        page,
        today,
    } = payload;

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(render_public_page(&state, &business, &page, today)?))
}

pub(crate) fn render_public_page(
    state: &AppState,
    business: &Business,
    page: &Page,
    today: NaiveDate,
) -> Result<PublicPageView, AppError> {
    let page_url = state.links.public_page(business.id);
    let facebook = state.links.facebook_share(&page_url)?;
    let twitter = state.links.twitter_share(&page_url, &business.name)?;

    let schedule = page.schedule();

    Ok(PublicPageView {
        business_name: business.name.clone(),
        live: business.is_live(),
        page_url: page_url.to_string(),
        facebook_share_url: facebook.to_string(),
        twitter_share_url: twitter.to_string(),
        regular_hours: page
            .regular_hours
            .rows()
            .into_iter()
            .map(|(day, hours)| RegularHoursRow { day, hours })
            .collect(),
        hours_today: page.regular_hours.on(today).map(|hours| hours.display()),
        holidays: schedule.views(today),
        summary: schedule.summary(today),
        last_updated: format_date(&page.updated_at.date_naive().to_string()),
    })
}

pub(crate) async fn dashboard_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<DashboardRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let DashboardRequest {
        business,
        page,
        analytics,
        token,
        claims,
        today,
    } = payload;

    let now = Utc::now();
    if let Err(err) = claims.authorize(&business, now) {
        warn!(business_id = %business.id, error = %err, "dashboard access denied");
        return Err(err.into());
    }

    let analytics = analytics.unwrap_or_else(|| Analytics::new(page.id));
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    Ok(Json(render_dashboard(&state, &business, &page, &analytics, &token, today)))
}

pub(crate) fn render_dashboard(
    state: &AppState,
    business: &Business,
    page: &Page,
    analytics: &Analytics,
    token: &str,
    today: NaiveDate,
) -> DashboardView {
    let schedule = page.schedule();

    DashboardView {
        business_name: business.name.clone(),
        payment_status: business.payment_status,
        payment_label: business.payment_status.label(),
        live: business.is_live(),
        views: analytics.views,
        views_by_source: analytics
            .views_by_source()
            .into_iter()
            .map(|(source, count)| (source.to_string(), count))
            .collect(),
        last_viewed: analytics.last_viewed,
        page_url: state.links.public_page(business.id).to_string(),
        dashboard_url: state.links.dashboard(business.id, token).to_string(),
        holidays: schedule.views(today),
        summary: schedule.summary(today),
    }
}

/// Counts one public page view and returns the updated counters.
pub(crate) async fn record_view_endpoint(
    Json(payload): Json<RecordViewRequest>,
) -> Json<Analytics> {
    let RecordViewRequest {
        mut analytics,
        view,
    } = payload;

    let total = analytics.record_view(&view.source, Utc::now());
    info!(page_id = %analytics.page_id, source = %view.source, total, "page view recorded");
    Json(analytics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use holiday_hours::catalog::DayOfWeek;
    use holiday_hours::listing::{
        CreateBusinessRequest, CreatePageRequest, PaymentStatus, RegularHours, SiteLinks,
    };
    use metrics_exporter_prometheus::PrometheusBuilder;
    use serde_json::Value;
    use std::sync::atomic::AtomicBool;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn test_state(ready: bool) -> AppState {
        AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
            links: SiteLinks::new("https://holidayhours.test").expect("valid base"),
        }
    }

    fn app(state: AppState) -> axum::Router {
        with_site_routes().layer(Extension(state))
    }

    async fn read_json_body(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, payload: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request builds")
    }

    fn bakery() -> (Business, Page) {
        let now = Utc.with_ymd_and_hms(2024, 11, 20, 15, 0, 0).unwrap();
        let mut business = CreateBusinessRequest {
            name: "Corner Bakery".to_string(),
            email: "owner@cornerbakery.test".to_string(),
            phone: None,
            address: None,
            business_type: Some("cafe".to_string()),
        }
        .into_business(Uuid::new_v4(), now)
        .expect("valid business");
        business.payment_status = PaymentStatus::Paid;

        let mut regular_hours = RegularHours::default();
        regular_hours.set(DayOfWeek::Saturday, "10:00", "16:00");
        regular_hours.set(DayOfWeek::Monday, "08:00", "18:30");

        let page = CreatePageRequest {
            business_id: business.id,
            holidays: vec![
                HolidayRecord::closed("New Year's Day", "2025-01-01"),
                HolidayRecord::special("Christmas Eve", "2024-12-24", "09:00", "14:00"),
            ],
            regular_hours,
        }
        .into_page(now);

        (business, page)
    }

    #[tokio::test]
    async fn readiness_reflects_state() {
        let response = app(test_state(false))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = app(test_state(true))
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json_body(response).await["status"], "ready");
    }

    #[tokio::test]
    async fn catalog_endpoints_list_presets_and_pricing() {
        let response = app(test_state(true))
            .oneshot(
                Request::get("/api/v1/catalog/presets")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let presets = read_json_body(response).await;
        assert_eq!(presets.as_array().map(Vec::len), Some(PRESET_HOLIDAYS.len()));
        assert_eq!(presets[0]["name"], "Thanksgiving Day");

        let response = app(test_state(true))
            .oneshot(
                Request::get("/api/v1/catalog/business-types")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let kinds = read_json_body(response).await;
        assert_eq!(kinds[0]["value"], "retail");

        let response = app(test_state(true))
            .oneshot(
                Request::get("/api/v1/catalog/pricing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let pricing = read_json_body(response).await;
        assert_eq!(pricing["display"], "$9.00");
        assert_eq!(pricing["currency"], "USD");
    }

    #[tokio::test]
    async fn wizard_preview_returns_sorted_views_and_price() {
        let payload = json!({
            "business": { "name": " Corner Bakery ", "email": "owner@cornerbakery.test", "type": "cafe" },
            "holidays": [
                { "name": "New Year's Day", "date": "2025-01-01", "status": "closed" },
                { "name": "Christmas Eve", "date": "2024-12-24", "status": "special",
                  "open_time": "09:00", "close_time": "14:00" }
            ],
            "today": "2024-11-28"
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/wizard/preview", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["submission"]["business"]["name"], "Corner Bakery");
        assert_eq!(body["holidays"][0]["name"], "Christmas Eve");
        assert_eq!(body["holidays"][0]["display"]["text"], "9:00 AM - 2:00 PM");
        assert_eq!(body["summary"]["closed"], 1);
        assert_eq!(body["price_label"], "$9.00");
    }

    #[tokio::test]
    async fn wizard_preview_rejects_missing_holidays() {
        let payload = json!({
            "business": { "name": "Corner Bakery", "email": "owner@cornerbakery.test" },
            "holidays": []
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/wizard/preview", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json_body(response).await;
        assert!(body["error"].as_str().is_some());
    }

    #[tokio::test]
    async fn wizard_preview_rejects_invalid_email() {
        let payload = json!({
            "business": { "name": "Corner Bakery", "email": "not-an-address" },
            "holidays": [{ "name": "Labor Day", "date": "2025-09-01", "status": "closed" }]
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/wizard/preview", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn public_page_includes_links_hours_and_holidays() {
        let (business, page) = bakery();
        let today = NaiveDate::from_ymd_opt(2024, 11, 28).unwrap();

        let view = render_public_page(&test_state(true), &business, &page, today)
            .expect("page renders");

        assert!(view.live);
        assert_eq!(
            view.page_url,
            format!("https://holidayhours.test/b/{}", business.id)
        );
        assert!(view
            .facebook_share_url
            .starts_with("https://www.facebook.com/sharer/sharer.php?u="));
        assert!(view.twitter_share_url.contains("Corner+Bakery"));
        assert_eq!(view.regular_hours[0].day, "Monday");
        assert_eq!(view.regular_hours[0].hours, "8:00 AM - 6:30 PM");
        assert_eq!(view.regular_hours[1].day, "Saturday");
        assert_eq!(view.holidays[0].name, "Christmas Eve");
        assert_eq!(view.summary.upcoming, 2);
        assert_eq!(view.last_updated, "Wednesday, November 20, 2024");
        assert!(view.hours_today.is_none());

        let saturday = NaiveDate::from_ymd_opt(2024, 11, 30).unwrap();
        let view = render_public_page(&test_state(true), &business, &page, saturday)
            .expect("page renders");
        assert_eq!(view.hours_today.as_deref(), Some("10:00 AM - 4:00 PM"));
    }

    #[tokio::test]
    async fn page_render_route_uses_site_links() {
        let (business, page) = bakery();
        let payload = json!({
            "business": business,
            "page": page,
            "today": "2025-06-01",
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/render", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["business_name"], "Corner Bakery");
        assert_eq!(body["summary"]["upcoming"], 0);
        assert!(body["summary"]["next_holiday"].is_null());
    }

    fn owner_claims(business: &Business, expires_in: i64) -> TokenClaims {
        TokenClaims {
            business_id: business.id.to_string(),
            email: business.email.clone(),
            exp: Utc::now().timestamp() + expires_in,
        }
    }

    #[tokio::test]
    async fn holiday_statuses_are_listed_in_order() {
        let response = app(test_state(true))
            .oneshot(
                Request::get("/api/v1/catalog/holiday-statuses")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let statuses = read_json_body(response).await;
        assert_eq!(
            statuses,
            json!([
                { "value": "closed", "label": "Closed" },
                { "value": "special", "label": "Special Hours" },
                { "value": "normal", "label": "Normal Hours" },
            ])
        );
    }

    #[tokio::test]
    async fn dashboard_shows_views_payment_and_holidays() {
        let (business, page) = bakery();
        let mut analytics = Analytics::new(page.id);
        let viewed_at = Utc.with_ymd_and_hms(2024, 11, 25, 10, 0, 0).unwrap();
        analytics.record_view("", viewed_at);
        analytics.record_view("facebook", viewed_at);
        analytics.record_view("facebook", viewed_at);

        let payload = json!({
            "business": business,
            "page": page,
            "analytics": analytics,
            "token": "magic-abc",
            "claims": owner_claims(&business, 900),
            "today": "2024-11-28",
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/dashboard", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["views"], 3);
        assert_eq!(body["views_by_source"]["facebook"], 2);
        assert_eq!(body["views_by_source"]["direct"], 1);
        assert_eq!(body["payment_status"], "paid");
        assert_eq!(body["payment_label"], "Paid");
        assert_eq!(body["live"], true);
        assert_eq!(
            body["dashboard_url"],
            format!("https://holidayhours.test/dashboard/{}?token=magic-abc", business.id)
        );
        assert_eq!(body["holidays"][0]["name"], "Christmas Eve");
        assert_eq!(body["summary"]["total"], 2);
    }

    #[tokio::test]
    async fn dashboard_starts_fresh_counters_when_analytics_missing() {
        let (mut business, page) = bakery();
        business.payment_status = PaymentStatus::Pending;
        let payload = json!({
            "business": business,
            "page": page,
            "token": "magic-abc",
            "claims": owner_claims(&business, 900),
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/dashboard", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["views"], 0);
        assert_eq!(body["payment_label"], "Pending");
        assert_eq!(body["live"], false);
    }

    #[tokio::test]
    async fn dashboard_rejects_expired_or_foreign_tokens() {
        let (business, page) = bakery();

        let expired = json!({
            "business": business,
            "page": page,
            "token": "magic-abc",
            "claims": owner_claims(&business, -60),
        });
        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/dashboard", &expired))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let mut claims = owner_claims(&business, 900);
        claims.email = "someone@else.test".to_string();
        let foreign = json!({
            "business": business,
            "page": page,
            "token": "magic-abc",
            "claims": claims,
        });
        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/dashboard", &foreign))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn view_route_counts_sources_with_direct_default() {
        let page_id = Uuid::new_v4();
        let payload = json!({
            "analytics": Analytics::new(page_id),
            "source": "twitter",
        });

        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/views", &payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let counted = read_json_body(response).await;
        assert_eq!(counted["views"], 1);
        assert_eq!(counted["sources"][0]["source"], "twitter");
        assert!(counted["last_viewed"].is_string());

        let payload = json!({ "analytics": counted });
        let response = app(test_state(true))
            .oneshot(post_json("/api/v1/pages/views", &payload))
            .await
            .unwrap();
        let counted = read_json_body(response).await;
        assert_eq!(counted["views"], 2);
        assert_eq!(counted["sources"][1]["source"], "direct");
    }
}
