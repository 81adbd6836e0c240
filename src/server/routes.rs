use crate::datasources::{HistoryFetcher, LocationResolver};
use crate::error::{Result, WeatherOddsError};
use crate::export::{csv_filename, csv_report};
use crate::logic::AnalysisService;
use crate::models::{AnalysisReport, AnalysisRequest};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

type SharedService<R, F> = State<Arc<AnalysisService<R, F>>>;
type RequestBody = std::result::Result<Json<AnalysisRequest>, JsonRejection>;

fn parse_body(body: RequestBody) -> Result<AnalysisRequest> {
    body.map(|Json(request)| request).map_err(|e| {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            WeatherOddsError::PayloadTooLarge
        } else {
            WeatherOddsError::InvalidRequest(format!("Invalid JSON: {}", e.body_text()))
        }
    })
}

/// POST /analyze
pub async fn analyze<R, F>(
    State(service): SharedService<R, F>,
    body: RequestBody,
) -> Result<Json<AnalysisReport>>
where
    R: LocationResolver,
    F: HistoryFetcher,
{
    let query = parse_body(body)?.validate()?;
    let report = service.analyze(&query).await?;
    Ok(Json(report))
}

/// POST /download_csv
pub async fn download_csv<R, F>(
    State(service): SharedService<R, F>,
    body: RequestBody,
) -> Result<impl IntoResponse>
where
    R: LocationResolver,
    F: HistoryFetcher,
{
    let query = parse_body(body)?.validate()?;
    let report = service.analyze(&query).await?;
    let csv = csv_report(&report)?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment;filename={}", csv_filename(&query.location)),
            ),
        ],
        csv,
    ))
}

/// GET /health
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasources::testing::{july_fourths, StubFetcher, StubResolver};
    use axum::response::Response;
    use chrono::{Datelike, Utc};

    type StubService = Arc<AnalysisService<StubResolver, StubFetcher>>;

    fn service(resolver: StubResolver, fetcher: StubFetcher) -> StubService {
        Arc::new(AnalysisService::new(resolver, fetcher, 20, true))
    }

    fn body(location: &str, date: &str) -> RequestBody {
        Ok(Json(AnalysisRequest {
            location: Some(location.into()),
            date: Some(date.into()),
        }))
    }

    /// July 4th of the current year; the stub history covers 2005-2025.
    fn this_july_fourth() -> String {
        format!("{}-07-04", Utc::now().year())
    }

    fn status_of<T: IntoResponse>(result: Result<T>) -> StatusCode {
        let response: Response = match result {
            Ok(ok) => ok.into_response(),
            Err(err) => err.into_response(),
        };
        response.status()
    }

    #[tokio::test]
    async fn analyze_returns_report() {
        let svc = service(StubResolver::found(), StubFetcher::with_records(july_fourths()));
        let Json(report) = analyze(State(svc), body("Madrid", &this_july_fourth()))
            .await
            .unwrap();

        assert_eq!(report.location, "Madrid");
        assert!(report.weather_analysis.analysis_based_on_years > 0);
    }

    #[tokio::test]
    async fn missing_fields_are_bad_request() {
        let svc = service(StubResolver::found(), StubFetcher::default());
        let request = Ok(Json(AnalysisRequest {
            location: Some("Madrid".into()),
            date: None,
        }));

        let result = analyze(State(svc), request).await;
        assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn bad_date_is_bad_request() {
        let svc = service(StubResolver::found(), StubFetcher::default());
        let result = analyze(State(svc), body("Madrid", "04/07/2026")).await;
        assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_location_is_bad_request() {
        let svc = service(StubResolver::not_found(), StubFetcher::default());
        let result = analyze(State(svc), body("Atlantis", "2026-07-04")).await;
        assert_eq!(status_of(result), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn upstream_failure_is_unavailable() {
        let svc = service(StubResolver::found(), StubFetcher::rate_limited());
        let result = download_csv(State(svc), body("Madrid", "2026-07-04")).await;
        assert_eq!(status_of(result), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn no_history_is_not_found() {
        let svc = service(StubResolver::found(), StubFetcher::with_records(july_fourths()));
        let result = download_csv(State(svc), body("Madrid", "2026-07-05")).await;
        assert_eq!(status_of(result), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn csv_download_has_attachment_headers() {
        let svc = service(StubResolver::found(), StubFetcher::with_records(july_fourths()));
        let response = download_csv(State(svc), body("San Sebastián", &this_july_fourth()))
            .await
            .unwrap()
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "text/csv; charset=utf-8"
        );
        assert_eq!(
            headers.get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment;filename=weather_analysis_san_sebasti_n.csv"
        );
    }

    #[tokio::test]
    async fn health_is_ok() {
        let Json(value) = health().await;
        assert_eq!(value["status"], "ok");
    }
}
