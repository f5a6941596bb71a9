use std::sync::{Arc, PoisonError, RwLock};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use super::display::RowView;
use super::normalizer::Row;
use super::source::SourceRecord;
use super::table::WorkforceTable;
use crate::error::AppError;

pub type SharedTable = Arc<RwLock<WorkforceTable>>;

/// Router builder exposing the normalized table, its display view and the CSV download.
pub fn workforce_router(table: SharedTable) -> Router {
    Router::new()
        .route("/api/v1/workforce/rows", get(rows_handler))
        .route("/api/v1/workforce/rows/display", get(display_handler))
        .route("/api/v1/workforce/export", get(export_handler))
        .route("/api/v1/workforce/roster", put(replace_roster_handler))
        .with_state(table)
}

pub(crate) async fn rows_handler(State(table): State<SharedTable>) -> Json<Vec<Row>> {
    let guard = table.read().unwrap_or_else(PoisonError::into_inner);
    Json(guard.rows().to_vec())
}

pub(crate) async fn display_handler(State(table): State<SharedTable>) -> Json<Vec<RowView>> {
    let guard = table.read().unwrap_or_else(PoisonError::into_inner);
    Json(guard.views())
}

pub(crate) async fn export_handler(State(table): State<SharedTable>) -> Result<Response, AppError> {
    let export = {
        let guard = table.read().unwrap_or_else(PoisonError::into_inner);
        guard.export()?
    };

    let disposition = format!("attachment; filename=\"{}\"", export.file_name);
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime::TEXT_CSV_UTF_8.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.bytes,
    )
        .into_response())
}

pub(crate) async fn replace_roster_handler(
    State(table): State<SharedTable>,
    Json(records): Json<Vec<SourceRecord>>,
) -> Json<Vec<Row>> {
    let mut guard = table.write().unwrap_or_else(PoisonError::into_inner);
    guard.replace(&records);
    Json(guard.rows().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workforce::{Normalizer, RosterImporter};
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn sample_table() -> SharedTable {
        let records = RosterImporter::bundled().expect("bundled roster parses");
        Arc::new(RwLock::new(WorkforceTable::from_records(
            Normalizer::default(),
            &records,
        )))
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable")
            .to_vec()
    }

    #[tokio::test]
    async fn rows_route_returns_normalized_rows() {
        let response = workforce_router(sample_table())
            .oneshot(
                Request::get("/api/v1/workforce/rows")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let rows: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        let rows = rows.as_array().expect("array body");
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[1]["person"], "External Jo Lin");
        assert_eq!(rows[1]["may"], 0.5);
        assert!(rows[1]["july"].is_null());
    }

    #[tokio::test]
    async fn display_route_formats_values() {
        let response = workforce_router(sample_table())
            .oneshot(
                Request::get("/api/v1/workforce/rows/display")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let views: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(views[0]["net_earnings_prev_month"], "1,450.25");
        assert_eq!(views[0]["trend"], "gain");
        assert_eq!(views[1]["trend"], "loss");
    }

    #[tokio::test]
    async fn export_route_serves_csv_attachment() {
        let response = workforce_router(sample_table())
            .oneshot(
                Request::get("/api/v1/workforce/export")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"workforce-dashboard.csv\""
        );
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );

        let body = String::from_utf8(body_bytes(response).await).expect("utf-8 body");
        let mut lines = body.lines();
        assert_eq!(
            lines.next(),
            Some("person,past12Months,y2d,may,june,july,netEarningsPrevMonth")
        );
        assert_eq!(lines.next(), Some("Ana Moreau,0.82,0.79,0.81,0.76,0.88,1450.25"));
    }

    #[tokio::test]
    async fn roster_upload_replaces_table() {
        let table = sample_table();
        let payload = json!([
            {
                "externals": {
                    "status": "active",
                    "jobType": "external",
                    "firstname": "Jo",
                    "lastname": "Lin"
                }
            },
            { "employees": { "status": "inactive", "firstname": "Old" } }
        ]);

        let response = workforce_router(table.clone())
            .oneshot(
                Request::put("/api/v1/workforce/roster")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let guard = table.read().unwrap();
        assert_eq!(guard.rows().len(), 1);
        assert_eq!(guard.rows()[0].person, "External Jo Lin");
        assert_eq!(guard.rows()[0].net_earnings_prev_month, 0.0);
    }

    #[tokio::test]
    async fn roster_upload_rejects_malformed_json() {
        let table = sample_table();
        let response = workforce_router(table.clone())
            .oneshot(
                Request::put("/api/v1/workforce/roster")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"not\": \"a roster\"}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert_eq!(table.read().unwrap().rows().len(), 5);
    }
}
