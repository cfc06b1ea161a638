use crate::catalog::Catalog;
use crate::data::{Assignment, FacultyId, SchedulingInput, SchedulingOutput};
use crate::prediction::AvailabilityModel;
use crate::{error, solver};
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::net::SocketAddr;

#[derive(Debug, Deserialize)]
pub struct FreeFacultyQuery {
    pub schedule: Vec<Assignment>,
    pub day: u8,
    pub hour: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FreeFacultyAnswer {
    pub day: u8,
    pub hour: u8,
    pub free_faculty_ids: BTreeSet<FacultyId>,
}

fn reject(e: error::Error) -> (StatusCode, String) {
    let status = if e.is_input_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    (status, e.to_string())
}

async fn generate_handler(
    Json(input): Json<SchedulingInput>,
) -> Result<Json<SchedulingOutput>, (StatusCode, String)> {
    let catalog =
        Catalog::from_records(input.sections, input.courses, input.faculty).map_err(reject)?;
    let seed = input.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    let mut output = solver::solve(&catalog, &mut rng).map_err(reject)?;
    output.seed = Some(seed);
    Ok(Json(output))
}

async fn free_faculty_handler(Json(query): Json<FreeFacultyQuery>) -> Json<FreeFacultyAnswer> {
    let model = AvailabilityModel::train(&query.schedule);
    Json(FreeFacultyAnswer {
        day: query.day,
        hour: query.hour,
        free_faculty_ids: model.predict_free(query.day, query.hour),
    })
}

pub fn router() -> Router {
    Router::new()
        .route("/v1/schedule/generate", post(generate_handler))
        .route("/v1/availability/free", post(free_faculty_handler))
}

pub async fn run_server(bind: SocketAddr) -> error::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, bytes.to_vec())
    }

    fn generate_body(seed: u64) -> Value {
        json!({
            "sections": [{"section_id": "S1", "section_name": "CSE-A"}],
            "courses": [
                {"course_name": "Math", "lecture_hours": 3},
                {"course_name": "Physics", "practical_hours": 2}
            ],
            "faculty": [
                {"faculty_id": 1, "name": "F1", "subjects": "Math"},
                {"faculty_id": 2, "name": "F2", "subjects": "Physics"}
            ],
            "seed": seed
        })
    }

    #[tokio::test]
    async fn test_generate_returns_full_week() {
        let (status, body) = post_json("/v1/schedule/generate", generate_body(5)).await;
        assert_eq!(status, StatusCode::OK);

        let output: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(output["assignments"].as_array().unwrap().len(), 48);
        assert_eq!(output["seed"], json!(5));
        assert!(output["unmet"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_is_reproducible_with_seed() {
        let (_, first) = post_json("/v1/schedule/generate", generate_body(77)).await;
        let (_, second) = post_json("/v1/schedule/generate", generate_body(77)).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_generate_with_huge_hours_reports_unmet() {
        let mut body = generate_body(9);
        body["courses"][0]["lecture_hours"] = json!(u32::MAX);
        body["courses"][0]["tutorial_hours"] = json!(1);
        let (status, bytes) = post_json("/v1/schedule/generate", body).await;
        assert_eq!(status, StatusCode::OK);

        let output: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(output["assignments"].as_array().unwrap().len(), 48);
        assert_eq!(output["unmet"][0]["course_name"], json!("Math"));
        assert_eq!(output["unmet"][0]["lecture_hours"], json!(u32::MAX - 6));
    }

    #[tokio::test]
    async fn test_generate_rejects_reserved_faculty_id() {
        let mut body = generate_body(1);
        body["faculty"][0]["faculty_id"] = json!(0);
        let (status, _) = post_json("/v1/schedule/generate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_free_faculty_from_schedule_rows() {
        let body = json!({
            "schedule": [
                {"section_id": "S1", "section_name": "CSE-A", "day": 1, "hour": 1,
                 "course_name": "Math (Lec)", "faculty_id": 1, "name": "F1"},
                {"section_id": "S1", "section_name": "CSE-A", "day": 1, "hour": 2,
                 "course_name": "Library", "faculty_id": 0, "name": "-"},
                {"section_id": "S1", "section_name": "CSE-A", "day": 1, "hour": 3,
                 "course_name": "Physics (Lab)", "faculty_id": 2, "name": "F2"}
            ],
            "day": 1,
            "hour": 1
        });
        let (status, bytes) = post_json("/v1/availability/free", body).await;
        assert_eq!(status, StatusCode::OK);

        let answer: FreeFacultyAnswer = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(answer.free_faculty_ids, BTreeSet::from([2]));
    }
}
