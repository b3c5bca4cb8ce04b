//! Integration specifications for the assessment lifecycle and the scoring
//! pipeline.
//!
//! Scenarios exercise the public service facade and the HTTP router end to
//! end, so aggregation, classification, and the session lifecycle are
//! validated without reaching into private modules.

mod common {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::{Arc, Mutex};

    use maturity_assessment::assessment::{
        ActivityTemplate, AnswerRecord, AssessmentService, AssessmentTemplate, Category,
        ClassificationBands, CompanyProfile, ProcessTemplate, RepositoryError, SessionId,
        SessionRecord, SessionRepository,
    };

    pub(super) fn template() -> AssessmentTemplate {
        let assembly = ActivityTemplate {
            name: "Final Assembly".to_string(),
            categories: BTreeMap::from([
                (
                    Category::Governance,
                    BTreeMap::from([
                        ("Work instructions".to_string(), 1.0),
                        ("Quality gates".to_string(), 1.0),
                    ]),
                ),
                (
                    Category::MonitoringControl,
                    BTreeMap::from([("Takt adherence".to_string(), 1.0)]),
                ),
                (
                    Category::Technology,
                    BTreeMap::from([("Line automation".to_string(), 1.0)]),
                ),
                (
                    Category::Organization,
                    BTreeMap::from([("Skill matrix".to_string(), 1.0)]),
                ),
            ]),
        };

        let shipping = ActivityTemplate {
            name: "Shipping".to_string(),
            categories: BTreeMap::from([
                (
                    Category::Governance,
                    BTreeMap::from([("Carrier policy".to_string(), 1.0)]),
                ),
                (
                    Category::Organization,
                    BTreeMap::from([("Dock scheduling".to_string(), 1.0)]),
                ),
            ]),
        };

        AssessmentTemplate::from_processes(
            "workflow-suite",
            vec![
                ProcessTemplate {
                    process: "Production".to_string(),
                    activities: vec![assembly],
                },
                ProcessTemplate {
                    process: "Logistics".to_string(),
                    activities: vec![shipping],
                },
            ],
        )
        .expect("workflow template is valid")
    }

    pub(super) fn company() -> CompanyProfile {
        CompanyProfile {
            company_name: "Officine Brambilla SpA".to_string(),
            sector: Some("Automotive components".to_string()),
            contact_email: None,
            conducted_by: Some("L. Greco".to_string()),
        }
    }

    pub(super) fn record(
        process: &str,
        activity: &str,
        category: Category,
        dimension: &str,
        score: u8,
        not_applicable: bool,
    ) -> AnswerRecord {
        AnswerRecord {
            process: process.to_string(),
            activity: activity.to_string(),
            category,
            dimension: dimension.to_string(),
            score,
            note: String::new(),
            is_not_applicable: not_applicable,
        }
    }

    #[derive(Default, Clone)]
    pub(super) struct MemoryRepository {
        records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
    }

    impl SessionRepository for MemoryRepository {
        fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.session.id) {
                return Err(RepositoryError::Conflict);
            }
            guard.insert(record.session.id.clone(), record.clone());
            Ok(record)
        }

        fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            if guard.contains_key(&record.session.id) {
                guard.insert(record.session.id.clone(), record);
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
            let guard = self.records.lock().expect("lock");
            Ok(guard.values().cloned().collect())
        }

        fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("lock");
            guard.remove(id).ok_or(RepositoryError::NotFound)?;
            Ok(())
        }
    }

    pub(super) fn build_service() -> AssessmentService<MemoryRepository> {
        AssessmentService::new(
            Arc::new(MemoryRepository::default()),
            template(),
            ClassificationBands::default(),
        )
    }
}

mod lifecycle {
    use super::common::*;
    use maturity_assessment::assessment::{Category, ServiceError};

    #[test]
    fn full_session_lifecycle() {
        let service = build_service();
        let created = service.create(company()).expect("session opens");
        let id = created.session.id.clone();
        assert_eq!(created.store.len(), 7);

        let edits = vec![
            record(
                "Production",
                "Final Assembly",
                Category::Governance,
                "Work instructions",
                5,
                false,
            ),
            record(
                "Production",
                "Final Assembly",
                Category::Technology,
                "Line automation",
                0,
                true,
            ),
            record(
                "Logistics",
                "Shipping",
                Category::Governance,
                "Carrier policy",
                1,
                false,
            ),
        ];
        let receipt = service.submit(&id, edits).expect("submit succeeds");
        assert_eq!(receipt.accepted, 3);
        assert_eq!(receipt.total_questions, 7);

        let results = service.results(&id).expect("results load");
        assert_eq!(results.len(), 7);
        let excluded = results
            .iter()
            .find(|entry| entry.dimension == "Line automation")
            .expect("edited answer present");
        assert!(excluded.is_not_applicable);

        let summary = service.report(&id).expect("report builds");
        assert!(summary.final_rate.is_some());

        let closed = service.close(&id).expect("close succeeds");
        assert!(closed.closed_at.is_some());
        let late_edit = vec![record(
            "Logistics",
            "Shipping",
            Category::Governance,
            "Carrier policy",
            4,
            false,
        )];
        assert!(matches!(
            service.submit(&id, late_edit),
            Err(ServiceError::SessionClosed(_))
        ));

        service.delete(&id).expect("delete succeeds");
        assert!(service.get(&id).is_err());
    }

    #[test]
    fn reloading_without_edits_reproduces_the_same_report() {
        let service = build_service();
        let created = service.create(company()).expect("session opens");
        let id = created.session.id.clone();

        let edits = vec![
            record(
                "Production",
                "Final Assembly",
                Category::Governance,
                "Quality gates",
                2,
                false,
            ),
            record(
                "Logistics",
                "Shipping",
                Category::Organization,
                "Dock scheduling",
                0,
                true,
            ),
        ];
        service.submit(&id, edits).expect("submit succeeds");

        let first = service.report(&id).expect("report builds");
        let second = service.report(&id).expect("report builds");

        let first = serde_json::to_value(&first).expect("serializes");
        let second = serde_json::to_value(&second).expect("serializes");
        assert_eq!(first, second);
    }
}

mod scoring {
    use maturity_assessment::assessment::{
        Answer, AssessmentReport, Category, ClassificationBands, QuestionKey, Score,
    };

    fn answer(process: &str, category: Category, score: Score) -> Answer {
        Answer {
            key: QuestionKey {
                process: process.to_string(),
                activity: "Main".to_string(),
                category,
                dimension: format!("{} item", category.label()),
            },
            score,
            note: String::new(),
        }
    }

    #[test]
    fn final_rate_weights_by_populated_category_count() {
        let mut answers = Vec::new();
        for category in Category::ordered() {
            answers.push(answer("Production", category, Score::Rating(4)));
        }
        for category in [
            Category::Governance,
            Category::MonitoringControl,
            Category::Technology,
        ] {
            answers.push(answer("Logistics", category, Score::NotApplicable));
        }
        answers.push(answer("Logistics", Category::Organization, Score::Rating(2)));

        let report = AssessmentReport::build(&answers, &ClassificationBands::default());
        let summary = report.summary();

        // Five populated category averages (4, 4, 4, 4, 2) flatten to 3.6; a
        // mean of process ratings would wrongly give 3.0.
        assert_eq!(summary.final_rate, Some(3.6));

        // The radar still plots the excluded axes as zero.
        let logistics = summary
            .radar
            .iter()
            .find(|series| series.process == "Logistics")
            .expect("series present");
        assert_eq!(logistics.governance, 0.0);
        assert_eq!(logistics.organization, 2.0);
    }

    #[test]
    fn report_surfaces_recommendations_for_the_weak_process() {
        let mut answers = Vec::new();
        for category in Category::ordered() {
            answers.push(answer("Production", category, Score::Rating(5)));
            answers.push(answer("Logistics", category, Score::Rating(1)));
        }

        let bands = ClassificationBands::default();
        let report = AssessmentReport::build(&answers, &bands);
        let summary = report.summary();

        assert_eq!(summary.critical_points.len(), 1);
        assert_eq!(summary.critical_points[0].process, "Logistics");
        assert_eq!(summary.strengths[0].process, "Production");

        let recommendations = summary.recommendations(&bands);
        assert_eq!(recommendations.focus_process.as_deref(), Some("Logistics"));
        assert!(!recommendations.recommended_actions.is_empty());
        assert!(recommendations
            .observations
            .iter()
            .any(|note| note.contains("maturity gap")));
    }
}

mod routing {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::common::*;
    use maturity_assessment::assessment::assessment_router;

    #[tokio::test]
    async fn create_submit_and_report_over_http() {
        let router = assessment_router(Arc::new(build_service()));

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/assessments")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&company()).expect("json")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let created: Value = serde_json::from_slice(&body).expect("json");
        let session_id = created["session_id"].as_str().expect("id").to_string();

        let edits = vec![super::common::record(
            "Production",
            "Final Assembly",
            maturity_assessment::assessment::Category::Governance,
            "Work instructions",
            5,
            false,
        )];
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/assessments/{session_id}/answers"))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_vec(&edits).expect("json")))
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/api/v1/assessments/{session_id}/report"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        let report: Value = serde_json::from_slice(&body).expect("json");
        assert!(report["final_rate"].as_f64().is_some());
        assert_eq!(report["completion"]["total_questions"], json!(7));
        assert!(report.get("recommendations").is_some());
    }
}
