use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use crate::assessment::domain::{
    Answer, AnswerRecord, Category, CompanyProfile, QuestionKey, Score, SessionId,
};
use crate::assessment::repository::{RepositoryError, SessionRecord, SessionRepository};
use crate::assessment::scoring::ClassificationBands;
use crate::assessment::service::AssessmentService;
use crate::assessment::template::{ActivityTemplate, AssessmentTemplate, ProcessTemplate};

pub(super) fn sample_template() -> AssessmentTemplate {
    let inbound_support = ActivityTemplate {
        name: "Inbound Support".to_string(),
        categories: BTreeMap::from([
            (
                Category::Governance,
                BTreeMap::from([
                    ("Escalation policy".to_string(), 2.0),
                    ("Service charter".to_string(), 1.0),
                ]),
            ),
            (
                Category::MonitoringControl,
                BTreeMap::from([("Ticket KPIs".to_string(), 1.0)]),
            ),
            (
                Category::Technology,
                BTreeMap::from([("CRM integration".to_string(), 3.0)]),
            ),
            (
                Category::Organization,
                BTreeMap::from([("Shift coverage".to_string(), 1.0)]),
            ),
        ]),
    };

    let claims_handling = ActivityTemplate {
        name: "Claims Handling".to_string(),
        categories: BTreeMap::from([
            (
                Category::Governance,
                BTreeMap::from([("Claims procedure".to_string(), 1.0)]),
            ),
            (
                Category::Technology,
                BTreeMap::from([("Workflow automation".to_string(), 1.0)]),
            ),
        ]),
    };

    let demand_forecasting = ActivityTemplate {
        name: "Demand Forecasting".to_string(),
        categories: BTreeMap::from([
            (
                Category::Governance,
                BTreeMap::from([("Forecast ownership".to_string(), 1.0)]),
            ),
            (
                Category::MonitoringControl,
                BTreeMap::from([("Forecast accuracy KPI".to_string(), 1.0)]),
            ),
        ]),
    };

    AssessmentTemplate::from_processes(
        "i40-baseline",
        vec![
            ProcessTemplate {
                process: "Customer Care".to_string(),
                activities: vec![inbound_support, claims_handling],
            },
            ProcessTemplate {
                process: "Production Planning".to_string(),
                activities: vec![demand_forecasting],
            },
        ],
    )
    .expect("sample template is valid")
}

pub(super) fn company() -> CompanyProfile {
    CompanyProfile {
        company_name: "Mondo Meccanica Srl".to_string(),
        sector: Some("Industrial machinery".to_string()),
        contact_email: Some("operations@mondomeccanica.example".to_string()),
        conducted_by: Some("G. Fabbri".to_string()),
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

pub(super) fn answer(
    process: &str,
    activity: &str,
    category: Category,
    dimension: &str,
    score: Option<u8>,
) -> Answer {
    Answer {
        key: QuestionKey {
            process: process.to_string(),
            activity: activity.to_string(),
            category,
            dimension: dimension.to_string(),
        },
        score: match score {
            Some(value) => Score::Rating(value),
            None => Score::NotApplicable,
        },
        note: String::new(),
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

pub(super) fn build_service() -> (
    AssessmentService<MemoryRepository>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(
        repository.clone(),
        sample_template(),
        ClassificationBands::default(),
    );
    (service, repository)
}
