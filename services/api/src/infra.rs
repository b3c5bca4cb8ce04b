use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use maturity_assessment::assessment::{
    AssessmentTemplate, ClassificationBands, RepositoryError, SessionId, SessionRecord,
    SessionRepository, TemplateCsvImporter,
};
use maturity_assessment::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    records: Arc<Mutex<HashMap<SessionId, SessionRecord>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.session.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SessionRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.session.id) {
            guard.insert(record.session.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SessionRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.remove(id).ok_or(RepositoryError::NotFound)?;
        Ok(())
    }
}

pub(crate) fn default_classification_bands() -> ClassificationBands {
    ClassificationBands::new(1.0, 2.0, 3.0)
}

/// Baseline Industry 4.0 questionnaire shipped with the binary so the demo
/// and a bare `serve` work without any external template file.
const BUILTIN_TEMPLATE: &str = r#"[
  {
    "process": "Customer Care",
    "activities": [
      {
        "name": "Inbound Support",
        "categories": {
          "Governance": { "Escalation policy": 2, "Service charter": 1 },
          "Monitoring & Control": { "Ticket KPIs": 1 },
          "Technology": { "CRM integration": 3 },
          "Organization": { "Shift coverage": 1 }
        }
      },
      {
        "name": "Complaint Management",
        "categories": {
          "Governance": { "Complaint procedure": 1 },
          "Monitoring & Control": { "Root-cause tracking": 1 },
          "Technology": { "Ticketing platform": 1 },
          "Organization": { "Ownership model": 1 }
        }
      }
    ]
  },
  {
    "process": "Production",
    "activities": [
      {
        "name": "Final Assembly",
        "categories": {
          "Governance": { "Work instructions": 1 },
          "Monitoring & Control": { "Takt adherence": 1 },
          "Technology": { "Line automation": 2 },
          "Organization": { "Skill matrix": 1 }
        }
      }
    ]
  },
  {
    "process": "Supply Chain",
    "activities": [
      {
        "name": "Inbound Logistics",
        "categories": {
          "Governance": { "Supplier qualification": 1 },
          "Monitoring & Control": { "OTIF tracking": 1 },
          "Technology": { "WMS coverage": 1 },
          "Organization": { "Planner roles": 1 }
        }
      }
    ]
  }
]"#;

pub(crate) fn builtin_template() -> Result<AssessmentTemplate, AppError> {
    AssessmentTemplate::from_json_str("i40-baseline", BUILTIN_TEMPLATE).map_err(AppError::from)
}

/// Load a template from disk, dispatching on the file extension; anything
/// that is not CSV is treated as the canonical JSON array shape.
pub(crate) fn load_template(path: &Path) -> Result<AssessmentTemplate, AppError> {
    let code = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("custom-template");

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("csv") => {
            TemplateCsvImporter::from_path(code, path).map_err(AppError::from)
        }
        _ => {
            let raw = std::fs::read_to_string(path)?;
            AssessmentTemplate::from_json_str(code, &raw).map_err(AppError::from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_is_valid_and_covers_three_processes() {
        let template = builtin_template().expect("builtin template parses");
        assert_eq!(template.code, "i40-baseline");
        assert_eq!(template.processes.len(), 3);
        assert_eq!(template.question_count(), 17);
    }
}
