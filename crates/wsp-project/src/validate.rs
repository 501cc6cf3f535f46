//! Project validation logic.

use std::collections::HashSet;

use crate::schema::{PipeRecord, Project};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid structure: {what}")]
    Structure { what: String },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    if let Err(e) = project.settings.validate() {
        return Err(ValidationError::InvalidValue {
            field: "settings".to_string(),
            value: String::new(),
            reason: e.to_string(),
        });
    }

    for (key, spec) in project.fixture_specs.iter() {
        if !(spec.load_units.is_finite() && spec.load_units >= 0.0) {
            return Err(ValidationError::InvalidValue {
                field: format!("fixture_specs['{}'].lu", key),
                value: spec.load_units.to_string(),
                reason: "must be finite and >= 0".to_string(),
            });
        }
    }

    let mut ids = HashSet::new();
    for record in &project.pipes {
        if !ids.insert(record.id.as_str()) {
            return Err(ValidationError::DuplicateId {
                id: record.id.clone(),
                context: "pipes".to_string(),
            });
        }
        validate_record(record)?;
    }

    let mut roots = Vec::new();
    for record in &project.pipes {
        match &record.parent {
            None => roots.push(record.id.as_str()),
            Some(parent) if !ids.contains(parent.as_str()) => {
                return Err(ValidationError::MissingReference {
                    id: parent.clone(),
                    context: format!("parent of '{}'", record.id),
                });
            }
            Some(_) => {}
        }
    }

    if !project.pipes.is_empty() && roots.len() != 1 {
        return Err(ValidationError::Structure {
            what: format!("expected exactly one root, found {} ({})", roots.len(), roots.join(", ")),
        });
    }

    Ok(())
}

fn validate_record(record: &PipeRecord) -> Result<(), ValidationError> {
    let fields = [
        ("length", record.length),
        ("equivalent_length", record.equivalent_length),
        ("inner_pipe_length", record.inner_pipe_length),
        ("fixed_flow_val", record.fixed_flow_val),
        ("static_head", record.static_head),
        ("required_pressure", record.required_pressure),
    ];
    for (field, value) in fields {
        if !value.is_finite() {
            return Err(invalid(record, field, value, "must be finite"));
        }
    }
    for (field, value) in [
        ("length", record.length),
        ("equivalent_length", record.equivalent_length),
        ("inner_pipe_length", record.inner_pipe_length),
        ("fixed_flow_val", record.fixed_flow_val),
    ] {
        if value < 0.0 {
            return Err(invalid(record, field, value, "must be >= 0"));
        }
    }
    Ok(())
}

fn invalid(record: &PipeRecord, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("pipes['{}'].{}", record.id, field),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::new_project;
    use wsp_network::NodeKind;

    fn project() -> Project {
        let mut p = new_project("v");
        p.pipes.push(PipeRecord::new("s1", "S1", NodeKind::System, Some("root".into())));
        p
    }

    #[test]
    fn new_project_is_valid() {
        validate_project(&project()).unwrap();
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut p = project();
        p.pipes.push(PipeRecord::new("s1", "again", NodeKind::System, Some("root".into())));
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::DuplicateId { .. })
        ));
    }

    #[test]
    fn rejects_dangling_parent() {
        let mut p = project();
        p.pipes[1].parent = Some("ghost".into());
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn rejects_second_root() {
        let mut p = project();
        p.pipes[1].parent = None;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::Structure { .. })
        ));
    }

    #[test]
    fn rejects_negative_length_and_nan() {
        let mut p = project();
        p.pipes[1].length = -1.0;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::InvalidValue { .. })
        ));
        p.pipes[1].length = 1.0;
        p.pipes[1].static_head = f64::NAN;
        assert!(validate_project(&p).is_err());
    }

    #[test]
    fn rejects_bad_settings() {
        let mut p = project();
        p.settings.loss.hazen_williams_c = 0.0;
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("settings"));
    }

    #[test]
    fn rejects_unsupported_version() {
        let mut p = project();
        p.version = 99;
        assert!(matches!(
            validate_project(&p),
            Err(ValidationError::UnsupportedVersion { version: 99 })
        ));
    }
}
