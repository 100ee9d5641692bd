//! Pre-submission checks for project drafts and assignment batches.
//!
//! Everything here is pure: no I/O and no state. All project rules are
//! evaluated, so a draft with several problems reports all of them at once.

use std::collections::BTreeMap;
use std::fmt;

use crate::domain::{Assignment, ProjectDraft, ProjectFields};

/// Form fields that can carry an error. Ordered by evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProjectField {
    Name,
    Description,
    StartDate,
    DueDate,
}

impl ProjectField {
    /// Field name as used on the wire and in forms.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectField::Name => "name",
            ProjectField::Description => "description",
            ProjectField::StartDate => "startDate",
            ProjectField::DueDate => "dueDate",
        }
    }
}

impl fmt::Display for ProjectField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    RequiredField,
    InvalidRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub kind: FieldErrorKind,
    pub message: &'static str,
}

impl FieldError {
    fn required(message: &'static str) -> Self {
        Self {
            kind: FieldErrorKind::RequiredField,
            message,
        }
    }
}

/// Field name to error mapping. Empty means the draft is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<ProjectField, FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: ProjectField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    pub fn message(&self, field: ProjectField) -> Option<&'static str> {
        self.0.get(&field).map(|error| error.message)
    }

    pub fn contains(&self, field: ProjectField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ProjectField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: ProjectField, error: FieldError) {
        self.0.insert(field, error);
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|(field, error)| format!("{field}: {}", error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

pub fn validate(draft: &ProjectDraft) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if draft.name.trim().is_empty() {
        errors.insert(
            ProjectField::Name,
            FieldError::required("Project name is required"),
        );
    }

    if draft.description.trim().is_empty() {
        errors.insert(
            ProjectField::Description,
            FieldError::required("Description is required"),
        );
    }

    if draft.start_date.is_none() {
        errors.insert(
            ProjectField::StartDate,
            FieldError::required("Start date is required"),
        );
    }

    match (draft.start_date, draft.due_date) {
        (_, None) => errors.insert(
            ProjectField::DueDate,
            FieldError::required("Due date is required"),
        ),
        (Some(start), Some(due)) if due < start => errors.insert(
            ProjectField::DueDate,
            FieldError {
                kind: FieldErrorKind::InvalidRange,
                message: "Due date cannot be before start date",
            },
        ),
        _ => {}
    }

    errors
}

/// Validate a draft and narrow it to the fields a write transmits.
pub fn validated(draft: &ProjectDraft) -> Result<ProjectFields, ValidationErrors> {
    let errors = validate(draft);
    match (draft.start_date, draft.due_date) {
        (Some(start_date), Some(due_date)) if errors.is_empty() => Ok(ProjectFields {
            name: draft.name.clone(),
            description: draft.description.clone(),
            start_date,
            due_date,
            status: draft.status,
        }),
        _ => Err(errors),
    }
}

/// Zero-based indexes of assignments missing a user or a role.
pub fn validate_assignments(assignments: &[Assignment]) -> Vec<usize> {
    assignments
        .iter()
        .enumerate()
        .filter(|(_, assignment)| !assignment.is_complete())
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ProjectStatus, UserId};
    use time::macros::date;
    use time::Date;

    fn draft(name: &str, description: &str, start: Option<Date>, due: Option<Date>) -> ProjectDraft {
        ProjectDraft {
            name: name.to_string(),
            description: description.to_string(),
            start_date: start,
            due_date: due,
            status: ProjectStatus::Open,
        }
    }

    #[test]
    fn complete_draft_is_valid() {
        let d = draft(
            "Site",
            "Revamp",
            Some(date!(2025 - 01 - 01)),
            Some(date!(2025 - 02 - 01)),
        );
        assert!(validate(&d).is_empty());
    }

    #[test]
    fn same_day_start_and_due_is_valid() {
        let day = date!(2025 - 01 - 01);
        assert!(validate(&draft("Site", "Revamp", Some(day), Some(day))).is_empty());
    }

    #[test]
    fn due_before_start_reports_only_due_date() {
        let d = draft(
            "Site",
            "Revamp",
            Some(date!(2025 - 01 - 01)),
            Some(date!(2024 - 12 - 31)),
        );
        let errors = validate(&d);

        assert_eq!(errors.len(), 1);
        assert!(!errors.contains(ProjectField::StartDate));
        let due = errors.get(ProjectField::DueDate).unwrap();
        assert_eq!(due.kind, FieldErrorKind::InvalidRange);
        assert_eq!(due.message, "Due date cannot be before start date");
    }

    #[test]
    fn whitespace_only_text_is_required() {
        let d = draft(
            "   ",
            "\t\n",
            Some(date!(2025 - 01 - 01)),
            Some(date!(2025 - 02 - 01)),
        );
        let errors = validate(&d);

        assert_eq!(
            errors.message(ProjectField::Name),
            Some("Project name is required")
        );
        assert_eq!(
            errors.message(ProjectField::Description),
            Some("Description is required")
        );
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn every_rule_is_evaluated() {
        let errors = validate(&ProjectDraft::default());

        let fields: Vec<_> = errors.iter().map(|(field, _)| field).collect();
        assert_eq!(
            fields,
            vec![
                ProjectField::Name,
                ProjectField::Description,
                ProjectField::StartDate,
                ProjectField::DueDate,
            ]
        );
        assert!(errors
            .iter()
            .all(|(_, error)| error.kind == FieldErrorKind::RequiredField));
    }

    #[test]
    fn missing_start_does_not_produce_a_range_error() {
        let errors = validate(&draft("Site", "Revamp", None, Some(date!(2020 - 01 - 01))));
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(ProjectField::StartDate));
    }

    #[test]
    fn validated_narrows_to_fields() {
        let d = draft(
            "Site",
            "Revamp",
            Some(date!(2025 - 01 - 01)),
            Some(date!(2025 - 02 - 01)),
        );
        let fields = validated(&d).unwrap();
        assert_eq!(fields.start_date, date!(2025 - 01 - 01));
        assert_eq!(fields.due_date, date!(2025 - 02 - 01));

        assert!(validated(&ProjectDraft::default()).is_err());
    }

    #[test]
    fn display_lists_fields_in_order() {
        let errors = validate(&draft("", "Revamp", Some(date!(2025 - 01 - 01)), None));
        assert_eq!(
            errors.to_string(),
            "name: Project name is required; dueDate: Due date is required"
        );
    }

    #[test]
    fn incomplete_assignments_are_indexed() {
        let assignments = vec![
            Assignment::new("user1", "Dev"),
            Assignment::new("", "Dev"),
            Assignment::new(UserId::from("user2"), " "),
        ];
        assert_eq!(validate_assignments(&assignments), vec![1, 2]);
        assert!(validate_assignments(&assignments[..1]).is_empty());
    }
}
