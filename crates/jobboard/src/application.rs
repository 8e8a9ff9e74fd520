use crate::vocab::{ApplicationStatus, values};
use jobboard_core::{
    db::{
        Criterion, FilterInput, FilterSet, Operator, RangeBounds, RangeInput, SortSpec,
        ValidationError,
    },
    model::{
        entity::EntityModel,
        field::{FieldKind, FieldModel},
    },
    traits::{FieldValues, Listable},
    value::{Timestamp, Value},
};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

///
/// APPLICATION_MODEL
///
/// `employerId` is denormalised from the job so owner scoping needs no join.
///

static APPLICATION_FIELDS: [FieldModel; 7] = [
    FieldModel::new("id", "id", FieldKind::Ulid).sortable(),
    FieldModel::new("jobId", "job_id", FieldKind::Ulid),
    FieldModel::new("candidateId", "candidate_id", FieldKind::Ulid),
    FieldModel::new("employerId", "employer_id", FieldKind::Ulid),
    FieldModel::new("status", "status", FieldKind::Enum),
    FieldModel::new("appliedAt", "applied_at", FieldKind::Timestamp).sortable(),
    FieldModel::new("coverLetter", "cover_letter", FieldKind::Text),
];

pub static APPLICATION_MODEL: EntityModel = EntityModel {
    path: "jobboard::Application",
    table: "applications",
    primary_key: &APPLICATION_FIELDS[0],
    fields: &APPLICATION_FIELDS,
};

///
/// Application
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: Ulid,
    pub job_id: Ulid,
    pub candidate_id: Ulid,
    pub employer_id: Ulid,
    pub status: ApplicationStatus,
    pub applied_at: Timestamp,
    pub cover_letter: Option<String>,
}

impl FieldValues for Application {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Ulid(self.id),
            "jobId" => Value::Ulid(self.job_id),
            "candidateId" => Value::Ulid(self.candidate_id),
            "employerId" => Value::Ulid(self.employer_id),
            "status" => self.status.into(),
            "appliedAt" => Value::Timestamp(self.applied_at),
            "coverLetter" => self.cover_letter.clone().into(),
            _ => return None,
        };

        Some(value)
    }
}

impl Listable for Application {
    const MODEL: &'static EntityModel = &APPLICATION_MODEL;
}

///
/// ApplicationFilterInput
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct ApplicationFilterInput {
    pub job_id: Option<Ulid>,
    pub status: Option<ApplicationStatus>,
    pub statuses: Option<Vec<ApplicationStatus>>,
    pub date_range: Option<RangeInput<Timestamp>>,
    pub has_cover_letter: Option<bool>,
    pub sort: Vec<String>,
}

impl FilterInput for ApplicationFilterInput {
    fn to_filter_set(&self) -> Result<FilterSet, ValidationError> {
        let applied = self
            .date_range
            .clone()
            .unwrap_or_default()
            .criterion("appliedAt", RangeBounds::Closed)?;
        let has_cover_letter = self.has_cover_letter.map_or_else(
            || Criterion::inert("coverLetter", Operator::Exists),
            |present| Criterion::exists("coverLetter", present),
        );

        Ok(FilterSet::new()
            .with_criterion("jobId", Criterion::eq("jobId", self.job_id))
            .with_membership("status", "status", self.status.map(|s| values(&[s])))
            .with_membership("status", "status", self.statuses.as_deref().map(values))
            .with_criterion("dateRange", applied)
            .with_criterion("hasCoverLetter", has_cover_letter)
            .with_sort(SortSpec::parse(&self.sort)?))
    }
}
