use crate::vocab::{EmploymentType, JobStatus, values};
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
/// JOB_MODEL
///

static JOB_FIELDS: [FieldModel; 10] = [
    FieldModel::new("id", "id", FieldKind::Ulid).sortable(),
    FieldModel::new("employerId", "employer_id", FieldKind::Ulid),
    FieldModel::new("title", "title", FieldKind::Text).sortable(),
    FieldModel::new("location", "location", FieldKind::Text).sortable(),
    FieldModel::new("employmentType", "employment_type", FieldKind::Enum),
    FieldModel::new("status", "status", FieldKind::Enum),
    FieldModel::new("salary", "salary", FieldKind::Uint).sortable(),
    FieldModel::new("skills", "skills", FieldKind::List(&FieldKind::Text)),
    FieldModel::new("remote", "remote", FieldKind::Bool),
    FieldModel::new("createdAt", "created_at", FieldKind::Timestamp).sortable(),
];

pub static JOB_MODEL: EntityModel = EntityModel {
    path: "jobboard::Job",
    table: "jobs",
    primary_key: &JOB_FIELDS[0],
    fields: &JOB_FIELDS,
};

///
/// Job
/// A posting as stored and as returned by job listings.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: Ulid,
    pub employer_id: Ulid,
    pub title: String,
    pub location: Option<String>,
    pub employment_type: EmploymentType,
    pub status: JobStatus,
    pub salary: Option<u64>,
    pub skills: Vec<String>,
    pub remote: bool,
    pub created_at: Timestamp,
}

impl FieldValues for Job {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Ulid(self.id),
            "employerId" => Value::Ulid(self.employer_id),
            "title" => Value::Text(self.title.clone()),
            "location" => self.location.clone().into(),
            "employmentType" => self.employment_type.into(),
            "status" => self.status.into(),
            "salary" => self.salary.into(),
            "skills" => self.skills.clone().into(),
            "remote" => Value::Bool(self.remote),
            "createdAt" => Value::Timestamp(self.created_at),
            _ => return None,
        };

        Some(value)
    }
}

impl Listable for Job {
    const MODEL: &'static EntityModel = &JOB_MODEL;
}

///
/// JobFilterInput
///
/// Sparse job filter as sent by clients. Every key is optional; unknown
/// keys are rejected.
///
/// - `status` and `statuses` merge into one IN set
/// - `salaryRange` may be open on either side
/// - `dateRange` (on `createdAt`) needs both `from` and `to`
/// - `skills` matches postings listing any of the given skills
/// - `keyword` searches the title, `location` the location, both
///   case-insensitively
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "camelCase")]
pub struct JobFilterInput {
    pub status: Option<JobStatus>,
    pub statuses: Option<Vec<JobStatus>>,
    pub employment_types: Option<Vec<EmploymentType>>,
    pub salary_range: Option<RangeInput<u64>>,
    pub date_range: Option<RangeInput<Timestamp>>,
    pub skills: Option<Vec<String>>,
    pub keyword: Option<String>,
    pub location: Option<String>,
    pub remote: Option<bool>,
    pub has_salary: Option<bool>,
    pub sort: Vec<String>,
}

impl FilterInput for JobFilterInput {
    fn to_filter_set(&self) -> Result<FilterSet, ValidationError> {
        let salary = self
            .salary_range
            .clone()
            .unwrap_or_default()
            .criterion("salary", RangeBounds::Open)?;
        let created = self
            .date_range
            .clone()
            .unwrap_or_default()
            .criterion("createdAt", RangeBounds::Closed)?;
        let skills = self.skills.clone().map_or_else(
            || Criterion::inert("skills", Operator::Contains),
            |skills| Criterion::contains_any("skills", skills),
        );
        let has_salary = self.has_salary.map_or_else(
            || Criterion::inert("salary", Operator::Exists),
            |present| Criterion::exists("salary", present),
        );

        Ok(FilterSet::new()
            .with_membership("status", "status", self.status.map(|s| values(&[s])))
            .with_membership("status", "status", self.statuses.as_deref().map(values))
            .with_membership(
                "employmentTypes",
                "employmentType",
                self.employment_types.as_deref().map(values),
            )
            .with_criterion("salaryRange", salary)
            .with_criterion("dateRange", created)
            .with_criterion("skills", skills)
            .with_criterion(
                "keyword",
                Criterion::contains("title", search_text(self.keyword.as_deref())),
            )
            .with_criterion(
                "location",
                Criterion::contains("location", search_text(self.location.as_deref())),
            )
            .with_criterion("remote", Criterion::eq("remote", self.remote))
            .with_criterion("hasSalary", has_salary)
            .with_sort(SortSpec::parse(&self.sort)?))
    }
}

// Blank search text is treated as not supplied.
fn search_text(input: Option<&str>) -> Option<&str> {
    input.map(str::trim).filter(|text| !text.is_empty())
}
