use crate::{
    model::{
        entity::EntityModel,
        field::{FieldKind, FieldModel},
    },
    traits::FieldValues,
    value::{Timestamp, Value},
};
use ulid::Ulid;

///
/// POSTING
///
/// Test-only entity shaped like a job posting, covering every field kind
/// the compiler distinguishes.
///

pub(crate) static POSTING_FIELDS: [FieldModel; 9] = [
    FieldModel::new("id", "id", FieldKind::Ulid).sortable(),
    FieldModel::new("ownerId", "owner_id", FieldKind::Ulid),
    FieldModel::new("title", "title", FieldKind::Text).sortable(),
    FieldModel::new("status", "status", FieldKind::Enum),
    FieldModel::new("salary", "salary", FieldKind::Uint).sortable(),
    FieldModel::new("tags", "tags", FieldKind::List(&FieldKind::Text)),
    FieldModel::new("createdAt", "created_at", FieldKind::Timestamp).sortable(),
    FieldModel::new("remote", "remote", FieldKind::Bool),
    FieldModel::new("notes", "notes", FieldKind::Text),
];

pub(crate) static POSTING: EntityModel = EntityModel {
    path: "test::Posting",
    table: "postings",
    primary_key: &POSTING_FIELDS[0],
    fields: &POSTING_FIELDS,
};

///
/// PostingRow
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct PostingRow {
    pub(crate) id: Ulid,
    pub(crate) owner_id: Ulid,
    pub(crate) title: String,
    pub(crate) status: &'static str,
    pub(crate) salary: Option<u64>,
    pub(crate) tags: Vec<String>,
    pub(crate) created_at: Timestamp,
    pub(crate) remote: bool,
    pub(crate) notes: Option<String>,
}

impl PostingRow {
    pub(crate) fn new(seq: u128, owner: Ulid, status: &'static str) -> Self {
        Self {
            id: Ulid(seq),
            owner_id: owner,
            title: format!("posting {seq}"),
            status,
            salary: None,
            tags: Vec::new(),
            created_at: Timestamp::from_seconds(1_700_000_000 + u64::try_from(seq).unwrap()),
            remote: false,
            notes: None,
        }
    }

    pub(crate) const fn salary(mut self, salary: u64) -> Self {
        self.salary = Some(salary);
        self
    }

    pub(crate) fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub(crate) fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(ToString::to_string).collect();
        self
    }

    pub(crate) const fn created_at(mut self, secs: u64) -> Self {
        self.created_at = Timestamp::from_seconds(secs);
        self
    }

    pub(crate) const fn remote(mut self) -> Self {
        self.remote = true;
        self
    }

    pub(crate) fn notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

impl FieldValues for PostingRow {
    fn get_value(&self, field: &str) -> Option<Value> {
        let value = match field {
            "id" => Value::Ulid(self.id),
            "ownerId" => Value::Ulid(self.owner_id),
            "title" => Value::Text(self.title.clone()),
            "status" => Value::Enum(self.status.to_string()),
            "salary" => self.salary.into(),
            "tags" => self.tags.clone().into(),
            "createdAt" => Value::Timestamp(self.created_at),
            "remote" => Value::Bool(self.remote),
            "notes" => self.notes.clone().into(),
            _ => return None,
        };

        Some(value)
    }
}

pub(crate) fn owner(seq: u128) -> Ulid {
    Ulid(0xA000_0000 + seq)
}

pub(crate) fn active() -> Value {
    Value::Enum("ACTIVE".to_string())
}

///
/// Five postings for one owner: three ACTIVE earning at least 50_000,
/// one ACTIVE below it, one CLOSED above it.
///
pub(crate) fn example_rows() -> Vec<PostingRow> {
    let a = owner(1);
    vec![
        PostingRow::new(1, a, "ACTIVE").salary(60_000).created_at(100),
        PostingRow::new(2, a, "ACTIVE").salary(40_000).created_at(500),
        PostingRow::new(3, a, "ACTIVE").salary(50_000).created_at(300),
        PostingRow::new(4, a, "CLOSED").salary(90_000).created_at(400),
        PostingRow::new(5, a, "ACTIVE").salary(75_000).created_at(200),
    ]
}
