//! Typed aggregation pipeline stages.
//!
//! One tagged variant per stage kind the query layer composes. A pipeline
//! is a `&[Stage]` rendered to BSON documents by [`render`] immediately
//! before dispatch, so stage composition is checked by the compiler and the
//! document shapes live in exactly one place.

use bson::Document;

use crate::filter::Filter;

/// One aggregation pipeline stage.
#[derive(Clone, Debug, PartialEq)]
pub enum Stage {
    /// `$match` on a typed filter.
    Match(Filter),
    /// `$lookup`: left-join `from` on `local_field == foreign_field`,
    /// materializing matches as an array under `as_field`.
    Lookup {
        from: String,
        local_field: &'static str,
        foreign_field: &'static str,
        as_field: &'static str,
    },
    /// `$addFields`: set `field` to the element count of the array at
    /// `of_array`. Used to recompute counters from joined collections.
    AddCountField {
        field: &'static str,
        of_array: &'static str,
    },
    /// `$group` by the value at `by`, counting documents per group into
    /// a `count` field.
    GroupCount { by: &'static str },
    /// `$sort` descending on one field.
    SortDesc(&'static str),
    /// `$limit` to the first `n` documents.
    Limit(i64),
    /// `$unwind` the array at `path`. Documents where the array is empty
    /// are dropped, which is what gives lookups inner-join semantics.
    Unwind(&'static str),
    /// `$project` to a new document shape.
    Project(Vec<(&'static str, ProjectExpr)>),
}

/// Value of one projected field.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectExpr {
    /// Keep the field as-is (`1`).
    Keep,
    /// Take the value at another path (`"$path"`).
    Field(&'static str),
}

impl Stage {
    /// Render this stage to its BSON document form.
    pub fn to_document(&self) -> Document {
        match self {
            Stage::Match(filter) => wrap("$match", filter.to_document()),
            Stage::Lookup {
                from,
                local_field,
                foreign_field,
                as_field,
            } => {
                let mut spec = Document::new();
                spec.insert("from", from.as_str());
                spec.insert("localField", *local_field);
                spec.insert("foreignField", *foreign_field);
                spec.insert("as", *as_field);
                wrap("$lookup", spec)
            }
            Stage::AddCountField { field, of_array } => {
                let mut size = Document::new();
                size.insert("$size", format!("${of_array}"));
                let mut spec = Document::new();
                spec.insert(*field, size);
                wrap("$addFields", spec)
            }
            Stage::GroupCount { by } => {
                let mut sum = Document::new();
                sum.insert("$sum", 1_i32);
                let mut spec = Document::new();
                spec.insert("_id", format!("${by}"));
                spec.insert("count", sum);
                wrap("$group", spec)
            }
            Stage::SortDesc(field) => {
                let mut spec = Document::new();
                spec.insert(*field, -1_i32);
                wrap("$sort", spec)
            }
            Stage::Limit(n) => wrap("$limit", *n),
            Stage::Unwind(path) => wrap("$unwind", format!("${path}")),
            Stage::Project(fields) => {
                let mut spec = Document::new();
                for (name, expr) in fields {
                    match expr {
                        ProjectExpr::Keep => spec.insert(*name, 1_i32),
                        ProjectExpr::Field(path) => spec.insert(*name, format!("${path}")),
                    };
                }
                wrap("$project", spec)
            }
        }
    }
}

/// Render a whole pipeline in stage order.
pub fn render(stages: &[Stage]) -> Vec<Document> {
    stages.iter().map(Stage::to_document).collect()
}

fn wrap(operator: &str, spec: impl Into<bson::Bson>) -> Document {
    let mut doc = Document::new();
    doc.insert(operator, spec);
    doc
}
