//! Typed query filters.
//!
//! A [`Filter`] is a conjunction of conditions built through typed
//! constructors instead of hand-written BSON maps. It renders to one
//! document immediately before dispatch; an empty filter matches every
//! document in the collection.

use bson::oid::ObjectId;
use bson::{Bson, Document};
use chrono::{DateTime, Utc};

/// One condition within a filter. Variants cover exactly the comparison
/// shapes the query layer needs.
#[derive(Clone, Debug, PartialEq)]
enum Condition {
    /// Exact match on a field.
    Eq { field: &'static str, value: Bson },
    /// Field value is a member of the given id set (`$in`).
    AnyOf {
        field: &'static str,
        ids: Vec<ObjectId>,
    },
    /// Field value is at or after the given instant (`$gte`).
    AtLeast {
        field: &'static str,
        lower: bson::DateTime,
    },
}

/// A conjunction of typed conditions over one collection's documents.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<Condition>,
}

impl Filter {
    /// An empty filter: matches every document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require an exact match on `field`.
    pub fn eq(mut self, field: &'static str, value: impl Into<Bson>) -> Self {
        self.conditions.push(Condition::Eq {
            field,
            value: value.into(),
        });
        self
    }

    /// Require `field` to be one of `ids`. An empty set matches nothing,
    /// which is the wanted behavior for "posts by any of my friends" when
    /// there are no friends.
    pub fn any_of(mut self, field: &'static str, ids: impl IntoIterator<Item = ObjectId>) -> Self {
        self.conditions.push(Condition::AnyOf {
            field,
            ids: ids.into_iter().collect(),
        });
        self
    }

    /// Require `field` to be at or after `lower`.
    pub fn at_least(mut self, field: &'static str, lower: DateTime<Utc>) -> Self {
        self.conditions.push(Condition::AtLeast {
            field,
            lower: bson::DateTime::from_chrono(lower),
        });
        self
    }

    /// Render to the BSON document handed to the driver.
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        for condition in &self.conditions {
            match condition {
                Condition::Eq { field, value } => {
                    doc.insert(*field, value.clone());
                }
                Condition::AnyOf { field, ids } => {
                    let ids: Vec<Bson> = ids.iter().map(|id| Bson::ObjectId(*id)).collect();
                    let mut spec = Document::new();
                    spec.insert("$in", ids);
                    doc.insert(*field, spec);
                }
                Condition::AtLeast { field, lower } => {
                    let mut spec = Document::new();
                    spec.insert("$gte", *lower);
                    doc.insert(*field, spec);
                }
            }
        }
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::doc;
    use proptest::prelude::*;

    fn oid(n: u8) -> ObjectId {
        ObjectId::from_bytes([n; 12])
    }

    #[test]
    fn empty_filter_renders_empty_document() {
        assert_eq!(Filter::new().to_document(), Document::new());
    }

    #[test]
    fn eq_renders_exact_match() {
        let filter = Filter::new().eq("user_id", oid(1));
        assert_eq!(filter.to_document(), doc! { "user_id": oid(1) });
    }

    #[test]
    fn any_of_renders_in_clause() {
        let filter = Filter::new().any_of("user_id", [oid(1), oid(2)]);
        assert_eq!(
            filter.to_document(),
            doc! { "user_id": { "$in": [oid(1), oid(2)] } }
        );
    }

    #[test]
    fn any_of_with_empty_set_renders_empty_in() {
        // Matches nothing server-side; the friends query relies on this.
        let filter = Filter::new().any_of("user_id", []);
        assert_eq!(
            filter.to_document(),
            doc! { "user_id": { "$in": Vec::<Bson>::new() } }
        );
    }

    #[test]
    fn at_least_renders_gte_on_bson_datetime() {
        let lower = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let filter = Filter::new().at_least("created_at", lower);
        assert_eq!(
            filter.to_document(),
            doc! { "created_at": { "$gte": bson::DateTime::from_chrono(lower) } }
        );
    }

    #[test]
    fn conditions_conjoin_in_one_document() {
        let lower = DateTime::from_timestamp(0, 0).unwrap();
        let filter = Filter::new()
            .any_of("user_id", [oid(3)])
            .at_least("created_at", lower);
        assert_eq!(
            filter.to_document(),
            doc! {
                "user_id": { "$in": [oid(3)] },
                "created_at": { "$gte": bson::DateTime::from_chrono(lower) },
            }
        );
    }

    proptest! {
        #[test]
        fn any_of_preserves_every_id(raw in proptest::collection::vec(proptest::array::uniform12(any::<u8>()), 0..8)) {
            let ids: Vec<ObjectId> = raw.into_iter().map(ObjectId::from_bytes).collect();
            let rendered = Filter::new().any_of("user_id", ids.clone()).to_document();
            let expected: Vec<Bson> = ids.iter().map(|id| Bson::ObjectId(*id)).collect();
            prop_assert_eq!(rendered, doc! { "user_id": { "$in": expected } });
        }
    }
}
