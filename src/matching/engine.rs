//! Threshold-inclusion filter over the institution catalog.

use crate::domain::institution::{Funding, Institution};
use crate::matching::threshold::parse_threshold;

/// Filter the catalog down to institutions whose threshold for the given
/// funding mode is met by `aggregate`.
///
/// Records with an absent or unparseable threshold are excluded, not
/// errors. The catalog's original ordering is preserved in the output —
/// that ordering stability is part of the contract.
///
/// Precondition: the caller holds a real aggregate. The state machine
/// short-circuits with a no-data reply when none is on file, so this
/// function is never reached without one.
pub fn shortlist(aggregate: f64, funding: Funding, catalog: Vec<Institution>) -> Vec<Institution> {
    catalog
        .into_iter()
        .filter(|inst| {
            inst.threshold_text(funding)
                .and_then(parse_threshold)
                .is_some_and(|threshold| aggregate >= threshold)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn inst(id: i64, name: &str, budget: Option<&str>, paid: Option<&str>) -> Institution {
        Institution {
            id,
            name: name.into(),
            city: "Москва".into(),
            tuition: None,
            budget_places: None,
            paid_places: None,
            budget_score: budget.map(String::from),
            paid_score: paid.map(String::from),
            url: None,
            specializations: BTreeSet::new(),
        }
    }

    #[test]
    fn includes_when_aggregate_meets_threshold() {
        let catalog = vec![inst(1, "A", Some("от 240"), None)];
        let out = shortlist(255.0, Funding::Budget, catalog);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, 1);
    }

    #[test]
    fn excludes_below_threshold() {
        let catalog = vec![inst(1, "A", Some("от 240"), None)];
        assert!(shortlist(230.0, Funding::Budget, catalog).is_empty());
    }

    #[test]
    fn boundary_is_inclusive() {
        let catalog = vec![inst(1, "A", Some("от 240"), None)];
        assert_eq!(shortlist(240.0, Funding::Budget, catalog).len(), 1);
    }

    #[test]
    fn preserves_catalog_order() {
        let catalog = vec![
            inst(1, "A", Some("от 200"), None),
            inst(2, "B", Some("от 300"), None),
            inst(3, "C", Some("от 210"), None),
        ];
        let out = shortlist(255.0, Funding::Budget, catalog);
        let ids: Vec<i64> = out.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn excludes_unknown_and_absent_thresholds() {
        let catalog = vec![
            inst(1, "A", Some("от ?"), None),
            inst(2, "B", None, None),
            inst(3, "C", Some("от -"), None),
            inst(4, "D", Some("от 100"), None),
        ];
        let out = shortlist(300.0, Funding::Budget, catalog);
        let ids: Vec<i64> = out.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn funding_mode_selects_column() {
        let catalog = vec![inst(1, "A", Some("от 290"), Some("от 180"))];
        assert!(shortlist(200.0, Funding::Budget, catalog.clone()).is_empty());
        assert_eq!(shortlist(200.0, Funding::Paid, catalog).len(), 1);
    }
}
