//! Free-text search over vehicles.
//!
//! Matching is a case-insensitive substring test of the trimmed query
//! against a fixed list of fields, OR-ed together. A missing field (e.g. no
//! buyer yet) simply does not match; it never stops the other fields from
//! being checked. An empty query matches everything.

use crate::Vehicle;

/// Which fields a search looks at.
///
/// Every view searches its own field list; [`SearchScope::Global`] is the
/// widest and is what [`matches`] uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Brand/model, number, seller, buyer and status.
    #[default]
    Global,
    /// Brand/model, number and buyer.
    Sales,
    /// Brand/model and number.
    Expenses,
}

impl SearchScope {
    fn fields<'a>(self, vehicle: &'a Vehicle) -> Vec<Option<&'a str>> {
        let brand_model = Some(vehicle.brand_model.as_str());
        let number = Some(vehicle.vehicle_number.as_str());
        let seller = Some(vehicle.purchase.seller.name.as_str());
        let buyer = vehicle.buyer_name();
        match self {
            SearchScope::Global => vec![
                brand_model,
                number,
                seller,
                buyer,
                Some(vehicle.status().as_str()),
            ],
            SearchScope::Sales => vec![brand_model, number, buyer],
            SearchScope::Expenses => vec![brand_model, number],
        }
    }
}

/// Lowercased, trimmed query; `None` when it matches everything.
fn normalize_term(term: &str) -> Option<String> {
    let trimmed = term.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_lowercase())
}

/// `true` if `term` is a substring of any [`SearchScope::Global`] field.
#[must_use]
pub fn matches(vehicle: &Vehicle, term: &str) -> bool {
    matches_in(vehicle, term, SearchScope::Global)
}

/// `true` if `term` is a substring of any field of `scope`.
#[must_use]
pub fn matches_in(vehicle: &Vehicle, term: &str, scope: SearchScope) -> bool {
    let Some(term) = normalize_term(term) else {
        return true;
    };
    scope
        .fields(vehicle)
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
}
