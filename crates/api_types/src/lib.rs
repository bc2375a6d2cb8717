use serde::{Deserialize, Serialize};

pub use engine::Money;

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub mod inventory {
    use super::*;

    /// Query of `GET /inventory`. Missing fields disable the criterion.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct InventoryQuery {
        /// A status name or `All`.
        pub status: Option<String>,
        pub search: Option<String>,
        /// `YYYY-MM-DD`, matched against purchase or sale date.
        pub date: Option<String>,
    }
}

pub mod sales {
    use super::*;

    /// Query of `GET /sales`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SalesQuery {
        pub search: Option<String>,
        /// `YYYY-MM-DD` sale date.
        pub date: Option<String>,
    }
}

pub mod expenses {
    use super::*;

    /// Query of `GET /expenses`.
    ///
    /// `window` is one of `all`, `today`, `week`, `month`, `custom`. Without a
    /// window, filling in `start` or `end` selects a custom range.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct ExpensesQuery {
        pub window: Option<String>,
        pub start: Option<String>,
        pub end: Option<String>,
        pub search: Option<String>,
    }
}

pub mod search {
    use super::*;

    /// Query of `GET /search`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(default)]
    pub struct SearchQuery {
        pub q: String,
    }
}

pub mod vehicle {
    use super::*;

    /// Body of `POST /vehicles/{id}/sell`.
    #[derive(Debug, Default, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase", default)]
    pub struct SellVehicle {
        pub sale_date: Option<String>,
        pub selling_price: Option<Money>,
        pub buyer_name: Option<String>,
        pub buyer_contact: Option<String>,
        pub buyer_place: Option<String>,
        pub buyer_address: Option<String>,
        pub sale_bill: Option<String>,
        pub sale_balance: Option<Money>,
        pub financier_name: Option<String>,
        pub financier_amount: Option<Money>,
        pub finance_credited_date: Option<String>,
    }

    /// Body of `POST /vehicles/{id}/status`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatusChange {
        pub status: String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sell_body_reads_camel_case_and_major_units() {
        let body: vehicle::SellVehicle = serde_json::from_str(
            r#"{"saleDate":"2024-02-01","sellingPrice":65000,"buyerName":"Anil"}"#,
        )
        .unwrap();
        assert_eq!(body.sale_date.as_deref(), Some("2024-02-01"));
        assert_eq!(body.selling_price, Some(Money::from_major(65_000)));
        assert_eq!(body.financier_name, None);
    }

    #[test]
    fn empty_queries_deserialize() {
        let query: expenses::ExpensesQuery = serde_json::from_str("{}").unwrap();
        assert!(query.window.is_none());
    }
}
