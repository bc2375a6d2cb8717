//! Vehicles in the dealership books.
//!
//! A vehicle's lifecycle is a tagged union ([`VehicleState`]): sale facts only
//! exist inside [`VehicleState::Sold`], so an unsold vehicle cannot carry a
//! selling price or a buyer. On the wire a vehicle is still the flat
//! camelCase record the storage layer persists ([`VehicleRecord`]); decoding
//! a record whose status is not `Sold` drops whatever sale fields it carries.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, Money, ResultEngine, date};

/// Lifecycle tag of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VehicleStatus {
    Available,
    Pending,
    Workshop,
    Sold,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 4] = [
        VehicleStatus::Available,
        VehicleStatus::Pending,
        VehicleStatus::Workshop,
        VehicleStatus::Sold,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "Available",
            VehicleStatus::Pending => "Pending",
            VehicleStatus::Workshop => "Workshop",
            VehicleStatus::Sold => "Sold",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::InvalidStatus(format!("unknown vehicle status: {wanted}")))
    }
}

/// Seller of a vehicle. Name, contact and place are mandatory at intake.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Party {
    pub name: String,
    pub contact: String,
    pub place: String,
    pub address: Option<String>,
}

/// Buyer of a vehicle; every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Buyer {
    pub name: Option<String>,
    pub contact: Option<String>,
    pub place: Option<String>,
    pub address: Option<String>,
}

/// Marks a vehicle bought together with a partner.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Partnership {
    pub partner_name: Option<String>,
}

/// Third-party financing of a sale.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Finance {
    pub financier_name: Option<String>,
    pub amount: Option<Money>,
    pub credited_date: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PurchaseDetails {
    /// `YYYY-MM-DD`.
    pub date: String,
    pub price: Money,
    pub seller: Party,
    pub bill: Option<String>,
    /// Amount still owed to the seller.
    pub balance: Option<Money>,
    pub partnership: Option<Partnership>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SaleDetails {
    /// `YYYY-MM-DD`.
    pub date: Option<String>,
    pub selling_price: Option<Money>,
    pub buyer: Buyer,
    pub bill: Option<String>,
    /// Amount still owed by the buyer.
    pub balance: Option<Money>,
    pub finance: Option<Finance>,
}

/// Where a vehicle is in its lifecycle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum VehicleState {
    #[default]
    Available,
    Pending,
    Workshop,
    Sold(SaleDetails),
}

impl VehicleState {
    #[must_use]
    pub fn status(&self) -> VehicleStatus {
        match self {
            VehicleState::Available => VehicleStatus::Available,
            VehicleState::Pending => VehicleStatus::Pending,
            VehicleState::Workshop => VehicleStatus::Workshop,
            VehicleState::Sold(_) => VehicleStatus::Sold,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "VehicleRecord", into = "VehicleRecord")]
pub struct Vehicle {
    pub id: String,
    pub brand_model: String,
    pub vehicle_number: String,
    pub purchase: PurchaseDetails,
    pub state: VehicleState,
    pub notes: Option<String>,
}

impl Vehicle {
    #[must_use]
    pub fn status(&self) -> VehicleStatus {
        self.state.status()
    }

    #[must_use]
    pub fn is_sold(&self) -> bool {
        matches!(self.state, VehicleState::Sold(_))
    }

    /// Sale facts, present only for sold vehicles.
    #[must_use]
    pub fn sale(&self) -> Option<&SaleDetails> {
        match &self.state {
            VehicleState::Sold(sale) => Some(sale),
            _ => None,
        }
    }

    #[must_use]
    pub fn sale_date(&self) -> Option<&str> {
        self.sale().and_then(|sale| sale.date.as_deref())
    }

    #[must_use]
    pub fn selling_price(&self) -> Option<Money> {
        self.sale().and_then(|sale| sale.selling_price)
    }

    #[must_use]
    pub fn buyer_name(&self) -> Option<&str> {
        self.sale().and_then(|sale| sale.buyer.name.as_deref())
    }

    #[must_use]
    pub fn purchased_on(&self) -> Option<NaiveDate> {
        date::parse_date(&self.purchase.date)
    }

    #[must_use]
    pub fn sold_on(&self) -> Option<NaiveDate> {
        date::parse_optional_date(self.sale_date())
    }

    /// Marks the vehicle as sold with the given sale facts.
    pub fn sell(&mut self, sale: SaleDetails) {
        self.state = VehicleState::Sold(sale);
    }

    /// Moves the vehicle to `status`.
    ///
    /// Leaving `Sold` discards the sale facts. Moving to `Sold` keeps existing
    /// sale facts, or starts from empty ones.
    pub fn set_status(&mut self, status: VehicleStatus) {
        self.state = match (status, std::mem::take(&mut self.state)) {
            (VehicleStatus::Sold, VehicleState::Sold(sale)) => VehicleState::Sold(sale),
            (VehicleStatus::Sold, _) => VehicleState::Sold(SaleDetails::default()),
            (VehicleStatus::Available, _) => VehicleState::Available,
            (VehicleStatus::Pending, _) => VehicleState::Pending,
            (VehicleStatus::Workshop, _) => VehicleState::Workshop,
        };
    }
}

/// A purchase entering the books; it becomes an `Available` vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewVehicle {
    pub brand_model: String,
    pub vehicle_number: String,
    pub purchase_date: String,
    pub purchase_price: Money,
    pub seller_name: String,
    pub seller_contact: String,
    pub seller_place: String,
    pub seller_address: Option<String>,
    pub purchase_bill: Option<String>,
    pub purchase_balance: Option<Money>,
    pub is_partnership: bool,
    pub partner_name: Option<String>,
    pub notes: Option<String>,
}

impl NewVehicle {
    /// Checks the fields an intake must carry.
    pub fn validate(&self) -> ResultEngine<()> {
        let required = [
            ("brand/model", &self.brand_model),
            ("vehicle number", &self.vehicle_number),
            ("seller name", &self.seller_name),
            ("seller place", &self.seller_place),
        ];
        for (label, value) in required {
            if value.trim().is_empty() {
                return Err(EngineError::InvalidRecord(format!("{label} must not be empty")));
            }
        }
        if date::parse_date(&self.purchase_date).is_none() {
            return Err(EngineError::InvalidDate(format!(
                "invalid purchase date: {:?}",
                self.purchase_date
            )));
        }
        if self.purchase_price.is_negative() {
            return Err(EngineError::InvalidAmount(
                "purchase price must be >= 0".to_string(),
            ));
        }
        if self.is_partnership && normalize_optional_text(self.partner_name.clone()).is_none() {
            return Err(EngineError::InvalidRecord(
                "partner name is required for a partnership".to_string(),
            ));
        }
        Ok(())
    }

    /// Validates the intake and turns it into an `Available` vehicle.
    pub fn into_vehicle(self, id: String) -> ResultEngine<Vehicle> {
        self.validate()?;
        Ok(Vehicle {
            id,
            brand_model: self.brand_model.trim().to_string(),
            vehicle_number: self.vehicle_number.trim().to_string(),
            purchase: PurchaseDetails {
                date: self.purchase_date.trim().to_string(),
                price: self.purchase_price,
                seller: Party {
                    name: self.seller_name.trim().to_string(),
                    contact: self.seller_contact.trim().to_string(),
                    place: self.seller_place.trim().to_string(),
                    address: normalize_optional_text(self.seller_address),
                },
                bill: normalize_optional_text(self.purchase_bill),
                balance: self.purchase_balance,
                partnership: self.is_partnership.then(|| Partnership {
                    partner_name: normalize_optional_text(self.partner_name),
                }),
            },
            state: VehicleState::Available,
            notes: normalize_optional_text(self.notes),
        })
    }
}

/// Flat storage shape of a vehicle.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRecord {
    pub id: String,
    pub brand_model: String,
    pub vehicle_number: String,

    pub purchase_date: String,
    pub purchase_price: Money,
    pub seller_name: String,
    #[serde(default)]
    pub seller_contact: String,
    #[serde(default)]
    pub seller_place: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_bill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_balance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_partnership: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_place: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_bill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sale_balance: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financier_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub financier_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finance_credited_date: Option<String>,

    pub status: Option<VehicleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<VehicleRecord> for Vehicle {
    fn from(record: VehicleRecord) -> Self {
        let status = record.status.unwrap_or(VehicleStatus::Available);
        let state = match status {
            VehicleStatus::Available => VehicleState::Available,
            VehicleStatus::Pending => VehicleState::Pending,
            VehicleStatus::Workshop => VehicleState::Workshop,
            VehicleStatus::Sold => {
                let financier_name = normalize_optional_text(record.financier_name);
                let credited_date = normalize_optional_text(record.finance_credited_date);
                let finance = (financier_name.is_some()
                    || record.financier_amount.is_some()
                    || credited_date.is_some())
                .then_some(Finance {
                    financier_name,
                    amount: record.financier_amount,
                    credited_date,
                });
                VehicleState::Sold(SaleDetails {
                    date: normalize_optional_text(record.sale_date),
                    selling_price: record.selling_price,
                    buyer: Buyer {
                        name: normalize_optional_text(record.buyer_name),
                        contact: normalize_optional_text(record.buyer_contact),
                        place: normalize_optional_text(record.buyer_place),
                        address: normalize_optional_text(record.buyer_address),
                    },
                    bill: normalize_optional_text(record.sale_bill),
                    balance: record.sale_balance,
                    finance,
                })
            }
        };

        Vehicle {
            id: record.id,
            brand_model: record.brand_model,
            vehicle_number: record.vehicle_number,
            purchase: PurchaseDetails {
                date: record.purchase_date,
                price: record.purchase_price,
                seller: Party {
                    name: record.seller_name,
                    contact: record.seller_contact,
                    place: record.seller_place,
                    address: normalize_optional_text(record.seller_address),
                },
                bill: normalize_optional_text(record.purchase_bill),
                balance: record.purchase_balance,
                partnership: record.is_partnership.unwrap_or(false).then(|| Partnership {
                    partner_name: normalize_optional_text(record.partner_name),
                }),
            },
            state,
            notes: normalize_optional_text(record.notes),
        }
    }
}

impl From<Vehicle> for VehicleRecord {
    fn from(vehicle: Vehicle) -> Self {
        let status = vehicle.status();
        let purchase = vehicle.purchase;
        let partnership = purchase.partnership;
        let mut record = VehicleRecord {
            id: vehicle.id,
            brand_model: vehicle.brand_model,
            vehicle_number: vehicle.vehicle_number,
            purchase_date: purchase.date,
            purchase_price: purchase.price,
            seller_name: purchase.seller.name,
            seller_contact: purchase.seller.contact,
            seller_place: purchase.seller.place,
            seller_address: purchase.seller.address,
            purchase_bill: purchase.bill,
            purchase_balance: purchase.balance,
            is_partnership: partnership.as_ref().map(|_| true),
            partner_name: partnership.and_then(|p| p.partner_name),
            status: Some(status),
            notes: vehicle.notes,
            ..VehicleRecord::default()
        };

        if let VehicleState::Sold(sale) = vehicle.state {
            record.sale_date = sale.date;
            record.selling_price = sale.selling_price;
            record.buyer_name = sale.buyer.name;
            record.buyer_contact = sale.buyer.contact;
            record.buyer_place = sale.buyer.place;
            record.buyer_address = sale.buyer.address;
            record.sale_bill = sale.bill;
            record.sale_balance = sale.balance;
            if let Some(finance) = sale.finance {
                record.financier_name = finance.financier_name;
                record.financier_amount = finance.amount;
                record.finance_credited_date = finance.credited_date;
            }
        }

        record
    }
}

fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}
