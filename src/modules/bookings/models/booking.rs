use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::core::dates::parse_instant;
use crate::core::{AppError, Cents, Result};

/// Lifecycle state of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    InProgress,
    Delivered,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Delivered => "delivered",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, BookingStatus::Cancelled)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in_progress" => Ok(BookingStatus::InProgress),
            "delivered" => Ok(BookingStatus::Delivered),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "no_show" => Ok(BookingStatus::NoShow),
            other => Err(AppError::invalid_argument(format!(
                "Unknown booking status: {}",
                other
            ))),
        }
    }
}

/// Customer as referenced from a booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRef {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

/// One line of a booking: a service or rental item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingItem {
    /// Service or rental item id; absent for free-form lines
    pub item_id: Option<String>,
    pub label: String,
    pub price: Cents,
    pub quantity: u32,
    pub duration: Option<String>,
}

/// A booking as read from the booking service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub tenant_id: Option<String>,
    pub customer: Option<CustomerRef>,
    pub status: BookingStatus,
    pub items: Vec<BookingItem>,
    /// Gross amount charged to the customer, cents, never negative
    pub total_price: Cents,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub payment_method: Option<String>,
    pub cancellation_reason: Option<String>,
}

impl Booking {
    pub fn customer_id(&self) -> Option<&str> {
        self.customer.as_ref().map(|c| c.id.as_str())
    }

    pub fn is_cancelled(&self) -> bool {
        self.status.is_cancelled()
    }

    /// Rental window, when both ends are known and ordered
    pub fn rental_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

/// Bookable service from the tenant's catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueItem {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
}

// Wire documents as returned by the Payload REST API. Relationship fields come
// back either as a bare id (string or number) or as the populated document.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingDoc {
    id: Value,
    #[serde(default)]
    tenant_id: Option<Value>,
    #[serde(default)]
    customer_id: Option<Value>,
    #[serde(default)]
    customer: Option<Value>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    items: Option<Vec<BookingItemDoc>>,
    #[serde(default)]
    total_price: Option<Cents>,
    #[serde(default)]
    start_date: Option<String>,
    #[serde(default)]
    end_date: Option<String>,
    created_at: String,
    #[serde(default)]
    payment_method: Option<String>,
    #[serde(default)]
    cancellation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BookingItemDoc {
    #[serde(default)]
    service: Option<Value>,
    #[serde(default)]
    service_id: Option<Value>,
    #[serde(default)]
    rental_item: Option<Value>,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    price: Option<Cents>,
    #[serde(default)]
    quantity: Option<u32>,
    #[serde(default)]
    duration: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CatalogueDoc {
    id: Value,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerDoc {
    id: Value,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    address: Option<Address>,
}

/// Id of a relationship value: `"abc"`, `12`, or `{"id": ...}`
fn relation_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => map.get("id").and_then(relation_id),
        _ => None,
    }
}

fn relation_field(value: &Value, field: &str) -> Option<String> {
    value
        .as_object()
        .and_then(|map| map.get(field))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn optional_instant(raw: Option<&str>, field: &str, booking_id: &str) -> Result<Option<DateTime<Utc>>> {
    match raw {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_instant(s).map(|p| Some(p.instant)).ok_or_else(|| {
            AppError::upstream(format!(
                "Booking {} has malformed {}: {}",
                booking_id, field, s
            ))
        }),
    }
}

impl TryFrom<BookingDoc> for Booking {
    type Error = AppError;

    fn try_from(doc: BookingDoc) -> Result<Self> {
        let id = relation_id(&doc.id)
            .ok_or_else(|| AppError::upstream("Booking without id"))?;

        let status = match doc.status.as_deref() {
            None | Some("") => BookingStatus::Pending,
            Some(raw) => raw.parse().map_err(|_| {
                AppError::upstream(format!("Booking {} has unknown status: {}", id, raw))
            })?,
        };

        let total_price = doc.total_price.unwrap_or(0);
        if total_price < 0 {
            return Err(AppError::upstream(format!(
                "Booking {} has negative totalPrice: {}",
                id, total_price
            )));
        }

        let created_at = parse_instant(&doc.created_at)
            .map(|p| p.instant)
            .ok_or_else(|| {
                AppError::upstream(format!(
                    "Booking {} has malformed createdAt: {}",
                    id, doc.created_at
                ))
            })?;

        // A populated customer wins over the bare customerId field
        let customer = match (&doc.customer, &doc.customer_id) {
            (Some(value), _) if relation_id(value).is_some() => relation_id(value).map(|cid| CustomerRef {
                id: cid,
                name: relation_field(value, "name"),
                email: relation_field(value, "email"),
            }),
            (_, Some(value)) => relation_id(value).map(|cid| CustomerRef {
                id: cid,
                name: None,
                email: None,
            }),
            _ => None,
        };

        let items = doc
            .items
            .unwrap_or_default()
            .into_iter()
            .map(BookingItem::from)
            .collect();

        Ok(Booking {
            start_date: optional_instant(doc.start_date.as_deref(), "startDate", &id)?,
            end_date: optional_instant(doc.end_date.as_deref(), "endDate", &id)?,
            tenant_id: doc.tenant_id.as_ref().and_then(relation_id),
            customer,
            status,
            items,
            total_price,
            created_at,
            payment_method: doc.payment_method.filter(|m| !m.is_empty()),
            cancellation_reason: doc.cancellation_reason.filter(|r| !r.is_empty()),
            id,
        })
    }
}

impl From<BookingItemDoc> for BookingItem {
    fn from(doc: BookingItemDoc) -> Self {
        let reference = doc.service.as_ref().or(doc.rental_item.as_ref());

        let item_id = reference
            .and_then(relation_id)
            .or_else(|| doc.service_id.as_ref().and_then(relation_id));

        let label = doc
            .label
            .or_else(|| reference.and_then(|r| relation_field(r, "name")))
            .unwrap_or_else(|| "Unknown Service".to_string());

        let duration = doc.duration.and_then(|d| match d {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        });

        BookingItem {
            item_id,
            label,
            price: doc.price.unwrap_or(0),
            quantity: doc.quantity.unwrap_or(1),
            duration,
        }
    }
}

impl TryFrom<CatalogueDoc> for CatalogueItem {
    type Error = AppError;

    fn try_from(doc: CatalogueDoc) -> Result<Self> {
        let id = relation_id(&doc.id).ok_or_else(|| AppError::upstream("Service without id"))?;
        Ok(CatalogueItem {
            name: doc.name.unwrap_or_else(|| id.clone()),
            id,
        })
    }
}

impl TryFrom<CustomerDoc> for Customer {
    type Error = AppError;

    fn try_from(doc: CustomerDoc) -> Result<Self> {
        let id = relation_id(&doc.id).ok_or_else(|| AppError::upstream("Customer without id"))?;
        Ok(Customer {
            id,
            name: doc.name,
            email: doc.email,
            address: doc.address,
        })
    }
}
