// Test Data Factory
//
// Bookings, catalogue items and customers for a small bounce-house tenant.

use chrono::{DateTime, TimeZone, Utc};

use rentfee::modules::bookings::{
    Address, Booking, BookingItem, BookingStatus, CatalogueItem, Customer, CustomerRef,
};

pub struct TestDataFactory;

impl TestDataFactory {
    pub fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    pub fn booking(
        id: &str,
        created_at: DateTime<Utc>,
        total_price: i64,
        status: BookingStatus,
    ) -> Booking {
        Booking {
            id: id.to_string(),
            tenant_id: Some("6".to_string()),
            customer: None,
            status,
            items: Vec::new(),
            total_price,
            start_date: None,
            end_date: None,
            created_at,
            payment_method: None,
            cancellation_reason: None,
        }
    }

    pub fn item(id: &str, label: &str, price: i64) -> BookingItem {
        BookingItem {
            item_id: Some(id.to_string()),
            label: label.to_string(),
            price,
            quantity: 1,
            duration: None,
        }
    }

    pub fn customer_ref(id: &str, name: &str) -> CustomerRef {
        CustomerRef {
            id: id.to_string(),
            name: Some(name.to_string()),
            email: Some(format!("{}@example.com", id)),
        }
    }

    /// The two-booking scenario: a confirmed 20000 on June 1, a cancelled 10000 on June 2
    pub fn confirmed_and_cancelled() -> Vec<Booking> {
        let mut cancelled =
            Self::booking("b2", Self::at(2025, 6, 2, 10), 10000, BookingStatus::Cancelled);
        cancelled.cancellation_reason = Some("Weather".to_string());

        vec![
            Self::booking("b1", Self::at(2025, 6, 1, 10), 20000, BookingStatus::Confirmed),
            cancelled,
        ]
    }

    /// A month of bookings across the catalogue, plus one from the month before
    pub fn june_bookings() -> Vec<Booking> {
        let mut castle = Self::booking("j1", Self::at(2025, 6, 3, 9), 25000, BookingStatus::Completed);
        castle.items = vec![Self::item("castle", "Bounce House Castle", 25000)];
        castle.start_date = Some(Self::at(2025, 6, 7, 8));
        castle.end_date = Some(Self::at(2025, 6, 8, 18));
        castle.customer = Some(Self::customer_ref("c1", "Ada Lovelace"));
        castle.payment_method = Some("card".to_string());

        let mut combo = Self::booking("j2", Self::at(2025, 6, 10, 14), 40000, BookingStatus::Confirmed);
        combo.items = vec![
            Self::item("castle", "Bounce House Castle", 25000),
            Self::item("slide", "Giant Inflatable Slide", 15000),
        ];
        combo.start_date = Some(Self::at(2025, 6, 14, 8));
        combo.end_date = Some(Self::at(2025, 6, 14, 20));
        combo.customer = Some(Self::customer_ref("c2", "Grace Hopper"));
        combo.payment_method = Some("card".to_string());

        let mut cancelled = Self::booking("j3", Self::at(2025, 6, 12, 11), 15000, BookingStatus::Cancelled);
        cancelled.items = vec![Self::item("slide", "Giant Inflatable Slide", 15000)];
        cancelled.customer = Some(Self::customer_ref("c1", "Ada Lovelace"));
        cancelled.cancellation_reason = Some("Weather".to_string());

        let mut may = Self::booking("m1", Self::at(2025, 5, 20, 10), 20000, BookingStatus::Completed);
        may.items = vec![Self::item("castle", "Bounce House Castle", 20000)];
        may.customer = Some(Self::customer_ref("c1", "Ada Lovelace"));

        vec![castle, combo, cancelled, may]
    }

    pub fn catalogue() -> Vec<CatalogueItem> {
        vec![
            CatalogueItem {
                id: "castle".to_string(),
                name: "Bounce House Castle".to_string(),
            },
            CatalogueItem {
                id: "slide".to_string(),
                name: "Giant Inflatable Slide".to_string(),
            },
            CatalogueItem {
                id: "toddler".to_string(),
                name: "Toddler Play Zone".to_string(),
            },
        ]
    }

    pub fn customers() -> Vec<Customer> {
        vec![
            Customer {
                id: "c1".to_string(),
                name: Some("Ada Lovelace".to_string()),
                email: Some("c1@example.com".to_string()),
                address: Some(Address {
                    city: Some("Austin".to_string()),
                    state: Some("TX".to_string()),
                }),
            },
            Customer {
                id: "c2".to_string(),
                name: Some("Grace Hopper".to_string()),
                email: None,
                address: Some(Address {
                    city: Some("Austin".to_string()),
                    state: Some("TX".to_string()),
                }),
            },
        ]
    }
}
