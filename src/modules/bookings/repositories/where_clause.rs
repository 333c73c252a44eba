use std::fmt;
use std::str::FromStr;

use crate::core::{AppError, Result};

/// Filter operators the booking service understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanEqual,
    LessThan,
    LessThanEqual,
    In,
    Like,
}

impl WhereOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereOperator::Equals => "equals",
            WhereOperator::NotEquals => "not_equals",
            WhereOperator::GreaterThan => "greater_than",
            WhereOperator::GreaterThanEqual => "greater_than_equal",
            WhereOperator::LessThan => "less_than",
            WhereOperator::LessThanEqual => "less_than_equal",
            WhereOperator::In => "in",
            WhereOperator::Like => "like",
        }
    }
}

impl FromStr for WhereOperator {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "equals" => Ok(WhereOperator::Equals),
            "not_equals" => Ok(WhereOperator::NotEquals),
            "greater_than" => Ok(WhereOperator::GreaterThan),
            "greater_than_equal" => Ok(WhereOperator::GreaterThanEqual),
            "less_than" => Ok(WhereOperator::LessThan),
            "less_than_equal" => Ok(WhereOperator::LessThanEqual),
            "in" => Ok(WhereOperator::In),
            "like" => Ok(WhereOperator::Like),
            other => Err(AppError::invalid_argument(format!(
                "Unsupported filter operator: {}",
                other
            ))),
        }
    }
}

/// Booking fields that may be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhereField {
    TenantId,
    CustomerId,
    Status,
    CreatedAt,
    StartDate,
    EndDate,
}

impl WhereField {
    pub fn as_str(&self) -> &'static str {
        match self {
            WhereField::TenantId => "tenantId",
            WhereField::CustomerId => "customerId",
            WhereField::Status => "status",
            WhereField::CreatedAt => "createdAt",
            WhereField::StartDate => "startDate",
            WhereField::EndDate => "endDate",
        }
    }

    /// Tenant scoping is always set by the service, never by the caller
    pub fn is_caller_settable(&self) -> bool {
        !matches!(self, WhereField::TenantId)
    }
}

impl FromStr for WhereField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tenantId" => Ok(WhereField::TenantId),
            "customerId" => Ok(WhereField::CustomerId),
            "status" => Ok(WhereField::Status),
            "createdAt" => Ok(WhereField::CreatedAt),
            "startDate" => Ok(WhereField::StartDate),
            "endDate" => Ok(WhereField::EndDate),
            other => Err(AppError::invalid_argument(format!(
                "Unsupported filter field: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: WhereField,
    pub operator: WhereOperator,
    pub value: String,
}

/// Conjunction of typed conditions, rendered as Payload `where[field][op]=value` pairs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    conditions: Vec<Condition>,
}

impl WhereClause {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clause scoping a query to one tenant
    pub fn for_tenant(tenant_id: &str) -> Self {
        Self::new().and(WhereField::TenantId, WhereOperator::Equals, tenant_id)
    }

    pub fn and(mut self, field: WhereField, operator: WhereOperator, value: impl Into<String>) -> Self {
        self.conditions.push(Condition {
            field,
            operator,
            value: value.into(),
        });
        self
    }

    /// Appends every condition of `other`
    pub fn merge(mut self, other: &WhereClause) -> Self {
        self.conditions.extend(other.conditions.iter().cloned());
        self
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.conditions
            .iter()
            .map(|c| {
                (
                    format!("where[{}][{}]", c.field.as_str(), c.operator.as_str()),
                    c.value.clone(),
                )
            })
            .collect()
    }

    /// Parses one caller-supplied `where[field][op]` key.
    ///
    /// Unknown fields or operators, and fields reserved for the service, are rejected
    /// rather than forwarded upstream.
    pub fn push_caller_filter(&mut self, key: &str, value: &str) -> Result<()> {
        let (field, operator) = parse_where_key(key)?;
        if !field.is_caller_settable() {
            return Err(AppError::invalid_argument(format!(
                "Filter on {} is not allowed",
                field.as_str()
            )));
        }
        self.conditions.push(Condition {
            field,
            operator,
            value: value.to_string(),
        });
        Ok(())
    }
}

impl fmt::Display for WhereClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self
            .to_query_pairs()
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        f.write_str(&rendered.join("&"))
    }
}

/// `where[status][equals]` -> (Status, Equals)
fn parse_where_key(key: &str) -> Result<(WhereField, WhereOperator)> {
    let malformed = || AppError::invalid_argument(format!("Malformed filter key: {}", key));

    let inner = key
        .strip_prefix("where[")
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(malformed)?;
    let (field, operator) = inner.split_once("][").ok_or_else(malformed)?;

    Ok((field.parse()?, operator.parse()?))
}
