//! Daily cash closing ("cierre de caja").
//!
//! Sums today's sales by payment method. Money is handled as
//! [`rust_decimal::Decimal`] so that totals such as `0.1 + 0.2` come out exact.

use crate::collection::DATE_FIELD;
use crate::Record;
use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::str::FromStr;

/// Field holding the sale amount.
pub const TOTAL_FIELD: &str = "total";
/// Field holding the payment method.
pub const PAYMENT_METHOD_FIELD: &str = "metodoPago";

/// Payment methods the closing knows how to sum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMethod {
    /// `efectivo`
    Cash,
    /// `transferencia`
    Transfer,
}

impl PaymentMethod {
    /// Recognize a stored payment method.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "efectivo" => Some(PaymentMethod::Cash),
            "transferencia" => Some(PaymentMethod::Transfer),
            _ => None,
        }
    }

    /// Payment method of a stored sale.
    pub fn of(sale: &Record) -> Option<Self> {
        sale.get_str(PAYMENT_METHOD_FIELD).and_then(Self::parse)
    }
}

/// Result of a cash closing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashClosing {
    #[serde(rename = "efectivo", serialize_with = "two_decimals")]
    pub cash: Decimal,
    #[serde(rename = "transferencia", serialize_with = "two_decimals")]
    pub transfer: Decimal,
    #[serde(serialize_with = "two_decimals")]
    pub total: Decimal,
    /// Every sale of the day, including those with an unrecognized method.
    #[serde(rename = "cantidadVentas")]
    pub sale_count: usize,
}

/// Compute the closing for `today` out of the whole sales collection.
///
/// A sale belongs to `today` when its `fecha` starts with the ISO date.
/// Sales with any method other than cash or transfer count toward
/// `sale_count` but toward neither sum. Sums saturate at the bounds of
/// [`Decimal`] rather than overflow.
pub fn cash_closing(sales: &[Record], today: NaiveDate) -> CashClosing {
    let prefix = today.format("%Y-%m-%d").to_string();

    let mut cash = Decimal::ZERO;
    let mut transfer = Decimal::ZERO;
    let mut sale_count = 0;

    for sale in sales {
        let is_today = sale
            .get_str(DATE_FIELD)
            .is_some_and(|date| date.starts_with(&prefix));
        if !is_today {
            continue;
        }
        sale_count += 1;

        match PaymentMethod::of(sale) {
            Some(PaymentMethod::Cash) => cash = cash.saturating_add(amount(sale)),
            Some(PaymentMethod::Transfer) => transfer = transfer.saturating_add(amount(sale)),
            None => {}
        }
    }

    CashClosing {
        cash: round(cash),
        transfer: round(transfer),
        total: round(cash.saturating_add(transfer)),
        sale_count,
    }
}

/// Amount of a sale. Numeric strings are accepted; anything else is zero.
fn amount(sale: &Record) -> Decimal {
    match sale.get(TOTAL_FIELD) {
        Some(Value::Number(n)) => parse_decimal(&n.to_string()),
        Some(Value::String(s)) => parse_decimal(s.trim()),
        _ => None,
    }
    .unwrap_or(Decimal::ZERO)
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

fn round(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn two_decimals<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("{:.2}", round(*value)))
}
