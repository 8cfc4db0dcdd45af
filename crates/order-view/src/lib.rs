//! Display-ready projections of order snapshots.
//!
//! [`project`] is a pure function of the latest snapshot: it holds no
//! running totals and is safe to call from both the poll tick and a
//! user-input recomputation, in any order.

use {
    chrono::{DateTime, Utc},
    model::order::{OrderSnapshot, OrderStatus},
    primitive_types::U256,
    quoting::{convert_send_to_receive, InvalidRate, Rate},
    thiserror::Error,
};

/// How an order turned out, or that it has not yet.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OrderOutcome {
    /// Still open; the counterparty may continue paying in.
    Pending,
    /// Closed after paying out to the beneficiary.
    Fulfilled,
    /// Terminal without a single payout, including orders the service
    /// closed because they expired unfunded.
    Expired,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderView {
    pub outcome: OrderOutcome,
    /// Units the counterparty still owes (`requested - received`).
    pub remaining: U256,
    /// Expected payout for the remainder at the order's locked-in rate.
    pub expected_receive: U256,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ProjectionError {
    #[error(transparent)]
    InvalidRate(#[from] InvalidRate),
    #[error(transparent)]
    Math(#[from] number::MathError),
}

/// Derives the view for a single order snapshot.
pub fn project(snapshot: &OrderSnapshot) -> Result<OrderView, ProjectionError> {
    let outcome = match snapshot.status {
        OrderStatus::Open => OrderOutcome::Pending,
        // A closed order that never paid out is an expiry, not a success.
        OrderStatus::Closed if snapshot.paid_total.is_zero() => OrderOutcome::Expired,
        OrderStatus::Closed => OrderOutcome::Fulfilled,
        OrderStatus::Expired => OrderOutcome::Expired,
    };
    let remaining = snapshot
        .requested_total
        .saturating_sub(snapshot.received_total);
    let rate = Rate::new(snapshot.rate)?;
    Ok(OrderView {
        outcome,
        remaining,
        expected_receive: convert_send_to_receive(remaining, rate)?,
        expires_at: snapshot.expires_at,
    })
}
