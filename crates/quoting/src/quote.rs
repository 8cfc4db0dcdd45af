use {
    crate::{
        convert_receive_to_send_ceil, convert_send_to_receive, rate::InvalidRate, Rate,
    },
    model::{info::ExchangeInfo, order::SwapDirection},
    number::MathError,
    primitive_types::U256,
    thiserror::Error,
};

/// Everything needed to price a swap in either direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct QuoteParams {
    pub direction: SwapDirection,
    /// Nominal from-Tron rate before the proportional fee. Into-Tron swaps
    /// convert at identity and ignore this field.
    pub rate: Rate,
    /// Proportional from-Tron fee in basis points.
    pub fee_bps: u64,
    /// Flat into-Tron fee in units, subtracted after conversion.
    pub static_fee: U256,
    /// Ceiling on the output amount (minimum of available liquidity and the
    /// per-order cap).
    pub max_units: U256,
}

impl QuoteParams {
    pub fn from_info(info: &ExchangeInfo, direction: SwapDirection) -> Result<Self, InvalidRate> {
        Ok(Self {
            direction,
            rate: Rate::new(info.rate)?,
            fee_bps: info.fee_bps,
            static_fee: info.static_fee,
            max_units: info.effective_max_units(),
        })
    }

    fn effective_rate(&self) -> Result<Rate, InvalidRate> {
        self.rate.with_proportional_fee(self.fee_bps)
    }
}

/// A priced input/output pair.
///
/// Quotes are immutable values recomputed from the latest user input and the
/// latest liquidity snapshot; they carry explicit boundary flags instead of
/// silently rewriting state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Quote {
    pub send: U256,
    pub receive: U256,
    /// The requested amount exceeded the output ceiling and the pair was
    /// rewritten to the maximum valid one.
    pub capped: bool,
    /// The flat fee consumed a non-zero input entirely. Distinct from a zero
    /// output for a zero input.
    pub below_minimum: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum QuoteError {
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    InvalidRate(#[from] InvalidRate),
}

/// Prices a swap from the amount the user wants to send.
pub fn quote_send(params: &QuoteParams, send: U256) -> Result<Quote, QuoteError> {
    match params.direction {
        SwapDirection::FromTron => {
            let rate = params.effective_rate()?;
            let receive = convert_send_to_receive(send, rate)?;
            if receive > params.max_units {
                return capped_pair(params, rate);
            }
            Ok(Quote {
                send,
                receive,
                ..Default::default()
            })
        }
        SwapDirection::IntoTron => {
            let receive = send.saturating_sub(params.static_fee);
            if receive > params.max_units {
                return capped_pair(params, Rate::ONE);
            }
            Ok(Quote {
                send,
                receive,
                below_minimum: receive.is_zero() && !send.is_zero(),
                ..Default::default()
            })
        }
    }
}

/// Prices a swap from the amount the user wants to end up with.
pub fn quote_receive(params: &QuoteParams, receive: U256) -> Result<Quote, QuoteError> {
    let rate = match params.direction {
        SwapDirection::FromTron => params.effective_rate()?,
        SwapDirection::IntoTron => Rate::ONE,
    };
    if receive > params.max_units {
        return capped_pair(params, rate);
    }
    Ok(Quote {
        send: send_for_receive(params, rate, receive)?,
        receive,
        ..Default::default()
    })
}

/// The maximum valid input/output pair, flagged as capped.
fn capped_pair(params: &QuoteParams, rate: Rate) -> Result<Quote, QuoteError> {
    let receive = params.max_units;
    Ok(Quote {
        send: send_for_receive(params, rate, receive)?,
        receive,
        capped: true,
        ..Default::default()
    })
}

fn send_for_receive(params: &QuoteParams, rate: Rate, receive: U256) -> Result<U256, QuoteError> {
    match params.direction {
        // Rounded up so the service never receives less than required to pay
        // out the requested amount.
        SwapDirection::FromTron => Ok(convert_receive_to_send_ceil(receive, rate)?),
        SwapDirection::IntoTron => receive
            .checked_add(params.static_fee)
            .ok_or(QuoteError::Math(MathError::Overflow)),
    }
}
