//! Domain types exchanged with the remote Untron order service.
//!
//! The order lifecycle (`open -> closed` or `open -> expired`) is owned
//! entirely by that service; everything here is a read-only snapshot or a
//! request payload.

pub mod info;
pub mod order;
pub mod tron;
pub mod u256_decimal;
