//! In-memory stores implementing the same repository traits as the Postgres
//! ones. Data lives only as long as the store value.

pub mod ad_spends;
pub mod sales;
