pub mod ad_spends;
pub mod sales;
