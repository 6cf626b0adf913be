pub mod ad_spends;
pub mod dashboard;
pub mod sales;
