pub mod ad_spends;
pub mod enums;
pub mod sales;
pub mod summaries;
pub mod timestamps;
pub mod validation;
