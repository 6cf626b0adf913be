pub mod sale_kinds;
pub mod sale_plans;
pub mod sort_order;
