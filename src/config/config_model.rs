use chrono::FixedOffset;

use super::stage::Stage;

#[derive(Debug, Clone)]
pub struct DotEnvyConfig {
    pub database: Database,
    pub timezone: Timezone,
    pub stage: Stage,
}

#[derive(Debug, Clone)]
pub struct Database {
    pub url: String,
}

/// Fixed offset every stored timestamp is stamped and reported in.
#[derive(Debug, Clone, Copy)]
pub struct Timezone {
    pub offset: FixedOffset,
}
