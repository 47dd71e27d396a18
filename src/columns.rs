//! Column names the pipeline knows about.

/// Canonical student identifier, the join key across all three tables.
pub const ID: &str = "idaluno";

pub const START_DATE: &str = "data_inicio";
pub const END_DATE: &str = "data_fim";
pub const DATE: &str = "data";

pub const SCORE: &str = "nota";
pub const SCORE_NORMALIZED: &str = "nota_normalizada";
pub const STATUS: &str = "status";

pub const INTERACTIVE: &str = "interativo";
pub const MESSAGES_SENT: &str = "TOTAL_MENSAGENS_ENVIADAS";
