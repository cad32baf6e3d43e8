pub mod database;
pub mod evaluator;
pub mod logging;
pub mod orchestrator;
