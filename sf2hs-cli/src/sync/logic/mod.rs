//! Resolution, execution and validation of field mappings

pub mod execution;
pub mod planner;
pub mod resolver;
pub mod run;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use execution::{build_new_property, execute, execute_plan};
pub use planner::{PlanError, plan_object};
pub use resolver::resolve;
pub use run::run_sync;
pub use validation::{CheckStatus, Connection, ValidationCheck, ValidationReport, validate};
