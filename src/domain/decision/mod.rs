//! Decision domain: constraints, clarifying questions, decision packages,
//! saved projects, and the defensive parsing of model output.

mod constraints;
mod extraction;
mod package;
mod project;
pub mod prompts;
mod question;

pub use constraints::{Constraints, NOT_SPECIFIED};
pub use extraction::{extract_json, ExtractError};
pub use package::{
    validate_decision_package, DecisionOption, DecisionPackage, Metric, PlanStep, Scenarios,
    StakeholderMessage,
};
pub use project::{
    export_all_projects, export_project, import_projects, ImportError, Project,
};
pub use question::ClarifyingQuestion;
