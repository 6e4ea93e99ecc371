//! The full rule catalog.

use crate::{
    AbstractionWithoutDecoupling, AmbiguousInterface, ArchitectureViolation, BigRepository,
    BrainRepository, ControllerBrain, ControllerModel, ControllerView, GodClass,
    LaboriousRepository, MeddlingService, ModelController, ModelView, PromiscuousController,
    ViewController, ViewModel,
};
use mvc_lint_core::{RuleBox, RuleDescriptor};

/// Returns every built-in rule, in rule-area order.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(ModelView::new()),
        Box::new(ModelController::new()),
        Box::new(ViewModel::new()),
        Box::new(ViewController::new()),
        Box::new(ControllerView::new()),
        Box::new(ControllerModel::new()),
        Box::new(ControllerBrain::new()),
        Box::new(PromiscuousController::new()),
        Box::new(MeddlingService::new()),
        Box::new(BrainRepository::new()),
        Box::new(BigRepository::new()),
        Box::new(LaboriousRepository::new()),
        Box::new(AbstractionWithoutDecoupling::new()),
        Box::new(AmbiguousInterface::new()),
        Box::new(ArchitectureViolation::new()),
        Box::new(GodClass::new()),
    ]
}

/// Every descriptor of every built-in rule, in code order.
#[must_use]
pub fn all_descriptors() -> Vec<&'static RuleDescriptor> {
    let mut descriptors: Vec<_> = all_rules()
        .iter()
        .flat_map(|rule| rule.descriptors().iter())
        .collect();
    descriptors.sort_by_key(|d| d.id);
    descriptors
}

/// Looks up descriptors by code (`RA07-001`, case-insensitive) or by rule
/// name (`controller-brain`, every code of that rule).
#[must_use]
pub fn find(code_or_name: &str) -> Vec<&'static RuleDescriptor> {
    all_descriptors()
        .into_iter()
        .filter(|d| d.id.eq_ignore_ascii_case(code_or_name) || d.name == code_or_name)
        .collect()
}
