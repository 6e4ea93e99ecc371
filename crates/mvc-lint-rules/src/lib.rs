//! # mvc-lint-rules
//!
//! Built-in architecture-smell rules for MVC code bases organised by
//! naming convention.
//!
//! Every rule is error severity. Layer membership comes from the naming
//! tokens in [`mvc_lint_core::Settings`]; limits come from its thresholds.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | RA01-001/002 | `model-view` | HTML tags and SQL commands in models |
//! | RA02-001 | `model-controller` | HTTP action attributes in models |
//! | RA03-001/002 | `view-model` | SQL and data-access references in views |
//! | RA04-001 | `view-controller` | HTTP action attributes in views |
//! | RA05-001 | `controller-view` | HTML tags in controllers |
//! | RA06-001/002 | `controller-model` | SQL and data-access references in controllers |
//! | RA07-001 | `controller-brain` | Control flow across controller actions |
//! | RA08-001 | `promiscuous-controller` | Actions, parameters and dependencies of controllers |
//! | RA09-001/002 | `meddling-service` | SQL and data-access imports in services |
//! | RA10-001 | `brain-repository` | Logic keywords in repository queries |
//! | RA11-001 | `big-repository` | Entity types per repository |
//! | RA12-001 | `laborious-repository` | Connection calls per repository method |
//! | RA13-001 | `abstraction-without-decoupling` | Interface references reaching concrete members |
//! | RA14-001 | `ambiguous-interface` | Methods per interface |
//! | RA15-001/002/003 | `architecture-violation` | Upward or skipping instantiation |
//! | RA16-001 | `god-class` | Lines per class |
//!
//! ## Usage
//!
//! ```ignore
//! use mvc_lint_core::Analyzer;
//! use mvc_lint_rules::{all_rules, ControllerBrain};
//!
//! let analyzer = Analyzer::builder()
//!     .rules(all_rules())
//!     .build()?;
//! let diagnostics = analyzer.analyze_unit(&unit, &symbols);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod abstraction_without_decoupling;
pub mod ambiguous_interface;
pub mod architecture_violation;
pub mod big_repository;
pub mod brain_repository;
mod catalog;
pub mod controller_brain;
pub mod controller_model;
pub mod controller_view;
pub mod god_class;
pub mod laborious_repository;
pub mod meddling_service;
pub mod model_controller;
pub mod model_view;
pub mod promiscuous_controller;
pub mod view_controller;
pub mod view_model;

#[cfg(test)]
mod test_support;

pub use abstraction_without_decoupling::AbstractionWithoutDecoupling;
pub use ambiguous_interface::AmbiguousInterface;
pub use architecture_violation::ArchitectureViolation;
pub use big_repository::BigRepository;
pub use brain_repository::BrainRepository;
pub use catalog::{all_descriptors, all_rules, find};
pub use controller_brain::ControllerBrain;
pub use controller_model::ControllerModel;
pub use controller_view::ControllerView;
pub use god_class::GodClass;
pub use laborious_repository::LaboriousRepository;
pub use meddling_service::MeddlingService;
pub use model_controller::ModelController;
pub use model_view::ModelView;
pub use promiscuous_controller::PromiscuousController;
pub use view_controller::ViewController;
pub use view_model::ViewModel;

/// Re-export core types for convenience.
pub use mvc_lint_core::{Diagnostic, Rule, Severity};
