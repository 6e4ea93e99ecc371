//! Rule trait for defining detectors.

use crate::context::NodeContext;
use crate::descriptor::RuleDescriptor;
use crate::syntax::SyntaxKind;
use crate::types::Diagnostic;

/// A detector that inspects one kind of syntax node.
///
/// Rules are stateless: every call to [`Rule::check`] sees only its
/// [`NodeContext`], so one instance may run on many units at once.
///
/// # Example
///
/// ```ignore
/// use mvc_lint_core::{NodeContext, Rule, RuleDescriptor, SyntaxKind, Diagnostic};
///
/// const LONG_NAME: RuleDescriptor = RuleDescriptor::error(
///     "RA99-001", "long-name", "Class name too long", "Class '{0}' has a long name",
/// );
///
/// pub struct LongName;
///
/// impl Rule for LongName {
///     fn name(&self) -> &'static str { "long-name" }
///     fn descriptors(&self) -> &'static [RuleDescriptor] { &[LONG_NAME] }
///     fn node_kinds(&self) -> &'static [SyntaxKind] { &[SyntaxKind::ClassDeclaration] }
///
///     fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
///         let name = ctx.node.name();
///         if name.len() > 40 {
///             vec![ctx.report(&LONG_NAME, ctx.identifier_location(ctx.node), &[&name])]
///         } else {
///             vec![]
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "controller-brain").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Every diagnostic kind this rule may produce.
    fn descriptors(&self) -> &'static [RuleDescriptor];

    /// Node kinds this rule is dispatched on.
    fn node_kinds(&self) -> &'static [SyntaxKind];

    /// Inspects one dispatched node and returns any diagnostics found.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The node, its ancestors and the unit it belongs to
    ///
    /// # Returns
    ///
    /// Diagnostics whose codes are among [`Rule::descriptors`].
    fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic>;

    /// Returns true if `code` is declared by this rule.
    fn declares(&self, code: &str) -> bool {
        self.descriptors().iter().any(|d| d.id == code)
    }
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DESCRIPTOR: RuleDescriptor =
        RuleDescriptor::error("RA99-001", "test-rule", "A test rule", "Test diagnostic");

    struct TestRule;

    impl Rule for TestRule {
        fn name(&self) -> &'static str {
            "test-rule"
        }
        fn descriptors(&self) -> &'static [RuleDescriptor] {
            &[TEST_DESCRIPTOR]
        }
        fn node_kinds(&self) -> &'static [SyntaxKind] {
            &[SyntaxKind::ClassDeclaration]
        }
        fn check(&self, ctx: &NodeContext<'_>) -> Vec<Diagnostic> {
            vec![ctx.report(&TEST_DESCRIPTOR, ctx.node_location(ctx.node), &[])]
        }
    }

    #[test]
    fn test_rule_trait() {
        let rule = TestRule;
        assert_eq!(rule.name(), "test-rule");
        assert!(rule.declares("RA99-001"));
        assert!(!rule.declares("RA99-002"));
        assert_eq!(rule.description(), "");
    }
}
