//! Rule descriptors: the immutable identity of every diagnostic kind.

use crate::types::{Diagnostic, Location, Severity};
use std::fmt::{self, Display, Write};

/// Static description of one diagnostic kind.
///
/// `message` may contain positional placeholders `{0}`, `{1}`, ... that are
/// filled from the arguments passed to [`RuleDescriptor::diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleDescriptor {
    /// Rule id in `RAnn-nnn` form.
    pub id: &'static str,
    /// Kebab-case name of the rule family.
    pub name: &'static str,
    /// Short title.
    pub title: &'static str,
    /// Message format with positional placeholders.
    pub message: &'static str,
    /// Severity of produced diagnostics.
    pub severity: Severity,
}

impl RuleDescriptor {
    /// Creates an error-level descriptor.
    #[must_use]
    pub const fn error(
        id: &'static str,
        name: &'static str,
        title: &'static str,
        message: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            title,
            message,
            severity: Severity::Error,
        }
    }

    /// Renders the message format with positional arguments.
    ///
    /// Placeholders without a matching argument are left as written.
    #[must_use]
    pub fn render(&self, args: &[&dyn Display]) -> String {
        render_message(self.message, args)
    }

    /// Builds a diagnostic of this kind.
    #[must_use]
    pub fn diagnostic(&self, location: Location, args: &[&dyn Display]) -> Diagnostic {
        Diagnostic::new(
            self.id,
            self.name,
            self.severity,
            location,
            self.render(args),
        )
    }
}

impl Display for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.id, self.name, self.title)
    }
}

fn render_message(format: &str, args: &[&dyn Display]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let placeholder = after.find('}').and_then(|close| {
            after[..close]
                .parse::<usize>()
                .ok()
                .and_then(|index| args.get(index))
                .map(|arg| (arg, close))
        });

        match placeholder {
            Some((arg, close)) => {
                let _ = write!(out, "{arg}");
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
