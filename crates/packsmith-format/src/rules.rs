//! Named normalization rules.

use std::fmt;

use crate::context::FormatterContext;
use crate::error::RuleError;

/// Signature every rule implements.
pub type RuleFn = fn(&mut FormatterContext) -> Result<(), RuleError>;

/// One step of a formatter's rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub apply: RuleFn,
}

impl Rule {
    pub fn run(&self, ctx: &mut FormatterContext) -> Result<(), RuleError> {
        tracing::debug!(rule = self.name, file = %ctx.source_path.display(), "applying rule");
        (self.apply)(ctx)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

/// Names of a rule table, in order.
pub fn rule_names(rules: &[Rule]) -> Vec<&'static str> {
    rules.iter().map(|r| r.name).collect()
}
