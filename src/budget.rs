use crate::{ConvergenceError, Result};

/// The maximum amount of iterations a bounded loop may run before giving up.
///
/// Numerically pathological inputs could otherwise make the clipping or projecting loops spin
/// forever; exhausting a budget turns that into an error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget(usize);

impl Default for Budget {
    fn default() -> Self {
        Self(100_000)
    }
}

impl From<usize> for Budget {
    fn from(iterations: usize) -> Self {
        Self(iterations)
    }
}

impl Budget {
    /// Returns the inner value of self.
    pub fn into_inner(self) -> usize {
        self.0
    }

    /// Fails if the given amount of iterations overflows this budget.
    pub(crate) fn check(&self, iterations: usize, context: impl FnOnce() -> String) -> Result<()> {
        if iterations > self.0 {
            return Err(ConvergenceError::Exhausted {
                budget: self.0,
                context: context(),
            }
            .into());
        }

        Ok(())
    }
}
