//! Expansion context for tracking state during recursive expansion.

use crate::expander::ExpandError;

/// Expansion context carrying state through recursive expansion.
///
/// The context tracks:
/// - The chain of placeholders currently being resolved (cycle detection)
/// - Recursion depth, shared by value nesting, template bodies and
///   placeholder chains
pub struct ExpandContext {
    /// Placeholder names on the active resolution path.
    resolving: Vec<String>,
    /// Current recursion depth.
    depth: usize,
    /// Maximum allowed depth.
    max_depth: usize,
}

impl ExpandContext {
    /// Create a context with the given depth limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolving: Vec::new(),
            depth: 0,
            max_depth,
        }
    }

    /// Enter one level of recursion.
    pub fn descend(&mut self) -> Result<(), ExpandError> {
        if self.depth >= self.max_depth {
            return Err(ExpandError::MaxDepthExceeded {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave one level of recursion.
    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Push a placeholder onto the resolution path.
    ///
    /// Returns error if:
    /// - Maximum depth exceeded
    /// - The name is already being resolved further up the path
    pub fn push_placeholder(&mut self, name: &str) -> Result<(), ExpandError> {
        if self.resolving.iter().any(|n| n == name) {
            let mut chain = self.resolving.clone();
            chain.push(name.to_string());
            return Err(ExpandError::CyclicSubstitution { chain });
        }
        self.descend()?;
        self.resolving.push(name.to_string());
        Ok(())
    }

    /// Pop the innermost placeholder from the resolution path.
    pub fn pop_placeholder(&mut self) {
        self.resolving.pop();
        self.ascend();
    }

    /// Get current recursion depth.
    pub fn depth(&self) -> usize {
        self.depth
    }
}
