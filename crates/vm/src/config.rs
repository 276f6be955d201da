//! Run limits for the CSPC VM.
//!
//! Both limits are off by default: the stack grows without bound and a
//! program that jumps in a cycle runs forever.

/// VM configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VmConfig {
    /// Maximum number of values on the operand stack.
    pub max_stack_depth: Option<usize>,

    /// Maximum number of instructions dispatched in one run.
    pub step_limit: Option<u64>,
}

impl VmConfig {
    /// Create a configuration with no limits.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_stack_depth(mut self, depth: usize) -> Self {
        self.max_stack_depth = Some(depth);
        self
    }

    pub fn with_step_limit(mut self, steps: u64) -> Self {
        self.step_limit = Some(steps);
        self
    }
}
