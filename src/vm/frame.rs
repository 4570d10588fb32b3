use std::rc::Rc;

use crate::bytecode::Instructions;
use crate::object::Closure;

/// Activation record for one in-flight call.
#[derive(Debug, Clone)]
pub(crate) struct Frame {
    pub closure: Rc<Closure>,
    /// Instruction pointer into the closure's instruction buffer. Starts at
    /// `-1` so the dispatch loop's pre-increment lands on byte 0.
    pub ip: isize,
    /// Value-stack index where this frame's locals begin.
    pub base_pointer: usize,
}

impl Frame {
    pub fn new(closure: Rc<Closure>, base_pointer: usize) -> Self {
        Frame { closure, ip: -1, base_pointer }
    }

    pub fn instructions(&self) -> &Instructions {
        &self.closure.func.instructions
    }
}
