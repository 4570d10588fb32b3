//! Bytecode execution core of the Opal programming language.
//!
//! Opal is a small, dynamically typed, expression-oriented language. The
//! compiler (a separate crate) lowers source into a [`CompiledProgram`],
//! a flat instruction stream plus a constant pool, and this crate executes
//! it: a stack-based dispatch loop over a value stack, a call-frame stack,
//! and a globals slab.
//!
//! ```
//! use opal_vm::bytecode::{make, Instructions, Opcode};
//! use opal_vm::{CompiledProgram, Value, Vm};
//!
//! // 1 + 2
//! let program = CompiledProgram {
//!     instructions: Instructions::concat([
//!         make(Opcode::Constant, &[0]),
//!         make(Opcode::Constant, &[1]),
//!         make(Opcode::Add, &[]),
//!         make(Opcode::Pop, &[]),
//!     ]),
//!     constants: vec![Value::Integer(1), Value::Integer(2)],
//! };
//!
//! let mut vm = Vm::new(&program);
//! vm.run().unwrap();
//! assert_eq!(*vm.last_popped_stack_elem(), Value::Integer(3));
//! ```

#![warn(clippy::all)]

pub mod bytecode;
pub mod object;
pub mod vm;

pub use object::Value;
pub use vm::{CompiledProgram, Vm, VmError, VmResult, GLOBALS_SIZE, MAX_FRAMES, STACK_SIZE};
