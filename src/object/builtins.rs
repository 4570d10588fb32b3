//! The built-in function table.
//!
//! The compiler emits `OpGetBuiltin` with an index into this table, so the
//! order here is part of the compiled-program contract. Misuse (wrong arity,
//! wrong argument type) produces an error value, never a VM error: built-ins
//! are responsible for their own argument checking.

use std::rc::Rc;

use super::{Builtin, Value, NULL};

/// All built-ins, in table order.
pub const BUILTINS: &[Builtin] = &[
    Builtin { name: "len", func: len },
    Builtin { name: "puts", func: puts },
    Builtin { name: "first", func: first },
    Builtin { name: "last", func: last },
    Builtin { name: "rest", func: rest },
    Builtin { name: "push", func: push },
];

/// Resolve a built-in by name (compiler-side convenience; the VM resolves
/// by index).
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().copied().find(|b| b.name == name)
}

fn error(message: String) -> Option<Value> {
    Some(Value::Error(message.into()))
}

fn wrong_arity(got: usize, want: usize) -> Option<Value> {
    error(format!("wrong number of arguments. got={}, want={}", got, want))
}

fn len(args: &[Value]) -> Option<Value> {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Str(s) => Some(Value::Integer(s.len() as i64)),
        Value::Array(elements) => Some(Value::Integer(elements.len() as i64)),
        other => error(format!("argument to `len` not supported, got {}", other.type_name())),
    }
}

fn puts(args: &[Value]) -> Option<Value> {
    for arg in args {
        println!("{}", arg);
    }
    None
}

fn first(args: &[Value]) -> Option<Value> {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => Some(elements.first().cloned().unwrap_or(NULL)),
        other => error(format!("argument to `first` must be ARRAY, got {}", other.type_name())),
    }
}

fn last(args: &[Value]) -> Option<Value> {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) => Some(elements.last().cloned().unwrap_or(NULL)),
        other => error(format!("argument to `last` must be ARRAY, got {}", other.type_name())),
    }
}

fn rest(args: &[Value]) -> Option<Value> {
    if args.len() != 1 {
        return wrong_arity(args.len(), 1);
    }
    match &args[0] {
        Value::Array(elements) if elements.is_empty() => Some(NULL),
        Value::Array(elements) => Some(Value::Array(Rc::new(elements[1..].to_vec()))),
        other => error(format!("argument to `rest` must be ARRAY, got {}", other.type_name())),
    }
}

fn push(args: &[Value]) -> Option<Value> {
    if args.len() != 2 {
        return wrong_arity(args.len(), 2);
    }
    match &args[0] {
        Value::Array(elements) => {
            let mut extended = Vec::with_capacity(elements.len() + 1);
            extended.extend_from_slice(elements);
            extended.push(args[1].clone());
            Some(Value::Array(Rc::new(extended)))
        }
        other => error(format!("argument to `push` must be ARRAY, got {}", other.type_name())),
    }
}
