//! Runtime value model: the tagged universe of values the VM manipulates,
//! plus the hash-key derivation used by the map type.

pub mod builtins;

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::bytecode::Instructions;

/// The canonical `true` singleton.
pub const TRUE: Value = Value::Boolean(true);
/// The canonical `false` singleton.
pub const FALSE: Value = Value::Boolean(false);
/// The canonical absence value.
pub const NULL: Value = Value::Null;

/// A runtime value. Heap payloads sit behind `Rc` so stack slots clone in
/// constant time; strings and arrays are immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    Null,
    Str(Rc<str>),
    Array(Rc<Vec<Value>>),
    Map(Rc<HashMap<HashKey, MapPair>>),
    Function(Rc<CompiledFunction>),
    Closure(Rc<Closure>),
    Builtin(Builtin),
    /// An error produced by a built-in; travels the stack like any other
    /// value rather than aborting the run.
    Error(Rc<str>),
}

/// A bytecode-level function object, produced by the compiler and embedded
/// in the constant pool.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledFunction {
    pub instructions: Instructions,
    pub num_locals: u16,
    pub num_parameters: u16,
}

/// A callable created at runtime by `OpClosure`.
///
/// `free` is reserved for captured variables. The current opcode set never
/// populates or reads it; it stays empty until free-variable capture lands.
#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub func: Rc<CompiledFunction>,
    pub free: Vec<Value>,
}

/// The uniform native calling convention: arguments in, optional value out.
/// A `None` return is converted to `NULL` by the VM.
pub type BuiltinFn = fn(&[Value]) -> Option<Value>;

/// A host-provided native function exposed to bytecode through
/// `OpGetBuiltin`.
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

impl PartialEq for Builtin {
    // Names are unique within the table; function pointers compare
    // unreliably across codegen units.
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// The type of a value eligible as a map key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyTag {
    Integer,
    Boolean,
    String,
}

/// A canonical, cheap-to-compare map key derived from a hashable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HashKey {
    pub tag: KeyTag,
    pub value: u64,
}

/// A stored map entry: the original key value alongside the mapped value.
#[derive(Debug, Clone, PartialEq)]
pub struct MapPair {
    pub key: Value,
    pub value: Value,
}

impl Value {
    /// The canonical type tag used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "INTEGER",
            Value::Boolean(_) => "BOOLEAN",
            Value::Null => "NULL",
            Value::Str(_) => "STRING",
            Value::Array(_) => "ARRAY",
            Value::Map(_) => "HASHMAP",
            Value::Function(_) => "COMPILED_FUNCTION",
            Value::Closure(_) => "CLOSURE",
            Value::Builtin(_) => "BUILTIN",
            Value::Error(_) => "ERROR",
        }
    }

    /// Derive the map key for this value, or `None` if its type is not
    /// hashable. Only integers, booleans, and strings qualify.
    pub fn hash_key(&self) -> Option<HashKey> {
        match self {
            Value::Integer(n) => Some(HashKey { tag: KeyTag::Integer, value: *n as u64 }),
            Value::Boolean(b) => Some(HashKey { tag: KeyTag::Boolean, value: *b as u64 }),
            Value::Str(s) => Some(HashKey { tag: KeyTag::String, value: fnv1a(s.as_bytes()) }),
            _ => None,
        }
    }
}

// 64-bit FNV-1a; a stable content hash for string keys.
fn fnv1a(bytes: &[u8]) -> u64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;
    bytes
        .iter()
        .fold(OFFSET_BASIS, |hash, byte| (hash ^ u64::from(*byte)).wrapping_mul(PRIME))
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Null => write!(f, "null"),
            Value::Str(s) => write!(f, "{}", s),
            Value::Array(elements) => {
                write!(f, "[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                write!(f, "]")
            }
            Value::Map(pairs) => {
                write!(f, "{{")?;
                for (i, pair) in pairs.values().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", pair.key, pair.value)?;
                }
                write!(f, "}}")
            }
            Value::Function(_) => write!(f, "<fn>"),
            Value::Closure(_) => write!(f, "<closure>"),
            Value::Builtin(b) => write!(f, "<builtin {}>", b.name),
            Value::Error(message) => write!(f, "ERROR: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_hash_keys_follow_content() {
        let hello1 = Value::Str("Hello World".into());
        let hello2 = Value::Str("Hello World".into());
        let diff1 = Value::Str("My name is johnny".into());
        let diff2 = Value::Str("My name is johnny".into());

        assert_eq!(hello1.hash_key(), hello2.hash_key());
        assert_eq!(diff1.hash_key(), diff2.hash_key());
        assert_ne!(hello1.hash_key(), diff1.hash_key());
    }

    #[test]
    fn integer_and_boolean_hash_keys() {
        assert_eq!(
            Value::Integer(1).hash_key(),
            Some(HashKey { tag: KeyTag::Integer, value: 1 })
        );
        assert_eq!(
            Value::Integer(-1).hash_key(),
            Some(HashKey { tag: KeyTag::Integer, value: (-1i64) as u64 })
        );
        assert_eq!(
            TRUE.hash_key(),
            Some(HashKey { tag: KeyTag::Boolean, value: 1 })
        );
        assert_ne!(Value::Integer(1).hash_key(), TRUE.hash_key());
    }

    #[test]
    fn only_scalar_types_are_hashable() {
        assert!(Value::Array(Rc::new(vec![])).hash_key().is_none());
        assert!(Value::Map(Rc::new(HashMap::new())).hash_key().is_none());
        assert!(NULL.hash_key().is_none());
        assert!(Value::Error("boom".into()).hash_key().is_none());
    }

    #[test]
    fn display_forms() {
        let array = Value::Array(Rc::new(vec![
            Value::Integer(1),
            Value::Str("two".into()),
            FALSE,
        ]));
        assert_eq!(array.to_string(), "[1, two, false]");
        assert_eq!(NULL.to_string(), "null");
        assert_eq!(Value::Error("bad".into()).to_string(), "ERROR: bad");
    }

    #[test]
    fn builtin_equality_is_by_name() {
        fn a(_: &[Value]) -> Option<Value> {
            None
        }
        fn b(_: &[Value]) -> Option<Value> {
            Some(NULL)
        }
        assert_eq!(
            Builtin { name: "len", func: a },
            Builtin { name: "len", func: b }
        );
        assert_ne!(
            Builtin { name: "len", func: a },
            Builtin { name: "puts", func: a }
        );
    }
}
