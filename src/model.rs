//! Definitions found in a single source file — format-agnostic.

/// A `struct Name { ... };` block, kept exactly as it appears in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructDef {
    /// Source bytes from `struct` through the terminating `};`
    pub text: Vec<u8>,
    pub name: String,
}

/// Raw text between a `def` marker and the opening brace of the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSig {
    pub raw: String,
}

/// Everything extracted from one source file, in order of appearance.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub structs: Vec<StructDef>,
    pub functions: Vec<FunctionSig>,
}

impl Extraction {
    /// No structs and no functions: nothing to emit for this file.
    pub fn is_empty(&self) -> bool {
        self.structs.is_empty() && self.functions.is_empty()
    }
}
