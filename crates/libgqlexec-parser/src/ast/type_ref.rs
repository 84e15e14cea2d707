use crate::ast::AstNode;
use crate::GraphQLSourceSpan;
use inherent::inherent;

/// Identifies a type definition stored in a type cache.
///
/// Ids are handed out by whoever owns the cache; the parser only ever leaves
/// them unset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    pub fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A reference to a type as written in source, e.g. `[[Int!]]!`.
///
/// List wrapping is flattened into a depth and a bitmask: level `0` is the
/// outermost wrapper and level `depth` is the named type itself. Bit `n` of
/// `non_null` is set when level `n` carries a `!`. So `[Person!]` has depth 1
/// with bit 1 set, and `String!` has depth 0 with bit 0 set.
///
/// `resolved` starts out empty and is filled in once the named type has been
/// located in a type cache.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeRef {
    pub name: String,
    pub depth: u8,
    pub non_null: u8,
    pub span: GraphQLSourceSpan,
    pub resolved: Option<TypeId>,
}

impl TypeRef {
    /// Deepest list nesting a type reference may have.
    pub const MAX_DEPTH: u8 = 7;

    /// A nullable reference to the named type `name`.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            depth: 0,
            non_null: 0,
            span: GraphQLSourceSpan::builtin(),
            resolved: None,
        }
    }

    /// Marks the outermost level as non-null.
    pub fn non_null(mut self) -> Self {
        self.non_null |= 1;
        self
    }

    /// Wraps this reference in a (nullable) list.
    pub fn list(mut self) -> Self {
        self.depth += 1;
        self.non_null <<= 1;
        self
    }

    pub fn is_list(&self) -> bool {
        self.depth > 0
    }

    pub fn is_non_null(&self) -> bool {
        self.is_non_null_at(0)
    }

    pub fn is_non_null_at(&self, level: u8) -> bool {
        level <= self.depth && self.non_null & (1 << level) != 0
    }

    /// The item type of a list reference: `[[Int]!]` gives `[Int]!`.
    /// Returns `None` for a named (non-list) reference.
    pub fn item_type(&self) -> Option<TypeRef> {
        if self.depth == 0 {
            return None;
        }
        Some(TypeRef {
            name: self.name.clone(),
            depth: self.depth - 1,
            non_null: self.non_null >> 1,
            span: self.span.clone(),
            resolved: self.resolved,
        })
    }
}

#[inherent]
impl AstNode for TypeRef {
    pub fn span(&self) -> &GraphQLSourceSpan {
        &self.span
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut rendered = self.name.clone();
        if self.is_non_null_at(self.depth) {
            rendered.push('!');
        }
        for level in (0..self.depth).rev() {
            rendered = format!("[{rendered}]");
            if self.is_non_null_at(level) {
                rendered.push('!');
            }
        }
        f.write_str(&rendered)
    }
}
