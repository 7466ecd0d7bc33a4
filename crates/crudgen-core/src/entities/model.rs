use serde::Serialize;

/// One field line inside a `model` block.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    /// Raw type token including modifiers, e.g. `String?` or `Post[]`.
    pub type_hint: String,
    /// Field attributes in source form, e.g. `@default(autoincrement())`.
    pub attributes: Vec<String>,
    pub line: usize,
}

impl Field {
    /// Type token with the `?` and `[]` modifiers stripped.
    #[must_use]
    pub fn base_type(&self) -> &str {
        let hint = self.type_hint.strip_suffix('?').unwrap_or(&self.type_hint);
        hint.strip_suffix("[]").unwrap_or(hint)
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.type_hint.ends_with('?')
    }

    #[must_use]
    pub fn is_list(&self) -> bool {
        self.type_hint
            .strip_suffix('?')
            .unwrap_or(&self.type_hint)
            .ends_with("[]")
    }

    /// Whether any attribute starts with the given name (`@default`, `@id`, ...).
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|attr| {
            attr.strip_prefix(name)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('('))
        })
    }
}

/// A schema-declared entity: the unit of code generation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Model {
    pub name: String,
    pub fields: Vec<Field>,
    /// Line of the `model` keyword (1-based).
    pub line: usize,
}

impl Model {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// An `enum` block. Enum-typed fields are emitted as string-literal unions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct EnumDecl {
    pub name: String,
    pub variants: Vec<String>,
    pub line: usize,
}

/// Everything the parser extracted, in declaration order.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Schema {
    pub models: Vec<Model>,
    pub enums: Vec<EnumDecl>,
}

impl Schema {
    #[must_use]
    pub fn model(&self, name: &str) -> Option<&Model> {
        self.models.iter().find(|model| model.name == name)
    }

    #[must_use]
    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|decl| decl.name == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn field(type_hint: &str, attributes: &[&str]) -> Field {
        Field {
            name: "f".to_string(),
            type_hint: type_hint.to_string(),
            attributes: attributes.iter().map(ToString::to_string).collect(),
            line: 1,
        }
    }

    #[rstest]
    #[case("String", "String", false, false)]
    #[case("String?", "String", true, false)]
    #[case("Post[]", "Post", false, true)]
    #[case("Tag[]?", "Tag", true, true)]
    fn type_modifiers(
        #[case] hint: &str,
        #[case] base: &str,
        #[case] optional: bool,
        #[case] list: bool,
    ) {
        let f = field(hint, &[]);
        assert_eq!(f.base_type(), base);
        assert_eq!(f.is_optional(), optional);
        assert_eq!(f.is_list(), list);
    }

    #[test]
    fn attribute_lookup_matches_whole_name() {
        let f = field("Int", &["@id", "@default(autoincrement())"]);
        assert!(f.has_attribute("@id"));
        assert!(f.has_attribute("@default"));
        assert!(!f.has_attribute("@def"));
        assert!(!f.has_attribute("@updatedAt"));
    }
}
