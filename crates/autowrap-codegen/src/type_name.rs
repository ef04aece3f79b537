//! Canonical display names for type references
//!
//! Names are fully qualified, generic arguments are expanded recursively,
//! nullable value types keep their `?`, and by-reference types render as
//! their element type (parameter direction is tracked separately).

use autowrap_core::TypeRef;

/// Render a type reference as a fully qualified name
pub fn format_type_name(type_ref: &TypeRef) -> String {
    let mut out = String::new();
    write_type_name(type_ref, &mut out);
    out
}

fn write_type_name(type_ref: &TypeRef, out: &mut String) {
    match type_ref {
        TypeRef::Named {
            namespace,
            name,
            generic_arguments,
        } => {
            if let Some(namespace) = namespace.as_deref().filter(|ns| !ns.is_empty()) {
                out.push_str(namespace);
                out.push('.');
            }
            out.push_str(&clean_type_name(name));

            if !generic_arguments.is_empty() {
                out.push('<');
                for (i, argument) in generic_arguments.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    write_type_name(argument, out);
                }
                out.push('>');
            }
        }
        TypeRef::Nullable { underlying } => {
            write_type_name(underlying, out);
            out.push('?');
        }
        TypeRef::Array { element, rank } => {
            write_type_name(element, out);
            out.push('[');
            for _ in 1..*rank {
                out.push(',');
            }
            out.push(']');
        }
        TypeRef::ByRef { element } => write_type_name(element, out),
        TypeRef::GenericParameter { name } => out.push_str(name),
    }
}

/// Strip CLR arity suffixes and turn nested-type separators into dots
///
/// `` Outer`1+Inner`2 `` becomes `Outer.Inner`.
pub fn clean_type_name(name: &str) -> String {
    name.split('+')
        .map(strip_arity)
        .collect::<Vec<_>>()
        .join(".")
}

fn strip_arity(segment: &str) -> &str {
    match segment.find('`') {
        Some(index) => &segment[..index],
        None => segment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_names() {
        let cases = vec![
            (TypeRef::object(), "System.Object"),
            (TypeRef::void(), "System.Void"),
            (TypeRef::int32(), "System.Int32"),
            (TypeRef::boolean(), "System.Boolean"),
            (TypeRef::string(), "System.String"),
            (TypeRef::int32().nullable(), "System.Int32?"),
        ];

        for (type_ref, expected) in cases {
            assert_eq!(format_type_name(&type_ref), expected);
        }
    }

    #[test]
    fn test_nested_generic_names() {
        let inner = TypeRef::generic(
            "System",
            "Tuple`2",
            vec![TypeRef::string(), TypeRef::boolean().nullable()],
        );
        let pair = TypeRef::generic("System", "Tuple`2", vec![TypeRef::int32().nullable(), inner]);
        let sequence = TypeRef::generic("System.Collections.Generic", "IEnumerable`1", vec![pair]);

        assert_eq!(
            format_type_name(&sequence),
            "System.Collections.Generic.IEnumerable<System.Tuple<System.Int32?, System.Tuple<System.String, System.Boolean?>>>"
        );
    }

    #[test]
    fn test_by_ref_renders_element() {
        assert_eq!(format_type_name(&TypeRef::int32().by_ref()), "System.Int32");
    }

    #[test]
    fn test_arrays() {
        assert_eq!(format_type_name(&TypeRef::string().array()), "System.String[]");
        assert_eq!(format_type_name(&TypeRef::int32().array_of_rank(3)), "System.Int32[,,]");
        assert_eq!(
            format_type_name(&TypeRef::int32().nullable().array().by_ref()),
            "System.Int32?[]"
        );
    }

    #[test]
    fn test_generic_parameters_and_nested_types() {
        let list = TypeRef::generic(
            "System.Collections.Generic",
            "List`1",
            vec![TypeRef::generic_parameter("T")],
        );
        assert_eq!(format_type_name(&list), "System.Collections.Generic.List<T>");

        let nested = TypeRef::named("Acme", "Outer`1+Inner");
        assert_eq!(format_type_name(&nested), "Acme.Outer.Inner");
    }

    #[test]
    fn test_unqualified_name() {
        let bare = TypeRef::Named {
            namespace: None,
            name: "Widget".to_string(),
            generic_arguments: Vec::new(),
        };
        assert_eq!(format_type_name(&bare), "Widget");
    }
}
