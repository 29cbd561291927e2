use crate::core::Property;

fn names_match(declared: &str, requested: &str, ignore_case: bool) -> bool {
    if ignore_case {
        declared.eq_ignore_ascii_case(requested)
    } else {
        declared == requested
    }
}

/// 依欄位清單挑出要輸出的屬性
///
/// An empty, whitespace-only or missing `fields` selects every property in
/// the order `properties` lists them. Otherwise each comma-separated token is
/// trimmed and matched against the property names; the first match wins and
/// tokens without a match are skipped. A token repeated in `fields` resolves
/// to the same property again.
pub fn resolve_properties<'p, T>(
    properties: &'p [Property<T>],
    fields: Option<&str>,
    ignore_case: bool,
) -> Vec<&'p Property<T>> {
    let fields = match fields {
        Some(f) if !f.trim().is_empty() => f,
        _ => return properties.iter().collect(),
    };

    let mut resolved = Vec::new();
    for token in fields.split(',').map(str::trim) {
        if token.is_empty() {
            continue;
        }
        if let Some(property) = properties
            .iter()
            .find(|p| names_match(p.name(), token, ignore_case))
        {
            resolved.push(property);
        } else {
            tracing::trace!("Field '{}' matches no property, skipped", token);
        }
    }

    resolved
}
