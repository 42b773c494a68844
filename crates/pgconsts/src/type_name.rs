use pg_query::NodeEnum;
use pg_query::protobuf::Node;

/// Flatten the parts of a type name into a display string.
///
/// `["pg_catalog", "varchar"]` becomes `pg_catalog varchar`. Parts that are not
/// plain strings are passed to `on_unsupported` and left out.
pub fn render_type_name(parts: &[Node], mut on_unsupported: impl FnMut(&NodeEnum)) -> String {
    let mut out = String::new();

    for part in parts {
        match part.node.as_ref() {
            Some(NodeEnum::String(s)) => {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&s.sval);
            }
            Some(other) => on_unsupported(other),
            None => {}
        }
    }

    out
}
