//! CSV rendering with RFC 4180 quoting.

use std::fmt::Write;

use crate::activity::Activity;

/// Column layout is fixed; consumers key on this header.
const HEADER: &str = "timestamp,type,source,title,description,duration,url";

pub(super) fn format_activities<'a, I>(activities: I) -> String
where
    I: IntoIterator<Item = &'a Activity>,
{
    let mut out = String::new();
    writeln!(out, "{HEADER}").unwrap();
    for activity in activities {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            escape(&activity.timestamp.to_rfc3339()),
            activity.kind,
            escape(&activity.source),
            escape(&activity.title),
            escape(activity.description.as_deref().unwrap_or_default()),
            activity.duration_ms.map_or_else(String::new, |ms| ms.to_string()),
            escape(activity.url.as_deref().unwrap_or_default()),
        )
        .unwrap();
    }
    out
}

/// Quotes a field only when it contains a comma, quote, or line break.
fn escape(field: &str) -> String {
    let needs_quoting = field.contains(',')
        || field.contains('"')
        || field.contains('\n')
        || field.contains('\r');
    if needs_quoting {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
