use std::fmt::Write;

use super::DashboardSnapshot;

fn escape_html(v: &str) -> String {
    v.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render a snapshot as a standalone HTML page.
pub fn render_html(snap: &DashboardSnapshot) -> String {
    let title = escape_html(&snap.title);
    let mut out = String::new();
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html><head><meta charset=\"utf-8\"><title>{title}</title></head>");
    let _ = writeln!(out, "<body><h1>{title}</h1>");
    let _ = writeln!(out, "<table data-sort-by=\"{}\">", escape_html(&snap.sort_by));
    let _ = writeln!(out, "<tr><th>path</th><th>hits</th></tr>");
    for r in &snap.items {
        let _ = writeln!(out, "<tr><td>{}</td><td>{}</td></tr>", escape_html(&r.path), r.hits);
    }
    let _ = writeln!(out, "</table></body></html>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HitRecord;

    #[test]
    fn paths_are_escaped() {
        let snap = DashboardSnapshot {
            title: "Hello Hits".into(),
            sort_by: "-hits".into(),
            items: vec![HitRecord { path: "/<script>".into(), hits: 1 }],
        };
        let html = render_html(&snap);
        assert!(html.contains("<td>/&lt;script&gt;</td><td>1</td>"));
        assert!(html.contains("<h1>Hello Hits</h1>"));
    }
}
