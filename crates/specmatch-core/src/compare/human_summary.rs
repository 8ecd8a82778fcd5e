//! Human-readable summary renderer for comparison reports.

use crate::compare::model::Comparison;
use crate::compare::selector::Selector;
use crate::snapshot::LeafValue;
use specmatch_core_types::Sensitive;

/// Render a Markdown summary of a [`Comparison`].
///
/// Informational only; [`Comparison::is_equal`] is the decision.
pub fn render_summary(comparison: &Comparison) -> String {
    render(comparison, None)
}

/// Like [`render_summary`], but values under paths matched by `redact` are
/// replaced with a placeholder (e.g. secret `data.*`).
pub fn render_summary_redacted(comparison: &Comparison, redact: &Selector) -> String {
    render(comparison, Some(redact))
}

fn render(comparison: &Comparison, redact: Option<&Selector>) -> String {
    let mut out = String::new();

    out.push_str("## Selective Comparison\n\n");

    let verdict = if comparison.is_equal() {
        "Equal"
    } else {
        "Different"
    };
    out.push_str(&format!(
        "**Result**: {verdict}  \n**Selected**: A={} B={}\n\n",
        comparison.selected_a, comparison.selected_b
    ));

    if comparison.patterns.is_empty() {
        out.push_str("_No patterns: nothing was selected._\n");
        return out;
    }
    out.push_str("### Patterns\n\n");
    for pattern in &comparison.patterns {
        out.push_str(&format!("- `{}`\n", pattern));
    }
    out.push('\n');

    if comparison.is_equal() {
        out.push_str("_All selected fields agree._\n");
        return out;
    }

    if !comparison.only_in_a.is_empty() {
        out.push_str(&format!("### Only in A ({})\n\n", comparison.only_in_a.len()));
        for path in &comparison.only_in_a {
            out.push_str(&format!("- `{}`\n", path));
        }
        out.push('\n');
    }

    if !comparison.only_in_b.is_empty() {
        out.push_str(&format!("### Only in B ({})\n\n", comparison.only_in_b.len()));
        for path in &comparison.only_in_b {
            out.push_str(&format!("- `{}`\n", path));
        }
        out.push('\n');
    }

    if !comparison.kind_mismatches.is_empty() {
        out.push_str("### Kind Mismatches\n\n| Field | A | B |\n|---|---|---|\n");
        for m in &comparison.kind_mismatches {
            out.push_str(&format!("| `{}` | {} | {} |\n", m.name, m.kind_a, m.kind_b));
        }
        out.push('\n');
    }

    if !comparison.value_mismatches.is_empty() {
        out.push_str("### Value Mismatches\n\n| Field | Kind | A | B |\n|---|---|---|---|\n");
        for m in &comparison.value_mismatches {
            let hidden = redact.is_some_and(|r| r.matches(&m.path));
            out.push_str(&format!(
                "| `{}` | {} | {} | {} |\n",
                m.name,
                m.kind,
                shown(&m.a, hidden),
                shown(&m.b, hidden)
            ));
        }
        out.push('\n');
    }

    out
}

fn shown(value: &LeafValue, hidden: bool) -> String {
    if hidden {
        Sensitive::new(value).to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::compare;
    use crate::snapshot::flatten;
    use serde_json::json;
    use specmatch_core_types::sensitive::REDACTED;

    #[test]
    fn test_summary_lists_value_mismatch() {
        let a = flatten(&json!({"spec": {"image": "app:1"}})).unwrap();
        let b = flatten(&json!({"spec": {"image": "app:2"}})).unwrap();
        let report = compare(&a, &b, &Selector::new(["^spec\\."]).unwrap());

        let summary = render_summary(&report);
        assert!(summary.contains("**Result**: Different"));
        assert!(summary.contains("`spec.image`"));
        assert!(summary.contains("\"app:2\""));
    }

    #[test]
    fn test_summary_redacts_selected_values() {
        let a = flatten(&json!({"data": {"password": "hunter2"}})).unwrap();
        let b = flatten(&json!({"data": {"password": "letmein"}})).unwrap();
        let report = compare(&a, &b, &Selector::new(["^data\\."]).unwrap());

        let summary = render_summary_redacted(&report, &Selector::new(["^data\\."]).unwrap());
        assert!(summary.contains(REDACTED));
        assert!(!summary.contains("hunter2"));
        assert!(!summary.contains("letmein"));
    }

    #[test]
    fn test_summary_for_equal_selection() {
        let a = flatten(&json!({"spec": {"replicas": 1}})).unwrap();
        let report = compare(&a, &a, &Selector::new(["^spec"]).unwrap());
        assert!(render_summary(&report).contains("_All selected fields agree._"));
    }
}
