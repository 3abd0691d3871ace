//! Report rendering for batch-check results.

use crate::domain::{BatchResult, Verdict};

/// Render the per-number report plus the trailing summary block.
///
/// One line per verdict, in input order, then the aggregate counters. Pure
/// and deterministic; lookup errors appear as lines but never as counts.
pub fn format_report(result: &BatchResult) -> String {
    let mut out = String::new();
    for (number, verdict) in &result.verdicts {
        match verdict {
            Verdict::Registered => {
                out.push_str(&format!("{number} is registered on WhatsApp.\n"));
            }
            Verdict::NotRegistered => {
                out.push_str(&format!("{number} is NOT registered on WhatsApp.\n"));
            }
            Verdict::LookupError(msg) => {
                out.push_str(&format!("Error checking {number}: {msg}\n"));
            }
        }
    }
    out.push_str(&format!(
        "\nSummary:\nRegistered: {}\nNot Registered: {}",
        result.registered, result.not_registered
    ));
    out
}

/// Render the bulk-check grouping: registered and unregistered numbers as two
/// comma-joined lists, with `None` standing in for an empty group. Errored
/// lookups appear in neither list.
pub fn format_grouped_report(result: &BatchResult) -> String {
    let mut registered = Vec::new();
    let mut not_registered = Vec::new();
    for (number, verdict) in &result.verdicts {
        match verdict {
            Verdict::Registered => registered.push(number.0.as_str()),
            Verdict::NotRegistered => not_registered.push(number.0.as_str()),
            Verdict::LookupError(_) => {}
        }
    }

    format!(
        "Registered Numbers: {}\nNot Registered Numbers: {}",
        join_or_none(&registered),
        join_or_none(&not_registered)
    )
}

fn join_or_none(numbers: &[&str]) -> String {
    if numbers.is_empty() {
        "None".to_string()
    } else {
        numbers.join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PhoneNumber;

    fn result(entries: &[(&str, Verdict)]) -> BatchResult {
        let mut out = BatchResult::default();
        for (number, verdict) in entries {
            match verdict {
                Verdict::Registered => out.registered += 1,
                Verdict::NotRegistered => out.not_registered += 1,
                Verdict::LookupError(_) => {}
            }
            out.verdicts
                .push((PhoneNumber(number.to_string()), verdict.clone()));
        }
        out
    }

    #[test]
    fn report_lists_lines_in_order_with_summary() {
        let r = result(&[
            ("123", Verdict::Registered),
            ("456", Verdict::NotRegistered),
        ]);
        let text = format_report(&r);

        let registered_line = text.find("123 is registered on WhatsApp.").unwrap();
        let not_registered_line = text.find("456 is NOT registered on WhatsApp.").unwrap();
        assert!(registered_line < not_registered_line);
        assert!(text.ends_with("Summary:\nRegistered: 1\nNot Registered: 1"));
    }

    #[test]
    fn report_includes_error_lines_without_counting_them() {
        let r = result(&[
            ("123", Verdict::Registered),
            ("oops", Verdict::LookupError("directory unavailable".to_string())),
        ]);
        let text = format_report(&r);
        assert!(text.contains("Error checking oops: directory unavailable"));
        assert!(text.ends_with("Summary:\nRegistered: 1\nNot Registered: 0"));
    }

    #[test]
    fn report_is_deterministic() {
        let r = result(&[("1", Verdict::Registered)]);
        assert_eq!(format_report(&r), format_report(&r));
    }

    #[test]
    fn empty_batch_still_renders_a_summary() {
        let text = format_report(&BatchResult::default());
        assert!(text.contains("Registered: 0\nNot Registered: 0"));
    }

    #[test]
    fn grouped_report_joins_numbers_and_falls_back_to_none() {
        let r = result(&[
            ("1", Verdict::Registered),
            ("2", Verdict::Registered),
            ("3", Verdict::NotRegistered),
        ]);
        assert_eq!(
            format_grouped_report(&r),
            "Registered Numbers: 1,2\nNot Registered Numbers: 3"
        );

        let empty = format_grouped_report(&BatchResult::default());
        assert_eq!(
            empty,
            "Registered Numbers: None\nNot Registered Numbers: None"
        );
    }
}
