/// Tests for the narrative renderer
#[cfg(test)]
mod tests {
    use crate::render::{RenderOptions, bug_count, render, render_with};
    use crate::types::TesterSummary;

    fn summary(id: u64, name: &str, devices: &[(&str, usize)]) -> TesterSummary {
        let mut s = TesterSummary::new(id, name);
        for (device, count) in devices {
            for _ in 0..*count {
                s.record(device);
            }
        }
        s
    }

    /// The Bautista / Lubavin / Rutkin fixture: two testers with bugs, one without
    fn fixture() -> Vec<TesterSummary> {
        vec![
            summary(1, "Miguel Bautista", &[("Galaxy S4", 2), ("Galaxy S5", 1), ("iPhone 5", 1)]),
            summary(2, "Michael Lubavin", &[("Galaxy S4", 1)]),
            summary(3, "Taybin Rutkin", &[]),
        ]
    }

    #[test]
    fn test_bug_count_pluralization() {
        assert_eq!(bug_count(0), "0 bugs");
        assert_eq!(bug_count(1), "1 bug");
        assert_eq!(bug_count(2), "2 bugs");
        assert_eq!(bug_count(30), "30 bugs");
    }

    #[test]
    fn test_fixture_matches_section() {
        let sections = render(&fixture());
        assert_eq!(sections.matches.header, "Matches:");
        assert_eq!(sections.matches.text, "3 testers (Miguel Bautista and Michael Lubavin and Taybin Rutkin)");
    }

    #[test]
    fn test_fixture_body_section() {
        let sections = render(&fixture());
        assert_eq!(sections.body.header, "");
        assert_eq!(
            sections.body.text,
            "Miguel Bautista filed 2 bugs for Galaxy S4 and 1 bug for Galaxy S5 and 1 bug for iPhone 5.<br>\
             4 bugs filed for devices in search.<br>\
             Michael Lubavin filed 1 bug for Galaxy S4.<br>\
             1 bugs filed for devices in search.<br>\
             Taybin Rutkin filed 0 bugs.<br>\
             0 bugs filed for devices in search.<br>"
        );
    }

    #[test]
    fn test_fixture_results_section() {
        let sections = render(&fixture());
        assert_eq!(sections.results.header, "Results:");
        assert_eq!(sections.results.text, "Miguel Bautista, Michael Lubavin, Taybin Rutkin");
    }

    #[test]
    fn test_single_tester_stays_plural() {
        let sections = render(&[summary(6, "Stanley Chen", &[("iPhone 5", 110)])]);
        assert_eq!(sections.matches.text, "1 testers (Stanley Chen)");
        assert_eq!(sections.results.text, "Stanley Chen");
    }

    #[test]
    fn test_no_testers() {
        let sections = render(&[]);
        assert_eq!(sections.matches.text, "0 testers ()");
        assert_eq!(sections.body.text, "");
        assert_eq!(sections.results.text, "");
    }

    #[test]
    fn test_explicit_zero_device_count_is_plural() {
        let mut s = TesterSummary::new(4, "Lucas Lowry");
        s.per_device_counts.insert("Droid Razor".to_string(), 0);
        let sections = render(&[s]);
        assert!(sections.body.text.starts_with("Lucas Lowry filed 0 bugs for Droid Razor.<br>"));
    }

    #[test]
    fn test_custom_line_break() {
        let options = RenderOptions { line_break: "\n".to_string() };
        let sections = render_with(&[summary(2, "Michael Lubavin", &[("Galaxy S4", 1)])], &options);
        assert_eq!(
            sections.body.text,
            "Michael Lubavin filed 1 bug for Galaxy S4.\n1 bugs filed for devices in search.\n"
        );
    }
}
