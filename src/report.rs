use crate::Console;

/// Scenario results in the order they were run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    results: Vec<(String, bool)>,
}

impl Report {
    pub fn record(&mut self, name: &str, passed: bool) {
        self.results.push((name.to_owned(), passed));
    }

    pub fn results(&self) -> impl Iterator<Item = (&str, bool)> + '_ {
        self.results.iter().map(|(name, passed)| (name.as_str(), *passed))
    }

    /// Result of the scenario called `name`, if it was run
    pub fn get(&self, name: &str) -> Option<bool> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, passed)| *passed)
    }

    pub fn passed(&self) -> usize {
        self.results.iter().filter(|(_, passed)| *passed).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|(_, passed)| *passed)
    }

    /// `0` if every scenario passed, `1` otherwise
    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }

    pub fn print_summary(&self, console: &Console) {
        console.banner("TEST SUMMARY");
        for (name, passed) in self.results() {
            console.summary_row(name, passed);
        }
        console.rule();
        println!("Total: {}/{} tests passed", self.passed(), self.total());
        console.verdict(self.all_passed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_is_zero_only_when_everything_passed() {
        let mut report = Report::default();
        assert_eq!(report.exit_code(), 0);

        report.record("Time Sync", true);
        report.record("Brightness", true);
        assert_eq!(report.exit_code(), 0);

        report.record("Alarms", false);
        assert_eq!(report.exit_code(), 1);
        assert_eq!((report.passed(), report.total()), (2, 3));
    }

    #[test]
    fn keeps_run_order() {
        let mut report = Report::default();
        report.record("Music", false);
        report.record("Alarms", true);
        let names: Vec<_> = report.results().map(|(n, _)| n).collect();
        assert_eq!(names, ["Music", "Alarms"]);
        assert_eq!(report.get("Music"), Some(false));
        assert_eq!(report.get("Time Sync"), None);
    }
}
