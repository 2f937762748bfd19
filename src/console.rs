//! Coloured console output for the person watching the run

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[94m";
const RESET: &str = "\x1b[0m";

const RULE_WIDTH: usize = 60;
const SUMMARY_NAME_WIDTH: usize = 40;

/// Writes `[TEST]`, `[PASS]`, `[FAIL]` and `[INFO]` lines to stdout
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    pub fn test(&self, message: &str) {
        println!("{}", self.tagged(BLUE, "TEST", message));
    }

    pub fn pass(&self, message: &str) {
        println!("{}", self.tagged(GREEN, "PASS", message));
    }

    pub fn fail(&self, message: &str) {
        println!("{}", self.tagged(RED, "FAIL", message));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.tagged(YELLOW, "INFO", message));
    }

    /// A title between two horizontal rules, preceded by a blank line
    pub fn banner(&self, title: &str) {
        println!();
        self.rule();
        println!("{}", title);
        self.rule();
    }

    pub fn rule(&self) {
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    /// One row of the summary table
    pub fn summary_row(&self, name: &str, passed: bool) {
        println!("{}", self.summary_line(name, passed));
    }

    /// The closing line of the summary
    pub fn verdict(&self, all_passed: bool) {
        if all_passed {
            println!("{}", self.paint(GREEN, "\u{2713} ALL TESTS PASSED!"));
        } else {
            println!("{}", self.paint(RED, "\u{2717} SOME TESTS FAILED"));
        }
    }

    fn summary_line(&self, name: &str, passed: bool) -> String {
        let status = if passed {
            self.paint(GREEN, "PASS")
        } else {
            self.paint(RED, "FAIL")
        };
        format!("{:.<width$} {}", name, status, width = SUMMARY_NAME_WIDTH)
    }

    fn tagged(&self, color: &str, tag: &str, message: &str) -> String {
        format!("{} {}", self.paint(color, &format!("[{}]", tag)), message)
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", color, text, RESET)
        } else {
            text.to_owned()
        }
    }
}
