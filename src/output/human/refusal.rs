// Human REFUSAL output formatting

use crate::refusal::codes::RefusalCode;

#[derive(Debug)]
pub struct RefusalBody<'a> {
    pub code: RefusalCode,
    pub message: &'a str,
    pub report_name: &'a str,
}

pub fn render_refusal_body(ctx: &RefusalBody<'_>) -> Vec<String> {
    vec![
        "Cannot analyze the report.".to_string(),
        format!("Reason ({}): {}.", ctx.code, ctx.code.reason()),
        format!("Detail: {}.", ctx.message.trim_end_matches('.')),
        format!("Next: {}", next_step(ctx.code, ctx.report_name)),
    ]
}

fn next_step(code: RefusalCode, report_name: &str) -> String {
    match code {
        RefusalCode::Io => format!("check that {report_name} exists and is readable."),
        RefusalCode::Encoding => {
            "export the report as UTF-8 text; binary coverage databases are not read.".to_string()
        }
        RefusalCode::Empty => "pass a report that contains coverage data.".to_string(),
        RefusalCode::NoDesign => "add a `Design: <name>` line to the report.".to_string(),
        RefusalCode::DupName => {
            "rename or merge the duplicated scope so every bin has a unique path.".to_string()
        }
        RefusalCode::Weights => {
            "pass three non-negative --weights whose sum is greater than 0.".to_string()
        }
        RefusalCode::Policy => "fix the named field in the --policy file.".to_string(),
        RefusalCode::Suggestions => {
            "pass a --suggestions file holding a JSON array of suggestions.".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_missing_design() {
        let lines = render_refusal_body(&RefusalBody {
            code: RefusalCode::NoDesign,
            message: "report has no Design: line",
            report_name: "cov.txt",
        });
        assert_eq!(lines[0], "Cannot analyze the report.");
        assert_eq!(lines[1], "Reason (E_NO_DESIGN): no Design: header found.");
        assert_eq!(lines[2], "Detail: report has no Design: line.");
        assert_eq!(lines[3], "Next: add a `Design: <name>` line to the report.");
    }

    #[test]
    fn io_hint_names_the_report() {
        let lines = render_refusal_body(&RefusalBody {
            code: RefusalCode::Io,
            message: "No such file or directory (os error 2)",
            report_name: "missing.txt",
        });
        assert_eq!(lines[3], "Next: check that missing.txt exists and is readable.");
    }
}
