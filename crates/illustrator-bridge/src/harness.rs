//! Wraps caller-supplied ExtendScript in a non-interactive logging
//! harness.
//!
//! Illustrator's `do javascript` call returns the value of the last
//! expression in the script, and that single string is the only channel
//! back to AppleScript. The harness redefines `log()` to accumulate
//! lines instead of raising UI, and ends with a join expression so the
//! collected output becomes that return value. Callers must not invoke
//! `alert()` or `$.writeln()` directly; that obligation is documented
//! in the tool description, not enforced here.

/// Wrap `code` with the log accumulator and the output-join convention.
///
/// Deterministic: identical input yields byte-identical output, so a
/// wrapped script can be cached or compared safely.
///
/// Dialog suppression via `userInteractionLevel` is best effort; some
/// Illustrator versions ignore it and a modal dialog raised by caller
/// code can still block the host.
pub fn wrap(code: &str) -> String {
    format!(
        r#"var __log_lines = [];
var log = function (message) {{
    __log_lines.push(message);
}};

app.userInteractionLevel = UserInteractionLevel.DONTDISPLAYALERTS;

{code}

// The last expression becomes the value returned to AppleScript.
__log_lines.join("\n");
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapped_script_contains_caller_code_verbatim() {
        let code = "var doc = app.activeDocument;\nlog(doc.name);";
        let wrapped = wrap(code);
        assert!(wrapped.contains(code));
    }

    #[test]
    fn wrapped_script_defines_log_before_caller_code() {
        let wrapped = wrap("log('hi')");
        let log_def = wrapped.find("var log = function").unwrap();
        let caller = wrapped.find("log('hi')").unwrap();
        assert!(log_def < caller);
    }

    #[test]
    fn wrapped_script_ends_with_join_expression() {
        let wrapped = wrap("1 + 1;");
        assert!(wrapped.trim_end().ends_with(r#"__log_lines.join("\n");"#));
    }

    #[test]
    fn wrap_is_deterministic() {
        let code = "log(\"quotes \\\" and\nnewlines\");";
        assert_eq!(wrap(code), wrap(code));
    }

    #[test]
    fn wrap_attempts_dialog_suppression() {
        let wrapped = wrap("");
        assert!(wrapped.contains("UserInteractionLevel.DONTDISPLAYALERTS"));
    }
}
