/// Instructions advertised to the MCP client during initialization.
pub fn get_server_instructions() -> String {
    "This server bridges tool calls into a running Adobe Illustrator instance on macOS.

Available tools:
- `view`: returns a screenshot of the Illustrator window.
- `run`: executes ExtendScript/JavaScript code inside Illustrator.

When using `run`, never call `alert()` or `$.writeln()` for debugging; \
both can block the host with a dialog. Call `log(message)` instead. A \
`log()` function is injected around your code and every logged line is \
returned in the tool output.

Invocations are processed one at a time; a long-running script holds \
the bridge until Illustrator finishes it."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instructions_state_the_logging_contract() {
        let instructions = get_server_instructions();
        assert!(instructions.contains("log(message)"));
        assert!(instructions.contains("alert()"));
    }
}
