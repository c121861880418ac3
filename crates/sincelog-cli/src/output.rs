use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

/// Lines to print for a failed command: the error itself, then any
/// detail messages carried by an engine error in its chain.
pub fn error_lines(err: &anyhow::Error) -> Vec<String> {
    let mut lines = vec![err.to_string()];

    if let Some(engine_err) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<sincelog_engine::Error>())
    {
        lines.extend(engine_err.messages().iter().cloned());
    }

    lines
}

pub fn print_error(err: &anyhow::Error) {
    let colored = std::io::stderr().is_terminal();

    for line in error_lines(err) {
        if colored {
            eprintln!("{} {}", "Error:".red().bold(), line);
        } else {
            eprintln!("Error: {}", line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_error_lists_every_message() {
        let err = anyhow::Error::new(sincelog_engine::Error::CurrentVersion(vec![
            "No imported version recorded".to_string(),
            "pass <version> explicitly".to_string(),
        ]));

        assert_eq!(
            error_lines(&err),
            vec![
                "Couldn't get current version",
                "No imported version recorded",
                "pass <version> explicitly",
            ]
        );
    }

    #[test]
    fn test_plain_error_is_one_line() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(error_lines(&err), vec!["boom"]);
    }
}
