use std::io::{self, IsTerminal, Read};

use crate::errors::CliError;

/// Output format for list/search commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Plain,
}

/// Parse output format string.
pub fn parse_output_format(value: Option<&str>) -> anyhow::Result<Option<OutputFormat>> {
    match value {
        None => Ok(None),
        Some("table") => Ok(Some(OutputFormat::Table)),
        Some("plain") => Ok(Some(OutputFormat::Plain)),
        Some(other) => Err(CliError::invalid_input(format!(
            "Unsupported format: {} (use table or plain)",
            other
        ))
        .into()),
    }
}

/// Read entry content from the --content flag or piped stdin.
pub fn read_entry_content(content: Option<String>) -> anyhow::Result<String> {
    if let Some(value) = content {
        return Ok(value);
    }

    if io::stdin().is_terminal() {
        return Err(CliError::invalid_input(
            "No content given; use --content or pipe the body via stdin",
        )
        .into());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .map_err(|e| anyhow::anyhow!("Failed to read stdin: {}", e))?;
    Ok(buffer.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format(None).unwrap(), None);
        assert_eq!(
            parse_output_format(Some("table")).unwrap(),
            Some(OutputFormat::Table)
        );
        assert_eq!(
            parse_output_format(Some("plain")).unwrap(),
            Some(OutputFormat::Plain)
        );
        assert!(parse_output_format(Some("yaml")).is_err());
    }

    #[test]
    fn test_explicit_content_is_used_verbatim() {
        assert_eq!(
            read_entry_content(Some("  body  ".to_string())).unwrap(),
            "  body  "
        );
    }
}
