//! npm command discovery
//!
//! Parses the command list out of `npm help` so that typos are caught
//! before the (potentially slow) dependency listing runs.

use std::sync::OnceLock;

use regex::Regex;

/// Heading that precedes the command list in `npm help`
const COMMANDS_HEADING: &str = "All commands:";

fn command_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("static regex"))
}

/// Extract command names from `npm help` output
///
/// npm prints the list as comma-separated, indented lines below an
/// "All commands:" heading, terminated by the next blank line.
pub fn parse_available_commands(help: &str) -> Vec<String> {
    let name_pattern = command_name_pattern();
    let mut commands = Vec::new();
    let mut in_list = false;

    for line in help.lines() {
        let trimmed = line.trim();

        if !in_list {
            in_list = trimmed.starts_with(COMMANDS_HEADING);
            continue;
        }

        if trimmed.is_empty() {
            if commands.is_empty() {
                continue;
            }
            break;
        }

        commands.extend(
            trimmed
                .split(',')
                .map(str::trim)
                .filter(|name| name_pattern.is_match(name))
                .map(ToString::to_string),
        );
    }

    commands
}

/// Display form of `<command> <args...>`
pub fn command_line(command: &str, arguments: &[String]) -> String {
    std::iter::once(command)
        .chain(arguments.iter().map(String::as_str))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
