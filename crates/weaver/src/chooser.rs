//! Terminal stand-in for the interactive window chooser.

use std::io::{self, BufRead, Write};

use mac_winops::AppInfo;
use tracing::debug;
use weaver_engine::Chooser;

/// Lists candidates on stderr and reads a number from stdin.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalChooser;

impl Chooser for TerminalChooser {
    fn choose(&self, apps: &[AppInfo]) -> Option<usize> {
        let stdin = io::stdin();
        let stderr = io::stderr();
        prompt(apps, &mut stdin.lock(), &mut stderr.lock())
    }
}

/// Show `apps` on `output` and read the operator's answer from `input`.
///
/// Empty input, `q`, end of input, or anything that is not a listed index
/// cancels.
pub fn prompt(apps: &[AppInfo], input: &mut impl BufRead, output: &mut impl Write) -> Option<usize> {
    let shown = write_menu(apps, output);
    if let Err(e) = shown {
        debug!("cannot show chooser: {}", e);
        return None;
    }
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => parse_choice(&line, apps.len()),
    }
}

/// Write the numbered candidate list and the prompt.
fn write_menu(apps: &[AppInfo], out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Choose the application to operate on:")?;
    for (i, app) in apps.iter().enumerate() {
        writeln!(out, "  {i}: {app}")?;
    }
    write!(out, "Number (empty or q to cancel): ")?;
    out.flush()
}

/// Interpret one line of operator input.
fn parse_choice(line: &str, count: usize) -> Option<usize> {
    let answer = line.trim();
    if answer.is_empty() || answer.eq_ignore_ascii_case("q") {
        return None;
    }
    answer.parse::<usize>().ok().filter(|i| *i < count)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn apps() -> Vec<AppInfo> {
        vec![
            AppInfo {
                pid: 42,
                name: "Editor".into(),
                bundle_id: None,
            },
            AppInfo {
                pid: 77,
                name: "Mail".into(),
                bundle_id: Some("com.apple.mail".into()),
            },
        ]
    }

    #[test]
    fn lists_candidates_and_reads_index() {
        let mut out = Vec::new();
        let choice = prompt(&apps(), &mut Cursor::new("1\n"), &mut out);
        assert_eq!(choice, Some(1));
        let shown = String::from_utf8(out).unwrap();
        assert!(shown.contains("0: Editor (pid 42)"));
        assert!(shown.contains("1: Mail (pid 77)"));
    }

    #[test]
    fn cancel_inputs() {
        for input in ["\n", "q\n", "Q\n", "7\n", "mail\n", ""] {
            let mut out = Vec::new();
            assert_eq!(prompt(&apps(), &mut Cursor::new(input), &mut out), None, "{input:?}");
        }
    }
}
