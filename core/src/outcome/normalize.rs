use crate::error::ParseError;

const MARKER_PREFIXES: [&str; 3] = ["METADATA", "START", "END"];

/// How the result lines are picked out of one invocation's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Only the last non-empty line counts; earlier lines are program chatter.
    #[default]
    LastLine,
    /// Every line except `METADATA`/`START`/`END` markers is a result (one per shot).
    Annotated,
}

/// Normalizes a single line into a canonical label.
///
/// `Zero`/`One` on their own become `|0⟩`/`|1⟩`; tuples and arrays such as `(Zero, One)` or
/// `[Zero, One]` collapse into `|01⟩`.
pub fn normalize_line(line: &str) -> String {
    let line = line.trim();
    match line {
        "Zero" => return "|0⟩".to_string(),
        "One" => return "|1⟩".to_string(),
        _ => {}
    }

    let mut out = String::with_capacity(line.len() + 2);
    for ch in line.chars() {
        match ch {
            '(' | '[' => out.push('|'),
            ')' | ']' => out.push('⟩'),
            ' ' | ',' => {}
            c => out.push(c),
        }
    }
    out.replace("Zero", "0").replace("One", "1")
}

pub fn is_marker_line(line: &str) -> bool {
    MARKER_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Extracts the labels contained in `raw` according to `mode`.
///
/// Returns `ParseError::EmptyOutput` when there is no result line at all; callers treat that as
/// "no outcome" for the shot.
pub fn sanitize_output(raw: &str, mode: OutputMode) -> Result<Vec<String>, ParseError> {
    let labels: Vec<String> = match mode {
        OutputMode::LastLine => raw
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .map(normalize_line)
            .into_iter()
            .collect(),
        OutputMode::Annotated => raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !is_marker_line(l))
            .map(normalize_line)
            .collect(),
    };

    if labels.is_empty() {
        return Err(ParseError::EmptyOutput);
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_qsharp_output() {
        let cases = [
            ("Zero", "|0⟩"),
            ("One", "|1⟩"),
            ("(Zero, One)", "|01⟩"),
            ("[Zero, One]", "|01⟩"),
            ("(Zero, One, One)", "|011⟩"),
            ("[Zero, One, One]", "|011⟩"),
        ];
        for (input, expected) in cases {
            assert_eq!(normalize_line(input), expected, "input: {input}");
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(normalize_line("  One \r"), "|1⟩");
        assert_eq!(normalize_line("\t(Zero,  Zero)  "), "|00⟩");
    }

    #[test]
    fn canonical_labels_are_fixed_points() {
        for label in ["|0⟩", "|1⟩", "|01⟩", "|0110⟩", "42", "True"] {
            assert_eq!(normalize_line(label), label);
            assert_eq!(normalize_line(&normalize_line(label)), normalize_line(label));
        }
    }

    #[test]
    fn distinct_results_stay_distinct() {
        let a = normalize_line("(Zero, One)");
        let b = normalize_line("(One, Zero)");
        let c = normalize_line("(Zero, One, Zero)");
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn line_normalizing_to_empty_is_kept() {
        let labels = sanitize_output("chatter\n , ,", OutputMode::LastLine).unwrap();
        assert_eq!(labels, vec![String::new()]);
    }

    #[test]
    fn last_line_mode_skips_program_chatter() {
        let raw = "Allocating qubits\nMeasuring...\n(Zero, One)\n\n";
        let labels = sanitize_output(raw, OutputMode::LastLine).unwrap();
        assert_eq!(labels, vec!["|01⟩".to_string()]);
    }

    #[test]
    fn crlf_output_is_handled() {
        let labels = sanitize_output("hello\r\nOne\r\n", OutputMode::LastLine).unwrap();
        assert_eq!(labels, vec!["|1⟩".to_string()]);
    }

    #[test]
    fn empty_output_yields_no_label() {
        for raw in ["", "   ", "\n\n \t\n"] {
            assert!(matches!(
                sanitize_output(raw, OutputMode::LastLine),
                Err(ParseError::EmptyOutput)
            ));
            assert!(matches!(
                sanitize_output(raw, OutputMode::Annotated),
                Err(ParseError::EmptyOutput)
            ));
        }
    }

    #[test]
    fn annotated_mode_drops_markers_and_keeps_order() {
        let raw = "METADATA x\nSTART\nZero\n(One, Zero)\nOne\nEND\n";
        let labels = sanitize_output(raw, OutputMode::Annotated).unwrap();
        assert_eq!(labels, vec!["|0⟩", "|10⟩", "|1⟩"]);
    }

    #[test]
    fn annotated_mode_with_repeated_shot_blocks() {
        let raw = "METADATA\tEntryPoint\nSTART\nOne\nEND\t0\nSTART\nZero\nEND\t0\n";
        let labels = sanitize_output(raw, OutputMode::Annotated).unwrap();
        assert_eq!(labels, vec!["|1⟩", "|0⟩"]);
    }

    #[test]
    fn annotated_output_of_only_markers_is_empty() {
        let raw = "METADATA x\nSTART\nEND\n";
        assert!(matches!(
            sanitize_output(raw, OutputMode::Annotated),
            Err(ParseError::EmptyOutput)
        ));
    }
}
