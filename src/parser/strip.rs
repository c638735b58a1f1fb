//! Preprocessing of raw editor text: comments, blank lines and indentation.

/// A non-blank script line after comment removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number in the original text.
    pub number: usize,
    /// Indentation width (space = 1, tab = 4).
    pub indent: usize,
    /// Line content without indentation, comment or trailing whitespace.
    pub text: String,
}

const TAB_WIDTH: usize = 4;

/// Strip `;` comments and blank lines, keeping original line numbers.
///
/// Square brackets are left in place here; the command-line splitter needs
/// them to keep `X[10 * i]` together before they are dropped.
pub fn strip_script(script: &str) -> Vec<SourceLine> {
    script
        .lines()
        .enumerate()
        .filter_map(|(idx, raw)| {
            let code = match raw.find(';') {
                Some(pos) => &raw[..pos],
                None => raw,
            };
            let code = code.trim_end();
            if code.trim().is_empty() {
                return None;
            }
            let indent = code
                .chars()
                .take_while(|c| *c == ' ' || *c == '\t')
                .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
                .sum();
            Some(SourceLine {
                number: idx + 1,
                indent,
                text: code.trim_start().to_string(),
            })
        })
        .collect()
}

/// Remove `[`/`]` grouping sugar.
pub fn strip_brackets(s: &str) -> String {
    s.chars().filter(|c| *c != '[' && *c != ']').collect()
}

/// Split a command line into words, keeping bracketed groups intact.
///
/// `G01 X[10 * i] Y5` → `["G01", "X[10 * i]", "Y5"]`. Returns `None` when
/// the brackets do not balance.
pub fn split_words(line: &str) -> Option<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut depth: usize = 0;
    for c in line.chars() {
        match c {
            '[' => {
                depth += 1;
                current.push(c);
            }
            ']' => {
                depth = depth.checked_sub(1)?;
                current.push(c);
            }
            c if c.is_whitespace() && depth == 0 => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }
    if depth != 0 {
        return None;
    }
    if !current.is_empty() {
        words.push(current);
    }
    Some(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_original_line_numbers() {
        let lines = strip_script("; header\n\nG21\n  x = 1 ; note\n   \t\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].number, 3);
        assert_eq!(lines[0].text, "G21");
        assert_eq!(lines[1].number, 4);
        assert_eq!(lines[1].indent, 2);
        assert_eq!(lines[1].text, "x = 1");
    }

    #[test]
    fn tabs_count_as_four() {
        let lines = strip_script("\t G01 X1");
        assert_eq!(lines[0].indent, 5);
    }

    #[test]
    fn brackets_group_words() {
        let words = split_words("G01 X[10 * cos(i)]  Y[ j ] Z3").unwrap();
        assert_eq!(words, vec!["G01", "X[10 * cos(i)]", "Y[ j ]", "Z3"]);
        assert!(split_words("G01 X[1").is_none());
        assert!(split_words("G01 X1]").is_none());
        assert_eq!(strip_brackets("X[10 * i]"), "X10 * i");
    }
}
