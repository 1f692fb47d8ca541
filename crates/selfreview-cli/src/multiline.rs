//! Multi-line terminal input.
//!
//! Two shapes: a form answer is a block of lines closed by an empty line,
//! and a REPL entry continues onto the next line while the current one
//! ends in `\`.

/// Lines of a form answer, closed by the first empty line.
#[derive(Debug, Default)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    /// Add one physical line. Returns `false` once the block is closed.
    pub fn push(&mut self, line: &str) -> bool {
        if line.trim().is_empty() {
            return false;
        }
        self.lines.push(line.trim_end().to_string());
        true
    }

    pub fn finish(self) -> String {
        self.lines.join("\n")
    }
}

/// Append one physical line to a REPL entry. Returns `true` when the
/// line ended in `\` and the entry continues on the next line.
pub fn continue_entry(entry: &mut String, line: &str) -> bool {
    match line.strip_suffix('\\') {
        Some(head) => {
            entry.push_str(head);
            entry.push('\n');
            true
        }
        None => {
            entry.push_str(line);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_joins_until_empty_line() {
        let mut block = Block::default();
        assert!(block.push("Q1: Software Delivery (Rating 5)"));
        assert!(block.push("Q2: Collaboration (Rating 4)   "));
        assert!(!block.push("   "));
        assert_eq!(
            block.finish(),
            "Q1: Software Delivery (Rating 5)\nQ2: Collaboration (Rating 4)"
        );
    }

    #[test]
    fn empty_first_line_gives_empty_answer() {
        let mut block = Block::default();
        assert!(!block.push(""));
        assert_eq!(block.finish(), "");
    }

    #[test]
    fn backslash_continues_entry() {
        let mut entry = String::new();
        assert!(continue_entry(&mut entry, "Rewrite Q1 so that:\\"));
        assert!(continue_entry(&mut entry, "- it uses SBI\\"));
        assert!(!continue_entry(&mut entry, "- it stays short"));
        assert_eq!(entry, "Rewrite Q1 so that:\n- it uses SBI\n- it stays short");
    }

    #[test]
    fn plain_line_is_single_entry() {
        let mut entry = String::new();
        assert!(!continue_entry(&mut entry, "Make it shorter"));
        assert_eq!(entry, "Make it shorter");
    }
}
