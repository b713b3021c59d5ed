//! Message script: the lines the player types, one message per line.

use std::path::Path;

/// Ordered messages, fixed once loaded.
#[derive(Debug, Clone, Default)]
pub struct MessageScript {
    messages: Vec<String>,
}

impl MessageScript {
    /// Read the script at `path`. An unreadable file is not fatal: the script
    /// is empty and play stops after the opening word.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => {
                let script = Self::from_text(&text);
                log::info!("Loaded {} messages from {:?}", script.len(), path);
                script
            }
            Err(e) => {
                log::warn!("Could not read script {:?}: {}", path, e);
                Self::default()
            }
        }
    }

    /// Blank lines are kept as empty messages.
    pub fn from_text(text: &str) -> Self {
        Self {
            messages: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.messages.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }
}

/// Split a message into words on single spaces.
///
/// Runs of spaces produce empty words between them; a lone trailing space
/// does not add an empty word, and an empty line has no words at all.
pub fn split_on_space(line: &str) -> Vec<String> {
    if line.is_empty() {
        return Vec::new();
    }
    let mut words: Vec<String> = line.split(' ').map(str::to_string).collect();
    if line.ends_with(' ') {
        words.pop();
    }
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_preserved() {
        let script = MessageScript::from_text("HELLO\n\nGO HOME\n");
        assert_eq!(script.messages(), ["HELLO", "", "GO HOME"]);
        assert_eq!(script.get(1), Some(""));
        assert_eq!(script.get(3), None);
    }

    #[test]
    fn crlf_line_endings() {
        let script = MessageScript::from_text("A B\r\nC\r\n");
        assert_eq!(script.messages(), ["A B", "C"]);
    }

    #[test]
    fn missing_file_gives_empty_script() {
        let script = MessageScript::load(Path::new("definitely/not/here/message.txt"));
        assert!(script.messages().is_empty());
    }

    #[test]
    fn split_words() {
        assert_eq!(split_on_space("GO CAT"), ["GO", "CAT"]);
        assert_eq!(split_on_space("WORD"), ["WORD"]);
        assert!(split_on_space("").is_empty());
    }

    #[test]
    fn split_keeps_inner_empty_words_but_not_trailing() {
        assert_eq!(split_on_space("A  B"), ["A", "", "B"]);
        assert_eq!(split_on_space(" A"), ["", "A"]);
        assert_eq!(split_on_space("A "), ["A"]);
        assert_eq!(split_on_space(" "), [""]);
    }
}
