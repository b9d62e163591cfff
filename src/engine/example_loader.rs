use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::ChatError;

pub const RULE_FILE_SUFFIX: &str = "rules.toml";
pub const COMMENT_MARKER: char = '#';

/// Concatenates every `*rules.toml` under `root`, comment lines stripped,
/// each block tagged with its path. Order follows the directory walk.
pub fn gather_examples(root: &Path) -> Result<String, ChatError> {
    let mut examples = String::new();

    for entry in WalkDir::new(root) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let is_rule_file = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(RULE_FILE_SUFFIX));
        if !is_rule_file {
            continue;
        }

        let path = entry.path();
        let contents = fs::read_to_string(path).map_err(|source| ChatError::Examples {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Including example rules from {}", path.display());
        push_example(&mut examples, path, &contents);
    }

    Ok(examples)
}

fn push_example(out: &mut String, path: &Path, contents: &str) {
    out.push_str(&format!(
        "<file_name_start> {} <file_name_end>\n",
        path.display()
    ));
    out.push_str("```toml ");
    out.push_str(&strip_comments(contents));
    out.push_str("```\n");
}

pub fn strip_comments(contents: &str) -> String {
    contents
        .split('\n')
        .filter(|line| !line.starts_with(COMMENT_MARKER))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_only_lines_starting_with_marker() {
        let stripped = strip_comments("# header\nname = \"x\"\n  # indented stays\nquery = \"#\"");
        assert_eq!(stripped, "name = \"x\"\n  # indented stays\nquery = \"#\"");
    }

    #[test]
    fn includes_only_rule_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(
            dir.path().join("a/rules.toml"),
            "# drop me\n[[rules]]\n",
        )
        .unwrap();
        fs::write(dir.path().join("b/notes.txt"), "not a rule").unwrap();

        let examples = gather_examples(dir.path()).unwrap();
        let rule_path = dir.path().join("a/rules.toml");

        assert_eq!(
            examples,
            format!(
                "<file_name_start> {} <file_name_end>\n```toml [[rules]]\n```\n",
                rule_path.display()
            )
        );
        assert!(!examples.contains("drop me"));
        assert!(!examples.contains("not a rule"));
    }

    #[test]
    fn matches_suffix_not_exact_name() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("java_rules.toml"), "x = 1").unwrap();
        fs::write(dir.path().join("rules.toml.bak"), "y = 2").unwrap();

        let examples = gather_examples(dir.path()).unwrap();
        assert!(examples.contains("java_rules.toml"));
        assert!(examples.contains("x = 1"));
        assert!(!examples.contains("y = 2"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = gather_examples(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ChatError::Walk(_)));
    }

    #[test]
    fn unreadable_rule_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("rules.toml"), [0xff, 0xfe, 0x00]).unwrap();

        let err = gather_examples(dir.path()).unwrap_err();
        assert!(matches!(err, ChatError::Examples { .. }));
    }
}
