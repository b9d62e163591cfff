use std::collections::HashMap;

use crate::engine::prompt_text::{EXPLANATION, INPUT_TEMPLATE};
use crate::error::ConfigError;

/// Holes the task template cannot be rendered without.
pub const REQUIRED_HOLES: [&str; 5] = ["source_code", "source_tree", "target_tree", "diff", "hints"];

/// Builds the first user message of a refinement session.
/// Only formats text: the example corpus is handed in already gathered.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Renders the task section. Fails on the first hole without a value;
    /// extra entries in `holes` are ignored.
    pub fn task(holes: &HashMap<String, String>) -> Result<String, ConfigError> {
        fill_template(INPUT_TEMPLATE, holes)
    }

    pub fn assemble(examples: &str, task: &str) -> String {
        let mut prompt = String::with_capacity(EXPLANATION.len() + examples.len() + task.len() + 2);

        prompt.push_str(EXPLANATION);
        prompt.push('\n');
        prompt.push_str(examples);
        prompt.push('\n');
        prompt.push_str(task);

        prompt
    }

    pub fn build(examples: &str, holes: &HashMap<String, String>) -> Result<String, ConfigError> {
        let task = Self::task(holes)?;
        Ok(Self::assemble(examples, &task))
    }
}

/// Replaces every `{name}` in `template` with `holes[name]`.
/// `{{` and `}}` produce literal braces.
pub fn fill_template(template: &str, holes: &HashMap<String, String>) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            offset += pos + 2;
            continue;
        }

        if tail.starts_with('}') {
            // stray closer, kept as-is
            out.push('}');
            rest = &tail[1..];
            offset += pos + 1;
            continue;
        }

        let Some(end) = tail.find('}') else {
            return Err(ConfigError::UnterminatedPlaceholder(offset + pos));
        };

        let name = &tail[1..end];
        let value = holes
            .get(name)
            .ok_or_else(|| ConfigError::MissingHole(name.to_string()))?;
        out.push_str(value);

        rest = &tail[end + 1..];
        offset += pos + end + 1;
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_holes() -> HashMap<String, String> {
        REQUIRED_HOLES
            .iter()
            .map(|name| (name.to_string(), format!("<<{}>>", name.to_uppercase())))
            .collect()
    }

    #[test]
    fn prompt_orders_explanation_examples_task() {
        let prompt = PromptBuilder::build("EXAMPLE CORPUS", &full_holes()).unwrap();

        let explanation_at = prompt.find("Polyglot Piranha").unwrap();
        let examples_at = prompt.find("EXAMPLE CORPUS").unwrap();
        let mut last = examples_at;
        assert!(explanation_at < examples_at);

        for name in REQUIRED_HOLES {
            let at = prompt.find(&format!("<<{}>>", name.to_uppercase())).unwrap();
            assert!(at > last, "{name} out of order");
            last = at;
        }

        assert!(prompt.starts_with(EXPLANATION));
        assert!(!prompt.contains("{source_code}"));
    }

    #[test]
    fn missing_hole_is_reported_by_name() {
        let mut holes = full_holes();
        holes.remove("target_tree");

        let err = PromptBuilder::task(&holes).unwrap_err();
        assert_eq!(err, ConfigError::MissingHole("target_tree".into()));
    }

    #[test]
    fn unused_holes_are_ignored() {
        let mut holes = full_holes();
        holes.insert("language".into(), "java".into());

        let task = PromptBuilder::task(&holes).unwrap();
        assert!(!task.contains("java"));
    }

    #[test]
    fn values_are_not_rescanned_for_placeholders() {
        let holes = HashMap::from([("a".to_string(), "{b}".to_string())]);
        assert_eq!(fill_template("x {a} y", &holes).unwrap(), "x {b} y");
    }

    #[test]
    fn doubled_braces_are_literal() {
        let holes = HashMap::from([("n".to_string(), "1".to_string())]);
        assert_eq!(fill_template("{{n}} = {n}", &holes).unwrap(), "{n} = 1");
    }

    #[test]
    fn unterminated_placeholder_is_rejected() {
        let err = fill_template("ok {oops", &HashMap::new()).unwrap_err();
        assert_eq!(err, ConfigError::UnterminatedPlaceholder(3));
    }
}
