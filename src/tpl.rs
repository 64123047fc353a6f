use std::collections::HashMap;

/// Template processor for resolving $VARIABLE format variables
pub struct Tpl {
    variables: HashMap<String, String>,
}

impl Tpl {
    pub fn new() -> Self {
        Self {
            variables: HashMap::new(),
        }
    }

    /// Register a variable with its value
    pub fn register<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.variables.insert(key.into(), value.into());
    }

    /// Resolve all $VARIABLE references, longest names first so that
    /// `$NAME` never clobbers the prefix of `$NAMESPACE`
    pub fn parse(&self, input: &str) -> String {
        let mut keys: Vec<&String> = self.variables.keys().collect();
        keys.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        keys.into_iter().fold(input.to_string(), |result, key| {
            result.replace(&format!("${}", key), &self.variables[key])
        })
    }

    /// Parse a slice of strings
    pub fn parse_vec(&self, input: &[String]) -> Vec<String> {
        input.iter().map(|s| self.parse(s)).collect()
    }
}

impl Default for Tpl {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_path_expansion() {
        let mut tpl = Tpl::new();
        tpl.register("PLATFORM", "darwin");
        tpl.register("ARCH", "arm64");

        let result = tpl.parse("tools/bin/$PLATFORM/$ARCH");
        assert_eq!(result, "tools/bin/darwin/arm64");
    }

    #[test]
    fn test_multiple_occurrences() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "reload");

        let result = tpl.parse("$NAME/$NAME.sln");
        assert_eq!(result, "reload/reload.sln");
    }

    #[test]
    fn test_longest_variable_wins() {
        let mut tpl = Tpl::new();
        tpl.register("ARCH", "arm64");
        tpl.register("ARCHIVE", "zip");

        assert_eq!(tpl.parse("$ARCHIVE-$ARCH"), "zip-arm64");
    }

    #[test]
    fn test_parse_vec() {
        let mut tpl = Tpl::new();
        tpl.register("NAME", "reload");

        let result = tpl.parse_vec(&["$NAME".to_string(), "basic".to_string()]);
        assert_eq!(result, vec!["reload", "basic"]);
    }
}
