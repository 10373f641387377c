use std::collections::HashMap;

/// Snapshot of the variables the interpreter consults.
///
/// Built-ins read from here instead of the live process environment so they
/// can be exercised with a fixed `HOME`.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    vars: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            // Non-UTF-8 entries are skipped.
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    pub fn empty() -> Self {
        Environment { vars: HashMap::new() }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: &str, value: &str) {
        self.vars.insert(key.to_string(), value.to_string());
    }

    pub fn home(&self) -> Option<&str> {
        self.get("HOME")
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::new()
    }
}
