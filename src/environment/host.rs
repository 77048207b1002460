//! Snapshot of host environment variables.

use std::collections::BTreeMap;

/// Read-only view of environment variables with case-insensitive names.
///
/// Hosts disagree on casing (`PATH` vs `Path` on Windows), so names are
/// folded to lowercase. When two spellings collide the all-uppercase one
/// wins.
///
/// # Example
///
/// ```
/// use zephir_installer::environment::HostEnv;
///
/// let env = HostEnv::from_pairs([("Path", "/usr/bin")]);
/// assert_eq!(env.get("PATH"), Some("/usr/bin"));
/// assert_eq!(env.get("path"), Some("/usr/bin"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostEnv {
    vars: BTreeMap<String, (String, String)>,
}

impl HostEnv {
    /// Capture the current process environment.
    ///
    /// Variables whose name or value is not valid Unicode are skipped.
    pub fn from_process() -> Self {
        Self::from_pairs(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Build from explicit name/value pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut vars: BTreeMap<String, (String, String)> = BTreeMap::new();
        for (name, value) in pairs {
            let name = name.into();
            let key = name.to_lowercase();
            let replace = match vars.get(&key) {
                Some((existing, _)) => {
                    existing != &existing.to_uppercase() && name == name.to_uppercase()
                }
                None => true,
            };
            if replace {
                vars.insert(key, (name, value.into()));
            }
        }
        Self { vars }
    }

    /// Look up a variable by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(&name.to_lowercase())
            .map(|(_, value)| value.as_str())
    }
}
