use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

/// Default catalog location, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "firstBoot/gui_options.json";

/// One installable desktop environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GuiOption {
    pub name: String,
    pub repo: String,
    /// Installer script path, relative to the root of the cloned repository.
    pub installer: String,
}

/// GUI options keyed by name, remembering the order they appeared in the file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    order: Vec<String>,
    by_name: HashMap<String, GuiOption>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::parse(&data, path)
    }

    #[cfg(test)]
    pub fn from_json(s: &str) -> Result<Self, ConfigError> {
        Self::parse(s, Path::new("<inline>"))
    }

    fn parse(s: &str, path: &Path) -> Result<Self, ConfigError> {
        let options: Vec<GuiOption> =
            serde_json::from_str(s).map_err(|source| ConfigError::Parse { path: PathBuf::from(path), source })?;
        Ok(options.into_iter().collect())
    }

    pub fn len(&self) -> usize { self.order.len() }

    pub fn is_empty(&self) -> bool { self.order.is_empty() }

    pub fn get(&self, name: &str) -> Option<&GuiOption> { self.by_name.get(name) }

    /// Names in menu order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Options in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &GuiOption> {
        self.order.iter().filter_map(|n| self.by_name.get(n))
    }

    /// The option shown at 1-based menu position `index`, if any.
    pub fn nth(&self, index: usize) -> Option<&GuiOption> {
        index.checked_sub(1).and_then(|i| self.order.get(i)).and_then(|n| self.by_name.get(n))
    }
}

impl FromIterator<GuiOption> for Catalog {
    fn from_iter<I: IntoIterator<Item = GuiOption>>(iter: I) -> Self {
        let mut cat = Catalog::default();
        for opt in iter {
            // Later duplicates win but keep the first one's menu slot
            if cat.get(&opt.name).is_some() {
                log::warn!("duplicate GUI option '{}' in catalog; using the later entry", opt.name);
            } else {
                cat.order.push(opt.name.clone());
            }
            cat.by_name.insert(opt.name.clone(), opt);
        }
        cat
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"[
        {"name": "KDE", "repo": "https://x/kde", "installer": "install.sh"},
        {"name": "XFCE", "repo": "https://x/xfce", "installer": "scripts/setup.sh"},
        {"name": "Sway", "repo": "git@host:sway.git", "installer": "./go"}
    ]"#;

    #[test]
    fn loads_every_entry_verbatim() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gui_options.json");
        fs::write(&path, SAMPLE).unwrap();

        let cat = Catalog::load(&path).unwrap();
        assert_eq!(cat.len(), 3);
        assert_eq!(
            cat.get("XFCE"),
            Some(&GuiOption { name: "XFCE".into(), repo: "https://x/xfce".into(), installer: "scripts/setup.sh".into() })
        );
        assert_eq!(cat.get("Sway").unwrap().repo, "git@host:sway.git");
        assert_eq!(cat.get("Sway").unwrap().installer, "./go");
    }

    #[test]
    fn preserves_file_order() {
        let cat = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(cat.names().collect::<Vec<_>>(), vec!["KDE", "XFCE", "Sway"]);
        assert_eq!(cat.nth(1).unwrap().name, "KDE");
        assert_eq!(cat.nth(3).unwrap().name, "Sway");
        assert!(cat.nth(0).is_none());
        assert!(cat.nth(4).is_none());
    }

    #[test]
    fn missing_file_is_read_error() {
        let temp = TempDir::new().unwrap();
        let err = Catalog::load(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gui_options.json");
        fs::write(&path, "[{\"name\": \"KDE\"").unwrap();
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("gui_options.json"));
    }

    #[test]
    fn missing_field_is_parse_error() {
        let err = Catalog::from_json(r#"[{"name": "KDE", "repo": "https://x/kde"}]"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn object_instead_of_array_is_parse_error() {
        let err = Catalog::from_json(r#"{"name": "KDE", "repo": "r", "installer": "i"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn empty_array_is_an_empty_catalog() {
        let cat = Catalog::from_json("[]").unwrap();
        assert!(cat.is_empty());
        assert_eq!(cat.iter().count(), 0);
    }

    #[test]
    fn duplicate_name_keeps_first_slot_and_last_fields() {
        let cat = Catalog::from_json(
            r#"[
                {"name": "KDE", "repo": "old", "installer": "a.sh"},
                {"name": "GNOME", "repo": "g", "installer": "g.sh"},
                {"name": "KDE", "repo": "new", "installer": "b.sh"}
            ]"#,
        )
        .unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat.names().collect::<Vec<_>>(), vec!["KDE", "GNOME"]);
        assert_eq!(cat.get("KDE").unwrap().repo, "new");
        assert_eq!(cat.iter().map(|o| o.installer.as_str()).collect::<Vec<_>>(), vec!["b.sh", "g.sh"]);
    }
}
