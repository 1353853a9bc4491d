//! Golden file helpers.
//!
//! Tests render a value to pretty JSON and compare it against a checked-in
//! `.golden` file. Set `UPDATE_GOLDEN=1` to rewrite the files instead.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// A golden test that compares output against expected files.
pub struct GoldenTest {
    name: String,
    golden_dir: PathBuf,
    update_mode: bool,
}

impl GoldenTest {
    /// Creates a new golden test named `name`, reading files from
    /// `golden_dir`.
    pub fn new(name: impl Into<String>, golden_dir: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            golden_dir: golden_dir.as_ref().to_path_buf(),
            update_mode: std::env::var("UPDATE_GOLDEN").is_ok(),
        }
    }

    /// Creates a golden test using `testdata/golden` at the workspace root.
    pub fn with_default_dir(name: impl Into<String>) -> Self {
        let golden_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .and_then(|p| p.parent())
            .map(|p| p.join("testdata").join("golden"))
            .unwrap_or_else(|| PathBuf::from("testdata/golden"));

        Self::new(name, golden_dir)
    }

    /// Forces update mode on or off, regardless of `UPDATE_GOLDEN`.
    #[must_use]
    pub fn updating(mut self, update: bool) -> Self {
        self.update_mode = update;
        self
    }

    /// Asserts that `value`, as pretty JSON, matches the golden file.
    pub fn assert_json<T: Serialize + ?Sized>(&self, suffix: &str, value: &T) {
        let mut actual = serde_json::to_string_pretty(value).expect("Failed to render JSON");
        actual.push('\n');
        self.assert_text(suffix, &actual);
    }

    /// Asserts that the given string matches the golden file.
    pub fn assert_text(&self, suffix: &str, actual: &str) {
        let path = self.file_path(suffix);

        if self.update_mode {
            self.update_golden_file(&path, actual);
            return;
        }

        if !path.exists() {
            panic!(
                "Golden file not found: {:?}\n\
                 Run with UPDATE_GOLDEN=1 to create it.\n\
                 Actual:\n{}",
                path, actual
            );
        }

        let expected = fs::read_to_string(&path).expect("Failed to read golden file");

        if actual != expected {
            panic!(
                "Golden test '{}' failed for '{}':\n\
                 --- Expected ---\n{}\n\
                 --- Actual ---\n{}\n\
                 Run with UPDATE_GOLDEN=1 to update.",
                self.name, suffix, expected, actual
            );
        }
    }

    fn file_path(&self, suffix: &str) -> PathBuf {
        let filename = if suffix.is_empty() {
            format!("{}.golden", self.name)
        } else {
            format!("{}_{}.golden", self.name, suffix)
        };
        self.golden_dir.join(filename)
    }

    fn update_golden_file(&self, path: &Path, data: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create golden directory");
        }
        fs::write(path, data).expect("Failed to write golden file");
        println!("Updated golden file: {:?}", path);
    }
}
