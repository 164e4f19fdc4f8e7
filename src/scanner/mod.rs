//! Project stack scanner.
//!
//! Looks for ecosystem marker files at the project root (`package.json`,
//! `requirements.txt`, `go.mod`, `Cargo.toml`) and derives languages,
//! frameworks and the package manager. Unreadable markers count as
//! absent.

use crate::error::DiscoveryError;
use crate::models::{ProjectContext, Stack};
use crate::repo::detect_git_info;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// npm dependencies mapped to framework labels. `true` appends the version.
const NODE_FRAMEWORKS: &[(&str, &str, bool)] = &[
    ("next", "Next.js", true),
    ("react", "React", true),
    ("vue", "Vue", true),
    ("express", "Express", true),
    ("@supabase/supabase-js", "Supabase", false),
    ("stripe", "Stripe", false),
];

const PYTHON_FRAMEWORKS: &[(&str, &str)] = &[
    ("django", "Django"),
    ("flask", "Flask"),
    ("fastapi", "FastAPI"),
];

/// Detect the technology stack of a project directory.
pub fn detect_stack(root: &Path) -> Stack {
    let mut stack = Stack::default();

    match read_package_json(root) {
        Ok(Some(deps)) => {
            stack.package_manager = "npm".to_string();
            for (dep, label, versioned) in NODE_FRAMEWORKS {
                if let Some(version) = deps.get(*dep) {
                    stack.frameworks.push(if *versioned {
                        format!("{} {}", label, version)
                    } else {
                        label.to_string()
                    });
                }
            }
            stack.dependencies = deps;
            stack.languages.push("JavaScript/TypeScript".to_string());
        }
        Ok(None) => {}
        Err(e) => warn!("Ignoring package.json: {}", e),
    }

    let requirements = root.join("requirements.txt");
    if requirements.is_file() {
        stack.package_manager = "pip".to_string();
        stack.languages.push("Python".to_string());

        match fs::read_to_string(&requirements) {
            Ok(content) => {
                for (needle, label) in PYTHON_FRAMEWORKS {
                    if content.contains(needle) {
                        stack.frameworks.push(label.to_string());
                    }
                }
            }
            Err(e) => debug!("Cannot read {}: {}", requirements.display(), e),
        }
    }

    if root.join("go.mod").exists() {
        stack.languages.push("Go".to_string());
        stack.package_manager = "go mod".to_string();
    }

    if root.join("Cargo.toml").exists() {
        stack.languages.push("Rust".to_string());
        stack.package_manager = "cargo".to_string();
    }

    stack
}

/// Read `dependencies` and `devDependencies` from `package.json`.
///
/// Returns `Ok(None)` when there is no `package.json`.
fn read_package_json(root: &Path) -> Result<Option<BTreeMap<String, String>>, DiscoveryError> {
    let path = root.join("package.json");
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(&path).map_err(|source| DiscoveryError::Read {
        path: path.clone(),
        source,
    })?;
    let pkg: Value = serde_json::from_str(&content)
        .map_err(|source| DiscoveryError::Parse { path, source })?;

    let mut deps = BTreeMap::new();
    for section in ["dependencies", "devDependencies"] {
        if let Some(map) = pkg.get(section).and_then(|v| v.as_object()) {
            for (name, version) in map {
                let version = version.as_str().unwrap_or_default().to_string();
                deps.insert(name.clone(), version);
            }
        }
    }

    Ok(Some(deps))
}

/// Detect the full project context: stack plus GitHub coordinates.
pub fn detect_project(root: &Path) -> ProjectContext {
    ProjectContext {
        root_path: root.to_path_buf(),
        stack: detect_stack(root),
        git_repo: detect_git_info(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let stack = detect_stack(temp_dir.path());

        assert_eq!(stack, Stack::default());
    }

    #[test]
    fn test_node_project() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("package.json"),
            r#"{
                "dependencies": {"react": "^18.2.0", "next": "14.1.0", "stripe": "^14.0.0"},
                "devDependencies": {"typescript": "^5.0.0"}
            }"#,
        )
        .unwrap();

        let stack = detect_stack(temp_dir.path());
        assert_eq!(stack.package_manager, "npm");
        assert_eq!(stack.languages, vec!["JavaScript/TypeScript"]);
        assert_eq!(
            stack.frameworks,
            vec!["Next.js 14.1.0", "React ^18.2.0", "Stripe"]
        );
        assert_eq!(stack.dependencies.len(), 4);
        assert_eq!(stack.dependencies.get("typescript").unwrap(), "^5.0.0");
    }

    #[test]
    fn test_broken_package_json_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("package.json"), "{ oops").unwrap();

        let stack = detect_stack(temp_dir.path());
        assert_eq!(stack.package_manager, "unknown");
        assert!(stack.languages.is_empty());
    }

    #[test]
    fn test_python_project() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join("requirements.txt"),
            "fastapi==0.110.0\nuvicorn\n",
        )
        .unwrap();

        let stack = detect_stack(temp_dir.path());
        assert_eq!(stack.package_manager, "pip");
        assert_eq!(stack.languages, vec!["Python"]);
        assert_eq!(stack.frameworks, vec!["FastAPI"]);
    }

    #[test]
    fn test_later_markers_override_package_manager() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("go.mod"), "module example.com/x\n").unwrap();
        std::fs::write(temp_dir.path().join("Cargo.toml"), "[package]\n").unwrap();

        let stack = detect_stack(temp_dir.path());
        assert_eq!(stack.languages, vec!["Go", "Rust"]);
        assert_eq!(stack.package_manager, "cargo");
    }

    #[test]
    fn test_detect_project_without_git() {
        let temp_dir = TempDir::new().unwrap();
        let project = detect_project(temp_dir.path());

        assert_eq!(project.root_path, temp_dir.path());
        assert!(project.git_repo.is_none());
    }
}
