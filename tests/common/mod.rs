//! Shared testing utilities for lpc CLI tests.

use assert_cmd::Command;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated working directory for CLI invocations.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    pub fn work_dir(&self) -> &Path {
        self.root.path()
    }

    /// Build a command for invoking the compiled `lpc` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("lpc").expect("Failed to locate lpc binary");
        cmd.current_dir(self.work_dir()).env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory and return its path.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Write a request document and return its file name.
    pub fn write_request(&self, name: &str, request: &Value) -> String {
        self.write(name, &request.to_string());
        name.to_string()
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.work_dir().join(relative)).expect("Failed to read test file")
    }
}

/// The isosceles-triangle problem with three hints, an answer and a solution.
#[allow(dead_code)]
pub fn triangle_problem() -> Value {
    json!({
        "id": "prob_001",
        "statement": "Triangle ABC has AB = AC and angle A = 40 degrees. Find angle B.",
        "archetype": "constraint_translation",
        "skill_track": "Geometry without Formulas",
        "hints": [
            "What type of triangle is this?",
            "In an isosceles triangle, what about base angles?",
            "If angle A = 40 degrees, how much is left for base angles?"
        ],
        "answer_key": "70 degrees",
        "solution": "AB = AC, so angles B and C are equal. B = C = (180 - 40) / 2 = 70."
    })
}

#[allow(dead_code)]
pub fn request(tier: &str, mode: &str, attempt_state: &str) -> Value {
    json!({
        "tier": tier,
        "mode": mode,
        "attempt_state": attempt_state,
        "problem": triangle_problem(),
        "student_state": { "level": "beginner", "age": 10 }
    })
}
