//! Integration tests driving the triesearch binary.
//!
//! Each test gets its own data directory and snapshot file so the user's
//! configuration is never read or written.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tempfile::TempDir;

struct Fixture {
    dir: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    fn snapshot(&self) -> PathBuf {
        self.dir.path().join("index.json")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_triesearch"));
        cmd.args(args)
            .arg("--snapshot")
            .arg(self.snapshot())
            .arg("--no-color")
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env("HOME", self.dir.path());
        cmd
    }

    /// Run a one-shot subcommand, returning (stdout, success)
    fn run(&self, args: &[&str]) -> (String, bool) {
        let output = self.command(args).output().expect("Failed to run triesearch");
        (
            String::from_utf8_lossy(&output.stdout).to_string(),
            output.status.success(),
        )
    }

    /// Feed a script to the interactive shell, returning stdout
    fn shell(&self, script: &str) -> String {
        let mut child = self
            .command(&["shell"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .expect("Failed to spawn triesearch");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(script.as_bytes())
            .expect("Failed to write script");
        let output = child.wait_with_output().expect("Failed to wait for triesearch");
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

fn exists(path: &Path) -> bool {
    path.exists()
}

#[test]
fn test_one_shot_index_and_query() {
    let fx = Fixture::new();

    assert_eq!(fx.run(&["index", "1", "bread", "butter", "salt"]), ("index ok 1\n".into(), true));
    assert_eq!(fx.run(&["index", "3", "soup", "fish", "potato", "salt"]), ("index ok 3\n".into(), true));
    assert!(exists(&fx.snapshot()));

    let (out, ok) = fx.run(&["query", "(butter", "|", "potato)", "&", "salt"]);
    assert!(ok);
    assert_eq!(out, "query results 1 3\n");
}

#[test]
fn test_one_shot_failures_exit_nonzero() {
    let fx = Fixture::new();

    let (out, ok) = fx.run(&["index", "abc", "soup"]);
    assert!(!ok);
    assert_eq!(out, "index error SEARCH_INDEX_INVALID_DOC_ID(abc)\n");
    assert!(!exists(&fx.snapshot()), "failed index must not write a snapshot");

    let (out, ok) = fx.run(&["query", "soup"]);
    assert!(!ok);
    assert_eq!(out, "index error SEARCH_QUERY_TOKEN_NOT_FOUND(soup)\n");
}

#[test]
fn test_one_shot_clear() {
    let fx = Fixture::new();
    fx.run(&["index", "1", "soup"]);

    assert_eq!(fx.run(&["clear"]), ("Index cleared\n".into(), true));
    let (_, ok) = fx.run(&["query", "soup"]);
    assert!(!ok);
}

#[test]
fn test_corrupt_snapshot_is_not_overwritten() {
    let fx = Fixture::new();
    std::fs::write(fx.snapshot(), "not json").unwrap();

    let (_, ok) = fx.run(&["index", "1", "soup"]);
    assert!(!ok);
    assert_eq!(std::fs::read_to_string(fx.snapshot()).unwrap(), "not json");
}

#[test]
fn test_shell_session() {
    let fx = Fixture::new();
    let transcript = fx.shell(
        "index 1 soup tomato cream salt\n\
         index 2 cake sugar eggs flour sugar cocoa cream butter\n\
         index 1 bread butter salt\n\
         index 3 soup fish potato salt pepper\n\
         query (butter | potato) & salt\n\
         query tomato\n\
         save\n\
         exit\n",
    );

    let responses: Vec<&str> = transcript
        .split("> ")
        .map(str::trim_end)
        .filter(|s| !s.is_empty())
        .collect();
    assert_eq!(
        responses,
        vec![
            "index ok 1",
            "index ok 2",
            "index ok 1",
            "index ok 3",
            "query results 1 3",
            "index error SEARCH_QUERY_TOKEN_NOT_FOUND(tomato)",
            "JSON file saved",
            "Bye!",
        ]
    );

    let (out, ok) = fx.run(&["query", "fish"]);
    assert!(ok);
    assert_eq!(out, "query results 3\n");
}

#[test]
fn test_shell_reports_autoload() {
    let fx = Fixture::new();
    fx.run(&["index", "5", "bread"]);

    let transcript = fx.shell("query bread\nexit\n");
    assert_eq!(
        transcript,
        "Loaded index.json successfully\n> query results 5\n> Bye!\n"
    );

    std::fs::write(fx.snapshot(), "not json").unwrap();
    let transcript = fx.shell("exit\n");
    assert_eq!(
        transcript,
        "WARNING - Unable to load index file! Defaulting to empty index...\n> Bye!\n"
    );
}

#[test]
fn test_stats() {
    let fx = Fixture::new();
    fx.run(&["index", "1", "tea", "ten"]);

    let (out, ok) = fx.run(&["stats"]);
    assert!(ok);
    assert!(out.contains("Documents:        1"));
    assert!(out.contains("Tokens:           2"));
}
