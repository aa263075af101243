#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Runs the compiled `avatar-lint` binary.
pub struct AvatarLintProcess;

impl AvatarLintProcess {
    /// Path to the binary under test.
    pub fn binary() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_avatar-lint"))
    }

    /// Spawns the binary with `args` and waits for it to exit.
    pub fn spawn_command(args: &[&str]) -> Output {
        Command::new(Self::binary())
            .args(args)
            .env_remove("AVATAR_LINT_FORMAT")
            .env_remove("AVATAR_LINT_LOG_LEVEL")
            .env_remove("AVATAR_LINT_MAX_CONFIG_SIZE")
            .output()
            .expect("failed to run avatar-lint")
    }

    /// Validates `bundle` with extra `args`.
    pub fn validate(bundle: &Path, args: &[&str]) -> Output {
        let mut all: Vec<&str> = args.to_vec();
        let bundle = bundle.to_str().expect("temp path is UTF-8");
        all.push(bundle);
        Self::spawn_command(&all)
    }
}

/// A bundle on disk, built from JSON documents and empty image files.
pub struct BundleFixture {
    dir: TempDir,
}

impl BundleFixture {
    /// An empty directory with no bundle files.
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp dir"),
        }
    }

    /// A complete, valid bundle:
    ///
    /// - face: three expressions
    /// - mode `standard`: backgrounds and both hands with two frames each
    /// - mode `keyboard`: backgrounds, a left hand and keys
    pub fn valid() -> Self {
        let fixture = Self::empty();
        fixture
            .json(
                "face/config.json",
                &json!({
                    "HotKey": ["1", "2", "3"],
                    "FaceImageName": ["happy.png", "sad.png", "angry.png"],
                }),
            )
            .touch_all("face", &["happy.png", "sad.png", "angry.png"])
            .json(
                "mode/config.json",
                &json!({ "ModelPath": ["standard", "keyboard"] }),
            )
            .json("mode/standard/config.json", &standard_mode())
            .touch_all("mode/standard", &["bg.png", "catbg.png"])
            .touch_all("mode/standard/lefthand", &["up.png", "0.png", "1.png"])
            .touch_all("mode/standard/righthand", &["up.png", "0.png", "1.png"])
            .json("mode/keyboard/config.json", &keyboard_mode())
            .touch_all("mode/keyboard", &["bg.png", "catbg.png"])
            .touch_all("mode/keyboard/lefthand", &["up.png", "0.png"])
            .touch_all("mode/keyboard/keys", &["a.png", "s.png", "d.png"]);
        fixture
    }

    /// Bundle root.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes a JSON document at a bundle-relative path.
    pub fn json(&self, rel: &str, value: &Value) -> &Self {
        self.raw(rel, &serde_json::to_string_pretty(value).expect("serialize fixture"))
    }

    /// Writes raw text at a bundle-relative path.
    pub fn raw(&self, rel: &str, text: &str) -> &Self {
        let path = self.path().join(rel);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("create fixture dir");
        fs::write(path, text).expect("write fixture file");
        self
    }

    /// Creates empty image files in a bundle-relative directory.
    pub fn touch_all(&self, dir: &str, names: &[&str]) -> &Self {
        let dir = self.path().join(dir);
        fs::create_dir_all(&dir).expect("create fixture dir");
        for name in names {
            fs::write(dir.join(name), b"\x89PNG").expect("write fixture image");
        }
        self
    }

    /// Deletes a bundle-relative file.
    pub fn remove(&self, rel: &str) -> &Self {
        fs::remove_file(self.path().join(rel)).expect("remove fixture file");
        self
    }

    /// Deletes a bundle-relative directory tree.
    pub fn remove_dir(&self, rel: &str) -> &Self {
        fs::remove_dir_all(self.path().join(rel)).expect("remove fixture dir");
        self
    }
}

/// Mode with backgrounds and two hands.
pub fn standard_mode() -> Value {
    json!({
        "BackgroundImageName": "bg.png",
        "CatBackgroundImageName": "catbg.png",
        "HasModel": false,
        "ModelHasLeftHandModel": false,
        "ModelHasRightHandModel": false,
        "LeftHandImagePath": "lefthand",
        "LeftHandUpImageName": "up.png",
        "LeftHandImageName": ["0.png", "1.png"],
        "RightHandImagePath": "righthand",
        "RightHandUpImageName": "up.png",
        "RightHandImageName": ["0.png", "1.png"],
    })
}

/// Mode with backgrounds, a left hand and keys.
pub fn keyboard_mode() -> Value {
    json!({
        "BackgroundImageName": "bg.png",
        "CatBackgroundImageName": "catbg.png",
        "HasModel": false,
        "ModelHasLeftHandModel": false,
        "ModelHasRightHandModel": false,
        "LeftHandImagePath": "lefthand",
        "LeftHandUpImageName": "up.png",
        "LeftHandImageName": ["0.png"],
        "KeysImagePath": "keys",
        "KeysImageName": ["a.png", "s.png", "d.png"],
        "KeyUse": ["A", "S", "D"],
    })
}
