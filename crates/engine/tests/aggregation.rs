//! Integration tests for hook aggregation against real project layouts

use hookmux_config::{PackageDescriptor, RequiredHooks};
use hookmux_engine::{AbsPath, Aggregator, HookCollection, RealSystem, Transition};
use hookmux_core::HookType;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = "hookmux.json";
const COLLECTION: &str = "hookmux-hooks.json";

struct Fixture {
    _temp: TempDir,
    root: PathBuf,
}

impl Fixture {
    fn new(required: &str) -> Self {
        let temp = TempDir::new().unwrap();
        let root = fs::canonicalize(temp.path()).unwrap();
        fs::create_dir(root.join(".git")).unwrap();
        fs::write(
            root.join(MANIFEST),
            format!(r#"{{ "extra": {{ "required-git-hooks": {required} }} }}"#),
        )
        .unwrap();
        Self { _temp: temp, root }
    }

    fn add_package(&self, name: &str, available: &str, scripts: &[&str]) -> PackageDescriptor {
        let dir = self.root.join("vendor").join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(MANIFEST),
            format!(r#"{{ "name": "{name}", "extra": {{ "available-git-hooks": {available} }} }}"#),
        )
        .unwrap();
        for script in scripts {
            let path = dir.join(script);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, "#!/bin/sh\nexit 0\n").unwrap();
        }
        PackageDescriptor::from_dir(&dir, MANIFEST).unwrap()
    }

    fn required(&self) -> RequiredHooks {
        RequiredHooks::from_root(&self.root, MANIFEST).unwrap()
    }

    fn hooks_dir(&self) -> PathBuf {
        self.root.join(".git/hooks")
    }

    fn document(&self) -> Option<String> {
        fs::read_to_string(self.hooks_dir().join(COLLECTION)).ok()
    }

    fn dispatcher_exists(&self, hook_type: HookType) -> bool {
        self.hooks_dir().join(hook_type.as_str()).is_file()
    }
}

fn aggregator<'a>(root: &Path, required: &'a RequiredHooks) -> Aggregator<'a, RealSystem> {
    Aggregator::new(
        &RealSystem,
        AbsPath::new(root.to_path_buf()).unwrap(),
        COLLECTION,
        required,
    )
}

fn collection(fixture: &Fixture, required: &RequiredHooks) -> HookCollection {
    aggregator(&fixture.root, required)
        .collection()
        .unwrap()
        .unwrap_or_default()
}

#[test]
fn test_end_to_end_install() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"] }"#);
    let pkg = fixture.add_package("pkgA", r#"{ "lint": "scripts/" }"#, &["scripts/pre-commit"]);
    let required = fixture.required();

    let transition = aggregator(&fixture.root, &required).install(&pkg).unwrap();
    assert!(matches!(transition, Transition::Applied(_)));

    let document: serde_json::Value = serde_json::from_str(&fixture.document().unwrap()).unwrap();
    assert_eq!(
        document,
        serde_json::json!({
            "pre-commit": { "pkgA": { "lint": "../../vendor/pkgA/scripts/pre-commit" } }
        })
    );

    let dispatcher = fixture.hooks_dir().join("pre-commit");
    assert_eq!(
        fs::read_to_string(&dispatcher).unwrap(),
        hookmux_engine::dispatcher::DISPATCHER_TEMPLATE
    );

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&dispatcher).unwrap().permissions().mode();
        assert_eq!(mode & 0o111, 0o111, "dispatcher must be executable");
    }
}

#[test]
fn test_install_then_uninstall_restores_document() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"], "pkgB": ["check"] }"#);
    let a = fixture.add_package("pkgA", r#"{ "lint": "hooks" }"#, &["hooks/pre-commit"]);
    let b = fixture.add_package(
        "pkgB",
        r#"{ "check": "git" }"#,
        &["git/pre-commit", "git/commit-msg"],
    );
    let required = fixture.required();
    let aggregator = aggregator(&fixture.root, &required);

    aggregator.install(&a).unwrap();
    let before = fixture.document();

    aggregator.install(&b).unwrap();
    assert!(fixture.dispatcher_exists(HookType::CommitMsg));

    aggregator.uninstall("pkgB").unwrap();
    assert_eq!(fixture.document(), before);
    assert!(!fixture.dispatcher_exists(HookType::CommitMsg));
    assert!(fixture.dispatcher_exists(HookType::PreCommit));

    aggregator.uninstall("pkgA").unwrap();
    assert!(fixture.document().is_none());
    assert!(!fixture.dispatcher_exists(HookType::PreCommit));
}

#[test]
fn test_packages_do_not_interfere() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"], "pkgB": ["lint"] }"#);
    let a = fixture.add_package("pkgA", r#"{ "lint": "s" }"#, &["s/pre-commit"]);
    let b = fixture.add_package("pkgB", r#"{ "lint": "s" }"#, &["s/pre-commit"]);
    let required = fixture.required();
    let aggregator = aggregator(&fixture.root, &required);

    aggregator.install(&a).unwrap();
    aggregator.install(&b).unwrap();

    let both = collection(&fixture, &required);
    let packages: Vec<&str> = both
        .scripts(HookType::PreCommit)
        .iter()
        .map(|h| h.package)
        .collect();
    assert_eq!(packages, ["pkgA", "pkgB"]);

    aggregator.uninstall("pkgA").unwrap();
    let remaining = collection(&fixture, &required);
    let scripts = remaining.scripts(HookType::PreCommit);
    assert_eq!(scripts.len(), 1);
    assert_eq!(scripts[0].package, "pkgB");
    assert!(fixture.dispatcher_exists(HookType::PreCommit));
}

#[test]
fn test_dispatchers_match_collection_in_every_state() {
    let fixture = Fixture::new(r#"{ "pkgA": ["all"], "pkgB": ["push"] }"#);
    let a = fixture.add_package(
        "pkgA",
        r#"{ "all": "hooks" }"#,
        &["hooks/pre-commit", "hooks/sub/pre-push", "hooks/commit-msg"],
    );
    let b = fixture.add_package("pkgB", r#"{ "push": "p" }"#, &["p/pre-push"]);
    let required = fixture.required();
    let aggregator = aggregator(&fixture.root, &required);

    let check = || {
        assert!(aggregator.verify().unwrap().is_empty());
        let collection = collection(&fixture, &required);
        for hook_type in HookType::ALL {
            assert_eq!(
                collection.contains(hook_type),
                fixture.dispatcher_exists(hook_type),
                "{hook_type}"
            );
        }
    };

    check();
    aggregator.install(&a).unwrap();
    check();
    aggregator.install(&b).unwrap();
    check();
    aggregator.update("pkgA", &a).unwrap();
    check();
    aggregator.uninstall("pkgA").unwrap();
    check();
    aggregator.uninstall("pkgB").unwrap();
    check();
}

#[test]
fn test_only_whitelisted_files_are_collected() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"] }"#);
    let pkg = fixture.add_package(
        "pkgA",
        r#"{ "lint": "scripts" }"#,
        &["scripts/pre-commit", "scripts/not-a-hook", "scripts/post-commit"],
    );
    let required = fixture.required();

    aggregator(&fixture.root, &required).install(&pkg).unwrap();

    let document = fixture.document().unwrap();
    assert!(!document.contains("not-a-hook"));
    assert!(!document.contains("post-commit"));
    assert!(!fixture.hooks_dir().join("not-a-hook").exists());
}

#[test]
fn test_missing_hook_leaves_existing_document() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"], "pkgB": ["lint", "format"] }"#);
    let a = fixture.add_package("pkgA", r#"{ "lint": "s" }"#, &["s/pre-commit"]);
    let b = fixture.add_package("pkgB", r#"{ "lint": "s" }"#, &["s/pre-push"]);
    let required = fixture.required();
    let aggregator = aggregator(&fixture.root, &required);

    aggregator.install(&a).unwrap();
    let before = fixture.document();

    let err = aggregator.install(&b).unwrap_err();
    assert!(err.to_string().contains("\"format\""));
    assert_eq!(fixture.document(), before);
    assert!(!fixture.dispatcher_exists(HookType::PrePush));
}

#[test]
fn test_missing_group_directory_aborts() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"] }"#);
    let pkg = fixture.add_package("pkgA", r#"{ "lint": "gone" }"#, &[]);
    let required = fixture.required();

    let err = aggregator(&fixture.root, &required).install(&pkg).unwrap_err();
    assert!(matches!(err, hookmux_engine::Error::HookDirectoryNotFound { .. }));
    assert!(fixture.document().is_none());
}

#[test]
fn test_corrupt_document_blocks_every_transition() {
    let fixture = Fixture::new(r#"{ "pkgA": ["lint"], "pkgB": ["push"] }"#);
    let a = fixture.add_package("pkgA", r#"{ "lint": "s" }"#, &["s/pre-commit"]);
    let b = fixture.add_package("pkgB", r#"{ "push": "p" }"#, &["p/pre-push"]);
    let required = fixture.required();
    let aggregator = aggregator(&fixture.root, &required);

    aggregator.install(&a).unwrap();
    fs::write(fixture.hooks_dir().join(COLLECTION), "{ broken").unwrap();

    let results = [
        aggregator.install(&b),
        aggregator.uninstall("pkgA"),
        aggregator.update("pkgA", &a),
    ];
    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, hookmux_engine::Error::CorruptState { .. }), "{err}");
    }

    assert_eq!(fixture.document().as_deref(), Some("{ broken"));
    assert_eq!(
        fs::read_to_string(fixture.hooks_dir().join("pre-commit")).unwrap(),
        hookmux_engine::dispatcher::DISPATCHER_TEMPLATE
    );
    assert!(!fixture.dispatcher_exists(HookType::PrePush));
}
