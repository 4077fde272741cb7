//! End-to-end runs over real fixture archives.
//!
//! The external 7-Zip binary is not assumed to exist on test machines; runs
//! are pinned to a deliberately missing primary so the attempt chain always
//! exercises the unavailable-primary → library-fallback path
//! deterministically.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::fs;
use std::path::Path;

use unearth_core::ConsolidationMode;
use unearth_core::EnginePair;
use unearth_core::ExtractionOutcome;
use unearth_core::FailureKind;
use unearth_core::Orchestrator;
use unearth_core::PasswordMode;
use unearth_core::RunConfig;
use unearth_core::RunError;
use unearth_core::ScanMode;
use unearth_core::engine::native::NativeEngine;
use unearth_core::engine::sevenzip::SevenZipEngine;
use unearth_core::password::PasswordPrompt;
use unearth_core::report::SkipReason;
use unearth_core::scanner::ArchiveEntry;
use unearth_core::test_utils::create_encrypted_test_zip;
use unearth_core::test_utils::create_test_tar;
use unearth_core::test_utils::create_test_zip;
use unearth_core::test_utils::gzip_bytes;

/// Engine pair whose primary can never run, forcing the library fallback.
fn fallback_only_pair() -> EnginePair {
    EnginePair::new(
        Box::new(SevenZipEngine::with_program("unearth-test-no-such-7z")),
        Box::new(NativeEngine::new()),
    )
}

struct ScriptedPrompt {
    responses: Vec<Option<String>>,
    calls: usize,
}

impl ScriptedPrompt {
    fn new(responses: Vec<Option<String>>) -> Self {
        Self {
            responses,
            calls: 0,
        }
    }
}

impl PasswordPrompt for ScriptedPrompt {
    fn request_password(&mut self, _entry: &ArchiveEntry) -> Option<String> {
        let response = self.responses.get(self.calls).cloned().flatten();
        self.calls += 1;
        response
    }
}

fn write_plain_zip(path: &Path, name: &str, content: &[u8]) {
    fs::write(path, create_test_zip(vec![(name, content)])).unwrap();
}

#[test]
fn test_every_scanned_archive_gets_exactly_one_outcome() {
    let temp = tempfile::tempdir().unwrap();
    write_plain_zip(&temp.path().join("a.zip"), "a.txt", b"aaa");
    fs::write(temp.path().join("b.zip"), b"definitely not a zip").unwrap();
    fs::write(temp.path().join("c.rar"), b"Rar!").unwrap();

    let config = RunConfig::new(temp.path()).with_scan_mode(ScanMode::Recursive);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let report = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    assert_eq!(report.records().len(), 3);
    let names: Vec<_> = report
        .records()
        .iter()
        .map(|(entry, _)| entry.file_name())
        .collect();
    assert_eq!(names, vec!["a.zip", "b.zip", "c.rar"]);

    let summary = report.summary();
    assert_eq!(summary.archives_found, 3);
    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, 2);
    assert_eq!(
        summary.failures_by_cause.get(&FailureKind::CorruptArchive),
        Some(&1)
    );
    assert_eq!(
        summary.failures_by_cause.get(&FailureKind::UnsupportedFormat),
        Some(&1)
    );
}

#[test]
fn test_mixed_formats_extract_into_isolated_folders() {
    let temp = tempfile::tempdir().unwrap();
    write_plain_zip(&temp.path().join("one.zip"), "one.txt", b"1");
    fs::write(
        temp.path().join("two.tar.gz"),
        gzip_bytes(&create_test_tar(vec![("two.txt", b"22")])),
    )
    .unwrap();
    fs::write(temp.path().join("three.gz"), gzip_bytes(b"333")).unwrap();

    let config = RunConfig::new(temp.path()).with_scan_mode(ScanMode::Recursive);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let report = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    assert_eq!(report.summary().succeeded, 3);
    assert_eq!(
        fs::read_to_string(temp.path().join("one").join("one.txt")).unwrap(),
        "1"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("two").join("two.txt")).unwrap(),
        "22"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("three").join("three")).unwrap(),
        "333"
    );
}

#[test]
fn test_two_phase_probe_prompts_only_for_encrypted() {
    let temp = tempfile::tempdir().unwrap();
    write_plain_zip(&temp.path().join("plain.zip"), "p.txt", b"open");
    fs::write(
        temp.path().join("locked.zip"),
        create_encrypted_test_zip(vec![("s.txt", b"hush")], "secret"),
    )
    .unwrap();

    let config = RunConfig::new(temp.path())
        .with_scan_mode(ScanMode::Recursive)
        .with_password_mode(PasswordMode::PerArchive);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let mut prompt = ScriptedPrompt::new(vec![Some("secret".into())]);
    let report = orchestrator.run(&mut prompt).unwrap();

    // Only the encrypted archive reaches the prompt boundary.
    assert_eq!(prompt.calls, 1);
    assert_eq!(report.summary().succeeded, 2);
    assert_eq!(
        fs::read_to_string(temp.path().join("locked").join("s.txt")).unwrap(),
        "hush"
    );
}

#[test]
fn test_skip_all_skips_encrypted_without_prompting() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("locked.zip"),
        create_encrypted_test_zip(vec![("s.txt", b"hush")], "secret"),
    )
    .unwrap();

    let config = RunConfig::new(temp.path()).with_password_mode(PasswordMode::SkipAll);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let mut prompt = ScriptedPrompt::new(vec![Some("secret".into())]);
    let report = orchestrator.run(&mut prompt).unwrap();

    assert_eq!(prompt.calls, 0);
    let (_, outcome) = &report.records()[0];
    assert_eq!(
        *outcome,
        ExtractionOutcome::Skipped {
            reason: SkipReason::PasswordsDisabled
        }
    );
    // The empty destination folder is cleaned up.
    assert!(!temp.path().join("locked").exists());
}

#[test]
fn test_shared_secret_prompts_at_most_once() {
    let temp = tempfile::tempdir().unwrap();
    for name in ["first_locked.zip", "second_locked.zip"] {
        fs::write(
            temp.path().join(name),
            create_encrypted_test_zip(vec![("s.txt", b"hush")], "secret"),
        )
        .unwrap();
    }
    write_plain_zip(&temp.path().join("plain.zip"), "p.txt", b"open");

    let config = RunConfig::new(temp.path())
        .with_scan_mode(ScanMode::Recursive)
        .with_password_mode(PasswordMode::SharedSecret);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let mut prompt = ScriptedPrompt::new(vec![Some("secret".into())]);
    let report = orchestrator.run(&mut prompt).unwrap();

    assert_eq!(prompt.calls, 1);
    assert_eq!(report.summary().succeeded, 3);
}

#[test]
fn test_shared_secret_wrong_password_fails_without_reprompt() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("locked.zip"),
        create_encrypted_test_zip(vec![("s.txt", b"hush")], "secret"),
    )
    .unwrap();

    let config = RunConfig::new(temp.path()).with_password_mode(PasswordMode::SharedSecret);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let mut prompt = ScriptedPrompt::new(vec![Some("not-it".into()), Some("secret".into())]);
    let report = orchestrator.run(&mut prompt).unwrap();

    // One prompt, one retry, terminal failure.
    assert_eq!(prompt.calls, 1);
    let (_, outcome) = &report.records()[0];
    assert!(matches!(
        outcome,
        ExtractionOutcome::Failed {
            kind: FailureKind::WrongPassword,
            ..
        }
    ));
}

#[test]
fn test_per_archive_decline_records_skip() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("locked.zip"),
        create_encrypted_test_zip(vec![("s.txt", b"hush")], "y"),
    )
    .unwrap();

    let config = RunConfig::new(temp.path()).with_password_mode(PasswordMode::PerArchive);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let mut prompt = ScriptedPrompt::new(vec![Some(String::new())]);
    let report = orchestrator.run(&mut prompt).unwrap();

    assert_eq!(prompt.calls, 1);
    let (_, outcome) = &report.records()[0];
    assert_eq!(
        *outcome,
        ExtractionOutcome::Skipped {
            reason: SkipReason::UserDeclined
        }
    );
}

#[test]
fn test_consolidation_all_renames_collisions() {
    let temp = tempfile::tempdir().unwrap();
    write_plain_zip(&temp.path().join("a.zip"), "readme.txt", b"from a");
    write_plain_zip(&temp.path().join("b.zip"), "readme.txt", b"from b");
    let merged = temp.path().join("merged");

    let config = RunConfig::new(temp.path()).with_consolidation(ConsolidationMode::All {
        into: merged.clone(),
    });
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let report = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    let summary = report.consolidation().expect("consolidation ran");
    assert_eq!(summary.files_copied, 2);
    assert_eq!(summary.files_renamed, 1);
    assert_eq!(fs::read_dir(&merged).unwrap().count(), 2);
    assert_eq!(
        fs::read_to_string(merged.join("readme.txt")).unwrap(),
        "from a"
    );
    assert_eq!(
        fs::read_to_string(merged.join("readme_b.txt")).unwrap(),
        "from b"
    );
    // Per-archive folders keep their copies.
    assert!(temp.path().join("a").join("readme.txt").exists());
    assert!(temp.path().join("b").join("readme.txt").exists());
}

#[test]
fn test_consolidation_selective_copies_chosen_archives_only() {
    let temp = tempfile::tempdir().unwrap();
    write_plain_zip(&temp.path().join("a.zip"), "a.txt", b"a");
    write_plain_zip(&temp.path().join("b.zip"), "b.txt", b"b");
    let merged = temp.path().join("merged");

    let config = RunConfig::new(temp.path()).with_consolidation(ConsolidationMode::Selective {
        into: merged.clone(),
        archives: vec!["a.zip".into()],
    });
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    assert!(merged.join("a.txt").exists());
    assert!(!merged.join("b.txt").exists());
    // Unselected output stays in its per-archive folder.
    assert!(temp.path().join("b").join("b.txt").exists());
}

#[test]
fn test_run_does_not_extract_output_of_its_own_run() {
    let temp = tempfile::tempdir().unwrap();
    // An archive containing another archive: the nested one lands in the
    // destination folder and must not be processed by this run.
    let inner = create_test_zip(vec![("deep.txt", b"deep")]);
    fs::write(
        temp.path().join("outer.zip"),
        create_test_zip(vec![("inner.zip", &inner)]),
    )
    .unwrap();

    let config = RunConfig::new(temp.path()).with_scan_mode(ScanMode::Recursive);
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let report = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    assert_eq!(report.records().len(), 1);
    assert!(temp.path().join("outer").join("inner.zip").exists());
    assert!(!temp.path().join("outer").join("inner").exists());
}

#[test]
fn test_destination_collision_gets_suffixed_folder() {
    let temp = tempfile::tempdir().unwrap();
    fs::create_dir(temp.path().join("data")).unwrap();
    write_plain_zip(&temp.path().join("data.zip"), "d.txt", b"d");

    let config = RunConfig::new(temp.path());
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());
    let report = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap();

    let (_, outcome) = &report.records()[0];
    match outcome {
        ExtractionOutcome::Extracted { destination, .. } => {
            assert_eq!(destination, &temp.path().join("data_1"));
        }
        other => panic!("expected success, got {other:?}"),
    }
    assert!(temp.path().join("data_1").join("d.txt").exists());
}

#[test]
fn test_missing_root_aborts_before_any_processing() {
    let temp = tempfile::tempdir().unwrap();
    let config = RunConfig::new(temp.path().join("nope"));
    let orchestrator = Orchestrator::with_engines(config, fallback_only_pair());

    let err = orchestrator
        .run(&mut ScriptedPrompt::new(Vec::new()))
        .unwrap_err();
    assert!(matches!(err, RunError::RootNotFound { .. }));
}
