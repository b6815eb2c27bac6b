#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use collapse_core::api::{AppConfig, NullProgress, StrategyKind, Tally};
use collapse_plugins::factory;

fn fake_runner(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-qir-runner");
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}

fn config(runner: &Path, shots: u32, no_orchestration: bool) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.simulate.qir = true;
    cfg.simulate.shots = shots;
    cfg.simulate.qir_runner = Some(runner.to_string_lossy().into_owned());
    cfg.simulate.no_orchestration = no_orchestration;
    cfg
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn runs_each_shot_as_its_own_process() {
    let dir = tempfile::tempdir().unwrap();
    let runner = fake_runner(dir.path(), "echo 'Result: '\necho '[One, Zero]'");
    let ir = dir.path().join("Bell.ll");
    std::fs::write(&ir, "; ModuleID = 'Bell'").unwrap();

    let cfg = config(&runner, 6, false);
    let kind = factory::simulate_kind(&cfg);
    assert_eq!(kind, StrategyKind::Qir);

    let strategy = factory::build_strategy(kind, &cfg);
    let tally = factory::build_orchestrator(&cfg)
        .run(strategy.as_ref(), Some(ir.as_path()), &NullProgress)
        .await
        .unwrap();

    assert_eq!(tally.get("|10⟩"), Some(6.0));
    assert_eq!(tally.len(), 1);
}

#[tokio::test]
async fn delegated_runner_output_is_tallied_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let runner = fake_runner(
        dir.path(),
        "echo METADATA EntryPoint\necho START\necho '[0, 1]'\necho END 0\n\
         echo START\necho '[0, 1]'\necho END 0\necho START\necho '[1, 1]'\necho END 0",
    );
    let ir = dir.path().join("Pair.ll");
    std::fs::write(&ir, "").unwrap();

    let cfg = config(&runner, 3, true);
    let strategy = factory::build_strategy(StrategyKind::Qir, &cfg);
    let tally = factory::build_orchestrator(&cfg)
        .run(strategy.as_ref(), Some(ir.as_path()), &NullProgress)
        .await
        .unwrap();

    match tally {
        Tally::Counts(map) => {
            let entries: Vec<_> = map.into_iter().collect();
            assert_eq!(entries, vec![("|01⟩".to_string(), 2), ("|11⟩".to_string(), 1)]);
        }
        other => panic!("expected counts, got {other:?}"),
    }
}
