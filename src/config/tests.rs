//! Integration tests for config module

use super::*;
use std::fs;
use tempfile::TempDir;

fn fixture(dir: &TempDir) -> std::path::PathBuf {
    let data = dir.path().join("names.txt");
    fs::write(&data, "anna\nbob\n\nada\n").unwrap();
    let yaml = format!(
        r#"
data:
  path: {}

model:
  hidden_size: 6
  seed: 11

optimizer:
  lr: 0.05

training:
  epochs: 2
  log_every: 1
"#,
        data.display()
    );
    let config = dir.path().join("charnn.yaml");
    fs::write(&config, yaml).unwrap();
    config
}

#[test]
fn test_end_to_end_config_loading() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);

    let spec = load_config(&config).unwrap();
    assert_eq!(spec.model.hidden_size, 6);
    assert_eq!(spec.data.eos_char(), Some('\n'));
    assert_eq!(spec.training.epochs, 2);

    let corpus = load_corpus(&spec).unwrap();
    assert_eq!(corpus.len(), 3);
    assert_eq!(corpus.vocabulary.chars(), &['a', 'n', '\n', 'b', 'o', 'd']);
}

#[test]
fn test_cli_overrides_reach_training() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);
    let config_arg = config.to_str().unwrap();

    let cli = parse_args([
        "charnn",
        "train",
        config_arg,
        "--epochs",
        "3",
        "--hidden-size",
        "2",
    ])
    .unwrap();
    let args = match cli.command {
        Command::Train(args) => args,
        _ => panic!("Expected Train command"),
    };

    let mut spec = load_config(&args.config).unwrap();
    apply_overrides(&mut spec, &args).unwrap();
    assert_eq!(spec.training.epochs, 3);
    assert_eq!(spec.model.hidden_size, 2);
    assert_eq!(spec.optimizer.lr, 0.05);

    let outcome = train_from_spec(&spec).unwrap();
    assert_eq!(outcome.sizes.hidden_size, 2);
    assert_eq!(outcome.result.epochs, 3);
    assert_eq!(outcome.result.steps, 9);
}

#[test]
fn test_check_overrides() {
    let dir = TempDir::new().unwrap();
    let config = fixture(&dir);
    let config_arg = config.to_str().unwrap();

    let cli = parse_args(["charnn", "check", config_arg, "--sequence", "2", "--seed", "4"]).unwrap();
    let args = match cli.command {
        Command::Check(args) => args,
        _ => panic!("Expected Check command"),
    };

    let mut spec = load_config(&args.config).unwrap();
    apply_check_overrides(&mut spec, &args).unwrap();
    assert_eq!(spec.check.sequence, 2);
    assert_eq!(spec.model.seed, 4);

    let outcome = check_from_spec(&spec, args.elementwise).unwrap();
    assert_eq!(outcome.length, 4);
    assert!(outcome.elementwise.is_none());
    assert!(outcome.passed, "{}", outcome.report);
}

#[test]
fn test_missing_data_path_rejected() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("charnn.yaml");
    fs::write(
        &config,
        "data:\n  path: /nonexistent/corpus.txt\nmodel:\n  hidden_size: 4\noptimizer:\n  lr: 0.1\n",
    )
    .unwrap();

    let err = load_config(&config).unwrap_err();
    assert!(err.to_string().contains("does not exist"));
}
