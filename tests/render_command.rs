// tests/render_command.rs
// Offline rendering of a batch file against a local leaderboard checkout.

use leaderboard_bot::cli::render::render_file;
use leaderboard_bot::config::BotConfig;
use leaderboard_bot::BotError;
use std::fs;

const BATCH: &str = r#"{
    "newColumns": [],
    "newRows": [{"dataset": "vision/mnist", "row": {"Model": "vit", "Acc": 0.995}}],
    "changedRows": [{"dataset": "vision/mnist", "row": {"id": 0, "Model": "cnn", "Acc": 1.0}}],
    "newLeaderboards": []
}"#;

#[tokio::test]
async fn renders_against_directory_checkout() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("boards/vision")).unwrap();
    fs::write(
        dir.path().join("boards/vision/mnist.md"),
        "---\ntitle: MNIST\n---\n| Model | Acc |\n|:--:|:--:|\n| cnn | 0.99 |\n",
    )
    .unwrap();
    let batch_path = dir.path().join("batch.json");
    fs::write(&batch_path, BATCH).unwrap();

    let boards = dir.path().join("boards");
    let report = render_file(&BotConfig::default(), &batch_path, Some(boards.as_path()))
        .await
        .unwrap();

    assert!(report.starts_with(
        "======== NEW CHANGES FOR vision/mnist ========\n```\n\
         | Model | Acc |\n|:--:|:--:|\n| cnn | 1.0 |\n| vit | 0.995 |\n```\n"
    ));
    assert!(report.contains("\"Acc\": 1.0"));
}

#[tokio::test]
async fn invalid_batch_file_is_a_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let batch_path = dir.path().join("batch.json");
    fs::write(&batch_path, "{\"newColumns\": []}").unwrap();

    let err = render_file(&BotConfig::default(), &batch_path, Some(dir.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, BotError::Json(_)));
}
