use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn bin(home: &TempDir) -> Command {
    let path = assert_cmd::cargo::cargo_bin!("railway-faq");
    let mut cmd = Command::new(path);
    cmd.env("XDG_CONFIG_HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn answers_canonical_question() {
    let home = TempDir::new().unwrap();
    bin(&home)
        .args(["ask", "How can I book a train ticket online?"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "💳 You can book train tickets online through [IRCTC]",
        ));
}

#[test]
fn unrelated_text_gets_fallback() {
    let home = TempDir::new().unwrap();
    bin(&home)
        .args(["ask", "asdkjhasd random text", "--show-score"])
        .assert()
        .success()
        .stdout(predicate::str::contains("decision=Miss"))
        .stdout(predicate::str::contains("score=0.0000"))
        .stdout(predicate::str::contains("😕 Sorry, I couldn’t understand that."));
}

#[test]
fn extended_mode_logs_queries_and_feedback() {
    let home = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();
    let log_dir = logs.path().to_str().unwrap();

    for question in ["pnr at night", "train delayed"] {
        bin(&home)
            .args(["--extended", "--no-translate", "--log-dir", log_dir, "ask", question])
            .assert()
            .success();
    }

    let queries = fs::read_to_string(logs.path().join("query_log.csv")).unwrap();
    let lines: Vec<&str> = queries.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "timestamp,query");
    assert!(lines[1].ends_with(",pnr at night"));
    assert!(lines[2].ends_with(",train delayed"));

    bin(&home)
        .args([
            "--extended",
            "--log-dir",
            log_dir,
            "feedback",
            "--rating",
            "5",
            "--comment",
            "quick, useful",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("rating=5"));

    let feedback = fs::read_to_string(logs.path().join("feedback_log.csv")).unwrap();
    assert!(feedback.starts_with("timestamp,rating,comment"));
    assert!(feedback.contains(",5,\"quick, useful\""));

    bin(&home)
        .args(["--log-dir", log_dir, "logs", "--feedback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rating=5 comment=quick, useful"));
}

#[test]
fn blank_question_is_not_logged() {
    let home = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();

    bin(&home)
        .args([
            "--extended",
            "--no-translate",
            "--log-dir",
            logs.path().to_str().unwrap(),
            "ask",
            "   ",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("😕 Sorry"));

    assert!(!logs.path().join("query_log.csv").exists());
}

#[test]
fn chat_session_replays_history_and_records_feedback() {
    let home = TempDir::new().unwrap();
    let logs = TempDir::new().unwrap();

    let assert = bin(&home)
        .args([
            "--extended",
            "--no-translate",
            "--log-dir",
            logs.path().to_str().unwrap(),
            "chat",
        ])
        .write_stdin(
            "How can I book a train ticket online?\n\
             \n\
             asdkjhasd random text\n\
             /history\n\
             /feedback 4 clear answers\n\
             quit\n\
             What happens when train is delayed?\n",
        )
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let turns: Vec<&str> = stdout
        .lines()
        .filter_map(|l| l.find("You: ").or_else(|| l.find("Bot: ")).map(|i| &l[i..]))
        .collect();

    let expected = [
        "You: How can I book a train ticket online?",
        "Bot: 💳 You can book train tickets online through [IRCTC](https://www.irctc.co.in).",
        "You: asdkjhasd random text",
        "Bot: 😕 Sorry, I couldn’t understand that. Try rephrasing your question.",
    ];
    // live turns, then the /history replay in the same order
    assert_eq!(turns.len(), 8);
    assert_eq!(turns[..4], expected);
    assert_eq!(turns[4..], expected);
    assert!(stdout.contains("Thanks for your feedback!"));
    assert!(!stdout.contains("NTES"));

    let queries = fs::read_to_string(logs.path().join("query_log.csv")).unwrap();
    assert_eq!(queries.lines().count(), 3);

    let feedback = fs::read_to_string(logs.path().join("feedback_log.csv")).unwrap();
    assert!(feedback.lines().nth(1).unwrap().ends_with(",4,clear answers"));
}

#[test]
fn chat_ends_on_eof() {
    let home = TempDir::new().unwrap();
    bin(&home)
        .arg("chat")
        .write_stdin("How to get train enquiry via SMS?\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bot: 📱 Send an SMS"));
}

#[test]
fn feedback_requires_extended_mode() {
    let home = TempDir::new().unwrap();
    bin(&home)
        .args(["feedback", "--rating", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Logging is disabled"));
}

#[test]
fn exported_corpus_can_be_loaded() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("faq.jsonl");
    let path_str = path.to_str().unwrap();

    bin(&home)
        .args(["corpus", "--export", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported_entries=6"));
    assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 6);

    bin(&home)
        .args(["--corpus", path_str, "ask", "How to get train enquiry via SMS?"])
        .assert()
        .success()
        .stdout(predicate::str::contains("139"));
}

#[test]
fn eval_exit_code_follows_pass_rate() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let cases = dir.path().join("cases.json");
    fs::write(
        &cases,
        r#"[
            {"case_id": "sms", "question": "How to get train enquiry via SMS?",
             "expected_answer": "📱 Send an SMS with your train number to 139 to get train status."},
            {"case_id": "noise", "question": "asdkjhasd random text", "expected_answer": null}
        ]"#,
    )
    .unwrap();
    let cases_str = cases.to_str().unwrap();

    bin(&home)
        .args(["eval", "--cases", cases_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("passed=2 failed=0"));

    bin(&home)
        .args(["--threshold", "1.5", "eval", "--cases", cases_str])
        .assert()
        .failure()
        .stdout(predicate::str::contains("meets_threshold=false"));
}
