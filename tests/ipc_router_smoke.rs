use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_gradebookd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn gradebookd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    if value.get("ok").and_then(|v| v.as_bool()) == Some(false) {
        let code = value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str())
            .unwrap_or("unknown");
        assert_ne!(
            code, "not_implemented",
            "unexpected unknown method for {}",
            method
        );
    }
    value
}

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let health = request(&mut stdin, &mut reader, "1", "health", json!({}));
    assert_eq!(
        health
            .get("result")
            .and_then(|r| r.get("gradeCount"))
            .and_then(|v| v.as_i64()),
        Some(0)
    );

    let _ = request(&mut stdin, &mut reader, "2", "grades.list", json!({}));
    let _ = request(&mut stdin, &mut reader, "3", "draft.get", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "4",
        "draft.update",
        json!({
            "patch": {
                "firstName": "Smoke",
                "lastName": "Student",
                "subject": "Math",
                "score": 4,
                "date": "2024-09-12"
            }
        }),
    );
    let submitted = request(&mut stdin, &mut reader, "5", "draft.submit", json!({}));
    let grade_id = submitted
        .get("result")
        .and_then(|v| v.get("gradeId"))
        .and_then(|v| v.as_i64())
        .expect("gradeId");

    let _ = request(
        &mut stdin,
        &mut reader,
        "6",
        "grades.select",
        json!({ "gradeId": grade_id }),
    );
    let _ = request(&mut stdin, &mut reader, "7", "draft.clear", json!({}));
    let _ = request(
        &mut stdin,
        &mut reader,
        "8",
        "grades.delete",
        json!({ "gradeId": grade_id }),
    );

    let unknown = request(&mut stdin, &mut reader, "9", "draft.get", json!({}));
    assert_eq!(unknown.get("ok").and_then(|v| v.as_bool()), Some(true));

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn unknown_methods_report_not_implemented() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    let payload = json!({ "id": "1", "method": "grades.renumber", "params": {} });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("not_implemented")
    );

    drop(stdin);
    let _ = child.wait();
}

#[test]
fn bad_json_lines_get_an_error_envelope() {
    let (mut child, mut stdin, mut reader) = spawn_sidecar();

    writeln!(stdin, "this is not json").expect("write garbage");
    stdin.flush().expect("flush");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(
        value
            .get("error")
            .and_then(|e| e.get("code"))
            .and_then(|v| v.as_str()),
        Some("bad_json")
    );

    // the daemon keeps serving after a garbage line
    let payload = json!({ "id": "2", "method": "health", "params": {} });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");
    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("ok").and_then(|v| v.as_bool()), Some(true));

    drop(stdin);
    let _ = child.wait();
}
