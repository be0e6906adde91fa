// tests/integration_test.rs

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::{tempdir, TempDir};

const TEST_API_KEY: &str = "sk-test-0123456789abcdef";

const SAMPLE: &str = "那天我和朋友们一起去海边，风很大。我们聊了很多，关于过去，也关于未来。\n\
                      其实我一直觉得，生活就是这样，有希望也有失望，哈哈。";

// --- Test Setup Helper ---

struct TestEnv {
    temp_dir: TempDir,
    stylemate_path: PathBuf,
    api_base: Option<String>,
}

impl TestEnv {
    fn new() -> Self {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let stylemate_path = assert_cmd::cargo::cargo_bin("stylemate");
        Self {
            temp_dir,
            stylemate_path,
            api_base: None,
        }
    }

    fn with_server(mut self, server: &mockito::Server) -> Self {
        self.api_base = Some(server.url());
        self
    }

    fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    fn stylemate(&self) -> Command {
        let mut cmd = Command::new(&self.stylemate_path);
        cmd.current_dir(self.path());
        cmd.env("HOME", self.path());
        cmd.env("USERPROFILE", self.path());
        cmd.env("APPDATA", self.path());
        cmd.env("XDG_CONFIG_HOME", self.path().join(".config"));
        cmd.env("NO_COLOR", "1");
        for var in [
            "DEEPSEEK_API_KEY",
            "ALL_PROXY",
            "all_proxy",
            "HTTPS_PROXY",
            "https_proxy",
            "HTTP_PROXY",
            "http_proxy",
        ] {
            cmd.env_remove(var);
        }
        if let Some(api_base) = &self.api_base {
            cmd.env("STYLEMATE_LLM__API_BASE", api_base);
            cmd.env("STYLEMATE_LLM__API_KEY", TEST_API_KEY);
        }
        cmd
    }

    fn add_sample(&self, text: &str) {
        self.stylemate()
            .args(["add", "--text", text])
            .assert()
            .success();
    }
}

fn mock_chat(server: &mut mockito::Server, content: &str) -> mockito::Mock {
    let body = serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "model": "deepseek-chat",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    });
    server
        .mock("POST", "/chat/completions")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create()
}

// --- Tests ---

#[test]
fn test_init_creates_config_once() {
    let env = TestEnv::new();
    env.stylemate()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("已创建配置文件"));

    env.stylemate()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("配置文件已存在"))
        .stdout(predicate::str::contains("API Key: 未设置"));
}

#[test]
fn test_init_shows_masked_api_key() {
    let env = TestEnv::new();
    env.stylemate().arg("init").assert().success();

    env.stylemate()
        .arg("init")
        .env("STYLEMATE_LLM__API_KEY", TEST_API_KEY)
        .assert()
        .success()
        .stdout(predicate::str::contains("API Key: sk-test...cdef"))
        .stdout(predicate::str::contains(TEST_API_KEY).not());
}

#[test]
fn test_add_list_and_remove() {
    let env = TestEnv::new();
    env.stylemate()
        .args(["add", "--text", "这是一篇测试样本。", "--title", "测试"])
        .assert()
        .success()
        .stdout(predicate::str::contains("已添加样本"));

    let output = env.stylemate().arg("list").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("测试"));
    assert!(stdout.contains("共 1 篇，9 字"));

    // 第一列是样本 id
    let id = stdout
        .lines()
        .find(|l| l.contains("测试"))
        .and_then(|l| l.split_whitespace().next())
        .map(|s| s.to_string())
        .expect("sample row");

    env.stylemate()
        .args(["remove", &id, "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("已删除样本"));

    env.stylemate()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("文风库为空"));
}

#[test]
fn test_add_rejects_unsupported_files() {
    let env = TestEnv::new();
    let pdf = env.write_file("paper.pdf", "%PDF-1.4");
    env.stylemate()
        .args(["add", "--file"])
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("不支持的文件格式"));
}

#[test]
fn test_add_file_with_cleaning() {
    let env = TestEnv::new();
    let file = env.write_file(
        "article.md",
        "第一段的正文内容在这里。\n长按二维码关注\n\n\n\n第二段的正文内容在这里。",
    );
    env.stylemate()
        .args(["add", "--clean", "--file"])
        .arg(&file)
        .assert()
        .success();

    env.stylemate()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("article.md"))
        .stdout(predicate::str::contains("共 1 篇，26 字"));
}

#[test]
fn test_analyze_empty_library() {
    let env = TestEnv::new();
    env.stylemate()
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("没有可分析的内容"));
}

#[test]
fn test_analyze_then_describe() {
    let env = TestEnv::new();
    env.add_sample(SAMPLE);

    env.stylemate()
        .arg("analyze")
        .assert()
        .success()
        .stdout(predicate::str::contains("文风分析完成"))
        .stdout(predicate::str::contains("平均句长"));

    env.stylemate()
        .arg("describe")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("写作风格特征"))
        .stdout(predicate::str::contains("【模仿要点】"));

    env.stylemate()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("最近一次分析: regex"));
}

#[test]
fn test_analyze_files_as_json() {
    let env = TestEnv::new();
    let file = env.write_file("sample.txt", SAMPLE);

    let output = env.stylemate().args(["analyze", "--json"]).arg(&file).output().unwrap();
    assert!(output.status.success());
    let profile: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(profile["analysisMethod"], "regex");
    assert_eq!(profile["perspective"]["dominant"], "first");

    // 分析文件不写入文风库
    env.stylemate()
        .arg("describe")
        .assert()
        .failure()
        .stderr(predicate::str::contains("还没有分析结果"));
}

#[test]
fn test_describe_profile_file() {
    let env = TestEnv::new();
    let file = env.write_file("sample.txt", SAMPLE);
    let output = env.stylemate().args(["analyze", "--json"]).arg(&file).output().unwrap();
    let profile = env.write_file("profile.json", &String::from_utf8_lossy(&output.stdout));

    env.stylemate()
        .args(["describe", "--profile"])
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("主要视角：第一人称"));
}

#[test]
fn test_clean_prints_cleaned_text() {
    let env = TestEnv::new();
    let file = env.write_file(
        "wechat.txt",
        "正文第一段写在这里。\n点击上方蓝字关注我们\n正文第二段写在这里。",
    );
    env.stylemate()
        .arg("clean")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("正文第一段写在这里。\n正文第二段写在这里。"))
        .stdout(predicate::str::contains("蓝字").not());
}

#[test]
fn test_export_and_import() {
    let env = TestEnv::new();
    env.add_sample(SAMPLE);
    env.stylemate().arg("analyze").assert().success();

    let export = env.path().join("backup.json");
    env.stylemate()
        .env("STYLEMATE_LLM__API_KEY", "sk-secret-should-not-leak")
        .arg("export")
        .arg(&export)
        .assert()
        .success();
    let exported = fs::read_to_string(&export).unwrap();
    assert!(exported.contains("\"version\": \"1.0\""));
    assert!(!exported.contains("sk-secret-should-not-leak"));

    env.stylemate().args(["clear", "--yes"]).assert().success();
    env.stylemate()
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("文风库为空"));

    env.stylemate()
        .arg("import")
        .arg(&export)
        .assert()
        .success()
        .stdout(predicate::str::contains("已导入 1 篇样本"));
    env.stylemate()
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("最近一次分析: regex"));
}

#[test]
fn test_import_rejects_unknown_version() {
    let env = TestEnv::new();
    let bundle = env.write_file(
        "backup.json",
        r#"{"version":"2.0","exportDate":"2024-01-01T00:00:00Z","data":{"styleLibrary":{}}}"#,
    );
    env.stylemate()
        .arg("import")
        .arg(&bundle)
        .assert()
        .failure()
        .stderr(predicate::str::contains("不支持的数据版本"));
}

#[test]
fn test_analyze_ai_requires_api_key() {
    let env = TestEnv::new();
    env.add_sample(SAMPLE);
    env.stylemate()
        .args(["analyze", "--ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API Key"));
}

#[test]
fn test_analyze_with_ai() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    env.add_sample(SAMPLE);

    let analysis = "```json\n{\"languageStyle\":{\"tone\":\"温和怀旧\",\"avgSentenceLength\":\"约 12 字\"},\
                    \"overallSummary\":\"平实温暖\",\"writingGuidance\":[\"多写具体场景\"]}\n```";
    let mock = mock_chat(&mut server, analysis);

    env.stylemate()
        .args(["analyze", "--ai"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AI"))
        .stdout(predicate::str::contains("语气：温和怀旧"))
        .stdout(predicate::str::contains("7–17 字"))
        .stdout(predicate::str::contains("多写具体场景"));
    mock.assert();

    env.stylemate()
        .arg("list")
        .assert()
        .stdout(predicate::str::contains("最近一次分析: AI"));
}

#[test]
fn test_analyze_with_ai_malformed_reply() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    env.add_sample(SAMPLE);
    let _mock = mock_chat(&mut server, "抱歉，我无法完成分析。");

    env.stylemate()
        .args(["analyze", "--ai"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("不是有效的 JSON"))
        .stderr(predicate::str::contains("去掉 --ai"));
}

#[test]
fn test_rate_limit_is_reported() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body(r#"{"error":{"message":"Rate limit reached"}}"#)
        .create();

    env.stylemate()
        .args(["write", "写一句话"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("额度不足"))
        .stderr(predicate::str::contains("Rate limit reached"));
}

#[test]
fn test_write_uses_style_description() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    env.add_sample(SAMPLE);
    env.stylemate().arg("analyze").assert().success();

    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::Regex("写作风格特征".to_string()))
        .with_status(200)
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"海风吹过来，我们都没说话。"}}]}"#)
        .create();

    env.stylemate()
        .args(["write", "帮我写一段海边的回忆"])
        .assert()
        .success()
        .stdout(predicate::str::contains("海风吹过来，我们都没说话。"));
    mock.assert();
}

#[test]
fn test_write_without_style() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    env.add_sample(SAMPLE);
    env.stylemate().arg("analyze").assert().success();

    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::Regex("写作风格特征".to_string()))
        .expect(0)
        .create();
    let _fallback = mock_chat(&mut server, "好的。");

    env.stylemate()
        .args(["write", "--no-style", "你好"])
        .assert()
        .success()
        .stdout(predicate::str::contains("好的。"));
    mock.assert();
}

#[test]
fn test_write_stream() {
    let mut server = mockito::Server::new();
    let env = TestEnv::new().with_server(&server);
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(mockito::Matcher::PartialJsonString(r#"{"stream": true}"#.to_string()))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(
            "data: {\"choices\":[{\"delta\":{\"content\":\"春眠\"}}]}\n\n\
             data: {\"choices\":[{\"delta\":{\"content\":\"不觉晓\"}}]}\n\n\
             data: [DONE]\n\n",
        )
        .create();

    env.stylemate()
        .args(["write", "--stream", "写一句诗"])
        .assert()
        .success()
        .stdout(predicate::str::contains("春眠不觉晓"));
    mock.assert();
}
