// 扫描流程集成测试, 用wiremock模拟暴露的站点
use std::path::PathBuf;
use std::time::{Duration, Instant};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use git_scan::function::config::Config;
use git_scan::function::paths::GIT_PATHS;
use git_scan::function::report::Finding;
use git_scan::function::scanner::{run_scan, scan_domain};

fn test_config(threads: usize, delay: f64, output: Option<PathBuf>) -> Config {
    Config {
        file: PathBuf::from("domains.txt"),
        output,
        threads,
        delay,
        timeout: 10,
        proxy: None,
        verify_tls: false,
        verbose: false,
    }
}

#[tokio::test]
async fn exposed_config_yields_single_finding() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/.git/config"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 1234]))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = scan_domain(&client, &server.uri(), Duration::from_millis(0), false).await;

    assert_eq!(result.domain, server.uri());
    assert_eq!(
        result.findings,
        vec![Finding {
            path: "config".to_string(),
            status_code: 200,
            content_length: 1234,
        }]
    );
}

#[tokio::test]
async fn clean_domain_has_no_findings() {
    // 不挂载任何mock, 所有路径都返回404
    let server = MockServer::start().await;

    let client = reqwest::Client::new();
    let result = scan_domain(&client, &server.uri(), Duration::from_millis(0), false).await;

    assert!(result.findings.is_empty());
}

#[tokio::test]
async fn redirect_without_content_length_defaults_to_zero() {
    let server = MockServer::start().await;
    // 301不带Location, 客户端不会继续跳转, 状态原样返回
    Mock::given(method("HEAD"))
        .and(path("/.git/HEAD"))
        .respond_with(ResponseTemplate::new(301))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = scan_domain(&client, &server.uri(), Duration::from_millis(0), false).await;

    assert_eq!(result.findings.len(), 1);
    assert_eq!(result.findings[0].path, "HEAD");
    assert_eq!(result.findings[0].status_code, 301);
    assert_eq!(result.findings[0].content_length, 0);
}

#[tokio::test]
async fn findings_follow_dictionary_order() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/.git/config"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/.git/HEAD"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = reqwest::Client::new();
    let result = scan_domain(&client, &server.uri(), Duration::from_millis(0), false).await;

    let paths: Vec<&str> = result.findings.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["HEAD", "config"]);
}

#[tokio::test]
async fn single_thread_respects_per_request_delay() {
    let server = MockServer::start().await;
    let domains = vec![server.uri(), server.uri(), server.uri()];
    let delay = 0.01;
    let config = test_config(1, delay, None);

    let start = Instant::now();
    let summary = run_scan(config, domains).await.unwrap();
    let elapsed = start.elapsed();

    assert_eq!(summary.domains_scanned, 3);
    assert_eq!(summary.vulnerable_count, 0);

    // 串行扫描的耗时下限: 域名数 × 路径数 × 延迟
    let floor = Duration::from_secs_f64(3.0 * GIT_PATHS.len() as f64 * delay);
    assert!(elapsed >= floor, "耗时 {:?} 低于下限 {:?}", elapsed, floor);
}

#[tokio::test]
async fn output_file_accumulates_reports() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/.git/config"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![b'x'; 64]))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("report.txt");

    for _ in 0..2 {
        let config = test_config(2, 0.0, Some(report_path.clone()));
        let summary = run_scan(config, vec![server.uri()]).await.unwrap();
        assert_eq!(summary.vulnerable_count, 1);
    }

    // 追加写入, 两个报告块都在且各自完整
    let content = std::fs::read_to_string(&report_path).unwrap();
    assert_eq!(content.matches("Results for ").count(), 2);
    assert_eq!(content.matches(&"=".repeat(50)).count(), 2);
    assert_eq!(content.matches(&"-".repeat(30)).count(), 2);
}

#[tokio::test]
async fn report_write_failure_does_not_abort_batch() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/.git/config"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // 输出目录不存在, 报告写入会失败, 但扫描照常完成
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing").join("report.txt");
    let config = test_config(2, 0.0, Some(missing));

    let summary = run_scan(config, vec![server.uri()]).await.unwrap();
    assert_eq!(summary.vulnerable_count, 1);
}

#[tokio::test]
async fn unreachable_host_is_skipped_without_findings() {
    // 端口没人监听, 每个路径都是连接错误, 全部跳过
    let client = reqwest::Client::new();
    let result = scan_domain(
        &client,
        "http://127.0.0.1:1",
        Duration::from_millis(0),
        false,
    )
    .await;

    assert_eq!(result.domain, "http://127.0.0.1:1");
    assert!(result.findings.is_empty());
}
