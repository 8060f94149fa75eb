// scanner.rs
use super::{Config, ScanError};
use super::paths::GIT_PATHS;
use super::report::{DomainResult, Finding, Reporter, ScanSummary};
use reqwest::Client;
use reqwest::header::{HeaderValue, CONTENT_LENGTH};
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use chrono::Local;
use std::time::{Duration, Instant};

/// 补全scheme并剥掉一个结尾斜杠
pub fn normalize_domain(raw: &str) -> String {
    let domain = if !raw.starts_with("http://") && !raw.starts_with("https://") {
        format!("https://{}", raw)
    } else {
        raw.to_string()
    };

    match domain.strip_suffix('/') {
        Some(stripped) => stripped.to_string(),
        None => domain,
    }
}

fn parse_content_length(value: Option<&HeaderValue>) -> u64 {
    value
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

async fn check_path(client: &Client, domain: &str, path: &str, verbose: bool) -> Option<Finding> {
    // 先构建URL, 错误输出里总能带上当前URL
    let url = format!("{}/.git/{}", domain, path);

    match client.head(&url).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            if !matches!(status, 200 | 301 | 302 | 307 | 308) {
                return None;
            }

            let size = parse_content_length(response.headers().get(CONTENT_LENGTH));
            if verbose {
                println!("[+] 发现: {} (状态: {}, 大小: {})", url, status, size);
            }

            Some(Finding {
                path: path.to_string(),
                status_code: status,
                content_length: size,
            })
        }
        Err(e) => {
            // 单个路径失败直接跳过, 不重试
            if verbose {
                println!("[-] 检查 {} 出错: {}", url, e);
            }
            None
        }
    }
}

/// 对单个域名按字典顺序串行探测全部路径
pub async fn scan_domain(
    client: &Client,
    raw_domain: &str,
    delay: Duration,
    verbose: bool,
) -> DomainResult {
    let domain = normalize_domain(raw_domain);
    let mut findings = Vec::new();

    for path in GIT_PATHS {
        if let Some(finding) = check_path(client, &domain, path, verbose).await {
            findings.push(finding);
        }
        // 自限速: 每次请求后固定延迟, 最后一个路径之后也不例外
        tokio::time::sleep(delay).await;
    }

    DomainResult { domain, findings }
}

fn build_client(config: &Config) -> Result<Client, ScanError> {
    let mut client_builder = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        // 扫描对象大多证书不齐, 默认跳过证书校验
        .danger_accept_invalid_certs(!config.verify_tls);

    // 配置代理
    if let Some(proxy_url) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy_url)
            .map_err(|e| ScanError::InvalidConfig(format!("代理配置错误: {}", e)))?;
        client_builder = client_builder.proxy(proxy);
    }

    let client = client_builder.build()
        .map_err(|e| ScanError::ClientError(format!("创建HTTP客户端失败: {}", e)))?;

    Ok(client)
}

pub async fn run_scan(config: Config, domains: Vec<String>) -> Result<ScanSummary, ScanError> {
    // 验证配置
    config.validate()?;

    print_banner();
    println!("[*] 开始扫描 {} 个域名...", domains.len());

    // 初始化客户端
    let client = build_client(&config)?;
    let reporter = Reporter::new(config.output.clone());
    let delay = Duration::from_secs_f64(config.delay);
    let total = domains.len();

    // 创建进度条
    let pb = ProgressBar::new(total as u64);
    pb.set_style(ProgressStyle::default_bar()
        .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
        .unwrap()
        .progress_chars("##-"));

    let overall_start = Instant::now();
    let mut vulnerable_count = 0usize;

    // 域名级别的固定工作池: 同时最多threads个域名在扫, 域内路径保持串行
    let mut results = stream::iter(domains)
        .map(|raw| {
            let client = client.clone();
            let pb = pb.clone();
            let verbose = config.verbose;

            async move {
                pb.set_message(format!("扫描: {}", raw));
                let result = scan_domain(&client, &raw, delay, verbose).await;
                pb.inc(1);
                result
            }
        })
        .buffer_unordered(config.threads);

    // 按完成顺序消费结果; 单消费者写报告, 块之间不会交错
    while let Some(result) = results.next().await {
        if result.is_vulnerable() {
            vulnerable_count += 1;
            println!("\n[!] 发现暴露的Git仓库: {}", result.domain);
            if let Err(e) = reporter.write(&result) {
                // 单个域名的报告失败不中断批次
                println!("[-] 写入 {} 的报告失败: {}", result.domain, e);
            }
        } else if config.verbose {
            println!("[-] 未发现Git泄露: {}", result.domain);
        }
    }

    pb.finish_with_message("扫描完成");

    let summary = ScanSummary {
        domains_scanned: total,
        vulnerable_count,
        scan_timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        scan_duration: overall_start.elapsed().as_secs(),
    };
    print_summary(&summary);

    Ok(summary)
}

fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════╗
║    Git Repository Exposure Scanner    ║
╚═══════════════════════════════════════╝
"#;
    println!("{}", banner);
}

fn print_summary(summary: &ScanSummary) {
    println!("\n=== 扫描摘要 ===");
    println!("扫描域名数: {}", summary.domains_scanned);
    println!("存在泄露的域名数: {}", summary.vulnerable_count);
    println!("扫描耗时: {}秒", summary.scan_duration);
    println!("扫描时间戳: {}", summary.scan_timestamp);
}
