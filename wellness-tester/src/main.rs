mod browser;
mod common;
mod logic;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use browser::{BrowserConfig, BrowserKind, TestBridge, new_session};
use common::scenario::{Scenario, ScenarioCtx, list_scenarios, resolve_scenarios};
use common::{RunLabel, Verdict, capture_run};
use logic::{LogicTester, ScenarioResult, TesterAssets};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TestMode {
    /// Drive the journey engine directly (fast, no browser)
    Logic,
    /// Drive the served web app through WebDriver
    Browser,
    /// Run both logic and browser tests
    Both,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HeadlessMode {
    /// Run browsers in headless mode
    Headless,
    /// Run browsers with visible windows
    Windowed,
}

impl HeadlessMode {
    const fn is_headless(self) -> bool {
        matches!(self, Self::Headless)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Parser)]
#[command(name = "wellness-tester", version)]
#[command(about = "Automated QA for Journey to Wellness - journey logic and browser automation")]
struct Args {
    /// Test mode: logic (fast), browser (visual), or both
    #[arg(long, value_enum, default_value_t = TestMode::Logic)]
    mode: TestMode,

    /// Scenarios to run (comma-separated, `all` for every scenario)
    #[arg(long, default_value = "smoke")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed (logic mode only)
    #[arg(long, default_value_t = 10)]
    iterations: usize,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Journey config to test instead of the bundled one
    #[arg(long)]
    config: Option<PathBuf>,

    // Browser-specific options
    /// Browsers to run (chrome,edge,firefox,safari) - browser mode only
    #[arg(long, default_value = "chrome")]
    browsers: String,

    /// Base URL of the app (should include ?test=1 to expose the bridge)
    #[arg(long, default_value = "http://localhost:8080/?test=1")]
    base_url: String,

    /// Artifacts directory for screenshots and page sources
    #[arg(long, default_value = "target/test-artifacts")]
    artifacts_dir: String,

    /// Capture artifacts for passing browser runs too, not just failures
    #[arg(long)]
    keep_artifacts: bool,

    /// Connect to a Selenium Grid hub instead of local drivers
    #[arg(long)]
    hub: Option<String>,

    /// Run headless where supported
    #[arg(long, value_enum, default_value_t = HeadlessMode::Headless)]
    headless: HeadlessMode,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if maybe_list_scenarios(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let scenarios = resolve_scenarios(&split_csv(&args.scenarios))?;
    let seeds = parse_seeds(&args.seeds)?;
    let assets = TesterAssets::load(args.config.as_deref())?;

    let results = run_logic_scenarios(&args, &scenarios, &seeds, &assets);
    let browser_failures = run_browser_scenarios(&args, &scenarios, &seeds).await?;

    write_reports(&args, &results, start_time)?;

    if browser_failures > 0 || results.iter().any(|r| !r.passed) {
        std::process::exit(1);
    }

    Ok(())
}

fn maybe_list_scenarios(args: &Args) -> Result<bool> {
    if !args.list_scenarios {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available scenarios:")?;
    for (key, description) in list_scenarios() {
        writeln!(output_target.writer(), "  {key:22} - {description}")?;
    }
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    println!("{}", "🌱 Journey to Wellness Tester".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(String::from)
        .collect()
}

fn parse_seeds(seeds_arg: &str) -> Result<Vec<u64>> {
    split_csv(seeds_arg)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed {token:?}"))
        })
        .collect()
}

fn build_browser_config(args: &Args) -> BrowserConfig {
    BrowserConfig {
        headless: args.headless.is_headless(),
        implicit_wait_secs: 3,
        remote_hub: args.hub.clone(),
    }
}

async fn keep_run(
    args: &Args,
    driver: &thirtyfour::WebDriver,
    kind: BrowserKind,
    scenario: &str,
    seed: u64,
    verdict: Verdict,
) {
    let label = RunLabel {
        browser: kind.label().to_string(),
        scenario: scenario.to_string(),
        seed,
    };
    match capture_run(driver, Path::new(&args.artifacts_dir), label, verdict).await {
        Ok(dir) => log::info!("run artifacts written to {}", dir.display()),
        Err(err) => log::warn!("could not capture artifacts for {scenario}: {err:#}"),
    }
}

fn run_logic_scenarios(
    args: &Args,
    scenarios: &[Box<dyn Scenario>],
    seeds: &[u64],
    assets: &TesterAssets,
) -> Vec<ScenarioResult> {
    let mut results = Vec::new();
    if !matches!(args.mode, TestMode::Logic | TestMode::Both) {
        return results;
    }

    println!("{}", "🧠 Running Logic Tests".bright_yellow().bold());
    println!("{}", "-".repeat(30).yellow());

    let tester = LogicTester::new(assets, args.verbose);
    for scenario in scenarios {
        results.extend(tester.run_scenario(scenario.as_ref(), seeds, args.iterations));
    }
    results
}

/// Returns how many browser runs failed.
async fn run_browser_scenarios(
    args: &Args,
    scenarios: &[Box<dyn Scenario>],
    seeds: &[u64],
) -> Result<usize> {
    if !matches!(args.mode, TestMode::Browser | TestMode::Both) {
        return Ok(0);
    }

    println!("{}", "🌐 Running Browser Tests".bright_blue().bold());
    println!("{}", "-".repeat(30).blue());

    let mut failures = 0;
    for browser_name in split_csv(&args.browsers) {
        let Some(kind) = BrowserKind::parse(&browser_name) else {
            eprintln!("⚠️  Unknown browser: {}", browser_name.yellow());
            continue;
        };

        let cfg = build_browser_config(args);
        let driver = match new_session(kind, &cfg).await {
            Ok(d) => d,
            Err(e) => {
                eprintln!("❌ Could not start {}: {e}", kind.label());
                failures += 1;
                continue;
            }
        };

        failures += run_browser_scenarios_for_driver(args, scenarios, seeds, kind, &driver).await;
        let _ = driver.quit().await;
    }

    Ok(failures)
}

async fn run_browser_scenarios_for_driver(
    args: &Args,
    scenarios: &[Box<dyn Scenario>],
    seeds: &[u64],
    kind: BrowserKind,
    driver: &thirtyfour::WebDriver,
) -> usize {
    let mut failures = 0;
    let label = kind.label();
    for scenario in scenarios {
        if !scenario.has_browser() {
            log::debug!("{} has no browser steps, skipping", scenario.key());
            continue;
        }
        for &seed in seeds {
            let ctx = ScenarioCtx {
                base_url: args.base_url.clone(),
                seed,
                bridge: TestBridge::new(driver),
                verbose: args.verbose,
            };

            let scenario_start = Instant::now();
            match scenario.run_browser(driver, &ctx).await {
                Ok(()) => {
                    println!(
                        "✅ [{} seed {seed}] {} - {:?}",
                        label.green(),
                        scenario.key(),
                        scenario_start.elapsed()
                    );
                    if args.keep_artifacts {
                        keep_run(args, driver, kind, scenario.key(), seed, Verdict::Passed).await;
                    }
                }
                Err(e) => {
                    failures += 1;
                    eprintln!(
                        "❌ [{} seed {seed}] {} - {:?}: {e:#}",
                        label.red(),
                        scenario.key(),
                        scenario_start.elapsed()
                    );
                    let verdict = Verdict::Failed(format!("{e:#}"));
                    keep_run(args, driver, kind, scenario.key(), seed, verdict).await;
                }
            }
        }
    }
    failures
}

fn write_reports(args: &Args, results: &[ScenarioResult], start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report {
        ReportFormat::Json => {
            logic::reports::generate_json_report(&mut output_target, results)?;
        }
        ReportFormat::Markdown => {
            if results.is_empty() {
                writeln!(
                    &mut output_target,
                    "# Journey to Wellness Logic Test Results\n\n_No scenarios executed._"
                )?;
            } else {
                logic::reports::generate_markdown_report(&mut output_target, results)?;
            }
        }
        ReportFormat::Console => {
            if results.is_empty() {
                writeln!(&mut output_target, "No logic scenarios executed.")?;
            } else {
                logic::reports::generate_console_report(
                    &mut output_target,
                    results,
                    start_time.elapsed(),
                )?;
            }
            writeln!(&mut output_target)?;
            writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn base_args() -> Args {
        Args {
            mode: TestMode::Logic,
            scenarios: "smoke".to_string(),
            list_scenarios: false,
            seeds: "1337".to_string(),
            iterations: 1,
            report: ReportFormat::Json,
            verbose: false,
            output: None,
            config: None,
            browsers: "chrome".to_string(),
            base_url: "http://localhost:8080/?test=1".to_string(),
            artifacts_dir: "target/test-artifacts".to_string(),
            keep_artifacts: false,
            hub: None,
            headless: HeadlessMode::Headless,
        }
    }

    fn sample_result(passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: "smoke".to_string(),
            seed: 1337,
            passed,
            iterations_run: 3,
            successful_iterations: if passed { 3 } else { 2 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["failure".to_string()]
            },
            average_duration: Duration::from_millis(10),
        }
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("wellness-tester-{name}"))
    }

    #[test]
    fn parses_seed_lists() {
        assert_eq!(parse_seeds("1, 2,3").unwrap(), vec![1, 2, 3]);
        let err = parse_seeds("1,banana").unwrap_err();
        assert!(err.to_string().contains("banana"));
    }

    #[test]
    fn args_parse_from_command_line() {
        let args = Args::try_parse_from([
            "wellness-tester",
            "--mode",
            "both",
            "--scenarios",
            "smoke,car-unlock",
            "--report",
            "markdown",
            "--keep-artifacts",
        ])
        .unwrap();
        assert!(matches!(args.mode, TestMode::Both));
        assert_eq!(args.report, ReportFormat::Markdown);
        assert!(args.keep_artifacts);
        assert!(Args::try_parse_from(["wellness-tester", "--report", "csv"]).is_err());
    }

    #[test]
    fn run_logic_scenarios_skips_when_not_enabled() {
        let assets = TesterAssets::load_default();
        let args = Args {
            mode: TestMode::Browser,
            ..base_args()
        };
        let scenarios = resolve_scenarios(&["smoke".to_string()]).unwrap();
        let results = run_logic_scenarios(&args, &scenarios, &[42], &assets);
        assert!(results.is_empty());
    }

    #[test]
    fn run_logic_scenarios_covers_every_seed() {
        let assets = TesterAssets::load_default();
        let scenarios = resolve_scenarios(&["smoke".to_string(), "reset".to_string()]).unwrap();
        let results = run_logic_scenarios(&base_args(), &scenarios, &[1, 2], &assets);
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed));
    }

    #[test]
    fn write_reports_emits_json_for_empty_results() {
        let temp = temp_path("empty.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("[]"));
    }

    #[test]
    fn write_reports_emits_json_for_results() {
        let temp = temp_path("full.json");
        let args = Args {
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("scenario_name"));
    }

    #[test]
    fn write_reports_markdown_empty_results() {
        let temp = temp_path("empty.md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("No scenarios executed"));
    }

    #[test]
    fn write_reports_emits_markdown_report() {
        let temp = temp_path("full.md");
        let args = Args {
            report: ReportFormat::Markdown,
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(false)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("# Journey to Wellness Logic Test Results"));
        assert!(content.contains("failure"));
    }

    #[test]
    fn write_reports_console_summarizes() {
        colored::control::set_override(false);
        let temp = temp_path("console.txt");
        let args = Args {
            report: ReportFormat::Console,
            output: Some(temp.clone()),
            ..base_args()
        };
        write_reports(&args, &[sample_result(true)], Instant::now()).unwrap();
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Success rate: 100.0%"));
        assert!(content.contains("Total time"));
    }

    #[test]
    fn maybe_list_scenarios_writes_output() {
        let temp = temp_path("scenarios.txt");
        let args = Args {
            list_scenarios: true,
            output: Some(temp.clone()),
            ..base_args()
        };
        assert!(maybe_list_scenarios(&args).unwrap());
        let content = std::fs::read_to_string(temp).unwrap();
        assert!(content.contains("Available scenarios"));
        assert!(content.contains("car-unlock"));
    }

    #[test]
    fn maybe_list_scenarios_returns_false_when_disabled() {
        assert!(!maybe_list_scenarios(&base_args()).unwrap());
    }

    #[test]
    fn output_target_stdout_writes() {
        let mut target = OutputTarget::new(None).unwrap();
        target.write_all(b"ok").unwrap();
        target.flush().unwrap();
    }

    #[test]
    fn build_browser_config_respects_headless_and_hub() {
        let mut args = base_args();
        args.headless = HeadlessMode::Windowed;
        args.hub = Some("http://remote.example".to_string());
        let cfg = build_browser_config(&args);
        assert!(!cfg.headless);
        assert_eq!(cfg.remote_hub.as_deref(), Some("http://remote.example"));
    }

    #[test]
    fn split_csv_trims_and_drops_empty_entries() {
        assert_eq!(
            split_csv(" smoke, ,car-unlock,  reset "),
            vec!["smoke", "car-unlock", "reset"]
        );
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn run_browser_scenarios_skips_when_not_enabled() {
        let scenarios = resolve_scenarios(&["smoke".to_string()]).unwrap();
        let failures = tokio_test::block_on(run_browser_scenarios(&base_args(), &scenarios, &[42]))
            .expect("browser scenarios should skip");
        assert_eq!(failures, 0);
    }

    #[test]
    fn run_browser_scenarios_ignores_unknown_browser() {
        let args = Args {
            mode: TestMode::Browser,
            browsers: "netscape".to_string(),
            ..base_args()
        };
        let scenarios = resolve_scenarios(&["smoke".to_string()]).unwrap();
        let failures = tokio_test::block_on(run_browser_scenarios(&args, &scenarios, &[42]))
            .expect("unknown browser should be skipped");
        assert_eq!(failures, 0);
    }
}
