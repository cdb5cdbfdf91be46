use anyhow::Context;
use clap::Parser;
use small_roster::utils::logger;
use small_roster::{CliConfig, Console, LocalStorage, RosterConfig, Settings};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 로그 초기화
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting small-roster");
    tracing::debug!("CLI config: {:?}", cli);

    // 설정 파일 로드 (검증은 Settings::resolve 에서 한 번만)
    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = RosterConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path))?;
            Some(config)
        }
        None => None,
    };

    // CLI 인자를 설정 파일 위에 덮어쓰기
    let settings = match Settings::resolve(&cli, file_config.as_ref()) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let default_export_path = settings.default_export_path.clone();
    let mut console = Console::new(settings, LocalStorage::default(), default_export_path);

    // 콘솔 실행: quit 또는 입력 끝까지
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    console
        .run(stdin.lock(), &mut out)
        .context("Console I/O failed")?;

    Ok(())
}
