//! Sila - 文本摘要/翻译服务

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use sila::application::pipeline::TRANSIENT_RETRY_DELAY;
use sila::application::{
    CredentialResolver, DispatchPipeline, RateLimitedDispatcher, RetryPolicy, TierLimits,
};
use sila::config::{load_config_from_path, print_config, AppConfig};
use sila::infrastructure::adapters::{
    AesGcmCipher, HmacTokenService, HttpGeminiClient, HttpGeminiClientConfig,
};
use sila::infrastructure::http::{serve, AppState};
use sila::infrastructure::persistence::sqlite::{
    create_pool, run_migrations, DatabaseConfig, SqliteHistoryRepository,
    SqliteSystemConfigRepository,
};

/// Sila - text summarization and translation backend
///
/// Without a subcommand the HTTP server is started.
#[derive(Parser)]
#[command(name = "sila", version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Configuration file path (defaults to config.toml / config.local.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print a fresh base64 key for security.encryption_key
    GenerateKey,
    /// Issue a bearer token for a user id
    IssueToken {
        /// Numeric user id placed in the token's `sub` claim
        user_id: i64,
    },
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},sila={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Command::Serve);
    if let Command::GenerateKey = command {
        println!("{}", AesGcmCipher::generate_key());
        return Ok(());
    }

    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    if let Command::IssueToken { user_id } = command {
        let tokens = HmacTokenService::new(&config.auth.secret_key, config.auth.token_ttl_secs);
        let token = tokens
            .issue(user_id)
            .map_err(|e| anyhow::anyhow!("Failed to issue token: {}", e))?;
        println!("{}", token);
        return Ok(());
    }

    run_server(config).await
}

async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    init_tracing(&config);

    tracing::info!("Sila - text summarize/translate service");
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    // 初始化数据库
    let db_config = DatabaseConfig::new(&config.database.path)
        .with_max_connections(config.database.max_connections);
    let pool = create_pool(&db_config).await?;
    run_migrations(&pool).await?;

    // 创建 Repository 适配器
    let history_repo = Arc::new(SqliteHistoryRepository::new(pool.clone()));
    let config_repo = Arc::new(SqliteSystemConfigRepository::new(pool));

    let cipher = Arc::new(
        AesGcmCipher::from_base64(&config.security.encryption_key)
            .map_err(|e| anyhow::anyhow!("Invalid encryption key: {}", e))?,
    );
    let token_verifier = Arc::new(HmacTokenService::new(
        &config.auth.secret_key,
        config.auth.token_ttl_secs,
    ));

    // 创建调度流水线（进程内唯一实例，显式注入到 AppState）
    let transport = Arc::new(
        HttpGeminiClient::new(
            HttpGeminiClientConfig::new(&config.gemini.api_url)
                .with_timeout(config.gemini.timeout_secs),
        )
        .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?,
    );
    let credentials = CredentialResolver::new(
        config_repo.clone(),
        cipher.clone(),
        config.gemini.api_key.clone(),
    );
    let policy = RetryPolicy::new(
        Duration::from_secs(config.gemini.pacing_delay_secs),
        config.gemini.max_attempts,
        TRANSIENT_RETRY_DELAY,
    );
    let pipeline = Arc::new(
        DispatchPipeline::new(RateLimitedDispatcher::new(transport, credentials, policy))
            .with_max_chunk_chars(config.gemini.max_chunk_chars),
    );

    let limits = TierLimits {
        guest_max_chars: config.limits.guest_max_chars,
        user_max_chars: config.limits.user_max_chars,
    };

    let state = AppState::new(
        pipeline,
        history_repo,
        config_repo,
        cipher,
        token_verifier,
        limits,
    );

    // 启动服务器（带优雅关闭）
    serve(&config.server, state, async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("Received shutdown signal");
    })
    .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
