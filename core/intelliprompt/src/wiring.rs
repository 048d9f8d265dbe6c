//! 配線: 標準アダプタで App を組み立てる

use std::sync::Arc;

use common::adapter::{
    FileJsonLog, FileKeyValueStore, MemoryKeyValueStore, NoopLog, StdClock, StdEnvResolver,
    StdFileSystem, StdIdGenerator, StderrMirrorLog,
};
use common::domain::HomeDir;
use common::error::Error;
use common::llm::{create_generator, GeneratorKind, GeneratorSettings};
use common::ports::outbound::{
    Clock, Confirmation, EnvResolver, FileSystem, KeyValueStore, Log,
};
use common::store::{PromptStore, StoreDeps, StoreSettings, DEFAULT_USER_LABEL};

use crate::adapter::{
    load_app_config, AssumeYesConfirmation, CliConfirmation, ConsoleObserver,
    NonInteractiveConfirmation,
};
use crate::cli::Config;
use crate::usecase::generate::{GenerationDeps, GenerationUseCase};
use crate::usecase::transfer::TransferUseCase;

/// provider 未指定時の生成クライアント
const DEFAULT_PROVIDER: &str = "gemini";

/// 配線済みのアプリケーション（Runner が所有する）
pub struct App {
    pub store: PromptStore,
    pub transfer: TransferUseCase,
    pub logger: Arc<dyn Log>,
    generator_kind: GeneratorKind,
    generator_settings: GeneratorSettings,
}

impl App {
    /// 生成ユースケースを組み立てる。API キー不足などはここで Err になる
    pub fn generation(&self) -> Result<GenerationUseCase, Error> {
        let generator = create_generator(self.generator_kind, self.generator_settings.clone())?;
        Ok(GenerationUseCase::new(GenerationDeps {
            generator: Arc::from(generator),
            log: Arc::clone(&self.logger),
        }))
    }

    pub fn generator_kind(&self) -> GeneratorKind {
        self.generator_kind
    }
}

/// 環境変数からホームを解決して App を組み立てる
pub fn wire_app(config: &Config) -> Result<App, Error> {
    let env_resolver = StdEnvResolver;
    let home = env_resolver.resolve_home_dir()?;
    wire_app_at(config, home, &env_resolver)
}

/// ホームを指定して App を組み立てる（テストからも使う）
pub fn wire_app_at(
    config: &Config,
    home: HomeDir,
    env_resolver: &dyn EnvResolver,
) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);

    let base_log: Arc<dyn Log> = if config.ephemeral {
        Arc::new(NoopLog)
    } else {
        Arc::new(FileJsonLog::new(Arc::clone(&fs), home.log_file()))
    };
    let logger: Arc<dyn Log> = if config.verbose {
        Arc::new(StderrMirrorLog::new(base_log))
    } else {
        base_log
    };

    let kv: Arc<dyn KeyValueStore> = if config.ephemeral {
        Arc::new(MemoryKeyValueStore::new())
    } else {
        Arc::new(FileKeyValueStore::new(Arc::clone(&fs), home.storage_dir()))
    };

    // --yes は --no-interactive より優先
    let confirmation: Arc<dyn Confirmation> = if config.assume_yes {
        Arc::new(AssumeYesConfirmation)
    } else if config.non_interactive {
        Arc::new(NonInteractiveConfirmation)
    } else {
        Arc::new(CliConfirmation::new())
    };

    let app_config = load_app_config(fs.as_ref(), &home)?;

    let provider = config
        .provider
        .as_ref()
        .map(|p| p.to_string())
        .or_else(|| app_config.provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
    let generator_kind = GeneratorKind::from_str(&provider).ok_or_else(|| {
        Error::invalid_argument(format!(
            "Unknown provider '{}'. Expected one of: gemini, endpoint, echo",
            provider
        ))
    })?;
    let generator_settings = GeneratorSettings {
        model: config
            .model
            .as_ref()
            .map(|m| m.to_string())
            .or_else(|| app_config.model.clone()),
        api_key: env_resolver.api_key(),
        endpoint_url: app_config.endpoint.clone(),
    };

    let clock: Arc<dyn Clock> = Arc::new(StdClock);
    let mut store = PromptStore::hydrate(
        StoreDeps {
            kv,
            clock: Arc::clone(&clock),
            ids: Arc::new(StdIdGenerator::new(clock)),
            confirmation,
            log: Arc::clone(&logger),
        },
        StoreSettings {
            user_label: app_config
                .user_label
                .clone()
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_LABEL.to_string()),
            preferred_theme: env_resolver.preferred_theme(),
        },
    );
    store.subscribe(Arc::new(ConsoleObserver::stderr()));

    Ok(App {
        store,
        transfer: TransferUseCase::new(fs),
        logger,
        generator_kind,
        generator_settings,
    })
}
