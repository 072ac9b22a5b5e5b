use std::path::{Path, PathBuf};
use std::time::Instant;
use crate::config::config_manager::ConfigManager;
use crate::enums::commands::Commands;
use crate::enums::report_format::ReportFormat;
use crate::errors::{LungLensError, LungLensResult};
use crate::logger::animated_logger::AnimatedLogger;
use crate::logger::result_logger::ResultLogger;
use crate::services::ai_providers::provider_factory::ProviderFactory;
use crate::services::ct_scan_analyzer::CtScanAnalyzer;
use crate::services::history_store::HistoryStore;
use crate::services::image_loader::ImageLoader;
use crate::services::image_summarizer::ImageSummarizer;
use crate::services::report_exporter::ReportExporter;
use crate::structs::analysis_report::AnalysisReport;
use crate::structs::analysis_request::AnalysisRequest;
use crate::structs::config::ai_config::AiConfig;
use crate::structs::config::config::Config;
use crate::structs::user::User;
use crate::ui::app_context::AppContext;
use crate::ui::web_server::WebServer;

const CLI_USER_ENV: &str = "USER";

pub struct CommandRunner {
    start_time: Option<Instant>,
}

impl CommandRunner {
    pub fn new() -> Self {
        Self { start_time: None }
    }

    pub async fn run_command(&mut self, command: Commands) -> LungLensResult<()> {
        self.start_time = Some(Instant::now());

        let result = match command {
            Commands::Init => self.init_command(),
            Commands::Validate => self.validate_command(),
            Commands::Analyze { image, provider, model, report, json } => {
                self.analyze_command(&image, provider, model, report, json).await
            }
            Commands::Summarize { image, provider, model } => self.summarize_command(&image, provider, model).await,
            Commands::History => self.history_command(),
            Commands::Serve { port, open } => self.serve_command(port, open).await,
        };

        if let Some(start) = self.start_time {
            log::info!("⏱️  Command completed in {:.2}s", start.elapsed().as_secs_f64());
        }

        result
    }

    fn init_command(&self) -> LungLensResult<()> {
        log::info!("🚀 Initializing lunglens configuration...");

        let path = ConfigManager::create_sample_config()?;
        log::info!("✅ Configuration file created at {}", path.display());
        log::info!("🔑 Export the API key variable named under [ai] before analyzing.");
        log::info!("🔧 Run 'lunglens validate' to check your configuration.");
        Ok(())
    }

    fn validate_command(&self) -> LungLensResult<()> {
        log::info!("🔍 Validating lunglens configuration...");

        let config = Self::load_config()?;
        log::info!("✅ Configuration file loaded successfully");

        if let Err(issues) = ConfigManager::validate_config(&config) {
            for issue in &issues {
                log::error!("   ❌ {}", issue);
            }
            return Err(LungLensError::config_error(
                &format!("{} configuration issue(s) found", issues.len()),
                None,
                Some("Fix the fields listed above and run 'lunglens validate' again"),
            ));
        }

        let kind = ProviderFactory::provider_kind(&config.ai)?;
        let key_env = ProviderFactory::api_key_env(&config.ai, kind);
        if std::env::var(&key_env).map(|v| v.trim().is_empty()).unwrap_or(true) {
            log::warn!("⚠️ {} is not set; analysis requests will fail", key_env);
        }

        log::info!("✅ Configuration is valid");
        log::info!(
            "🤖 Provider: {} ({})",
            kind.as_str(),
            config.ai.model.as_deref().unwrap_or(kind.default_model())
        );
        Ok(())
    }

    async fn analyze_command(
        &self,
        image: &Path,
        provider: Option<String>,
        model: Option<String>,
        report: Option<String>,
        json: bool,
    ) -> LungLensResult<()> {
        let config = Self::load_config()?;
        let ai_config = Self::ai_config_with_overrides(&config, provider, model);

        let report_format = report
            .map(|r| r.parse::<ReportFormat>())
            .transpose()
            .map_err(|e| LungLensError::user_input_error("--report", "markdown, html or json", &e))?;

        let loaded = ImageLoader::load(image)?;
        let analyzer = CtScanAnalyzer::new(ProviderFactory::create(&ai_config)?);
        let request = AnalysisRequest::from_data_uri(&loaded.data_uri);

        let mut spinner = AnimatedLogger::new(format!("Analyzing {}", loaded.file_info.name));
        spinner.start();
        let (result, state) = analyzer.analyze_for_display(&request).await;
        if result.is_error() {
            spinner.error("Analysis failed").await;
        } else {
            spinner.stop("Analysis complete").await;
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            ResultLogger::print_analysis(&result, state, Some(&loaded.file_info));
        }

        let format = match report_format {
            Some(format) => Some(format),
            None if config.output.save_reports => Some(config.output.report_format.parse().unwrap_or_default()),
            None => None,
        };

        if let Some(format) = format {
            let report = AnalysisReport::new(Some(loaded.file_info), result);
            let path = ReportExporter::export(&PathBuf::from(&config.output.output_dir), format, &report)?;
            log::info!("📄 Report written to {}", path.display());
        }

        Ok(())
    }

    async fn summarize_command(&self, image: &Path, provider: Option<String>, model: Option<String>) -> LungLensResult<()> {
        let config = Self::load_config()?;
        let ai_config = Self::ai_config_with_overrides(&config, provider, model);

        let loaded = ImageLoader::load(image)?;
        let summarizer = ImageSummarizer::new(ProviderFactory::create(&ai_config)?);

        let mut spinner = AnimatedLogger::new(format!("Summarizing {}", loaded.file_info.name));
        spinner.start();
        match summarizer.summarize(&AnalysisRequest::from_data_uri(&loaded.data_uri)).await {
            Ok(summary) => {
                spinner.stop("Summary complete").await;
                ResultLogger::print_summary(&summary);
                Ok(())
            }
            Err(e) => {
                spinner.error("Summary failed").await;
                Err(e)
            }
        }
    }

    fn history_command(&self) -> LungLensResult<()> {
        // The CLI has no sign-in; the local account stands in for the user.
        let email = std::env::var(CLI_USER_ENV).unwrap_or_else(|_| "local".to_string());
        let user = User { email: format!("{}@localhost", email) };

        log::info!("📚 Analysis history (sample data)");
        ResultLogger::print_history(&HistoryStore::new().list_for(Some(&user)));
        Ok(())
    }

    async fn serve_command(&self, port: Option<u16>, open: bool) -> LungLensResult<()> {
        let config = Self::load_config()?;
        if let Err(issues) = ConfigManager::validate_config(&config) {
            return Err(LungLensError::config_error(&issues.join("; "), None, Some("Run 'lunglens validate' for details")));
        }

        let classifier = ProviderFactory::create(&config.ai)?;
        let port = port.unwrap_or(config.server.port);

        log::info!("🌐 Starting LungLens web front-end...");
        log::info!("⏹️ Press Ctrl+C to stop the server");

        let server = WebServer::new(AppContext::new(classifier, config.output.clone()));
        server.start(&config.server.host, port, open).await
    }

    fn load_config() -> LungLensResult<Config> {
        ConfigManager::load().map_err(|e| {
            log::error!("❌ Failed to load configuration: {}", e);
            log::error!("💡 Run 'lunglens init' to create a configuration file.");
            e
        })
    }

    /// Apply `--provider` and `--model`. Switching provider drops settings that belong to the old one.
    fn ai_config_with_overrides(config: &Config, provider: Option<String>, model: Option<String>) -> AiConfig {
        let mut ai_config = config.ai.clone();

        if let Some(provider) = provider {
            if !provider.eq_ignore_ascii_case(&ai_config.provider) {
                ai_config.provider = provider;
                ai_config.model = None;
                ai_config.api_key_env = None;
                ai_config.base_url = None;
            }
        }
        if let Some(model) = model {
            ai_config.model = Some(model);
        }

        ai_config
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
