use clap::Parser;
use visitor_counter::core::{ConfigProvider, DisplaySurface};
use visitor_counter::utils::error::CounterError;
use visitor_counter::utils::{logger, validation::Validate};
use visitor_counter::{
    CliConfig, ContractCheck, CountFetcher, CounterConfig, CounterWidget, HtmlFileDisplay,
    StdoutDisplay,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting visitor-counter");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(e, true),
    };
    tracing::debug!("Resolved config: {:?}", config);

    if cli.check {
        if let Err(e) = run_check(&config).await {
            exit_with(e, true);
        }
    } else if let Err(e) = run_widget(&config).await {
        exit_with(e, false);
    }
    Ok(())
}

async fn run_check(config: &CounterConfig) -> visitor_counter::Result<()> {
    let report = ContractCheck::new(config)?.run().await?;
    println!("✅ {} answered HTTP {}", report.endpoint_url, report.status);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::debug!("Could not serialize contract report: {}", e),
    }
    Ok(())
}

/// Render path. Load failures were already reported by the widget.
async fn run_widget(config: &CounterConfig) -> visitor_counter::Result<()> {
    let fetcher = match CountFetcher::new(config) {
        Ok(fetcher) => fetcher,
        Err(e) => exit_with(e, true),
    };
    match &config.html_path {
        Some(path) => render(fetcher, HtmlFileDisplay::new(path), config).await,
        None => render(fetcher, StdoutDisplay, config).await,
    }
}

async fn render<D: DisplaySurface>(
    fetcher: CountFetcher,
    display: D,
    config: &CounterConfig,
) -> visitor_counter::Result<()> {
    let widget = CounterWidget::new(fetcher, display, config.element_id());
    let count = widget.load().await?;
    tracing::info!("✅ Rendered count {} into #{}", count, widget.element_id());
    Ok(())
}

fn exit_with(e: CounterError, log: bool) -> ! {
    if log {
        tracing::error!(
            "❌ visitor-counter failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
    }
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(e.exit_code())
}
