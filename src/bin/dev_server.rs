use clap::Parser;
use colored::*;
use earth_saver_devtools::app::report;
use earth_saver_devtools::config::cli::ServerArgs;
use earth_saver_devtools::core::server::{RequestLogEntry, RequestLogger};
use earth_saver_devtools::domain::ports::SystemBrowser;
use earth_saver_devtools::utils::{logger, validation::Validate};
use earth_saver_devtools::{DevServer, DevToolsConfig, DevToolsError};
use std::sync::Arc;

fn exit_with(e: DevToolsError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("\n❌ {}", e.user_friendly_message().red());
    eprintln!("   {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    let mut config = match DevToolsConfig::load(args.config.as_deref(), args.root.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(e),
    };
    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        exit_with(e);
    }

    // 切換到專案根目錄，之後一律以目前目錄提供檔案
    if let Some(root) = config.server.project_root.take() {
        if let Err(e) = std::env::set_current_dir(&root) {
            exit_with(DevToolsError::ConfigError {
                message: format!("cannot enter project root {}: {}", root.display(), e),
            });
        }
    }
    let project_dir = std::env::current_dir()?;

    println!("\n🎮 {}", "Earth Saver Game Server Starting...".green());

    let mut server = DevServer::new(config.server.clone());

    let checklist = match server.check_files() {
        Ok(checklist) => checklist,
        Err(e) => exit_with(e),
    };
    println!("{}", report::render_file_checklist(&checklist));

    let selection = match server.select_port() {
        Ok(selection) => selection,
        Err(e) => exit_with(e),
    };
    if let Some(note) = report::render_port_selection(&selection, config.server.port) {
        println!("{}", note.yellow());
    }

    println!(
        "{}",
        report::render_startup_banner(&config.server, selection.port, &project_dir)
    );

    let bound = match server.bind(selection.port).await {
        Ok(bound) => bound,
        Err(e) => exit_with(e),
    };

    let game_url = config.server.game_url(bound.port());
    println!("\n🚀 Server started successfully!");
    println!("🌐 Serving at: {}", game_url.green());

    let _browser = server.schedule_browser(&bound, Arc::new(SystemBrowser), |url, result| {
        println!("{}", report::render_browser_result(url, result));
    });

    println!("\n📡 Server is ready! Listening for requests...");
    println!("   (Server logs will appear below)\n");

    let request_logger: RequestLogger = Arc::new(|entry: &RequestLogEntry| {
        println!("{}", report::render_request(entry));
    });

    if let Err(e) = server.serve(bound, request_logger, shutdown_signal()).await {
        exit_with(e);
    }

    println!("\n\n🛑 {}", "Server stopped by user (Ctrl+C)".yellow());
    println!("👋 Thanks for saving the Earth! 🌍");

    Ok(())
}
