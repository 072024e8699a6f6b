use clap::error::ErrorKind;
use clap::Parser;
use earth_saver_devtools::app::asset_helper::{run_asset_command, unknown_command_help};
use earth_saver_devtools::config::cli::AssetArgs;
use earth_saver_devtools::utils::{logger, validation::Validate};
use earth_saver_devtools::DevToolsConfig;

// 不論驗證結果如何，結束碼一律為 0
fn main() {
    let args = match AssetArgs::try_parse() {
        Ok(args) => args,
        Err(e) => {
            match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = e.print();
                }
                // 無法辨識的旗標一律當成未知指令
                _ => println!("{}", unknown_command_help()),
            }
            return;
        }
    };

    logger::init_cli_logger(args.verbose);

    let mut config = match DevToolsConfig::load(args.config.as_deref(), args.root.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Failed to load configuration: {}", e);
            println!("❌ {}", e.user_friendly_message());
            println!("💡 {}", e.recovery_suggestion());
            return;
        }
    };
    args.apply_to(&mut config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        println!("❌ {}", e.user_friendly_message());
        println!("💡 {}", e.recovery_suggestion());
        return;
    }

    println!("{}", run_asset_command(args.command.as_deref(), &config.assets));
}
