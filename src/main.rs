use clap::Parser;
use field_shaper::utils::error::Result;
use field_shaper::utils::{logger, validation::Validate};
use field_shaper::{CliConfig, ShapeEngine, ShaperConfig};
use std::io::{Read, Write};

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(path, content)?;
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(())
}

fn load_config(args: &CliConfig) -> Result<ShaperConfig> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            ShaperConfig::from_file(path)?
        }
        None => ShaperConfig::default(),
    };

    // 命令列參數優先
    args.apply_to(&mut config);
    config.validate()?;
    Ok(config)
}

fn run(args: &CliConfig) -> Result<()> {
    args.validate()?;
    let config = load_config(args)?;
    tracing::debug!("Effective config: {:?}", config);

    let input = read_input(&args.input)?;
    let engine = ShapeEngine::new(config);
    let output = engine.run(&input)?;

    write_output(args.output.as_deref(), &output)?;
    if let Some(path) = &args.output {
        tracing::info!("📁 Output saved to: {}", path);
    }
    Ok(())
}

fn main() {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::debug!("CLI args: {:?}", args);

    if let Err(e) = run(&args) {
        tracing::error!(
            "❌ Shaping failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}
