use clap::Parser;
use major_mnemonic::adapters::dictionary::find_dictionary;
use major_mnemonic::core::phoneme::{parse_digit_string, rules};
use major_mnemonic::core::ConfigProvider;
use major_mnemonic::domain::model::join_digits;
use major_mnemonic::utils::error::{ErrorSeverity, MnemonicError};
use major_mnemonic::utils::{logger, validation::Validate};
use major_mnemonic::{
    parse_digits, to_mnemonic, CliConfig, LocalStorage, MnemonicEngine, MnemonicPipeline,
    TomlConfig,
};
use std::time::Instant;

fn main() {
    let mut config = CliConfig::parse();

    // The file may set the log level, so it is read before the logger starts.
    let loaded = load_file_config(&mut config);

    if config.log_json {
        logger::init_json_logger(config.verbose, config.log_level.as_deref());
    } else {
        logger::init_cli_logger(config.verbose, config.log_level.as_deref());
    }

    tracing::info!("Starting major-mnemonic");
    if let (Some(path), Ok(())) = (&config.config, &loaded) {
        tracing::info!("Configuration loaded from {}", path);
    }
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = loaded.and_then(|_| config.validate()) {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("{}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.rules {
        print!("{}", rules());
        return;
    }

    if let Some(text) = &config.string {
        println!("Input: {}", text);
        println!("Digits: {}", join_digits(&parse_digits(text), ", "));
        println!("Mnemonic: {}", to_mnemonic(text));
        return;
    }

    if let Err(e) = run(config) {
        tracing::error!(
            "Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("{}", e.user_friendly_message());
        eprintln!("Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };

        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

fn load_file_config(config: &mut CliConfig) -> major_mnemonic::Result<()> {
    if let Some(path) = config.config.clone() {
        let file_config = TomlConfig::from_file(&path)?;
        file_config.validate()?;
        config.merge_file_config(&file_config);
    }
    Ok(())
}

fn run(config: CliConfig) -> Result<(), MnemonicError> {
    if config.digits.is_none() {
        println!(
            "Could not find any digits to use. Using default digits {}\n",
            config.digits_or_default()
        );
    }
    let digits = parse_digit_string(config.digits_or_default())?;

    let registered = config.dictionaries();
    let selected = if config.all {
        registered
    } else {
        vec![find_dictionary(&registered, config.dictionary_name())?.clone()]
    };

    let started = Instant::now();
    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("System monitoring enabled");
    }

    let dictionaries = LocalStorage::new(config.dict_dir());
    let output = LocalStorage::new(config.output_path());
    let pipeline = MnemonicPipeline::new(dictionaries, output, config);
    let mut engine = MnemonicEngine::new_with_monitoring(pipeline, monitor_enabled);

    let outcomes = engine.run(&selected, &digits)?;
    let verified = outcomes.iter().filter(|o| o.is_verified()).count();
    tracing::info!("{} of {} dictionaries verified", verified, outcomes.len());

    println!("\nTotal execution time: {}ms", started.elapsed().as_millis());
    Ok(())
}
