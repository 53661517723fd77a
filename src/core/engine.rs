use crate::adapters::output::format_word_table;
use crate::core::pipeline::{Pipeline, RunOutcome};
use crate::domain::catalog::DictionarySpec;
use crate::domain::model::join_digits;
use crate::utils::error::{ErrorCategory, MnemonicError, Result};
use crate::utils::monitor::SystemMonitor;

pub struct MnemonicEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> MnemonicEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub fn monitor(&self) -> &SystemMonitor {
        &self.monitor
    }

    /// Extract, transform and load one dictionary.
    pub fn run_dictionary(&mut self, spec: &DictionarySpec, digits: &[u8]) -> Result<RunOutcome> {
        println!("Executing using: {}", spec.name);

        let dictionary = self.pipeline.extract(spec)?;
        tracing::info!("Loaded {} words from {}", dictionary.len(), spec.name);
        self.monitor.finish_phase("Extract");

        let outcome = self.pipeline.transform(&dictionary, digits)?;
        for group in &outcome.result.groups {
            println!("Found digits {}:", group.digits_as_string());
            println!("{}\n", format_word_table(group.candidates()));
        }
        if !outcome.result.is_complete() {
            println!(
                "No words found for the remaining digits: {}",
                join_digits(outcome.result.remainder(), ",")
            );
        }
        if !outcome.is_verified() {
            println!("{}", outcome.verification.report());
        }
        self.monitor.finish_phase("Transform");

        for path in self.pipeline.load(spec, &outcome)? {
            println!("Output saved to: {}", path);
        }
        self.monitor.finish_phase("Load");

        Ok(outcome)
    }

    /// Runs every dictionary in order. With more than one dictionary a
    /// failing one is reported and skipped; the run fails only when none
    /// succeeded or the failure is internal.
    pub fn run(&mut self, specs: &[DictionarySpec], digits: &[u8]) -> Result<Vec<RunOutcome>> {
        let mut outcomes = Vec::new();
        let mut last_error: Option<MnemonicError> = None;

        for spec in specs {
            match self.run_dictionary(spec, digits) {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) if specs.len() > 1 && e.category() != ErrorCategory::Internal => {
                    self.monitor.finish_phase("Failed");
                    tracing::error!("Skipping {}: {}", spec.name, e);
                    eprintln!("{}", e.user_friendly_message());
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        self.monitor.log_final_stats();

        match last_error {
            Some(e) if outcomes.is_empty() => Err(e),
            _ => Ok(outcomes),
        }
    }
}
