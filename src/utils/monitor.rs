#[cfg(feature = "cli")]
use sysinfo::{Pid, ProcessesToUpdate, System};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct RunStats {
    pub cpu_usage: f32,
    pub memory_usage_mb: u64,
    pub peak_memory_mb: u64,
    pub elapsed_time: Duration,
}

#[cfg(feature = "cli")]
struct ProcessProbe {
    system: System,
    pid: Pid,
    peak_memory_mb: u64,
}

/// Tracks elapsed time per phase and, when enabled, process CPU and memory.
pub struct SystemMonitor {
    start_time: Instant,
    phase_start: Instant,
    phases: Vec<(String, Duration)>,
    #[cfg(feature = "cli")]
    probe: Option<ProcessProbe>,
}

impl SystemMonitor {
    #[cfg_attr(not(feature = "cli"), allow(unused_variables))]
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            phase_start: now,
            phases: Vec::new(),
            #[cfg(feature = "cli")]
            probe: if enabled { ProcessProbe::new() } else { None },
        }
    }

    pub fn is_enabled(&self) -> bool {
        #[cfg(feature = "cli")]
        {
            self.probe.is_some()
        }
        #[cfg(not(feature = "cli"))]
        {
            false
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Marks the end of a phase and logs its duration (plus process stats when enabled).
    pub fn finish_phase(&mut self, phase: &str) -> Duration {
        let phase_time = self.phase_start.elapsed();
        self.phase_start = Instant::now();
        self.phases.push((phase.to_string(), phase_time));

        match self.stats() {
            Some(stats) => tracing::info!(
                "{} took {:?} - CPU: {:.1}%, Memory: {}MB, Peak: {}MB",
                phase,
                phase_time,
                stats.cpu_usage,
                stats.memory_usage_mb,
                stats.peak_memory_mb
            ),
            None => tracing::debug!("{} took {:?}", phase, phase_time),
        }
        phase_time
    }

    /// Finished phases in order.
    pub fn phases(&self) -> &[(String, Duration)] {
        &self.phases
    }

    pub fn log_final_stats(&mut self) {
        let elapsed = self.elapsed();
        match self.stats() {
            Some(stats) => tracing::info!(
                "Final stats - Total time: {:?}, Peak memory: {}MB",
                elapsed,
                stats.peak_memory_mb
            ),
            None => tracing::debug!("Total time: {:?}", elapsed),
        }
    }

    pub fn stats(&mut self) -> Option<RunStats> {
        #[cfg(feature = "cli")]
        {
            let elapsed_time = self.start_time.elapsed();
            self.probe.as_mut().and_then(|probe| probe.sample(elapsed_time))
        }
        #[cfg(not(feature = "cli"))]
        {
            None
        }
    }
}

impl Default for SystemMonitor {
    fn default() -> Self {
        Self::new(false)
    }
}

#[cfg(feature = "cli")]
impl ProcessProbe {
    fn new() -> Option<Self> {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => pid,
            Err(e) => {
                tracing::warn!("System monitoring unavailable: {}", e);
                return None;
            }
        };

        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        Some(Self {
            system,
            pid,
            peak_memory_mb: 0,
        })
    }

    fn sample(&mut self, elapsed_time: Duration) -> Option<RunStats> {
        self.system
            .refresh_processes(ProcessesToUpdate::Some(&[self.pid]), true);
        let process = self.system.process(self.pid)?;

        let memory_mb = process.memory() / 1024 / 1024;
        self.peak_memory_mb = self.peak_memory_mb.max(memory_mb);

        Some(RunStats {
            cpu_usage: process.cpu_usage(),
            memory_usage_mb: memory_mb,
            peak_memory_mb: self.peak_memory_mb,
            elapsed_time,
        })
    }
}
