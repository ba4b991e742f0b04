//! Volley Sim entry point
//!
//! Headless frame driver: runs the simulation at a fixed tick rate and logs
//! what happens. Rendering is left to whatever consumes the draw list.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use clap::Parser;
    use volley_sim::consts::*;
    use volley_sim::render::{FrameStyle, as_bytes, build_frame};
    use volley_sim::sim::{SimState, TickStats, tick};
    use volley_sim::{Preset, SimConfig};

    /// Headless driver for the ball-and-trail simulation
    #[derive(Parser, Debug)]
    #[command(name = "volley-sim", version, about)]
    struct Args {
        /// Built-in preset: volleyball, purple-rush or uniform
        #[arg(long, value_parser = parse_preset)]
        preset: Option<Preset>,
        /// JSON config file, takes priority over --preset
        #[arg(long)]
        config: Option<PathBuf>,
        /// Number of ticks to run
        #[arg(long, default_value_t = 600)]
        ticks: u64,
        /// RNG seed, overrides the config seed
        #[arg(long)]
        seed: Option<u64>,
        /// Pace ticks against the wall clock
        #[arg(long)]
        realtime: bool,
        /// Print the final state as JSON
        #[arg(long)]
        dump: bool,
    }

    fn parse_preset(name: &str) -> Result<Preset, String> {
        Preset::from_str(name).ok_or_else(|| {
            let known: Vec<_> = Preset::ALL.iter().map(|p| p.as_str()).collect();
            format!("unknown preset '{name}' (expected one of: {})", known.join(", "))
        })
    }

    impl Args {
        /// Config file wins over preset; a bad file falls back to the preset
        fn config(&self) -> SimConfig {
            let preset = self.preset.unwrap_or_default();
            match &self.config {
                Some(path) => SimConfig::load(path).unwrap_or_else(|e| {
                    log::warn!("{e}; falling back to the {} preset", preset.as_str());
                    preset.config()
                }),
                None => preset.config(),
            }
        }
    }

    /// Fixed-timestep driver
    struct Driver {
        state: SimState,
        accumulator: f32,
        last_frame: Instant,
        totals: TickStats,
    }

    impl Driver {
        fn new(state: SimState) -> Self {
            Self {
                state,
                accumulator: 0.0,
                last_frame: Instant::now(),
                totals: TickStats::default(),
            }
        }

        fn step(&mut self) {
            let stats = tick(&mut self.state);
            self.totals.collisions += stats.collisions;
            self.totals.color_changes += stats.color_changes;
            self.totals.particles = stats.particles;

            if self.state.time_ticks % 60 == 0 {
                log::info!(
                    "tick {:>6}: {} particles, {} collisions, {} color changes, avg speed {:.2}",
                    self.state.time_ticks,
                    stats.particles,
                    self.totals.collisions,
                    self.totals.color_changes,
                    self.state.total_speed() / self.state.bodies.len().max(1) as f32
                );
            }
        }

        /// Run the ticks that fit into the wall-clock time since the last frame
        fn frame(&mut self) -> u32 {
            let now = Instant::now();
            let dt = (now - self.last_frame).as_secs_f32().min(0.1);
            self.last_frame = now;
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                self.step();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
            substeps
        }
    }

    pub fn run() {
        env_logger::init();

        let args = Args::parse();

        let config = args.config();
        let seed = args.seed.or(config.seed).unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });
        let ticks = args.ticks;

        log::info!("Volley Sim (native) starting, {} ticks", ticks);
        let mut driver = Driver::new(SimState::new(config, seed));

        if args.realtime {
            let frame_time = Duration::from_secs_f32(SIM_DT);
            while driver.state.time_ticks < ticks {
                driver.frame();
                std::thread::sleep(frame_time);
            }
        } else {
            for _ in 0..ticks {
                driver.step();
            }
        }

        let frame = build_frame(&driver.state, &FrameStyle::default());
        log::info!(
            "Done after {} ticks: {} collisions, {} live particles, last frame {} vertices ({} bytes)",
            driver.state.time_ticks,
            driver.totals.collisions,
            driver.totals.particles,
            frame.len(),
            as_bytes(&frame).len()
        );

        if args.dump {
            match driver.state.snapshot_json() {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Failed to serialize state: {e}"),
            }
        }
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm32
}
