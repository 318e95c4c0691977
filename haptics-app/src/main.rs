//! Haptics demo
//!
//! Runs the effector against a simulated device: the cursor sweeps back and
//! forth along X on a 1 kHz haptic thread while a fixed-step simulation on the
//! main thread keeps a kinematic proxy from passing through a wall.
//!
//! ```bash
//! RUST_LOG=debug haptics-app --seconds 5 --wall 0.04
//! haptics-app --config haptics.json --no-collision-detection
//! ```

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use log::info;
use parking_lot::Mutex;
use rein_haptics::{
    ColliderId, ContactTransitions, DeviceSample, FixedTimestep, HapticDevice, HapticsConfig,
    PhysicsHapticEffector, RateMeter,
};

const WALL: ColliderId = ColliderId(1);
const PROXY_RADIUS: f32 = 0.01;

#[derive(Parser, Debug)]
#[command(name = "haptics-app", about = "Physics haptic effector demo", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// How long to run, in seconds
    #[arg(short, long, default_value = "3")]
    seconds: f64,

    /// X coordinate of the wall plane, in meters
    #[arg(long, default_value = "0.05")]
    wall: f32,

    /// Cursor sweep amplitude, in meters
    #[arg(long, default_value = "0.08")]
    amplitude: f32,

    /// Apply force even when the proxy touches nothing
    #[arg(long)]
    no_collision_detection: bool,
}

/// Device whose cursor follows a sine sweep along X.
struct SimulatedDevice {
    amplitude: f32,
    period: f32,
    sample: DeviceSample,
    applied: u64,
    released: u64,
    peak_force: f32,
}

impl SimulatedDevice {
    fn new(amplitude: f32, period: f32) -> Self {
        Self {
            amplitude,
            period,
            sample: DeviceSample::default(),
            applied: 0,
            released: 0,
            peak_force: 0.0,
        }
    }

    fn poll(&mut self, t: f32) {
        let omega = std::f32::consts::TAU / self.period;
        self.sample = DeviceSample::new(
            Vec3::new(self.amplitude * (omega * t).sin(), 0.0, 0.0),
            Vec3::new(self.amplitude * omega * (omega * t).cos(), 0.0, 0.0),
        );
    }
}

impl HapticDevice for SimulatedDevice {
    fn sample(&self) -> DeviceSample {
        self.sample
    }

    fn set_force(&mut self, force: Vec3) {
        self.applied += 1;
        self.peak_force = self.peak_force.max(force.length());
    }

    fn release(&mut self) {
        self.released += 1;
    }
}

/// Parse `--seconds`, rejecting negative, NaN and out-of-range values.
fn run_duration(seconds: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(seconds)
        .with_context(|| format!("--seconds must be a non-negative duration, got {seconds}"))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let run_for = run_duration(cli.seconds)?;

    let mut config = match &cli.config {
        Some(path) => HapticsConfig::load(path)?,
        None => HapticsConfig::default(),
    };
    config.effector.force_enabled = true;
    if cli.no_collision_detection {
        config.effector.collision_detection = false;
    }
    config.validate()?;

    info!(
        "physics {} Hz, haptics {} Hz ({:.1} per physics tick), stiffness {}, damping {}, collision detection {}",
        config.rates.physics_hz,
        config.rates.haptic_hz,
        config.rates.haptic_ticks_per_physics_tick(),
        config.effector.stiffness,
        config.effector.damping,
        config.effector.collision_detection
    );

    let (mut updater, evaluator, controls) =
        PhysicsHapticEffector::new(&config.effector).into_parts();
    let cursor = Arc::new(Mutex::new(Vec3::ZERO));
    let stop = Arc::new(AtomicBool::new(false));
    let start = Instant::now();

    let haptic = {
        let cursor = cursor.clone();
        let stop = stop.clone();
        let period = config.rates.haptic_period();
        let mut device = SimulatedDevice::new(cli.amplitude, 2.0);
        thread::Builder::new()
            .name("haptics".into())
            .spawn(move || {
                let mut meter = RateMeter::new(Instant::now());
                while !stop.load(Ordering::Relaxed) {
                    let now = Instant::now();
                    device.poll((now - start).as_secs_f32());
                    *cursor.lock() = device.sample.position;
                    evaluator.on_device_state_changed(&mut device);
                    if let Some(hz) = meter.tick(now) {
                        info!("haptics: {:.0} Hz", hz);
                    }
                    thread::sleep(period);
                }
                device
            })
            .context("Failed to spawn haptics thread")?
    };

    let contact_x = cli.wall - PROXY_RADIUS;
    let mut timestep = FixedTimestep::new(config.rates.physics_hz);
    let mut transitions = ContactTransitions::new();
    let mut meter = RateMeter::new(start);
    let mut last = start;
    let mut peak_penetration = 0.0f32;

    while start.elapsed() < run_for {
        let now = Instant::now();
        let steps = timestep.advance((now - last).as_secs_f64());
        last = now;

        for _ in 0..steps {
            let target = *cursor.lock();
            let proxy = Vec3::new(target.x.min(contact_x), target.y, target.z);
            let contacts = (target.x >= contact_x).then_some(WALL);
            for event in transitions.update(contacts) {
                updater.handle(event);
            }
            updater.fixed_update(proxy);
            peak_penetration = peak_penetration.max(target.x - contact_x);

            if let Some(hz) = meter.tick(now) {
                info!(
                    "physics: {:.0} Hz, touching {:?}",
                    hz,
                    updater.tracker().first_touched()
                );
            }
        }

        thread::sleep(config.rates.physics_period());
    }

    stop.store(true, Ordering::Relaxed);
    let device = haptic
        .join()
        .map_err(|_| anyhow::anyhow!("haptics thread panicked"))?;

    info!(
        "done: {} force commands, {} releases, peak force {:.2} N, peak penetration {:.1} mm",
        device.applied,
        device.released,
        device.peak_force,
        peak_penetration * 1000.0
    );
    info!("force enabled at exit: {}", controls.force_enabled());
    Ok(())
}
