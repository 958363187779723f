use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Kyiv city centre; samples scatter around it.
const CENTER: (f64, f64) = (50.4501, 30.5234);

const SUBSTANCES: [&str; 3] = ["Хлор", "Аміак", "Сірководень"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Minutes after 08:00 on the sample day, as `YYYY-MM-DD HH:MM`.
fn timestamp(minutes: u32) -> String {
    let total = 8 * 60 + minutes;
    format!("2026-01-09 {:02}:{:02}", (total / 60) % 24, total % 60)
}

fn write_radiation(path: &Path, rng: &mut SimpleRng, n: u32) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["latitude", "longitude", "value", "timestamp"])?;
    for i in 0..n {
        let lat = rng.gauss(CENTER.0, 0.01);
        let lon = rng.gauss(CENTER.1, 0.015);
        let dose = rng.gauss(0.3, 0.12).abs();
        writer.write_record([
            format!("{lat:.6}"),
            format!("{lon:.6}"),
            format!("{dose:.2}"),
            timestamp(i * 10),
        ])?;
    }
    writer.flush().context("flushing radiation samples")?;
    Ok(())
}

fn write_chemical(path: &Path, rng: &mut SimpleRng, n: u32) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["latitude", "longitude", "value", "timestamp", "substanceName"])?;
    for i in 0..n {
        let lat = rng.gauss(CENTER.0 + 0.01, 0.008);
        let lon = rng.gauss(CENTER.1 - 0.01, 0.012);
        let concentration = rng.gauss(1.5, 0.8).abs();
        let substance = SUBSTANCES[(rng.next_u64() % SUBSTANCES.len() as u64) as usize];
        writer.write_record([
            format!("{lat:.6}"),
            format!("{lon:.6}"),
            format!("{concentration:.2}"),
            timestamp(i * 15),
            substance.to_string(),
        ])?;
    }
    writer.flush().context("flushing chemical samples")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);

    let radiation = out_dir.join("radiation.data.csv");
    write_radiation(&radiation, &mut rng, 25)?;
    log::info!("Wrote radiation samples to {}", radiation.display());

    let chemical = out_dir.join("chemical.data.csv");
    write_chemical(&chemical, &mut rng, 15)?;
    log::info!("Wrote chemical samples to {}", chemical.display());

    println!(
        "Wrote 25 radiation and 15 chemical measurements to {}",
        out_dir.display()
    );
    Ok(())
}
