use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::PathBuf;

use qmfbank::config::{PrototypeConfig, QmfConfig};
use qmfbank::qmf::{HighBandPolarity, SubbandPair};
use qmfbank::signal_processing::{Sample, from_q15, magnitude_db};
use qmfbank::{QmfProcessor, read_wav, save_subbands_wav, save_wav};

#[derive(Parser, Debug)]
#[command(name = "qmfbank")]
#[command(about = "Split a WAV file into QMF subbands and reconstruct it", long_about = None)]
struct Args {
    /// 16-bit PCM WAV input (first channel is used)
    input: PathBuf,

    /// Reconstructed mono WAV output
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Stereo WAV of the subband streams (left = low, right = high)
    #[arg(long)]
    subbands: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Prototype: johnston8a, remez:<transition>, or a comma-separated tap list
    #[arg(short = 'p', long)]
    prototype: Option<PrototypeConfig>,

    /// Tap count (overrides the configuration file)
    #[arg(short = 'n', long)]
    ntaps: Option<usize>,

    /// How synthesis combines the filtered subbands
    #[arg(long, value_enum)]
    polarity: Option<HighBandPolarity>,

    /// Output format: text, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    peak: f32,
    rms: f32,
    mean: f32,
    std_dev: f32,
}

impl StatsSummary {
    fn from_samples(samples: &[Sample]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut stats: Stats<f32> = Stats::new();
        let mut square_sum = 0.0f64;
        for &s in samples {
            let x = from_q15(s);
            stats.update(x);
            square_sum += (x as f64) * (x as f64);
        }
        Some(Self {
            count: stats.count,
            peak: stats.max.abs().max(stats.min.abs()),
            rms: (square_sum / samples.len() as f64).sqrt() as f32,
            mean: stats.mean,
            std_dev: stats.std_dev,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
struct PrototypeSummary {
    taps: Vec<Sample>,
    low_dc_db: f64,
    low_nyquist_db: f64,
    high_dc_db: f64,
    high_nyquist_db: f64,
}

#[derive(Debug, Clone, Serialize)]
struct Reconstruction {
    /// Steps from accepting a sample to presenting its reconstruction
    pipeline_latency: usize,
    /// Signal delay through the filters, found by cross-correlation
    filter_delay: usize,
    gain: f64,
    snr_db: f64,
    max_abs_error: i32,
}

#[derive(Debug, Clone, Serialize)]
struct Report {
    filename: String,
    sample_rate: u32,
    prototype: String,
    polarity: HighBandPolarity,
    out_shift: u32,
    filters: PrototypeSummary,
    input: Option<StatsSummary>,
    output: Option<StatsSummary>,
    low_band: Option<StatsSummary>,
    high_band: Option<StatsSummary>,
    reconstruction: Option<Reconstruction>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => QmfConfig::from_toml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => QmfConfig::default(),
    };
    if let Some(prototype) = args.prototype.clone() {
        if let PrototypeConfig::Custom { coefficients } = &prototype {
            config.ntaps = coefficients.len();
        }
        config.prototype = prototype;
    }
    if let Some(ntaps) = args.ntaps {
        config.ntaps = ntaps;
    }
    if let Some(polarity) = args.polarity {
        config.synthesis_polarity = polarity;
    }
    config.validate().context("invalid configuration")?;

    let (input, sample_rate) =
        read_wav(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    log::info!("Read {} samples at {} Hz", input.len(), sample_rate);

    let coefficients = config.coefficient_set()?;
    let mut processor = QmfProcessor::new(&config)?;
    let (output, subbands) = processor.process_block_with_subbands(&input);
    if output.len() != input.len() {
        log::warn!("Reconstructed {} of {} samples", output.len(), input.len());
    }

    if let Some(path) = &args.output {
        save_wav(path, &output, sample_rate)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    if let Some(path) = &args.subbands {
        save_subbands_wav(path, &subbands, sample_rate)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    let (low, high): (Vec<Sample>, Vec<Sample>) =
        subbands.iter().map(|p: &SubbandPair| (p.low, p.high)).unzip();

    let report = Report {
        filename: args
            .input
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| args.input.display().to_string()),
        sample_rate,
        prototype: config.prototype.to_string(),
        polarity: config.synthesis_polarity,
        out_shift: config.out_shift,
        filters: PrototypeSummary {
            taps: coefficients.prototype().to_vec(),
            low_dc_db: magnitude_db(coefficients.prototype(), 0.0),
            low_nyquist_db: magnitude_db(coefficients.prototype(), 0.5),
            high_dc_db: magnitude_db(coefficients.mirror(), 0.0),
            high_nyquist_db: magnitude_db(coefficients.mirror(), 0.5),
        },
        input: StatsSummary::from_samples(&input),
        output: StatsSummary::from_samples(&output),
        low_band: StatsSummary::from_samples(&low),
        high_band: StatsSummary::from_samples(&high),
        reconstruction: measure_reconstruction(
            &input,
            &output,
            processor.latency(),
            2 * config.ntaps,
        ),
    };

    match args.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

/// Align output to input by maximum cross-correlation over `0..=max_delay`
fn measure_reconstruction(
    input: &[Sample],
    output: &[Sample],
    pipeline_latency: usize,
    max_delay: usize,
) -> Option<Reconstruction> {
    let correlate = |delay: usize| -> f64 {
        input
            .iter()
            .zip(output.iter().skip(delay))
            .map(|(&x, &y)| x as f64 * y as f64)
            .sum()
    };

    let filter_delay = (0..=max_delay)
        .filter(|&d| d < output.len())
        .max_by(|&a, &b| correlate(a).total_cmp(&correlate(b)))?;

    let pairs: Vec<(f64, f64)> = input
        .iter()
        .zip(output.iter().skip(filter_delay))
        .map(|(&x, &y)| (x as f64, y as f64))
        .collect();
    let energy: f64 = pairs.iter().map(|(x, _)| x * x).sum();
    if energy == 0.0 {
        return None;
    }

    let gain = pairs.iter().map(|(x, y)| x * y).sum::<f64>() / energy;
    let noise: f64 = pairs.iter().map(|(x, y)| (y - gain * x).powi(2)).sum();
    let max_abs_error = pairs
        .iter()
        .map(|(x, y)| (y - x).abs() as i32)
        .max()
        .unwrap_or(0);

    Some(Reconstruction {
        pipeline_latency,
        filter_delay,
        gain,
        snr_db: 10.0 * (energy * gain * gain / noise.max(1e-10)).log10(),
        max_abs_error,
    })
}

fn print_stats(label: &str, stats: &Option<StatsSummary>) {
    match stats {
        Some(s) => println!(
            "  {:<10} n={:<8} peak={:.4} rms={:.4} mean={:+.5} std={:.4}",
            label, s.count, s.peak, s.rms, s.mean, s.std_dev
        ),
        None => println!("  {:<10} (empty)", label),
    }
}

fn print_text(report: &Report) {
    println!("=== {} ===", report.filename);
    println!("Sample rate: {} Hz", report.sample_rate);
    println!(
        "Prototype: {} ({} taps), shift {}, synthesis {:?}",
        report.prototype,
        report.filters.taps.len(),
        report.out_shift,
        report.polarity
    );
    println!("Taps: {:?}", report.filters.taps);
    println!(
        "Low path:  DC {:+.2} dB, Nyquist {:+.2} dB",
        report.filters.low_dc_db, report.filters.low_nyquist_db
    );
    println!(
        "High path: DC {:+.2} dB, Nyquist {:+.2} dB",
        report.filters.high_dc_db, report.filters.high_nyquist_db
    );
    println!();
    print_stats("input", &report.input);
    print_stats("low band", &report.low_band);
    print_stats("high band", &report.high_band);
    print_stats("output", &report.output);

    if let Some(r) = &report.reconstruction {
        println!();
        println!("Pipeline latency: {} steps", r.pipeline_latency);
        println!("Filter delay: {} samples", r.filter_delay);
        println!("Gain: {:.4}", r.gain);
        println!("SNR: {:.2} dB", r.snr_db);
        println!("Max abs error: {} LSB", r.max_abs_error);
    }
}

fn print_json(report: &Report) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{}", json);
    Ok(())
}
