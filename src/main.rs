//! Epistemic Topology CLI - Run density simulations from JSON parameters.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use epistemic_topology::{
    animation::{AnimationDriver, Cadence, TickSnapshot},
    calibration::{CaseStudy, SweepConfig, sweep},
    render::PixelBuffer,
    schema::{DT, SeedSet, SimulationParams, TICK_INTERVAL, load_config},
};

/// Default canvas side for `--png` output.
const DEFAULT_CANVAS: u32 = 500;

struct Options {
    params_path: Option<PathBuf>,
    steps: u64,
    realtime: bool,
    png: Option<PathBuf>,
    canvas: u32,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }

    match args[1].as_str() {
        "--example" => {
            print_example_config();
            return;
        }
        "--calibrate" => {
            run_calibration(args.get(2).map(String::as_str));
            return;
        }
        _ => {}
    }

    let options = parse_options(&args[1..]).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!();
        print_usage(&args[0]);
        std::process::exit(1);
    });

    let (params, seeds) = match &options.params_path {
        Some(path) => load_config(path).unwrap_or_else(|e| {
            eprintln!("Error loading configuration: {}", e);
            std::process::exit(1);
        }),
        None => (SimulationParams::default(), SeedSet::default()),
    };

    run_simulation(params, seeds, &options);
}

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} <params.json|--defaults> [steps] [--realtime] [--png out.png] [--canvas px]",
        program
    );
    eprintln!("       {} --calibrate [case]", program);
    eprintln!("       {} --example", program);
    eprintln!();
    eprintln!("Run an epistemic density simulation from JSON parameters.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  params.json  Path to simulation parameters (seeds from params.seeds.json)");
    eprintln!("  --defaults   Use built-in parameters and seeds");
    eprintln!("  steps        Number of ticks (default: 100)");
    eprintln!("  --realtime   Pace ticks at {} ms", TICK_INTERVAL.as_millis());
    eprintln!("  --png        Write the final frame as PNG");
    eprintln!("  --canvas     Canvas side in pixels (default: {})", DEFAULT_CANVAS);
    eprintln!("  --calibrate  Fit the mean-field model to built-in case studies");
}

fn parse_options(args: &[String]) -> Result<Options, String> {
    let mut options = Options {
        params_path: None,
        steps: 100,
        realtime: false,
        png: None,
        canvas: DEFAULT_CANVAS,
    };

    let mut positional = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--defaults" => {}
            "--realtime" => options.realtime = true,
            "--png" => {
                let path = iter.next().ok_or("--png needs a path")?;
                options.png = Some(PathBuf::from(path));
            }
            "--canvas" => {
                let px = iter.next().ok_or("--canvas needs a size")?;
                options.canvas = px
                    .parse()
                    .map_err(|_| format!("invalid canvas size: {}", px))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag: {}", flag)),
            _ => positional.push(arg.as_str()),
        }
    }

    let mut positional = positional.into_iter();
    if !args.iter().any(|a| a == "--defaults") {
        let path = positional.next().ok_or("missing params file or --defaults")?;
        options.params_path = Some(PathBuf::from(path));
    }
    if let Some(steps) = positional.next() {
        options.steps = steps
            .parse()
            .map_err(|_| format!("invalid step count: {}", steps))?;
    }

    Ok(options)
}

fn print_stats(label: &str, snapshot: &TickSnapshot) {
    println!("{}:", label);
    println!("  Total knowledge: {:.2}", snapshot.total);
    println!("  Max density: {:.3}", snapshot.max);
    println!("  Entropy: {:.2} bits", snapshot.entropy);
    println!("  Time: {:.1}", snapshot.simulated_time);
}

fn run_simulation(params: SimulationParams, seeds: SeedSet, options: &Options) {
    println!("Epistemic Topology Simulation");
    println!("=============================");
    println!("Grid: {}x{}", params.grid_size, params.grid_size);
    println!(
        "D: {}, σ: {}, μ: {}",
        params.diffusion, params.creation, params.dissipation
    );
    println!("dt: {}", DT);
    println!("Steps: {}", options.steps);
    println!();

    let mut driver: AnimationDriver<PixelBuffer> = AnimationDriver::new(params, seeds);
    if options.png.is_some() {
        let canvas = PixelBuffer::square(options.canvas).unwrap_or_else(|e| {
            eprintln!("Error creating canvas: {}", e);
            std::process::exit(1);
        });
        driver.attach_target(canvas);
    }

    driver.start();
    let initial = driver.snapshot();
    print_stats("Initial state", &initial);
    println!();

    println!("Running simulation...");
    let start = Instant::now();
    let mut cadence = Cadence::default();
    let steps = options.steps;
    let mut done = 0u64;

    while done < steps {
        if options.realtime {
            let now = start.elapsed();
            if !cadence.poll(now) {
                std::thread::sleep(cadence.until_next(now).min(Duration::from_millis(5)));
                continue;
            }
        }

        let Some(snapshot) = driver.tick() else {
            break;
        };
        done += 1;

        // Print progress every 10%
        if done % (steps / 10).max(1) == 0 {
            let elapsed = start.elapsed().as_secs_f32();
            println!(
                "  Step {}/{}: total={:.2}, max={:.3}, entropy={:.2}, {:.1} steps/s",
                done,
                steps,
                snapshot.total,
                snapshot.max,
                snapshot.entropy,
                done as f32 / elapsed.max(f32::EPSILON)
            );
        }
    }

    let elapsed = start.elapsed();
    driver.stop();
    let final_stats = driver.snapshot();

    println!();
    print_stats("Final state", &final_stats);
    println!();
    println!(
        "Knowledge growth: {:+.2}%",
        growth_percent(&initial, &final_stats)
    );
    if options.realtime && cadence.skipped() > 0 {
        println!("Dropped ticks: {}", cadence.skipped());
    }
    println!(
        "Time: {:.2}s ({:.1} steps/s)",
        elapsed.as_secs_f32(),
        done as f32 / elapsed.as_secs_f32().max(f32::EPSILON)
    );

    if let Some(path) = &options.png {
        if let Some(canvas) = driver.target() {
            match canvas.save_png(path) {
                Ok(()) => println!("Frame written to {}", path.display()),
                Err(e) => {
                    eprintln!("Error writing frame: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn growth_percent(initial: &TickSnapshot, final_stats: &TickSnapshot) -> f32 {
    if initial.total == 0.0 {
        return 0.0;
    }
    (final_stats.total - initial.total) / initial.total * 100.0
}

fn run_calibration(key: Option<&str>) {
    let cases = match key {
        Some(key) => match CaseStudy::find(key) {
            Some(case) => vec![case],
            None => {
                eprintln!("Unknown case study: {}", key);
                eprintln!(
                    "Available: {}",
                    CaseStudy::builtin()
                        .iter()
                        .map(|c| c.key.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                std::process::exit(1);
            }
        },
        None => CaseStudy::builtin(),
    };

    println!("Mean-Field Calibration");
    println!("======================");

    for case in &cases {
        let report = case.evaluate();
        let m = &report.metrics;

        println!();
        println!("{} - {}", case.name, case.description);
        println!(
            "  D: {}, σ: {}, μ: {}",
            case.params.diffusion, case.params.creation, case.params.dissipation
        );
        for sample in &report.samples {
            println!(
                "    {:>8}  observed {:>6.1}  predicted {:>6.1}  error {:>5.1}",
                sample.label, sample.observed, sample.predicted, sample.error
            );
        }
        println!("  RMSE: {:.2}", m.rmse);
        println!("  Correlation: {:.1}%", m.correlation);
        println!("  Predictive accuracy: {:.1}%", m.predictive_accuracy);
        println!("  Diffusion rate: {:.2}", m.diffusion_rate);

        println!("  Sensitivity:");
        for point in sweep(case, &SweepConfig::default()) {
            println!(
                "    {}={:<5}  accuracy {:>5.1}%  rmse {:>5.2}",
                point.parameter.symbol(),
                point.value,
                point.metrics.predictive_accuracy,
                point.metrics.rmse
            );
        }
    }
}

fn print_example_config() {
    let params = SimulationParams::default();
    let seeds = SeedSet::default();

    println!("Example parameters (params.json):");
    println!("{}", serde_json::to_string_pretty(&params).unwrap_or_default());
    println!();
    println!("Example seeds (params.seeds.json):");
    println!("{}", serde_json::to_string_pretty(&seeds).unwrap_or_default());
}
